//! REST client for the school management API.
//!
//! [`ResourceApi`] is the seam the resolution flow and the front ends talk
//! to; [`ApiClient`] implements it over `reqwest`.

use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use thiserror::Error;

use crate::config::{normalize_base_url, ClientConfig};
use crate::models::{Page, Record, ResourceKind};
use crate::session::ClientContext;
use crate::util::compact_text;

/// Body field that tells the server to skip the soft-delete uniqueness check.
pub const FORCE_CREATE_FIELD: &str = "force_create";

const ORGANIZATION_HEADER: &str = "X-Organization-Id";
const MAX_LIST_ALL_PAGES: u32 = 100;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("API returned HTTP {status}: {summary}")]
    Status {
        status: u16,
        body: Value,
        summary: String,
    },
    #[error("Failed to parse API response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("Invalid request payload: {0}")]
    InvalidPayload(&'static str),
    #[error("Invalid API configuration: {0}")]
    InvalidConfiguration(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    /// Builds a status error from a parsed response body.
    pub fn status(status: u16, body: Value) -> Self {
        let summary = compact_text(&summarize_body(&body));
        Self::Status {
            status,
            body,
            summary,
        }
    }

    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The error value handed to the classifier.
    ///
    /// Status errors expose the response body under `errors` (unless the
    /// server already wrapped it); every other failure becomes a bare
    /// `message` so it classifies as generic.
    pub fn payload(&self) -> Value {
        match self {
            Self::Status { status, body, .. } => {
                if body.get("errors").is_some() {
                    let mut wrapped = body.clone();
                    if let Some(object) = wrapped.as_object_mut() {
                        object.entry("status").or_insert_with(|| json!(status));
                    }
                    wrapped
                } else {
                    json!({ "status": status, "errors": body })
                }
            }
            other => json!({ "message": other.to_string() }),
        }
    }
}

/// Whether a create may collide with a soft-deleted record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CreateMode {
    #[default]
    Normal,
    /// Bypass the soft-delete uniqueness check and create alongside the
    /// deleted record.
    Force,
}

impl CreateMode {
    /// Request body for this mode; the force flag needs an object body.
    pub fn body(self, payload: &Value) -> ApiResult<Value> {
        match self {
            Self::Normal => Ok(payload.clone()),
            Self::Force => {
                let mut body = payload.clone();
                let object = body
                    .as_object_mut()
                    .ok_or(ApiError::InvalidPayload("force create requires a JSON object body"))?;
                object.insert(FORCE_CREATE_FIELD.to_string(), Value::Bool(true));
                Ok(body)
            }
        }
    }
}

/// Operations against one resource family's REST collection
#[allow(async_fn_in_trait)]
pub trait ResourceApi {
    /// Fetch one page (1-based) of a collection
    async fn list(&self, kind: ResourceKind, page: u32) -> ApiResult<Page<Record>>;

    async fn retrieve(&self, kind: ResourceKind, id: &str) -> ApiResult<Record>;

    async fn create(&self, kind: ResourceKind, payload: &Value, mode: CreateMode)
        -> ApiResult<Record>;

    async fn update(&self, kind: ResourceKind, id: &str, payload: &Value) -> ApiResult<Record>;

    /// Restore a soft-deleted record to active status
    async fn reactivate(&self, kind: ResourceKind, id: &str) -> ApiResult<Record>;

    async fn delete(&self, kind: ResourceKind, id: &str) -> ApiResult<()>;
}

impl<T: ResourceApi + ?Sized> ResourceApi for &T {
    async fn list(&self, kind: ResourceKind, page: u32) -> ApiResult<Page<Record>> {
        (**self).list(kind, page).await
    }

    async fn retrieve(&self, kind: ResourceKind, id: &str) -> ApiResult<Record> {
        (**self).retrieve(kind, id).await
    }

    async fn create(
        &self,
        kind: ResourceKind,
        payload: &Value,
        mode: CreateMode,
    ) -> ApiResult<Record> {
        (**self).create(kind, payload, mode).await
    }

    async fn update(&self, kind: ResourceKind, id: &str, payload: &Value) -> ApiResult<Record> {
        (**self).update(kind, id, payload).await
    }

    async fn reactivate(&self, kind: ResourceKind, id: &str) -> ApiResult<Record> {
        (**self).reactivate(kind, id).await
    }

    async fn delete(&self, kind: ResourceKind, id: &str) -> ApiResult<()> {
        (**self).delete(kind, id).await
    }
}

/// Every record gathered by [`list_all`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Collected {
    pub records: Vec<Record>,
    /// The page cap was reached while the server still reported more pages.
    pub truncated: bool,
}

/// Follows `next` links until the collection is exhausted or
/// `MAX_LIST_ALL_PAGES` pages have been read.
pub async fn list_all<A: ResourceApi + ?Sized>(
    api: &A,
    kind: ResourceKind,
) -> ApiResult<Collected> {
    let mut collected = Collected::default();
    let mut page = 1;

    loop {
        let batch = api.list(kind, page).await?;
        let has_next = batch.has_next();
        collected.records.extend(batch.results);

        if !has_next {
            break;
        }
        if page >= MAX_LIST_ALL_PAGES {
            tracing::warn!(
                resource = %kind,
                pages = page,
                fetched = collected.records.len(),
                "Stopped listing at the page limit; more records remain"
            );
            collected.truncated = true;
            break;
        }
        page += 1;
    }

    Ok(collected)
}

/// HTTP implementation of [`ResourceApi`].
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    client: Client,
    context: ClientContext,
}

impl ApiClient {
    pub fn new(config: &ClientConfig) -> ApiResult<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()?;
        Self::with_client(&config.api_base_url, config.context(), client)
    }

    /// Builds a client around an existing `reqwest::Client`.
    pub fn with_client(
        base_url: &str,
        context: ClientContext,
        client: Client,
    ) -> ApiResult<Self> {
        let base_url = normalize_base_url(base_url)
            .map_err(|error| ApiError::InvalidConfiguration(error.to_string()))?;
        Ok(Self {
            base_url,
            client,
            context,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub const fn context(&self) -> &ClientContext {
        &self.context
    }

    /// Collection URL, or a member URL with an optional action segment.
    pub fn url(&self, kind: ResourceKind, id: Option<&str>, action: Option<&str>) -> String {
        let mut url = format!("{}/{}/", self.base_url, kind.path_segment());
        if let Some(id) = id {
            url.push_str(&urlencoding::encode(id));
            url.push('/');
        }
        if let Some(action) = action {
            url.push_str(action);
            url.push('/');
        }
        url
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        let mut request = request.header(reqwest::header::ACCEPT, "application/json");
        if let Some(token) = self.context.access_token.as_deref() {
            request = request.bearer_auth(token);
        }
        if let Some(organization_id) = self.context.organization_id.as_deref() {
            request = request.header(ORGANIZATION_HEADER, organization_id);
        }
        request
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> ApiResult<T> {
        let response = ensure_success(self.authorize(request).send().await?).await?;
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

impl ResourceApi for ApiClient {
    async fn list(&self, kind: ResourceKind, page: u32) -> ApiResult<Page<Record>> {
        let page = page.max(1);
        tracing::debug!(resource = %kind, page, "Listing records");
        self.send_json(
            self.client
                .get(self.url(kind, None, None))
                .query(&[("page", page)]),
        )
        .await
    }

    async fn retrieve(&self, kind: ResourceKind, id: &str) -> ApiResult<Record> {
        tracing::debug!(resource = %kind, id, "Fetching record");
        self.send_json(self.client.get(self.url(kind, Some(id), None)))
            .await
    }

    async fn create(
        &self,
        kind: ResourceKind,
        payload: &Value,
        mode: CreateMode,
    ) -> ApiResult<Record> {
        let body = mode.body(payload)?;
        tracing::debug!(resource = %kind, ?mode, "Creating record");
        self.send_json(self.client.post(self.url(kind, None, None)).json(&body))
            .await
    }

    async fn update(&self, kind: ResourceKind, id: &str, payload: &Value) -> ApiResult<Record> {
        tracing::debug!(resource = %kind, id, "Updating record");
        self.send_json(
            self.client
                .patch(self.url(kind, Some(id), None))
                .json(payload),
        )
        .await
    }

    async fn reactivate(&self, kind: ResourceKind, id: &str) -> ApiResult<Record> {
        tracing::debug!(resource = %kind, id, "Reactivating record");
        self.send_json(self.client.post(self.url(kind, Some(id), Some("reactivate"))))
            .await
    }

    async fn delete(&self, kind: ResourceKind, id: &str) -> ApiResult<()> {
        tracing::debug!(resource = %kind, id, "Deleting record");
        let request = self.authorize(self.client.delete(self.url(kind, Some(id), None)));
        ensure_success(request.send().await?).await?;
        Ok(())
    }
}

async fn ensure_success(response: Response) -> ApiResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();
    let body = parse_error_body(status, &text);
    tracing::warn!(status = status.as_u16(), "API request failed");
    Err(ApiError::status(status.as_u16(), body))
}

/// JSON bodies are kept verbatim; anything else becomes `{"detail": text}`.
fn parse_error_body(status: StatusCode, text: &str) -> Value {
    if let Ok(body) = serde_json::from_str::<Value>(text) {
        if !body.is_null() {
            return body;
        }
    }

    let trimmed = compact_text(text);
    if trimmed.is_empty() {
        json!({ "detail": format!("HTTP {}", status.as_u16()) })
    } else {
        json!({ "detail": trimmed })
    }
}

fn summarize_body(body: &Value) -> String {
    match body {
        Value::String(text) => text.clone(),
        Value::Object(object) => object
            .get("detail")
            .and_then(Value::as_str)
            .map_or_else(|| body.to_string(), ToString::to_string),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::conflict::{classify, ErrorClass};

    fn client() -> ApiClient {
        ApiClient::with_client(
            "https://api.school.example/api/v1/",
            ClientContext::default(),
            Client::new(),
        )
        .unwrap()
    }

    #[test]
    fn builds_collection_member_and_action_urls() {
        let client = client();
        assert_eq!(
            client.url(ResourceKind::LeaveAllocations, None, None),
            "https://api.school.example/api/v1/leave-allocations/"
        );
        assert_eq!(
            client.url(ResourceKind::Teachers, Some("abc-123"), Some("reactivate")),
            "https://api.school.example/api/v1/teachers/abc-123/reactivate/"
        );
        assert_eq!(
            client.url(ResourceKind::Students, Some("a/b"), None),
            "https://api.school.example/api/v1/students/a%2Fb/"
        );
    }

    #[test]
    fn rejects_base_url_without_scheme() {
        let error = ApiClient::with_client("api.example", ClientContext::default(), Client::new())
            .unwrap_err();
        assert!(matches!(error, ApiError::InvalidConfiguration(_)));
    }

    #[test]
    fn force_mode_adds_flag_to_object_bodies() {
        let payload = json!({ "email": "ada@school.example" });
        assert_eq!(CreateMode::Normal.body(&payload).unwrap(), payload);
        assert_eq!(
            CreateMode::Force.body(&payload).unwrap(),
            json!({ "email": "ada@school.example", "force_create": true })
        );
        assert!(CreateMode::Force.body(&json!([1, 2])).is_err());
    }

    #[test]
    fn status_payload_wraps_body_under_errors() {
        let error = ApiError::status(
            400,
            json!({ "has_deleted_duplicate": true, "deleted_record_id": "abc-123" }),
        );
        assert!(classify(&error.payload()).is_deleted_duplicate());
        assert_eq!(error.status_code(), Some(400));
    }

    #[test]
    fn status_payload_keeps_server_wrapped_errors() {
        let error = ApiError::status(
            400,
            json!({ "errors": { "email": ["Enter a valid email address."] } }),
        );
        let payload = error.payload();
        assert_eq!(payload["status"], json!(400));
        assert!(matches!(classify(&payload), ErrorClass::FieldErrors(_)));
    }

    #[test]
    fn non_status_errors_classify_as_generic() {
        let error = ApiError::InvalidPayload("force create requires a JSON object body");
        assert_eq!(
            classify(&error.payload()),
            ErrorClass::Generic(error.to_string())
        );
    }

    #[test]
    fn text_error_bodies_become_detail() {
        assert_eq!(
            parse_error_body(StatusCode::BAD_GATEWAY, "<html>bad gateway</html>"),
            json!({ "detail": "<html>bad gateway</html>" })
        );
        assert_eq!(
            parse_error_body(StatusCode::INTERNAL_SERVER_ERROR, ""),
            json!({ "detail": "HTTP 500" })
        );
        let error = ApiError::status(
            404,
            parse_error_body(StatusCode::NOT_FOUND, r#"{"detail":"Not found."}"#),
        );
        assert_eq!(error.to_string(), "API returned HTTP 404: Not found.");
    }

    #[test]
    fn message_list_bodies_keep_their_text_when_classified() {
        let error = ApiError::status(
            400,
            parse_error_body(
                StatusCode::BAD_REQUEST,
                r#"["Holiday overlaps an existing holiday."]"#,
            ),
        );
        assert_eq!(
            classify(&error.payload()),
            ErrorClass::Generic("Holiday overlaps an existing holiday.".to_string())
        );
    }

    /// Serves `total` single-record pages of one collection.
    struct PagedApi {
        total: u32,
        requested: std::cell::Cell<u32>,
    }

    impl PagedApi {
        fn new(total: u32) -> Self {
            Self {
                total,
                requested: std::cell::Cell::new(0),
            }
        }
    }

    impl ResourceApi for PagedApi {
        async fn list(&self, _kind: ResourceKind, page: u32) -> ApiResult<Page<Record>> {
            self.requested.set(self.requested.get() + 1);
            Ok(Page {
                count: u64::from(self.total),
                next: (page < self.total).then(|| format!("?page={}", page + 1)),
                previous: None,
                results: vec![serde_json::from_value(json!({ "id": page }))?],
            })
        }

        async fn retrieve(&self, _kind: ResourceKind, _id: &str) -> ApiResult<Record> {
            unreachable!("list_all only lists")
        }

        async fn create(
            &self,
            _kind: ResourceKind,
            _payload: &Value,
            _mode: CreateMode,
        ) -> ApiResult<Record> {
            unreachable!("list_all only lists")
        }

        async fn update(&self, _kind: ResourceKind, _id: &str, _payload: &Value) -> ApiResult<Record> {
            unreachable!("list_all only lists")
        }

        async fn reactivate(&self, _kind: ResourceKind, _id: &str) -> ApiResult<Record> {
            unreachable!("list_all only lists")
        }

        async fn delete(&self, _kind: ResourceKind, _id: &str) -> ApiResult<()> {
            unreachable!("list_all only lists")
        }
    }

    #[tokio::test]
    async fn list_all_follows_next_links_to_the_end() {
        let api = PagedApi::new(3);
        let collected = list_all(&api, ResourceKind::Holidays).await.unwrap();

        assert_eq!(collected.records.len(), 3);
        assert!(!collected.truncated);
        assert_eq!(api.requested.get(), 3);
    }

    #[tokio::test]
    async fn list_all_reports_truncation_at_the_page_limit() {
        let api = PagedApi::new(MAX_LIST_ALL_PAGES + 5);
        let collected = list_all(&api, ResourceKind::Students).await.unwrap();

        assert!(collected.truncated);
        assert_eq!(
            collected.records.len(),
            usize::try_from(MAX_LIST_ALL_PAGES).unwrap()
        );
        assert_eq!(api.requested.get(), MAX_LIST_ALL_PAGES);
    }
}
