//! Explicit request context: who is calling, for which organization.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::models::ResourceKind;

/// Dashboard role of the signed-in user
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Admin,
    Teacher,
    Parent,
}

impl Role {
    /// Resource families shown on this role's dashboard
    pub fn visible_resources(self) -> &'static [ResourceKind] {
        const TEACHER: [ResourceKind; 5] = [
            ResourceKind::Classes,
            ResourceKind::Students,
            ResourceKind::Subjects,
            ResourceKind::LeaveAllocations,
            ResourceKind::Holidays,
        ];
        const PARENT: [ResourceKind; 2] = [ResourceKind::Students, ResourceKind::Holidays];

        match self {
            Self::Admin => &ResourceKind::ALL,
            Self::Teacher => &TEACHER,
            Self::Parent => &PARENT,
        }
    }

    /// Only administrators create, reactivate, or delete records.
    pub const fn can_manage(self) -> bool {
        matches!(self, Self::Admin)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Teacher => "teacher",
            Self::Parent => "parent",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "teacher" => Ok(Self::Teacher),
            "parent" => Ok(Self::Parent),
            other => Err(Error::InvalidInput(format!("unknown role '{other}'"))),
        }
    }
}

/// Caller identity passed to every API request.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ClientContext {
    pub access_token: Option<String>,
    pub organization_id: Option<String>,
    pub role: Role,
}

impl ClientContext {
    pub const fn is_authenticated(&self) -> bool {
        self.access_token.is_some()
    }
}

impl fmt::Debug for ClientContext {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("ClientContext")
            .field(
                "access_token",
                &self.access_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("organization_id", &self.organization_id)
            .field("role", &self.role)
            .finish()
    }
}
