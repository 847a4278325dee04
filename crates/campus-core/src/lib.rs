//! campus-core - Core library for Campus
//!
//! Resource models, the REST client, error classification, and the
//! deleted-duplicate resolution flow shared by the CLI and desktop app.

pub mod api;
pub mod cache;
pub mod config;
pub mod conflict;
pub mod error;
pub mod forms;
pub mod models;
pub mod notify;
pub mod resolution;
pub mod session;
pub mod util;

pub use error::{Error, Result};
pub use models::{Record, ResourceKind};
