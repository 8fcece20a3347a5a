//! Axum-based HTTP API over the shared OKR pipeline.
//!
//! Every route delegates to [`okrcopilot_core`]; this crate only handles
//! transport concerns:
//! - JSON request/response shapes (camelCase, as the web client expects)
//! - Error mapping: validation → 400, stale gap → 409, anything else → 500
//! - Request body size limit (64KB) and timeout (30s)
//! - The cosmetic processing delay before a process response

mod error;
mod handlers;
mod server;

pub use server::{build_app, run_server, run_server_with_listener};

use std::sync::Arc;
use std::time::Duration;

use okrcopilot_core::OkrPipeline;
use okrcopilot_shared::OkrDraft;
use okrcopilot_storage::PublishedStore;
use serde::{Deserialize, Serialize};

/// Maximum request body size (64KB)
pub const MAX_BODY_SIZE: usize = 65_536;
/// Request timeout (30s)
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Shared state for all axum handlers
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<OkrPipeline>,
    pub store: Arc<dyn PublishedStore>,
    /// Wait applied before answering `/api/process-okr`.
    pub processing_delay: Duration,
}

impl AppState {
    pub fn new(
        pipeline: Arc<OkrPipeline>,
        store: Arc<dyn PublishedStore>,
        processing_delay: Duration,
    ) -> Self {
        Self {
            pipeline,
            store,
            processing_delay,
        }
    }
}

/// `POST /api/process-okr` body
#[derive(Debug, Deserialize, Serialize)]
pub struct ProcessBody {
    /// Missing is treated like blank so both get the same 400.
    #[serde(default)]
    pub input: String,
}

/// `POST /api/resolve-baseline` body
#[derive(Debug, Deserialize, Serialize)]
pub struct ResolveBaselineBody {
    pub draft: OkrDraft,
    /// Key-result index of the gap being answered.
    pub index: usize,
    #[serde(default)]
    pub value: String,
}

/// `POST /api/apply-edit` body
#[derive(Debug, Deserialize, Serialize)]
pub struct ApplyEditBody {
    pub draft: OkrDraft,
    #[serde(default)]
    pub instruction: String,
}
