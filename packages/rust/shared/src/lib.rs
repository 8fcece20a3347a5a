//! Shared types, error model, and configuration for OKR Copilot.
//!
//! This crate is the foundation depended on by all other OKR Copilot crates.
//! It provides:
//! - [`OkrError`] — the unified error type
//! - Domain types ([`OkrDraft`], [`BaselineGap`], [`PublishedOkr`], [`Theme`])
//! - Configuration ([`AppConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, PORT_ENV_VAR, ServerConfig, StorageConfig, config_dir, config_file_path,
    init_config, load_config, load_config_from,
};
pub use error::{OkrError, Result, require_text};
pub use types::{BaselineGap, Confidence, OkrContent, OkrDraft, OkrId, PublishedOkr, Theme};
