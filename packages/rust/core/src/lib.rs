//! Core OKR transformation pipeline for OKR Copilot.
//!
//! Free text goes in, a structured draft comes out:
//! [`classifier`] picks a theme, [`objective`] a canned objective sentence,
//! [`key_results`] three or four templated metrics, [`confidence`] a coarse
//! quality label, and [`baseline`] flags key results missing a current value.
//! [`edit`] and [`approval`] act on a draft afterwards.

pub mod approval;
pub mod baseline;
pub mod classifier;
pub mod confidence;
pub mod edit;
pub mod key_results;
pub mod objective;
pub mod pipeline;

pub use approval::approve;
pub use key_results::{FixedCount, KeyResultCount, RandomCount};
pub use pipeline::OkrPipeline;
