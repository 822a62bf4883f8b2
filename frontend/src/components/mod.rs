//! UI Components for the email generator.
//!
//! # Layout Components
//! - [`Header`] - Top bar with the loaded workbook name
//! - [`Hero`] - Main title and description
//! - [`Footer`] - Page footer
//!
//! # Feature Components
//! - [`UploadSection`] - Workbook upload with drag & drop
//! - [`StatsPanel`] - Study counts for the upload
//! - [`PreviewSection`] - Rendered email with copy buttons
//! - [`LogsPanel`] - Real-time processing logs (SSE)

mod footer;
mod header;
mod hero;
mod logs;
mod preview;
mod stats;
mod upload;

pub use footer::*;
pub use header::*;
pub use hero::*;
pub use logs::*;
pub use preview::*;
pub use stats::*;
pub use upload::*;
