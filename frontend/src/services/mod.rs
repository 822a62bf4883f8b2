//! Backend and browser services.
//!
//! # Services
//!
//! - [`upload`] - Workbook upload to the ctmail backend
//! - [`clipboard`] - Copying the generated email
//!
//! # JavaScript Bindings
//!
//! `clipboard` uses `src/js/clipboard.js` for the async clipboard API.

pub mod clipboard;
pub mod upload;

pub use clipboard::*;
pub use upload::*;
