//! Clipboard access for the generated email.
//!
//! "Copy Email" puts rich HTML plus a plain-text alternative on the
//! clipboard, falling back to copying a DOM selection when the browser has
//! no `ClipboardItem`. "Copy HTML" copies the raw markup.

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

use crate::types::{AppError, AppResult};

/// How the rich copy ended up on the clipboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyMode {
    /// HTML and plain text through the async clipboard API
    Rich,
    /// Selection of the rendered element
    Selection,
}

impl CopyMode {
    fn from_js(value: &JsValue) -> Self {
        match value.as_string().as_deref() {
            Some("rich") => CopyMode::Rich,
            _ => CopyMode::Selection,
        }
    }
}

/// Copy the rendered contents of an element as rich HTML.
pub async fn copy_rich_html(element_id: &str) -> AppResult<CopyMode> {
    let result = JsFuture::from(js_copy_rich_html(element_id))
        .await
        .map_err(|e| AppError::Clipboard(format!("{:?}", e)))?;
    Ok(CopyMode::from_js(&result))
}

/// Copy markup as plain text.
pub async fn copy_text(text: &str) -> AppResult<()> {
    JsFuture::from(js_copy_text(text))
        .await
        .map(|_| ())
        .map_err(|e| AppError::Clipboard(format!("{:?}", e)))
}

#[wasm_bindgen(module = "/src/js/clipboard.js")]
extern "C" {
    #[wasm_bindgen(js_name = "copyRichHtml")]
    fn js_copy_rich_html(element_id: &str) -> js_sys::Promise;

    #[wasm_bindgen(js_name = "copyText")]
    fn js_copy_text(text: &str) -> js_sys::Promise;
}
