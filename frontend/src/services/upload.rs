//! HTTP service: upload a workbook to the backend for normalization.

use gloo_net::http::Request;
use web_sys::{File, FormData};

use crate::config::{MAX_FILE_SIZE, PARSE_ENDPOINT};
use crate::types::{AppError, AppResult, ErrorResponse, ParseResponse};

/// Shown when the server gives no usable reason.
pub const UPLOAD_FAILURE_FALLBACK: &str = "Failed to process file";

/// Shown when the picked file is not a spreadsheet.
pub const NOT_EXCEL_MESSAGE: &str = "Please upload an Excel file (.xlsx or .xls)";

/// `.xlsx` or `.xls`, any case.
pub fn is_excel_file_name(name: &str) -> bool {
    let lower = name.to_lowercase();
    lower.ends_with(".xlsx") || lower.ends_with(".xls")
}

/// Check a file before sending it.
pub fn validate_upload(name: &str, size: f64) -> AppResult<()> {
    if !is_excel_file_name(name) {
        return Err(AppError::Validation(NOT_EXCEL_MESSAGE.to_string()));
    }
    if size > MAX_FILE_SIZE as f64 {
        return Err(AppError::Validation(format!(
            "File is too large (max {} MB)",
            MAX_FILE_SIZE / (1024 * 1024)
        )));
    }
    Ok(())
}

/// The `message` of an error body, or the generic fallback.
pub fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorResponse>(body)
        .ok()
        .map(|e| e.message)
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| UPLOAD_FAILURE_FALLBACK.to_string())
}

/// Upload a workbook and get back `{config, studies, stats}`.
pub async fn upload_workbook(file: File, backend_url: &str) -> AppResult<ParseResponse> {
    validate_upload(&file.name(), file.size())?;

    let form_data = FormData::new()
        .map_err(|e| AppError::Network(format!("Failed to create FormData: {:?}", e)))?;
    form_data
        .append_with_blob_and_filename("file", &file, &file.name())
        .map_err(|e| AppError::Network(format!("Failed to append file: {:?}", e)))?;

    let url = format!("{}{}", backend_url, PARSE_ENDPOINT);
    let request = Request::post(&url)
        .body(form_data)
        .map_err(|e| AppError::Network(format!("Failed to build request: {}", e)))?;

    let response = request
        .send()
        .await
        .map_err(|e| AppError::Network(format!("HTTP request failed: {}", e)))?;

    if !response.ok() {
        let body = response.text().await.unwrap_or_default();
        log::warn!("Upload rejected ({}): {}", response.status(), body);
        return Err(AppError::Upload(error_message(&body)));
    }

    response
        .json::<ParseResponse>()
        .await
        .map_err(|e| AppError::Upload(format!("Failed to parse response: {}", e)))
}
