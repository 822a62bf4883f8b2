//! Workbook upload component with drag & drop support.
//!
//! Checks the file, sends it to the backend and hands the parsed report
//! to the rest of the page.

use leptos::*;
use web_sys::{DragEvent, Event, File, HtmlInputElement};

use crate::components::push_log;
use crate::services::{upload_workbook, validate_upload};
use crate::{LogEntry, LogLevel, ParseResponse, BACKEND_URL};

#[component]
pub fn UploadSection(
    set_report: WriteSignal<Option<ParseResponse>>,
    set_file_name: WriteSignal<Option<String>>,
    set_logs: WriteSignal<Vec<LogEntry>>,
) -> impl IntoView {
    let (is_uploading, set_is_uploading) = create_signal(false);
    let (is_dragover, set_is_dragover) = create_signal(false);
    let (selected, set_selected) = create_signal(None::<String>);
    let (error, set_error) = create_signal(None::<String>);
    let file_input = create_node_ref::<leptos::html::Input>();

    let process_file = move |file: File| {
        let name = file.name();

        if let Err(e) = validate_upload(&name, file.size()) {
            push_log(set_logs, LogLevel::Error, e.to_string());
            set_error.set(Some(e.message().to_string()));
            return;
        }

        set_selected.set(Some(name.clone()));
        set_error.set(None);
        set_report.set(None);

        spawn_local(async move {
            set_is_uploading.set(true);
            push_log(set_logs, LogLevel::Info, format!("📤 Uploading {}...", name));

            match upload_workbook(file, BACKEND_URL).await {
                Ok(report) => {
                    push_log(
                        set_logs,
                        LogLevel::Success,
                        format!(
                            "✅ {} studies across {} brands",
                            report.stats.total_studies, report.stats.brand_count
                        ),
                    );
                    set_file_name.set(Some(name));
                    set_report.set(Some(report));
                }
                Err(e) => {
                    push_log(set_logs, LogLevel::Error, format!("❌ {}", e));
                    set_error.set(Some(e.message().to_string()));
                }
            }

            set_is_uploading.set(false);
        });
    };

    let on_file_change = move |ev: Event| {
        let input: HtmlInputElement = event_target(&ev);
        if let Some(file) = input.files().and_then(|files| files.get(0)) {
            process_file(file);
        }
        // Picking the same file again still fires a change
        input.set_value("");
    };

    let on_drop = move |ev: DragEvent| {
        ev.prevent_default();
        set_is_dragover.set(false);
        if let Some(file) = ev
            .data_transfer()
            .and_then(|dt| dt.files())
            .and_then(|files| files.get(0))
        {
            process_file(file);
        }
    };

    let on_dragover = move |ev: DragEvent| {
        ev.prevent_default();
        set_is_dragover.set(true);
    };

    let trigger_file_input = move |_| {
        if let Some(input) = file_input.get() {
            input.click();
        }
    };

    view! {
        <div
            class="upload-section"
            class:dragover=move || is_dragover.get()
            id="uploadZone"
            on:click=trigger_file_input
            on:dragover=on_dragover
            on:dragleave=move |_| set_is_dragover.set(false)
            on:drop=on_drop
        >
            <div class="upload-icon">"📊"</div>
            <div class="upload-text">
                {move || if is_uploading.get() {
                    "⏳ Processing workbook..."
                } else {
                    "Drop the clinical trials workbook here"
                }}
            </div>

            <Show
                when=move || !is_uploading.get()
                fallback=|| view! { }
            >
                <div class="upload-hint">"or click to select (.xlsx or .xls)"</div>
                <span class="upload-button">"Choose a workbook"</span>
            </Show>

            <Show
                when=move || selected.get().is_some()
                fallback=|| view! { }
            >
                <div class="file-info">
                    "Selected: " {move || selected.get().unwrap_or_default()}
                </div>
            </Show>

            <Show
                when=move || error.get().is_some()
                fallback=|| view! { }
            >
                <div class="error-message">
                    {move || error.get().unwrap_or_default()}
                </div>
            </Show>
        </div>

        <input
            type="file"
            id="fileInput"
            accept=".xlsx,.xls"
            style="display:none"
            node_ref=file_input
            on:change=on_file_change
        />
    }
}
