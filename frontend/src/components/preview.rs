//! Email preview with copy buttons.

use gloo_timers::future::TimeoutFuture;
use leptos::*;

use crate::components::push_log;
use crate::services::{copy_rich_html, copy_text, CopyMode};
use crate::{LogEntry, LogLevel, COPY_FEEDBACK_MS};

/// DOM id of the rendered email, read by the rich copy.
pub const EMAIL_PREVIEW_ID: &str = "emailPreview";

#[component]
pub fn PreviewSection(
    email_html: Memo<String>,
    set_logs: WriteSignal<Vec<LogEntry>>,
) -> impl IntoView {
    let (copied, set_copied) = create_signal(false);

    let show_feedback = move || {
        set_copied.set(true);
        spawn_local(async move {
            TimeoutFuture::new(COPY_FEEDBACK_MS).await;
            set_copied.set(false);
        });
    };

    let on_copy_email = move |_| {
        spawn_local(async move {
            match copy_rich_html(EMAIL_PREVIEW_ID).await {
                Ok(CopyMode::Rich) => {
                    log::info!("📋 Email copied as rich HTML");
                    show_feedback();
                }
                Ok(CopyMode::Selection) => {
                    log::info!("📋 Email copied from selection");
                    show_feedback();
                }
                Err(e) => push_log(set_logs, LogLevel::Error, format!("❌ {}", e)),
            }
        });
    };

    let on_copy_html = move |_| {
        let html = email_html.get_untracked();
        spawn_local(async move {
            match copy_text(&html).await {
                Ok(()) => {
                    log::info!("📋 HTML source copied ({} chars)", html.len());
                    show_feedback();
                }
                Err(e) => push_log(set_logs, LogLevel::Error, format!("❌ {}", e)),
            }
        });
    };

    view! {
        <div class="preview-section show" id="outputContainer">
            <div class="preview-header">
                <div class="preview-title">"📧 Email Preview"</div>
                <div class="preview-actions">
                    <button class="btn btn-primary" id="copyBtn" on:click=on_copy_email>
                        "Copy Email"
                    </button>
                    <button class="btn btn-secondary" id="copyHtmlBtn" on:click=on_copy_html>
                        "Copy HTML"
                    </button>
                </div>
            </div>

            <Show
                when=move || copied.get()
                fallback=|| view! { }
            >
                <div class="copy-feedback" id="copyFeedback">"Copied!"</div>
            </Show>

            {move || {
                let html = email_html.get();
                view! { <div class="email-preview" id=EMAIL_PREVIEW_ID inner_html=html></div> }
            }}
        </div>
    }
}
