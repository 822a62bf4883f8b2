//! Clinical Trials Email Generator - Frontend Rust/Leptos Application
//!
//! A WebAssembly frontend that uploads a clinical trials workbook to the
//! backend and turns the normalized studies into a brand-grouped email.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        App                                   │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Header (loaded workbook)                                    │
//! ├─────────────────────────────────────────────────────────────┤
//! │  MainContent                                                 │
//! │  ├── Hero (title, description)                              │
//! │  ├── UploadSection                                          │
//! │  ├── StatsPanel + PreviewSection (when a report is loaded)  │
//! │  └── LogsPanel (when logs exist)                            │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Footer                                                      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`types`] - Common types (Study, Stats, LogEntry, etc.)
//! - [`render`] - Email HTML generation
//! - [`components`] - UI components (Upload, Stats, Preview, etc.)
//! - [`services`] - Backend upload and clipboard access

use leptos::*;
use leptos_meta::*;
use leptos_router::*;

// =============================================================================
// Module declarations
// =============================================================================

pub mod config;
pub mod types;
pub mod render;
pub mod components;
pub mod services;

// =============================================================================
// Re-exports
// =============================================================================

// Configuration
pub use config::*;

// Types
pub use types::{
    // Report
    ParseResponse, ReportConfig, Stats, Study, ErrorResponse,
    // Logs
    LogEntry, LogLevel,
    // Errors
    AppError, AppResult,
};

// Rendering
pub use render::{generate_email_html, ReportSettings};

// Components
pub use components::*;

// Services
pub use services::*;

// =============================================================================
// Application
// =============================================================================

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text="Clinical Trials Email Generator"/>
        <Router>
            <main>
                <Routes>
                    <Route path="/" view=MainContent/>
                </Routes>
            </main>
        </Router>
    }
}

#[component]
fn MainContent() -> impl IntoView {
    let (report, set_report) = create_signal(None::<ParseResponse>);
    let (file_name, set_file_name) = create_signal(None::<String>);
    let (logs, set_logs) = create_signal(Vec::<LogEntry>::new());

    // Initialize SSE connection ONCE at app startup
    init_sse_logs(set_logs);

    let email_html = create_memo(move |_| {
        report.with(|r| {
            r.as_ref()
                .map(|r| generate_email_html(&r.config, &r.studies))
                .unwrap_or_default()
        })
    });

    let stats = Signal::derive(move || {
        report.with(|r| r.as_ref().map(|r| r.stats).unwrap_or_default())
    });

    view! {
        <Header file_name=file_name/>

        <div class="container">
            <Hero/>

            <UploadSection
                set_report=set_report
                set_file_name=set_file_name
                set_logs=set_logs
            />

            // Output (appears after a successful upload)
            <Show
                when=move || report.with(Option::is_some)
                fallback=|| view! { }
            >
                <StatsPanel stats=stats/>
                <PreviewSection email_html=email_html set_logs=set_logs/>
            </Show>

            <Show
                when=move || !logs.with(Vec::is_empty)
                fallback=|| view! { }
            >
                <LogsPanel logs=logs set_logs=set_logs/>
            </Show>
        </div>

        <Footer/>
    }
}
