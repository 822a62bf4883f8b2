//! Footer component

use leptos::*;

#[component]
pub fn Footer() -> impl IntoView {
    view! {
        <footer>
            <div>"Clinical Trials Email Generator • Powered by " <span class="rust-badge">"🦀 Rust + Leptos"</span></div>
            <div class="footer-links">
                <a href="https://clinicaltrials.gov" class="footer-link" target="_blank">
                    "ClinicalTrials.gov"
                </a>
            </div>
        </footer>
    }
}
