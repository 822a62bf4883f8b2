//! Hero section component

use leptos::*;

#[component]
pub fn Hero() -> impl IntoView {
    view! {
        <div class="hero">
            <h1>"Clinical Trials Email Generator"</h1>
            <p class="subtitle">
                "Upload the monthly ClinicalTrials.gov workbook. "
                "Studies are grouped by brand into an email ready to paste."
            </p>
        </div>
    }
}
