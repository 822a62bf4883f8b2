use leptos::*;

use crate::BACKEND_URL;

#[component]
pub fn Header(file_name: ReadSignal<Option<String>>) -> impl IntoView {
    view! {
        <header>
            <div class="header-left">
                <a href="#" class="logo">"CT EMAIL"</a>
                <span class="badge">
                    {move || file_name.get().unwrap_or_else(|| "No workbook".to_string())}
                </span>
            </div>
            <div class="header-right">
                <span class="backend-status" title="Backend">{BACKEND_URL}</span>
            </div>
        </header>
    }
}
