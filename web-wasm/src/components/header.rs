//! ヘッダーコンポーネント

use leptos::prelude::*;

#[component]
pub fn Header() -> impl IntoView {
    view! {
        <header class="header">
            <h1>"Product Passport Studio"</h1>
            <p class="text-muted">"Describe a product, preview its digital passport, and pin it to the wall."</p>
        </header>
    }
}
