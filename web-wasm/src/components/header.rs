//! ヘッダーコンポーネント

use leptos::prelude::*;

#[component]
pub fn Header() -> impl IntoView {
    view! {
        <header class="header d-flex align-items-center">
            <img src="logo.jpg" alt="Logo" class="mb-4 logo" />
            <h1 class="mb-4 ms-3">"Product Variant Table"</h1>
        </header>
    }
}
