//! ローディング表示・エラーバナー

use leptos::prelude::*;
use variant_grid_common::Session;

#[component]
pub fn StatusBanner(session: RwSignal<Session>) -> impl IntoView {
    let is_busy = move || session.with(|s| s.is_busy());
    let error = move || session.with(|s| s.error().map(str::to_string));

    view! {
        <Show when=is_busy>
            <div class="d-flex justify-content-center my-3">
                <div class="spinner-border text-primary" role="status">
                    <span class="visually-hidden">"Loading..."</span>
                </div>
            </div>
        </Show>

        {move || error().map(|message| view! {
            <div class="alert alert-danger alert-dismissible" role="alert">
                {message}
                <button
                    type="button"
                    class="btn-close"
                    aria-label="Close"
                    on:click=move |_| session.update(|s| s.dismiss_error())
                ></button>
            </div>
        })}
    }
}
