//! 画像ピッカー（モーダル）

use leptos::prelude::*;
use variant_grid_common::{CatalogEntry, Session};

#[component]
pub fn ImagePicker(session: RwSignal<Session>) -> impl IntoView {
    let is_open = move || session.with(|s| s.picker().is_open());
    let close = move || session.update(|s| s.close_picker());
    let query = move || session.with(|s| s.picker().query().to_string());
    let entries = move || {
        session.with(|s| s.filtered_catalog().into_iter().cloned().collect::<Vec<CatalogEntry>>())
    };
    let is_empty = move || session.with(|s| s.filtered_catalog().is_empty());

    view! {
        <Show when=is_open>
            <div class="modal-backdrop fade show"></div>
            <div class="modal d-block" tabindex="-1" role="dialog" on:click=move |_| close()>
                <div class="modal-dialog modal-lg" on:click=|ev| ev.stop_propagation()>
                    <div class="modal-content">
                        <div class="modal-header">
                            <h5 class="modal-title">"Select a Design to Link"</h5>
                            <button
                                type="button"
                                class="btn-close"
                                aria-label="Close"
                                on:click=move |_| close()
                            ></button>
                        </div>
                        <div class="modal-body">
                            <input
                                type="text"
                                class="form-control mb-3"
                                placeholder="Search designs"
                                prop:value=query
                                on:input=move |ev| {
                                    let value = event_target_value(&ev);
                                    session.update(|s| s.set_query(value));
                                }
                            />
                            <div class="image-grid d-grid gap-3">
                                <For
                                    each=entries
                                    key=|entry| entry.src.clone()
                                    children=move |entry: CatalogEntry| {
                                        let src = entry.src.clone();
                                        view! {
                                            <div class="image-item position-relative">
                                                <img src=entry.src.clone() alt=entry.name.clone() class="img-fluid" />
                                                <p class="image-name text-center">{entry.name.clone()}</p>
                                                <button
                                                    class="btn btn-primary btn-sm insert-btn position-absolute top-50 start-50 translate-middle"
                                                    on:click=move |_| {
                                                        session.update(|s| {
                                                            s.assign_image(src.clone());
                                                        });
                                                    }
                                                >
                                                    "Insert"
                                                </button>
                                            </div>
                                        }
                                    }
                                />
                            </div>
                            <Show when=is_empty>
                                <p>"No images found."</p>
                            </Show>
                        </div>
                    </div>
                </div>
            </div>
        </Show>
    }
}
