//! 行タグコンポーネント
//!
//! タグをクリックで編集、×で削除、+で追加。
//! 入力欄はEnterまたは✓で確定、Escまたは×で取り消し。空の確定は何もしない。

use leptos::prelude::*;
use variant_grid_common::{Session, TagTarget};
use crate::app::report;

#[component]
pub fn TagChips(
    session: RwSignal<Session>,
    row: usize,
    tags: Vec<String>,
) -> impl IntoView {
    // 入力中の対象が変わったときだけ入力欄を作り直す
    let editing = Memo::new(move |_| {
        session.with(|s| s.tag_draft().map(|d| d.target).filter(|t| t.row() == row))
    });

    let chips = tags
        .into_iter()
        .enumerate()
        .map(|(tag, text)| {
            let is_editing = move || editing.get() == Some(TagTarget::Existing { row, tag });
            view! {
                <div class="tag d-flex align-items-center" class:editing=is_editing>
                    <span
                        title="Edit tag"
                        on:click=move |_| report(session.try_update(|s| s.begin_edit_tag(row, tag)))
                    >
                        {text}
                    </span>
                    <button
                        class="btn btn-sm btn-link text-danger p-0 ms-1"
                        title="Delete tag"
                        on:click=move |_| report(session.try_update(|s| s.delete_tag(row, tag)))
                    >
                        <i class="bi bi-x"></i>
                    </button>
                </div>
            }
        })
        .collect_view();

    view! {
        <div class="filter-tags d-flex flex-wrap gap-1">
            {chips}
            {move || editing.get().map(|_| view! { <TagInput session=session /> })}
            <Show when=move || editing.get().is_none()>
                <button
                    class="btn btn-sm btn-link text-primary add-tag"
                    title="Add tag"
                    on:click=move |_| report(session.try_update(|s| s.begin_add_tag(row)))
                >
                    <i class="bi bi-plus"></i>
                </button>
            </Show>
        </div>
    }
}

#[component]
fn TagInput(session: RwSignal<Session>) -> impl IntoView {
    let text = move || session.with(|s| s.tag_draft().map(|d| d.text.clone()).unwrap_or_default());
    let confirm = move || report(session.try_update(|s| s.confirm_tag()));
    let cancel = move || session.update(|s| s.cancel_tag());

    view! {
        <div class="tag-input d-flex align-items-center">
            <input
                type="text"
                class="form-control form-control-sm"
                placeholder="Tag name"
                autofocus=true
                prop:value=text
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    session.update(|s| s.set_tag_draft(value));
                }
                on:keydown=move |ev| match ev.key().as_str() {
                    "Enter" => confirm(),
                    "Escape" => cancel(),
                    _ => {}
                }
            />
            <button class="btn btn-sm btn-link text-success p-0 ms-1" title="Save" on:click=move |_| confirm()>
                <i class="bi bi-check"></i>
            </button>
            <button class="btn btn-sm btn-link text-secondary p-0 ms-1" title="Cancel" on:click=move |_| cancel()>
                <i class="bi bi-x"></i>
            </button>
        </div>
    }
}
