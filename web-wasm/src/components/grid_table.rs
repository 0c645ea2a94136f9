//! バリアント表コンポーネント
//!
//! 行はドラッグ&ドロップで並べ替える。構造変更のボタンはビジー中は無効。

use leptos::prelude::*;
use variant_grid_common::{CellPos, Row, Session, StructuralOp};
use crate::app::{report, schedule_completion};
use crate::components::tag_chips::TagChips;

#[component]
pub fn GridTable<F>(
    session: RwSignal<Session>,
    on_structural: F,
) -> impl IntoView
where
    F: Fn(StructuralOp) + 'static + Clone + Send,
{
    let is_busy = move || session.with(|s| s.is_busy());
    let columns = move || {
        session.with(|s| s.grid().columns().iter().cloned().enumerate().collect::<Vec<_>>())
    };
    let rows = move || {
        session.with(|s| s.grid().rows().iter().cloned().enumerate().collect::<Vec<_>>())
    };
    let full_span = move || session.with(|s| (s.grid().column_count() + 2).to_string());

    view! {
        <div class="table-wrapper">
            <table class="table table-bordered table-fixed-left">
                <thead>
                    <tr>
                        <th>"Filter"</th>
                        <For
                            each=columns
                            key=|(index, label)| (*index, label.clone())
                            children={
                                let on_structural = on_structural.clone();
                                move |(index, label)| {
                                    let on_structural = on_structural.clone();
                                    view! {
                                        <th>
                                            {label}" "
                                            <button
                                                class="btn btn-sm btn-link text-danger"
                                                title="Delete variant"
                                                disabled=is_busy
                                                on:click=move |ev| {
                                                    ev.stop_propagation();
                                                    on_structural(StructuralOp::DeleteColumn { index });
                                                }
                                            >
                                                <i class="bi bi-trash"></i>
                                            </button>
                                        </th>
                                    }
                                }
                            }
                        />
                        <th>
                            <button
                                class="btn btn-sm btn-secondary"
                                disabled=is_busy
                                on:click={
                                    let on_structural = on_structural.clone();
                                    move |_| on_structural(StructuralOp::AddColumn)
                                }
                            >
                                <i class="bi bi-plus-square"></i>" Add Variant"
                            </button>
                        </th>
                    </tr>
                </thead>
                <tbody>
                    <For
                        each=rows
                        key=|(index, row)| (*index, row.clone())
                        children={
                            let on_structural = on_structural.clone();
                            move |(index, row)| {
                                let on_structural = on_structural.clone();
                                view! {
                                    <GridRow
                                        session=session
                                        index=index
                                        row=row
                                        on_structural=on_structural
                                    />
                                }
                            }
                        }
                    />
                    <tr>
                        <td colspan=full_span>
                            <div class="add-state-cell d-flex justify-content-center">
                                <button
                                    class="btn btn-primary"
                                    disabled=is_busy
                                    on:click={
                                        let on_structural = on_structural.clone();
                                        move |_| on_structural(StructuralOp::AddRow)
                                    }
                                >
                                    <i class="bi bi-plus-circle"></i>" Add State"
                                </button>
                            </div>
                        </td>
                    </tr>
                </tbody>
            </table>
        </div>
    }
}

#[component]
fn GridRow<F>(
    session: RwSignal<Session>,
    index: usize,
    row: Row,
    on_structural: F,
) -> impl IntoView
where
    F: Fn(StructuralOp) + 'static + Clone + Send,
{
    let (is_drag_over, set_is_drag_over) = signal(false);
    let is_busy = move || session.with(|s| s.is_busy());
    let is_dragging = move || session.with(|s| s.dragging() == Some(index));

    let cells = row
        .cells
        .iter()
        .cloned()
        .enumerate()
        .map(|(column, cell)| view! { <GridCell session=session pos=CellPos::new(index, column) cell=cell /> })
        .collect_view();

    view! {
        <tr
            class="draggable"
            class:dragging=is_dragging
            class:drag-over=move || is_drag_over.get()
            draggable="true"
            on:dragstart=move |ev| {
                // Firefoxはデータが無いとドラッグを開始しない
                if let Some(dt) = ev.data_transfer() {
                    let _ = dt.set_data("text/plain", &index.to_string());
                }
                session.update(|s| s.drag_start(index));
            }
            on:dragover=move |ev| {
                ev.prevent_default();
                set_is_drag_over.set(true);
            }
            on:dragleave=move |_| set_is_drag_over.set(false)
            on:dragend=move |_| {
                set_is_drag_over.set(false);
                session.update(|s| s.drag_end());
            }
            on:drop=move |ev| {
                ev.prevent_default();
                set_is_drag_over.set(false);
                if let Some(requested) = session.try_update(|s| s.drop_on(index)) {
                    if let Some(requested) = requested.transpose() {
                        schedule_completion(session, requested);
                    }
                }
            }
        >
            <td>
                <div class="d-flex align-items-center">
                    <div class="filter-number me-2" style="cursor: move">
                        <i class="bi bi-grip-vertical me-2"></i>
                        {index + 1}
                        <button
                            class="btn btn-sm btn-link text-danger p-0 ms-2"
                            title="Delete state"
                            disabled=is_busy
                            on:click=move |ev| {
                                ev.stop_propagation();
                                on_structural(StructuralOp::DeleteRow { index });
                            }
                        >
                            <i class="bi bi-trash"></i>
                        </button>
                    </div>
                    <div class="filter-content">
                        <div class="state-label">{row.label.clone()}</div>
                        <TagChips session=session row=index tags=row.tags.clone() />
                    </div>
                </div>
            </td>
            {cells}
            // 「Add Variant」列の下
            <td></td>
        </tr>
    }
}

#[component]
fn GridCell(
    session: RwSignal<Session>,
    pos: CellPos,
    cell: Option<String>,
) -> impl IntoView {
    let open_picker = move |_: leptos::ev::MouseEvent| report(session.try_update(|s| s.open_picker(pos)));

    view! {
        <td>
            <div class="variant-cell d-flex align-items-center justify-content-center">
                {match cell {
                    Some(src) => view! {
                        <img
                            src=src
                            alt="Design"
                            title="Change design"
                            style="width: 100px; height: auto; cursor: pointer"
                            on:click=open_picker
                        />
                    }
                    .into_any(),
                    None => view! {
                        <button class="btn add-design-btn btn-sm" on:click=open_picker>
                            <i class="bi bi-plus-lg"></i>" Add Design"
                        </button>
                    }
                    .into_any(),
                }}
            </div>
        </td>
    }
}
