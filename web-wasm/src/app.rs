//! メインアプリケーションコンポーネント

use gloo::timers::callback::Timeout;
use leptos::prelude::*;
use crate::components::{
    header::Header,
    grid_table::GridTable,
    image_picker::ImagePicker,
    status_banner::StatusBanner,
};
use variant_grid_common::{Completion, Result, Session, StructuralOp, Ticket, BUSY_WINDOW_MS};

/// メインアプリケーションコンポーネント
#[component]
pub fn App() -> impl IntoView {
    view! {
        <div class="container-fluid mt-4">
            <Header />
            <VariantGrid />
        </div>
    }
}

/// 構造変更の受付結果を処理する
///
/// 受け付けた場合はビジー時間の後に完了させる。
/// コンポーネント破棄後はシグナルが無効になり、完了処理は何もしない。
pub fn schedule_completion(session: RwSignal<Session>, requested: Result<Ticket>) {
    match requested {
        Ok(ticket) => {
            Timeout::new(BUSY_WINDOW_MS, move || {
                if let Some(Completion::Failed(op)) = session.try_update(|s| s.complete(ticket)) {
                    web_sys::console::error_1(&op.failure_message().into());
                }
            })
            .forget();
        }
        Err(err) => web_sys::console::warn_1(&format!("request rejected: {}", err).into()),
    }
}

/// 同期操作（タグ・ピッカー）の失敗をコンソールに出す
pub fn report<T>(result: Option<Result<T>>) {
    if let Some(Err(err)) = result {
        web_sys::console::warn_1(&err.to_string().into());
    }
}

/// バリアント表
///
/// セッション全体を1つのシグナルで持つ。
#[component]
pub fn VariantGrid() -> impl IntoView {
    let session = RwSignal::new(Session::default());

    // 構造変更ハンドラ
    let on_structural = move |op: StructuralOp| {
        if let Some(requested) = session.try_update(|s| s.request(op)) {
            schedule_completion(session, requested);
        }
    };

    view! {
        <StatusBanner session=session />
        <GridTable session=session on_structural=on_structural />
        <ImagePicker session=session />
    }
}
