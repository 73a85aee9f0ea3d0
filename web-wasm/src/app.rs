//! メインアプリケーションコンポーネント

use leptos::prelude::*;

use crate::components::checklist_modal::ChecklistModal;

/// チェックリストモーダルの入口
///
/// 開くたびにサーバから項目と既存結果を取り直す
#[component]
pub fn App(execution_id: String) -> impl IntoView {
    let (is_open, set_is_open) = signal(false);

    view! {
        <button class="btn btn-primary" on:click=move |_| set_is_open.set(true)>
            "Isi Checklist"
        </button>

        <ChecklistModal execution_id=execution_id is_open=is_open set_is_open=set_is_open />
    }
}
