//! Preventive Maintenance Web UI (Leptos + WASM)

mod api;
mod app;
mod components;
mod cookie;
mod filters;

use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::app::App;
pub use crate::filters::{clear_filters, restore_filters, save_filters, setup_auto_save};

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();

    // フィルタ永続化はどのページでも配線する（ダッシュボード判定は内部で行う）
    filters::init();

    mount_checklist_app();
}

/// チェックリストアプリをマウントする
///
/// マウントポイントは実行詳細ページだけにあり、
/// ないページ（ダッシュボードなど）では何もしない
fn mount_checklist_app() {
    let Some(document) = web_sys::window().and_then(|window| window.document()) else {
        return;
    };

    let Some(mount) = document.get_element_by_id("checklistApp") else {
        web_sys::console::log_1(&"Checklist mount point not found".into());
        return;
    };

    // 実行IDはテンプレートが埋め込むhidden inputから取る
    let execution_id = document
        .get_element_by_id("executionId")
        .and_then(|element| element.dyn_into::<web_sys::HtmlInputElement>().ok())
        .map(|input| input.value())
        .unwrap_or_default();

    if execution_id.is_empty() {
        web_sys::console::error_1(&"Missing execution ID".into());
        return;
    }

    let Ok(mount) = mount.dyn_into::<web_sys::HtmlElement>() else {
        return;
    };

    leptos::mount::mount_to(mount, move || {
        view! { <App execution_id=execution_id /> }
    })
    .forget();
}
