//! ダッシュボードフィルタのlocalStorage永続化
//!
//! フィルタ変更・フォーム送信で保存し、ページロード時に書き戻す。
//! URLクエリにフィルタパラメータがある場合は復元しない（URL優先）。
//! save/restore/clear はテンプレート側からも呼べるようエクスポートする。

use gloo::storage::errors::StorageError;
use gloo::storage::{LocalStorage, Storage};
use gloo::timers::callback::Timeout;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlFormElement, HtmlInputElement, HtmlSelectElement, UrlSearchParams};

use preventive_common::filters::{self, FilterForm, FilterSnapshot};

const STORAGE_KEY: &str = "dashboardFilters";

/// ロードイベント後の再復元までの遅延（描画後の安全弁）
const RE_RESTORE_DELAY_MS: u32 = 100;

/// フィールド名と対応するコントロールのid
const CONTROL_IDS: [(&str, &str); 9] = [
    ("month", "month-filter"),
    ("year", "year-filter"),
    ("pic", "pic-filter"),
    ("line", "line-filter"),
    ("mesin", "mesin-filter"),
    ("sub_mesin", "sub-mesin-filter"),
    ("sort", "sort-filter"),
    ("order", "order-filter"),
    ("page_size", "page-size-filter"),
];

fn control_id(field: &str) -> Option<&'static str> {
    CONTROL_IDS
        .iter()
        .find(|(name, _)| *name == field)
        .map(|(_, id)| *id)
}

/// ドキュメント上のフィルタコントロールへの読み書き
struct DomFilterForm {
    document: Document,
}

impl DomFilterForm {
    fn new() -> Option<Self> {
        Some(Self {
            document: web_sys::window()?.document()?,
        })
    }

    fn element(&self, field: &str) -> Option<web_sys::Element> {
        self.document.get_element_by_id(control_id(field)?)
    }
}

impl FilterForm for DomFilterForm {
    fn read(&self, field: &str) -> Option<String> {
        let element = self.element(field)?;
        if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
            Some(input.value())
        } else if let Some(select) = element.dyn_ref::<HtmlSelectElement>() {
            Some(select.value())
        } else {
            None
        }
    }

    fn write(&mut self, field: &str, value: &str) {
        let Some(element) = self.element(field) else {
            return;
        };
        if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
            input.set_value(value);
        } else if let Some(select) = element.dyn_ref::<HtmlSelectElement>() {
            select.set_value(value);
        }
    }
}

/// 現在のフィルタをlocalStorageへ保存する
#[wasm_bindgen]
pub fn save_filters() {
    let Some(form) = DomFilterForm::new() else {
        return;
    };
    let timestamp = js_sys::Date::new_0()
        .to_iso_string()
        .as_string()
        .unwrap_or_default();
    let snapshot = filters::snapshot_from(&form, timestamp);
    if let Err(e) = LocalStorage::set(STORAGE_KEY, &snapshot) {
        web_sys::console::error_1(&format!("Error saving filters: {}", e).into());
    }
}

/// 保存済みフィルタをフォームへ書き戻す
///
/// URLに認識済みフィルタパラメータがあるときは何もしない
#[wasm_bindgen]
pub fn restore_filters() {
    let Some(window) = web_sys::window() else {
        return;
    };
    let search = window.location().search().unwrap_or_default();
    if url_has_filter_params(&search) {
        return;
    }
    let Some(snapshot) = saved_snapshot() else {
        return;
    };
    let Some(mut form) = DomFilterForm::new() else {
        return;
    };
    filters::restore_into(&snapshot, &mut form);
}

/// 保存済みフィルタを消してフォームを初期状態へ戻す
#[wasm_bindgen]
pub fn clear_filters() {
    LocalStorage::delete(STORAGE_KEY);

    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(document) = window.document() else {
        return;
    };

    match dashboard_form(&document) {
        Some(form) => {
            if let Ok(selects) = form.query_selector_all("select") {
                for i in 0..selects.length() {
                    if let Some(select) = selects
                        .item(i)
                        .and_then(|node| node.dyn_into::<HtmlSelectElement>().ok())
                    {
                        select.set_value("0");
                    }
                }
            }
            if let Ok(dates) = form.query_selector_all("input[type=\"date\"]") {
                for i in 0..dates.length() {
                    if let Some(input) = dates
                        .item(i)
                        .and_then(|node| node.dyn_into::<HtmlInputElement>().ok())
                    {
                        input.set_value("");
                    }
                }
            }
            // フィルタなしで再読込させる
            let _ = form.submit();
        }
        None => {
            let pathname = window
                .location()
                .pathname()
                .unwrap_or_else(|_| "/".to_string());
            let _ = window.location().set_href(&pathname);
        }
    }
}

/// ページロード時の配線
///
/// ダッシュボードならちらつき防止のため即時復元し、
/// loadイベント後にもう一度だけ復元し直す。
/// 自動保存の配線はフォームが存在しないと張れないため、
/// ドキュメントのパース完了を待ってから行う
pub(crate) fn init() {
    let Some(window) = web_sys::window() else {
        return;
    };
    let pathname = window
        .location()
        .pathname()
        .unwrap_or_default();

    if is_dashboard_path(&pathname) {
        restore_filters();
        schedule_re_restore(&window);
    }

    run_after_parse(&window, setup_auto_save);
}

/// パース完了後に`f`を実行する（完了済みなら即時）
fn run_after_parse(window: &web_sys::Window, f: fn()) {
    let Some(document) = window.document() else {
        return;
    };
    if document.ready_state() != "loading" {
        f();
        return;
    }
    let on_ready = Closure::wrap(Box::new(move |_: web_sys::Event| f()) as Box<dyn FnMut(_)>);
    let _ = document
        .add_event_listener_with_callback("DOMContentLoaded", on_ready.as_ref().unchecked_ref());
    on_ready.forget();
}

/// select変更とフォーム送信で自動保存する
///
/// ダッシュボードフォームがまだDOMにない場合は何もしないので、
/// フォーム差し替え後にテンプレート側から呼び直してもよい
#[wasm_bindgen]
pub fn setup_auto_save() {
    let Some(document) = web_sys::window().and_then(|window| window.document()) else {
        return;
    };
    let Some(form) = dashboard_form(&document) else {
        return;
    };
    let Ok(selects) = form.query_selector_all("select") else {
        return;
    };

    let on_change = Closure::wrap(Box::new(move |_: web_sys::Event| {
        save_filters();
    }) as Box<dyn FnMut(_)>);

    for i in 0..selects.length() {
        if let Some(select) = selects.item(i) {
            let _ = select
                .add_event_listener_with_callback("change", on_change.as_ref().unchecked_ref());
        }
    }
    let _ = form.add_event_listener_with_callback("submit", on_change.as_ref().unchecked_ref());
    on_change.forget();
}

fn schedule_re_restore(window: &web_sys::Window) {
    let ready = window
        .document()
        .map(|document| document.ready_state() == "complete")
        .unwrap_or(false);

    if ready {
        Timeout::new(RE_RESTORE_DELAY_MS, restore_filters).forget();
        return;
    }

    let on_load = Closure::wrap(Box::new(move |_: web_sys::Event| {
        Timeout::new(RE_RESTORE_DELAY_MS, restore_filters).forget();
    }) as Box<dyn FnMut(_)>);
    let _ = window.add_event_listener_with_callback("load", on_load.as_ref().unchecked_ref());
    on_load.forget();
}

fn saved_snapshot() -> Option<FilterSnapshot> {
    match LocalStorage::get(STORAGE_KEY) {
        Ok(snapshot) => Some(snapshot),
        Err(StorageError::KeyNotFound(_)) => None,
        Err(e) => {
            // 壊れた保存データは「保存なし」として扱う
            web_sys::console::error_1(&format!("Error parsing saved filters: {}", e).into());
            None
        }
    }
}

fn dashboard_form(document: &Document) -> Option<HtmlFormElement> {
    document
        .query_selector("form[action*=\"dashboard\"]")
        .ok()
        .flatten()?
        .dyn_into()
        .ok()
}

fn url_has_filter_params(search: &str) -> bool {
    let Ok(params) = UrlSearchParams::new_with_str(search) else {
        return false;
    };
    let mut keys = Vec::new();
    if let Ok(Some(iter)) = js_sys::try_iter(&params.keys()) {
        for key in iter.flatten() {
            if let Some(key) = key.as_string() {
                keys.push(key);
            }
        }
    }
    filters::url_overrides_saved(keys)
}

fn is_dashboard_path(pathname: &str) -> bool {
    let path = pathname.to_lowercase();
    path.contains("/dashboard") || (path.contains("/core/") && path.ends_with('/'))
}
