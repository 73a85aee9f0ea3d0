pub mod checklist;

pub use checklist::{fetch_checklist, save_checklist};

use wasm_bindgen::JsValue;

/// JsValueエラーを表示用文字列へ
pub fn js_error_message(error: &JsValue) -> String {
    error
        .as_string()
        .unwrap_or_else(|| format!("{:?}", error))
}
