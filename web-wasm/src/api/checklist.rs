//! チェックリストAPI呼び出し
//!
//! GET  /preventive/execution/{id}/checklist-modal/
//! POST /preventive/execution/{id}/save-checklist/

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, Response};

use preventive_common::{ChecklistModalResponse, SaveChecklistRequest, SaveChecklistResponse};

use crate::cookie;

/// チェックリスト項目と既存結果を取得する
pub async fn fetch_checklist(execution_id: &str) -> Result<ChecklistModalResponse, JsValue> {
    let url = format!("/preventive/execution/{}/checklist-modal/", execution_id);

    let opts = RequestInit::new();
    opts.set_method("GET");

    let request = Request::new_with_str_and_init(&url, &opts)?;
    request.headers().set("X-Requested-With", "XMLHttpRequest")?;

    let response = send(&request).await?;
    let json = JsFuture::from(response.json()?).await?;
    let parsed: ChecklistModalResponse = serde_wasm_bindgen::from_value(json)?;
    Ok(parsed)
}

/// チェックリスト結果を保存する
pub async fn save_checklist(
    execution_id: &str,
    payload: &SaveChecklistRequest,
) -> Result<SaveChecklistResponse, JsValue> {
    let url = format!("/preventive/execution/{}/save-checklist/", execution_id);
    let body = serde_json::to_string(payload).map_err(|e| JsValue::from_str(&e.to_string()))?;

    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_body(&JsValue::from_str(&body));

    let request = Request::new_with_str_and_init(&url, &opts)?;
    let headers = request.headers();
    headers.set("Content-Type", "application/json")?;
    if let Some(token) = cookie::get_cookie("csrftoken") {
        headers.set("X-CSRFToken", &token)?;
    }
    headers.set("X-Requested-With", "XMLHttpRequest")?;

    let response = send(&request).await?;
    let json = JsFuture::from(response.json()?).await?;
    let parsed: SaveChecklistResponse = serde_wasm_bindgen::from_value(json)?;
    Ok(parsed)
}

/// fetch実行とHTTPステータス確認（共通処理）
async fn send(request: &Request) -> Result<Response, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let resp_value = JsFuture::from(window.fetch_with_request(request)).await?;
    let response: Response = resp_value.dyn_into()?;

    if !response.ok() {
        return Err(JsValue::from_str(&format!(
            "HTTP error! status: {}",
            response.status()
        )));
    }

    Ok(response)
}
