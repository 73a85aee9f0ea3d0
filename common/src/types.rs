//! チェックリストAPIのワイヤ型定義
//!
//! `/preventive/execution/{id}/checklist-modal/` (GET) と
//! `/preventive/execution/{id}/save-checklist/` (POST) のJSONに対応する

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// チェックリスト項目の入力タイプ
///
/// サーバが未知の値や空文字を返した場合は numeric として扱う
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ItemType {
    #[default]
    Numeric,
    Text,
    FreeText,
}

impl ItemType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemType::Numeric => "numeric",
            ItemType::Text => "text",
            ItemType::FreeText => "free_text",
        }
    }
}

impl From<String> for ItemType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "text" => ItemType::Text,
            "free_text" => ItemType::FreeText,
            _ => ItemType::Numeric,
        }
    }
}

impl From<ItemType> for String {
    fn from(value: ItemType) -> Self {
        value.as_str().to_string()
    }
}

/// 項目ごとのOK/NGステータス
///
/// 未設定は `Option<ItemStatus>` の `None` で表す
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ItemStatus {
    Ok,
    Ng,
}

impl ItemStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemStatus::Ok => "OK",
            ItemStatus::Ng => "NG",
        }
    }

    /// select値（"" / "OK" / "NG"）からのパース
    pub fn parse(value: &str) -> Option<ItemStatus> {
        match value {
            "OK" => Some(ItemStatus::Ok),
            "NG" => Some(ItemStatus::Ng),
            _ => None,
        }
    }
}

/// チェックリスト項目定義（サーバから取得、以後不変）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChecklistItem {
    pub id: i64,
    /// 表示ラベル
    pub item_pemeriksaan: String,
    #[serde(default)]
    pub standar_normal: Option<String>,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub nilai_min: Option<f64>,
    #[serde(default)]
    pub nilai_max: Option<f64>,
    #[serde(default)]
    pub item_type: ItemType,
    /// セミコロン区切りの選択肢（textタイプのみ）
    #[serde(default)]
    pub text_options: String,
    #[serde(default)]
    pub tindakan_remark: String,
}

impl ChecklistItem {
    /// text_options をトリム済みの選択肢リストへ展開する
    pub fn option_list(&self) -> Vec<String> {
        self.text_options
            .split(';')
            .map(str::trim)
            .filter(|opt| !opt.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// 既存結果の測定値エントリ
///
/// サーバは `{nilai, status}` の辞書形式で保存するが、
/// 旧形式の素の値（文字列・数値）も混在しうるため両対応する
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NilaiEntry {
    Detail {
        nilai: serde_json::Value,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        status: Option<String>,
    },
    Simple(serde_json::Value),
}

impl NilaiEntry {
    /// 入力欄へ書き戻す表示値
    pub fn nilai(&self) -> String {
        match self {
            NilaiEntry::Detail { nilai, .. } => scalar_string(nilai),
            NilaiEntry::Simple(nilai) => scalar_string(nilai),
        }
    }
}

fn scalar_string(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// 既存のチェックリスト結果（あれば事前入力に使う）
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChecklistResult {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub hasil_pengukuran: BTreeMap<String, NilaiEntry>,
    #[serde(default)]
    pub status_item: BTreeMap<String, String>,
    #[serde(default)]
    pub catatan: String,
    #[serde(default)]
    pub status_overall: Option<String>,
    #[serde(default)]
    pub diisi_oleh: Option<String>,
    #[serde(default)]
    pub diisi_oleh_username: Option<String>,
    #[serde(default)]
    pub tanggal_pengisian: Option<String>,
}

/// モーダル表示用エンドポイントのレスポンス
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChecklistModalResponse {
    pub status: String,
    #[serde(default)]
    pub items: Vec<ChecklistItem>,
    #[serde(default)]
    pub checklist_result: Option<ChecklistResult>,
    #[serde(default)]
    pub checklist_template_name: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ChecklistModalResponse {
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }
}

/// 保存エンドポイントへのリクエストボディ
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SaveChecklistRequest {
    pub hasil_pengukuran: BTreeMap<String, String>,
    pub status_item: BTreeMap<String, ItemStatus>,
    pub catatan: String,
}

/// 保存エンドポイントのレスポンス
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SaveChecklistResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

impl SaveChecklistResponse {
    /// 失敗フラグをエラーへ変換する
    pub fn into_result(self) -> crate::Result<Option<String>> {
        if self.success {
            Ok(self.message)
        } else {
            Err(crate::Error::Api(
                self.message.unwrap_or_else(|| "Unknown error".to_string()),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numeric_item_json() -> &'static str {
        r#"{
            "id": 5,
            "item_pemeriksaan": "Tekanan oli",
            "standar_normal": "10 - 20 bar",
            "unit": "bar",
            "nilai_min": 10.0,
            "nilai_max": 20.0,
            "item_type": "numeric",
            "text_options": "",
            "tindakan_remark": "Lapor supervisor"
        }"#
    }

    // =============================================
    // ChecklistItem デシリアライズテスト
    // =============================================

    #[test]
    fn test_item_deserialize_numeric() {
        let item: ChecklistItem = serde_json::from_str(numeric_item_json()).expect("デシリアライズ失敗");
        assert_eq!(item.id, 5);
        assert_eq!(item.item_pemeriksaan, "Tekanan oli");
        assert_eq!(item.item_type, ItemType::Numeric);
        assert_eq!(item.nilai_min, Some(10.0));
        assert_eq!(item.nilai_max, Some(20.0));
        assert_eq!(item.unit, "bar");
    }

    #[test]
    fn test_item_deserialize_null_bounds() {
        let json = r#"{"id": 1, "item_pemeriksaan": "Cek visual", "nilai_min": null, "nilai_max": null}"#;
        let item: ChecklistItem = serde_json::from_str(json).expect("デシリアライズ失敗");
        assert_eq!(item.nilai_min, None);
        assert_eq!(item.nilai_max, None);
    }

    #[test]
    fn test_item_type_unknown_defaults_to_numeric() {
        let json = r#"{"id": 1, "item_pemeriksaan": "x", "item_type": "mystery"}"#;
        let item: ChecklistItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.item_type, ItemType::Numeric);
    }

    #[test]
    fn test_item_type_missing_defaults_to_numeric() {
        let json = r#"{"id": 1, "item_pemeriksaan": "x"}"#;
        let item: ChecklistItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.item_type, ItemType::Numeric);
    }

    #[test]
    fn test_item_type_free_text() {
        let json = r#"{"id": 1, "item_pemeriksaan": "x", "item_type": "free_text"}"#;
        let item: ChecklistItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.item_type, ItemType::FreeText);
    }

    #[test]
    fn test_option_list_split_and_trim() {
        let item = ChecklistItem {
            id: 1,
            item_pemeriksaan: "Kondisi belt".to_string(),
            standar_normal: None,
            unit: String::new(),
            nilai_min: None,
            nilai_max: None,
            item_type: ItemType::Text,
            text_options: "Baik; Aus ;Putus;".to_string(),
            tindakan_remark: String::new(),
        };
        assert_eq!(item.option_list(), vec!["Baik", "Aus", "Putus"]);
    }

    #[test]
    fn test_option_list_empty() {
        let json = r#"{"id": 1, "item_pemeriksaan": "x", "item_type": "text"}"#;
        let item: ChecklistItem = serde_json::from_str(json).unwrap();
        assert!(item.option_list().is_empty());
    }

    // =============================================
    // NilaiEntry（旧形式・辞書形式）テスト
    // =============================================

    #[test]
    fn test_nilai_entry_simple_string() {
        let entry: NilaiEntry = serde_json::from_str(r#""15.5""#).unwrap();
        assert_eq!(entry.nilai(), "15.5");
    }

    #[test]
    fn test_nilai_entry_simple_number() {
        let entry: NilaiEntry = serde_json::from_str("15").unwrap();
        assert_eq!(entry.nilai(), "15");
    }

    #[test]
    fn test_nilai_entry_detail() {
        let entry: NilaiEntry = serde_json::from_str(r#"{"nilai": "12.3", "status": "OK"}"#).unwrap();
        assert_eq!(entry.nilai(), "12.3");
    }

    #[test]
    fn test_nilai_entry_detail_numeric_value() {
        let entry: NilaiEntry = serde_json::from_str(r#"{"nilai": 12.5, "status": "NG"}"#).unwrap();
        assert_eq!(entry.nilai(), "12.5");
    }

    // =============================================
    // レスポンス/リクエスト テスト
    // =============================================

    #[test]
    fn test_modal_response_success() {
        let json = format!(
            r#"{{"status": "success", "items": [{}], "checklist_result": null, "checklist_template_name": "PM Harian"}}"#,
            numeric_item_json()
        );
        let resp: ChecklistModalResponse = serde_json::from_str(&json).expect("デシリアライズ失敗");
        assert!(resp.is_success());
        assert_eq!(resp.items.len(), 1);
        assert!(resp.checklist_result.is_none());
        assert_eq!(resp.checklist_template_name.as_deref(), Some("PM Harian"));
    }

    #[test]
    fn test_modal_response_error() {
        let json = r#"{"status": "error", "message": "Permission denied"}"#;
        let resp: ChecklistModalResponse = serde_json::from_str(json).unwrap();
        assert!(!resp.is_success());
        assert_eq!(resp.message.as_deref(), Some("Permission denied"));
        assert!(resp.items.is_empty());
    }

    #[test]
    fn test_existing_result_deserialize() {
        let json = r#"{
            "id": 7,
            "hasil_pengukuran": {"5": {"nilai": "15", "status": "OK"}, "6": "Baik"},
            "status_item": {"5": "OK", "6": ""},
            "catatan": "Semua normal",
            "status_overall": "OK",
            "diisi_oleh": "Budi",
            "tanggal_pengisian": "01/08/2026 09:30"
        }"#;
        let result: ChecklistResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.hasil_pengukuran["5"].nilai(), "15");
        assert_eq!(result.hasil_pengukuran["6"].nilai(), "Baik");
        assert_eq!(result.status_item["5"], "OK");
        assert_eq!(result.catatan, "Semua normal");
    }

    #[test]
    fn test_save_request_serialize_field_names() {
        let mut request = SaveChecklistRequest::default();
        request.hasil_pengukuran.insert("5".to_string(), "15".to_string());
        request.status_item.insert("5".to_string(), ItemStatus::Ok);
        request.catatan = "catatan umum".to_string();

        let json = serde_json::to_string(&request).expect("シリアライズ失敗");
        assert_eq!(
            json,
            r#"{"hasil_pengukuran":{"5":"15"},"status_item":{"5":"OK"},"catatan":"catatan umum"}"#
        );
    }

    #[test]
    fn test_save_response_into_result() {
        let ok: SaveChecklistResponse = serde_json::from_str(r#"{"success": true}"#).unwrap();
        assert!(ok.into_result().is_ok());

        let ng: SaveChecklistResponse =
            serde_json::from_str(r#"{"success": false, "message": "No checklist template"}"#).unwrap();
        let err = ng.into_result().unwrap_err();
        assert_eq!(format!("{}", err), "No checklist template");
    }

    // =============================================
    // ItemStatus テスト
    // =============================================

    #[test]
    fn test_item_status_serialize() {
        assert_eq!(serde_json::to_string(&ItemStatus::Ok).unwrap(), r#""OK""#);
        assert_eq!(serde_json::to_string(&ItemStatus::Ng).unwrap(), r#""NG""#);
    }

    #[test]
    fn test_item_status_parse() {
        assert_eq!(ItemStatus::parse("OK"), Some(ItemStatus::Ok));
        assert_eq!(ItemStatus::parse("NG"), Some(ItemStatus::Ng));
        assert_eq!(ItemStatus::parse(""), None);
        assert_eq!(ItemStatus::parse("ok"), None);
    }
}
