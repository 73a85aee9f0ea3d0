//! チェックリストセッション
//!
//! モーダルを開いたときに構築し、閉じたら破棄する。
//! 実行ID・項目定義・既存結果をひとまとめに保持し、
//! 事前入力と保存ペイロードの組み立てを担当する。

use crate::error::{Error, Result};
use crate::types::{
    ChecklistItem, ChecklistModalResponse, ChecklistResult, ItemStatus, SaveChecklistRequest,
};

/// 1行分の入力状態（保存時にUIから集める）
#[derive(Debug, Clone, PartialEq)]
pub struct RowEntry {
    pub item_id: i64,
    pub value: String,
    pub status: Option<ItemStatus>,
}

/// モーダル1回分のチェックリスト状態
#[derive(Debug, Clone, PartialEq)]
pub struct ChecklistSession {
    execution_id: String,
    items: Vec<ChecklistItem>,
    existing: Option<ChecklistResult>,
}

impl ChecklistSession {
    pub fn new(
        execution_id: impl Into<String>,
        items: Vec<ChecklistItem>,
        existing: Option<ChecklistResult>,
    ) -> Self {
        Self {
            execution_id: execution_id.into(),
            items,
            existing,
        }
    }

    pub fn execution_id(&self) -> &str {
        &self.execution_id
    }

    pub fn items(&self) -> &[ChecklistItem] {
        &self.items
    }

    /// 既存結果からの測定値の事前入力
    pub fn prefill_value(&self, item_id: i64) -> Option<String> {
        self.existing
            .as_ref()?
            .hasil_pengukuran
            .get(&item_id.to_string())
            .map(|entry| entry.nilai())
    }

    /// 既存結果からのステータスの事前入力
    pub fn prefill_status(&self, item_id: i64) -> Option<ItemStatus> {
        self.existing
            .as_ref()?
            .status_item
            .get(&item_id.to_string())
            .and_then(|status| ItemStatus::parse(status))
    }

    /// 既存結果の全体メモ（なければ空文字）
    pub fn catatan(&self) -> &str {
        self.existing
            .as_ref()
            .map(|result| result.catatan.as_str())
            .unwrap_or("")
    }

    /// 入力値を保存リクエストへ集約する
    ///
    /// 1つでもトリム後に空の値があれば全体を中断し、
    /// 該当する項目IDの一覧を返す（部分保存はしない）。
    /// 未設定ステータスはOKにデフォルトする。
    pub fn collect(
        &self,
        entries: &[RowEntry],
        catatan: &str,
    ) -> std::result::Result<SaveChecklistRequest, Vec<i64>> {
        let mut request = SaveChecklistRequest {
            catatan: catatan.to_string(),
            ..Default::default()
        };
        let mut missing = Vec::new();

        for entry in entries {
            let nilai = entry.value.trim();
            if nilai.is_empty() {
                missing.push(entry.item_id);
                continue;
            }
            let key = entry.item_id.to_string();
            request.hasil_pengukuran.insert(key.clone(), nilai.to_string());
            request
                .status_item
                .insert(key, entry.status.unwrap_or(ItemStatus::Ok));
        }

        if missing.is_empty() {
            Ok(request)
        } else {
            Err(missing)
        }
    }
}

impl ChecklistModalResponse {
    /// 成功レスポンスをセッションへ変換する
    ///
    /// `status != "success"` ならサーバのmessageをエラーとして返す
    pub fn into_session(self, execution_id: &str) -> Result<ChecklistSession> {
        if !self.is_success() {
            return Err(Error::Api(
                self.message.unwrap_or_else(|| "Unknown error".to_string()),
            ));
        }
        Ok(ChecklistSession::new(
            execution_id,
            self.items,
            self.checklist_result,
        ))
    }
}
