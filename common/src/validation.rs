//! 入力値のライブ検証
//!
//! change/inputイベントごとに (値, min, max) だけから状態を再計算する。
//! 検証状態はどこにも永続化しない。

use crate::types::{ItemStatus, ItemType};

/// 行ハイライト（numeric項目のみ）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowHighlight {
    Success,
    Danger,
}

/// ステータスselectへの更新指示
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusUpdate {
    Set(ItemStatus),
    Clear,
    /// 現在値を維持（片側レンジ違反時はステータスを変更しない）
    Keep,
}

/// 行ハイライトへの更新指示
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HighlightUpdate {
    Set(RowHighlight),
    Clear,
    Keep,
}

/// 1項目分の検証結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationOutcome {
    pub status: StatusUpdate,
    pub highlight: HighlightUpdate,
}

/// 入力値を項目タイプに応じて検証する
///
/// - `free_text`: トリム後に非空ならOK、空ならクリア
/// - `text`: 選択済みならOK、未選択ならクリア
/// - `numeric`: 空ならクリア。それ以外はf64としてパースし、
///   両側レンジなら範囲内OK/範囲外NG、片側レンジなら満たした場合のみOK。
///   片側レンジを満たさない場合はステータスを変更しない（NGは付けない）
pub fn validate_value(
    item_type: ItemType,
    raw: &str,
    nilai_min: Option<f64>,
    nilai_max: Option<f64>,
) -> ValidationOutcome {
    match item_type {
        ItemType::FreeText => ValidationOutcome {
            status: if raw.trim().is_empty() {
                StatusUpdate::Clear
            } else {
                StatusUpdate::Set(ItemStatus::Ok)
            },
            highlight: HighlightUpdate::Keep,
        },
        ItemType::Text => ValidationOutcome {
            status: if raw.is_empty() {
                StatusUpdate::Clear
            } else {
                StatusUpdate::Set(ItemStatus::Ok)
            },
            highlight: HighlightUpdate::Keep,
        },
        ItemType::Numeric => validate_numeric(raw, nilai_min, nilai_max),
    }
}

fn validate_numeric(raw: &str, nilai_min: Option<f64>, nilai_max: Option<f64>) -> ValidationOutcome {
    if raw.is_empty() {
        return ValidationOutcome {
            status: StatusUpdate::Clear,
            highlight: HighlightUpdate::Clear,
        };
    }

    // パース不能値はNaN扱い（比較がすべてfalseになる）
    let nilai = raw.parse::<f64>().unwrap_or(f64::NAN);

    match (nilai_min, nilai_max) {
        (Some(min), Some(max)) => {
            if nilai >= min && nilai <= max {
                ValidationOutcome {
                    status: StatusUpdate::Set(ItemStatus::Ok),
                    highlight: HighlightUpdate::Set(RowHighlight::Success),
                }
            } else {
                ValidationOutcome {
                    status: StatusUpdate::Set(ItemStatus::Ng),
                    highlight: HighlightUpdate::Set(RowHighlight::Danger),
                }
            }
        }
        (Some(min), None) if nilai >= min => ValidationOutcome {
            status: StatusUpdate::Set(ItemStatus::Ok),
            highlight: HighlightUpdate::Set(RowHighlight::Success),
        },
        (None, Some(max)) if nilai <= max => ValidationOutcome {
            status: StatusUpdate::Set(ItemStatus::Ok),
            highlight: HighlightUpdate::Set(RowHighlight::Success),
        },
        // 片側レンジ違反およびレンジ未設定: ステータスは触らない
        _ => ValidationOutcome {
            status: StatusUpdate::Keep,
            highlight: HighlightUpdate::Clear,
        },
    }
}
