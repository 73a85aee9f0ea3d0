//! ダッシュボードフィルタのスナップショット
//!
//! フォームコントロールへの読み書きは [`FilterForm`] に抽象化してあり、
//! DOMなしでテストできる。URLクエリにフィルタパラメータがあるときは
//! 常にURL側を優先し、復元は行わない。

use serde::{Deserialize, Serialize};

/// localStorageへ保存するフィルタのスナップショット
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterSnapshot {
    #[serde(default)]
    pub month: String,
    #[serde(default)]
    pub year: String,
    #[serde(default)]
    pub pic: String,
    #[serde(default)]
    pub line: String,
    #[serde(default)]
    pub mesin: String,
    #[serde(default)]
    pub sub_mesin: String,
    #[serde(default)]
    pub sort: String,
    #[serde(default)]
    pub order: String,
    #[serde(default)]
    pub page_size: String,
    #[serde(default)]
    pub timestamp: String,
}

/// 復元抑止の対象となるURLクエリパラメータ
pub const URL_PARAMS: [&str; 6] = ["month", "year", "pic", "line", "mesin", "sub_mesin"];

/// フィルタフィールドとコントロール欠落時のデフォルト値
pub struct FieldSpec {
    pub name: &'static str,
    pub default: &'static str,
}

pub const FIELDS: [FieldSpec; 9] = [
    FieldSpec { name: "month", default: "" },
    FieldSpec { name: "year", default: "" },
    FieldSpec { name: "pic", default: "" },
    FieldSpec { name: "line", default: "" },
    FieldSpec { name: "mesin", default: "" },
    FieldSpec { name: "sub_mesin", default: "" },
    FieldSpec { name: "sort", default: "updated_at" },
    FieldSpec { name: "order", default: "desc" },
    FieldSpec { name: "page_size", default: "20" },
];

/// フィルタフォームの読み書き口
///
/// `read` はコントロールが存在しないとき `None` を返し、
/// `write` は存在しないときに何もしない。
pub trait FilterForm {
    fn read(&self, field: &str) -> Option<String>;
    fn write(&mut self, field: &str, value: &str);
}

impl FilterSnapshot {
    pub fn get(&self, field: &str) -> Option<&str> {
        match field {
            "month" => Some(&self.month),
            "year" => Some(&self.year),
            "pic" => Some(&self.pic),
            "line" => Some(&self.line),
            "mesin" => Some(&self.mesin),
            "sub_mesin" => Some(&self.sub_mesin),
            "sort" => Some(&self.sort),
            "order" => Some(&self.order),
            "page_size" => Some(&self.page_size),
            _ => None,
        }
    }

    fn set(&mut self, field: &str, value: String) {
        match field {
            "month" => self.month = value,
            "year" => self.year = value,
            "pic" => self.pic = value,
            "line" => self.line = value,
            "mesin" => self.mesin = value,
            "sub_mesin" => self.sub_mesin = value,
            "sort" => self.sort = value,
            "order" => self.order = value,
            "page_size" => self.page_size = value,
            _ => {}
        }
    }
}

/// フォームの現在値からスナップショットを作る
///
/// コントロールが存在しない、または値が空のフィールドには
/// デフォルト値を入れる
pub fn snapshot_from(form: &impl FilterForm, timestamp: impl Into<String>) -> FilterSnapshot {
    let mut snapshot = FilterSnapshot {
        timestamp: timestamp.into(),
        ..Default::default()
    };
    for field in &FIELDS {
        let value = match form.read(field.name) {
            Some(value) if !value.is_empty() => value,
            _ => field.default.to_string(),
        };
        snapshot.set(field.name, value);
    }
    snapshot
}

/// URLクエリのキー一覧に認識済みフィルタパラメータが含まれるか
///
/// 含まれる場合は復元をスキップする（URL優先）
pub fn url_overrides_saved<I, S>(present_params: I) -> bool
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    present_params
        .into_iter()
        .any(|key| URL_PARAMS.contains(&key.as_ref()))
}

/// スナップショットをフォームへ書き戻す
///
/// 空のフィールドは書かない。picだけは空文字でも書き戻す
/// （担当者未選択という状態自体を保存対象とする）
pub fn restore_into(snapshot: &FilterSnapshot, form: &mut impl FilterForm) {
    for field in &FIELDS {
        let Some(value) = snapshot.get(field.name) else {
            continue;
        };
        if field.name == "pic" || !value.is_empty() {
            form.write(field.name, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    /// コントロールの有無を模倣するテスト用フォーム
    struct MapForm {
        controls: HashMap<String, String>,
    }

    impl MapForm {
        fn new(fields: &[(&str, &str)]) -> Self {
            Self {
                controls: fields
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
            }
        }

        fn empty_dashboard() -> Self {
            Self::new(&[
                ("month", ""),
                ("year", ""),
                ("pic", ""),
                ("line", ""),
                ("mesin", ""),
                ("sub_mesin", ""),
                ("sort", ""),
                ("order", ""),
                ("page_size", ""),
            ])
        }
    }

    impl FilterForm for MapForm {
        fn read(&self, field: &str) -> Option<String> {
            self.controls.get(field).cloned()
        }

        fn write(&mut self, field: &str, value: &str) {
            if let Some(slot) = self.controls.get_mut(field) {
                *slot = value.to_string();
            }
        }
    }

    // =============================================
    // snapshot_from テスト
    // =============================================

    #[test]
    fn test_snapshot_reads_all_fields() {
        let form = MapForm::new(&[
            ("month", "8"),
            ("year", "2026"),
            ("pic", "budi"),
            ("line", "A"),
            ("mesin", "3"),
            ("sub_mesin", "7"),
            ("sort", "nama"),
            ("order", "asc"),
            ("page_size", "50"),
        ]);
        let snapshot = snapshot_from(&form, "2026-08-30T10:00:00.000Z");
        assert_eq!(snapshot.month, "8");
        assert_eq!(snapshot.year, "2026");
        assert_eq!(snapshot.pic, "budi");
        assert_eq!(snapshot.sort, "nama");
        assert_eq!(snapshot.order, "asc");
        assert_eq!(snapshot.page_size, "50");
        assert_eq!(snapshot.timestamp, "2026-08-30T10:00:00.000Z");
    }

    #[test]
    fn test_snapshot_defaults_for_missing_controls() {
        let form = MapForm::new(&[("line", "A")]);
        let snapshot = snapshot_from(&form, "t");
        assert_eq!(snapshot.line, "A");
        assert_eq!(snapshot.month, "");
        assert_eq!(snapshot.sort, "updated_at");
        assert_eq!(snapshot.order, "desc");
        assert_eq!(snapshot.page_size, "20");
    }

    #[test]
    fn test_snapshot_defaults_for_empty_values() {
        // 空文字の sort/order/page_size もデフォルトへ落ちる
        let form = MapForm::new(&[("sort", ""), ("order", ""), ("page_size", "")]);
        let snapshot = snapshot_from(&form, "t");
        assert_eq!(snapshot.sort, "updated_at");
        assert_eq!(snapshot.order, "desc");
        assert_eq!(snapshot.page_size, "20");
    }

    // =============================================
    // url_overrides_saved テスト
    // =============================================

    #[test]
    fn test_url_override_with_recognized_param() {
        assert!(url_overrides_saved(["page", "line"]));
        assert!(url_overrides_saved(["month"]));
    }

    #[test]
    fn test_url_override_ignores_unrelated_params() {
        assert!(!url_overrides_saved(["page", "tab", "q"]));
        assert!(!url_overrides_saved(Vec::<String>::new()));
    }

    // =============================================
    // restore_into テスト
    // =============================================

    #[test]
    fn test_restore_writes_saved_fields() {
        // 保存済み {line: "A", year: "2024"} がURLパラメータなしで復元される
        let snapshot = FilterSnapshot {
            line: "A".to_string(),
            year: "2024".to_string(),
            ..Default::default()
        };
        let mut form = MapForm::empty_dashboard();
        restore_into(&snapshot, &mut form);
        assert_eq!(form.read("line").unwrap(), "A");
        assert_eq!(form.read("year").unwrap(), "2024");
        // 空のフィールドは書かれない
        assert_eq!(form.read("month").unwrap(), "");
    }

    #[test]
    fn test_restore_pic_written_even_when_empty() {
        let snapshot = FilterSnapshot {
            pic: String::new(),
            ..Default::default()
        };
        let mut form = MapForm::new(&[("pic", "budi")]);
        restore_into(&snapshot, &mut form);
        assert_eq!(form.read("pic").unwrap(), "");
    }

    #[test]
    fn test_restore_skips_missing_controls() {
        let snapshot = FilterSnapshot {
            line: "A".to_string(),
            mesin: "3".to_string(),
            ..Default::default()
        };
        // mesinコントロールがないページ
        let mut form = MapForm::new(&[("line", "")]);
        restore_into(&snapshot, &mut form);
        assert_eq!(form.read("line").unwrap(), "A");
        assert_eq!(form.read("mesin"), None);
    }

    // =============================================
    // save → restore ラウンドトリップ
    // =============================================

    #[test]
    fn test_save_restore_round_trip() {
        let original = MapForm::new(&[
            ("month", "8"),
            ("year", "2026"),
            ("pic", "budi"),
            ("line", "A"),
            ("mesin", "3"),
            ("sub_mesin", "7"),
            ("sort", "nama"),
            ("order", "asc"),
            ("page_size", "50"),
        ]);
        let snapshot = snapshot_from(&original, "t");

        // JSON経由（localStorage相当）でラウンドトリップ
        let stored = serde_json::to_string(&snapshot).unwrap();
        let loaded: FilterSnapshot = serde_json::from_str(&stored).unwrap();

        let mut fresh = MapForm::empty_dashboard();
        restore_into(&loaded, &mut fresh);
        for field in &FIELDS {
            assert_eq!(
                fresh.read(field.name),
                original.read(field.name),
                "field = {}",
                field.name
            );
        }
    }

    #[test]
    fn test_snapshot_json_field_names() {
        let snapshot = snapshot_from(&MapForm::empty_dashboard(), "t");
        let json = serde_json::to_string(&snapshot).unwrap();
        for key in ["month", "year", "pic", "line", "mesin", "sub_mesin", "sort", "order", "page_size", "timestamp"] {
            assert!(json.contains(&format!("\"{}\"", key)), "key = {}", key);
        }
    }

    #[test]
    fn test_malformed_snapshot_json_is_error() {
        // 壊れた保存データは「保存なし」として扱う想定（呼び出し側でスキップ）
        assert!(serde_json::from_str::<FilterSnapshot>("not json").is_err());
    }
}
