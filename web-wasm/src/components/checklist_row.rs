//! チェックリスト1行分のコンポーネント

use leptos::prelude::*;

use preventive_common::{
    validate_value, ChecklistItem, HighlightUpdate, ItemStatus, ItemType, RowHighlight,
    StatusUpdate,
};

/// 1行分の入力シグナル
#[derive(Clone)]
pub struct RowState {
    pub item: ChecklistItem,
    pub value: RwSignal<String>,
    pub status: RwSignal<Option<ItemStatus>>,
    pub highlight: RwSignal<Option<RowHighlight>>,
    /// 保存時に空だった行のis-invalidフラグ
    pub missing: RwSignal<bool>,
}

impl RowState {
    pub fn new(
        item: ChecklistItem,
        prefill_value: Option<String>,
        prefill_status: Option<ItemStatus>,
    ) -> Self {
        Self {
            item,
            value: RwSignal::new(prefill_value.unwrap_or_default()),
            status: RwSignal::new(prefill_status),
            highlight: RwSignal::new(None),
            missing: RwSignal::new(false),
        }
    }
}

fn fmt_bound(bound: Option<f64>) -> String {
    bound.map(|n| n.to_string()).unwrap_or_else(|| "-".to_string())
}

#[component]
pub fn ChecklistRow(row: RowState, index: usize) -> impl IntoView {
    let item = row.item.clone();
    let item_type = item.item_type;
    let nilai_min = item.nilai_min;
    let nilai_max = item.nilai_max;
    let value = row.value;
    let status = row.status;
    let highlight = row.highlight;
    let missing = row.missing;

    // change/inputのたびに値から状態を再計算する
    let on_value = move |ev: web_sys::Event| {
        let raw = event_target_value(&ev);
        value.set(raw.clone());
        let outcome = validate_value(item_type, &raw, nilai_min, nilai_max);
        match outcome.status {
            StatusUpdate::Set(new_status) => status.set(Some(new_status)),
            StatusUpdate::Clear => status.set(None),
            StatusUpdate::Keep => {}
        }
        match outcome.highlight {
            HighlightUpdate::Set(new_highlight) => highlight.set(Some(new_highlight)),
            HighlightUpdate::Clear => highlight.set(None),
            HighlightUpdate::Keep => {}
        }
    };

    let input_class = move || {
        if missing.get() {
            "form-control form-control-sm is-invalid"
        } else {
            "form-control form-control-sm"
        }
    };
    let select_class = move || {
        if missing.get() {
            "form-select form-select-sm is-invalid"
        } else {
            "form-select form-select-sm"
        }
    };

    let value_input = match item_type {
        ItemType::Numeric => {
            let caption = format!(
                "Range: {} - {} {}",
                fmt_bound(nilai_min),
                fmt_bound(nilai_max),
                item.unit
            );
            let on_input = on_value;
            let on_change = on_value;
            view! {
                <input
                    type="number"
                    step="0.01"
                    class=input_class
                    placeholder="Masukkan nilai"
                    prop:value=move || value.get()
                    on:input=on_input
                    on:change=on_change
                />
                <small class="text-muted d-block mt-1">{caption}</small>
            }
            .into_any()
        }
        ItemType::FreeText => view! {
            <textarea
                class=input_class
                rows="2"
                placeholder="Masukkan teks atau observasi..."
                prop:value=move || value.get()
                on:input=on_value
            ></textarea>
            <small class="text-muted d-block mt-1">
                "Input teks bebas - tidak ada validasi format"
            </small>
        }
        .into_any(),
        ItemType::Text => {
            let options = item.option_list();
            let caption = format!("Opsi: {}", options.join(", "));
            view! {
                <select class=select_class prop:value=move || value.get() on:change=on_value>
                    <option value="">"-- Pilih --"</option>
                    {options
                        .into_iter()
                        .map(|opt| view! { <option value=opt.clone()>{opt.clone()}</option> })
                        .collect_view()}
                </select>
                <small class="text-muted d-block mt-1">{caption}</small>
            }
            .into_any()
        }
    };

    let badge = match item_type {
        ItemType::Numeric => ("bg-primary", "NUM"),
        ItemType::FreeText => ("bg-warning", "FTX"),
        ItemType::Text => ("bg-info", "TXT"),
    };
    let standar = item
        .standar_normal
        .clone()
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "-".to_string());
    let tindakan = (!item.tindakan_remark.is_empty()).then(|| item.tindakan_remark.clone());

    let row_class = move || match highlight.get() {
        Some(RowHighlight::Success) => "table-success",
        Some(RowHighlight::Danger) => "table-danger",
        None => "",
    };

    let status_value = move || {
        status
            .get()
            .map(|s| s.as_str().to_string())
            .unwrap_or_default()
    };
    let on_status = move |ev: web_sys::Event| {
        status.set(ItemStatus::parse(&event_target_value(&ev)));
    };

    view! {
        <tr class=row_class>
            <td class="text-center">
                <strong>{index}</strong>
            </td>
            <td>
                <span class=format!("badge {}", badge.0)>{badge.1}</span>
            </td>
            <td>
                <strong>{item.item_pemeriksaan.clone()}</strong>
                {tindakan.map(|t| view! {
                    <br />
                    <small class="text-muted">{format!("Tindakan: {}", t)}</small>
                })}
            </td>
            <td>
                <small>{standar}</small>
            </td>
            <td>{value_input}</td>
            <td>
                <select class="form-select form-select-sm" prop:value=status_value on:change=on_status>
                    <option value="">"--"</option>
                    <option value="OK">"OK"</option>
                    <option value="NG">"NG"</option>
                </select>
            </td>
        </tr>
    }
}
