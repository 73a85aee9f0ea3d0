//! チェックリストモーダルコンポーネント
//!
//! 開くたびに項目と既存結果を取得し、行を描画して保存まで面倒を見る

use gloo::timers::callback::Timeout;
use leptos::prelude::*;
use leptos::task::spawn_local;

use preventive_common::{ChecklistSession, RowEntry};

use crate::api;
use crate::components::alert::{push_alert, Alert, AlertArea, AlertKind};
use crate::components::checklist_row::{ChecklistRow, RowState};

/// モーダルを閉じてからページをリロードするまでの遅延
const CLOSE_DELAY_MS: u32 = 1_000;
const RELOAD_DELAY_MS: u32 = 500;

/// 既存結果のヘッダ表示用メタ情報
#[derive(Debug, Clone, PartialEq, Default)]
struct ResultMeta {
    template_name: Option<String>,
    status_overall: Option<String>,
    diisi_oleh: Option<String>,
    tanggal_pengisian: Option<String>,
}

/// 全体ステータスのバッジ用クラス（空なら表示しない）
fn overall_badge_class(status: &str) -> Option<&'static str> {
    match status {
        "" => None,
        "OK" => Some("badge bg-success"),
        "NG" => Some("badge bg-danger"),
        _ => Some("badge bg-secondary"),
    }
}

#[component]
pub fn ChecklistModal(
    execution_id: String,
    is_open: ReadSignal<bool>,
    set_is_open: WriteSignal<bool>,
) -> impl IntoView {
    let execution_id = StoredValue::new(execution_id);

    let session = RwSignal::new(None::<ChecklistSession>);
    let rows = RwSignal::new(Vec::<RowState>::new());
    let catatan = RwSignal::new(String::new());
    let alerts = RwSignal::new(Vec::<Alert>::new());
    let meta = RwSignal::new(ResultMeta::default());
    let (is_loading, set_is_loading) = signal(false);
    let (load_error, set_load_error) = signal(None::<String>);
    let (is_saving, set_is_saving) = signal(false);

    // モーダルが開くたびにロードし直す
    Effect::new(move |_| {
        if !is_open.get() {
            return;
        }
        alerts.set(Vec::new());
        session.set(None);
        rows.set(Vec::new());
        catatan.set(String::new());
        meta.set(ResultMeta::default());
        set_load_error.set(None);
        set_is_loading.set(true);

        let execution_id = execution_id.get_value();
        spawn_local(async move {
            match api::fetch_checklist(&execution_id).await {
                Ok(response) => {
                    meta.set(ResultMeta {
                        template_name: response.checklist_template_name.clone(),
                        status_overall: response
                            .checklist_result
                            .as_ref()
                            .and_then(|r| r.status_overall.clone()),
                        diisi_oleh: response
                            .checklist_result
                            .as_ref()
                            .and_then(|r| r.diisi_oleh.clone()),
                        tanggal_pengisian: response
                            .checklist_result
                            .as_ref()
                            .and_then(|r| r.tanggal_pengisian.clone()),
                    });
                    match response.into_session(&execution_id) {
                        Ok(loaded) => {
                            catatan.set(loaded.catatan().to_string());
                            rows.set(
                                loaded
                                    .items()
                                    .iter()
                                    .map(|item| {
                                        RowState::new(
                                            item.clone(),
                                            loaded.prefill_value(item.id),
                                            loaded.prefill_status(item.id),
                                        )
                                    })
                                    .collect(),
                            );
                            session.set(Some(loaded));
                        }
                        Err(e) => {
                            set_load_error.set(Some(format!("Gagal memuat checklist items: {}", e)));
                        }
                    }
                }
                Err(e) => {
                    set_load_error.set(Some(format!(
                        "Error memuat checklist items: {}",
                        api::js_error_message(&e)
                    )));
                }
            }
            set_is_loading.set(false);
        });
    });

    let on_save = move |_| {
        if is_saving.get() {
            return;
        }
        let Some(current) = session.get() else {
            return;
        };

        let row_list = rows.get();
        let entries: Vec<RowEntry> = row_list
            .iter()
            .map(|row| RowEntry {
                item_id: row.item.id,
                value: row.value.get(),
                status: row.status.get(),
            })
            .collect();

        match current.collect(&entries, &catatan.get()) {
            Err(missing_ids) => {
                // 1件でも未入力なら保存全体を中断する
                for row in &row_list {
                    row.missing.set(missing_ids.contains(&row.item.id));
                }
                push_alert(
                    alerts,
                    AlertKind::Warning,
                    "Mohon isi semua item checklist terlebih dahulu",
                );
            }
            Ok(request) => {
                for row in &row_list {
                    row.missing.set(false);
                }
                set_is_saving.set(true);

                let execution_id = current.execution_id().to_string();
                spawn_local(async move {
                    let result = api::save_checklist(&execution_id, &request).await;
                    set_is_saving.set(false);

                    match result {
                        Ok(response) => match response.into_result() {
                            Ok(_) => {
                                push_alert(alerts, AlertKind::Success, "✓ Checklist berhasil disimpan!");
                                // モーダルを閉じてからページをリロード
                                Timeout::new(CLOSE_DELAY_MS, move || {
                                    set_is_open.set(false);
                                    Timeout::new(RELOAD_DELAY_MS, || {
                                        if let Some(window) = web_sys::window() {
                                            let _ = window.location().reload();
                                        }
                                    })
                                    .forget();
                                })
                                .forget();
                            }
                            Err(e) => {
                                push_alert(
                                    alerts,
                                    AlertKind::Danger,
                                    format!("Gagal menyimpan checklist: {}", e),
                                );
                            }
                        },
                        Err(e) => {
                            push_alert(
                                alerts,
                                AlertKind::Danger,
                                format!("Error menyimpan checklist: {}", api::js_error_message(&e)),
                            );
                        }
                    }
                });
            }
        }
    };

    let title = move || {
        meta.get()
            .template_name
            .map(|name| format!("Checklist: {}", name))
            .unwrap_or_else(|| "Checklist Pemeriksaan".to_string())
    };
    let filled_by = move || {
        let meta = meta.get();
        meta.diisi_oleh.map(|name| {
            let when = meta.tanggal_pengisian.unwrap_or_default();
            if when.is_empty() {
                format!("Terakhir diisi oleh {}", name)
            } else {
                format!("Terakhir diisi oleh {} pada {}", name, when)
            }
        })
    };
    let overall_badge = move || {
        let status = meta.get().status_overall.unwrap_or_default();
        overall_badge_class(&status).map(|class| {
            view! {
                <span class=class>{status.clone()}</span>
            }
        })
    };
    let show_empty_row = move || {
        !is_loading.get() && rows.get().is_empty() && load_error.get().is_none()
    };

    view! {
        <Show when=move || is_open.get()>
            <div class="modal d-block" tabindex="-1">
                <div class="modal-dialog modal-xl">
                    <div class="modal-content">
                        <div class="modal-header">
                            <div>
                                <h5 class="modal-title">{title} " " {overall_badge}</h5>
                                {move || filled_by().map(|text| view! {
                                    <small class="text-muted">{text}</small>
                                })}
                            </div>
                            <button
                                type="button"
                                class="btn-close"
                                on:click=move |_| set_is_open.set(false)
                            ></button>
                        </div>
                        <div class="modal-body">
                            <AlertArea alerts=alerts />
                            {move || load_error.get().map(|message| view! {
                                <div class="alert alert-danger">{message}</div>
                            })}
                            <table class="table table-bordered table-sm align-middle">
                                <thead>
                                    <tr>
                                        <th>"No"</th>
                                        <th>"Tipe"</th>
                                        <th>"Item Pemeriksaan"</th>
                                        <th>"Standar"</th>
                                        <th>"Hasil"</th>
                                        <th>"Status"</th>
                                    </tr>
                                </thead>
                                <tbody>
                                    <Show when=move || is_loading.get()>
                                        <tr>
                                            <td colspan="6" class="text-center text-muted">
                                                "Loading..."
                                            </td>
                                        </tr>
                                    </Show>
                                    <Show when=show_empty_row>
                                        <tr>
                                            <td colspan="6" class="text-center text-muted">
                                                "Tidak ada item checklist"
                                            </td>
                                        </tr>
                                    </Show>
                                    {move || {
                                        rows.get()
                                            .into_iter()
                                            .enumerate()
                                            .map(|(i, row)| view! {
                                                <ChecklistRow row=row index=i + 1 />
                                            })
                                            .collect_view()
                                    }}
                                </tbody>
                            </table>
                            <div class="form-group mt-3">
                                <label for="catatanUmum">"Catatan Umum"</label>
                                <textarea
                                    id="catatanUmum"
                                    class="form-control"
                                    rows="3"
                                    placeholder="Catatan tambahan (opsional)"
                                    prop:value=move || catatan.get()
                                    on:input=move |ev| catatan.set(event_target_value(&ev))
                                ></textarea>
                            </div>
                        </div>
                        <div class="modal-footer">
                            <button
                                type="button"
                                class="btn btn-secondary"
                                on:click=move |_| set_is_open.set(false)
                            >
                                "Tutup"
                            </button>
                            <button
                                type="button"
                                class="btn btn-primary"
                                disabled=move || is_saving.get()
                                on:click=on_save
                            >
                                {move || if is_saving.get() { "Menyimpan..." } else { "Simpan Checklist" }}
                            </button>
                        </div>
                    </div>
                </div>
            </div>
        </Show>
    }
}
