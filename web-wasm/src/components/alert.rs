//! モーダル内アラート表示

use std::sync::atomic::{AtomicU64, Ordering};

use gloo::timers::callback::Timeout;
use leptos::prelude::*;

static NEXT_ALERT_ID: AtomicU64 = AtomicU64::new(0);

/// 成功アラートの自動消去までのミリ秒
const SUCCESS_DISMISS_MS: u32 = 5_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Success,
    Warning,
    Danger,
}

impl AlertKind {
    fn class(&self) -> &'static str {
        match self {
            AlertKind::Success => "alert-success",
            AlertKind::Warning => "alert-warning",
            AlertKind::Danger => "alert-danger",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    pub id: u64,
    pub kind: AlertKind,
    pub message: String,
}

/// アラートを追加する。成功アラートは5秒後に自動で消える
pub fn push_alert(alerts: RwSignal<Vec<Alert>>, kind: AlertKind, message: impl Into<String>) {
    let id = NEXT_ALERT_ID.fetch_add(1, Ordering::Relaxed);
    alerts.update(|list| {
        list.push(Alert {
            id,
            kind,
            message: message.into(),
        })
    });

    if kind == AlertKind::Success {
        Timeout::new(SUCCESS_DISMISS_MS, move || {
            alerts.update(|list| list.retain(|alert| alert.id != id));
        })
        .forget();
    }
}

#[component]
pub fn AlertArea(alerts: RwSignal<Vec<Alert>>) -> impl IntoView {
    view! {
        {move || {
            alerts
                .get()
                .into_iter()
                .map(|alert| {
                    let id = alert.id;
                    view! {
                        <div class=format!("alert {} alert-dismissible fade show", alert.kind.class()) role="alert">
                            {alert.message.clone()}
                            <button
                                type="button"
                                class="btn-close"
                                on:click=move |_| alerts.update(|list| list.retain(|a| a.id != id))
                            ></button>
                        </div>
                    }
                })
                .collect_view()
        }}
    }
}
