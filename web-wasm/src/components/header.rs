//! ヘッダーコンポーネント（タイトル・検査情報・集計・サイズ/市場）

use crate::browser::notify_error;
use crate::view_state::{status_class, summary_badges};
use fai_common::{HeaderMetadata, InspectionSession, Market, ResultStatus, TvSize};
use leptos::prelude::*;

#[component]
pub fn Header(session: RwSignal<InspectionSession>) -> impl IntoView {
    let report_title = move || session.with(|s| s.title().to_string());

    view! {
        <header class="header">
            <h1>"FAI Inspection Checklist"</h1>
            <p class="text-muted">{report_title}</p>
        </header>
    }
}

/// 自由入力のヘッダ項目
#[derive(Debug, Clone, Copy)]
enum HeaderField {
    Model,
    Serial,
    MfgDate,
    InspDate,
}

impl HeaderField {
    const ALL: [HeaderField; 4] = [
        HeaderField::Model,
        HeaderField::Serial,
        HeaderField::MfgDate,
        HeaderField::InspDate,
    ];

    fn label(self) -> &'static str {
        match self {
            HeaderField::Model => "Model #",
            HeaderField::Serial => "Serial",
            HeaderField::MfgDate => "Mfg date",
            HeaderField::InspDate => "Insp date",
        }
    }

    fn value(self, header: &HeaderMetadata) -> &str {
        match self {
            HeaderField::Model => &header.model,
            HeaderField::Serial => &header.serial,
            HeaderField::MfgDate => &header.mfg_date,
            HeaderField::InspDate => &header.insp_date,
        }
    }

    fn slot(self, header: &mut HeaderMetadata) -> &mut String {
        match self {
            HeaderField::Model => &mut header.model,
            HeaderField::Serial => &mut header.serial,
            HeaderField::MfgDate => &mut header.mfg_date,
            HeaderField::InspDate => &mut header.insp_date,
        }
    }
}

#[component]
fn TextField(field: HeaderField, session: RwSignal<InspectionSession>) -> impl IntoView {
    view! {
        <div class="form-group">
            <label>{field.label()}</label>
            <input
                type="text"
                prop:value=move || session.with(|s| field.value(&s.header).to_string())
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    session.update(|s| *field.slot(&mut s.header) = value);
                }
            />
        </div>
    }
}

#[component]
pub fn HeaderForm(session: RwSignal<InspectionSession>) -> impl IntoView {
    let overall = move || session.with(|s| s.header.overall);

    view! {
        <div class="header-panel">
            <div class="header-fields">
                {HeaderField::ALL
                    .into_iter()
                    .map(|field| view! { <TextField field=field session=session /> })
                    .collect_view()}
                <div class="form-group">
                    <label>"Overall"</label>
                    <select
                        class=move || status_class(overall())
                        on:change=move |ev| {
                            match event_target_value(&ev).parse::<ResultStatus>() {
                                Ok(status) => session.update(|s| s.set_overall(status)),
                                Err(err) => notify_error("Overall", &err),
                            }
                        }
                    >
                        {ResultStatus::OVERALL_CHOICES
                            .into_iter()
                            .map(|status| {
                                view! {
                                    <option
                                        value=status.label()
                                        selected=move || overall() == status
                                    >
                                        {status.label()}
                                    </option>
                                }
                            })
                            .collect_view()}
                    </select>
                </div>
            </div>

            <div class="summary-badges">
                {move || {
                    let tally = session.with(|s| s.overall_tally());
                    summary_badges(&tally)
                        .into_iter()
                        .map(|badge| view! { <div class=badge.class>{badge.text}</div> })
                        .collect_view()
                }}
            </div>
        </div>
    }
}

#[component]
pub fn SizeMarketPanel(session: RwSignal<InspectionSession>) -> impl IntoView {
    let size = move || session.with(|s| s.header.size);
    let market = move || session.with(|s| s.header.market);

    view! {
        <div class="settings-grid">
            <div class="form-group">
                <label>"TV size"</label>
                <select on:change=move |ev| {
                    match event_target_value(&ev).parse::<TvSize>() {
                        Ok(value) => session.update(|s| s.set_size(value)),
                        Err(err) => notify_error("TV size", &err),
                    }
                }>
                    {TvSize::ALL
                        .into_iter()
                        .map(|value| {
                            view! {
                                <option value=value.label() selected=move || size() == value>
                                    {value.label()}
                                </option>
                            }
                        })
                        .collect_view()}
                </select>
            </div>
            <div class="form-group">
                <label>"Market"</label>
                <select on:change=move |ev| {
                    match event_target_value(&ev).parse::<Market>() {
                        Ok(value) => session.update(|s| s.set_market(value)),
                        Err(err) => notify_error("Market", &err),
                    }
                }>
                    {Market::ALL
                        .into_iter()
                        .map(|value| {
                            view! {
                                <option value=value.code() selected=move || market() == value>
                                    {value.code()}
                                </option>
                            }
                        })
                        .collect_view()}
                </select>
            </div>
        </div>
    }
}
