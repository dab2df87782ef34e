//! チェックリスト表（セクション見出し・一括操作・項目行）

use crate::app::apply_session;
use crate::view_state::{section_badges, status_class, status_option_text, toggle_collapsed, toggle_icon};
use fai_common::layout::TABLE_COLUMNS;
use fai_common::{ChecklistEntry, InspectionSession, RecordPatch, ResultStatus, Tally};
use leptos::prelude::*;
use std::collections::HashSet;

#[component]
pub fn ChecklistTable(
    session: RwSignal<InspectionSession>,
    collapsed: RwSignal<HashSet<String>>,
) -> impl IntoView {
    let section_names = move || {
        session.with(|s| {
            s.visible_sections()
                .into_iter()
                .map(|group| group.section)
                .collect::<Vec<_>>()
        })
    };

    view! {
        <div class="checklist">
            <div class="checklist-head">
                {TABLE_COLUMNS
                    .iter()
                    .map(|column| view! { <div class="hdr">{column.label}</div> })
                    .collect_view()}
            </div>
            <For
                each=section_names
                key=|name| name.clone()
                children=move |name| {
                    view! { <ChecklistSection section=name session=session collapsed=collapsed /> }
                }
            />
        </div>
    }
}

#[component]
fn ChecklistSection(
    section: String,
    session: RwSignal<InspectionSession>,
    collapsed: RwSignal<HashSet<String>>,
) -> impl IntoView {
    let is_collapsed = {
        let section = section.clone();
        move || collapsed.with(|c| c.contains(&section))
    };

    let row_ids = {
        let section = section.clone();
        move || {
            session.with(|s| {
                s.visible_entries()
                    .into_iter()
                    .filter(|entry| entry.section() == section)
                    .map(ChecklistEntry::id)
                    .collect::<Vec<_>>()
            })
        }
    };

    let badges = {
        let section = section.clone();
        move || {
            let tally = session.with(|s| {
                Tally::of_entries(
                    s.visible_entries()
                        .into_iter()
                        .filter(|entry| entry.section() == section),
                )
            });
            section_badges(&tally)
                .into_iter()
                .map(|badge| view! { <div class=badge.class>{badge.text}</div> })
                .collect_view()
        }
    };

    let bulk_button = {
        let section = section.clone();
        move |label: &'static str, status: ResultStatus| {
            let section = section.clone();
            view! {
                <button
                    class="btn btn-small btn-secondary"
                    on:click=move |_| {
                        session.update(|s| {
                            s.set_section_status(&section, status);
                        })
                    }
                >
                    {label}
                </button>
            }
        }
    };

    let on_toggle = {
        let section = section.clone();
        move |_| {
            collapsed.update(|c| {
                toggle_collapsed(c, &section);
            })
        }
    };

    let heading = {
        let is_collapsed = is_collapsed.clone();
        let section = section.clone();
        move || format!("{} {}", toggle_icon(is_collapsed()), section)
    };

    view! {
        <div class="section">
            <div class="section-head">
                <button class="section-toggle" on:click=on_toggle>
                    {heading}
                </button>
                <div class="section-actions">
                    {badges}
                    {bulk_button("All PASS", ResultStatus::Pass)}
                    {bulk_button("All FAIL", ResultStatus::Fail)}
                    {bulk_button("Clear", ResultStatus::Unset)}
                </div>
            </div>
            <div class="section-rows" class:hidden=is_collapsed>
                <For
                    each=row_ids
                    key=|id| *id
                    children=move |id| view! { <ItemRow id=id session=session /> }
                />
            </div>
        </div>
    }
}

#[component]
fn ItemRow(id: u32, session: RwSignal<InspectionSession>) -> impl IntoView {
    let text = move |pick: fn(&ChecklistEntry) -> String| {
        session.with(|s| s.entry(id).map(pick).unwrap_or_default())
    };
    let status = move || {
        session.with(|s| s.entry(id).map(ChecklistEntry::status).unwrap_or_default())
    };

    view! {
        <div class="row">
            <div class="cell">{move || text(|e| e.item.section.clone())}</div>
            <div class="cell">{move || text(|e| e.item.item.clone())}</div>
            <div class="cell text-muted">{move || text(|e| e.item.checkpoint.clone())}</div>
            <div class="cell">
                <select
                    class=move || status_class(status())
                    on:change=move |ev| {
                        let value = event_target_value(&ev);
                        apply_session(session, "Result", |s| s.set_status_str(id, &value));
                    }
                >
                    {ResultStatus::ALL
                        .into_iter()
                        .map(|choice| {
                            view! {
                                <option value=choice.label() selected=move || status() == choice>
                                    {status_option_text(choice)}
                                </option>
                            }
                        })
                        .collect_view()}
                </select>
            </div>
            <div class="cell">
                <input
                    type="text"
                    placeholder="JIRA"
                    prop:value=move || text(|e| e.record.tracking_ref.clone())
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        apply_session(session, "JIRA", |s| s.update_record(id, RecordPatch::tracking_ref(value)));
                    }
                />
            </div>
            <div class="cell">
                <textarea
                    rows="1"
                    prop:value=move || text(|e| e.record.note.clone())
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        apply_session(session, "Notes", |s| s.update_record(id, RecordPatch::note(value)));
                    }
                />
            </div>
        </div>
    }
}
