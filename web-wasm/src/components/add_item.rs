//! 項目追加フォーム

use crate::app::apply_session;
use crate::browser::notify;
use fai_common::InspectionSession;
use leptos::prelude::*;

#[component]
pub fn AddItemForm(session: RwSignal<InspectionSession>) -> impl IntoView {
    let sections = session.with_untracked(|s| s.sections().to_vec());
    let new_section = RwSignal::new(sections.first().cloned().unwrap_or_default());
    let new_item = RwSignal::new(String::new());
    let new_checkpoint = RwSignal::new(String::new());

    let on_add = move |_| {
        let section = new_section.get_untracked();
        let item = new_item.get_untracked();
        let checkpoint = new_checkpoint.get_untracked();
        if apply_session(session, "Add item", |s| s.add_item(&section, &item, &checkpoint)).is_some() {
            new_item.set(String::new());
            new_checkpoint.set(String::new());
            notify(&format!("Added new inspection item under {}", section));
        }
    };

    view! {
        <div class="add-item">
            <h3>"Add inspection item"</h3>
            <div class="add-item-grid">
                <select on:change=move |ev| new_section.set(event_target_value(&ev))>
                    {sections
                        .into_iter()
                        .map(|name| {
                            let current = name.clone();
                            let value = name.clone();
                            view! {
                                <option value=value selected=move || new_section.get() == current>
                                    {name}
                                </option>
                            }
                        })
                        .collect_view()}
                </select>
                <input
                    type="text"
                    placeholder="Item"
                    prop:value=move || new_item.get()
                    on:input=move |ev| new_item.set(event_target_value(&ev))
                />
                <input
                    type="text"
                    placeholder="Checkpoint"
                    prop:value=move || new_checkpoint.get()
                    on:input=move |ev| new_checkpoint.set(event_target_value(&ev))
                />
                <button class="btn btn-primary" on:click=on_add>
                    "Add"
                </button>
            </div>
        </div>
    }
}
