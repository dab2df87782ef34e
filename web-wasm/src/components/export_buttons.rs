//! 操作ボタン（折りたたみ・リセット・PDF/CSV出力）

use crate::browser::{confirm, download_bytes, notify_error, today};
use fai_common::export::{csv_filename, pdf_filename, render_pdf, render_session_csv, CSV_MIME, PDF_MIME};
use fai_common::{ExportScope, InspectionSession, PhotoStore};
use leptos::prelude::*;
use std::collections::HashSet;

#[component]
pub fn ExportButtons(
    session: RwSignal<InspectionSession>,
    photos: RwSignal<PhotoStore>,
    collapsed: RwSignal<HashSet<String>>,
) -> impl IntoView {
    let on_collapse_all = move |_| {
        let names = session.with_untracked(|s| {
            s.visible_sections()
                .into_iter()
                .map(|group| group.section)
                .collect::<HashSet<_>>()
        });
        collapsed.set(names);
    };

    let on_expand_all = move |_| collapsed.update(|c| c.clear());

    let on_reset = move |_| {
        if confirm("Reset all results and remove added items?") {
            session.update(|s| s.reset());
        }
    };

    view! {
        <div class="export-buttons">
            <button class="btn btn-tertiary" on:click=on_collapse_all>"Collapse all"</button>
            <button class="btn btn-tertiary" on:click=on_expand_all>"Expand all"</button>
            <button class="btn btn-tertiary" on:click=on_reset>"Reset"</button>
            <button class="btn btn-primary" on:click=move |_| export_pdf(session, photos)>
                "Export PDF"
            </button>
            <button
                class="btn btn-secondary"
                on:click=move |_| export_csv(session, ExportScope::Visible)
            >
                "Export CSV"
            </button>
            <button
                class="btn btn-secondary"
                on:click=move |_| export_csv(session, ExportScope::All)
            >
                "Export CSV (all items)"
            </button>
        </div>
    }
}

fn export_pdf(session: RwSignal<InspectionSession>, photos: RwSignal<PhotoStore>) {
    let rendered = session.with_untracked(|s| {
        photos.with_untracked(|store| {
            render_pdf(s, store, ExportScope::Visible).map(|bytes| (bytes, pdf_filename(&s.header)))
        })
    });
    match rendered {
        Ok((bytes, file_name)) => deliver(&bytes, &file_name, PDF_MIME),
        Err(err) => notify_error("PDF export failed", &err),
    }
}

fn export_csv(session: RwSignal<InspectionSession>, scope: ExportScope) {
    let rendered = session.with_untracked(|s| {
        render_session_csv(s, scope).map(|bytes| (bytes, csv_filename(&s.header, scope, today())))
    });
    match rendered {
        Ok((bytes, file_name)) => deliver(&bytes, &file_name, CSV_MIME),
        Err(err) => notify_error("CSV export failed", &err),
    }
}

fn deliver(bytes: &[u8], file_name: &str, mime: &str) {
    if let Err(err) = download_bytes(bytes, file_name, mime) {
        let message = err.as_string().unwrap_or_else(|| format!("{:?}", err));
        notify_error("Download failed", &message);
    }
}
