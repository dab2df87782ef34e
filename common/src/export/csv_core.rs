//! CSV出力（共通ライブラリ）
//!
//! ヘッダ行 + 1項目1行。ヘッダ情報は各行に繰り返す。

use crate::error::Result;
use crate::session::{ExportScope, InspectionSession};
use crate::types::{ChecklistEntry, HeaderMetadata};
use serde::Serialize;
use std::io::Write;
use tracing::info;

pub const CSV_MIME: &str = "text/csv";

pub const CSV_HEADERS: [&str; 11] = [
    "model",
    "serial",
    "mfg",
    "insp",
    "overall",
    "section",
    "item",
    "checkpoint",
    "result",
    "note",
    "jira",
];

#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    model: &'a str,
    serial: &'a str,
    mfg: &'a str,
    insp: &'a str,
    overall: &'a str,
    section: &'a str,
    item: &'a str,
    checkpoint: &'a str,
    result: &'a str,
    note: &'a str,
    jira: &'a str,
}

/// CSVを書き込み、データ行数を返す
pub fn write_csv<'a, W, I>(writer: W, header: &HeaderMetadata, entries: I) -> Result<usize>
where
    W: Write,
    I: IntoIterator<Item = &'a ChecklistEntry>,
{
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .quote_style(csv::QuoteStyle::Always)
        .from_writer(writer);
    csv_writer.write_record(CSV_HEADERS)?;

    let mut rows = 0;
    for entry in entries {
        csv_writer.serialize(CsvRow {
            model: &header.model,
            serial: &header.serial,
            mfg: &header.mfg_date,
            insp: &header.insp_date,
            overall: header.overall.label(),
            section: &entry.item.section,
            item: &entry.item.item,
            checkpoint: &entry.item.checkpoint,
            result: entry.record.status.label(),
            note: &entry.record.note,
            jira: &entry.record.tracking_ref,
        })?;
        rows += 1;
    }
    csv_writer.flush()?;
    Ok(rows)
}

/// CSVをバッファに生成
pub fn render_csv<'a, I>(header: &HeaderMetadata, entries: I) -> Result<Vec<u8>>
where
    I: IntoIterator<Item = &'a ChecklistEntry>,
{
    let mut buffer = Vec::new();
    let rows = write_csv(&mut buffer, header, entries)?;
    info!(rows, bytes = buffer.len(), "csv rendered");
    Ok(buffer)
}

/// セッションから出力範囲を選んでCSVを生成
pub fn render_session_csv(session: &InspectionSession, scope: ExportScope) -> Result<Vec<u8>> {
    render_csv(&session.header, session.entries_for(scope))
}
