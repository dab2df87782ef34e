//! Export core modules shared across web and desktop clients.
//!
//! どちらの形式もメモリ上で完成したバイト列を返す。失敗時はファイルを作らない。

pub mod csv_core;

#[cfg(feature = "pdf")]
pub mod pdf_core;

use crate::error::Result;
use crate::photo::PhotoStore;
use crate::session::{ExportScope, InspectionSession};
use crate::types::HeaderMetadata;
use chrono::NaiveDate;

pub use csv_core::{render_csv, render_session_csv, write_csv, CSV_HEADERS, CSV_MIME};

pub const PDF_MIME: &str = "application/pdf";

/// ファイル名に使えない文字を除去（最大40文字、空なら "NA"）
pub fn sanitize_name(value: &str) -> String {
    let cleaned: String = value
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
        .take(40)
        .collect();
    if cleaned.is_empty() {
        "NA".to_string()
    } else {
        cleaned
    }
}

/// CSVファイル名: FAI_<model>_<serial>_<size>_<market|ALL>_<YYYY-MM-DD>.csv
pub fn csv_filename(header: &HeaderMetadata, scope: ExportScope, date: NaiveDate) -> String {
    let market = match scope {
        ExportScope::Visible => sanitize_name(header.market.code()),
        ExportScope::All => "ALL".to_string(),
    };
    format!(
        "FAI_{}_{}_{}_{}_{}.csv",
        sanitize_name(&header.model),
        sanitize_name(&header.serial),
        sanitize_name(header.size.label()),
        market,
        date.format("%Y-%m-%d"),
    )
}

/// PDFファイル名: FAI_<model>_<serial>.pdf
pub fn pdf_filename(header: &HeaderMetadata) -> String {
    format!(
        "FAI_{}_{}.pdf",
        sanitize_name(&header.model),
        sanitize_name(&header.serial)
    )
}

/// PDFを生成してバイト列を返す
#[cfg(feature = "pdf")]
pub fn render_pdf(session: &InspectionSession, photos: &PhotoStore, scope: ExportScope) -> Result<Vec<u8>> {
    pdf_core::render_pdf(session, photos, scope)
}

/// PDFエンジンなしでビルドされた場合
#[cfg(not(feature = "pdf"))]
pub fn render_pdf(_session: &InspectionSession, _photos: &PhotoStore, _scope: ExportScope) -> Result<Vec<u8>> {
    tracing::warn!("pdf export requested but the pdf feature is disabled");
    Err(crate::error::Error::PdfUnavailable)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Market, TvSize};

    #[test]
    fn test_sanitize_name_strips_and_truncates() {
        assert_eq!(sanitize_name("65R6A5 / rev.B"), "65R6A5revB");
        assert_eq!(sanitize_name("x_Y-1"), "x_Y-1");
        assert_eq!(sanitize_name(&"a".repeat(60)).len(), 40);
    }

    #[test]
    fn test_sanitize_name_placeholder() {
        assert_eq!(sanitize_name(""), "NA");
        assert_eq!(sanitize_name("日本語 !!"), "NA");
    }

    #[test]
    fn test_csv_filename() {
        let header = HeaderMetadata {
            model: "55R6A5".to_string(),
            serial: "X00 1".to_string(),
            size: TvSize::In55,
            market: Market::Ca,
            ..Default::default()
        };
        let date = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        assert_eq!(
            csv_filename(&header, ExportScope::Visible, date),
            "FAI_55R6A5_X001_55in_CA_2026-10-18.csv"
        );
        assert_eq!(
            csv_filename(&header, ExportScope::All, date),
            "FAI_55R6A5_X001_55in_ALL_2026-10-18.csv"
        );
    }

    #[test]
    fn test_pdf_filename_defaults() {
        assert_eq!(pdf_filename(&HeaderMetadata::default()), "FAI_NA_NA.pdf");
    }
}
