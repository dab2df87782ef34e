//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Please fill {0}")]
    MissingField(&'static str),

    #[error("Unknown checklist item: {0}")]
    UnknownItem(u32),

    #[error("Unknown section: {0}")]
    UnknownSection(String),

    #[error("Invalid result status: {0}")]
    InvalidStatus(String),

    #[error("Invalid market: {0}")]
    InvalidMarket(String),

    #[error("Invalid TV size: {0}")]
    InvalidSize(String),

    #[error("Photo could not be read: {0}")]
    PhotoDecode(String),

    #[error("PDF engine not available in this build")]
    PdfUnavailable,

    #[error("PDF generation failed: {0}")]
    PdfRender(String),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_io() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error = Error::Io(io_error);
        let display = format!("{}", error);
        assert!(display.contains("IO error"));
        assert!(display.contains("file not found"));
    }

    #[test]
    fn test_error_display_json() {
        let json_error = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let error = Error::Json(json_error);
        assert!(format!("{}", error).contains("JSON error"));
    }

    #[test]
    fn test_error_display_missing_field() {
        let error = Error::MissingField("checkpoint");
        assert_eq!(format!("{}", error), "Please fill checkpoint");
    }

    #[test]
    fn test_error_display_unknown_item() {
        let error = Error::UnknownItem(120);
        assert_eq!(format!("{}", error), "Unknown checklist item: 120");
    }

    #[test]
    fn test_error_display_pdf_unavailable() {
        let display = format!("{}", Error::PdfUnavailable);
        assert!(display.contains("PDF engine"));
    }

    #[test]
    fn test_error_from_io() {
        let io_error = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let error: Error = io_error.into();
        assert!(matches!(error, Error::Io(_)));
    }

    #[test]
    fn test_error_from_json() {
        let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error: Error = json_error.into();
        assert!(matches!(error, Error::Json(_)));
    }

    #[test]
    fn test_error_debug() {
        let error = Error::UnknownSection("Cosmetic".to_string());
        let debug = format!("{:?}", error);
        assert!(debug.contains("UnknownSection"));
        assert!(debug.contains("Cosmetic"));
    }
}
