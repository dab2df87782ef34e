//! FAI Checklist Common Library
//!
//! Web(WASM)とデスクトップで共有されるチェックリストのコア

pub mod config;
pub mod error;
pub mod export;
pub mod layout;
pub mod market;
pub mod photo;
pub mod session;
pub mod tally;
pub mod types;

pub use config::{ChecklistConfig, SeedItem, DEFAULT_CHECKLIST_JSON};
pub use error::{Error, Result};
pub use export::{csv_filename, pdf_filename, render_pdf, render_session_csv, sanitize_name};
pub use market::{filter_for_market, sections_in_order, SectionGroup};
pub use photo::{PhotoAttachment, PhotoStore, PhotoUpload};
pub use session::{ExportScope, InspectionSession};
pub use tally::{SectionTally, Tally};
pub use types::{
    ChecklistEntry, HeaderMetadata, InspectionItem, InspectionRecord, Market, RecordPatch,
    ResultStatus, TvSize,
};
