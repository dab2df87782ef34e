use chrono::NaiveDate;
use fai_common::export::{csv_filename, pdf_filename, render_session_csv, CSV_MIME, PDF_MIME};
use fai_common::{render_pdf, ChecklistConfig, ExportScope, InspectionSession, PhotoStore};
use std::collections::HashSet;

/// 出力の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    Pdf,
    Csv,
    CsvAll,
}

impl ExportKind {
    pub const ALL: [ExportKind; 3] = [ExportKind::Pdf, ExportKind::Csv, ExportKind::CsvAll];

    pub fn label(self) -> &'static str {
        match self {
            ExportKind::Pdf => "Export PDF",
            ExportKind::Csv => "Export CSV",
            ExportKind::CsvAll => "Export CSV (all items)",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ExportKind::Pdf => "pdf",
            ExportKind::Csv | ExportKind::CsvAll => "csv",
        }
    }

    pub fn mime(self) -> &'static str {
        match self {
            ExportKind::Pdf => PDF_MIME,
            ExportKind::Csv | ExportKind::CsvAll => CSV_MIME,
        }
    }

    pub fn scope(self) -> ExportScope {
        match self {
            ExportKind::CsvAll => ExportScope::All,
            ExportKind::Pdf | ExportKind::Csv => ExportScope::Visible,
        }
    }

    pub fn file_name(self, session: &InspectionSession, date: NaiveDate) -> String {
        match self {
            ExportKind::Pdf => pdf_filename(&session.header),
            ExportKind::Csv | ExportKind::CsvAll => csv_filename(&session.header, self.scope(), date),
        }
    }

    /// 書き出す前にメモリ上で完成させる
    pub fn render(self, session: &InspectionSession, photos: &PhotoStore) -> fai_common::Result<Vec<u8>> {
        match self {
            ExportKind::Pdf => render_pdf(session, photos, self.scope()),
            ExportKind::Csv | ExportKind::CsvAll => render_session_csv(session, self.scope()),
        }
    }
}

/// 項目追加フォームの入力
#[derive(Debug, Clone, Default)]
pub struct NewItemDraft {
    pub section: String,
    pub item: String,
    pub checkpoint: String,
}

#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub session: InspectionSession,
    pub photos: PhotoStore,
    pub collapsed: HashSet<String>,
    pub draft: NewItemDraft,
}

impl AppState {
    pub fn new(config: ChecklistConfig) -> Self {
        let session = InspectionSession::new(config);
        let draft = NewItemDraft {
            section: session.sections().first().cloned().unwrap_or_default(),
            ..Default::default()
        };
        Self {
            session,
            photos: PhotoStore::new(),
            collapsed: HashSet::new(),
            draft,
        }
    }

    /// フォームの内容で項目を追加し、成功したら入力欄を空にする
    pub fn submit_draft(&mut self) -> fai_common::Result<u32> {
        let id = self
            .session
            .add_item(&self.draft.section, &self.draft.item, &self.draft.checkpoint)?;
        self.draft.item.clear();
        self.draft.checkpoint.clear();
        Ok(id)
    }

    pub fn collapse_all(&mut self) {
        self.collapsed = self
            .session
            .visible_sections()
            .into_iter()
            .map(|group| group.section)
            .collect();
    }

    pub fn expand_all(&mut self) {
        self.collapsed.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fai_common::{Error, Market};

    #[test]
    fn test_submit_draft_clears_inputs_on_success() {
        let mut state = AppState::new(ChecklistConfig::default());
        assert_eq!(state.draft.section, "Packaging and Carton");
        state.draft.item = "100. Handle cut-outs".to_string();
        state.draft.checkpoint = "Cut-outs clean, no tearing.".to_string();

        assert_eq!(state.submit_draft().unwrap(), 100);
        assert!(state.draft.item.is_empty());
        assert!(state.draft.checkpoint.is_empty());
        assert_eq!(state.draft.section, "Packaging and Carton");
    }

    #[test]
    fn test_submit_draft_keeps_inputs_on_error() {
        let mut state = AppState::new(ChecklistConfig::default());
        state.draft.item = "100. Handle cut-outs".to_string();
        let err = state.submit_draft().unwrap_err();
        assert!(matches!(err, Error::MissingField("checkpoint")));
        assert_eq!(state.draft.item, "100. Handle cut-outs");
        assert_eq!(state.session.entries().len(), 99);
    }

    #[test]
    fn test_collapse_all_follows_market() {
        let mut state = AppState::new(ChecklistConfig::default());
        state.collapse_all();
        assert_eq!(state.collapsed.len(), 6);
        state.session.set_market(Market::Ca);
        state.collapse_all();
        assert_eq!(state.collapsed.len(), 8);
        state.expand_all();
        assert!(state.collapsed.is_empty());
    }

    #[test]
    fn test_export_kind_file_names() {
        let mut session = InspectionSession::default();
        session.header.model = "43R6".to_string();
        session.header.serial = "S/N 77".to_string();
        let date = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();

        assert_eq!(ExportKind::Pdf.file_name(&session, date), "FAI_43R6_SN77.pdf");
        assert_eq!(ExportKind::Csv.file_name(&session, date), "FAI_43R6_SN77_55in_US_2026-01-05.csv");
        assert_eq!(ExportKind::CsvAll.file_name(&session, date), "FAI_43R6_SN77_55in_ALL_2026-01-05.csv");
    }

    #[test]
    fn test_export_kind_render_csv() {
        let state = AppState::new(ChecklistConfig::default());
        let bytes = ExportKind::CsvAll.render(&state.session, &state.photos).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(text.lines().count(), 100);
        assert_eq!(ExportKind::CsvAll.mime(), "text/csv");
    }
}
