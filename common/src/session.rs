//! 検査セッション
//!
//! ヘッダ情報と全項目・結果を所有し、状態の変更はすべてここを経由する。
//! 集計値はキャッシュせず、呼び出しごとに再計算する。

use crate::config::ChecklistConfig;
use crate::error::{Error, Result};
use crate::market::{filter_for_market, sections_in_order, SectionGroup};
use crate::tally::{section_tallies, SectionTally, Tally};
use crate::types::{
    ChecklistEntry, HeaderMetadata, InspectionItem, Market, RecordPatch, ResultStatus, TvSize,
};
use serde::Serialize;
use tracing::{debug, info, warn};

/// 出力範囲
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportScope {
    /// 市場フィルタ適用後の項目
    #[default]
    Visible,
    /// 市場に関係なく全項目
    All,
}

/// 検査セッション
#[derive(Debug, Clone, Serialize)]
pub struct InspectionSession {
    config: ChecklistConfig,
    pub header: HeaderMetadata,
    entries: Vec<ChecklistEntry>,
}

impl Default for InspectionSession {
    fn default() -> Self {
        Self::new(ChecklistConfig::default())
    }
}

impl InspectionSession {
    pub fn new(config: ChecklistConfig) -> Self {
        let entries = config.seed_entries();
        Self {
            config,
            header: HeaderMetadata::default(),
            entries,
        }
    }

    pub fn config(&self) -> &ChecklistConfig {
        &self.config
    }

    pub fn title(&self) -> &str {
        &self.config.title
    }

    /// 項目追加で選択できるセクション
    pub fn sections(&self) -> &[String] {
        &self.config.sections
    }

    /// 全項目（市場フィルタなし）
    pub fn entries(&self) -> &[ChecklistEntry] {
        &self.entries
    }

    pub fn entry(&self, id: u32) -> Option<&ChecklistEntry> {
        self.entries.iter().find(|entry| entry.id() == id)
    }

    /// 現在の市場で表示される項目
    pub fn visible_entries(&self) -> Vec<&ChecklistEntry> {
        filter_for_market(&self.entries, self.header.market)
    }

    pub fn entries_for(&self, scope: ExportScope) -> Vec<&ChecklistEntry> {
        match scope {
            ExportScope::Visible => self.visible_entries(),
            ExportScope::All => self.entries.iter().collect(),
        }
    }

    pub fn visible_sections(&self) -> Vec<SectionGroup<'_>> {
        sections_in_order(filter_for_market(&self.entries, self.header.market))
    }

    /// 表示中の項目全体の集計
    pub fn overall_tally(&self) -> Tally {
        Tally::of_entries(self.visible_entries())
    }

    pub fn section_tallies(&self) -> Vec<SectionTally> {
        section_tallies(self.visible_entries())
    }

    pub fn set_market(&mut self, market: Market) {
        self.header.market = market;
    }

    pub fn set_size(&mut self, size: TvSize) {
        self.header.size = size;
    }

    pub fn set_overall(&mut self, overall: ResultStatus) {
        self.header.overall = overall;
    }

    /// 1件の結果・JIRA・メモを更新
    pub fn update_record(&mut self, id: u32, patch: RecordPatch) -> Result<()> {
        let entry = self
            .entries
            .iter_mut()
            .find(|entry| entry.id() == id)
            .ok_or(Error::UnknownItem(id))?;
        entry.record.apply(patch);
        Ok(())
    }

    /// 文字列のステータスを検証して適用
    pub fn set_status_str(&mut self, id: u32, status: &str) -> Result<()> {
        let status: ResultStatus = status.parse()?;
        self.update_record(id, RecordPatch::status(status))
    }

    /// セクション内の全項目を同じ結果にする。更新件数を返す
    pub fn set_section_status(&mut self, section: &str, status: ResultStatus) -> usize {
        let mut touched = 0;
        for entry in self.entries.iter_mut().filter(|e| e.item.section == section) {
            entry.record.status = status;
            touched += 1;
        }
        debug!(section, status = status.label(), touched, "section status set");
        touched
    }

    /// セクション内の全項目を未設定に戻す
    pub fn clear_section(&mut self, section: &str) -> usize {
        self.set_section_status(section, ResultStatus::Unset)
    }

    /// 項目を追加し、新しいidを返す
    pub fn add_item(&mut self, section: &str, item: &str, checkpoint: &str) -> Result<u32> {
        let item = item.trim();
        let checkpoint = checkpoint.trim();
        if item.is_empty() {
            warn!(section, "add item rejected: empty item");
            return Err(Error::MissingField("item"));
        }
        if checkpoint.is_empty() {
            warn!(section, "add item rejected: empty checkpoint");
            return Err(Error::MissingField("checkpoint"));
        }
        if !self.config.has_section(section) {
            warn!(section, "add item rejected: unknown section");
            return Err(Error::UnknownSection(section.to_string()));
        }

        let id = self.entries.iter().map(ChecklistEntry::id).max().unwrap_or(0) + 1;
        self.entries.push(ChecklistEntry::new(InspectionItem {
            id,
            section: section.to_string(),
            item: item.to_string(),
            checkpoint: checkpoint.to_string(),
        }));
        info!(id, section, "inspection item added");
        Ok(id)
    }

    /// シードデータに戻す（結果と追加項目を破棄、ヘッダは保持）
    pub fn reset(&mut self) {
        self.entries = self.config.seed_entries();
        info!(items = self.entries.len(), "checklist reset");
    }
}
