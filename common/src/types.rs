//! チェックリストの型定義
//!
//! Web(WASM)とデスクトップで共有される型:
//! - InspectionItem: シードデータの検査項目（不変）
//! - InspectionRecord: 項目ごとの検査結果（可変）
//! - HeaderMetadata: 機種・シリアル・市場などのヘッダ情報

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 検査結果ステータス
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ResultStatus {
    #[default]
    #[serde(rename = "")]
    Unset,
    #[serde(rename = "PASS")]
    Pass,
    #[serde(rename = "FAIL")]
    Fail,
    #[serde(rename = "CONDITIONAL APPROVAL")]
    ConditionalApproval,
    #[serde(rename = "N/A")]
    NotApplicable,
}

impl ResultStatus {
    /// 行ごとの選択肢（未設定を含む）
    pub const ALL: [ResultStatus; 5] = [
        ResultStatus::Unset,
        ResultStatus::Pass,
        ResultStatus::Fail,
        ResultStatus::ConditionalApproval,
        ResultStatus::NotApplicable,
    ];

    /// 総合判定の選択肢
    pub const OVERALL_CHOICES: [ResultStatus; 3] = [
        ResultStatus::Pass,
        ResultStatus::Fail,
        ResultStatus::ConditionalApproval,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ResultStatus::Unset => "",
            ResultStatus::Pass => "PASS",
            ResultStatus::Fail => "FAIL",
            ResultStatus::ConditionalApproval => "CONDITIONAL APPROVAL",
            ResultStatus::NotApplicable => "N/A",
        }
    }

    pub fn is_set(&self) -> bool {
        !matches!(self, ResultStatus::Unset)
    }
}

impl fmt::Display for ResultStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ResultStatus {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "" => Ok(ResultStatus::Unset),
            "PASS" => Ok(ResultStatus::Pass),
            "FAIL" => Ok(ResultStatus::Fail),
            "CONDITIONAL APPROVAL" | "CONDITIONAL" => Ok(ResultStatus::ConditionalApproval),
            "N/A" | "NA" => Ok(ResultStatus::NotApplicable),
            _ => Err(Error::InvalidStatus(value.to_string())),
        }
    }
}

/// 出荷先市場
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Market {
    #[default]
    #[serde(rename = "US")]
    Us,
    #[serde(rename = "CA")]
    Ca,
    #[serde(rename = "MX")]
    Mx,
}

impl Market {
    pub const ALL: [Market; 3] = [Market::Us, Market::Ca, Market::Mx];

    pub fn code(&self) -> &'static str {
        match self {
            Market::Us => "US",
            Market::Ca => "CA",
            Market::Mx => "MX",
        }
    }
}

impl fmt::Display for Market {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Market {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        Market::ALL
            .into_iter()
            .find(|m| m.code().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| Error::InvalidMarket(value.to_string()))
    }
}

/// TVサイズ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TvSize {
    #[serde(rename = "24in")]
    In24,
    #[serde(rename = "32in")]
    In32,
    #[serde(rename = "40in")]
    In40,
    #[serde(rename = "43in")]
    In43,
    #[serde(rename = "50in")]
    In50,
    #[default]
    #[serde(rename = "55in")]
    In55,
    #[serde(rename = "65in")]
    In65,
    #[serde(rename = "70in")]
    In70,
    #[serde(rename = "75in")]
    In75,
    #[serde(rename = "85in")]
    In85,
}

impl TvSize {
    pub const ALL: [TvSize; 10] = [
        TvSize::In24,
        TvSize::In32,
        TvSize::In40,
        TvSize::In43,
        TvSize::In50,
        TvSize::In55,
        TvSize::In65,
        TvSize::In70,
        TvSize::In75,
        TvSize::In85,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            TvSize::In24 => "24in",
            TvSize::In32 => "32in",
            TvSize::In40 => "40in",
            TvSize::In43 => "43in",
            TvSize::In50 => "50in",
            TvSize::In55 => "55in",
            TvSize::In65 => "65in",
            TvSize::In70 => "70in",
            TvSize::In75 => "75in",
            TvSize::In85 => "85in",
        }
    }
}

impl fmt::Display for TvSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TvSize {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        TvSize::ALL
            .into_iter()
            .find(|s| s.label().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| Error::InvalidSize(value.to_string()))
    }
}

/// 検査項目（シードデータ、不変）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InspectionItem {
    /// 連番（1始まり）
    pub id: u32,
    pub section: String,
    pub item: String,
    pub checkpoint: String,
}

/// 検査結果（項目ごとに1件）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InspectionRecord {
    pub item_id: u32,
    #[serde(default)]
    pub status: ResultStatus,
    /// JIRAなどの課題トラッカーID
    #[serde(default)]
    pub tracking_ref: String,
    #[serde(default)]
    pub note: String,
}

impl InspectionRecord {
    pub fn unset(item_id: u32) -> Self {
        Self {
            item_id,
            status: ResultStatus::Unset,
            tracking_ref: String::new(),
            note: String::new(),
        }
    }

    pub fn apply(&mut self, patch: RecordPatch) {
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(tracking_ref) = patch.tracking_ref {
            self.tracking_ref = tracking_ref;
        }
        if let Some(note) = patch.note {
            self.note = note;
        }
    }
}

/// 項目と結果のペア
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistEntry {
    pub item: InspectionItem,
    pub record: InspectionRecord,
}

impl ChecklistEntry {
    pub fn new(item: InspectionItem) -> Self {
        let record = InspectionRecord::unset(item.id);
        Self { item, record }
    }

    pub fn id(&self) -> u32 {
        self.item.id
    }

    pub fn section(&self) -> &str {
        &self.item.section
    }

    pub fn status(&self) -> ResultStatus {
        self.record.status
    }
}

/// 結果の部分更新
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordPatch {
    pub status: Option<ResultStatus>,
    pub tracking_ref: Option<String>,
    pub note: Option<String>,
}

impl RecordPatch {
    pub fn status(status: ResultStatus) -> Self {
        Self { status: Some(status), ..Default::default() }
    }

    pub fn note(note: impl Into<String>) -> Self {
        Self { note: Some(note.into()), ..Default::default() }
    }

    pub fn tracking_ref(tracking_ref: impl Into<String>) -> Self {
        Self { tracking_ref: Some(tracking_ref.into()), ..Default::default() }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub fn with_tracking_ref(mut self, tracking_ref: impl Into<String>) -> Self {
        self.tracking_ref = Some(tracking_ref.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.tracking_ref.is_none() && self.note.is_none()
    }
}

/// 検査ヘッダ情報
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HeaderMetadata {
    pub model: String,
    pub serial: String,
    /// 製造日
    pub mfg_date: String,
    /// 検査日
    pub insp_date: String,
    /// 総合判定
    pub overall: ResultStatus,
    pub size: TvSize,
    pub market: Market,
}

impl Default for HeaderMetadata {
    fn default() -> Self {
        Self {
            model: String::new(),
            serial: String::new(),
            mfg_date: String::new(),
            insp_date: String::new(),
            overall: ResultStatus::Pass,
            size: TvSize::default(),
            market: Market::default(),
        }
    }
}

impl HeaderMetadata {
    /// 1行のメタ情報（PDF用）
    pub fn summary_line(&self) -> String {
        format!(
            "Model: {} | Serial: {} | Mfg: {} | Insp: {} | Size: {} | Market: {} | Overall: {}",
            or_dash(&self.model),
            or_dash(&self.serial),
            or_dash(&self.mfg_date),
            or_dash(&self.insp_date),
            self.size,
            self.market,
            or_dash(self.overall.label()),
        )
    }
}

fn or_dash(value: &str) -> &str {
    if value.trim().is_empty() { "-" } else { value }
}
