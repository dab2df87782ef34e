//! チェックリスト設定
//!
//! シードデータ（99項目）とセクション一覧、レポートタイトルを保持する。
//! 既定値は `assets/checklist.json` をバイナリに埋め込んで使用する。

use crate::error::{Error, Result};
use crate::types::{ChecklistEntry, InspectionItem};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_CHECKLIST_JSON: &str = include_str!("../assets/checklist.json");

/// シード項目（id・結果なし）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedItem {
    pub section: String,
    pub item: String,
    pub checkpoint: String,
}

/// チェックリスト設定
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistConfig {
    /// PDFタイトル
    #[serde(default = "default_title")]
    pub title: String,
    /// 表示順のセクション一覧（項目追加時の選択肢）
    #[serde(default)]
    pub sections: Vec<String>,
    pub items: Vec<SeedItem>,
}

fn default_title() -> String {
    "FAI Report".to_string()
}

impl Default for ChecklistConfig {
    fn default() -> Self {
        Self::from_json(DEFAULT_CHECKLIST_JSON).unwrap_or_else(|_| Self {
            title: default_title(),
            sections: Vec::new(),
            items: Vec::new(),
        })
    }
}

impl ChecklistConfig {
    /// JSON文字列から読み込み
    pub fn from_json(json: &str) -> Result<Self> {
        let mut config: Self = serde_json::from_str(json)?;
        config.normalize()?;
        Ok(config)
    }

    /// JSONファイルから読み込み
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// セクション一覧を補完し、項目の整合性を確認
    fn normalize(&mut self) -> Result<()> {
        for (index, seed) in self.items.iter().enumerate() {
            if seed.section.trim().is_empty() {
                return Err(Error::Config(format!("item {} has no section", index + 1)));
            }
            if !self.sections.iter().any(|s| s == &seed.section) {
                self.sections.push(seed.section.clone());
            }
        }
        Ok(())
    }

    /// シードデータから項目と未設定の結果を生成
    pub fn seed_entries(&self) -> Vec<ChecklistEntry> {
        self.items
            .iter()
            .enumerate()
            .map(|(index, seed)| {
                ChecklistEntry::new(InspectionItem {
                    id: index as u32 + 1,
                    section: seed.section.clone(),
                    item: seed.item.clone(),
                    checkpoint: seed.checkpoint.clone(),
                })
            })
            .collect()
    }

    pub fn has_section(&self, section: &str) -> bool {
        self.sections.iter().any(|s| s == section)
    }
}
