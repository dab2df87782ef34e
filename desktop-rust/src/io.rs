use anyhow::{Context, Result};
use fai_common::ChecklistConfig;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

const CONFIG_DIR: &str = "fai-checklist";
const CONFIG_FILE: &str = "checklist.json";

/// ユーザー設定のチェックリスト（<config_dir>/fai-checklist/checklist.json）
pub fn config_override_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE))
}

pub fn read_config(path: &Path) -> Result<ChecklistConfig> {
    ChecklistConfig::from_file(path).with_context(|| format!("load checklist {}", path.display()))
}

/// 上書き設定があれば読み込み、なければ埋め込みの既定値を使う
pub fn load_config(override_path: Option<&Path>) -> ChecklistConfig {
    let Some(path) = override_path.filter(|p| p.exists()) else {
        return ChecklistConfig::default();
    };
    match read_config(path) {
        Ok(config) => {
            info!(path = %path.display(), items = config.items.len(), "checklist override loaded");
            config
        }
        Err(err) => {
            warn!(error = format!("{err:#}"), "checklist override ignored");
            ChecklistConfig::default()
        }
    }
}

/// 写真ファイルを読み込む（ファイル名, バイト列）
pub fn read_photo(path: &Path) -> Result<(String, Vec<u8>)> {
    let data = fs::read(path).with_context(|| format!("read {}", path.display()))?;
    let file_name = path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("photo")
        .to_string();
    Ok((file_name, data))
}

/// 生成済みのバイト列を書き出す
pub fn write_export(path: &Path, bytes: &[u8]) -> Result<()> {
    fs::write(path, bytes).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}
