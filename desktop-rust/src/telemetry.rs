//! ログ出力の初期化

use anyhow::{anyhow, Context, Result};
use tracing::warn;
use tracing_subscriber::EnvFilter;

/// ログレベルを指定する環境変数（EnvFilter 構文）
pub const LOG_ENV: &str = "FAI_LOG";
const DEFAULT_FILTER: &str = "info";

/// FAI_LOG の値からフィルタを作る。未設定・空なら info
pub fn build_filter(value: Option<&str>) -> Result<EnvFilter> {
    let value = value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(DEFAULT_FILTER);
    EnvFilter::try_new(value).with_context(|| format!("invalid {LOG_ENV} filter '{value}'"))
}

/// 不正な FAI_LOG は既定のフィルタに置き換えて起動を続ける
pub fn init() -> Result<()> {
    let configured = std::env::var(LOG_ENV).ok();
    let (filter, rejected) = match build_filter(configured.as_deref()) {
        Ok(filter) => (filter, None),
        Err(err) => (EnvFilter::new(DEFAULT_FILTER), Some(err)),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|err| anyhow!("log subscriber already set: {err}"))?;

    if let Some(err) = rejected {
        warn!(error = %format!("{err:#}"), "using default log filter");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::filter::LevelFilter;

    #[test]
    fn test_unset_or_blank_filter_defaults_to_info() {
        for value in [None, Some(""), Some("  ")] {
            let filter = build_filter(value).expect("default filter");
            assert_eq!(filter.max_level_hint(), Some(LevelFilter::INFO));
        }
    }

    #[test]
    fn test_directive_filter_is_accepted() {
        let filter = build_filter(Some("fai_common=debug,warn")).unwrap();
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::DEBUG));
    }

    #[test]
    fn test_invalid_filter_names_variable_and_value() {
        let err = build_filter(Some("fai_common=loud")).unwrap_err();
        let message = format!("{err:#}");
        assert!(message.contains(LOG_ENV));
        assert!(message.contains("fai_common=loud"));
    }
}
