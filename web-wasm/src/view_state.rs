//! 画面表示用の純粋な計算（バッジ・折りたたみ・ステータス表示）

use fai_common::{ResultStatus, Tally};
use std::collections::HashSet;

/// 集計バッジ1つ分
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Badge {
    pub text: String,
    pub class: &'static str,
}

impl Badge {
    fn new(text: String, class: &'static str) -> Self {
        Self { text, class }
    }
}

/// ヘッダ右側の集計バッジ（All/Pass/Fail/N/A/Open/Pass%）
pub fn summary_badges(tally: &Tally) -> Vec<Badge> {
    vec![
        Badge::new(format!("All {}", tally.total), "badge"),
        Badge::new(format!("Pass {}", tally.pass), "badge badge-pass"),
        Badge::new(format!("Fail {}", tally.fail), "badge badge-fail"),
        Badge::new(format!("N/A {}", tally.na), "badge badge-na"),
        Badge::new(format!("Open {}", tally.open), "badge badge-open"),
        Badge::new(format!("Pass % {}%", tally.pass_percentage()), "badge badge-pct"),
    ]
}

/// セクション見出しのバッジ
pub fn section_badges(tally: &Tally) -> Vec<Badge> {
    vec![
        Badge::new(format!("All {}", tally.total), "badge"),
        Badge::new(format!("Pass {}", tally.pass), "badge badge-pass"),
        Badge::new(format!("Fail {}", tally.fail), "badge badge-fail"),
    ]
}

/// セレクトボックスに表示する文字
pub fn status_option_text(status: ResultStatus) -> &'static str {
    match status {
        ResultStatus::Unset => "-",
        other => other.label(),
    }
}

/// 結果セルの色分け用クラス
pub fn status_class(status: ResultStatus) -> &'static str {
    match status {
        ResultStatus::Pass => "res res-pass",
        ResultStatus::Fail => "res res-fail",
        ResultStatus::ConditionalApproval => "res res-cond",
        ResultStatus::NotApplicable => "res res-na",
        ResultStatus::Unset => "res",
    }
}

/// セクションの折りたたみを切り替え、切り替え後に折りたたまれているかを返す
pub fn toggle_collapsed(collapsed: &mut HashSet<String>, section: &str) -> bool {
    if collapsed.remove(section) {
        false
    } else {
        collapsed.insert(section.to_string());
        true
    }
}

pub fn toggle_icon(is_collapsed: bool) -> &'static str {
    if is_collapsed { "▶" } else { "▼" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_badges_text() {
        let tally = Tally { total: 92, pass: 3, fail: 1, na: 2, open: 86 };
        let texts: Vec<String> = summary_badges(&tally).into_iter().map(|b| b.text).collect();
        assert_eq!(
            texts,
            vec!["All 92", "Pass 3", "Fail 1", "N/A 2", "Open 86", "Pass % 75%"]
        );
    }

    #[test]
    fn test_section_badges_skip_open_and_pct() {
        let badges = section_badges(&Tally::default());
        assert_eq!(badges.len(), 3);
        assert_eq!(badges[0].text, "All 0");
    }

    #[test]
    fn test_toggle_collapsed_round_trip() {
        let mut collapsed = HashSet::new();
        assert!(toggle_collapsed(&mut collapsed, "Mechanical"));
        assert!(collapsed.contains("Mechanical"));
        assert!(!toggle_collapsed(&mut collapsed, "Mechanical"));
        assert!(collapsed.is_empty());
    }

    #[test]
    fn test_status_display_helpers() {
        assert_eq!(status_option_text(ResultStatus::Unset), "-");
        assert_eq!(status_option_text(ResultStatus::ConditionalApproval), "CONDITIONAL APPROVAL");
        assert_eq!(status_class(ResultStatus::Fail), "res res-fail");
        assert_eq!(toggle_icon(true), "▶");
    }
}
