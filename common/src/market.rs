//! 市場フィルタ
//!
//! セクション名が `(<市場> Products)` で終わる場合、その市場専用として扱う。
//! フィルタは表示用であり、除外された項目もストアには残る。

use crate::types::{ChecklistEntry, Market};

const RESTRICTION_SUFFIX: &str = " Products)";

/// セクションの対象市場（制限なしの場合 None）
pub fn restricted_market(section: &str) -> Option<Market> {
    let trimmed = section.trim_end();
    let head = trimmed.strip_suffix(RESTRICTION_SUFFIX)?;
    let open = head.rfind('(')?;
    head[open + 1..].parse().ok()
}

/// 指定市場で表示されるセクションか
pub fn is_visible_in(section: &str, market: Market) -> bool {
    match restricted_market(section) {
        Some(restricted) => restricted == market,
        None => true,
    }
}

/// 市場で表示される項目のみを元の順序で返す
pub fn filter_for_market<'a, I>(entries: I, market: Market) -> Vec<&'a ChecklistEntry>
where
    I: IntoIterator<Item = &'a ChecklistEntry>,
{
    entries
        .into_iter()
        .filter(|entry| is_visible_in(entry.section(), market))
        .collect()
}

/// 表示用のセクショングループ
#[derive(Debug, Clone)]
pub struct SectionGroup<'a> {
    pub section: String,
    pub entries: Vec<&'a ChecklistEntry>,
}

/// セクションごとにまとめる（初出順）
pub fn sections_in_order<'a, I>(entries: I) -> Vec<SectionGroup<'a>>
where
    I: IntoIterator<Item = &'a ChecklistEntry>,
{
    let mut groups: Vec<SectionGroup<'a>> = Vec::new();
    for entry in entries {
        match groups.iter_mut().find(|g| g.section == entry.section()) {
            Some(group) => group.entries.push(entry),
            None => groups.push(SectionGroup {
                section: entry.section().to_string(),
                entries: vec![entry],
            }),
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ChecklistConfig;

    #[test]
    fn test_restricted_market_parsing() {
        assert_eq!(restricted_market("Functional (CA Products)"), Some(Market::Ca));
        assert_eq!(restricted_market("Packaging and Carton (MX Products)"), Some(Market::Mx));
        assert_eq!(restricted_market("Functional"), None);
        assert_eq!(restricted_market("Labels (EU Products)"), None);
        assert_eq!(restricted_market("Products)"), None);
    }

    #[test]
    fn test_filter_for_us_hides_ca_sections() {
        let entries = ChecklistConfig::default().seed_entries();
        let visible = filter_for_market(&entries, Market::Us);
        assert_eq!(visible.len(), 92);
        assert!(visible.iter().all(|e| !e.section().contains("(CA Products)")));
    }

    #[test]
    fn test_filter_for_ca_shows_everything() {
        let entries = ChecklistConfig::default().seed_entries();
        assert_eq!(filter_for_market(&entries, Market::Ca).len(), 99);
        assert_eq!(filter_for_market(&entries, Market::Mx).len(), 92);
    }

    #[test]
    fn test_filter_preserves_order() {
        let entries = ChecklistConfig::default().seed_entries();
        let ids: Vec<u32> = filter_for_market(&entries, Market::Us).iter().map(|e| e.id()).collect();
        let mut sorted = ids.clone();
        sorted.sort_unstable();
        assert_eq!(ids, sorted);
    }

    #[test]
    fn test_filter_is_idempotent() {
        let entries = ChecklistConfig::default().seed_entries();
        for market in Market::ALL {
            let once = filter_for_market(&entries, market);
            let twice = filter_for_market(once.iter().copied(), market);
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_sections_in_order_groups_by_first_appearance() {
        let entries = ChecklistConfig::default().seed_entries();
        let groups = sections_in_order(filter_for_market(&entries, Market::Us));
        let names: Vec<&str> = groups.iter().map(|g| g.section.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Packaging and Carton",
                "Accessories",
                "Labeling & Regulatory Checks",
                "Mechanical",
                "Functional",
                "Performance & Reliability",
            ]
        );
        let total: usize = groups.iter().map(|g| g.entries.len()).sum();
        assert_eq!(total, 92);
    }
}
