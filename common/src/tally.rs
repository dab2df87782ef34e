//! 集計（Pass/Fail/N/A/Open と合格率）

use crate::types::{ChecklistEntry, InspectionRecord, ResultStatus};
use serde::Serialize;

/// 結果の集計値
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Tally {
    pub total: usize,
    /// PASS と CONDITIONAL APPROVAL
    pub pass: usize,
    pub fail: usize,
    pub na: usize,
    /// 未設定
    pub open: usize,
}

impl Tally {
    pub fn of<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a InspectionRecord>,
    {
        records.into_iter().fold(Tally::default(), |mut tally, record| {
            tally.total += 1;
            match record.status {
                ResultStatus::Pass | ResultStatus::ConditionalApproval => tally.pass += 1,
                ResultStatus::Fail => tally.fail += 1,
                ResultStatus::NotApplicable => tally.na += 1,
                ResultStatus::Unset => tally.open += 1,
            }
            tally
        })
    }

    pub fn of_entries<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = &'a ChecklistEntry>,
    {
        Self::of(entries.into_iter().map(|entry| &entry.record))
    }

    /// 合格率（%）。N/A と未設定は分母から除外
    pub fn pass_percentage(&self) -> u8 {
        let denom = self.pass + self.fail;
        if denom == 0 {
            return 0;
        }
        ((self.pass as f64 * 100.0) / denom as f64).round() as u8
    }
}

/// セクション単位の集計
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionTally {
    pub section: String,
    pub tally: Tally,
}

/// セクションごとの集計（初出順）
pub fn section_tallies<'a, I>(entries: I) -> Vec<SectionTally>
where
    I: IntoIterator<Item = &'a ChecklistEntry>,
{
    crate::market::sections_in_order(entries)
        .into_iter()
        .map(|group| SectionTally {
            tally: Tally::of_entries(group.entries.iter().copied()),
            section: group.section,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::InspectionItem;

    fn entry(id: u32, section: &str, status: ResultStatus) -> ChecklistEntry {
        let mut entry = ChecklistEntry::new(InspectionItem {
            id,
            section: section.to_string(),
            item: format!("{}. item", id),
            checkpoint: "checkpoint".to_string(),
        });
        entry.record.status = status;
        entry
    }

    #[test]
    fn test_tally_empty() {
        let tally = Tally::of(std::iter::empty());
        assert_eq!(tally, Tally::default());
        assert_eq!(tally.pass_percentage(), 0);
    }

    #[test]
    fn test_conditional_counts_as_pass() {
        let entries = vec![
            entry(1, "A", ResultStatus::Pass),
            entry(2, "A", ResultStatus::ConditionalApproval),
            entry(3, "A", ResultStatus::Fail),
            entry(4, "A", ResultStatus::NotApplicable),
            entry(5, "A", ResultStatus::Unset),
        ];
        let tally = Tally::of_entries(&entries);
        assert_eq!(
            tally,
            Tally { total: 5, pass: 2, fail: 1, na: 1, open: 1 }
        );
        // 2 / 3 = 66.67 → 67
        assert_eq!(tally.pass_percentage(), 67);
    }

    #[test]
    fn test_pass_percentage_ignores_na_and_open() {
        let entries = vec![
            entry(1, "A", ResultStatus::NotApplicable),
            entry(2, "A", ResultStatus::Unset),
            entry(3, "A", ResultStatus::NotApplicable),
        ];
        let tally = Tally::of_entries(&entries);
        assert_eq!(tally.pass_percentage(), 0);

        let entries = vec![entry(1, "A", ResultStatus::Pass), entry(2, "A", ResultStatus::Unset)];
        assert_eq!(Tally::of_entries(&entries).pass_percentage(), 100);
    }

    #[test]
    fn test_counts_always_sum_to_total() {
        let mut entries = Vec::new();
        for id in 0..40u32 {
            let status = ResultStatus::ALL[(id as usize * 7) % ResultStatus::ALL.len()];
            entries.push(entry(id + 1, "A", status));
            let tally = Tally::of_entries(&entries);
            assert_eq!(tally.pass + tally.fail + tally.na + tally.open, tally.total);
            assert!(tally.pass_percentage() <= 100);
        }
    }

    #[test]
    fn test_section_tallies_first_appearance_order() {
        let entries = vec![
            entry(1, "Mechanical", ResultStatus::Pass),
            entry(2, "Functional", ResultStatus::Fail),
            entry(3, "Mechanical", ResultStatus::Unset),
        ];
        let tallies = section_tallies(&entries);
        assert_eq!(tallies.len(), 2);
        assert_eq!(tallies[0].section, "Mechanical");
        assert_eq!(tallies[0].tally.total, 2);
        assert_eq!(tallies[0].tally.pass, 1);
        assert_eq!(tallies[1].section, "Functional");
        assert_eq!(tallies[1].tally.fail, 1);
        assert_eq!(tallies[1].tally.pass_percentage(), 0);
    }
}
