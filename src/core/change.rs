//! Whole-snapshot change gate
//!
//! The dataset rebuild is expensive on the mainframe side (delete, define,
//! repopulate), so a cycle only submits when wallet state actually changed
//! since the last successful build.

/// Report whether the newly built snapshot differs from the previous one
///
/// This is a cheap, character-level equality gate over the serialized
/// snapshot texts - no record-level diff is performed. It is intentionally
/// order-sensitive: a reordering of otherwise-identical records counts as
/// new, because record order is part of the dataset contract.
///
/// Pure function, no side effects.
///
/// # Examples
///
/// ```
/// use doge_vsam_bridge::has_new_records;
///
/// assert!(!has_new_records("r1\nr2", "r1\nr2"));
/// assert!(has_new_records("r1\nr2", "r1\nr2\nr3"));
/// ```
pub fn has_new_records(previous: &str, current: &str) -> bool {
    previous != current
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::both_empty("", "")]
    #[case::identical("r1\nr2", "r1\nr2")]
    #[case::identical_single("only", "only")]
    fn test_identical_snapshots_are_not_new(#[case] old: &str, #[case] new: &str) {
        assert!(!has_new_records(old, new));
    }

    #[rstest]
    #[case::appended_record("r1\nr2", "r1\nr2\nr3")]
    #[case::removed_record("r1\nr2\nr3", "r1\nr2")]
    #[case::changed_record("r1\nr2", "r1\nr2x")]
    #[case::reordered("r1\nr2", "r2\nr1")]
    #[case::from_empty("", "r1")]
    fn test_any_textual_difference_is_new(#[case] old: &str, #[case] new: &str) {
        assert!(has_new_records(old, new));
    }
}
