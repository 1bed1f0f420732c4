//! Candidate ranking within a preference pool.
//!
//! Candidates are ordered by a sequence of keys, each consulted only when
//! the previous ones tie. Remaining ties keep roster order.

use std::cmp::Ordering;

use super::StaffLoad;

/// Sort key of one candidate at query time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankKey {
    /// Cumulative difficulty so far.
    pub load: f64,
    /// Distinct days already assigned this run.
    pub days_used: usize,
}

impl RankKey {
    /// Reads the key for a staff member from the run's load table.
    pub fn of(staff: &str, load: &StaffLoad) -> Self {
        Self {
            load: load.load_of(staff),
            days_used: load.days_used(staff),
        }
    }

    /// Lighter load first, then fewer used days.
    pub fn compare(&self, other: &Self) -> Ordering {
        self.load
            .total_cmp(&other.load)
            .then_with(|| self.days_used.cmp(&other.days_used))
    }
}

/// Stable-sorts a pool of staff keys by [`RankKey`].
pub fn rank_pool<'a>(pool: &mut Vec<&'a str>, load: &StaffLoad) {
    let mut keyed: Vec<(RankKey, &'a str)> =
        pool.iter().map(|&name| (RankKey::of(name, load), name)).collect();
    keyed.sort_by(|a, b| a.0.compare(&b.0));
    pool.clear();
    pool.extend(keyed.into_iter().map(|(_, name)| name));
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, day).unwrap()
    }

    #[test]
    fn test_load_then_days() {
        let mut load = StaffLoad::new();
        load.record("A", d(17), 2.0);
        load.record("B", d(17), 1.0);
        load.record("B", d(18), 1.0);
        load.record("C", d(17), 2.0);

        // All three tie on load 2.0; B has used two days
        let mut pool = vec!["B", "A", "C"];
        rank_pool(&mut pool, &load);
        assert_eq!(pool, vec!["A", "C", "B"]);
    }

    #[test]
    fn test_ties_keep_roster_order() {
        let load = StaffLoad::new();
        let mut pool = vec!["Zed", "Ada", "Mo"];
        rank_pool(&mut pool, &load);
        assert_eq!(pool, vec!["Zed", "Ada", "Mo"]);
    }

    #[test]
    fn test_unassigned_first() {
        let mut load = StaffLoad::new();
        load.record("A", d(17), 0.5);
        let mut pool = vec!["A", "B"];
        rank_pool(&mut pool, &load);
        assert_eq!(pool, vec!["B", "A"]);
    }
}
