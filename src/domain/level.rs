//! Explicit XP→level policy.
//!
//! The source system never defined how level derives from XP; the rule
//! is therefore an explicit external policy supplied by configuration,
//! not something inferred by the ledger.

/// Linear level policy: one level per `xp_per_level` XP, starting at 1.
#[derive(Debug, Clone, Copy)]
pub struct LevelPolicy {
    /// XP required to advance one level.
    pub xp_per_level: u32,
}

impl LevelPolicy {
    /// Builds a policy; a zero step is coerced to 1 to keep the
    /// derivation total.
    #[must_use]
    pub const fn new(xp_per_level: u32) -> Self {
        Self {
            xp_per_level: if xp_per_level == 0 { 1 } else { xp_per_level },
        }
    }

    /// Level for a cumulative XP total. Always ≥ 1.
    #[must_use]
    pub fn level_for(&self, total_xp: u64) -> u32 {
        let step = u64::from(self.xp_per_level);
        let level = 1 + total_xp / step;
        u32::try_from(level).unwrap_or(u32::MAX)
    }
}

impl Default for LevelPolicy {
    fn default() -> Self {
        Self::new(1_000)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_starts_at_one() {
        let policy = LevelPolicy::new(1_000);
        assert_eq!(policy.level_for(0), 1);
        assert_eq!(policy.level_for(999), 1);
    }

    #[test]
    fn level_advances_per_step() {
        let policy = LevelPolicy::new(1_000);
        assert_eq!(policy.level_for(1_000), 2);
        assert_eq!(policy.level_for(2_500), 3);
        assert_eq!(policy.level_for(10_000), 11);
    }

    #[test]
    fn zero_step_is_coerced() {
        let policy = LevelPolicy::new(0);
        assert_eq!(policy.xp_per_level, 1);
        assert_eq!(policy.level_for(5), 6);
    }
}
