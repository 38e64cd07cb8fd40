//! Planner and ranking configuration.

/// A status substring and the priority bucket it maps to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TierRule {
    /// Case-sensitive substring looked for in the availability status.
    pub needle: String,
    /// Bucket assigned on match; lower sorts first.
    pub bucket: u8,
}

impl TierRule {
    pub fn new(needle: impl Into<String>, bucket: u8) -> Self {
        Self {
            needle: needle.into(),
            bucket,
        }
    }
}

/// Ordered status-to-bucket table used by the ranker.
///
/// Rules are tried in order and the first match wins. Statuses matching no
/// rule fall into `fallback_bucket`, where the confirmation prediction breaks
/// ties (higher prediction first, unknown last).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankPolicy {
    pub tiers: Vec<TierRule>,
    pub fallback_bucket: u8,
}

impl RankPolicy {
    pub fn new(tiers: Vec<TierRule>, fallback_bucket: u8) -> Self {
        Self {
            tiers,
            fallback_bucket,
        }
    }

    /// Bucket of the first matching rule, if any.
    pub fn matching_bucket(&self, status: &str) -> Option<u8> {
        self.tiers
            .iter()
            .find(|rule| status.contains(rule.needle.as_str()))
            .map(|rule| rule.bucket)
    }
}

impl Default for RankPolicy {
    fn default() -> Self {
        Self {
            tiers: vec![TierRule::new("Available", 1), TierRule::new("RAC", 2)],
            fallback_bucket: 3,
        }
    }
}

/// Bounds on a single planning request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannerLimits {
    /// Maximum number of source stations, and separately of destinations.
    pub max_stations: usize,
    /// Maximum number of travel dates; roughly the booking horizon.
    pub max_dates: usize,
}

impl Default for PlannerLimits {
    fn default() -> Self {
        Self {
            max_stations: 6,
            max_dates: 60,
        }
    }
}

/// Configuration for availability planning.
#[derive(Debug, Clone, Default)]
pub struct PlannerConfig {
    pub rank_policy: RankPolicy,
    pub limits: PlannerLimits,
}

impl PlannerConfig {
    pub fn new(rank_policy: RankPolicy, limits: PlannerLimits) -> Self {
        Self {
            rank_policy,
            limits,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = PlannerConfig::default();

        assert_eq!(config.limits.max_stations, 6);
        assert_eq!(config.limits.max_dates, 60);
        assert_eq!(config.rank_policy.fallback_bucket, 3);
        assert_eq!(
            config.rank_policy.tiers,
            vec![TierRule::new("Available", 1), TierRule::new("RAC", 2)]
        );
    }

    #[test]
    fn first_matching_rule_wins() {
        let policy = RankPolicy::default();

        assert_eq!(policy.matching_bucket("Available-0042"), Some(1));
        assert_eq!(policy.matching_bucket("RAC 12"), Some(2));
        assert_eq!(policy.matching_bucket("Available RAC"), Some(1));
        assert_eq!(policy.matching_bucket("GNWL12/WL5"), None);
    }

    #[test]
    fn matching_is_case_sensitive() {
        let policy = RankPolicy::default();
        assert_eq!(policy.matching_bucket("AVAILABLE-0042"), None);
        assert_eq!(policy.matching_bucket("rac 3"), None);
    }

    #[test]
    fn custom_policy() {
        let policy = RankPolicy::new(
            vec![TierRule::new("AVAILABLE", 1), TierRule::new("RAC", 2)],
            5,
        );
        assert_eq!(policy.matching_bucket("AVAILABLE-0042"), Some(1));
        assert_eq!(policy.fallback_bucket, 5);
    }
}
