//! Per-line configuration: one algorithm, parameterized by line family.

use serde::Serialize;

/// Where a line's route ids for a stop come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RouteSource {
    /// The feed's routes-by-stop endpoint.
    Feed,
    /// The stop store's route table for the line.
    Store,
}

/// Transfer rules for a line family whose branches share a trunk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BranchRules {
    /// Branch label whose riders transfer at `outer_hub`.
    pub outer_branch: String,
    /// Name prefix of the hub used when either endpoint is on the outer branch.
    pub outer_hub: String,
    /// Name prefix of the hub used otherwise.
    pub inner_hub: String,
}

impl BranchRules {
    /// Pick the hub station name for a pair of branch labels.
    ///
    /// ```
    /// use next_train::domain::LineConfig;
    ///
    /// let rules = LineConfig::green_integrated().branches.unwrap();
    /// assert_eq!(rules.hub_for(Some("E"), Some("B")), "Copley");
    /// assert_eq!(rules.hub_for(Some("C"), Some("E")), "Copley");
    /// assert_eq!(rules.hub_for(Some("C"), Some("B")), "Kenmore");
    /// assert_eq!(rules.hub_for(None, Some("D")), "Kenmore");
    /// ```
    pub fn hub_for(&self, boarding_branch: Option<&str>, destination_branch: Option<&str>) -> &str {
        let is_outer = |branch: Option<&str>| {
            branch.is_some_and(|b| b.trim().eq_ignore_ascii_case(&self.outer_branch))
        };

        if is_outer(boarding_branch) || is_outer(destination_branch) {
            &self.outer_hub
        } else {
            &self.inner_hub
        }
    }
}

/// Everything that differs between line families.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineConfig {
    /// Human-readable line name.
    pub name: String,
    /// Stop-store table holding this line's stops.
    pub stop_table: String,
    /// Where route ids for a stop are looked up.
    pub route_source: RouteSource,
    /// Branch transfer rules, for families with several branches.
    pub branches: Option<BranchRules>,
}

impl LineConfig {
    pub fn new(name: impl Into<String>, stop_table: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            stop_table: stop_table.into(),
            route_source: RouteSource::Feed,
            branches: None,
        }
    }

    /// Take route ids from the stop store instead of the feed.
    pub fn with_route_source(mut self, source: RouteSource) -> Self {
        self.route_source = source;
        self
    }

    /// Attach branch transfer rules.
    pub fn with_branches(mut self, rules: BranchRules) -> Self {
        self.branches = Some(rules);
        self
    }

    pub fn orange() -> Self {
        Self::new("Orange Line", "OrangeLineStopDetails")
    }

    pub fn red() -> Self {
        Self::new("Red Line", "RedLineStopDetails").with_route_source(RouteSource::Store)
    }

    pub fn blue() -> Self {
        Self::new("Blue Line", "BlueLineStopDetails")
    }

    pub fn green_e() -> Self {
        Self::new("Green Line E", "GreenLineEStopDetails")
    }

    /// The integrated Green Line: B, C, D and E branches sharing a trunk.
    pub fn green_integrated() -> Self {
        Self::new("Green Line", "GreenLinesIntegratedStopDetails").with_branches(BranchRules {
            outer_branch: "E".to_string(),
            outer_hub: "Copley".to_string(),
            inner_hub: "Kenmore".to_string(),
        })
    }

    /// Look up a built-in line by a short key (`orange`, `red`, `blue`,
    /// `green-e`, `green`).
    pub fn by_key(key: &str) -> Option<Self> {
        match key.trim().to_ascii_lowercase().as_str() {
            "orange" => Some(Self::orange()),
            "red" => Some(Self::red()),
            "blue" => Some(Self::blue()),
            "green-e" => Some(Self::green_e()),
            "green" => Some(Self::green_integrated()),
            _ => None,
        }
    }

    /// True if journeys on this line may need a branch transfer.
    pub fn has_branches(&self) -> bool {
        self.branches.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_lines() {
        assert_eq!(LineConfig::orange().route_source, RouteSource::Feed);
        assert_eq!(LineConfig::red().route_source, RouteSource::Store);
        assert!(!LineConfig::blue().has_branches());
        assert!(LineConfig::green_integrated().has_branches());
    }

    #[test]
    fn by_key_is_case_insensitive() {
        assert_eq!(LineConfig::by_key("Orange"), Some(LineConfig::orange()));
        assert_eq!(LineConfig::by_key(" green "), Some(LineConfig::green_integrated()));
        assert_eq!(LineConfig::by_key("silver"), None);
    }

    #[test]
    fn outer_branch_match_ignores_case() {
        let rules = LineConfig::green_integrated().branches.unwrap();
        assert_eq!(rules.hub_for(Some("e"), None), "Copley");
        assert_eq!(rules.hub_for(Some(" E "), Some("B")), "Copley");
        assert_eq!(rules.hub_for(None, None), "Kenmore");
    }
}
