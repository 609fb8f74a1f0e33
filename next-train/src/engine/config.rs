//! Engine configuration.

use chrono_tz::Tz;

use super::advisory::{Disruption, ServiceWindow};
use super::clock::OffsetStrategy;

/// Parameters that shape time conversion and advisories.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Zone the feed's epochs are shown in.
    pub timezone: Tz,

    /// Which offset converts epochs to wall-clock times.
    pub offset_strategy: OffsetStrategy,

    /// Nightly period without service.
    pub service_window: ServiceWindow,

    /// Station disruptions to report.
    pub disruptions: Vec<Disruption>,
}

impl EngineConfig {
    pub fn with_timezone(mut self, timezone: Tz) -> Self {
        self.timezone = timezone;
        self
    }

    pub fn with_offset_strategy(mut self, strategy: OffsetStrategy) -> Self {
        self.offset_strategy = strategy;
        self
    }

    pub fn with_service_window(mut self, window: ServiceWindow) -> Self {
        self.service_window = window;
        self
    }

    pub fn with_disruptions(mut self, disruptions: Vec<Disruption>) -> Self {
        self.disruptions = disruptions;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            timezone: chrono_tz::America::New_York,
            offset_strategy: OffsetStrategy::CallTime,
            service_window: ServiceWindow::default(),
            disruptions: vec![Disruption::government_center()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.timezone, chrono_tz::America::New_York);
        assert_eq!(config.offset_strategy, OffsetStrategy::CallTime);
        assert_eq!(config.service_window, ServiceWindow::new(0, 15, 5, 30));
        assert_eq!(config.disruptions.len(), 1);
    }

    #[test]
    fn builder() {
        let config = EngineConfig::default()
            .with_timezone(chrono_tz::UTC)
            .with_offset_strategy(OffsetStrategy::Instant)
            .with_disruptions(Vec::new());
        assert_eq!(config.timezone, chrono_tz::UTC);
        assert_eq!(config.offset_strategy, OffsetStrategy::Instant);
        assert!(config.disruptions.is_empty());
    }
}
