//! Service advisories: the nightly shutdown and station disruptions.

use chrono::{NaiveTime, Timelike};
use serde::Serialize;

/// Daily period with no train service, inclusive at both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ServiceWindow {
    pub start_hour: u32,
    pub start_minute: u32,
    pub end_hour: u32,
    pub end_minute: u32,
}

impl ServiceWindow {
    pub fn new(start_hour: u32, start_minute: u32, end_hour: u32, end_minute: u32) -> Self {
        Self {
            start_hour,
            start_minute,
            end_hour,
            end_minute,
        }
    }

    /// True if `time` falls inside the shutdown, to the minute.
    ///
    /// A window whose end is before its start wraps past midnight.
    pub fn contains(&self, time: NaiveTime) -> bool {
        let minute = time.hour() * 60 + time.minute();
        let start = self.start_hour * 60 + self.start_minute;
        let end = self.end_hour * 60 + self.end_minute;

        if start <= end {
            start <= minute && minute <= end
        } else {
            minute >= start || minute <= end
        }
    }
}

impl Default for ServiceWindow {
    /// 00:15 to 05:30.
    fn default() -> Self {
        Self::new(0, 15, 5, 30)
    }
}

/// A notice attached to journeys touching one station.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Disruption {
    pub station: String,
    pub message: String,
}

impl Disruption {
    pub fn new(station: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            station: station.into(),
            message: message.into(),
        }
    }

    /// The Government Center closure.
    pub fn government_center() -> Self {
        Self::new(
            "Government Center Station",
            "Beginning March 22, 2014, Government Center Station will be closed for two years \
             while crews work to reconstruct the station into a fully accessible, safer, modern, \
             more comfortable facility.",
        )
    }

    fn affects(&self, place: &str) -> bool {
        place.trim() == self.station.trim()
    }
}

/// The first notice for a disruption at either endpoint.
pub fn disruption_notice<'a>(
    disruptions: &'a [Disruption],
    boarding: &str,
    destination: &str,
) -> Option<&'a str> {
    disruptions
        .iter()
        .find(|d| d.affects(boarding) || d.affects(destination))
        .map(|d| d.message.as_str())
}

/// Advisories for one journey.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Advisory {
    pub overnight_shutdown: bool,
    /// Empty when no endpoint is disrupted.
    pub disruption: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(s: &str) -> NaiveTime {
        NaiveTime::parse_from_str(s, "%H:%M").unwrap()
    }

    #[test]
    fn overnight_shutdown_boundaries() {
        let window = ServiceWindow::default();
        let cases = [
            ("00:14", false),
            ("00:15", true),
            ("00:16", true),
            ("03:00", true),
            ("05:29", true),
            ("05:30", true),
            ("05:31", false),
            ("12:00", false),
            ("23:59", false),
        ];
        for (time, expected) in cases {
            assert_eq!(window.contains(at(time)), expected, "at {time}");
        }
    }

    #[test]
    fn window_may_wrap_midnight() {
        let window = ServiceWindow::new(23, 30, 5, 0);
        assert!(window.contains(at("23:45")));
        assert!(window.contains(at("02:00")));
        assert!(!window.contains(at("12:00")));
    }

    #[test]
    fn government_center_notice() {
        let disruptions = vec![Disruption::government_center()];

        let notice = disruption_notice(&disruptions, "Government Center Station", "Park Street");
        assert_eq!(
            notice,
            Some(
                "Beginning March 22, 2014, Government Center Station will be closed for two years \
                 while crews work to reconstruct the station into a fully accessible, safer, \
                 modern, more comfortable facility."
            )
        );

        assert_eq!(disruption_notice(&disruptions, "Park Street", "Back Bay"), None);
        assert!(disruption_notice(&disruptions, "Park Street", " Government Center Station ").is_some());
    }
}
