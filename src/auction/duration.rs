//! Auction Duration Module
//!
//! Resolves how long an auction stays open from a raw configuration string.

use std::time::Duration;

use tracing::warn;

/// Duration used when the setting is missing or cannot be parsed.
pub const DEFAULT_AUCTION_DURATION: Duration = Duration::from_secs(10 * 60);

// == Duration Resolver ==
/// Turns the configured auction duration (e.g. "10m") into a `Duration`.
///
/// Accepts humantime spans ("10m", "1h 30m", "2min") and Go-style spans with
/// fractional amounts ("1.5h", "1h0.5m"). Resolution never fails: anything
/// else resolves to [`DEFAULT_AUCTION_DURATION`].
#[derive(Debug, Clone, Default)]
pub struct DurationResolver {
    setting: Option<String>,
}

impl DurationResolver {
    /// Creates a resolver over the raw setting value.
    ///
    /// Logs a warning once if a value is present but invalid.
    pub fn new(setting: Option<String>) -> Self {
        if let Some(raw) = setting.as_deref() {
            if parse(raw).is_none() {
                warn!(
                    setting = raw,
                    "Invalid auction duration, falling back to {}s",
                    DEFAULT_AUCTION_DURATION.as_secs()
                );
            }
        }
        Self { setting }
    }

    /// Returns the configured duration, or the default.
    pub fn resolve(&self) -> Duration {
        self.setting
            .as_deref()
            .and_then(parse)
            .unwrap_or(DEFAULT_AUCTION_DURATION)
    }
}

fn parse(raw: &str) -> Option<Duration> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    humantime::parse_duration(raw)
        .ok()
        .or_else(|| parse_fractional(raw))
}

/// Parses concatenated `<decimal><unit>` spans such as "1.5h" or "1h0.5m".
fn parse_fractional(raw: &str) -> Option<Duration> {
    let mut total = 0f64;
    let mut rest = raw;

    while !rest.is_empty() {
        let number_end = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(rest.len());
        let amount: f64 = rest[..number_end].parse().ok()?;
        rest = &rest[number_end..];

        let unit_end = rest
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(rest.len());
        let seconds_per_unit = match &rest[..unit_end] {
            "ns" => 1e-9,
            "us" | "µs" => 1e-6,
            "ms" => 1e-3,
            "s" => 1.0,
            "m" => 60.0,
            "h" => 3600.0,
            _ => return None,
        };
        rest = &rest[unit_end..];

        total += amount * seconds_per_unit;
    }

    Duration::try_from_secs_f64(total).ok()
}
