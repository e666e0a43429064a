#![forbid(unsafe_code)]

//! Widget configuration and attribute parsing.
//!
//! # Defaults
//!
//! | Setting | Default | Range | Description |
//! |---------|---------|-------|-------------|
//! | `default_open_ratio` | 50 | 0-100 | Ratio before any `start` attribute |
//! | `color` | `#fff` | any CSS color | Divider accent |
//! | `resize_debounce` | 250ms | 0-2000ms | Quiet period before re-measuring |
//!
//! # Environment Variables
//!
//! | Variable | Type | Default | Description |
//! |----------|------|---------|-------------|
//! | `REVEAL_DEFAULT_START` | integer | 50 | Default open ratio |
//! | `REVEAL_DEFAULT_COLOR` | string | `#fff` | Default accent |
//! | `REVEAL_RESIZE_DEBOUNCE_MS` | u64 | 250 | Resize quiet period |
//!
//! Per-instance attributes (`start`, `color`) are delivered through
//! [`Controller::on_config_change`](crate::Controller::on_config_change).

use core::time::Duration;

use reveal_core::debounce::DEFAULT_RESIZE_DEBOUNCE_MS;
use reveal_core::{DEFAULT_OPEN_RATIO, MAX_OPEN_RATIO, MIN_OPEN_RATIO};

/// Custom element name.
pub const COMPONENT_NAME: &str = "reveal-component";

/// Class marking containers for bulk conversion.
pub const MARKER_CLASS: &str = "reveal";

/// Default divider accent.
pub const DEFAULT_COLOR: &str = "#fff";

/// Attributes the widget reacts to.
pub const OBSERVED_ATTRIBUTES: [&str; 2] = ["start", "color"];

/// Upper bound for the resize quiet period.
pub const MAX_RESIZE_DEBOUNCE_MS: u64 = 2_000;

/// Errors from widget configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// `start` has no leading integer.
    InvalidStart { value: String },
    /// Attribute is not one of [`OBSERVED_ATTRIBUTES`].
    UnknownKey(String),
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidStart { value } => write!(f, "invalid start value: {value:?}"),
            Self::UnknownKey(key) => write!(f, "unknown attribute: {key}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Observed attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigKey {
    Start,
    Color,
}

impl ConfigKey {
    #[must_use]
    pub fn from_attribute(name: &str) -> Option<Self> {
        match name {
            "start" => Some(Self::Start),
            "color" => Some(Self::Color),
            _ => None,
        }
    }

    #[must_use]
    pub const fn attribute(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Color => "color",
        }
    }
}

/// Parse a `start` attribute value.
///
/// Reads the leading integer the way HTML integer attributes are usually
/// read (`" 25"`, `"25.9"` and `"25px"` all give 25) and clamps it to the
/// open-ratio range.
pub fn parse_start(value: &str) -> Result<f64, ConfigError> {
    let trimmed = value.trim_start();
    let (negative, unsigned) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let digits = unsigned.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return Err(ConfigError::InvalidStart {
            value: value.to_owned(),
        });
    }
    // Overlong digit runs saturate; they clamp to the maximum anyway.
    let magnitude = unsigned[..digits].parse::<u64>().unwrap_or(u64::MAX);
    if negative {
        return Ok(MIN_OPEN_RATIO);
    }
    Ok(magnitude.min(MAX_OPEN_RATIO as u64) as f64)
}

/// Widget configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct WidgetConfig {
    /// Open ratio before any `start` attribute.
    pub default_open_ratio: f64,
    /// Divider accent before any `color` attribute.
    pub color: String,
    /// Quiet period before a viewport resize re-measures the widget.
    pub resize_debounce: Duration,
    /// Custom element name; also the notification event prefix.
    pub component_name: String,
    /// Class marking containers for [`crate::markup::parse`].
    pub marker_class: String,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            default_open_ratio: DEFAULT_OPEN_RATIO,
            color: DEFAULT_COLOR.to_owned(),
            resize_debounce: Duration::from_millis(DEFAULT_RESIZE_DEBOUNCE_MS),
            component_name: COMPONENT_NAME.to_owned(),
            marker_class: MARKER_CLASS.to_owned(),
        }
    }
}

impl WidgetConfig {
    #[must_use]
    pub fn with_open_ratio(mut self, ratio: f64) -> Self {
        self.default_open_ratio = ratio;
        self
    }

    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    #[must_use]
    pub fn with_resize_debounce(mut self, delay: Duration) -> Self {
        self.resize_debounce = delay;
        self
    }

    #[must_use]
    pub fn with_component_name(mut self, name: impl Into<String>) -> Self {
        self.component_name = name.into();
        self
    }

    #[must_use]
    pub fn with_marker_class(mut self, class: impl Into<String>) -> Self {
        self.marker_class = class.into();
        self
    }

    /// Load config from environment variables.
    ///
    /// Unparseable values are skipped; the result is [`validated`](Self::validated).
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load config through an arbitrary variable lookup.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(val) = lookup("REVEAL_DEFAULT_START")
            && let Ok(ratio) = parse_start(&val)
        {
            config.default_open_ratio = ratio;
        }

        if let Some(val) = lookup("REVEAL_DEFAULT_COLOR") {
            config.color = val.trim().to_owned();
        }

        if let Some(val) = lookup("REVEAL_RESIZE_DEBOUNCE_MS")
            && let Ok(ms) = val.trim().parse::<u64>()
        {
            config.resize_debounce = Duration::from_millis(ms);
        }

        config.validated()
    }

    /// Clamp values to safe ranges.
    ///
    /// - `default_open_ratio` clamped to 0-100 (`NaN` becomes 50)
    /// - `resize_debounce` capped at 2000ms
    /// - empty `color` replaced by [`DEFAULT_COLOR`]
    #[must_use]
    pub fn validated(mut self) -> Self {
        self.default_open_ratio = reveal_core::clamp_open_ratio(self.default_open_ratio);
        let debounce_ms = self
            .resize_debounce
            .as_millis()
            .min(u128::from(MAX_RESIZE_DEBOUNCE_MS));
        self.resize_debounce = Duration::from_millis(debounce_ms as u64);
        if self.color.trim().is_empty() {
            self.color = DEFAULT_COLOR.to_owned();
        }
        self
    }

    /// Check if values are within valid ranges.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        (MIN_OPEN_RATIO..=MAX_OPEN_RATIO).contains(&self.default_open_ratio)
            && self.resize_debounce <= Duration::from_millis(MAX_RESIZE_DEBOUNCE_MS)
            && !self.color.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults() {
        let config = WidgetConfig::default();
        assert_eq!(config.default_open_ratio, 50.0);
        assert_eq!(config.color, "#fff");
        assert_eq!(config.resize_debounce, Duration::from_millis(250));
        assert_eq!(config.component_name, "reveal-component");
        assert_eq!(config.marker_class, "reveal");
        assert!(config.is_valid());
    }

    #[test]
    fn parse_start_reads_leading_integer() {
        assert_eq!(parse_start("25"), Ok(25.0));
        assert_eq!(parse_start("  25"), Ok(25.0));
        assert_eq!(parse_start("25.9"), Ok(25.0));
        assert_eq!(parse_start("25px"), Ok(25.0));
        assert_eq!(parse_start("+7"), Ok(7.0));
        assert_eq!(parse_start("0"), Ok(0.0));
    }

    #[test]
    fn parse_start_clamps() {
        assert_eq!(parse_start("150"), Ok(100.0));
        assert_eq!(parse_start("-20"), Ok(0.0));
        assert_eq!(parse_start("99999999999999999999999"), Ok(100.0));
    }

    #[test]
    fn parse_start_rejects_non_numeric() {
        for value in ["", "abc", "-", "px25", " . 5"] {
            assert_eq!(
                parse_start(value),
                Err(ConfigError::InvalidStart {
                    value: value.to_owned()
                }),
                "{value:?}"
            );
        }
    }

    #[test]
    fn config_keys() {
        for name in OBSERVED_ATTRIBUTES {
            let key = ConfigKey::from_attribute(name).expect("observed attribute");
            assert_eq!(key.attribute(), name);
        }
        assert_eq!(ConfigKey::from_attribute("width"), None);
    }

    #[test]
    fn lookup_overrides_and_validates() {
        let config = WidgetConfig::from_lookup(lookup_from(&[
            ("REVEAL_DEFAULT_START", "30"),
            ("REVEAL_DEFAULT_COLOR", " rebeccapurple "),
            ("REVEAL_RESIZE_DEBOUNCE_MS", "9000"),
        ]));
        assert_eq!(config.default_open_ratio, 30.0);
        assert_eq!(config.color, "rebeccapurple");
        assert_eq!(config.resize_debounce, Duration::from_millis(2_000));
    }

    #[test]
    fn lookup_skips_garbage() {
        let config = WidgetConfig::from_lookup(lookup_from(&[
            ("REVEAL_DEFAULT_START", "half"),
            ("REVEAL_DEFAULT_COLOR", "   "),
            ("REVEAL_RESIZE_DEBOUNCE_MS", "soon"),
        ]));
        assert_eq!(config, WidgetConfig::default());
    }

    #[test]
    fn validated_repairs_builder_values() {
        let config = WidgetConfig::default()
            .with_open_ratio(f64::NAN)
            .with_color("")
            .with_resize_debounce(Duration::from_secs(60))
            .validated();
        assert_eq!(config.default_open_ratio, 50.0);
        assert_eq!(config.color, DEFAULT_COLOR);
        assert_eq!(config.resize_debounce, Duration::from_millis(2_000));
        assert!(config.is_valid());
    }

    #[test]
    fn error_display() {
        let err = ConfigError::InvalidStart {
            value: "abc".to_owned(),
        };
        assert_eq!(err.to_string(), "invalid start value: \"abc\"");
        assert_eq!(
            ConfigError::UnknownKey("width".to_owned()).to_string(),
            "unknown attribute: width"
        );
    }
}
