//! Dashboard presentation settings.

use serde::Deserialize;

use sensorboard_app::ports::Color;

/// `[dashboard]` section of the configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Page auto-refresh period; `0` disables the meta refresh.
    pub refresh_secs: u32,
    pub chart_width: u32,
    pub chart_height: u32,
    pub humidity_color: String,
    pub tilt_color: String,
    pub vibration_color: String,
    pub trend_color: String,
    pub events_color: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            refresh_secs: 10,
            chart_width: 320,
            chart_height: 120,
            humidity_color: "#0ea5e9".to_string(),
            tilt_color: "#f59e0b".to_string(),
            vibration_color: "#ef4444".to_string(),
            trend_color: "#00d7c1".to_string(),
            events_color: "#ffb347".to_string(),
        }
    }
}

/// A configured color that is not `#rgb` or `#rrggbb`.
#[derive(Debug, thiserror::Error)]
#[error("invalid color {value:?} for {field}")]
pub struct InvalidColor {
    pub field: &'static str,
    pub value: String,
}

/// Chart colors, one per series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub humidity: Color,
    pub tilt: Color,
    pub vibration: Color,
    pub trend: Color,
    pub events: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            humidity: Color::rgb(0x0e, 0xa5, 0xe9),
            tilt: Color::rgb(0xf5, 0x9e, 0x0b),
            vibration: Color::rgb(0xef, 0x44, 0x44),
            trend: Color::rgb(0x00, 0xd7, 0xc1),
            events: Color::rgb(0xff, 0xb3, 0x47),
        }
    }
}

/// Resolved settings handed to the handlers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DashboardSettings {
    pub refresh_secs: u32,
    pub chart_width: u32,
    pub chart_height: u32,
    pub palette: Palette,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        let config = DashboardConfig::default();
        Self {
            refresh_secs: config.refresh_secs,
            chart_width: config.chart_width,
            chart_height: config.chart_height,
            palette: Palette::default(),
        }
    }
}

impl DashboardConfig {
    /// Parse the colors and build the handler settings.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidColor`] naming the first color that does not parse.
    pub fn settings(&self) -> Result<DashboardSettings, InvalidColor> {
        let parse = |field: &'static str, value: &str| {
            Color::from_hex(value).ok_or_else(|| InvalidColor {
                field,
                value: value.to_string(),
            })
        };
        Ok(DashboardSettings {
            refresh_secs: self.refresh_secs,
            chart_width: self.chart_width,
            chart_height: self.chart_height,
            palette: Palette {
                humidity: parse("humidity_color", &self.humidity_color)?,
                tilt: parse("tilt_color", &self.tilt_color)?,
                vibration: parse("vibration_color", &self.vibration_color)?,
                trend: parse("trend_color", &self.trend_color)?,
                events: parse("events_color", &self.events_color)?,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_resolve_default_settings() {
        let settings = DashboardConfig::default().settings().unwrap();
        assert_eq!(settings, DashboardSettings::default());
    }

    #[test]
    fn should_parse_partial_section() {
        let config: DashboardConfig = toml::from_str("refresh_secs = 0\ntilt_color = \"#fff\"").unwrap();

        let settings = config.settings().unwrap();

        assert_eq!(settings.refresh_secs, 0);
        assert_eq!(settings.chart_width, 320);
        assert_eq!(settings.palette.tilt, Color::WHITE);
    }

    #[test]
    fn should_name_invalid_color_field() {
        let config = DashboardConfig {
            events_color: "orange".to_string(),
            ..DashboardConfig::default()
        };

        let err = config.settings().unwrap_err();

        assert_eq!(err.field, "events_color");
        assert_eq!(err.to_string(), "invalid color \"orange\" for events_color");
    }
}
