use crate::theme::Theme;
use anyhow::bail;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

static HEX_COLOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#(?:[0-9a-fA-F]{3}|[0-9a-fA-F]{6}|[0-9a-fA-F]{8})$").unwrap());

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for Margin {
    fn default() -> Self {
        Self {
            top: 10.0,
            right: 20.0,
            bottom: 30.0,
            left: 20.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    pub chart_height: f64,
    pub margin: Margin,
    pub main_chart_percentage_width: f64,
    /// Value domain of the vertical scale, bottom to top.
    pub y_domain: (f64, f64),
    /// Days of taper at each end of trapezoidal items.
    pub slant_days: f64,
    /// Offset of an item's base from the timeline axis.
    pub base_offset: f64,
    /// Offset of a layer-0 item's outer edge from the axis.
    pub upper_offset: f64,
    pub corner_radius: f64,
    /// Half height of the timeline band.
    pub timeline_band_offset: f64,
    /// Half height of the year separators.
    pub separator_offset: f64,
    pub separator_width: f64,
    pub slope: SlopeChartConfig,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            chart_height: 200.0,
            margin: Margin::default(),
            main_chart_percentage_width: 1.0,
            y_domain: (-20.0, 30.0),
            slant_days: 75.0,
            base_offset: 4.0,
            upper_offset: 14.0,
            corner_radius: 5.0,
            timeline_band_offset: 4.0,
            separator_offset: 2.0,
            separator_width: 2.0,
            slope: SlopeChartConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlopeChartConfig {
    pub left_margin: f64,
    pub min_gap_width: f64,
    pub row_height: f64,
    pub band_padding: f64,
    /// Approximate label glyph width used to size the label margins.
    pub label_char_width: f64,
    pub label_offset: f64,
    pub header_offset: f64,
    /// Line height of the responsibilities table.
    pub line_height: f64,
    pub row_padding: f64,
}

impl Default for SlopeChartConfig {
    fn default() -> Self {
        Self {
            left_margin: 30.0,
            min_gap_width: 200.0,
            row_height: 40.0,
            band_padding: 0.3,
            label_char_width: 6.5,
            label_offset: 9.0,
            header_offset: 25.0,
            line_height: 18.0,
            row_padding: 8.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    pub width: f64,
    pub height: f64,
    pub background: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 800.0,
            background: "#FFFFFF".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub theme: Theme,
    pub layout: LayoutConfig,
    pub render: RenderConfig,
}

impl Default for Config {
    fn default() -> Self {
        let theme = Theme::classic();
        let render = RenderConfig {
            background: theme.background.clone(),
            ..Default::default()
        };
        Self {
            theme,
            layout: LayoutConfig::default(),
            render,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct MarginFile {
    top: Option<f64>,
    right: Option<f64>,
    bottom: Option<f64>,
    left: Option<f64>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ThemeFile {
    font_family: Option<String>,
    font_size: Option<f64>,
    text_color: Option<String>,
    background: Option<String>,
    timeline_color: Option<String>,
    separator_color: Option<String>,
    item_stroke: Option<String>,
    slope_line_color: Option<String>,
    work_colors: Option<Vec<String>>,
    learning_colors: Option<Vec<String>>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct SlopeFile {
    left_margin: Option<f64>,
    min_gap_width: Option<f64>,
    row_height: Option<f64>,
    band_padding: Option<f64>,
    label_char_width: Option<f64>,
    line_height: Option<f64>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    chart_height: Option<f64>,
    margin: Option<MarginFile>,
    main_chart_percentage_width: Option<f64>,
    slant_days: Option<f64>,
    corner_radius: Option<f64>,
    width: Option<f64>,
    height: Option<f64>,
    theme: Option<ThemeFile>,
    slope: Option<SlopeFile>,
}

/// Ten years of taper is already wider than any real item.
const MAX_SLANT_DAYS: f64 = 3650.0;

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let contents = std::fs::read_to_string(path)?;
    parse_config(&contents)
}

/// Apply a camelCase JSON override document on top of the defaults.
pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let mut config = Config::default();
    let parsed: ConfigFile = serde_json::from_str(contents)?;

    if let Some(v) = parsed.chart_height {
        config.layout.chart_height = v;
    }
    if let Some(v) = parsed.main_chart_percentage_width {
        if !(v > 0.0 && v <= 1.0) {
            bail!("mainChartPercentageWidth must be in (0, 1], got {v}");
        }
        config.layout.main_chart_percentage_width = v;
    }
    if let Some(v) = parsed.slant_days {
        if !(v.is_finite() && (0.0..=MAX_SLANT_DAYS).contains(&v)) {
            bail!("slantDays must be in [0, {MAX_SLANT_DAYS}], got {v}");
        }
        config.layout.slant_days = v;
    }
    if let Some(v) = parsed.corner_radius {
        config.layout.corner_radius = v;
    }
    if let Some(v) = parsed.width {
        config.render.width = v;
    }
    if let Some(v) = parsed.height {
        config.render.height = v;
    }

    if let Some(margin) = parsed.margin {
        if let Some(v) = margin.top {
            config.layout.margin.top = v;
        }
        if let Some(v) = margin.right {
            config.layout.margin.right = v;
        }
        if let Some(v) = margin.bottom {
            config.layout.margin.bottom = v;
        }
        if let Some(v) = margin.left {
            config.layout.margin.left = v;
        }
    }

    if let Some(slope) = parsed.slope {
        if let Some(v) = slope.left_margin {
            config.layout.slope.left_margin = v;
        }
        if let Some(v) = slope.min_gap_width {
            config.layout.slope.min_gap_width = v;
        }
        if let Some(v) = slope.row_height {
            config.layout.slope.row_height = v;
        }
        if let Some(v) = slope.band_padding {
            config.layout.slope.band_padding = v;
        }
        if let Some(v) = slope.label_char_width {
            config.layout.slope.label_char_width = v;
        }
        if let Some(v) = slope.line_height {
            config.layout.slope.line_height = v;
        }
    }

    if let Some(theme) = parsed.theme {
        if let Some(v) = theme.font_family {
            config.theme.font_family = v;
        }
        if let Some(v) = theme.font_size {
            config.theme.font_size = v;
        }
        if let Some(v) = theme.text_color {
            config.theme.text_color = checked_color("textColor", v)?;
        }
        if let Some(v) = theme.background {
            config.theme.background = checked_color("background", v)?;
        }
        if let Some(v) = theme.timeline_color {
            config.theme.timeline_color = checked_color("timelineColor", v)?;
        }
        if let Some(v) = theme.separator_color {
            config.theme.separator_color = checked_color("separatorColor", v)?;
        }
        if let Some(v) = theme.item_stroke {
            config.theme.item_stroke = checked_color("itemStroke", v)?;
        }
        if let Some(v) = theme.slope_line_color {
            config.theme.slope_line_color = checked_color("slopeLineColor", v)?;
        }
        if let Some(v) = theme.work_colors {
            config.theme.work_colors = checked_palette("workColors", v)?;
        }
        if let Some(v) = theme.learning_colors {
            config.theme.learning_colors = checked_palette("learningColors", v)?;
        }
    }

    config.render.background = config.theme.background.clone();

    Ok(config)
}

fn checked_color(field: &str, value: String) -> anyhow::Result<String> {
    if !HEX_COLOR_RE.is_match(value.trim()) {
        bail!("{field}: expected a hex color, got {value:?}");
    }
    Ok(value.trim().to_string())
}

fn checked_palette(field: &str, values: Vec<String>) -> anyhow::Result<Vec<String>> {
    if values.is_empty() {
        bail!("{field}: palette must not be empty");
    }
    values
        .into_iter()
        .map(|value| checked_color(field, value))
        .collect()
}
