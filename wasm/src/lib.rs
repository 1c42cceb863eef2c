use career_timeline::{RenderOptions, render_with_options};
use chrono::NaiveDate;
use serde::Deserialize;
use wasm_bindgen::prelude::*;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TimelineRenderOptions {
    width: Option<f64>,
    chart_height: Option<f64>,
    font_family: Option<String>,
    font_size: Option<f64>,
    /// `YYYY-MM-DD`; the browser has no reliable local clock for us.
    now: Option<String>,
}

fn build_render_options(options: TimelineRenderOptions) -> Result<RenderOptions, String> {
    let mut render_options = RenderOptions::classic();

    if let Some(width) = options.width {
        render_options.render.width = width;
    }
    if let Some(chart_height) = options.chart_height {
        render_options.layout.chart_height = chart_height;
    }
    if let Some(font_family) = options.font_family {
        render_options.theme.font_family = font_family;
    }
    if let Some(font_size) = options.font_size {
        render_options.theme.font_size = font_size;
    }
    if let Some(now) = options.now {
        let date = NaiveDate::parse_from_str(now.trim(), "%Y-%m-%d")
            .map_err(|error| format!("invalid `now` {now:?}: {error}"))?;
        render_options = render_options.with_now(date.and_time(chrono::NaiveTime::MIN));
    }

    Ok(render_options)
}

#[wasm_bindgen]
pub fn render_resume_svg(json: &str, options_json: Option<String>) -> Result<String, JsValue> {
    let options = if let Some(raw_options) = options_json {
        serde_json::from_str::<TimelineRenderOptions>(&raw_options)
            .map_err(|error| JsValue::from_str(&error.to_string()))?
    } else {
        TimelineRenderOptions::default()
    };

    let render_options = build_render_options(options).map_err(|error| JsValue::from_str(&error))?;
    render_with_options(json, render_options).map_err(|error| JsValue::from_str(&error.to_string()))
}

#[wasm_bindgen]
pub fn round_path_corners(path: &str, radius: f64, ignore_x: Vec<f64>) -> Result<String, JsValue> {
    career_timeline::round_path_corners(path, radius, &ignore_x)
        .map_err(|error| JsValue::from_str(&error.to_string()))
}
