mod axis;
mod details;
pub mod packing;
pub mod scale;
pub mod shape;
mod slope;
pub mod tech;
pub(crate) mod types;
pub use types::*;

pub use axis::year_ticks;
pub use details::{compute_item_details, compute_responsibility_table};
pub use packing::{LayerOccupancy, assign_layer};
pub use scale::{BandScale, LinearScale, TimeScale};
pub use shape::build_polygon;
pub use slope::compute_slope_layout;
pub use tech::{KnowledgeLevel, TechLedger, TechnologyEntry};

use axis::compute_timeline_layout;

use crate::config::{LayoutConfig, SlopeChartConfig};
use crate::error::{Result, TimelineError};
use crate::ir::{CareerItem, Category, ItemEnd, Resume};
use crate::path::{PathPoint, format_path, polyline, round_corners};
use crate::theme::Theme;
use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Run the full preparation pass over a resume.
///
/// Each category is sorted by start date, packed into layers and shaped,
/// then the technology ledger is built over work items followed by
/// learning items. The returned lists are ordered by layer, outermost
/// first.
pub fn prepare_chart_data(
    resume: Resume,
    now: NaiveDateTime,
    config: &LayoutConfig,
) -> Result<ChartData> {
    if resume.is_empty() {
        return Err(TimelineError::validation("resume has no work or learning items"));
    }
    let range = date_range(&resume, now)?;

    let Resume {
        mut work,
        mut learning,
    } = resume;
    work.sort_by_key(|item| item.date_start);
    learning.sort_by_key(|item| item.date_start);

    let work_shapes = place_category(&work, now, config)?;
    let learning_shapes = place_category(&learning, now, config)?;

    let mut ledger = TechLedger::new();
    let work_slopes = tech::aggregate_into(&mut ledger, &work);
    let learning_slopes = tech::aggregate_into(&mut ledger, &learning);

    let work = assemble(work, work_shapes, work_slopes);
    let learning = assemble(learning, learning_shapes, learning_slopes);
    debug!(
        work = work.len(),
        learning = learning.len(),
        technologies = ledger.len(),
        min = %range.min,
        max = %range.max,
        "prepared chart data"
    );

    Ok(ChartData {
        range,
        now,
        work,
        learning,
        ledger,
    })
}

fn date_range(resume: &Resume, now: NaiveDateTime) -> Result<DateRange> {
    let items = || resume.work.iter().chain(resume.learning.iter());
    let min = items()
        .map(|item| item.date_start)
        .min()
        .ok_or_else(|| TimelineError::validation("resume has no items"))?;
    let max = items()
        .map(|item| item.effective_end(now))
        .max()
        .ok_or_else(|| TimelineError::validation("resume has no items"))?;
    // The axis starts just after noon on January 1st of the first year.
    let min = NaiveDate::from_ymd_opt(min.year(), 1, 1)
        .and_then(|date| date.and_hms_opt(12, 0, 1))
        .ok_or_else(|| TimelineError::validation(format!("year {} is out of range", min.year())))?;
    Ok(DateRange { min, max })
}

fn place_category(
    items: &[CareerItem],
    now: NaiveDateTime,
    config: &LayoutConfig,
) -> Result<Vec<(usize, [ChartPoint; 4])>> {
    let mut occupancy = LayerOccupancy::new();
    items
        .iter()
        .map(|item| {
            let layer = assign_layer(item, &mut occupancy, now);
            debug!(title = %item.title, category = item.category.label(), layer, "packed item");
            build_polygon(item, layer, now, config).map(|polygon| (layer, polygon))
        })
        .collect()
}

fn assemble(
    items: Vec<CareerItem>,
    shapes: Vec<(usize, [ChartPoint; 4])>,
    slopes: Vec<SlopeChartData>,
) -> Vec<PlacedItem> {
    let mut placed: Vec<PlacedItem> = items
        .into_iter()
        .zip(shapes)
        .zip(slopes)
        .map(|((item, (layer, polygon)), slope)| PlacedItem {
            item,
            layer,
            polygon,
            slope,
        })
        .collect();
    placed.sort_by(|a, b| b.layer.cmp(&a.layer));
    placed
}

/// `"Jan 2020"` for a date, `"present"` for an ongoing item.
pub fn format_date(end: ItemEnd) -> String {
    match end {
        ItemEnd::Date(date) => format_month(date),
        ItemEnd::Ongoing => "present".to_string(),
    }
}

fn format_month(date: NaiveDate) -> String {
    date.format("%b %Y").to_string()
}

/// Plain-text hover content, one detail per line.
pub fn tooltip(item: &CareerItem) -> String {
    let mut lines = vec![item.title.clone()];
    if !item.place.is_empty() {
        lines.push(format!("Place: {}", item.place));
    }
    lines.push(format!(
        "Period: {} — {}",
        format_month(item.date_start),
        format_date(item.date_end)
    ));
    if let Some(course) = item.course.as_deref().filter(|course| !course.is_empty()) {
        lines.push(format!("Course: {course}"));
    }
    if let Some(specialty) = item.specialty.as_deref().filter(|specialty| !specialty.is_empty()) {
        lines.push(format!("Specialty: {specialty}"));
    }
    if !item.key_figures.is_empty() {
        lines.push("Key figures:".to_string());
        lines.extend(item.key_figures.iter().map(|figure| format!("- {figure}")));
    }
    lines.join("\n")
}

/// Assigns palette entries to keys in first-seen order, cycling.
struct OrdinalPalette<'a> {
    colors: &'a [String],
    assigned: HashMap<String, usize>,
}

impl<'a> OrdinalPalette<'a> {
    fn new(colors: &'a [String]) -> Self {
        Self {
            colors,
            assigned: HashMap::new(),
        }
    }

    fn color(&mut self, key: &str) -> String {
        if self.colors.is_empty() {
            return "none".to_string();
        }
        let next = self.assigned.len();
        let idx = *self.assigned.entry(key.to_string()).or_insert(next);
        self.colors[idx % self.colors.len()].clone()
    }
}

/// Pixel layout of the main timeline chart for a container `width` wide.
pub fn compute_layout(chart: &ChartData, theme: &Theme, config: &LayoutConfig, width: f64) -> Layout {
    let margin = config.margin;
    let chart_width = (width - margin.left - margin.right) * config.main_chart_percentage_width;
    let chart_height = config.chart_height - margin.top - margin.bottom;

    let x = TimeScale::new(
        (chart.range.min, chart.range.max),
        (margin.left, chart_width - margin.right),
    );
    let y = LinearScale::new(config.y_domain, (chart_height, 0.0));
    // The right edge of ongoing items stays square.
    let right_edge = [x.map(chart.range.max).ceil()];

    let mut items = Vec::with_capacity(chart.work.len() + chart.learning.len());
    for category in Category::ALL {
        let colors = match category {
            Category::Work => &theme.work_colors,
            Category::Learning => &theme.learning_colors,
        };
        let mut palette = OrdinalPalette::new(colors);
        for placed in chart.items(category) {
            let points: Vec<(f64, f64)> = placed
                .polygon
                .iter()
                .map(|point| (x.map(point.date).ceil(), y.map(point.offset).ceil()))
                .collect();
            let outline: Vec<PathPoint> = points
                .iter()
                .map(|&(px, py)| PathPoint::new(px, py))
                .collect();
            let path = format_path(&round_corners(
                &polyline(&outline),
                config.corner_radius,
                &right_edge,
            ));
            items.push(ItemLayout {
                title: placed.item.title.clone(),
                category,
                layer: placed.layer,
                points,
                path,
                fill: palette.color(placed.item.color_key()),
                tooltip: tooltip(&placed.item),
            });
        }
    }

    Layout {
        width: chart_width + margin.left + margin.right,
        height: config.chart_height,
        offset_x: margin.left,
        offset_y: margin.top,
        items,
        timeline: compute_timeline_layout(&chart.range, &x, &y, config),
    }
}
