use chrono::NaiveDateTime;
use serde::Serialize;

use crate::ir::{CareerItem, Category};

use super::tech::TechLedger;

/// One outline vertex in data space: a date and a vertical offset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartPoint {
    pub date: NaiveDateTime,
    pub offset: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlopeEdge {
    pub responsibility: String,
    pub problem: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SlopeChartData {
    pub edges: Vec<SlopeEdge>,
    /// Distinct problems in first-seen order.
    pub problems: Vec<String>,
}

impl SlopeChartData {
    pub fn is_empty(&self) -> bool {
        self.problems.is_empty()
    }
}

/// A career item together with everything derived for it during preparation.
#[derive(Debug, Clone, Serialize)]
pub struct PlacedItem {
    pub item: CareerItem,
    pub layer: usize,
    pub polygon: [ChartPoint; 4],
    pub slope: SlopeChartData,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub min: NaiveDateTime,
    pub max: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChartData {
    pub range: DateRange,
    pub now: NaiveDateTime,
    /// Sorted by layer descending so inner layers are drawn last.
    pub work: Vec<PlacedItem>,
    pub learning: Vec<PlacedItem>,
    pub ledger: TechLedger,
}

impl ChartData {
    pub fn items(&self, category: Category) -> &[PlacedItem] {
        match category {
            Category::Work => &self.work,
            Category::Learning => &self.learning,
        }
    }

    pub fn find(&self, title: &str) -> Option<&PlacedItem> {
        self.work
            .iter()
            .chain(self.learning.iter())
            .find(|placed| placed.item.title == title)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ItemLayout {
    pub title: String,
    pub category: Category,
    pub layer: usize,
    /// Pixel outline before rounding.
    pub points: Vec<(f64, f64)>,
    /// Rounded path data ready for a `d` attribute.
    pub path: String,
    pub fill: String,
    pub tooltip: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RectLayout {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct YearLabelLayout {
    pub year: i32,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct TimelineLayout {
    pub band: RectLayout,
    pub year_labels: Vec<YearLabelLayout>,
    pub separators: Vec<RectLayout>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Layout {
    pub width: f64,
    pub height: f64,
    /// Translation applied to the chart group.
    pub offset_x: f64,
    pub offset_y: f64,
    pub items: Vec<ItemLayout>,
    pub timeline: TimelineLayout,
}

#[derive(Debug, Clone, Serialize)]
pub struct SlopeLabelLayout {
    pub text: String,
    pub y: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SlopeLineLayout {
    pub responsibility: String,
    pub problem: String,
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SlopeChartLayout {
    pub title: String,
    pub width: f64,
    pub height: f64,
    pub offset_x: f64,
    pub offset_y: f64,
    pub left_margin: f64,
    pub right_margin: f64,
    /// Horizontal distance between the two label columns.
    pub gap: f64,
    pub left_labels: Vec<SlopeLabelLayout>,
    pub right_labels: Vec<SlopeLabelLayout>,
    pub lines: Vec<SlopeLineLayout>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResponsibilityRowLayout {
    /// Top of the row, relative to the table origin.
    pub y: f64,
    pub height: f64,
    pub title: Vec<String>,
    pub description: Vec<String>,
    /// Wrapped achievement lines; a new bullet starts with `"• "`.
    pub achievements: Vec<String>,
}

/// Plain responsibilities table for items that addressed no problems.
#[derive(Debug, Clone, Serialize)]
pub struct ResponsibilityTableLayout {
    pub title: String,
    pub width: f64,
    pub height: f64,
    pub offset_x: f64,
    pub offset_y: f64,
    /// Left edges of the responsibility, description and achievements columns.
    pub columns: [f64; 3],
    pub line_height: f64,
    pub rows: Vec<ResponsibilityRowLayout>,
}

/// What the detail view shows for one item.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ItemDetailLayout {
    Slope(SlopeChartLayout),
    Table(ResponsibilityTableLayout),
}
