use chrono::Duration;
use tracing::warn;

use crate::config::LayoutConfig;
use crate::error::{Result, TimelineError};
use crate::ir::{CareerItem, Subtype};

use super::types::ChartPoint;

/// Days of taper for a subtype; rectangular subtypes get none.
pub fn slant_days(subtype: Subtype, config: &LayoutConfig) -> f64 {
    if subtype.is_trapezoidal() {
        config.slant_days
    } else {
        0.0
    }
}

/// Keeps the taper angle constant across layers whose heights differ.
pub fn layer_coefficient(layer: usize) -> f64 {
    if layer == 0 {
        return 1.0;
    }
    let layer = layer as f64;
    (layer * 5.0 + 10.0) / (layer * 5.0 + 5.0)
}

/// Outline of an item on `layer`: base-start, outer-start, outer-end, base-end.
///
/// Ongoing items end at `now` and keep a vertical trailing edge. Intervals
/// shorter than both tapers produce a self-intersecting outline, which is
/// kept as is.
pub fn build_polygon(
    item: &CareerItem,
    layer: usize,
    now: chrono::NaiveDateTime,
    config: &LayoutConfig,
) -> Result<[ChartPoint; 4]> {
    let start = item.start();
    let end = item.effective_end(now);
    if end < start {
        return Err(TimelineError::Geometry(format!(
            "'{}' ends ({end}) before it starts ({start})",
            item.title
        )));
    }

    let direction = item.category.direction();
    let base = config.base_offset * direction;
    let outer = config.upper_offset * direction + layer as f64 * base;

    // Whole days, truncated.
    let slant = (slant_days(item.subtype, config) * layer_coefficient(layer)).trunc();
    let out_of_range =
        || TimelineError::Geometry(format!("'{}': slant of {slant} days is out of range", item.title));
    let lead = Some(slant)
        .filter(|days| days.is_finite() && days.abs() < i64::MAX as f64)
        .and_then(|days| Duration::try_days(days as i64))
        .ok_or_else(out_of_range)?;
    let trail = if item.is_ongoing() { Duration::zero() } else { lead };

    let outer_start = start.checked_add_signed(lead).ok_or_else(out_of_range)?;
    let outer_end = end.checked_sub_signed(trail).ok_or_else(out_of_range)?;
    if outer_start > outer_end {
        warn!(title = %item.title, layer, "interval shorter than its tapers; outline crosses itself");
    }

    Ok([
        ChartPoint { date: start, offset: base },
        ChartPoint { date: outer_start, offset: outer },
        ChartPoint { date: outer_end, offset: outer },
        ChartPoint { date: end, offset: base },
    ])
}
