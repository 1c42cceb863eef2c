use super::*;

fn label_width(label: &str, config: &SlopeChartConfig) -> f64 {
    label.chars().count() as f64 * config.label_char_width
}

fn widest(labels: &[String], config: &SlopeChartConfig) -> f64 {
    labels
        .iter()
        .map(|label| label_width(label, config))
        .fold(0.0, f64::max)
}

fn dedup_in_order(labels: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut seen = HashSet::new();
    labels
        .into_iter()
        .filter(|label| seen.insert(label.clone()))
        .collect()
}

/// Lay out the responsibility-to-problem chart of one item.
///
/// Returns `None` when the item addressed no problems.
pub fn compute_slope_layout(
    placed: &PlacedItem,
    config: &LayoutConfig,
    available_width: f64,
) -> Option<SlopeChartLayout> {
    if placed.slope.is_empty() {
        return None;
    }
    let slope = &config.slope;
    let responsibilities = dedup_in_order(
        placed
            .item
            .responsibilities
            .iter()
            .map(|responsibility| responsibility.title.clone()),
    );
    let problems = placed.slope.problems.clone();

    let mut left_margin = widest(&responsibilities, slope);
    let mut right_margin = widest(&problems, slope);

    // Shrink label margins proportionally when the minimum gap does not fit.
    let usable = available_width - slope.left_margin;
    let gap = if usable < left_margin + right_margin + slope.min_gap_width {
        let labels = left_margin + right_margin;
        // Empty labels leave nothing to shrink.
        if labels > 0.0 {
            let ratio = ((usable - slope.min_gap_width - 20.0) / labels).max(0.0);
            left_margin *= ratio;
            right_margin *= ratio;
        }
        slope.min_gap_width
    } else {
        usable - right_margin - left_margin - slope.left_margin
    };

    let rows = responsibilities.len().max(problems.len()) as f64;
    let height = slope.row_height * rows;
    let band_range = (0.0, height - config.margin.top - config.margin.bottom);
    let left = BandScale::new(responsibilities.clone(), band_range, slope.band_padding);
    let right = BandScale::new(problems.clone(), band_range, slope.band_padding);

    let left_labels = responsibilities
        .iter()
        .filter_map(|text| {
            left.center(text).map(|y| SlopeLabelLayout {
                text: text.clone(),
                y,
            })
        })
        .collect();
    let right_labels = problems
        .iter()
        .filter_map(|text| {
            right.center(text).map(|y| SlopeLabelLayout {
                text: text.clone(),
                y,
            })
        })
        .collect();

    let lines = placed
        .slope
        .edges
        .iter()
        .filter_map(|edge| {
            let y1 = left.center(&edge.responsibility)?;
            let y2 = right.center(&edge.problem)?;
            Some(SlopeLineLayout {
                responsibility: edge.responsibility.clone(),
                problem: edge.problem.clone(),
                x1: 0.0,
                y1,
                x2: gap,
                y2,
            })
        })
        .collect();

    Some(SlopeChartLayout {
        title: placed.item.title.clone(),
        width: available_width,
        height,
        offset_x: left_margin + slope.left_margin,
        offset_y: slope.header_offset,
        left_margin,
        right_margin,
        gap,
        left_labels,
        right_labels,
        lines,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{CareerItem, Category, ItemEnd, Responsibility, Subtype};

    fn placed(responsibilities: &[(&str, &[&str])]) -> PlacedItem {
        let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        let mut item = CareerItem::new(
            "Lead",
            Category::Work,
            Subtype::PaidJob,
            start,
            ItemEnd::Date(NaiveDate::from_ymd_opt(2021, 1, 1).unwrap()),
        );
        item.responsibilities = responsibilities
            .iter()
            .map(|(title, problems)| Responsibility {
                title: title.to_string(),
                description: String::new(),
                achievements: Vec::new(),
                problems_addressed: problems.iter().map(|p| p.to_string()).collect(),
                tech_usage: Vec::new(),
                date_start: None,
                date_end: None,
            })
            .collect();
        let slope = tech::slope_chart_data(&item);
        let point = ChartPoint {
            date: item.start(),
            offset: 4.0,
        };
        PlacedItem {
            item,
            layer: 0,
            polygon: [point; 4],
            slope,
        }
    }

    #[test]
    fn no_problems_means_no_chart() {
        let item = placed(&[("Hire", &[])]);
        assert!(compute_slope_layout(&item, &LayoutConfig::default(), 1200.0).is_none());
    }

    #[test]
    fn wide_container_spreads_the_gap() {
        let item = placed(&[("Ship", &["Slow releases"]), ("Mentor", &["Attrition", "Slow releases"])]);
        let config = LayoutConfig::default();
        let layout = compute_slope_layout(&item, &config, 1200.0).unwrap();
        assert_eq!(layout.height, 80.0);
        assert_eq!(layout.left_margin, 6.0 * 6.5);
        assert_eq!(layout.right_margin, 13.0 * 6.5);
        assert_eq!(layout.gap, 1200.0 - 30.0 - 39.0 - 84.5 - 30.0);
        assert_eq!(layout.lines.len(), 3);
        assert!(layout.lines.iter().all(|line| line.x2 == layout.gap));
        assert_eq!(layout.left_labels.len(), 2);
        assert_eq!(layout.right_labels.len(), 2);
    }

    #[test]
    fn narrow_container_shrinks_margins() {
        let long = "Reduce infrastructure spending across all regions";
        let item = placed(&[("Coordinate cross-team platform migrations", &[long])]);
        let config = LayoutConfig::default();
        let layout = compute_slope_layout(&item, &config, 400.0).unwrap();
        assert_eq!(layout.gap, config.slope.min_gap_width);
        let total = layout.left_margin + layout.right_margin;
        assert!((total - (400.0 - 30.0 - 200.0 - 20.0)).abs() < 1e-9);
    }

    #[test]
    fn empty_labels_keep_finite_margins() {
        let item = placed(&[("", &[""])]);
        let config = LayoutConfig::default();
        let layout = compute_slope_layout(&item, &config, 100.0).unwrap();
        assert_eq!(layout.left_margin, 0.0);
        assert_eq!(layout.right_margin, 0.0);
        assert_eq!(layout.gap, config.slope.min_gap_width);
        assert!(layout.offset_x.is_finite());
        assert!(layout.lines.iter().all(|line| line.x2.is_finite() && line.y1.is_finite()));
    }

    #[test]
    fn tiny_container_never_flips_margins() {
        let item = placed(&[("Plan", &["Drift"])]);
        let layout = compute_slope_layout(&item, &LayoutConfig::default(), 50.0).unwrap();
        assert_eq!(layout.left_margin, 0.0);
        assert_eq!(layout.right_margin, 0.0);
    }
}
