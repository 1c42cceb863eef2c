use super::*;

/// January 1st of every year from the range's first to its last year.
pub fn year_ticks(range: &DateRange) -> Vec<NaiveDateTime> {
    (range.min.year()..=range.max.year())
        .filter_map(|year| NaiveDate::from_ymd_opt(year, 1, 1))
        .map(|date| date.and_time(NaiveTime::MIN))
        .collect()
}

fn mid_year(year: i32) -> Option<NaiveDateTime> {
    NaiveDate::from_ymd_opt(year, 7, 1).map(|date| date.and_time(NaiveTime::MIN))
}

pub(super) fn compute_timeline_layout(
    range: &DateRange,
    x: &TimeScale,
    y: &LinearScale,
    config: &LayoutConfig,
) -> TimelineLayout {
    let ticks = year_ticks(range);
    let band_start = ticks.first().map(|tick| x.map(*tick)).unwrap_or(x.map(range.min));
    let band_top = y.map(config.timeline_band_offset);
    let band = RectLayout {
        x: band_start,
        y: band_top,
        width: x.map(range.max) - band_start,
        height: y.map(-config.timeline_band_offset) - band_top,
    };

    let year_labels = ticks
        .iter()
        .filter_map(|tick| {
            let year = tick.year();
            mid_year(year).map(|mid| YearLabelLayout {
                year,
                x: x.map(mid),
                y: y.map(0.0),
            })
        })
        .collect();

    let separator_top = y.map(config.separator_offset);
    let separators = ticks
        .iter()
        .skip(1)
        .map(|tick| RectLayout {
            x: x.map(*tick),
            y: separator_top,
            width: config.separator_width,
            height: y.map(-config.separator_offset) - separator_top,
        })
        .collect();

    TimelineLayout {
        band,
        year_labels,
        separators,
    }
}
