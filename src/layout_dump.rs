use crate::ir::{Category, ItemEnd, Subtype};
use crate::layout::{ChartData, DateRange, Layout, TechnologyEntry};
use chrono::NaiveDate;
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

#[derive(Debug, Serialize)]
pub struct LayoutDump<'a> {
    pub width: f64,
    pub height: f64,
    pub range: DateRange,
    pub items: Vec<ItemDump>,
    pub technologies: Vec<&'a TechnologyEntry>,
}

#[derive(Debug, Serialize)]
pub struct ItemDump {
    pub title: String,
    pub category: Category,
    pub subtype: Subtype,
    pub date_start: NaiveDate,
    pub date_end: ItemEnd,
    pub layer: usize,
    /// Data-space outline as `[date, offset]` pairs.
    pub polygon: Vec<(String, f64)>,
    pub points: Vec<[f64; 2]>,
    pub path: String,
    pub fill: String,
    pub problems: Vec<String>,
}

impl<'a> LayoutDump<'a> {
    pub fn from_layout(layout: &Layout, chart: &'a ChartData) -> Self {
        // Layout items follow the chart's category and layer order.
        let placed_items = Category::ALL
            .into_iter()
            .flat_map(|category| chart.items(category).iter());
        let items = layout
            .items
            .iter()
            .zip(placed_items)
            .map(|(item, placed)| {
                ItemDump {
                    title: item.title.clone(),
                    category: item.category,
                    subtype: placed.item.subtype,
                    date_start: placed.item.date_start,
                    date_end: placed.item.date_end,
                    layer: item.layer,
                    polygon: placed
                        .polygon
                        .iter()
                        .map(|point| (point.date.format("%Y-%m-%dT%H:%M:%S").to_string(), point.offset))
                        .collect(),
                    points: item.points.iter().map(|(x, y)| [*x, *y]).collect(),
                    path: item.path.clone(),
                    fill: item.fill.clone(),
                    problems: placed.slope.problems.clone(),
                }
            })
            .collect();

        LayoutDump {
            width: layout.width,
            height: layout.height,
            range: chart.range,
            items,
            technologies: chart.ledger.iter().collect(),
        }
    }
}

pub fn write_layout_dump(path: &Path, layout: &Layout, chart: &ChartData) -> anyhow::Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let dump = LayoutDump::from_layout(layout, chart);
    serde_json::to_writer_pretty(writer, &dump)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LayoutConfig;
    use crate::ir::{CareerItem, Resume};
    use crate::layout::{compute_layout, prepare_chart_data};
    use crate::theme::Theme;

    #[test]
    fn dump_lists_every_item_with_its_layer() {
        let start = NaiveDate::from_ymd_opt(2019, 1, 1).unwrap();
        let resume = Resume {
            work: vec![
                CareerItem::new("A", Category::Work, Subtype::PaidJob, start, ItemEnd::Ongoing),
                CareerItem::new("B", Category::Work, Subtype::Volunteering, start, ItemEnd::Ongoing),
            ],
            learning: Vec::new(),
        };
        let config = LayoutConfig::default();
        let now = NaiveDate::from_ymd_opt(2020, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let chart = prepare_chart_data(resume, now, &config).unwrap();
        let layout = compute_layout(&chart, &Theme::classic(), &config, 800.0);
        let dump = LayoutDump::from_layout(&layout, &chart);
        assert_eq!(dump.items.len(), 2);
        let value = serde_json::to_value(&dump).unwrap();
        assert_eq!(value["items"][0]["title"], "B");
        assert_eq!(value["items"][0]["layer"], 1);
        assert_eq!(value["items"][1]["date_end"], "-");
        assert_eq!(value["items"][1]["subtype"], "paidJob");
    }
}
