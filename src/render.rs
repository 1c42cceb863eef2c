use crate::config::{RenderConfig, SlopeChartConfig};
use crate::ir::Category;
use crate::layout::{ItemDetailLayout, Layout, ResponsibilityTableLayout, SlopeChartLayout};
use crate::theme::Theme;
use anyhow::Result;
use std::path::Path;

/// Serialize the timeline layout as a standalone SVG document.
pub fn render_svg(layout: &Layout, theme: &Theme) -> String {
    let mut svg = String::new();
    let width = layout.width.max(1.0);
    let height = layout.height.max(1.0);

    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" class=\"career-timeline\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">",
    ));
    svg.push_str(&format!(
        "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>",
        theme.background
    ));
    svg.push_str(&format!(
        "<g transform=\"translate({},{})\">",
        layout.offset_x, layout.offset_y
    ));

    for category in Category::ALL {
        let class = match category {
            Category::Work => "workPolygon",
            Category::Learning => "learningPolygon",
        };
        for item in layout.items.iter().filter(|item| item.category == category) {
            svg.push_str(&format!(
                "<path class=\"{class}\" d=\"{}\" fill=\"{}\" stroke=\"{}\" stroke-width=\"2\"><title>{}</title></path>",
                item.path,
                item.fill,
                theme.item_stroke,
                escape_xml(&item.tooltip)
            ));
        }
    }

    let timeline = &layout.timeline;
    svg.push_str("<g class=\"timeline\">");
    svg.push_str(&format!(
        "<rect class=\"timeline-rect\" x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" fill=\"{}\"/>",
        timeline.band.x,
        timeline.band.y,
        timeline.band.width,
        timeline.band.height,
        theme.timeline_color
    ));
    for label in &timeline.year_labels {
        svg.push_str(&format!(
            "<text class=\"year-label\" x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"middle\" dominant-baseline=\"central\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\">{}</text>",
            label.x,
            label.y,
            escape_xml(&theme.font_family),
            theme.font_size,
            theme.text_color,
            label.year
        ));
    }
    for separator in &timeline.separators {
        svg.push_str(&format!(
            "<rect class=\"year-separator\" x=\"{:.2}\" y=\"{:.2}\" width=\"{}\" height=\"{:.2}\" fill=\"{}\"/>",
            separator.x,
            separator.y,
            separator.width,
            separator.height,
            theme.separator_color
        ));
    }
    svg.push_str("</g></g></svg>");
    svg
}

/// Serialize one item's responsibility-to-problem chart.
pub fn render_slope_svg(layout: &SlopeChartLayout, theme: &Theme, config: &SlopeChartConfig) -> String {
    let mut svg = String::new();
    let width = layout.width.max(1.0);
    let height = (layout.height + layout.offset_y).max(1.0);
    let label_offset = config.label_offset;

    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" class=\"r2pSlopegraph\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">",
    ));
    svg.push_str(&format!(
        "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>",
        theme.background
    ));
    svg.push_str(&format!(
        "<g class=\"g_slope\" transform=\"translate({:.2},{:.2})\">",
        layout.offset_x, layout.offset_y
    ));

    let text_attrs = format!(
        "font-family=\"{}\" font-size=\"{}\" fill=\"{}\"",
        escape_xml(&theme.font_family),
        theme.font_size,
        theme.text_color
    );
    svg.push_str(&format!(
        "<text class=\"slope-header\" x=\"{:.2}\" y=\"-5\" text-anchor=\"end\" font-weight=\"bold\" {text_attrs}>Responsibilities</text>",
        -label_offset
    ));
    svg.push_str(&format!(
        "<text class=\"slope-header\" x=\"{:.2}\" y=\"-5\" text-anchor=\"start\" font-weight=\"bold\" {text_attrs}>Problems addressed</text>",
        layout.gap + label_offset
    ));

    for line in &layout.lines {
        svg.push_str(&format!(
            "<line class=\"slope-line\" x1=\"{:.2}\" y1=\"{:.2}\" x2=\"{:.2}\" y2=\"{:.2}\" stroke=\"{}\" stroke-width=\"1.2\"/>",
            line.x1, line.y1, line.x2, line.y2, theme.slope_line_color
        ));
    }
    for label in &layout.left_labels {
        svg.push_str(&format!(
            "<text class=\"slope-label left\" x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"end\" dominant-baseline=\"central\" {text_attrs}>{}</text>",
            -label_offset,
            label.y,
            escape_xml(&label.text)
        ));
    }
    for label in &layout.right_labels {
        svg.push_str(&format!(
            "<text class=\"slope-label right\" x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"start\" dominant-baseline=\"central\" {text_attrs}>{}</text>",
            layout.gap + label_offset,
            label.y,
            escape_xml(&label.text)
        ));
    }

    svg.push_str("</g></svg>");
    svg
}

/// Serialize one item's responsibilities as a three-column table.
pub fn render_responsibility_table_svg(layout: &ResponsibilityTableLayout, theme: &Theme) -> String {
    let mut svg = String::new();
    let width = layout.width.max(1.0);
    let height = (layout.height + layout.offset_y).max(1.0);
    let line_height = layout.line_height;

    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" class=\"place-details\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">",
    ));
    svg.push_str(&format!(
        "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>",
        theme.background
    ));
    svg.push_str(&format!(
        "<g class=\"responsibility-table\" transform=\"translate({:.2},{:.2})\">",
        layout.offset_x, layout.offset_y
    ));

    let text_attrs = format!(
        "font-family=\"{}\" font-size=\"{}\" fill=\"{}\"",
        escape_xml(&theme.font_family),
        theme.font_size,
        theme.text_color
    );
    let classes = [
        "responsibility-title",
        "responsibility-description",
        "responsibility-achievements",
    ];
    svg.push_str("<g class=\"responsibility-header\">");
    for ((x, class), header) in layout
        .columns
        .iter()
        .zip(classes)
        .zip(["Responsibility", "Description", "Achievements"])
    {
        svg.push_str(&format!(
            "<text class=\"{class}\" x=\"{x:.2}\" y=\"-5\" font-weight=\"bold\" {text_attrs}>{header}</text>",
        ));
    }
    svg.push_str("</g>");

    let table_width = layout.width - 2.0 * layout.offset_x;
    for row in &layout.rows {
        svg.push_str("<g class=\"responsibility-row\">");
        svg.push_str(&format!(
            "<line x1=\"0\" y1=\"{:.2}\" x2=\"{:.2}\" y2=\"{:.2}\" stroke=\"{}\" stroke-width=\"1\"/>",
            row.y, table_width, row.y, theme.separator_color
        ));
        let padding = (row.height - line_height * row_lines(row) as f64) / 2.0;
        let cells = [&row.title, &row.description, &row.achievements];
        for ((x, class), lines) in layout.columns.iter().zip(classes).zip(cells) {
            for (idx, line) in lines.iter().enumerate() {
                let y = row.y + padding + line_height * (idx as f64 + 0.5);
                svg.push_str(&format!(
                    "<text class=\"{class}\" x=\"{x:.2}\" y=\"{y:.2}\" dominant-baseline=\"central\" {text_attrs}>{}</text>",
                    escape_xml(line)
                ));
            }
        }
        svg.push_str("</g>");
    }

    svg.push_str("</g></svg>");
    svg
}

fn row_lines(row: &crate::layout::ResponsibilityRowLayout) -> usize {
    row.title
        .len()
        .max(row.description.len())
        .max(row.achievements.len())
        .max(1)
}

/// Serialize whichever detail view was laid out for an item.
pub fn render_item_details_svg(layout: &ItemDetailLayout, theme: &Theme, config: &SlopeChartConfig) -> String {
    match layout {
        ItemDetailLayout::Slope(slope) => render_slope_svg(slope, theme, config),
        ItemDetailLayout::Table(table) => render_responsibility_table_svg(table, theme),
    }
}

pub fn write_output_svg(svg: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, svg)?;
        }
        None => {
            print!("{}", svg);
        }
    }
    Ok(())
}

#[cfg(feature = "png")]
pub fn write_output_png(svg: &str, output: &Path, render_cfg: &RenderConfig) -> Result<()> {
    let mut opt = usvg::Options::default();
    opt.default_size = usvg::Size::from_wh(render_cfg.width as f32, render_cfg.height as f32)
        .or_else(|| usvg::Size::from_wh(800.0, 600.0))
        .ok_or_else(|| anyhow::anyhow!("Invalid default canvas size"))?;

    let tree = usvg::Tree::from_str(svg, &opt)?;
    let size = tree.size().to_int_size();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| anyhow::anyhow!("Failed to allocate pixmap"))?;

    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(&tree, resvg::tiny_skia::Transform::default(), &mut pixmap_mut);
    pixmap.save_png(output)?;
    Ok(())
}

#[cfg(not(feature = "png"))]
pub fn write_output_png(_svg: &str, _output: &Path, _render_cfg: &RenderConfig) -> Result<()> {
    anyhow::bail!("PNG output requires the `png` feature")
}

pub(crate) fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LayoutConfig;
    use crate::ir::{CareerItem, ItemEnd, Responsibility, Resume, Subtype};
    use crate::layout::{compute_item_details, compute_layout, compute_slope_layout, prepare_chart_data};
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn resume() -> Resume {
        let mut job = CareerItem::new(
            "R&D <lead>",
            Category::Work,
            Subtype::PaidJob,
            date(2017, 4, 1),
            ItemEnd::Date(date(2020, 2, 1)),
        );
        job.responsibilities.push(Responsibility {
            title: "Roadmap".to_string(),
            description: String::new(),
            achievements: Vec::new(),
            problems_addressed: vec!["Missed deadlines".to_string()],
            tech_usage: Vec::new(),
            date_start: None,
            date_end: None,
        });
        let course = CareerItem::new(
            "Statistics",
            Category::Learning,
            Subtype::Face2Face,
            date(2016, 9, 1),
            ItemEnd::Ongoing,
        );
        Resume {
            work: vec![job],
            learning: vec![course],
        }
    }

    #[test]
    fn render_timeline_svg() {
        let config = LayoutConfig::default();
        let now = date(2021, 1, 1).and_hms_opt(0, 0, 0).unwrap();
        let chart = prepare_chart_data(resume(), now, &config).unwrap();
        let theme = Theme::classic();
        let layout = compute_layout(&chart, &theme, &config, 1000.0);
        let svg = render_svg(&layout, &theme);
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert_eq!(svg.matches("class=\"workPolygon\"").count(), 1);
        assert_eq!(svg.matches("class=\"learningPolygon\"").count(), 1);
        assert!(svg.contains("R&amp;D &lt;lead&gt;"));
        assert!(svg.contains(">2016</text>"));
        assert!(svg.contains(">2021</text>"));
        assert_eq!(svg.matches("year-separator").count(), 5);
    }

    #[test]
    fn render_slope_chart_svg() {
        let config = LayoutConfig::default();
        let now = date(2021, 1, 1).and_hms_opt(0, 0, 0).unwrap();
        let chart = prepare_chart_data(resume(), now, &config).unwrap();
        let placed = chart.find("R&D <lead>").unwrap();
        let slope = compute_slope_layout(placed, &config, 900.0).unwrap();
        let svg = render_slope_svg(&slope, &Theme::classic(), &config.slope);
        assert!(svg.contains(">Responsibilities</text>"));
        assert!(svg.contains(">Problems addressed</text>"));
        assert!(svg.contains(">Missed deadlines</text>"));
        assert_eq!(svg.matches("<line ").count(), 1);
    }

    #[test]
    fn quoted_font_family_stays_inside_its_attribute() {
        let config = LayoutConfig::default();
        let now = date(2021, 1, 1).and_hms_opt(0, 0, 0).unwrap();
        let chart = prepare_chart_data(resume(), now, &config).unwrap();
        let theme = Theme {
            font_family: "\"Fira Sans\", sans-serif".to_string(),
            ..Theme::classic()
        };
        let escaped = "font-family=\"&quot;Fira Sans&quot;, sans-serif\"";

        let layout = compute_layout(&chart, &theme, &config, 1000.0);
        let svg = render_svg(&layout, &theme);
        assert!(svg.contains(escaped));
        assert!(!svg.contains("font-family=\"\"Fira"));

        let placed = chart.find("R&D <lead>").unwrap();
        let slope = compute_slope_layout(placed, &config, 900.0).unwrap();
        let svg = render_slope_svg(&slope, &theme, &config.slope);
        assert_eq!(svg.matches(escaped).count(), svg.matches("<text ").count());
    }

    #[test]
    fn item_without_problems_renders_a_table() {
        let config = LayoutConfig::default();
        let now = date(2021, 1, 1).and_hms_opt(0, 0, 0).unwrap();
        let mut resume = resume();
        resume.learning[0].responsibilities.push(Responsibility {
            title: "Coursework".to_string(),
            description: "Regression & sampling".to_string(),
            achievements: vec!["Top of class".to_string(), "Tutored peers".to_string()],
            problems_addressed: Vec::new(),
            tech_usage: Vec::new(),
            date_start: None,
            date_end: None,
        });
        let chart = prepare_chart_data(resume, now, &config).unwrap();
        let details = compute_item_details(chart.find("Statistics").unwrap(), &config, 900.0).unwrap();
        let svg = render_item_details_svg(&details, &Theme::classic(), &config.slope);
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains(">Responsibility</text>"));
        assert!(svg.contains(">Description</text>"));
        assert!(svg.contains(">Achievements</text>"));
        assert!(svg.contains(">Coursework</text>"));
        assert!(svg.contains(">Regression &amp; sampling</text>"));
        assert!(svg.contains(">• Top of class</text>"));
        assert_eq!(svg.matches("class=\"responsibility-row\"").count(), 1);
        assert!(!svg.contains("slope-line"));
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(escape_xml("a<b & 'c'"), "a&lt;b &amp; &apos;c&apos;");
    }
}
