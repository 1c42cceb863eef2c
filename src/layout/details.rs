use super::*;

/// Share of the table width taken by the responsibility, description and
/// achievements columns.
const COLUMN_SHARES: [f64; 3] = [0.25, 0.4, 0.35];
const BULLET: &str = "• ";
const BULLET_INDENT: &str = "  ";

/// Greedy word wrap to at most `max_chars` characters per line.
///
/// Words longer than a line are split across lines.
fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut lines = Vec::new();
    let mut line = String::new();
    let mut line_len = 0;
    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > max_chars {
            if line_len > 0 {
                lines.push(std::mem::take(&mut line));
                line_len = 0;
            }
            lines.push(word.drain(..max_chars).collect());
        }
        if word.is_empty() {
            continue;
        }
        if line_len > 0 && line_len + 1 + word.len() > max_chars {
            lines.push(std::mem::take(&mut line));
            line_len = 0;
        }
        if line_len > 0 {
            line.push(' ');
            line_len += 1;
        }
        line_len += word.len();
        line.extend(word);
    }
    if line_len > 0 {
        lines.push(line);
    }
    lines
}

fn wrap_achievements(achievements: &[String], max_chars: usize) -> Vec<String> {
    let indent = BULLET.chars().count();
    achievements
        .iter()
        .flat_map(|achievement| {
            wrap_text(achievement, max_chars.saturating_sub(indent))
                .into_iter()
                .enumerate()
                .map(|(idx, line)| {
                    let prefix = if idx == 0 { BULLET } else { BULLET_INDENT };
                    format!("{prefix}{line}")
                })
        })
        .collect()
}

/// Lay out the responsibilities of one item as a three-column table.
///
/// Returns `None` when the item lists no responsibilities.
pub fn compute_responsibility_table(
    placed: &PlacedItem,
    config: &LayoutConfig,
    available_width: f64,
) -> Option<ResponsibilityTableLayout> {
    let responsibilities = &placed.item.responsibilities;
    if responsibilities.is_empty() {
        return None;
    }
    let slope = &config.slope;
    let usable = (available_width - 2.0 * slope.left_margin).max(0.0);
    let columns = [
        0.0,
        usable * COLUMN_SHARES[0],
        usable * (COLUMN_SHARES[0] + COLUMN_SHARES[1]),
    ];
    let max_chars = COLUMN_SHARES.map(|share| {
        let text_width = (usable * share - slope.label_offset).max(0.0);
        (text_width / slope.label_char_width).floor() as usize
    });

    let mut y = 0.0;
    let rows = responsibilities
        .iter()
        .map(|responsibility| {
            let title = wrap_text(&responsibility.title, max_chars[0]);
            let description = wrap_text(&responsibility.description, max_chars[1]);
            let achievements = wrap_achievements(&responsibility.achievements, max_chars[2]);
            let lines = title.len().max(description.len()).max(achievements.len()).max(1);
            let height = lines as f64 * slope.line_height + 2.0 * slope.row_padding;
            let row = ResponsibilityRowLayout {
                y,
                height,
                title,
                description,
                achievements,
            };
            y += height;
            row
        })
        .collect();

    Some(ResponsibilityTableLayout {
        title: placed.item.title.clone(),
        width: available_width,
        height: y,
        offset_x: slope.left_margin,
        offset_y: slope.header_offset,
        columns,
        line_height: slope.line_height,
        rows,
    })
}

/// The slope chart when the item addressed problems, its responsibilities
/// table otherwise.
pub fn compute_item_details(
    placed: &PlacedItem,
    config: &LayoutConfig,
    available_width: f64,
) -> Option<ItemDetailLayout> {
    if let Some(slope) = compute_slope_layout(placed, config, available_width) {
        return Some(ItemDetailLayout::Slope(slope));
    }
    compute_responsibility_table(placed, config, available_width).map(ItemDetailLayout::Table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{Responsibility, Subtype};

    fn responsibility(title: &str, description: &str, achievements: &[&str], problems: &[&str]) -> Responsibility {
        Responsibility {
            title: title.to_string(),
            description: description.to_string(),
            achievements: achievements.iter().map(|a| a.to_string()).collect(),
            problems_addressed: problems.iter().map(|p| p.to_string()).collect(),
            tech_usage: Vec::new(),
            date_start: None,
            date_end: None,
        }
    }

    fn placed(responsibilities: Vec<Responsibility>) -> PlacedItem {
        let start = NaiveDate::from_ymd_opt(2012, 9, 1).unwrap();
        let mut item = CareerItem::new("MSc", Category::Learning, Subtype::Face2Face, start, ItemEnd::Ongoing);
        item.responsibilities = responsibilities;
        let slope = tech::slope_chart_data(&item);
        let point = ChartPoint {
            date: item.start(),
            offset: -4.0,
        };
        PlacedItem {
            item,
            layer: 0,
            polygon: [point; 4],
            slope,
        }
    }

    #[test]
    fn wraps_on_word_boundaries() {
        assert_eq!(wrap_text("ship the new build", 8), vec!["ship the", "new", "build"]);
        assert_eq!(wrap_text("  spaced   out  ", 20), vec!["spaced out"]);
        assert_eq!(wrap_text("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
        assert!(wrap_text("", 10).is_empty());
    }

    #[test]
    fn achievements_get_bullets() {
        let lines = wrap_achievements(&["Cut build time in half".to_string(), "Won".to_string()], 12);
        assert_eq!(lines, vec!["• Cut build", "  time in", "  half", "• Won"]);
    }

    #[test]
    fn rows_grow_with_their_tallest_cell() {
        let item = placed(vec![
            responsibility("Thesis", "", &[], &[]),
            responsibility(
                "Teaching assistant",
                "Ran weekly lab sessions for the introductory programming course",
                &["Rewrote the lab handouts"],
                &[],
            ),
        ]);
        let config = LayoutConfig::default();
        let table = compute_responsibility_table(&item, &config, 600.0).unwrap();
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.columns[1], 135.0);
        assert!((table.columns[2] - 351.0).abs() < 1e-9);

        let first = &table.rows[0];
        assert_eq!(first.y, 0.0);
        assert_eq!(first.height, 18.0 + 16.0);
        assert!(first.description.is_empty());

        let second = &table.rows[1];
        assert_eq!(second.y, first.height);
        assert!(second.description.len() > 1);
        assert_eq!(second.height, second.description.len() as f64 * 18.0 + 16.0);
        assert_eq!(table.height, first.height + second.height);
    }

    #[test]
    fn details_prefer_the_slope_chart() {
        let config = LayoutConfig::default();
        let with_problems = placed(vec![responsibility("Thesis", "", &[], &["No benchmark"])]);
        assert!(matches!(
            compute_item_details(&with_problems, &config, 900.0),
            Some(ItemDetailLayout::Slope(_))
        ));

        let without = placed(vec![responsibility("Thesis", "Distributed caching", &[], &[])]);
        assert!(matches!(
            compute_item_details(&without, &config, 900.0),
            Some(ItemDetailLayout::Table(_))
        ));

        assert!(compute_item_details(&placed(Vec::new()), &config, 900.0).is_none());
    }
}
