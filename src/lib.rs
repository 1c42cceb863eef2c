#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod error;
pub mod ir;
pub mod layout;
pub mod layout_dump;
pub mod parser;
pub mod path;
pub mod render;
pub mod theme;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Config, LayoutConfig, RenderConfig};
pub use error::TimelineError;
pub use ir::{CareerItem, Category, ItemEnd, Resume, Subtype};
pub use layout::{
    compute_item_details, compute_layout, compute_responsibility_table, compute_slope_layout,
    prepare_chart_data,
};
pub use parser::parse_resume;
pub use path::round_path_corners;
pub use render::{
    render_item_details_svg, render_responsibility_table_svg, render_slope_svg, render_svg,
};
pub use theme::Theme;

use chrono::NaiveDateTime;

/// Everything needed to turn resume JSON into SVG in one call.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    pub theme: Theme,
    pub layout: LayoutConfig,
    pub render: RenderConfig,
    /// Processing time used as the end of ongoing items. Defaults to the
    /// current local time.
    pub now: Option<NaiveDateTime>,
}

impl RenderOptions {
    pub fn classic() -> Self {
        Self::default()
    }

    pub fn with_now(mut self, now: NaiveDateTime) -> Self {
        self.now = Some(now);
        self
    }

    fn resolve_now(&self) -> NaiveDateTime {
        self.now
            .unwrap_or_else(|| chrono::Local::now().naive_local())
    }
}

impl From<Config> for RenderOptions {
    fn from(config: Config) -> Self {
        Self {
            theme: config.theme,
            layout: config.layout,
            render: config.render,
            now: None,
        }
    }
}

/// Parse, prepare, lay out and render the timeline chart of a resume.
pub fn render_with_options(input: &str, options: RenderOptions) -> Result<String, TimelineError> {
    let now = options.resolve_now();
    let resume = parse_resume(input)?;
    let chart = prepare_chart_data(resume, now, &options.layout)?;
    let layout = compute_layout(&chart, &options.theme, &options.layout, options.render.width);
    Ok(render_svg(&layout, &options.theme))
}

/// Render the detail view of the item titled `title`: its
/// responsibility-to-problem chart, or its responsibilities table when it
/// addressed no problems.
///
/// Returns `Ok(None)` when the item lists no responsibilities at all.
pub fn render_slope_with_options(
    input: &str,
    title: &str,
    options: RenderOptions,
) -> Result<Option<String>, TimelineError> {
    let now = options.resolve_now();
    let resume = parse_resume(input)?;
    let chart = prepare_chart_data(resume, now, &options.layout)?;
    let placed = chart
        .find(title)
        .ok_or_else(|| TimelineError::Validation(format!("no item titled '{title}'")))?;
    Ok(
        compute_item_details(placed, &options.layout, options.render.width)
            .map(|details| render_item_details_svg(&details, &options.theme, &options.layout.slope)),
    )
}
