use serde::{Deserialize, Serialize};

const WORK_COLORS: [&str; 10] = [
    "#FFB74D", "#FF8A65", "#FFA726", "#FF7043", "#FF9800", "#FF5722", "#FB8C00", "#F4511E",
    "#F57C00", "#E64A19",
];

const LEARNING_COLORS: [&str; 10] = [
    "#81D4FA", "#90CAF9", "#4FC3F7", "#64B5F6", "#29B6F6", "#42A5F5", "#03A9F4", "#2196F3",
    "#039BE5", "#1E88E5",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub font_family: String,
    pub font_size: f64,
    pub text_color: String,
    pub background: String,
    pub timeline_color: String,
    pub separator_color: String,
    pub item_stroke: String,
    pub slope_line_color: String,
    pub work_colors: Vec<String>,
    pub learning_colors: Vec<String>,
}

impl Theme {
    pub fn classic() -> Self {
        Self {
            font_family: "Inter, Segoe UI, system-ui, -apple-system, sans-serif".to_string(),
            font_size: 12.0,
            text_color: "#333333".to_string(),
            background: "#FFFFFF".to_string(),
            timeline_color: "#ECEFF1".to_string(),
            separator_color: "#B0BEC5".to_string(),
            item_stroke: "#FFFFFF".to_string(),
            slope_line_color: "#999999".to_string(),
            work_colors: WORK_COLORS.iter().map(|value| value.to_string()).collect(),
            learning_colors: LEARNING_COLORS
                .iter()
                .map(|value| value.to_string())
                .collect(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::classic()
    }
}
