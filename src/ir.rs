use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Serialize, Serializer};

/// Which list an item belongs to. Work and learning items are packed
/// independently and drawn on opposite sides of the timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Work,
    Learning,
}

impl Category {
    pub const ALL: [Category; 2] = [Category::Work, Category::Learning];

    pub fn label(self) -> &'static str {
        match self {
            Category::Work => "work",
            Category::Learning => "learning",
        }
    }

    /// +1 for work (above the timeline), -1 for learning (below it).
    pub fn direction(self) -> f64 {
        match self {
            Category::Work => 1.0,
            Category::Learning => -1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Subtype {
    #[serde(rename = "paidJob")]
    PaidJob,
    #[serde(rename = "face2face")]
    Face2Face,
    #[serde(rename = "volunteering")]
    Volunteering,
    #[serde(rename = "online")]
    Online,
    #[serde(rename = "other")]
    Other,
}

impl Subtype {
    pub fn from_token(token: &str) -> Self {
        match token {
            "paidJob" => Self::PaidJob,
            "face2face" => Self::Face2Face,
            "volunteering" => Self::Volunteering,
            "online" => Self::Online,
            _ => Self::Other,
        }
    }

    /// Paid jobs and face-to-face learning are drawn tapered.
    pub fn is_trapezoidal(self) -> bool {
        matches!(self, Self::PaidJob | Self::Face2Face)
    }
}

/// End of an item: a calendar date, or still ongoing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemEnd {
    Date(NaiveDate),
    Ongoing,
}

/// Marker used in resume data for items without an end date.
pub const ONGOING_MARKER: &str = "-";

impl ItemEnd {
    pub fn is_ongoing(self) -> bool {
        matches!(self, ItemEnd::Ongoing)
    }

    /// Resolve the end against the processing time.
    pub fn resolve(self, now: NaiveDateTime) -> NaiveDateTime {
        match self {
            ItemEnd::Date(date) => date.and_time(NaiveTime::MIN),
            ItemEnd::Ongoing => now,
        }
    }
}

impl Serialize for ItemEnd {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ItemEnd::Date(date) => date.serialize(serializer),
            ItemEnd::Ongoing => serializer.serialize_str(ONGOING_MARKER),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TechUsage {
    pub name: String,
    pub children: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Responsibility {
    pub title: String,
    pub description: String,
    pub achievements: Vec<String>,
    pub problems_addressed: Vec<String>,
    /// Technologies in declaration order, each with its child technologies.
    pub tech_usage: Vec<TechUsage>,
    pub date_start: Option<NaiveDate>,
    pub date_end: Option<ItemEnd>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerItem {
    pub title: String,
    pub place: String,
    pub category: Category,
    #[serde(rename = "type")]
    pub subtype: Subtype,
    pub date_start: NaiveDate,
    pub date_end: ItemEnd,
    pub course: Option<String>,
    pub specialty: Option<String>,
    pub key_figures: Vec<String>,
    pub responsibilities: Vec<Responsibility>,
}

impl CareerItem {
    pub fn new(
        title: impl Into<String>,
        category: Category,
        subtype: Subtype,
        date_start: NaiveDate,
        date_end: ItemEnd,
    ) -> Self {
        Self {
            title: title.into(),
            place: String::new(),
            category,
            subtype,
            date_start,
            date_end,
            course: None,
            specialty: None,
            key_figures: Vec::new(),
            responsibilities: Vec::new(),
        }
    }

    pub fn start(&self) -> NaiveDateTime {
        self.date_start.and_time(NaiveTime::MIN)
    }

    pub fn effective_end(&self, now: NaiveDateTime) -> NaiveDateTime {
        self.date_end.resolve(now)
    }

    pub fn is_ongoing(&self) -> bool {
        self.date_end.is_ongoing()
    }

    /// Key used to pick a fill color: learning items group by course.
    pub fn color_key(&self) -> &str {
        match self.category {
            Category::Work => &self.title,
            Category::Learning => self
                .course
                .as_deref()
                .filter(|course| !course.is_empty())
                .unwrap_or(&self.place),
        }
    }
}

/// The two named item lists of a resume.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Resume {
    pub work: Vec<CareerItem>,
    pub learning: Vec<CareerItem>,
}

impl Resume {
    pub fn items(&self, category: Category) -> &[CareerItem] {
        match category {
            Category::Work => &self.work,
            Category::Learning => &self.learning,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.work.is_empty() && self.learning.is_empty()
    }
}
