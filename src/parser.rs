use crate::error::{Result, TimelineError};
use crate::ir::{
    CareerItem, Category, ItemEnd, ONGOING_MARKER, Responsibility, Resume, Subtype, TechUsage,
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawResume {
    work: Option<Vec<RawItem>>,
    learning: Option<Vec<RawItem>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawItem {
    title: String,
    #[serde(default)]
    place: String,
    #[serde(rename = "type", default)]
    subtype: Option<String>,
    date_start: String,
    date_end: String,
    course: Option<String>,
    specialty: Option<String>,
    #[serde(default)]
    key_figures: Vec<String>,
    #[serde(default)]
    responsibilities: Vec<RawResponsibility>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawResponsibility {
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    achievements: Vec<String>,
    #[serde(default)]
    problems_addressed: Vec<String>,
    #[serde(default)]
    tech: Option<Map<String, Value>>,
    date_start: Option<String>,
    date_end: Option<String>,
}

/// Parse a resume document with `work` and `learning` item lists.
///
/// Strict JSON is tried first, then JSON5 (comments, trailing commas).
pub fn parse_resume(input: &str) -> Result<Resume> {
    let value = parse_document(input)?;
    let raw: RawResume = serde_json::from_value(value)
        .map_err(|err| TimelineError::validation(format!("unexpected resume shape: {err}")))?;
    let work = raw
        .work
        .ok_or_else(|| TimelineError::validation("missing `work` list"))?;
    let learning = raw
        .learning
        .ok_or_else(|| TimelineError::validation("missing `learning` list"))?;
    Ok(Resume {
        work: convert_items(work, Category::Work)?,
        learning: convert_items(learning, Category::Learning)?,
    })
}

fn parse_document(input: &str) -> Result<Value> {
    match serde_json::from_str::<Value>(input) {
        Ok(value) => Ok(value),
        Err(json_err) => json5::from_str::<Value>(input).map_err(|_| {
            TimelineError::validation(format!("resume is neither JSON nor JSON5: {json_err}"))
        }),
    }
}

fn convert_items(items: Vec<RawItem>, category: Category) -> Result<Vec<CareerItem>> {
    items
        .into_iter()
        .map(|raw| convert_item(raw, category))
        .collect()
}

fn convert_item(raw: RawItem, category: Category) -> Result<CareerItem> {
    let context = |field: &str| format!("{} item '{}': {field}", category.label(), raw.title);
    let date_start = parse_date(&raw.date_start).map_err(|msg| {
        TimelineError::validation(format!("{} {msg}", context("dateStart")))
    })?;
    let date_end = parse_end(&raw.date_end)
        .map_err(|msg| TimelineError::validation(format!("{} {msg}", context("dateEnd"))))?;
    if let ItemEnd::Date(end) = date_end {
        if end < date_start {
            return Err(TimelineError::validation(format!(
                "{} ends on {end}, before it starts on {date_start}",
                context("dates")
            )));
        }
    }

    let responsibilities = raw
        .responsibilities
        .into_iter()
        .map(|responsibility| convert_responsibility(responsibility, &raw.title))
        .collect::<Result<Vec<_>>>()?;

    Ok(CareerItem {
        subtype: raw
            .subtype
            .as_deref()
            .map(Subtype::from_token)
            .unwrap_or(Subtype::Other),
        title: raw.title,
        place: raw.place,
        category,
        date_start,
        date_end,
        course: raw.course,
        specialty: raw.specialty,
        key_figures: raw.key_figures,
        responsibilities,
    })
}

fn convert_responsibility(raw: RawResponsibility, item_title: &str) -> Result<Responsibility> {
    let invalid = |msg: String| {
        TimelineError::validation(format!(
            "responsibility '{}' of '{item_title}': {msg}",
            raw.title
        ))
    };
    let date_start = raw
        .date_start
        .as_deref()
        .map(parse_date)
        .transpose()
        .map_err(|msg| invalid(format!("dateStart {msg}")))?;
    let date_end = raw
        .date_end
        .as_deref()
        .map(parse_end)
        .transpose()
        .map_err(|msg| invalid(format!("dateEnd {msg}")))?;

    let mut problems_addressed: Vec<String> = Vec::with_capacity(raw.problems_addressed.len());
    for problem in raw.problems_addressed {
        if !problems_addressed.contains(&problem) {
            problems_addressed.push(problem);
        }
    }

    let tech_usage = raw
        .tech
        .unwrap_or_default()
        .into_iter()
        .map(|(name, children)| {
            convert_children(children)
                .map(|children| TechUsage { name, children })
                .map_err(&invalid)
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Responsibility {
        title: raw.title,
        description: raw.description,
        achievements: raw.achievements,
        problems_addressed,
        tech_usage,
        date_start,
        date_end,
    })
}

fn convert_children(value: Value) -> std::result::Result<Vec<String>, String> {
    match value {
        Value::Null => Ok(Vec::new()),
        Value::Array(entries) => entries
            .into_iter()
            .map(|entry| match entry {
                Value::String(name) => Ok(name),
                other => Err(format!("child technology must be a string, got {other}")),
            })
            .collect(),
        other => Err(format!("technology children must be a list, got {other}")),
    }
}

fn parse_date(value: &str) -> std::result::Result<NaiveDate, String> {
    let trimmed = value.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(&format!("{trimmed}-01"), "%Y-%m-%d"))
        .map_err(|_| format!("'{value}' is not a YYYY-MM-DD date"))
}

fn parse_end(value: &str) -> std::result::Result<ItemEnd, String> {
    if value.trim() == ONGOING_MARKER {
        return Ok(ItemEnd::Ongoing);
    }
    parse_date(value).map(ItemEnd::Date)
}
