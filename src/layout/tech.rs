//! Technology ledger and responsibility-to-problem edges.
//!
//! Every technology mentioned in a responsibility is recorded once in the
//! ledger. Its knowledge level starts as practical when first seen in a work
//! item and theoretical otherwise, and is only ever upgraded afterwards.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Serialize, Serializer};

use crate::ir::{CareerItem, Category, ItemEnd, Responsibility, TechUsage};

use super::types::{SlopeChartData, SlopeEdge};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum KnowledgeLevel {
    Theoretical,
    Practical,
    Both,
}

impl KnowledgeLevel {
    pub fn initial(category: Category) -> Self {
        match category {
            Category::Work => Self::Practical,
            Category::Learning => Self::Theoretical,
        }
    }

    /// Theoretical knowledge becomes practical once used at work.
    pub fn upgraded(self, category: Category) -> Self {
        match (self, category) {
            (Self::Theoretical, Category::Work) => Self::Practical,
            (level, _) => level,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UsageInterval {
    pub start: NaiveDate,
    pub end: ItemEnd,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChildTechnology {
    pub name: String,
    pub knowledge_level: KnowledgeLevel,
    pub usage_intervals: Vec<UsageInterval>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TechnologyEntry {
    pub name: String,
    pub knowledge_level: KnowledgeLevel,
    pub first_used: NaiveDate,
    pub children: Vec<ChildTechnology>,
}

impl TechnologyEntry {
    pub fn child(&self, name: &str) -> Option<&ChildTechnology> {
        self.children.iter().find(|child| child.name == name)
    }

    fn merge_children(&mut self, names: &[String], category: Category, interval: UsageInterval) {
        for name in names {
            match self.children.iter_mut().find(|child| &child.name == name) {
                Some(child) => {
                    child.usage_intervals.push(interval);
                    child.knowledge_level = child.knowledge_level.upgraded(category);
                }
                None => self.children.push(ChildTechnology {
                    name: name.clone(),
                    knowledge_level: self.knowledge_level,
                    usage_intervals: vec![interval],
                }),
            }
        }
    }
}

/// Technologies keyed by name, iterated in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct TechLedger {
    entries: Vec<TechnologyEntry>,
    index: HashMap<String, usize>,
}

impl TechLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&TechnologyEntry> {
        self.index.get(name).map(|&idx| &self.entries[idx])
    }

    pub fn iter(&self) -> impl Iterator<Item = &TechnologyEntry> {
        self.entries.iter()
    }

    /// Merge one technology usage from an item starting on `item_start`.
    pub fn record(
        &mut self,
        usage: &TechUsage,
        category: Category,
        item_start: NaiveDate,
        interval: UsageInterval,
    ) {
        let idx = match self.index.get(&usage.name) {
            Some(&idx) => {
                let entry = &mut self.entries[idx];
                entry.knowledge_level = entry.knowledge_level.upgraded(category);
                entry.first_used = entry.first_used.min(item_start);
                idx
            }
            None => {
                self.entries.push(TechnologyEntry {
                    name: usage.name.clone(),
                    knowledge_level: KnowledgeLevel::initial(category),
                    first_used: item_start,
                    children: Vec::new(),
                });
                self.index.insert(usage.name.clone(), self.entries.len() - 1);
                self.entries.len() - 1
            }
        };
        self.entries[idx].merge_children(&usage.children, category, interval);
    }
}

impl Serialize for TechLedger {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.entries.serialize(serializer)
    }
}

/// Edges from each responsibility to the problems it addressed.
pub fn slope_chart_data(item: &CareerItem) -> SlopeChartData {
    let mut data = SlopeChartData::default();
    for responsibility in &item.responsibilities {
        for problem in &responsibility.problems_addressed {
            data.edges.push(SlopeEdge {
                responsibility: responsibility.title.clone(),
                problem: problem.clone(),
            });
            if !data.problems.contains(problem) {
                data.problems.push(problem.clone());
            }
        }
    }
    data
}

fn usage_interval(item: &CareerItem, responsibility: &Responsibility) -> UsageInterval {
    UsageInterval {
        start: responsibility.date_start.unwrap_or(item.date_start),
        end: responsibility.date_end.unwrap_or(item.date_end),
    }
}

/// Fold `items` into `ledger` and return slope-chart data per item, in order.
pub fn aggregate_into<'a>(
    ledger: &mut TechLedger,
    items: impl IntoIterator<Item = &'a CareerItem>,
) -> Vec<SlopeChartData> {
    items
        .into_iter()
        .map(|item| {
            for responsibility in &item.responsibilities {
                let interval = usage_interval(item, responsibility);
                for usage in &responsibility.tech_usage {
                    ledger.record(usage, item.category, item.date_start, interval);
                }
            }
            slope_chart_data(item)
        })
        .collect()
}

/// Build a fresh ledger over `items` plus per-item slope-chart data.
pub fn aggregate<'a>(
    items: impl IntoIterator<Item = &'a CareerItem>,
) -> (TechLedger, Vec<SlopeChartData>) {
    let mut ledger = TechLedger::new();
    let slopes = aggregate_into(&mut ledger, items);
    (ledger, slopes)
}
