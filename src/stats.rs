//! Hour totals by category, with sub-tags folded into their parent venture.

use crate::constants::{TARGET_TOLERANCE_HOURS, WEEKLY_TARGETS};
use crate::models::{Block, Category, Weekday};
use crate::schedule::EffectiveDay;
use serde::Serialize;
use std::collections::BTreeMap;

/// Sum hours per resolved category.
pub fn aggregate<'a>(blocks: impl IntoIterator<Item = &'a Block>) -> BTreeMap<Category, f64> {
    let mut totals = BTreeMap::new();
    for block in blocks {
        *totals.entry(block.category.resolve()).or_insert(0.0) += block.hours;
    }
    totals
}

/// Within the tolerance band around `target`.
pub fn hit_target(total: f64, target: f64) -> bool {
    (total - target).abs() < TARGET_TOLERANCE_HOURS
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackedTotal {
    pub category: Category,
    pub label: &'static str,
    pub hours: f64,
    pub target: Option<f64>,
    pub hit: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekSummary {
    pub totals: BTreeMap<Category, f64>,
    pub tracked: Vec<TrackedTotal>,
    pub override_days: Vec<Weekday>,
}

/// Weekly totals across all days, with the tracked categories checked against targets.
pub fn week_summary(days: &[EffectiveDay]) -> WeekSummary {
    let totals = aggregate(days.iter().flat_map(|d| d.blocks.iter()));

    let tracked = WEEKLY_TARGETS
        .iter()
        .map(|&(category, target)| {
            let hours = totals.get(&category).copied().unwrap_or(0.0);
            TrackedTotal {
                category,
                label: category.meta().label,
                hours,
                target,
                hit: target.map(|t| hit_target(hours, t)),
            }
        })
        .collect();

    WeekSummary {
        totals,
        tracked,
        override_days: days.iter().filter(|d| d.is_override).map(|d| d.day).collect(),
    }
}
