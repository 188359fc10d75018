use crate::calendar::CalendarEvent;
use crate::config::CalendarConfig;
use crate::error::AppError;
use crate::models::{
    AuditEntry, Block, BlockDraft, BlockPatch, Category, CategoryMeta, DayTag, NewBlock, Weekday, CATEGORY_OPTIONS,
};
use crate::schedule::EffectiveDay;
use crate::validation::{parse_category, parse_day};
use serde::{Deserialize, Serialize};

// Requests

#[derive(Deserialize)]
pub struct BlocksQuery {
    pub day: Option<String>,
}

#[derive(Deserialize)]
pub struct CreateBlockRequest {
    pub day: String,
    pub sort_order: Option<i64>,
    pub time_label: String,
    pub category: String,
    pub description: String,
    pub hours: f64,
}

impl CreateBlockRequest {
    pub fn into_new_block(self) -> Result<NewBlock, AppError> {
        Ok(NewBlock {
            day: parse_day(&self.day)?,
            sort_order: self.sort_order.ok_or_else(|| AppError::invalid("sort_order", "is required"))?,
            time_label: self.time_label,
            category: parse_category(&self.category)?,
            description: self.description,
            hours: self.hours,
        })
    }
}

#[derive(Deserialize, Serialize)]
pub struct UpdateBlockRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hours: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<i64>,
}

impl UpdateBlockRequest {
    pub fn to_patch(&self) -> Result<BlockPatch, AppError> {
        let patch = BlockPatch {
            time_label: self.time_label.clone(),
            category: self.category.as_deref().map(parse_category).transpose()?,
            description: self.description.clone(),
            hours: self.hours,
            sort_order: self.sort_order,
        };
        if patch.is_empty() {
            return Err(AppError::invalid("body", "no fields to update"));
        }
        Ok(patch)
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderRequest {
    pub day: String,
    pub ordered_ids: Vec<i64>,
}

#[derive(Deserialize)]
pub struct OverridesQuery {
    pub week: Option<String>,
    pub day: Option<String>,
}

#[derive(Deserialize)]
pub struct OverrideBlockRequest {
    pub time_label: String,
    pub category: String,
    pub description: String,
    pub hours: f64,
}

impl OverrideBlockRequest {
    fn to_draft(&self) -> Result<BlockDraft, AppError> {
        Ok(BlockDraft {
            time_label: self.time_label.clone(),
            category: parse_category(&self.category)?,
            description: self.description.clone(),
            hours: self.hours,
        })
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOverrideRequest {
    pub week_start: String,
    pub day: String,
    #[serde(default)]
    pub blocks: Vec<OverrideBlockRequest>,
    pub note: Option<String>,
}

impl CreateOverrideRequest {
    pub fn drafts(&self) -> Result<Vec<BlockDraft>, AppError> {
        self.blocks.iter().map(OverrideBlockRequest::to_draft).collect()
    }
}

#[derive(Deserialize)]
pub struct SummaryQuery {
    pub week: Option<String>,
}

#[derive(Deserialize)]
pub struct AuditQuery {
    pub limit: Option<u32>,
}

#[derive(Deserialize)]
pub struct CalendarRangeQuery {
    pub start: Option<String>,
    pub end: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    #[serde(default)]
    pub calendar_id: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub start: String,
    #[serde(default)]
    pub end: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub time_zone: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEventRequest {
    #[serde(default)]
    pub calendar_id: String,
    #[serde(default)]
    pub event_id: String,
    #[serde(flatten)]
    pub updates: serde_json::Map<String, serde_json::Value>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteEventQuery {
    pub calendar_id: Option<String>,
    pub event_id: Option<String>,
}

// Responses

#[derive(Serialize)]
pub struct BlocksResponse {
    pub blocks: Vec<Block>,
}

#[derive(Serialize)]
pub struct BlockResponse {
    pub block: Block,
}

#[derive(Serialize)]
pub struct ReorderResponse {
    pub success: bool,
    pub blocks: Vec<Block>,
}

#[derive(Serialize)]
pub struct DeletedResponse {
    pub deleted: bool,
}

#[derive(Serialize)]
#[serde(untagged)]
pub enum OverridesResponse {
    Day(EffectiveDay),
    #[serde(rename_all = "camelCase")]
    Week { override_days: Vec<Weekday> },
}

#[derive(Serialize)]
pub struct RevertedResponse {
    pub reverted: bool,
}

#[derive(Serialize)]
pub struct CategoryInfo {
    pub category: Category,
    pub resolves_to: Category,
    #[serde(flatten)]
    pub meta: CategoryMeta,
}

#[derive(Serialize)]
pub struct DayInfo {
    pub day: Weekday,
    pub tag: DayTag,
}

#[derive(Serialize)]
pub struct CategoriesResponse {
    pub categories: Vec<CategoryInfo>,
    pub days: Vec<DayInfo>,
}

impl CategoriesResponse {
    pub fn build() -> Self {
        Self {
            categories: CATEGORY_OPTIONS
                .into_iter()
                .map(|category| CategoryInfo {
                    category,
                    resolves_to: category.resolve(),
                    meta: *category.meta(),
                })
                .collect(),
            days: Weekday::ALL
                .into_iter()
                .map(|day| DayInfo { day, tag: day.tag() })
                .collect(),
        }
    }
}

#[derive(Serialize)]
pub struct AuditResponse {
    pub entries: Vec<AuditEntry>,
}

#[derive(Serialize)]
pub struct CalendarsResponse {
    pub calendars: Vec<CalendarConfig>,
}

#[derive(Serialize)]
pub struct EventsResponse {
    pub events: Vec<CalendarEvent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
}

#[derive(Serialize)]
pub struct EventResponse {
    pub event: serde_json::Value,
}
