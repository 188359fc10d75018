use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};

/// Closed set of block categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Sleep,
    Gym,
    Immutable,
    Engineroom,
    Fitfocus,
    CommuteEr,
    CommuteFf,
    Personal,
    Meeting,
    Life,
}

/// Display metadata for a category. Presentational only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryMeta {
    pub color: &'static str,
    pub text: &'static str,
    pub icon: &'static str,
    pub label: &'static str,
}

/// Picker order used by editors.
pub const CATEGORY_OPTIONS: [Category; 10] = [
    Category::Immutable,
    Category::Engineroom,
    Category::Fitfocus,
    Category::Gym,
    Category::CommuteEr,
    Category::CommuteFf,
    Category::Meeting,
    Category::Life,
    Category::Personal,
    Category::Sleep,
];

const fn meta(color: &'static str, text: &'static str, icon: &'static str, label: &'static str) -> CategoryMeta {
    CategoryMeta { color, text, icon, label }
}

static SLEEP: CategoryMeta = meta("#27272a", "#3f3f46", "◌", "Sleep");
static GYM: CategoryMeta = meta("#3b82f6", "#93c5fd", "◆", "Gym");
static IMMUTABLE: CategoryMeta = meta("#22c55e", "#86efac", "■", "Immutable");
static ENGINEROOM: CategoryMeta = meta("#a855f7", "#d8b4fe", "▲", "EngineRoom");
static FITFOCUS: CategoryMeta = meta("#f97316", "#fdba74", "●", "FitFocus");
static COMMUTE_ER: CategoryMeta = meta("#a855f7", "#d8b4fe", "→", "Commute · ER");
static COMMUTE_FF: CategoryMeta = meta("#f97316", "#fdba74", "→", "Commute · FF");
static PERSONAL: CategoryMeta = meta("#3f3f46", "#71717a", "○", "Personal");
static MEETING: CategoryMeta = meta("#ec4899", "#f9a8d4", "⚡", "ER Meeting");
static LIFE: CategoryMeta = meta("#06b6d4", "#67e8f9", "◇", "Life");

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Sleep => "sleep",
            Category::Gym => "gym",
            Category::Immutable => "immutable",
            Category::Engineroom => "engineroom",
            Category::Fitfocus => "fitfocus",
            Category::CommuteEr => "commute_er",
            Category::CommuteFf => "commute_ff",
            Category::Personal => "personal",
            Category::Meeting => "meeting",
            Category::Life => "life",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        CATEGORY_OPTIONS.into_iter().find(|c| c.as_str() == s)
    }

    pub fn meta(self) -> &'static CategoryMeta {
        match self {
            Category::Sleep => &SLEEP,
            Category::Gym => &GYM,
            Category::Immutable => &IMMUTABLE,
            Category::Engineroom => &ENGINEROOM,
            Category::Fitfocus => &FITFOCUS,
            Category::CommuteEr => &COMMUTE_ER,
            Category::CommuteFf => &COMMUTE_FF,
            Category::Personal => &PERSONAL,
            Category::Meeting => &MEETING,
            Category::Life => &LIFE,
        }
    }

    /// Bucket used for totals: commutes and meetings count toward their parent venture.
    /// The stored category is never rewritten.
    pub fn resolve(self) -> Self {
        match self {
            Category::CommuteEr | Category::Meeting => Category::Engineroom,
            Category::CommuteFf => Category::Fitfocus,
            Category::Sleep
            | Category::Gym
            | Category::Immutable
            | Category::Engineroom
            | Category::Fitfocus
            | Category::Personal
            | Category::Life => self,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ToSql for Category {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for Category {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let s = value.as_str()?;
        Category::parse(s).ok_or_else(|| FromSqlError::Other(format!("unknown category '{s}'").into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trips_every_option() {
        for category in CATEGORY_OPTIONS {
            assert_eq!(Category::parse(category.as_str()), Some(category));
        }
        assert_eq!(Category::parse("coding"), None);
        assert_eq!(Category::parse("Gym"), None);
    }

    #[test]
    fn test_resolve_folds_sub_tags() {
        assert_eq!(Category::CommuteEr.resolve(), Category::Engineroom);
        assert_eq!(Category::Meeting.resolve(), Category::Engineroom);
        assert_eq!(Category::CommuteFf.resolve(), Category::Fitfocus);
        assert_eq!(Category::Gym.resolve(), Category::Gym);
        assert_eq!(Category::Life.resolve(), Category::Life);
    }

    #[test]
    fn test_serde_uses_snake_case_tags() {
        let json = serde_json::to_string(&Category::CommuteFf).unwrap();
        assert_eq!(json, "\"commute_ff\"");
        let parsed: Category = serde_json::from_str("\"engineroom\"").unwrap();
        assert_eq!(parsed, Category::Engineroom);
    }

    #[test]
    fn test_meta_labels() {
        assert_eq!(Category::Meeting.meta().label, "ER Meeting");
        assert_eq!(Category::Immutable.meta().color, "#22c55e");
    }
}
