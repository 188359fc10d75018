pub mod audit;
pub mod block;
pub mod category;
pub mod template;
pub mod week_override;
pub mod weekday;

pub use audit::{AuditAction, AuditEntry};
pub use block::{Block, BlockDraft, BlockPatch, NewBlock};
pub use category::{Category, CategoryMeta, CATEGORY_OPTIONS};
pub use template::Template;
pub use week_override::{Override, WeekOverride};
pub use weekday::{week_start_of, DayTag, Weekday};
