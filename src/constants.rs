// src/constants.rs

use crate::models::Category;

/// Longest day a block can fill.
pub const MAX_BLOCK_HOURS: f64 = 24.0;

/// Maximum time label length
pub const MAX_TIME_LABEL_LEN: usize = 100;

/// Maximum block description length
pub const MAX_DESCRIPTION_LEN: usize = 500;

/// Maximum override note length
pub const MAX_NOTE_LEN: usize = 500;

/// Audit entries returned when no limit is given
pub const DEFAULT_AUDIT_LIMIT: u32 = 50;

/// Upper bound on a single audit listing
pub const MAX_AUDIT_LIMIT: u32 = 500;

/// A weekly total within this many hours of its target counts as a hit.
pub const TARGET_TOLERANCE_HOURS: f64 = 1.0;

/// Tracked categories and their weekly targets, in display order.
/// `None` means tracked without a target.
pub const WEEKLY_TARGETS: &[(Category, Option<f64>)] = &[
    (Category::Immutable, Some(38.0)),
    (Category::Engineroom, Some(20.0)),
    (Category::Fitfocus, Some(21.0)),
    (Category::Gym, None),
];

/// Address the HTTP server binds to by default
pub const DEFAULT_BIND: &str = "127.0.0.1:4100";

/// Google Calendar v3 REST endpoint
pub const GOOGLE_CALENDAR_API: &str = "https://www.googleapis.com/calendar/v3";

/// Page size requested from the calendar provider
pub const CALENDAR_MAX_RESULTS: u32 = 250;
