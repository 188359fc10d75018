use crate::models::Category::{
    CommuteEr, CommuteFf, Engineroom, Fitfocus, Gym, Immutable, Life, Meeting, Personal, Sleep,
};
use crate::models::{Category, Weekday};

/// One template block as seeded: time label, category, description, hours.
pub type SeedBlock = (&'static str, Category, &'static str, f64);

/// Starting template week. Each day's blocks are listed in display order.
pub const SEED_WEEK: &[(Weekday, &[SeedBlock])] = &[
    (
        Weekday::Monday,
        &[
            ("11:00 PM – 5:00 AM", Sleep, "Sleep", 6.0),
            ("5:00 – 6:30 AM", Gym, "Gym", 1.5),
            ("6:30 – 7:15 AM", Personal, "Ready", 0.75),
            ("7:15 – 8:00 AM", CommuteEr, "Commute → office — ER BAU (emails, Slack, PR reviews)", 0.75),
            ("8:00 – 11:00 AM", Immutable, "Morning deep focus", 3.0),
            ("11:00 – 11:30 AM", Meeting, "ER standup (Immutable overlap)", 0.5),
            ("11:30 AM – 12:30 PM", Immutable, "Pre-lunch block", 1.0),
            ("12:30 – 1:15 PM", Fitfocus, "Lunch + FF BAU — client follow-ups, invoicing", 0.75),
            ("1:15 – 5:00 PM", Immutable, "Afternoon block", 3.75),
            ("5:00 – 5:45 PM", CommuteFf, "Commute → home — FF BAU (client messages, scheduling)", 0.75),
            ("5:45 – 6:15 PM", Personal, "Dinner", 0.5),
            ("6:15 – 6:45 PM", Fitfocus, "FF BAU — contracts, platform checks", 0.5),
            ("6:45 – 10:00 PM", Engineroom, "Deep work session", 3.25),
            ("10:00 – 11:00 PM", Personal, "Wind down", 1.0),
        ],
    ),
    (
        Weekday::Tuesday,
        &[
            ("11:00 PM – 5:00 AM", Sleep, "Sleep", 6.0),
            ("5:00 – 6:30 AM", Gym, "Gym", 1.5),
            ("6:30 – 7:15 AM", Personal, "Ready", 0.75),
            ("7:15 – 8:00 AM", CommuteEr, "Commute → office — ER BAU (emails, async replies)", 0.75),
            ("8:00 – 11:00 AM", Immutable, "Morning deep focus", 3.0),
            ("11:00 – 11:15 AM", Meeting, "ER standup (Immutable overlap)", 0.25),
            ("11:15 AM – 12:30 PM", Immutable, "Pre-lunch block", 1.25),
            ("12:30 – 1:15 PM", Fitfocus, "Lunch + FF BAU — contracts, onboarding docs", 0.75),
            ("1:15 – 5:00 PM", Immutable, "Afternoon block", 3.75),
            ("5:00 – 5:45 PM", CommuteFf, "Commute → home — FF BAU (client comms, scheduling)", 0.75),
            ("5:45 – 6:15 PM", Personal, "Dinner", 0.5),
            ("6:15 – 6:45 PM", Fitfocus, "FF BAU — platform checks, content queue", 0.5),
            ("6:45 – 10:00 PM", Engineroom, "Deep work session", 3.25),
            ("10:00 – 11:00 PM", Personal, "Wind down", 1.0),
        ],
    ),
    (
        Weekday::Wednesday,
        &[
            ("11:00 PM – 5:00 AM", Sleep, "Sleep", 6.0),
            ("5:00 – 6:30 AM", Gym, "Gym", 1.5),
            ("6:30 – 7:00 AM", Personal, "Breakfast", 0.5),
            ("7:00 – 7:30 AM", Fitfocus, "FF BAU — client scheduling, admin", 0.5),
            ("7:30 – 9:00 AM", Engineroom, "Morning focus block", 1.5),
            ("9:00 AM – 12:30 PM", Immutable, "Morning block — remote", 3.5),
            ("12:30 – 1:15 PM", Fitfocus, "Lunch + FF BAU (bi-weekly: ER advisory 12:30–12:45)", 0.75),
            ("1:15 – 5:00 PM", Immutable, "Afternoon block — remote", 3.75),
            ("5:00 – 5:15 PM", Personal, "Break", 0.25),
            ("5:15 – 6:00 PM", Fitfocus, "FF BAU — mid-week check-in, wrap-up", 0.75),
            ("6:00 – 7:00 PM", Personal, "Dinner + change", 1.0),
            ("7:00 – 9:30 PM", Life, "Soccer training ⚽", 2.5),
            ("9:30 – 10:30 PM", Engineroom, "Post-training ER session", 1.0),
            ("10:30 – 11:00 PM", Personal, "Wind down", 0.5),
        ],
    ),
    (
        Weekday::Thursday,
        &[
            ("11:00 PM – 5:00 AM", Sleep, "Sleep", 6.0),
            ("5:00 – 6:30 AM", Gym, "Gym", 1.5),
            ("6:30 – 7:15 AM", Personal, "Ready", 0.75),
            ("7:15 – 8:00 AM", CommuteEr, "Commute → office — ER BAU (standup prep, Slack)", 0.75),
            ("8:00 – 11:00 AM", Immutable, "Morning deep focus", 3.0),
            ("11:00 – 11:15 AM", Meeting, "ER standup (Immutable overlap)", 0.25),
            ("11:15 AM – 12:30 PM", Immutable, "Pre-lunch block", 1.25),
            ("12:30 – 1:15 PM", Fitfocus, "Lunch + FF BAU — invoicing, follow-ups", 0.75),
            ("1:15 – 5:00 PM", Immutable, "Afternoon block", 3.75),
            ("5:00 – 5:45 PM", CommuteFf, "Commute → home — FF BAU (client messages, admin)", 0.75),
            ("5:45 – 6:15 PM", Personal, "Dinner", 0.5),
            ("6:15 – 6:45 PM", Fitfocus, "FF BAU — platform maintenance", 0.5),
            ("6:45 – 10:00 PM", Engineroom, "Deep work session", 3.25),
            ("10:00 – 11:00 PM", Personal, "Wind down", 1.0),
        ],
    ),
    (
        Weekday::Friday,
        &[
            ("11:00 PM – 5:00 AM", Sleep, "Sleep", 6.0),
            ("5:00 – 6:30 AM", Gym, "Gym", 1.5),
            ("6:30 – 7:00 AM", Personal, "Breakfast", 0.5),
            ("7:00 – 7:30 AM", Fitfocus, "FF BAU — week review, client wrap-ups", 0.5),
            ("7:30 – 9:00 AM", Engineroom, "Morning focus block", 1.5),
            ("9:00 AM – 12:30 PM", Immutable, "Morning block — remote", 3.5),
            ("12:30 – 1:15 PM", Fitfocus, "Lunch + FF BAU — weekly numbers, next week prep", 0.75),
            ("1:15 – 5:00 PM", Immutable, "Afternoon block — remote", 3.75),
            ("5:00 – 5:15 PM", Personal, "Break", 0.25),
            ("5:15 – 6:00 PM", Fitfocus, "FF BAU — close out the week", 0.75),
            ("6:00 – 6:30 PM", Engineroom, "ER — quick wrap-up, week close", 0.5),
            ("6:30 – 7:00 PM", Personal, "Get ready", 0.5),
            ("7:00 PM – 12:00 AM", Life, "Date night", 5.0),
        ],
    ),
    (
        Weekday::Saturday,
        &[
            ("12:00 – 5:00 AM", Sleep, "Sleep (Fri late night)", 5.0),
            ("5:00 – 6:30 AM", Gym, "Gym", 1.5),
            ("6:30 – 7:00 AM", Personal, "Breakfast", 0.5),
            ("7:00 – 8:15 AM", Engineroom, "Morning sprint", 1.25),
            ("8:15 AM – 12:00 PM", Fitfocus, "Deep work — product, content creation, strategy", 3.75),
            ("12:00 – 12:30 PM", Personal, "Lunch + prep", 0.5),
            ("12:30 – 4:30 PM", Life, "Soccer ⚽", 4.0),
            ("4:30 – 5:30 PM", Personal, "Recovery", 1.0),
            ("5:30 – 7:15 PM", Fitfocus, "Deep work — content, client prep, platform build", 1.75),
            ("7:15 – 11:00 PM", Personal, "Free — dinner, social, rest", 3.75),
        ],
    ),
    (
        Weekday::Sunday,
        &[
            ("11:00 PM – 5:00 AM", Sleep, "Sleep", 6.0),
            ("5:00 – 6:30 AM", Gym, "Gym", 1.5),
            ("6:30 – 7:00 AM", Personal, "Breakfast", 0.5),
            ("7:00 AM – 12:30 PM", Fitfocus, "Deep work — week ahead prep, content batch, strategy", 5.5),
            ("12:30 – 3:30 PM", Personal, "Lunch + free time", 3.0),
            ("3:30 – 7:30 PM", Life, "Church", 4.0),
            ("7:30 – 8:00 PM", Personal, "Dinner", 0.5),
            ("8:00 – 9:15 PM", Engineroom, "Evening session — week ahead planning", 1.25),
            ("9:15 – 11:00 PM", Personal, "Rest + wind down", 1.75),
        ],
    ),
];

