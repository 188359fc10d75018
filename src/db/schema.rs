pub const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS template_blocks (
    id INTEGER PRIMARY KEY,
    day TEXT NOT NULL,
    sort_order INTEGER NOT NULL,
    time_label TEXT NOT NULL,
    category TEXT NOT NULL,
    description TEXT NOT NULL,
    hours REAL NOT NULL CHECK (hours > 0)
);

CREATE TABLE IF NOT EXISTS week_overrides (
    id INTEGER PRIMARY KEY,
    week_start TEXT NOT NULL,
    day TEXT NOT NULL,
    note TEXT,
    created_by TEXT NOT NULL,
    created_at TEXT NOT NULL,
    UNIQUE (week_start, day)
);

CREATE TABLE IF NOT EXISTS week_override_blocks (
    id INTEGER PRIMARY KEY,
    override_id INTEGER NOT NULL REFERENCES week_overrides(id) ON DELETE CASCADE,
    sort_order INTEGER NOT NULL,
    time_label TEXT NOT NULL,
    category TEXT NOT NULL,
    description TEXT NOT NULL,
    hours REAL NOT NULL CHECK (hours > 0)
);

CREATE TABLE IF NOT EXISTS schedule_audit (
    id INTEGER PRIMARY KEY,
    action TEXT NOT NULL,
    table_name TEXT NOT NULL,
    record_id TEXT,
    day TEXT,
    details TEXT NOT NULL,
    performed_by TEXT NOT NULL,
    timestamp TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_template_blocks_day ON template_blocks(day, sort_order);
CREATE INDEX IF NOT EXISTS idx_override_blocks_override ON week_override_blocks(override_id, sort_order);
CREATE INDEX IF NOT EXISTS idx_schedule_audit_timestamp ON schedule_audit(timestamp);
"#;
