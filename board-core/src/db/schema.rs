pub const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS boards (
    id TEXT PRIMARY KEY,
    project_id TEXT NOT NULL,
    title TEXT NOT NULL,
    description TEXT NOT NULL DEFAULT '',
    start_date TEXT,
    due_date TEXT,
    custom_fields JSON NOT NULL DEFAULT '{}',
    assignee_ids JSON NOT NULL DEFAULT '[]',
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS attachments (
    id TEXT PRIMARY KEY,
    entity_type TEXT CHECK (entity_type IN ('board', 'project', 'comment')),
    entity_id TEXT,
    status TEXT NOT NULL DEFAULT 'temporary' CHECK (status IN ('temporary', 'confirmed')),
    file_name TEXT NOT NULL,
    storage_key TEXT NOT NULL,
    size_bytes INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS participants (
    id TEXT PRIMARY KEY,
    board_id TEXT NOT NULL REFERENCES boards(id) ON DELETE CASCADE,
    user_id TEXT NOT NULL,
    created_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS field_definitions (
    id TEXT PRIMARY KEY,
    project_id TEXT NOT NULL,
    name TEXT NOT NULL,
    field_type TEXT NOT NULL CHECK (field_type IN ('text', 'number', 'date', 'single_select', 'multi_select')),
    created_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS field_options (
    id TEXT PRIMARY KEY,
    field_id TEXT NOT NULL REFERENCES field_definitions(id) ON DELETE CASCADE,
    value TEXT NOT NULL,
    position INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_boards_project ON boards(project_id);
CREATE INDEX IF NOT EXISTS idx_attachments_entity ON attachments(entity_type, entity_id);
CREATE INDEX IF NOT EXISTS idx_participants_board ON participants(board_id);
CREATE INDEX IF NOT EXISTS idx_field_definitions_project ON field_definitions(project_id);
CREATE INDEX IF NOT EXISTS idx_field_options_field ON field_options(field_id);

-- At most one participant row per (board, member)
CREATE UNIQUE INDEX IF NOT EXISTS idx_one_participant_per_member
    ON participants(board_id, user_id);

CREATE UNIQUE INDEX IF NOT EXISTS idx_one_option_value_per_field
    ON field_options(field_id, value);
"#;
