//! Table definitions pushed to the remote database.

pub struct Table {
    pub name: &'static str,
    pub ddl: &'static str,
}

pub const TABLES: &[Table] = &[
    Table {
        name: "family_members",
        ddl: "CREATE TABLE IF NOT EXISTS family_members (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            role TEXT NOT NULL DEFAULT 'child',
            birth_date TEXT,
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )",
    },
    Table {
        name: "quotes",
        ddl: "CREATE TABLE IF NOT EXISTS quotes (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            text TEXT NOT NULL,
            source TEXT NOT NULL DEFAULT '',
            category TEXT
        )",
    },
    Table {
        name: "worship_logs",
        ddl: "CREATE TABLE IF NOT EXISTS worship_logs (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            member_id INTEGER NOT NULL REFERENCES family_members(id) ON DELETE CASCADE,
            kind TEXT NOT NULL,
            logged_on TEXT NOT NULL,
            completed INTEGER NOT NULL DEFAULT 0
        )",
    },
    Table {
        name: "finance_entries",
        ddl: "CREATE TABLE IF NOT EXISTS finance_entries (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            kind TEXT NOT NULL CHECK (kind IN ('income', 'expense', 'zakat', 'sedekah')),
            amount INTEGER NOT NULL,
            note TEXT,
            entry_date TEXT NOT NULL
        )",
    },
    Table {
        name: "bonding_activities",
        ddl: "CREATE TABLE IF NOT EXISTS bonding_activities (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            activity_date TEXT NOT NULL,
            note TEXT
        )",
    },
    Table {
        name: "app_stats",
        ddl: "CREATE TABLE IF NOT EXISTS app_stats (
            key TEXT PRIMARY KEY,
            value INTEGER NOT NULL DEFAULT 0
        )",
    },
];

pub fn table_names() -> Vec<&'static str> {
    TABLES.iter().map(|t| t.name).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_table_is_idempotent() {
        for table in TABLES {
            assert!(table
                .ddl
                .starts_with(&format!("CREATE TABLE IF NOT EXISTS {} (", table.name)));
        }
    }

    #[test]
    fn test_members_created_before_dependents() {
        let names = table_names();
        let members = names.iter().position(|n| *n == "family_members").unwrap();
        let logs = names.iter().position(|n| *n == "worship_logs").unwrap();
        assert!(members < logs);
    }
}
