use std::collections::BTreeMap;

/// Column that marks work as complete. It exists in every category and can
/// never be removed.
pub const TERMINAL_COLUMN: &str = "done";

pub const DEFAULT_CATEGORY: &str = "personal";

pub const DEFAULT_CATEGORIES: [&str; 2] = ["personal", "work"];

pub const DEFAULT_COLUMNS: [&str; 4] = ["on-the-table", "in-progress", "waiting", TERMINAL_COLUMN];

/// Ordered column ids per category.
pub type CategoryColumns = BTreeMap<String, Vec<String>>;

pub fn default_columns() -> CategoryColumns {
    DEFAULT_CATEGORIES
        .iter()
        .map(|category| {
            (
                category.to_string(),
                DEFAULT_COLUMNS.iter().map(|c| c.to_string()).collect(),
            )
        })
        .collect()
}

fn builtin_display_name(column_id: &str) -> Option<&'static str> {
    match column_id {
        "on-the-table" => Some("On the Table"),
        "in-progress" => Some("In Progress"),
        "waiting" => Some("Waiting for Review"),
        "done" => Some("Done"),
        _ => None,
    }
}

/// Display name for a column id without a stored custom name:
/// "code-review" becomes "Code Review".
pub fn humanize_column_id(column_id: &str) -> String {
    if let Some(name) = builtin_display_name(column_id) {
        return name.to_string();
    }

    column_id
        .split('-')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
