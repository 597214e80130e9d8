use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Default PostgreSQL host when the URL carries none.
pub const DEFAULT_HOST: &str = "localhost";
/// Default PostgreSQL port when the URL carries none.
pub const DEFAULT_PORT: u16 = 5432;
/// Default database and user name when the URL carries none.
pub const DEFAULT_DATABASE: &str = "postgres";
pub const DEFAULT_USER: &str = "postgres";

/// Connection details extracted from a `postgresql://` URL.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConnectionInfo {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub user: String,
}

impl Default for ConnectionInfo {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            database: DEFAULT_DATABASE.to_string(),
            user: DEFAULT_USER.to_string(),
        }
    }
}

impl fmt::Display for ConnectionInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}/{}", self.host, self.port, self.database)
    }
}

/// Which backend a resolved client talks to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ClientMode {
    /// Supabase project reached over its REST API.
    Hosted,
    /// Direct PostgreSQL connection string (placeholder client).
    Direct,
}

impl ClientMode {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            ClientMode::Hosted => "hosted",
            ClientMode::Direct => "direct",
        }
    }
}

impl fmt::Display for ClientMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single filter accumulated on a table handle.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Filter {
    pub operator: String,
    pub column: String,
    pub value: Value,
}

impl Filter {
    #[must_use]
    pub fn eq(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            operator: "eq".to_string(),
            column: column.into(),
            value: value.into(),
        }
    }

    /// Renders the filter as a PostgREST query value, e.g. `eq.active`.
    ///
    /// Strings are written unquoted; other scalars use their JSON text.
    #[must_use]
    pub fn to_postgrest_value(&self) -> String {
        let rendered = match &self.value {
            Value::String(s) => s.clone(),
            Value::Null => "null".to_string(),
            other => other.to_string(),
        };
        format!("{}.{}", self.operator, rendered)
    }
}

/// The mutation (or read) a table handle will perform on `execute`.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Operation {
    #[default]
    Select,
    Insert(Vec<Value>),
    Update(Value),
    Delete,
}

impl Operation {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Select => "select",
            Operation::Insert(_) => "insert",
            Operation::Update(_) => "update",
            Operation::Delete => "delete",
        }
    }
}

/// Normalizes an insert payload: a single row becomes a one-element batch,
/// an array passes through unchanged.
#[must_use]
pub fn normalize_insert_payload(data: Value) -> Vec<Value> {
    match data {
        Value::Array(rows) => rows,
        row => vec![row],
    }
}

/// Rows returned from `execute`, plus the row count.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct QueryResult {
    pub data: Vec<Value>,
    pub count: usize,
}

impl QueryResult {
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn new(data: Vec<Value>, count: usize) -> Self {
        Self { data, count }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_connection_info_defaults() {
        let info = ConnectionInfo::default();
        assert_eq!(info.host, "localhost");
        assert_eq!(info.port, 5432);
        assert_eq!(info.database, "postgres");
        assert_eq!(info.user, "postgres");
        assert_eq!(info.to_string(), "localhost:5432/postgres");
    }

    #[test]
    fn test_client_mode_serialization() {
        assert_eq!(
            serde_json::to_string(&ClientMode::Hosted).unwrap(),
            "\"hosted\""
        );
        assert_eq!(ClientMode::Direct.to_string(), "direct");
    }

    #[test]
    fn test_insert_payload_wraps_single_row() {
        let rows = normalize_insert_payload(json!({"a": 1}));
        assert_eq!(rows, vec![json!({"a": 1})]);
    }

    #[test]
    fn test_insert_payload_passes_arrays_through() {
        let rows = normalize_insert_payload(json!([{"a": 1}, {"a": 2}]));
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1], json!({"a": 2}));
    }

    #[test]
    fn test_filter_postgrest_rendering() {
        assert_eq!(Filter::eq("status", "active").to_postgrest_value(), "eq.active");
        assert_eq!(Filter::eq("id", 5).to_postgrest_value(), "eq.5");
        assert_eq!(Filter::eq("done", true).to_postgrest_value(), "eq.true");
        assert_eq!(
            Filter::eq("deleted_at", Value::Null).to_postgrest_value(),
            "eq.null"
        );
    }

    #[test]
    fn test_operation_default_is_select() {
        assert_eq!(Operation::default(), Operation::Select);
        assert_eq!(Operation::Insert(vec![]).name(), "insert");
    }

    #[test]
    fn test_empty_query_result() {
        let result = QueryResult::empty();
        assert!(result.is_empty());
        assert_eq!(result.count, 0);
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({"data": [], "count": 0})
        );
    }
}
