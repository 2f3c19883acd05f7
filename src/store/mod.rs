pub mod dialect;
pub mod sqlite;

pub use dialect::{escape_literal, SqlDialect, LIKE_ESCAPE};
pub use sqlite::SqliteStore;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    pub sql: String,
    pub params: Vec<String>,
}

impl Statement {
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            params: Vec::new(),
        }
    }

    pub fn bind(mut self, value: impl Into<String>) -> Self {
        self.params.push(value.into());
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryResult {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl QueryResult {
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns
            .iter()
            .position(|column| column.eq_ignore_ascii_case(name))
    }

    pub fn value(&self, row: usize, column: &str) -> Option<&str> {
        let index = self.column_index(column)?;
        self.rows.get(row)?.get(index).map(String::as_str)
    }

    pub fn first_value(&self, row: usize) -> Option<&str> {
        self.rows.get(row)?.first().map(String::as_str)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DataStoreError {
    #[error("failed to open data store at {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: rusqlite::Error,
    },
    #[error("query failed: {source}")]
    Query {
        sql: String,
        #[source]
        source: rusqlite::Error,
    },
    #[error("query text is empty")]
    EmptyQuery,
}

pub trait DataStore {
    fn dialect(&self) -> SqlDialect;

    fn query(&self, statement: &Statement) -> Result<QueryResult, DataStoreError>;

    fn scalar(&self, statement: &Statement) -> Result<Option<String>, DataStoreError> {
        let result = self.query(statement)?;
        Ok(result
            .rows
            .into_iter()
            .next()
            .and_then(|row| row.into_iter().next()))
    }
}
