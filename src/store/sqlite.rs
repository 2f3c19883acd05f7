use super::{DataStore, DataStoreError, QueryResult, SqlDialect, Statement};
use rusqlite::functions::FunctionFlags;
use rusqlite::types::ValueRef;
use rusqlite::{params_from_iter, Connection};
use std::path::Path;

pub struct SqliteStore {
    connection: Connection,
    dialect: SqlDialect,
}

impl SqliteStore {
    pub fn open(path: &Path) -> Result<Self, DataStoreError> {
        let connection = Connection::open(path).map_err(|source| DataStoreError::Open {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_connection(connection, &path.display().to_string())
    }

    pub fn open_in_memory() -> Result<Self, DataStoreError> {
        let connection =
            Connection::open_in_memory().map_err(|source| DataStoreError::Open {
                path: ":memory:".to_string(),
                source,
            })?;
        Self::from_connection(connection, ":memory:")
    }

    fn from_connection(connection: Connection, label: &str) -> Result<Self, DataStoreError> {
        register_text_functions(&connection).map_err(|source| DataStoreError::Open {
            path: label.to_string(),
            source,
        })?;
        Ok(Self {
            connection,
            dialect: SqlDialect::Hana,
        })
    }

    pub fn with_dialect(mut self, dialect: SqlDialect) -> Self {
        self.dialect = dialect;
        self
    }

    pub fn execute_batch(&self, sql: &str) -> Result<(), DataStoreError> {
        self.connection
            .execute_batch(sql)
            .map_err(|source| DataStoreError::Query {
                sql: sql.to_string(),
                source,
            })
    }
}

// Lets the hana text conversion used by filtered picker queries run unchanged,
// and replaces the built-in ASCII-only lower() with full Unicode case folding.
fn register_text_functions(connection: &Connection) -> rusqlite::Result<()> {
    let flags = FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC;
    connection.create_scalar_function("to_nvarchar", 1, flags, |ctx| {
        Ok(value_text(ctx.get_raw(0)))
    })?;
    connection.create_scalar_function("lower", 1, flags, |ctx| {
        Ok(value_text(ctx.get_raw(0)).map(|text| text.to_lowercase()))
    })
}

fn value_text(value: ValueRef<'_>) -> Option<String> {
    match value {
        ValueRef::Null => None,
        ValueRef::Integer(number) => Some(number.to_string()),
        ValueRef::Real(number) => Some(number.to_string()),
        ValueRef::Text(bytes) | ValueRef::Blob(bytes) => {
            Some(String::from_utf8_lossy(bytes).into_owned())
        }
    }
}

impl DataStore for SqliteStore {
    fn dialect(&self) -> SqlDialect {
        self.dialect
    }

    fn query(&self, statement: &Statement) -> Result<QueryResult, DataStoreError> {
        if statement.sql.trim().is_empty() {
            return Err(DataStoreError::EmptyQuery);
        }
        let query_error = |source: rusqlite::Error| DataStoreError::Query {
            sql: statement.sql.clone(),
            source,
        };

        let mut prepared = self.connection.prepare(&statement.sql).map_err(query_error)?;
        let columns = prepared
            .column_names()
            .into_iter()
            .map(str::to_string)
            .collect::<Vec<_>>();
        let width = columns.len();

        let mut cursor = prepared
            .query(params_from_iter(statement.params.iter()))
            .map_err(query_error)?;
        let mut rows = Vec::new();
        while let Some(row) = cursor.next().map_err(query_error)? {
            let mut values = Vec::with_capacity(width);
            for index in 0..width {
                let value = row.get_ref(index).map_err(query_error)?;
                values.push(value_text(value).unwrap_or_default());
            }
            rows.push(values);
        }

        Ok(QueryResult { columns, rows })
    }
}
