use serde::{Deserialize, Serialize};

pub const LIKE_ESCAPE: char = '\\';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SqlDialect {
    #[default]
    Hana,
    SqlServer,
}

impl SqlDialect {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hana => "hana",
            Self::SqlServer => "sql_server",
        }
    }

    pub fn parse(raw: &str) -> Result<Self, String> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "hana" => Ok(Self::Hana),
            "sql_server" | "sqlserver" | "mssql" => Ok(Self::SqlServer),
            _ => Err("dialect must be one of: hana, sql_server".to_string()),
        }
    }

    pub fn quote_identifier(self, name: &str) -> String {
        match self {
            Self::Hana => format!("\"{}\"", name.replace('"', "\"\"")),
            Self::SqlServer => format!("[{}]", name.replace(']', "]]")),
        }
    }

    pub fn text_of(self, expression: &str) -> String {
        match self {
            Self::Hana => format!("to_nvarchar({expression})"),
            Self::SqlServer => format!("cast({expression} as nvarchar(max))"),
        }
    }

    pub fn escape_like(self, value: &str) -> String {
        let mut escaped = String::with_capacity(value.len());
        for ch in value.chars() {
            let special = match ch {
                '%' | '_' | LIKE_ESCAPE => true,
                '[' => self == Self::SqlServer,
                _ => false,
            };
            if special {
                escaped.push(LIKE_ESCAPE);
            }
            escaped.push(ch);
        }
        escaped
    }

    pub fn contains_pattern(self, value: &str) -> String {
        format!("%{}%", self.escape_like(&value.to_lowercase()))
    }
}

impl std::fmt::Display for SqlDialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

pub fn escape_literal(value: &str) -> String {
    value.replace('\'', "''")
}
