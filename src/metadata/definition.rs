use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterType {
    Text,
    Number,
    Date,
    Boolean,
}

impl ParameterType {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_uppercase().as_str() {
            "DATE" => Self::Date,
            "BOOL" | "BOOLEAN" => Self::Boolean,
            "NUMERIC" | "NUMBER" | "INT" | "INTEGER" | "DECIMAL" => Self::Number,
            _ => Self::Text,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Number => "number",
            Self::Date => "date",
            Self::Boolean => "boolean",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParameterDefinition {
    pub id: String,
    pub description: String,
    pub param_type: ParameterType,
    pub required: bool,
    pub lookup_query: Option<String>,
    pub show_description: bool,
    pub description_query: Option<String>,
    pub ordinal: i64,
    pub multiplicity: Option<String>,
}

impl ParameterDefinition {
    pub fn new(id: &str, param_type: ParameterType) -> Self {
        Self {
            id: id.to_string(),
            description: String::new(),
            param_type,
            required: false,
            lookup_query: None,
            show_description: false,
            description_query: None,
            ordinal: 0,
            multiplicity: None,
        }
    }

    pub fn display_name(&self) -> &str {
        if self.description.trim().is_empty() {
            &self.id
        } else {
            &self.description
        }
    }

    pub fn has_lookup(&self) -> bool {
        self.lookup_query.is_some()
    }

    pub fn has_description_control(&self) -> bool {
        self.show_description && self.description_query.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportEntry {
    pub code: String,
    pub name: String,
}

pub fn flag_is_set(raw: &str) -> bool {
    raw.trim().eq_ignore_ascii_case("Y")
}

pub fn flag_is_active(raw: &str) -> bool {
    !raw.trim().eq_ignore_ascii_case("N")
}

pub fn non_blank(raw: &str) -> Option<String> {
    if raw.trim().is_empty() {
        None
    } else {
        Some(raw.to_string())
    }
}
