use super::session::{FieldContext, MappingFormSession};
use crate::metadata::ParameterType;
use crate::ui::HostUi;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ValidationFailure {
    pub field_id: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum TypedValue {
    Text(String),
    Number(Decimal),
    Date(NaiveDate),
    Boolean(bool),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawValue {
    Checked(bool),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedField {
    pub param_id: String,
    pub display_name: String,
    pub param_type: ParameterType,
    pub required: bool,
    pub value_item: String,
    pub raw: Option<RawValue>,
}

impl CapturedField {
    pub fn from_context(field: &FieldContext, raw: Option<RawValue>) -> Self {
        Self {
            param_id: field.param_id.clone(),
            display_name: field.display_name.clone(),
            param_type: field.param_type,
            required: field.required,
            value_item: field.value_item.clone(),
            raw,
        }
    }
}

pub fn encode_date(date: NaiveDate) -> String {
    date.format("%Y%m%d").to_string()
}

pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    if raw.len() != 8 || !raw.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }
    let year = raw[0..4].parse::<i32>().ok()?;
    let month = raw[4..6].parse::<u32>().ok()?;
    let day = raw[6..8].parse::<u32>().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

pub fn parse_number(raw: &str) -> Option<Decimal> {
    Decimal::from_str(raw.trim()).ok()
}

pub fn capture(session: &MappingFormSession, host: &dyn HostUi) -> Vec<CapturedField> {
    session
        .fields
        .iter()
        .map(|field| {
            let raw = if !host.has_item(&session.form_id, &field.value_item) {
                None
            } else if field.is_checkbox() {
                host.is_checked(&session.form_id, &field.value_item)
                    .ok()
                    .map(RawValue::Checked)
            } else {
                host.text(&session.form_id, &field.value_item)
                    .ok()
                    .map(RawValue::Text)
            };
            CapturedField::from_context(field, raw)
        })
        .collect()
}

// Unparseable dates and numbers are passed through as text rather than rejected.
pub fn coerce(param_type: ParameterType, raw: &RawValue) -> Option<TypedValue> {
    let text = match raw {
        RawValue::Checked(checked) => return Some(TypedValue::Boolean(*checked)),
        RawValue::Text(text) => text,
    };
    if text.trim().is_empty() {
        return None;
    }
    let typed = match param_type {
        ParameterType::Date => parse_date(text).map(TypedValue::Date),
        ParameterType::Number => parse_number(text).map(TypedValue::Number),
        ParameterType::Text | ParameterType::Boolean => None,
    };
    Some(typed.unwrap_or_else(|| TypedValue::Text(text.clone())))
}

pub fn validate(fields: &[CapturedField]) -> Result<(), ValidationFailure> {
    for field in fields.iter().filter(|field| field.required) {
        let Some(raw) = &field.raw else {
            continue;
        };
        if coerce(field.param_type, raw).is_none() {
            return Err(ValidationFailure {
                field_id: field.param_id.clone(),
                message: format!(
                    "required parameter '{}' must be filled in",
                    field.display_name
                ),
            });
        }
    }
    Ok(())
}

pub fn extract(fields: &[CapturedField]) -> BTreeMap<String, TypedValue> {
    let mut values = BTreeMap::new();
    for field in fields {
        if field.param_id.trim().is_empty() {
            continue;
        }
        let Some(raw) = &field.raw else {
            continue;
        };
        if let Some(value) = coerce(field.param_type, raw) {
            values.insert(field.param_id.clone(), value);
        }
    }
    values
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_field(id: &str, param_type: ParameterType, required: bool, raw: &str) -> CapturedField {
        CapturedField {
            param_id: id.to_string(),
            display_name: id.to_string(),
            param_type,
            required,
            value_item: "prm_val_00".to_string(),
            raw: Some(RawValue::Text(raw.to_string())),
        }
    }

    #[test]
    fn date_parse_requires_exactly_eight_digits() {
        assert_eq!(parse_date("20240115"), NaiveDate::from_ymd_opt(2024, 1, 15));
        assert_eq!(parse_date("2024115"), None);
        assert_eq!(parse_date("2024-01-15"), None);
        assert_eq!(parse_date("20240230"), None);
        assert_eq!(parse_date(" 20240115"), None);
    }

    #[test]
    fn date_encoding_round_trips_across_supported_range() {
        let mut date = NaiveDate::from_ymd_opt(1900, 1, 1).expect("start");
        let end = NaiveDate::from_ymd_opt(2999, 12, 31).expect("end");
        while date <= end {
            assert_eq!(parse_date(&encode_date(date)), Some(date));
            date = date + chrono::Days::new(97);
        }
        assert_eq!(parse_date(&encode_date(end)), Some(end));
    }

    #[test]
    fn numbers_parse_invariantly() {
        assert_eq!(parse_number(" 12.50 "), Decimal::from_str("12.50").ok());
        assert_eq!(parse_number("-3"), Some(Decimal::from(-3)));
        assert_eq!(parse_number("twelve"), None);
    }

    #[test]
    fn whitespace_text_counts_as_empty() {
        let fields = vec![text_field("P1", ParameterType::Text, true, "   ")];
        let failure = validate(&fields).expect_err("should fail");
        assert_eq!(failure.field_id, "P1");
        assert!(extract(&fields).is_empty());
    }
}
