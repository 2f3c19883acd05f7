use crate::metadata::{ParameterDefinition, ParameterType};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlKind {
    Text,
    CheckBox,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldContext {
    pub param_id: String,
    pub display_name: String,
    pub param_type: ParameterType,
    pub required: bool,
    pub value_item: String,
    pub lookup_item: Option<String>,
    pub description_item: Option<String>,
    pub lookup_query: Option<String>,
    pub description_query: Option<String>,
    pub control: ControlKind,
}

impl FieldContext {
    pub fn matches_item(&self, item_id: &str) -> bool {
        self.value_item.eq_ignore_ascii_case(item_id)
            || self
                .lookup_item
                .as_deref()
                .is_some_and(|lookup| lookup.eq_ignore_ascii_case(item_id))
    }

    pub fn is_checkbox(&self) -> bool {
        self.control == ControlKind::CheckBox
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingFormSession {
    pub form_id: String,
    pub report_code: String,
    pub report_name: String,
    pub definitions: Vec<ParameterDefinition>,
    pub fields: Vec<FieldContext>,
    pub generate_item: String,
    pub height: i32,
}

impl MappingFormSession {
    pub fn field(&self, item_id: &str) -> Option<&FieldContext> {
        self.fields.iter().find(|field| field.matches_item(item_id))
    }

    pub fn is_form(&self, form_id: &str) -> bool {
        self.form_id.eq_ignore_ascii_case(form_id)
    }

    pub fn header_caption(&self) -> String {
        header_caption(&self.report_code, &self.report_name)
    }
}

pub fn header_caption(report_code: &str, report_name: &str) -> String {
    format!("Report: {report_code} - {report_name}")
}
