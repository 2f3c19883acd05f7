use crate::forms::layout::{GENERATE_BUTTON_ID, MAPPING_FORM_PREFIX, PARAMETER_PREFIX};
use crate::picker::{PICKER_FORM_PREFIX, PICKER_GRID_ID, SEARCH_EDIT_ID};

fn starts_with_ignore_case(value: &str, prefix: &str) -> bool {
    value
        .get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}

pub fn is_parameter_button(item_id: &str) -> bool {
    !item_id.trim().is_empty() && starts_with_ignore_case(item_id, &format!("{PARAMETER_PREFIX}btn_"))
}

pub fn is_mapping_form(form_id: &str) -> bool {
    !form_id.trim().is_empty() && starts_with_ignore_case(form_id, MAPPING_FORM_PREFIX)
}

pub fn is_query_picker_form(form_id: &str) -> bool {
    !form_id.trim().is_empty() && starts_with_ignore_case(form_id, PICKER_FORM_PREFIX)
}

pub fn is_query_picker_grid(item_id: &str) -> bool {
    item_id.eq_ignore_ascii_case(PICKER_GRID_ID)
}

pub fn is_query_picker_search_item(item_id: &str) -> bool {
    item_id.eq_ignore_ascii_case(SEARCH_EDIT_ID)
}

pub fn is_generate_report_button(item_id: &str) -> bool {
    item_id.eq_ignore_ascii_case(GENERATE_BUTTON_ID)
}
