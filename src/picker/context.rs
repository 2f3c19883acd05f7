pub const PICKER_FORM_PREFIX: &str = "RPT_QRY_PICK";
pub const PICKER_FORM_TITLE: &str = "Select value";
pub const PICKER_GRID_ID: &str = "grd_qry";
pub const SEARCH_EDIT_ID: &str = "edt_qsrch";
pub const SEARCH_LABEL_ID: &str = "lbl_qsrch";
pub const DEFAULT_SEARCH_CAPTION: &str = "Search by: Column 1";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerState {
    Opened,
    Filtering,
    Selected,
    Closed,
}

impl PickerState {
    pub fn on_search(self) -> Self {
        match self {
            Self::Opened | Self::Filtering => Self::Filtering,
            other => other,
        }
    }

    pub fn on_select(self) -> Self {
        match self {
            Self::Closed => Self::Closed,
            _ => Self::Selected,
        }
    }

    pub fn on_close(self) -> Self {
        Self::Closed
    }

    pub fn is_terminal(self) -> bool {
        self == Self::Closed
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerOrigin {
    pub form_id: String,
    pub value_item: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryPickerContext {
    pub form_id: String,
    pub base_query: String,
    pub filter_column: Option<String>,
    pub origin: PickerOrigin,
    pub state: PickerState,
}

impl QueryPickerContext {
    pub fn is_form(&self, form_id: &str) -> bool {
        self.form_id.eq_ignore_ascii_case(form_id)
    }
}

// Exact tokens only; padded values such as " Y" are not truthy.
pub fn is_truthy(value: &str) -> bool {
    ["Y", "1", "TRUE", "T"]
        .iter()
        .any(|candidate| value.eq_ignore_ascii_case(candidate))
}
