pub mod context;
pub mod filter;
pub mod flow;

pub use context::{
    is_truthy, PickerOrigin, PickerState, QueryPickerContext, PICKER_FORM_PREFIX, PICKER_GRID_ID,
    SEARCH_EDIT_ID, SEARCH_LABEL_ID,
};
pub use filter::{build_filtered_statement, substitute_placeholder, DESCRIPTION_PLACEHOLDER};
pub use flow::{apply_selection, open, refresh, search_caption, select_column};
