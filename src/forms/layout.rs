use crate::ui::Bounds;

pub const PARAMETER_PREFIX: &str = "prm_";
pub const MAPPING_FORM_PREFIX: &str = "RPT_PRM_MAP";
pub const MAPPING_FORM_TITLE: &str = "Report Parameters";
pub const HEADER_LABEL_ID: &str = "lbl_hdr";
pub const GENERATE_BUTTON_ID: &str = "btn_generate";
pub const GENERATE_BUTTON_CAPTION: &str = "Generate report";
pub const LOOKUP_BUTTON_CAPTION: &str = "...";

pub const FORM_LEFT: i32 = 680;
pub const FORM_TOP: i32 = 90;
pub const FORM_WIDTH: i32 = 550;

pub const ROW_HEIGHT: i32 = 24;
pub const FIRST_ROW_TOP: i32 = 38;
pub const ITEM_HEIGHT: i32 = 15;
pub const MIN_FORM_HEIGHT: i32 = 180;
pub const BOTTOM_PADDING: i32 = 72;
pub const GENERATE_BUTTON_SPACING: i32 = 10;
pub const GENERATE_BUTTON_TOP_WITHOUT_FIELDS: i32 = 66;

const COLUMN_LEFT: i32 = 12;
const LABEL_WIDTH: i32 = 120;
const VALUE_OFFSET: i32 = 125;
const LOOKUP_OFFSET: i32 = 230;
const LOOKUP_WIDTH: i32 = 24;
const DESCRIPTION_OFFSET_WITH_LOOKUP: i32 = 260;
const DESCRIPTION_WIDTH: i32 = 250;
const CHECKBOX_WIDTH: i32 = 20;
const EDIT_WIDTH: i32 = 100;
const GENERATE_LEFT: i32 = 400;
const GENERATE_WIDTH: i32 = 120;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldIds {
    pub label: String,
    pub value: String,
    pub lookup: String,
    pub description: String,
}

pub fn field_ids(index: usize) -> FieldIds {
    let suffix = format!("{index:02}");
    FieldIds {
        label: format!("{PARAMETER_PREFIX}lbl_{suffix}"),
        value: format!("{PARAMETER_PREFIX}val_{suffix}"),
        lookup: format!("{PARAMETER_PREFIX}btn_{suffix}"),
        description: format!("{PARAMETER_PREFIX}dsc_{suffix}"),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowLayout {
    pub label: Bounds,
    pub value: Bounds,
    pub lookup: Option<Bounds>,
    pub description: Option<Bounds>,
}

impl RowLayout {
    pub fn bottom(&self) -> i32 {
        [Some(self.label), Some(self.value), self.lookup, self.description]
            .into_iter()
            .flatten()
            .map(|bounds| bounds.bottom())
            .max()
            .unwrap_or(0)
    }
}

pub fn row_top(index: usize) -> i32 {
    let index = i32::try_from(index).unwrap_or(i32::MAX / ROW_HEIGHT);
    FIRST_ROW_TOP.saturating_add(ROW_HEIGHT.saturating_mul(index))
}

pub fn row_layout(index: usize, checkbox: bool, lookup: bool, description: bool) -> RowLayout {
    let top = row_top(index);
    let value_width = if checkbox { CHECKBOX_WIDTH } else { EDIT_WIDTH };
    let description_left = if lookup {
        COLUMN_LEFT + DESCRIPTION_OFFSET_WITH_LOOKUP
    } else {
        COLUMN_LEFT + LOOKUP_OFFSET
    };
    RowLayout {
        label: Bounds::new(COLUMN_LEFT, top + 2, LABEL_WIDTH, ITEM_HEIGHT),
        value: Bounds::new(COLUMN_LEFT + VALUE_OFFSET, top, value_width, ITEM_HEIGHT),
        lookup: lookup
            .then(|| Bounds::new(COLUMN_LEFT + LOOKUP_OFFSET, top, LOOKUP_WIDTH, ITEM_HEIGHT)),
        description: description
            .then(|| Bounds::new(description_left, top, DESCRIPTION_WIDTH, ITEM_HEIGHT)),
    }
}

pub fn header_bounds() -> Bounds {
    Bounds::new(COLUMN_LEFT, 12, 600, ITEM_HEIGHT)
}

pub fn generate_button_bounds(lowest_value_bottom: Option<i32>) -> Bounds {
    let top = match lowest_value_bottom {
        Some(bottom) if bottom > 0 => bottom + GENERATE_BUTTON_SPACING,
        _ => GENERATE_BUTTON_TOP_WITHOUT_FIELDS,
    };
    Bounds::new(GENERATE_LEFT, top, GENERATE_WIDTH, 19)
}

pub fn form_height(lowest_bottom: i32) -> i32 {
    (lowest_bottom + BOTTOM_PADDING).max(MIN_FORM_HEIGHT)
}
