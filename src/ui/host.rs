use crate::store::QueryResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    Label,
    Edit,
    CheckBox,
    Button,
    ComboBox,
    Grid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Bounds {
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
}

impl Bounds {
    pub fn new(left: i32, top: i32, width: i32, height: i32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn bottom(&self) -> i32 {
        self.top + self.height
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemSpec {
    pub id: String,
    pub kind: ItemKind,
    pub bounds: Bounds,
    pub caption: String,
    pub enabled: bool,
}

impl ItemSpec {
    pub fn new(id: &str, kind: ItemKind, bounds: Bounds) -> Self {
        Self {
            id: id.to_string(),
            kind,
            bounds,
            caption: String::new(),
            enabled: true,
        }
    }

    pub fn caption(mut self, caption: &str) -> Self {
        self.caption = caption.to_string();
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSpec {
    pub id: String,
    pub title: String,
    pub bounds: Bounds,
    pub sizable: bool,
    pub parent: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UiError {
    #[error("form `{form_id}` is not open")]
    MissingForm { form_id: String },
    #[error("item `{item_id}` does not exist on form `{form_id}`")]
    MissingItem { form_id: String, item_id: String },
    #[error("item `{item_id}` on form `{form_id}` is a {actual:?}, expected {expected:?}")]
    WrongKind {
        form_id: String,
        item_id: String,
        expected: ItemKind,
        actual: ItemKind,
    },
    #[error("form `{form_id}` already exists")]
    DuplicateForm { form_id: String },
    #[error("item `{item_id}` already exists on form `{form_id}`")]
    DuplicateItem { form_id: String, item_id: String },
}

// Identifiers are compared case-insensitively by every implementation.
pub trait HostUi {
    fn form_exists(&self, form_id: &str) -> bool;
    fn open_forms(&self) -> Vec<String>;
    fn parent_of(&self, form_id: &str) -> Option<String>;
    fn create_form(&mut self, spec: FormSpec) -> Result<(), UiError>;
    fn close_form(&mut self, form_id: &str) -> Result<(), UiError>;
    fn focus_form(&mut self, form_id: &str) -> Result<(), UiError>;
    fn resize_form(&mut self, form_id: &str, width: i32, height: i32) -> Result<(), UiError>;

    fn add_item(&mut self, form_id: &str, spec: ItemSpec) -> Result<(), UiError>;
    fn item_kind(&self, form_id: &str, item_id: &str) -> Option<ItemKind>;
    fn item_bounds(&self, form_id: &str, item_id: &str) -> Result<Bounds, UiError>;

    fn text(&self, form_id: &str, item_id: &str) -> Result<String, UiError>;
    fn set_text(&mut self, form_id: &str, item_id: &str, value: &str) -> Result<(), UiError>;
    fn is_checked(&self, form_id: &str, item_id: &str) -> Result<bool, UiError>;
    fn set_checked(&mut self, form_id: &str, item_id: &str, checked: bool)
        -> Result<(), UiError>;
    fn set_caption(&mut self, form_id: &str, item_id: &str, caption: &str)
        -> Result<(), UiError>;

    fn bind_grid(
        &mut self,
        form_id: &str,
        item_id: &str,
        result: QueryResult,
    ) -> Result<(), UiError>;
    fn grid(&self, form_id: &str, item_id: &str) -> Result<QueryResult, UiError>;

    fn set_status(&mut self, message: &str, kind: StatusKind);

    fn has_item(&self, form_id: &str, item_id: &str) -> bool {
        self.item_kind(form_id, item_id).is_some()
    }

    fn children_of(&self, form_id: &str) -> Vec<String> {
        self.open_forms()
            .into_iter()
            .filter(|candidate| !candidate.eq_ignore_ascii_case(form_id))
            .filter(|candidate| {
                self.parent_of(candidate)
                    .is_some_and(|parent| parent.eq_ignore_ascii_case(form_id))
            })
            .collect()
    }
}
