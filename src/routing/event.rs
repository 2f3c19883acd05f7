#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventPhase {
    Before,
    After,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventType {
    Click,
    DoubleClick,
    ItemPressed,
    KeyDown,
    Validate,
    FormClose,
    FormVisible,
    ComboSelect,
    Other,
}

impl EventType {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().replace(['-', '_'], "").as_str() {
            "click" => Self::Click,
            "doubleclick" => Self::DoubleClick,
            "itempressed" => Self::ItemPressed,
            "keydown" => Self::KeyDown,
            "validate" => Self::Validate,
            "formclose" => Self::FormClose,
            "formvisible" => Self::FormVisible,
            "comboselect" => Self::ComboSelect,
            _ => Self::Other,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostEvent {
    pub form_id: String,
    pub item_id: String,
    pub event_type: EventType,
    pub phase: EventPhase,
    pub action_success: bool,
    pub row: Option<usize>,
    pub column_id: Option<String>,
}

impl HostEvent {
    pub fn new(form_id: &str, item_id: &str, event_type: EventType, phase: EventPhase) -> Self {
        Self {
            form_id: form_id.to_string(),
            item_id: item_id.to_string(),
            event_type,
            phase,
            action_success: true,
            row: None,
            column_id: None,
        }
    }

    pub fn form_close(form_id: &str, phase: EventPhase) -> Self {
        Self::new(form_id, "", EventType::FormClose, phase)
    }

    pub fn at_row(mut self, row: usize) -> Self {
        self.row = Some(row);
        self
    }

    pub fn on_column(mut self, column_id: &str) -> Self {
        self.column_id = Some(column_id.to_string());
        self
    }

    pub fn failed(mut self) -> Self {
        self.action_success = false;
        self
    }

    pub fn is_after(&self) -> bool {
        self.phase == EventPhase::After
    }

    pub fn is_header(&self) -> bool {
        self.row.is_none() && self.column_id.is_some()
    }
}
