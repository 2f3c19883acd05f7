use super::event::{EventPhase, EventType, HostEvent};
use super::predicates::{
    is_generate_report_button, is_mapping_form, is_parameter_button, is_query_picker_form,
    is_query_picker_grid, is_query_picker_search_item,
};
use crate::config::Settings;
use crate::ui::HostUi;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    BlockClose { children: Vec<String> },
    LoadReportsGrid,
    ShowReportParameters { row: usize },
    OpenQuerySelector { lookup_item: String },
    GenerateReport,
    DisposeEmbeddedHost,
    MappingFormClosed,
    SelectFilterColumn { column: String },
    ApplySelection { row: usize },
    RefreshFilteredGrid,
    PickerClosed,
}

impl Route {
    pub fn suppresses_default(&self) -> bool {
        matches!(self, Self::BlockClose { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTargets {
    pub principal_form: String,
    pub reports_grid: String,
    pub department_combo: String,
    pub embedded_host: String,
}

impl RouteTargets {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            principal_form: settings.principal.form_id.clone(),
            reports_grid: settings.principal.reports_grid.clone(),
            department_combo: settings.principal.department_combo.clone(),
            embedded_host: settings.embedded_host.host_id.clone(),
        }
    }
}

struct RuleInput<'a> {
    host: &'a dyn HostUi,
    event: &'a HostEvent,
    targets: &'a RouteTargets,
}

struct Rule {
    name: &'static str,
    apply: fn(&RuleInput<'_>) -> Option<Route>,
}

const RULES: &[Rule] = &[
    Rule {
        name: "close_guard",
        apply: close_guard,
    },
    Rule {
        name: "principal_reports_load",
        apply: principal_reports_load,
    },
    Rule {
        name: "principal_report_row",
        apply: principal_report_row,
    },
    Rule {
        name: "mapping_lookup_button",
        apply: mapping_lookup_button,
    },
    Rule {
        name: "mapping_generate_button",
        apply: mapping_generate_button,
    },
    Rule {
        name: "embedded_host_close",
        apply: embedded_host_close,
    },
    Rule {
        name: "mapping_form_closed",
        apply: mapping_form_closed,
    },
    Rule {
        name: "picker_grid",
        apply: picker_grid,
    },
    Rule {
        name: "picker_search_key",
        apply: picker_search_key,
    },
    Rule {
        name: "picker_search_validate",
        apply: picker_search_validate,
    },
    Rule {
        name: "picker_closed",
        apply: picker_closed,
    },
];

fn close_guard(input: &RuleInput<'_>) -> Option<Route> {
    let event = input.event;
    if event.event_type != EventType::FormClose || event.phase != EventPhase::Before {
        return None;
    }
    let children = input.host.children_of(&event.form_id);
    (!children.is_empty()).then_some(Route::BlockClose { children })
}

// Form shown, or a department picked in the combo.
fn principal_reports_load(input: &RuleInput<'_>) -> Option<Route> {
    let event = input.event;
    let targets = input.targets;
    if !event.is_after() || !event.form_id.eq_ignore_ascii_case(&targets.principal_form) {
        return None;
    }
    let reload = match event.event_type {
        EventType::FormVisible => true,
        EventType::ComboSelect => {
            event.action_success && event.item_id.eq_ignore_ascii_case(&targets.department_combo)
        }
        _ => false,
    };
    reload.then_some(Route::LoadReportsGrid)
}

fn principal_report_row(input: &RuleInput<'_>) -> Option<Route> {
    let event = input.event;
    let is_click = matches!(event.event_type, EventType::Click | EventType::DoubleClick);
    if !is_click
        || !event.is_after()
        || !event.form_id.eq_ignore_ascii_case(&input.targets.principal_form)
        || !event.item_id.eq_ignore_ascii_case(&input.targets.reports_grid)
    {
        return None;
    }
    event.row.map(|row| Route::ShowReportParameters { row })
}

fn mapping_item_pressed(event: &HostEvent) -> bool {
    is_mapping_form(&event.form_id)
        && event.event_type == EventType::ItemPressed
        && event.is_after()
        && event.action_success
}

fn mapping_lookup_button(input: &RuleInput<'_>) -> Option<Route> {
    let event = input.event;
    (mapping_item_pressed(event) && is_parameter_button(&event.item_id)).then(|| {
        Route::OpenQuerySelector {
            lookup_item: event.item_id.clone(),
        }
    })
}

fn mapping_generate_button(input: &RuleInput<'_>) -> Option<Route> {
    let event = input.event;
    (mapping_item_pressed(event) && is_generate_report_button(&event.item_id))
        .then_some(Route::GenerateReport)
}

fn embedded_host_close(input: &RuleInput<'_>) -> Option<Route> {
    let event = input.event;
    (event.event_type == EventType::FormClose
        && event.phase == EventPhase::Before
        && event
            .form_id
            .eq_ignore_ascii_case(&input.targets.embedded_host))
    .then_some(Route::DisposeEmbeddedHost)
}

fn mapping_form_closed(input: &RuleInput<'_>) -> Option<Route> {
    let event = input.event;
    (event.event_type == EventType::FormClose
        && event.is_after()
        && is_mapping_form(&event.form_id))
    .then_some(Route::MappingFormClosed)
}

fn picker_grid(input: &RuleInput<'_>) -> Option<Route> {
    let event = input.event;
    if !is_query_picker_form(&event.form_id)
        || !is_query_picker_grid(&event.item_id)
        || !event.is_after()
    {
        return None;
    }
    match (event.event_type, event.row, event.column_id.as_deref()) {
        (EventType::Click, None, Some(column)) if !column.trim().is_empty() => {
            Some(Route::SelectFilterColumn {
                column: column.to_string(),
            })
        }
        (EventType::DoubleClick, Some(row), _) => Some(Route::ApplySelection { row }),
        _ => None,
    }
}

fn picker_search_key(input: &RuleInput<'_>) -> Option<Route> {
    let event = input.event;
    (is_query_picker_form(&event.form_id)
        && is_query_picker_search_item(&event.item_id)
        && event.event_type == EventType::KeyDown
        && event.is_after())
    .then_some(Route::RefreshFilteredGrid)
}

fn picker_search_validate(input: &RuleInput<'_>) -> Option<Route> {
    let event = input.event;
    (is_query_picker_form(&event.form_id)
        && is_query_picker_search_item(&event.item_id)
        && event.event_type == EventType::Validate
        && event.is_after()
        && event.action_success)
        .then_some(Route::RefreshFilteredGrid)
}

fn picker_closed(input: &RuleInput<'_>) -> Option<Route> {
    let event = input.event;
    (event.event_type == EventType::FormClose
        && event.is_after()
        && is_query_picker_form(&event.form_id))
    .then_some(Route::PickerClosed)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Router {
    targets: RouteTargets,
}

impl Router {
    pub fn new(targets: RouteTargets) -> Self {
        Self { targets }
    }

    pub fn targets(&self) -> &RouteTargets {
        &self.targets
    }

    pub fn rule_names() -> Vec<&'static str> {
        RULES.iter().map(|rule| rule.name).collect()
    }

    pub fn classify(&self, host: &dyn HostUi, event: &HostEvent) -> Option<Route> {
        self.classify_with_rule(host, event).map(|(_, route)| route)
    }

    pub fn classify_with_rule(
        &self,
        host: &dyn HostUi,
        event: &HostEvent,
    ) -> Option<(&'static str, Route)> {
        let input = RuleInput {
            host,
            event,
            targets: &self.targets,
        };
        RULES
            .iter()
            .find_map(|rule| (rule.apply)(&input).map(|route| (rule.name, route)))
    }
}
