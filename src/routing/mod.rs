pub mod classify;
pub mod event;
pub mod predicates;

pub use classify::{Route, RouteTargets, Router};
pub use event::{EventPhase, EventType, HostEvent};
pub use predicates::{
    is_generate_report_button, is_mapping_form, is_parameter_button, is_query_picker_form,
    is_query_picker_grid, is_query_picker_search_item,
};
