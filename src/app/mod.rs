pub mod cli;
pub mod command_handlers;
pub mod command_support;
pub mod dispatch;
pub mod mapper;

pub use command_handlers::run_cli;
pub use dispatch::{blocked_close_status, EventOutcome};
pub use mapper::{
    MapperServices, ParameterMapper, NO_SESSION_STATUS, REPORT_OPENED_STATUS,
};
