pub mod definition;
pub mod loader;

pub use definition::{ParameterDefinition, ParameterType, ReportEntry};
pub use loader::{
    list_reports, load, parameters_statement, reports_statement, try_load, DEPARTMENT_COLUMN,
    PARAM_HEADER_TABLE, PARAM_LINE_TABLE, REPORT_CODE_COLUMN, REPORT_NAME_COLUMN,
};
