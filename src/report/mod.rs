pub mod engine;
pub mod launch;
pub mod locate;

pub use engine::{
    qualified_table_location, DatabaseLogon, MemoryReportEngine, ReportEngine, ReportError,
    ReportRequest, TableLogon,
};
pub use launch::{embedded_factory, launch_standalone, VIEWER_THREAD_NAME};
pub use locate::resolve_report_file;
