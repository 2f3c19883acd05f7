pub mod backend;
pub mod memory;
pub mod registry;
pub mod worker;

pub use backend::{ContentFactory, EmbeddingError, ViewerWindow, WindowHandle, WindowingBackend};
pub use memory::{MemoryViewer, MemoryWindowing, WindowJournal};
pub use registry::{DisposeOutcome, EmbeddedHostRecord, EmbeddedHostRegistry, HostLayout};
pub use worker::{ChildStatus, WorkerCommand, PUMP_INTERVAL};
