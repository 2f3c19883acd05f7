pub mod host;
pub mod memory;

pub use host::{Bounds, FormSpec, HostUi, ItemKind, ItemSpec, StatusKind, UiError};
pub use memory::{MemoryForm, MemoryHost, MemoryItem};
