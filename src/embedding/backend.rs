use crate::ui::UiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WindowHandle(pub u64);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EmbeddingError {
    #[error("main application window is unavailable: {0}")]
    MainWindowUnavailable(String),
    #[error("host surface `{title}` did not appear after {attempts} attempts")]
    HostSurfaceNotFound { title: String, attempts: u32 },
    #[error("failed to prepare host form `{host_id}`: {source}")]
    HostForm {
        host_id: String,
        #[source]
        source: UiError,
    },
    #[error("failed to spawn worker `{name}`: {message}")]
    WorkerSpawn { name: String, message: String },
    #[error("embedded content failed: {0}")]
    Content(String),
    #[error("window operation failed: {0}")]
    Window(String),
}

pub trait ViewerWindow: Send {
    fn window(&self) -> WindowHandle;

    // Processes pending window messages; false once the window was closed by the user.
    fn pump(&mut self) -> bool;

    fn close(&mut self);
}

pub type ContentFactory =
    Box<dyn FnOnce() -> Result<Box<dyn ViewerWindow>, EmbeddingError> + Send + 'static>;

pub trait WindowingBackend: Send + Sync {
    fn main_window(&self) -> Result<WindowHandle, EmbeddingError>;

    fn find_window_by_title(&self, parent: WindowHandle, title: &str) -> Option<WindowHandle>;

    fn strip_decorations(&self, window: WindowHandle) -> Result<(), EmbeddingError>;

    fn reparent(&self, child: WindowHandle, container: WindowHandle) -> Result<(), EmbeddingError>;

    fn close_window(&self, window: WindowHandle) -> Result<(), EmbeddingError>;
}
