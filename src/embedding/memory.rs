use super::backend::{EmbeddingError, ViewerWindow, WindowHandle, WindowingBackend};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WindowJournal {
    pub stripped: Vec<WindowHandle>,
    pub reparented: Vec<(WindowHandle, WindowHandle)>,
    pub closed: Vec<WindowHandle>,
}

#[derive(Debug, Clone, Copy)]
struct Surface {
    window: WindowHandle,
    misses_left: u32,
}

#[derive(Debug)]
pub struct MemoryWindowing {
    main: Option<WindowHandle>,
    next_handle: AtomicU64,
    surfaces: Mutex<HashMap<String, Surface>>,
    lookups: Mutex<HashMap<String, u32>>,
    journal: Mutex<WindowJournal>,
}

impl Default for MemoryWindowing {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryWindowing {
    pub fn new() -> Self {
        Self {
            main: Some(WindowHandle(1)),
            next_handle: AtomicU64::new(100),
            surfaces: Mutex::new(HashMap::new()),
            lookups: Mutex::new(HashMap::new()),
            journal: Mutex::new(WindowJournal::default()),
        }
    }

    pub fn without_main_window() -> Self {
        Self {
            main: None,
            ..Self::new()
        }
    }

    pub fn allocate(&self) -> WindowHandle {
        WindowHandle(self.next_handle.fetch_add(1, Ordering::SeqCst))
    }

    // The surface becomes visible after `misses` unsuccessful lookups.
    pub fn register_surface(&self, title: &str, misses: u32) -> WindowHandle {
        let window = self.allocate();
        if let Ok(mut surfaces) = self.surfaces.lock() {
            surfaces.insert(
                title.to_string(),
                Surface {
                    window,
                    misses_left: misses,
                },
            );
        }
        window
    }

    pub fn lookups(&self, title: &str) -> u32 {
        self.lookups
            .lock()
            .ok()
            .and_then(|lookups| lookups.get(title).copied())
            .unwrap_or(0)
    }

    pub fn journal(&self) -> WindowJournal {
        self.journal
            .lock()
            .map(|journal| journal.clone())
            .unwrap_or_default()
    }

    fn note(&self, apply: impl FnOnce(&mut WindowJournal)) {
        if let Ok(mut journal) = self.journal.lock() {
            apply(&mut journal);
        }
    }
}

impl WindowingBackend for MemoryWindowing {
    fn main_window(&self) -> Result<WindowHandle, EmbeddingError> {
        self.main.ok_or_else(|| {
            EmbeddingError::MainWindowUnavailable("no main window registered".to_string())
        })
    }

    fn find_window_by_title(&self, _parent: WindowHandle, title: &str) -> Option<WindowHandle> {
        if let Ok(mut lookups) = self.lookups.lock() {
            *lookups.entry(title.to_string()).or_insert(0) += 1;
        }
        let mut surfaces = self.surfaces.lock().ok()?;
        let surface = surfaces.get_mut(title)?;
        if surface.misses_left > 0 {
            surface.misses_left -= 1;
            return None;
        }
        Some(surface.window)
    }

    fn strip_decorations(&self, window: WindowHandle) -> Result<(), EmbeddingError> {
        self.note(|journal| journal.stripped.push(window));
        Ok(())
    }

    fn reparent(&self, child: WindowHandle, container: WindowHandle) -> Result<(), EmbeddingError> {
        self.note(|journal| journal.reparented.push((child, container)));
        Ok(())
    }

    fn close_window(&self, window: WindowHandle) -> Result<(), EmbeddingError> {
        self.note(|journal| journal.closed.push(window));
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct MemoryViewer {
    window: WindowHandle,
    closed: Arc<AtomicBool>,
}

impl MemoryViewer {
    pub fn new(window: WindowHandle) -> Self {
        Self {
            window,
            closed: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn closed_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.closed)
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

impl ViewerWindow for MemoryViewer {
    fn window(&self) -> WindowHandle {
        self.window
    }

    fn pump(&mut self) -> bool {
        !self.is_closed()
    }

    fn close(&mut self) {
        self.closed.store(true, Ordering::SeqCst);
    }
}
