//! In-memory [`WindowSystem`] for tests and dry runs.
//!
//! ```
//! use fake_emb::{MockWindowSystem, WindowHandle, WindowSystem};
//!
//! let ws = MockWindowSystem::new()
//!     .with_process(1, "idle", None)
//!     .with_process(3, "game", Some((200, "Engine")));
//! assert_eq!(ws.class_name(WindowHandle(200)).as_deref(), Some("Engine"));
//! ws.close_window(WindowHandle(200));
//! assert!(!ws.is_live(WindowHandle(200)));
//! ```

use crate::e_types::{DockRect, ProcessDescriptor, WindowHandle};
use crate::e_window_system::WindowSystem;
use anyhow::bail;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;

/// Style a freshly created mock window starts with (visible overlapped window).
pub const DEFAULT_MOCK_STYLE: u32 = 0x10CF_0000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockWindow {
    pub pid: u32,
    pub class: String,
    pub style: u32,
    pub parent: WindowHandle,
    pub rect: DockRect,
    pub live: bool,
}

/// A native call the mock received, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockCall {
    SetParent(WindowHandle, WindowHandle),
    SetStyle(WindowHandle, u32),
    SetPosition(WindowHandle, DockRect, u32),
}

#[derive(Debug, Default)]
pub struct MockWindowSystem {
    processes: RefCell<Vec<ProcessDescriptor>>,
    windows: RefCell<HashMap<WindowHandle, MockWindow>>,
    calls: RefCell<Vec<MockCall>>,
    snapshots: Cell<usize>,
    failures: RefCell<Vec<MockCall>>,
}

impl MockWindowSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a process, optionally owning a main window `(hwnd, class)`.
    pub fn with_process(self, pid: u32, name: &str, window: Option<(usize, &str)>) -> Self {
        self.add_process(pid, name, window);
        self
    }

    pub fn add_process(&self, pid: u32, name: &str, window: Option<(usize, &str)>) {
        let main_window = match window {
            Some((raw, class)) => {
                let hwnd = WindowHandle(raw);
                self.windows.borrow_mut().insert(
                    hwnd,
                    MockWindow {
                        pid,
                        class: class.to_string(),
                        style: DEFAULT_MOCK_STYLE,
                        parent: WindowHandle::NULL,
                        rect: DockRect::new(0, 0, 640, 480),
                        live: true,
                    },
                );
                hwnd
            }
            None => WindowHandle::NULL,
        };
        self.processes
            .borrow_mut()
            .push(ProcessDescriptor::new(pid, name, main_window));
    }

    /// Simulates the window being destroyed and its process exiting.
    pub fn close_window(&self, w: WindowHandle) {
        let pid = self.windows.borrow_mut().get_mut(&w).map(|window| {
            window.live = false;
            window.pid
        });
        self.processes
            .borrow_mut()
            .retain(|p| p.main_window != w && Some(p.pid) != pid);
    }

    /// Makes the next call equal to `call` fail without taking effect.
    pub fn fail_next(&self, call: MockCall) {
        self.failures.borrow_mut().push(call);
    }

    pub fn window(&self, w: WindowHandle) -> Option<MockWindow> {
        self.windows.borrow().get(&w).cloned()
    }

    /// Number of process-table snapshots taken so far.
    pub fn snapshot_count(&self) -> usize {
        self.snapshots.get()
    }

    pub fn calls(&self) -> Vec<MockCall> {
        self.calls.borrow().clone()
    }

    fn live_window(&self, w: WindowHandle, call: &str) -> anyhow::Result<()> {
        if !self.is_live(w) {
            bail!("{} failed: {} is not a window", call, w);
        }
        Ok(())
    }

    /// Records `call` unless it was queued with [`fail_next`](Self::fail_next).
    fn record(&self, call: MockCall) -> anyhow::Result<()> {
        let mut failures = self.failures.borrow_mut();
        if let Some(at) = failures.iter().position(|f| *f == call) {
            failures.remove(at);
            bail!("{:?} failed (injected)", call);
        }
        self.calls.borrow_mut().push(call);
        Ok(())
    }
}

impl WindowSystem for MockWindowSystem {
    fn processes(&self) -> Vec<ProcessDescriptor> {
        self.snapshots.set(self.snapshots.get() + 1);
        self.processes.borrow().clone()
    }

    fn is_live(&self, w: WindowHandle) -> bool {
        self.windows.borrow().get(&w).is_some_and(|win| win.live)
    }

    fn class_name(&self, w: WindowHandle) -> Option<String> {
        self.windows
            .borrow()
            .get(&w)
            .filter(|win| win.live)
            .map(|win| win.class.clone())
    }

    fn style(&self, w: WindowHandle) -> anyhow::Result<u32> {
        self.live_window(w, "GetWindowLongW")?;
        Ok(self.windows.borrow()[&w].style)
    }

    fn set_style(&self, w: WindowHandle, style: u32) -> anyhow::Result<()> {
        self.live_window(w, "SetWindowLongW")?;
        self.record(MockCall::SetStyle(w, style))?;
        if let Some(win) = self.windows.borrow_mut().get_mut(&w) {
            win.style = style;
        }
        Ok(())
    }

    fn set_parent(&self, child: WindowHandle, new_parent: WindowHandle) -> anyhow::Result<()> {
        self.live_window(child, "SetParent")?;
        self.record(MockCall::SetParent(child, new_parent))?;
        let pid = self.windows.borrow_mut().get_mut(&child).map(|win| {
            win.parent = new_parent;
            win.pid
        });
        // A child window is no longer top-level, so it drops out of the
        // snapshot the same way EnumWindows stops listing it.
        for p in self.processes.borrow_mut().iter_mut() {
            if Some(p.pid) != pid {
                continue;
            }
            if new_parent.is_null() {
                p.main_window = child;
            } else if p.main_window == child {
                p.main_window = WindowHandle::NULL;
            }
        }
        Ok(())
    }

    fn set_position(&self, w: WindowHandle, rect: DockRect, flags: u32) -> anyhow::Result<()> {
        self.live_window(w, "SetWindowPos")?;
        self.record(MockCall::SetPosition(w, rect, flags))?;
        if let Some(win) = self.windows.borrow_mut().get_mut(&w) {
            win.rect = rect;
        }
        Ok(())
    }

    fn owning_process(&self, w: WindowHandle) -> Option<u32> {
        self.windows
            .borrow()
            .get(&w)
            .filter(|win| win.live)
            .map(|win| win.pid)
    }

    fn client_rect(&self, w: WindowHandle) -> Option<DockRect> {
        self.windows
            .borrow()
            .get(&w)
            .filter(|win| win.live)
            .map(|win| DockRect::new(0, 0, win.rect.width, win.rect.height))
    }
}
