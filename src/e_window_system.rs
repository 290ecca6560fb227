//! The seam between the embedding logic and the native window manager.
//!
//! Everything the locator, cache, embedder and orchestrator need from the OS
//! goes through [`WindowSystem`]. `Win32WindowSystem` is the real backend on
//! Windows; `MockWindowSystem` is an in-memory stand-in.

use crate::e_types::{DockRect, ProcessDescriptor, WindowHandle};

pub trait WindowSystem {
    /// Point-in-time snapshot of the process table, in OS enumeration order.
    fn processes(&self) -> Vec<ProcessDescriptor>;

    /// Does `w` currently denote a live window?
    fn is_live(&self, w: WindowHandle) -> bool;

    /// Window class name, or `None` when the query fails.
    fn class_name(&self, w: WindowHandle) -> Option<String>;

    fn style(&self, w: WindowHandle) -> anyhow::Result<u32>;

    fn set_style(&self, w: WindowHandle, style: u32) -> anyhow::Result<()>;

    fn set_parent(&self, child: WindowHandle, new_parent: WindowHandle) -> anyhow::Result<()>;

    /// Move/resize `w` to `rect` with `SWP_*` flags.
    fn set_position(&self, w: WindowHandle, rect: DockRect, flags: u32) -> anyhow::Result<()>;

    /// Pid owning `w`, if the process can be opened for query.
    fn owning_process(&self, w: WindowHandle) -> Option<u32>;

    /// Client area of `w` in its own coordinates.
    fn client_rect(&self, w: WindowHandle) -> Option<DockRect>;

    /// Main window of `pid` from a fresh snapshot.
    fn main_window_of(&self, pid: u32) -> Option<WindowHandle> {
        self.processes()
            .into_iter()
            .find(|p| p.pid == pid && p.has_window())
            .map(|p| p.main_window)
    }
}

impl<T: WindowSystem + ?Sized> WindowSystem for &T {
    fn processes(&self) -> Vec<ProcessDescriptor> {
        (**self).processes()
    }
    fn is_live(&self, w: WindowHandle) -> bool {
        (**self).is_live(w)
    }
    fn class_name(&self, w: WindowHandle) -> Option<String> {
        (**self).class_name(w)
    }
    fn style(&self, w: WindowHandle) -> anyhow::Result<u32> {
        (**self).style(w)
    }
    fn set_style(&self, w: WindowHandle, style: u32) -> anyhow::Result<()> {
        (**self).set_style(w, style)
    }
    fn set_parent(&self, child: WindowHandle, new_parent: WindowHandle) -> anyhow::Result<()> {
        (**self).set_parent(child, new_parent)
    }
    fn set_position(&self, w: WindowHandle, rect: DockRect, flags: u32) -> anyhow::Result<()> {
        (**self).set_position(w, rect, flags)
    }
    fn owning_process(&self, w: WindowHandle) -> Option<u32> {
        (**self).owning_process(w)
    }
    fn client_rect(&self, w: WindowHandle) -> Option<DockRect> {
        (**self).client_rect(w)
    }
    fn main_window_of(&self, pid: u32) -> Option<WindowHandle> {
        (**self).main_window_of(pid)
    }
}
