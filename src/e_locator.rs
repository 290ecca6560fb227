// src/e_locator.rs

use crate::e_types::{ProcessDescriptor, WindowHandle};
use crate::e_window_system::WindowSystem;
use log::{debug, trace, warn};

/// Finds the game window in a process snapshot.
///
/// Walks `processes` in the order given, skipping windowless processes and
/// `exclude` (the host's own window, which shares the engine's class name).
/// The first main window whose class equals `target_class` wins.
pub fn find_target_window<W: WindowSystem + ?Sized>(
    ws: &W,
    processes: &[ProcessDescriptor],
    exclude: WindowHandle,
    target_class: &str,
) -> Option<WindowHandle> {
    for process in processes {
        let hwnd = process.main_window;
        if hwnd.is_null() {
            continue;
        }
        if hwnd == exclude {
            trace!("skipping host window {} (pid {})", hwnd, process.pid);
            continue;
        }
        let class = ws.class_name(hwnd);
        trace!(
            "pid {} {} window {} class {:?}",
            process.pid,
            process.name,
            hwnd,
            class
        );
        if class.as_deref() == Some(target_class) {
            debug!(
                "Found the game: {} (pid {} {})",
                hwnd, process.pid, process.name
            );
            return Some(hwnd);
        }
    }
    None
}

/// Every process whose main window matches, in snapshot order.
pub fn candidate_windows<'a, W: WindowSystem + ?Sized>(
    ws: &W,
    processes: &'a [ProcessDescriptor],
    exclude: WindowHandle,
    target_class: &str,
) -> Vec<&'a ProcessDescriptor> {
    processes
        .iter()
        .filter(|p| p.has_window() && p.main_window != exclude)
        .filter(|p| ws.class_name(p.main_window).as_deref() == Some(target_class))
        .collect()
}

/// Takes a fresh snapshot and locates the game window in it.
///
/// Logs a warning when more than one window qualifies; the first one is
/// still picked.
pub fn discover<W: WindowSystem + ?Sized>(
    ws: &W,
    exclude: WindowHandle,
    target_class: &str,
) -> Option<WindowHandle> {
    debug!("Searching for game...");
    let processes = ws.processes();
    let found = find_target_window(ws, &processes, exclude, target_class);
    if found.is_some() {
        let candidates = candidate_windows(ws, &processes, exclude, target_class);
        if candidates.len() > 1 {
            let pids: Vec<u32> = candidates.iter().map(|p| p.pid).collect();
            warn!(
                "{} windows of class '{}' (pids {:?}); using the first",
                candidates.len(),
                target_class,
                pids
            );
        }
    }
    found
}
