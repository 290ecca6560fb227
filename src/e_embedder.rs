//! The "fake embed" transform.
//!
//! None of these calls are undone: the original style and parent are not
//! tracked. A stale handle makes the native call fail; the error is handed
//! back for logging and the next cycle rediscovers.

use crate::e_types::{placement, style, DockRect, WindowHandle};
use crate::e_window_system::WindowSystem;
use anyhow::Context;
use log::debug;

/// Clears border, caption, system menu, minimize and maximize boxes.
pub fn stripped_style(current: u32) -> u32 {
    current & !style::DECORATIONS
}

/// Target geometry for a dock rect with `extra_top_offset` reserved above the game.
pub fn reposition_rect(rect: DockRect, extra_top_offset: i32) -> DockRect {
    DockRect {
        x: rect.x,
        y: rect.y + extra_top_offset,
        width: rect.width,
        height: (rect.height - extra_top_offset).max(0),
    }
}

pub fn strip_decorations<W: WindowSystem + ?Sized>(ws: &W, w: WindowHandle) -> anyhow::Result<()> {
    let current = ws.style(w).context("reading window style")?;
    let stripped = stripped_style(current);
    if stripped != current {
        debug!("style {:#010X} -> {:#010X} for {}", current, stripped, w);
    }
    ws.set_style(w, stripped).context("writing window style")
}

/// Moves and resizes without raising or activating `w`.
pub fn reposition<W: WindowSystem + ?Sized>(
    ws: &W,
    w: WindowHandle,
    rect: DockRect,
    extra_top_offset: i32,
) -> anyhow::Result<()> {
    let target = reposition_rect(rect, extra_top_offset);
    ws.set_position(w, target, placement::EMBED)
        .with_context(|| format!("moving {} to {}", w, target))
}

pub fn reparent<W: WindowSystem + ?Sized>(
    ws: &W,
    w: WindowHandle,
    new_parent: WindowHandle,
) -> anyhow::Result<()> {
    ws.set_parent(w, new_parent)
        .with_context(|| format!("reparenting {} under {}", w, new_parent))
}

/// Reparent, strip, reposition. The position call also flushes the frame
/// change from the style edit.
///
/// All three steps are attempted even when an earlier one fails; the first
/// error is returned and the later ones are logged.
pub fn embed<W: WindowSystem + ?Sized>(
    ws: &W,
    w: WindowHandle,
    parent: WindowHandle,
    rect: DockRect,
    extra_top_offset: i32,
) -> anyhow::Result<()> {
    let steps = [
        reparent(ws, w, parent),
        strip_decorations(ws, w),
        reposition(ws, w, rect, extra_top_offset),
    ];
    let mut first = None;
    for result in steps {
        if let Err(e) = result {
            if first.is_none() {
                first = Some(e);
            } else {
                debug!("also failed: {:#}", e);
            }
        }
    }
    first.map_or(Ok(()), Err)
}
