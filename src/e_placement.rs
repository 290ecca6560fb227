// src/e_placement.rs

use crate::e_types::DockRect;
use serde::Serialize;

/// Where the game window should open so it starts out roughly on the dock,
/// on the right screen, before it is found and reparented.
///
/// Accuracy is not important here; the embed cycle repositions it exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StartupPlacement {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub fullscreen: bool,
}

impl StartupPlacement {
    /// Dock size minus a native title bar; the title bar is still there at launch.
    pub fn for_dock(dock: DockRect, titlebar_offset: i32) -> Self {
        Self {
            x: dock.x,
            y: dock.y,
            width: dock.width,
            height: (dock.height - titlebar_offset).max(0),
            fullscreen: false,
        }
    }

    pub fn to_toml_string(&self) -> anyhow::Result<String> {
        Ok(toml::to_string(self)?)
    }
}
