// src/e_types.rs

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Opaque identifier of a native top-level window (an HWND on Windows).
///
/// Two handles refer to the same window iff their raw values are equal.
/// A handle can go stale at any moment; holders must re-check it with
/// [`crate::WindowSystem::is_live`] before use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct WindowHandle(pub usize);

impl WindowHandle {
    /// The "no window" handle.
    pub const NULL: WindowHandle = WindowHandle(0);

    pub fn is_null(self) -> bool {
        self.0 == 0
    }

    pub fn raw(self) -> usize {
        self.0
    }
}

impl From<usize> for WindowHandle {
    fn from(raw: usize) -> Self {
        WindowHandle(raw)
    }
}

impl fmt::Display for WindowHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#X}", self.0)
    }
}

impl FromStr for WindowHandle {
    type Err = String;

    /// Accept both decimal and hex (with 0x prefix).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let parsed = if let Some(stripped) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
            usize::from_str_radix(stripped, 16)
        } else {
            s.parse()
        };
        parsed
            .map(WindowHandle)
            .map_err(|e| format!("invalid window handle '{}': {}", s, e))
    }
}

/// One live process at snapshot time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessDescriptor {
    pub pid: u32,
    pub name: String,
    /// First visible, unowned top-level window of the process, or NULL.
    pub main_window: WindowHandle,
}

impl ProcessDescriptor {
    pub fn new(pid: u32, name: impl Into<String>, main_window: WindowHandle) -> Self {
        Self {
            pid,
            name: name.into(),
            main_window,
        }
    }

    pub fn has_window(&self) -> bool {
        !self.main_window.is_null()
    }
}

/// Dock area in the parent window's client coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct DockRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl DockRect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

impl fmt::Display for DockRect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}) {}x{}", self.x, self.y, self.width, self.height)
    }
}

impl FromStr for DockRect {
    type Err = String;

    /// Parses `x,y,w,h`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<_> = s.split(',').map(|p| p.trim()).collect();
        if parts.len() != 4 {
            return Err(format!("expected x,y,w,h but got '{}'", s));
        }
        let mut values = [0i32; 4];
        for (slot, part) in values.iter_mut().zip(&parts) {
            *slot = part
                .parse()
                .map_err(|e| format!("invalid rect component '{}': {}", part, e))?;
        }
        let [x, y, width, height] = values;
        if width < 0 || height < 0 {
            return Err(format!("rect size must not be negative: '{}'", s));
        }
        Ok(DockRect::new(x, y, width, height))
    }
}

/// Window style bits (`GWL_STYLE`), Win32 values.
pub mod style {
    pub const WS_BORDER: u32 = 0x0080_0000;
    pub const WS_CAPTION: u32 = 0x00C0_0000;
    pub const WS_SYSMENU: u32 = 0x0008_0000;
    pub const WS_MINIMIZEBOX: u32 = 0x0002_0000;
    pub const WS_MAXIMIZEBOX: u32 = 0x0001_0000;

    /// Everything that makes up the native frame of a top-level window.
    pub const DECORATIONS: u32 = WS_BORDER | WS_CAPTION | WS_SYSMENU | WS_MINIMIZEBOX | WS_MAXIMIZEBOX;
}

/// `SetWindowPos` flags, Win32 values.
pub mod placement {
    pub const SWP_NOSIZE: u32 = 0x0001;
    pub const SWP_NOMOVE: u32 = 0x0002;
    pub const SWP_NOZORDER: u32 = 0x0004;
    pub const SWP_NOACTIVATE: u32 = 0x0010;
    pub const SWP_FRAMECHANGED: u32 = 0x0020;
    pub const SWP_SHOWWINDOW: u32 = 0x0040;
    pub const SWP_HIDEWINDOW: u32 = 0x0080;

    /// Move/resize without touching z-order or focus, and apply a pending style change.
    pub const EMBED: u32 = SWP_NOZORDER | SWP_NOACTIVATE | SWP_FRAMECHANGED;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_handle_parses_hex_and_decimal() {
        assert_eq!("0xC8".parse::<WindowHandle>().unwrap(), WindowHandle(200));
        assert_eq!("200".parse::<WindowHandle>().unwrap(), WindowHandle(200));
        assert!("nope".parse::<WindowHandle>().is_err());
        assert_eq!(WindowHandle(200).to_string(), "0xC8");
    }

    #[test]
    fn null_handle() {
        assert!(WindowHandle::NULL.is_null());
        assert!(!WindowHandle(1).is_null());
        assert!(!ProcessDescriptor::new(1, "idle", WindowHandle::NULL).has_window());
    }

    #[test]
    fn dock_rect_parses() {
        let rect: DockRect = "10, 20,300,400".parse().unwrap();
        assert_eq!(rect, DockRect::new(10, 20, 300, 400));
        assert!("10,20,300".parse::<DockRect>().is_err());
        assert!("10,20,-1,5".parse::<DockRect>().is_err());
        assert!("a,b,c,d".parse::<DockRect>().is_err());
    }

    #[test]
    fn decoration_mask_covers_frame_bits() {
        assert_eq!(style::DECORATIONS & style::WS_CAPTION, style::WS_CAPTION);
        assert_eq!(placement::EMBED & placement::SWP_NOMOVE, 0);
        assert_eq!(placement::EMBED & placement::SWP_NOSIZE, 0);
    }
}
