#![doc = include_str!("../README.md")]

// Re-export std common modules
pub mod prelude {
    pub use std::io::Write;
    pub use std::path::{Path, PathBuf};
    pub use std::sync::atomic::{AtomicBool, Ordering};
    pub use std::sync::Arc;
    pub use std::time::Duration;
    pub use log::{debug, error, info, log_enabled, warn, Level};
}

pub mod e_types;
pub use e_types::{DockRect, ProcessDescriptor, WindowHandle};
pub mod e_window_system;
pub use e_window_system::WindowSystem;
pub mod e_locator;
pub use e_locator::{candidate_windows, discover, find_target_window};
pub mod e_cache;
pub use e_cache::WindowCache;
pub mod e_embedder;
pub mod e_orchestrator;
pub use e_orchestrator::{HostEditor, Orchestrator};
pub mod e_placement;
pub use e_placement::StartupPlacement;
pub mod e_config;
pub use e_config::Config;
pub mod e_host;
pub use e_host::{DockSource, WatchHost};
pub mod e_cli;
pub use e_cli::{Cli, Command};
pub mod e_commands;
pub mod e_mock;
pub use e_mock::MockWindowSystem;
#[cfg(windows)]
pub mod e_win32;
#[cfg(windows)]
pub use e_win32::Win32WindowSystem;
