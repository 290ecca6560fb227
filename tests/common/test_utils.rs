use fake_emb::{DockRect, HostEditor, MockWindowSystem, WindowHandle};
use std::cell::Cell;
use std::fs;
use std::io::Result as IoResult;
use std::path::PathBuf;
use tempfile::{tempdir, TempDir};

pub const EDITOR: WindowHandle = WindowHandle(300);
pub const GAME: WindowHandle = WindowHandle(200);

/// pid 1 windowless, pid 2 an unrelated window, pid 3 the game, pid 4 the editor.
pub fn scenario_ws() -> MockWindowSystem {
    MockWindowSystem::new()
        .with_process(1, "System", None)
        .with_process(2, "notepad.exe", Some((100, "Other")))
        .with_process(3, "game.exe", Some((200, "Engine")))
        .with_process(4, "editor.exe", Some((300, "Engine")))
}

/// A host whose play state is flipped by the test.
pub struct TestHost {
    pub rect: Cell<DockRect>,
    pub playing: Cell<bool>,
}

impl TestHost {
    pub fn new(rect: DockRect) -> Self {
        Self {
            rect: Cell::new(rect),
            playing: Cell::new(false),
        }
    }
}

impl HostEditor for TestHost {
    fn dock_rect(&self) -> DockRect {
        self.rect.get()
    }
    fn is_playing(&self) -> bool {
        self.playing.get()
    }
    fn own_window(&self) -> WindowHandle {
        EDITOR
    }
}

/// A temporary directory holding a config file. Dropping it removes both.
pub struct TestConfig {
    pub temp_dir: TempDir,
    pub path: PathBuf,
}

pub fn write_config(contents: &str) -> IoResult<TestConfig> {
    let temp_dir = tempdir()?;
    let path = temp_dir.path().join("fake-emb.toml");
    fs::write(&path, contents)?;
    Ok(TestConfig { temp_dir, path })
}
