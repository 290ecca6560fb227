//! A command-line stand-in for the editor: it tracks a real parent window
//! and drives an [`Orchestrator`] from a polling loop.

use crate::e_locator;
use crate::e_orchestrator::{HostEditor, Orchestrator};
use crate::e_types::{DockRect, WindowHandle};
use crate::e_window_system::WindowSystem;
use anyhow::{bail, Result};
use log::{debug, info};
use std::cell::Cell;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

/// Minimum time between two process-table scans while no game window is known.
pub const DEFAULT_RESCAN_INTERVAL: Duration = Duration::from_secs(1);

/// Where the dock area comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DockSource {
    /// A fixed rect in the parent's client coordinates.
    Fixed(DockRect),
    /// The parent's whole client area, re-read on every poll.
    ParentClient,
}

pub struct WatchHost<W: WindowSystem> {
    ws: W,
    own: WindowHandle,
    dock: DockSource,
    game_process: Option<String>,
    target_class: String,
    last_rect: Option<DockRect>,
    rescan_every: Duration,
    game: Cell<Option<WindowHandle>>,
    last_scan: Cell<Option<(Instant, bool)>>,
}

impl<W: WindowSystem> WatchHost<W> {
    pub fn new(ws: W, own: WindowHandle, dock: DockSource, target_class: &str) -> Self {
        Self {
            ws,
            own,
            dock,
            game_process: None,
            target_class: target_class.to_string(),
            last_rect: None,
            rescan_every: DEFAULT_RESCAN_INTERVAL,
            game: Cell::new(None),
            last_scan: Cell::new(None),
        }
    }

    /// Treat "process named `name` is running" as "a scene is playing".
    pub fn with_game_process(mut self, name: Option<String>) -> Self {
        self.game_process = name;
        self
    }

    pub fn with_rescan_interval(mut self, every: Duration) -> Self {
        self.rescan_every = every;
        self
    }

    /// Marks `w` as the running game. After a reparent the game is a child
    /// window and no snapshot lists it, so the embedder has to say so.
    pub fn remember_game(&self, w: WindowHandle) {
        if !w.is_null() && self.game.get() != Some(w) {
            debug!("tracking game window {}", w);
            self.game.set(Some(w));
        }
    }

    pub fn remembered_game(&self) -> Option<WindowHandle> {
        self.game.get()
    }

    /// The dock rect if it changed since the previous poll.
    pub fn poll_geometry(&mut self) -> Option<DockRect> {
        let rect = self.dock_rect();
        if self.last_rect == Some(rect) {
            return None;
        }
        self.last_rect = Some(rect);
        Some(rect)
    }

    /// One full snapshot. Remembers the game window it finds.
    fn scan(&self) -> bool {
        let processes = self.ws.processes();
        let (playing, window) = match &self.game_process {
            Some(name) => match processes.iter().find(|p| p.name.eq_ignore_ascii_case(name)) {
                Some(p) => (true, p.has_window().then_some(p.main_window)),
                None => (false, None),
            },
            None => {
                let found = e_locator::find_target_window(
                    &self.ws,
                    &processes,
                    self.own,
                    &self.target_class,
                );
                (found.is_some(), found)
            }
        };
        if let Some(w) = window {
            self.remember_game(w);
        }
        playing
    }
}

impl<W: WindowSystem> HostEditor for WatchHost<W> {
    fn dock_rect(&self) -> DockRect {
        match self.dock {
            DockSource::Fixed(rect) => rect,
            DockSource::ParentClient => self.ws.client_rect(self.own).unwrap_or_default(),
        }
    }

    /// Playing while the remembered game window is live. Without one, a
    /// full scan runs at most once per rescan interval.
    fn is_playing(&self) -> bool {
        if let Some(game) = self.game.get() {
            if self.ws.is_live(game) {
                return true;
            }
            debug!("game window {} is gone", game);
            self.game.set(None);
            self.last_scan.set(None);
        }
        let now = Instant::now();
        if let Some((at, playing)) = self.last_scan.get() {
            if now.duration_since(at) < self.rescan_every {
                return playing;
            }
        }
        let playing = self.scan();
        self.last_scan.set(Some((now, playing)));
        playing
    }

    fn own_window(&self) -> WindowHandle {
        self.own
    }
}

/// Picks the window the game gets reparented under: an explicit live
/// handle, or the main window of a pid. One of the two is required.
pub fn resolve_parent<W: WindowSystem + ?Sized>(
    ws: &W,
    parent: Option<WindowHandle>,
    parent_pid: Option<u32>,
) -> Result<WindowHandle> {
    match (parent, parent_pid) {
        (Some(hwnd), _) => {
            if !ws.is_live(hwnd) {
                bail!("parent {} is not a window", hwnd);
            }
            Ok(hwnd)
        }
        (None, Some(pid)) => match ws.main_window_of(pid) {
            Some(hwnd) => Ok(hwnd),
            None => bail!("process {} has no main window", pid),
        },
        (None, None) => bail!("no parent window given; pass --parent or --parent-pid"),
    }
}

/// Tells the host about the window the orchestrator holds.
fn share_target<W, HW>(orch: &Orchestrator<W, WatchHost<HW>>)
where
    W: WindowSystem,
    HW: WindowSystem,
{
    if let Some(game) = orch.cached_target() {
        orch.host().remember_game(game);
    }
}

/// Ready, then poll geometry and tick until `stop` is set or `max_ticks` ran.
pub fn run_follow<W, HW>(
    orch: &mut Orchestrator<W, WatchHost<HW>>,
    stop: &AtomicBool,
    interval: Duration,
    max_ticks: Option<usize>,
) -> usize
where
    W: WindowSystem,
    HW: WindowSystem,
{
    orch.host_mut().poll_geometry();
    orch.on_ready();
    share_target(orch);
    let mut ticks = 0;
    while !stop.load(Ordering::SeqCst) {
        if max_ticks.is_some_and(|max| ticks >= max) {
            break;
        }
        if let Some(rect) = orch.host_mut().poll_geometry() {
            debug!("dock now {}", rect);
            orch.on_geometry_changed(rect);
            share_target(orch);
        }
        orch.on_frame_tick();
        share_target(orch);
        ticks += 1;
        if !interval.is_zero() {
            thread::sleep(interval);
        }
    }
    info!(
        "follow stopped after {} ticks, {} embeds",
        ticks,
        orch.embed_count()
    );
    ticks
}
