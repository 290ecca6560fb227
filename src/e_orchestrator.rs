//! Decides when to run discover → embed.
//!
//! Triggers are the host's lifecycle callbacks: ready, dock geometry change,
//! the not-playing → playing edge seen on a frame tick, and a manual
//! refresh. All of it runs synchronously on the caller's thread.

use crate::e_cache::WindowCache;
use crate::e_config::Config;
use crate::e_embedder;
use crate::e_locator;
use crate::e_placement::StartupPlacement;
use crate::e_types::{DockRect, WindowHandle};
use crate::e_window_system::WindowSystem;
use log::{debug, info, warn};

/// What the orchestrator needs from the editor hosting it.
pub trait HostEditor {
    /// Current dock area, in the host window's client coordinates.
    fn dock_rect(&self) -> DockRect;
    fn is_playing(&self) -> bool;
    /// The host's own top-level window; becomes the game's parent.
    fn own_window(&self) -> WindowHandle;
}

impl<T: HostEditor + ?Sized> HostEditor for &T {
    fn dock_rect(&self) -> DockRect {
        (**self).dock_rect()
    }
    fn is_playing(&self) -> bool {
        (**self).is_playing()
    }
    fn own_window(&self) -> WindowHandle {
        (**self).own_window()
    }
}

pub struct Orchestrator<W: WindowSystem, H: HostEditor> {
    ws: W,
    host: H,
    cache: WindowCache,
    was_playing: bool,
    target_class: String,
    dock_height_offset: i32,
    titlebar_offset: i32,
    embeds: usize,
    last_placement: Option<StartupPlacement>,
}

impl<W: WindowSystem, H: HostEditor> Orchestrator<W, H> {
    pub fn new(ws: W, host: H, config: &Config) -> Self {
        Self {
            ws,
            host,
            cache: WindowCache::new(),
            was_playing: false,
            target_class: config.target_class.clone(),
            dock_height_offset: config.dock_height_offset,
            titlebar_offset: config.titlebar_offset,
            embeds: 0,
            last_placement: None,
        }
    }

    pub fn window_system(&self) -> &W {
        &self.ws
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn cached_target(&self) -> Option<WindowHandle> {
        self.cache.get()
    }

    /// Number of completed reparent/strip/reposition sequences.
    pub fn embed_count(&self) -> usize {
        self.embeds
    }

    /// Startup hint computed on the last geometry change.
    pub fn startup_placement(&self) -> Option<StartupPlacement> {
        self.last_placement
    }

    pub fn on_ready(&mut self) -> Option<WindowHandle> {
        debug!("on_ready");
        let rect = self.host.dock_rect();
        self.last_placement = Some(StartupPlacement::for_dock(rect, self.titlebar_offset));
        self.embed_cycle()
    }

    /// The dock moved or resized. An embedded window follows it; without a
    /// playing scene or a live embedded window there is nothing to move.
    pub fn on_geometry_changed(&mut self, rect: DockRect) -> Option<WindowHandle> {
        debug!("on_geometry_changed {}", rect);
        self.last_placement = Some(StartupPlacement::for_dock(rect, self.titlebar_offset));
        if self.host.is_playing() || self.cache.is_valid(&self.ws) {
            self.embed_cycle()
        } else {
            None
        }
    }

    /// Called once per host frame. Embeds only on the not-playing → playing edge.
    pub fn on_frame_tick(&mut self) -> Option<WindowHandle> {
        let playing = self.host.is_playing();
        let entered = playing && !self.was_playing;
        if playing != self.was_playing {
            debug!("play state {} -> {}", self.was_playing, playing);
        }
        self.was_playing = playing;
        if entered {
            info!("Entered play state");
            self.embed_cycle()
        } else {
            None
        }
    }

    pub fn refresh(&mut self) -> Option<WindowHandle> {
        info!("Refresh requested");
        self.embed_cycle()
    }

    /// validate cache → discover if needed → embed into the current dock rect.
    pub fn embed_cycle(&mut self) -> Option<WindowHandle> {
        let own = self.host.own_window();
        let rect = self.host.dock_rect();
        debug!("Cached hwnd = {:?}", self.cache.get());

        let ws = &self.ws;
        let class = self.target_class.as_str();
        let Some(game) = self
            .cache
            .get_or_discover(ws, || e_locator::discover(ws, own, class))
        else {
            debug!("can't find the game window");
            return None;
        };

        debug!("Found game window @ {}", game);
        match e_embedder::embed(&self.ws, game, own, rect, self.dock_height_offset) {
            Ok(()) => {
                self.embeds += 1;
                Some(game)
            }
            Err(e) => {
                warn!("embedding {} failed: {:#}", game, e);
                None
            }
        }
    }
}
