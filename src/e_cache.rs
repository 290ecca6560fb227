// src/e_cache.rs

use crate::e_types::WindowHandle;
use crate::e_window_system::WindowSystem;
use log::debug;

/// Remembers the game window so the process table is only rescanned when
/// the previous answer stops being a live window.
#[derive(Debug, Default, Clone)]
pub struct WindowCache {
    held: Option<WindowHandle>,
}

impl WindowCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> Option<WindowHandle> {
        self.held
    }

    /// Asks the OS every time; a handle is never trusted from memory alone.
    pub fn is_valid<W: WindowSystem + ?Sized>(&self, ws: &W) -> bool {
        match self.held {
            Some(hwnd) if !hwnd.is_null() => ws.is_live(hwnd),
            _ => false,
        }
    }

    /// Returns the cached handle if still live, otherwise runs `discover`
    /// once and caches what it finds. A miss leaves the cache empty.
    pub fn get_or_discover<W, F>(&mut self, ws: &W, discover: F) -> Option<WindowHandle>
    where
        W: WindowSystem + ?Sized,
        F: FnOnce() -> Option<WindowHandle>,
    {
        if self.is_valid(ws) {
            return self.held;
        }
        if let Some(stale) = self.held.take() {
            debug!("Cached hwnd {} is no longer a window", stale);
        }
        match discover() {
            Some(hwnd) if !hwnd.is_null() => {
                self.held = Some(hwnd);
                Some(hwnd)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::e_mock::MockWindowSystem;
    use std::cell::Cell;

    #[test]
    fn empty_cache_is_invalid() {
        let ws = MockWindowSystem::new();
        assert!(!WindowCache::new().is_valid(&ws));
    }

    #[test]
    fn live_then_closed() {
        let ws = MockWindowSystem::new().with_process(3, "game", Some((200, "Engine")));
        let mut cache = WindowCache::new();
        let calls = Cell::new(0);
        let discover = || {
            calls.set(calls.get() + 1);
            Some(WindowHandle(200))
        };
        assert_eq!(cache.get_or_discover(&ws, discover), Some(WindowHandle(200)));
        assert!(cache.is_valid(&ws));

        ws.close_window(WindowHandle(200));
        assert!(!cache.is_valid(&ws));

        let rediscover = || {
            calls.set(calls.get() + 1);
            None
        };
        assert_eq!(cache.get_or_discover(&ws, rediscover), None);
        assert_eq!(calls.get(), 2);
        assert_eq!(cache.get(), None);
    }

    #[test]
    fn valid_cache_skips_discovery() {
        let ws = MockWindowSystem::new().with_process(3, "game", Some((200, "Engine")));
        let mut cache = WindowCache::new();
        cache.get_or_discover(&ws, || Some(WindowHandle(200)));
        let found = cache.get_or_discover(&ws, || panic!("discovery must not run"));
        assert_eq!(found, Some(WindowHandle(200)));
    }

    #[test]
    fn null_discovery_result_is_not_cached() {
        let ws = MockWindowSystem::new();
        let mut cache = WindowCache::new();
        assert_eq!(cache.get_or_discover(&ws, || Some(WindowHandle::NULL)), None);
        assert_eq!(cache.get(), None);
    }
}
