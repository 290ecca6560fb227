// src/e_commands.rs

use crate::e_cli::{Command, EmbedArgs};
use crate::e_config::Config;
use crate::e_host::{resolve_parent, run_follow, DockSource, WatchHost};
use crate::e_locator;
use crate::e_orchestrator::{HostEditor, Orchestrator};
use crate::e_placement::StartupPlacement;
use crate::e_types::WindowHandle;
use crate::e_window_system::WindowSystem;
use anyhow::{Context, Result};
use serde::Serialize;
use std::io::Write;
use std::sync::atomic::AtomicBool;
use std::time::Duration;

#[derive(Debug, Serialize)]
pub struct ListedWindow {
    pub pid: u32,
    pub name: String,
    pub hwnd: WindowHandle,
    pub class: Option<String>,
    pub candidate: bool,
}

/// Processes with a main window, in snapshot order.
pub fn list_windows<W: WindowSystem + ?Sized>(
    ws: &W,
    exclude: WindowHandle,
    target_class: &str,
) -> Vec<ListedWindow> {
    ws.processes()
        .into_iter()
        .filter(|p| p.has_window())
        .map(|p| {
            let class = ws.class_name(p.main_window);
            let candidate =
                p.main_window != exclude && class.as_deref() == Some(target_class);
            ListedWindow {
                pid: p.pid,
                name: p.name,
                hwnd: p.main_window,
                class,
                candidate,
            }
        })
        .collect()
}

/// Commands that need no window system.
pub fn run_offline(command: &Command, config: &Config, out: &mut impl Write) -> Result<bool> {
    match command {
        Command::Placement { rect } => {
            let placement = StartupPlacement::for_dock(*rect, config.titlebar_offset);
            write!(out, "{}", placement.to_toml_string()?)?;
            Ok(true)
        }
        Command::Config => {
            write!(out, "{}", config.to_toml_string()?)?;
            Ok(true)
        }
        _ => Ok(false),
    }
}

pub fn run_command<W: WindowSystem>(
    ws: &W,
    command: &Command,
    config: &Config,
    out: &mut impl Write,
    stop: &AtomicBool,
) -> Result<()> {
    if run_offline(command, config, out)? {
        return Ok(());
    }
    match command {
        Command::List { json, exclude } => {
            let exclude = exclude.unwrap_or(WindowHandle::NULL);
            let listed = list_windows(ws, exclude, &config.target_class);
            if *json {
                writeln!(out, "{}", serde_json::to_string_pretty(&listed)?)?;
            } else {
                for w in &listed {
                    writeln!(
                        out,
                        "{:>7}  {:>12}  {:<24}  {}{}",
                        w.pid,
                        w.hwnd.to_string(),
                        w.class.as_deref().unwrap_or("?"),
                        w.name,
                        if w.candidate { "  <- candidate" } else { "" }
                    )?;
                }
            }
        }
        Command::Find { exclude } => {
            let exclude = exclude.unwrap_or(WindowHandle::NULL);
            match e_locator::discover(ws, exclude, &config.target_class) {
                Some(hwnd) => match ws.owning_process(hwnd) {
                    Some(pid) => writeln!(out, "{} pid {}", hwnd, pid)?,
                    None => writeln!(out, "{}", hwnd)?,
                },
                None => writeln!(
                    out,
                    "no window of class '{}' found",
                    config.target_class
                )?,
            }
        }
        Command::Embed(args) => {
            let config = with_embed_overrides(config, args);
            let mut orch = Orchestrator::new(ws, watch_host(ws, args, &config)?, &config);
            match orch.refresh() {
                Some(hwnd) => writeln!(
                    out,
                    "embedded {} into {}",
                    hwnd,
                    orch.host().own_window()
                )?,
                None => writeln!(out, "nothing embedded")?,
            }
        }
        Command::Follow {
            embed,
            game_process,
            interval,
        } => {
            let mut config = with_embed_overrides(config, embed);
            if game_process.is_some() {
                config.game_process = game_process.clone();
            }
            if let Some(ms) = interval {
                config.tick_interval_ms = *ms;
            }
            config.validate()?;
            let host = watch_host(ws, embed, &config)?
                .with_game_process(config.game_process.clone())
                .with_rescan_interval(Duration::from_millis(config.rescan_interval_ms));
            let mut orch = Orchestrator::new(ws, host, &config);
            let interval = Duration::from_millis(config.tick_interval_ms);
            run_follow(&mut orch, stop, interval, None);
            writeln!(out, "{} embeds", orch.embed_count())?;
        }
        Command::Placement { .. } | Command::Config => {}
    }
    Ok(())
}

fn with_embed_overrides(config: &Config, args: &EmbedArgs) -> Config {
    let mut config = config.clone();
    if let Some(offset) = args.top_offset {
        config.dock_height_offset = offset;
    }
    config
}

fn watch_host<'a, W: WindowSystem>(
    ws: &'a W,
    args: &EmbedArgs,
    config: &Config,
) -> Result<WatchHost<&'a W>> {
    let parent =
        resolve_parent(ws, args.parent, args.parent_pid).context("choosing a parent window")?;
    let dock = match args.rect {
        Some(rect) => DockSource::Fixed(rect),
        None => DockSource::ParentClient,
    };
    Ok(WatchHost::new(ws, parent, dock, &config.target_class))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::e_mock::MockWindowSystem;
    use crate::e_types::DockRect;

    fn ws() -> MockWindowSystem {
        MockWindowSystem::new()
            .with_process(1, "System", None)
            .with_process(4, "editor.exe", Some((300, "Engine")))
            .with_process(3, "game.exe", Some((200, "Engine")))
            .with_process(2, "notepad.exe", Some((100, "Notepad")))
    }

    fn run(ws: &MockWindowSystem, command: Command) -> String {
        let mut out = Vec::new();
        let stop = AtomicBool::new(true);
        run_command(ws, &command, &Config::default(), &mut out, &stop).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn list_marks_candidates() {
        let listed = list_windows(&ws(), WindowHandle(300), "Engine");
        let candidates: Vec<u32> = listed.iter().filter(|w| w.candidate).map(|w| w.pid).collect();
        assert_eq!(listed.len(), 3);
        assert_eq!(candidates, vec![3]);
    }

    #[test]
    fn list_json() {
        let text = run(
            &ws(),
            Command::List {
                json: true,
                exclude: Some(WindowHandle(300)),
            },
        );
        assert!(text.contains("\"candidate\": true"));
        assert!(text.contains("\"hwnd\": 200"));
    }

    #[test]
    fn find_prints_handle_and_pid() {
        let text = run(
            &ws(),
            Command::Find {
                exclude: Some(WindowHandle(300)),
            },
        );
        assert_eq!(text.trim(), "0xC8 pid 3");
    }

    #[test]
    fn find_reports_absence() {
        let text = run(
            &MockWindowSystem::new(),
            Command::Find { exclude: None },
        );
        assert!(text.contains("no window of class 'Engine'"));
    }

    #[test]
    fn embed_once() {
        let ws = ws();
        let text = run(
            &ws,
            Command::Embed(EmbedArgs {
                rect: Some(DockRect::new(10, 20, 300, 400)),
                parent: Some(WindowHandle(300)),
                parent_pid: None,
                top_offset: Some(0),
            }),
        );
        assert_eq!(text.trim(), "embedded 0xC8 into 0x12C");
        assert_eq!(
            ws.window(WindowHandle(200)).unwrap().rect,
            DockRect::new(10, 20, 300, 400)
        );
    }

    #[test]
    fn embed_needs_a_parent() {
        let mut out = Vec::new();
        let stop = AtomicBool::new(true);
        let result = run_command(
            &ws(),
            &Command::Embed(EmbedArgs {
                rect: None,
                parent: Some(WindowHandle(999)),
                parent_pid: None,
                top_offset: None,
            }),
            &Config::default(),
            &mut out,
            &stop,
        );
        assert!(result.is_err());
    }

    #[test]
    fn placement_is_offline() {
        let mut out = Vec::new();
        let handled = run_offline(
            &Command::Placement {
                rect: DockRect::new(10, 20, 300, 400),
            },
            &Config::default(),
            &mut out,
        )
        .unwrap();
        assert!(handled);
        assert!(String::from_utf8(out).unwrap().contains("height = 375"));
    }
}
