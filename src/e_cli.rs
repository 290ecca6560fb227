use crate::e_types::{DockRect, WindowHandle};
use clap::{ArgGroup, Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Fake-embed a game window inside an editor window.", long_about = None)]
pub struct Cli {
    #[arg(long, short = 'c', global = true, help = "Config file (default: ./fake-emb.toml).")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, help = "Log debug output (same as verbose = true).")]
    pub verbose: bool,

    #[arg(
        long = "class",
        global = true,
        help = "Window class of the game window (default: Engine)."
    )]
    pub target_class: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List processes that own a window, marking game candidates.
    List {
        #[arg(long, help = "Print JSON instead of a table.")]
        json: bool,
        #[arg(long, help = "Handle to leave out (the host window).")]
        exclude: Option<WindowHandle>,
    },
    /// Locate the game window once and print it.
    Find {
        #[arg(long, help = "Handle to leave out (the host window).")]
        exclude: Option<WindowHandle>,
    },
    /// Reparent the game window into the host once.
    Embed(EmbedArgs),
    /// Keep the game window docked until Ctrl+C.
    Follow {
        #[command(flatten)]
        embed: EmbedArgs,
        #[arg(long, help = "Process name that means a game is running.")]
        game_process: Option<String>,
        #[arg(long, help = "Milliseconds between ticks.")]
        interval: Option<u64>,
    },
    /// Print the startup placement hint for a dock rect.
    Placement {
        #[arg(long, help = "Dock rect as x,y,w,h.")]
        rect: DockRect,
    },
    /// Print the effective configuration.
    Config,
}

#[derive(Args, Debug, Clone)]
#[command(group(ArgGroup::new("parent_window").required(true)))]
pub struct EmbedArgs {
    #[arg(long, help = "Dock rect as x,y,w,h in the parent's client area (default: whole client area).")]
    pub rect: Option<DockRect>,

    #[arg(long, group = "parent_window", help = "Parent window handle (decimal or 0x hex).")]
    pub parent: Option<WindowHandle>,

    #[arg(long, group = "parent_window", help = "Use this process's main window as parent.")]
    pub parent_pid: Option<u32>,

    #[arg(long, help = "Space above the game inside the dock (default: 50).")]
    pub top_offset: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_embed() {
        let cli = Cli::try_parse_from([
            "fake-emb", "embed", "--rect", "10,20,300,400", "--parent", "0x12C",
        ])
        .unwrap();
        match cli.command {
            Command::Embed(args) => {
                assert_eq!(args.rect, Some(DockRect::new(10, 20, 300, 400)));
                assert_eq!(args.parent, Some(WindowHandle(300)));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn parent_and_pid_conflict() {
        let parsed = Cli::try_parse_from([
            "fake-emb", "embed", "--parent", "1", "--parent-pid", "2",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn window_commands_need_a_parent() {
        for sub in ["embed", "follow"] {
            let parsed = Cli::try_parse_from(["fake-emb", sub, "--rect", "0,0,10,10"]);
            assert!(parsed.is_err(), "{sub} parsed without a parent");
        }
        let cli = Cli::try_parse_from(["fake-emb", "follow", "--parent-pid", "42"]).unwrap();
        match cli.command {
            Command::Follow { embed, .. } => assert_eq!(embed.parent_pid, Some(42)),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["fake-emb", "find", "--verbose", "--class", "Game"]).unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.target_class.as_deref(), Some("Game"));
    }
}
