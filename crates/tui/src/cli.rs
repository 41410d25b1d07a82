use std::path::PathBuf;

use clap::{value_parser, Args, Parser, Subcommand};

use crate::config::StoreBackend;
use crate::model::TaskId;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "tasklet",
    version,
    about = "A small keyboard-driven task tracker for the terminal.",
    after_help = "Examples:\n  tasklet                 Launch the TUI (same as `tasklet tui`)\n  tasklet add Buy milk\n  tasklet --store json list\n  tasklet done 3\n  tasklet delete 4 5"
)]
pub struct Cli {
    /// Override the data directory (defaults to $TASKLET_DATA_DIR, then the working directory)
    #[arg(long, value_name = "PATH", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Storage backend (defaults to $TASKLET_STORE, then sqlite)
    #[arg(long, value_enum, global = true)]
    pub store: Option<StoreBackend>,

    /// Tracing filter written to tasklet.log (e.g. "info", "tasklet_core=debug")
    #[arg(long = "log", value_name = "DIRECTIVE", global = true)]
    pub log_filter: Option<String>,

    /// Disable copying task text to the terminal clipboard
    #[arg(long, global = true)]
    pub no_clipboard: bool,

    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum CliCommand {
    /// Launch the terminal UI (default command)
    Tui,
    /// Add a task
    Add(AddArgs),
    /// Print every task
    List,
    /// Mark a task as completed
    Done(DoneArgs),
    /// Delete one or more tasks by id
    Delete(DeleteArgs),
}

#[derive(Args, Debug, Clone)]
pub struct AddArgs {
    /// Task description; words are joined with single spaces
    #[arg(value_name = "TEXT", required = true)]
    pub text: Vec<String>,
}

impl AddArgs {
    pub fn description(&self) -> String {
        self.text.join(" ")
    }
}

#[derive(Args, Debug, Clone)]
pub struct DoneArgs {
    #[arg(value_name = "ID", value_parser = value_parser!(TaskId))]
    pub id: TaskId,
}

#[derive(Args, Debug, Clone)]
pub struct DeleteArgs {
    /// One or more task ids to delete
    #[arg(value_name = "ID", required = true, value_parser = value_parser!(TaskId))]
    pub ids: Vec<TaskId>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_to_no_command() {
        let cli = Cli::try_parse_from(["tasklet"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.store.is_none());
        assert!(!cli.no_clipboard);
    }

    #[test]
    fn add_joins_words() {
        let cli = Cli::try_parse_from(["tasklet", "add", "Buy", "oat", "milk"]).unwrap();
        let Some(CliCommand::Add(args)) = cli.command else {
            panic!("expected add");
        };
        assert_eq!(args.description(), "Buy oat milk");
    }

    #[test]
    fn global_flags_follow_subcommands() {
        let cli =
            Cli::try_parse_from(["tasklet", "list", "--store", "json", "--data-dir", "/tmp/x"])
                .unwrap();
        assert_eq!(cli.store, Some(StoreBackend::Json));
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/x")));
    }

    #[test]
    fn delete_rejects_non_numeric_ids() {
        assert!(Cli::try_parse_from(["tasklet", "delete", "abc"]).is_err());
    }
}
