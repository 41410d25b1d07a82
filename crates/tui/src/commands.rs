use std::fmt;
use std::io::Write;

use anyhow::{anyhow, Result};
use tracing::info;

use crate::cli::{AddArgs, CliCommand, DeleteArgs, DoneArgs};
use crate::config::AppConfig;
use crate::core::commands as core_commands;
use crate::core::controller::validate_description;
use crate::model::{DeleteResult, TaskId};
use crate::store::open_store;

pub fn execute<W: Write>(config: &AppConfig, command: CliCommand, mut writer: W) -> Result<()> {
    match command {
        CliCommand::Add(args) => handle_add(config, &args, &mut writer),
        CliCommand::List => handle_list(config, &mut writer),
        CliCommand::Done(args) => handle_done(config, &args, &mut writer),
        CliCommand::Delete(args) => handle_delete(config, &args, &mut writer),
        CliCommand::Tui => Err(anyhow!("launch the terminal UI directly")),
    }
}

fn handle_add<W: Write>(config: &AppConfig, args: &AddArgs, mut writer: W) -> Result<()> {
    let description = args.description();
    validate_description(&description)?;

    let mut store = open_store(config)?;
    let id = store.add_task(&description)?;
    store.close();
    info!(task_id = id, "added task from command line");

    writeln!(writer, "Added task: {description}")?;
    Ok(())
}

fn handle_list<W: Write>(config: &AppConfig, mut writer: W) -> Result<()> {
    let mut store = open_store(config)?;
    let tasks = store.get_tasks()?;
    store.close();

    for task in &tasks {
        writeln!(writer, "{task}")?;
    }
    Ok(())
}

fn handle_done<W: Write>(config: &AppConfig, args: &DoneArgs, mut writer: W) -> Result<()> {
    let mut store = open_store(config)?;
    let outcome = core_commands::mark_done(&mut store, args.id)?;
    store.close();

    match outcome {
        Some(task) => writeln!(writer, "Marked as done: {}", task.description)?,
        None => writeln!(writer, "No task with ID {}", args.id)?,
    }
    Ok(())
}

fn handle_delete<W: Write>(config: &AppConfig, args: &DeleteArgs, mut writer: W) -> Result<()> {
    let results = core_commands::delete_tasks(config, &args.ids)?;
    let summary = DeleteSummary::from_results(&results);
    summary.write_to(&mut writer)?;
    Ok(())
}

struct DeleteSummary {
    deleted: usize,
    missing: Vec<TaskId>,
}

impl DeleteSummary {
    fn from_results(results: &[DeleteResult]) -> Self {
        let deleted = results.iter().filter(|result| result.deleted).count();
        let missing = results
            .iter()
            .filter(|result| !result.deleted)
            .map(|result| result.id)
            .collect();
        Self { deleted, missing }
    }

    fn write_to<W: Write>(&self, mut writer: W) -> Result<()> {
        writeln!(writer, "{}", SummaryLine::deleted(self.deleted))?;
        if !self.missing.is_empty() {
            let ids: Vec<String> = self.missing.iter().map(TaskId::to_string).collect();
            writeln!(writer, "Not found: {}", ids.join(", "))?;
        }
        Ok(())
    }
}

enum SummaryLine {
    Deleted(usize),
    NoneDeleted,
}

impl SummaryLine {
    fn deleted(count: usize) -> Self {
        if count > 0 {
            SummaryLine::Deleted(count)
        } else {
            SummaryLine::NoneDeleted
        }
    }
}

impl fmt::Display for SummaryLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SummaryLine::Deleted(count) => write!(
                f,
                "Deleted {} task{}",
                count,
                if *count == 1 { "" } else { "s" }
            ),
            SummaryLine::NoneDeleted => write!(f, "No tasks deleted"),
        }
    }
}
