use anyhow::Result;
use clap::Parser;
use tracing::info;

fn main() -> Result<()> {
    let cli = tasklet::cli::Cli::parse();
    let config = tasklet::config::from_cli(&cli)?;
    tasklet::logging::init_tracing(&config.log_path(), cli.log_filter.as_deref())?;
    info!(
        data_dir = %config.data_dir().display(),
        store = %config.backend(),
        "starting tasklet"
    );

    match cli.command.clone() {
        Some(tasklet::cli::CliCommand::Tui) | None => {
            let options = tasklet::tui::TuiOptions {
                clipboard: !cli.no_clipboard,
            };
            tasklet::tui::run(config, options)?;
        }
        Some(command) => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            tasklet::commands::execute(&config, command, &mut handle)?;
        }
    }

    Ok(())
}
