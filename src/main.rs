use anyhow::Context;
use clap::Parser;
use duofetch::cli::{Cli, Command};
use duofetch::error::exit_code;
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::from(exit_code::SUCCESS as u8),
        Err(e) => {
            eprintln!("Error: {e:#}");
            if let Some(duofetch_err) = e.downcast_ref::<duofetch::Error>() {
                ExitCode::from(duofetch_err.exit_code() as u8)
            } else {
                ExitCode::from(exit_code::GENERAL_ERROR as u8)
            }
        }
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let filter = cli.filter();

    match cli.command {
        Some(Command::Fetch { via, json }) => {
            env_logger::init();
            log::info!("one-shot fetch via {via:?}");
            duofetch::commands::fetch::run(&cli.api_url, filter, via.into(), json)?;
        }
        Some(Command::Countries) => {
            duofetch::commands::countries::run();
        }
        Some(Command::Completions { shell }) => {
            use clap::CommandFactory;
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "duofetch", &mut std::io::stdout());
        }
        None => {
            // Interactive mode. Logging stays uninitialized here; stderr
            // writes would tear the alternate screen.
            duofetch::tui::run(&cli.api_url, filter).context("interactive session failed")?;
        }
    }

    Ok(())
}
