use clap::Parser;
use file_lister_cli::config::get_config;
use file_lister_cli::error::{CliError, CliResult, ExitCode};
use file_lister_cli::output;
use file_lister_core::FileLister;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "file-lister")]
#[command(version, about = "List all files in a folder", long_about = None)]
struct Cli {
    /// Folder to scan for files
    folder: PathBuf,
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    match run(&cli) {
        Ok(()) => ExitCode::Success.into(),
        Err(error) => {
            eprint!(
                "{}",
                error.format_for_user(log::log_enabled!(log::Level::Debug))
            );
            error.exit_code().into()
        }
    }
}

fn run(cli: &Cli) -> CliResult<()> {
    let config = get_config()?;

    if !config.output.color_enabled {
        colored::control::set_override(false);
    }

    log::debug!("Starting listing for folder: {:?}", cli.folder);

    let mut lister = FileLister::new(&cli.folder, &config.listing)?;
    let count = output::print_paths(lister.by_ref())
        .map_err(|e| CliError::from_io_error(e, "<stdout>"))?;

    log::debug!("Listed {count} file(s), {} skipped", lister.skipped());
    Ok(())
}
