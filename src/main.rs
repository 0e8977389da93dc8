mod api;
mod classify;
mod cli;
mod config;
mod error;
mod logging;
mod model;
mod notice;
mod page;
mod render;
mod restock;

use cli::Cli;
use config::{Config, CONFIG};
use directories::ProjectDirs;
use log::{debug, error};

fn main() {
    let project_dirs = match ProjectDirs::from("", "", "medpulse") {
        Some(dirs) => dirs,
        None => {
            eprintln!("Could not determine project directories");
            std::process::exit(1);
        }
    };

    let config = Config::load_config(&project_dirs);

    // Keep the handle alive so buffered log lines are flushed on exit
    let _logger = match logging::setup_logging(&project_dirs, &config.logging) {
        Ok(handle) => Some(handle),
        Err(e) => {
            eprintln!("Failed to start logging: {}", e);
            None
        }
    };

    // set() only fails if already initialized, which can't happen before this point
    let _ = CONFIG.set(config);

    debug!("Command-line args: {:?}", std::env::args_os().collect::<Vec<_>>());

    if let Err(err) = Cli::handle_command_line() {
        error!("{:?}", err);
        eprintln!("{}", err);
        std::process::exit(1);
    }
}
