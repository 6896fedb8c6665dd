//! Unity Browser console entry point.
//!
//! Drives the shell session from stdin. Type `help` for the command list;
//! anything that is not a command is submitted to the address bar.
//!
//! The config file path is taken from the first argument, then the
//! `UNITY_CONFIG` environment variable, then `unity.toml`.

mod commands;
mod console;

use std::io::{self, BufRead};
use std::path::PathBuf;

use anyhow::Result;

use commands::{Command, HELP};
use console::{ConsoleDownload, ConsoleSurface, ConsoleUi};
use unity_shell::ShellController;
use unity_store::{FileStore, SessionStore};
use unity_types::config::{CONFIG_FILE_NAME, ShellConfig};

type Controller<I, S> = ShellController<ConsoleSurface, ConsoleUi<I>, S>;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config_path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("UNITY_CONFIG").ok())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME));
    let config = ShellConfig::load_or_default(&config_path)?;
    log::info!(
        "Starting {} (data in {})",
        config.window_title,
        config.data_dir.display()
    );

    let store = FileStore::from_config(&config);
    let ui = ConsoleUi::new(io::stdin().lock());
    let mut controller = ShellController::new(&config, ConsoleSurface::new(), ui, store);

    run(&mut controller);
    log::info!("Goodbye");
    Ok(())
}

/// Start the session and process input until `quit` or end of input.
fn run<I: BufRead, S: SessionStore>(controller: &mut Controller<I, S>) {
    controller.start();
    controller.pump();

    while let Some(line) = controller.ui_mut().read_line() {
        let command = match commands::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                eprintln!("error: {e:#}");
                continue;
            },
        };
        if command == Command::Quit {
            break;
        }
        execute(controller, command);
        controller.pump();
    }
}

fn execute<I: BufRead, S: SessionStore>(controller: &mut Controller<I, S>, command: Command) {
    match command {
        Command::Submit(raw) => controller.submit_address(&raw),
        Command::Toolbar(action) => controller.trigger(action),
        Command::List(menu) => controller.ui().print_menu(menu),
        Command::Open(menu, id) => {
            if !controller.activate_entry(menu, id) {
                eprintln!("error: no such entry");
            }
        },
        Command::Download(file) => {
            let mut download = ConsoleDownload::new(&file);
            controller.download_requested(&mut download);
            match download.path().filter(|_| download.is_accepted()) {
                Some(path) => println!("Saving {file} to {}", path.display()),
                None => println!("Download of {file} cancelled"),
            }
        },
        Command::Help => println!("{HELP}"),
        Command::Quit => {},
    }
}
