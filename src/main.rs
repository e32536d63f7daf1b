use clap::Parser;
use std::io;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use image_to_ascii::cli::{handle_config_action, run_conversion, Args, Command};
use image_to_ascii::config::{self, Config};
use image_to_ascii::convert::setup_ctrlc_handler;
use image_to_ascii::prompt::Prompter;

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let config_path = args.config.clone().unwrap_or_else(config::default_path);
    let config = Config::load(Some(&config_path))?;

    if let Some(Command::Config { action }) = args.command {
        handle_config_action(action, &config, &config_path);
        return Ok(());
    }

    let stdin = io::stdin();
    let mut prompter = Prompter::new(stdin.lock(), io::stdout());
    let report = run_conversion(&args, &config, &mut prompter, &mut io::stdout(), || {
        let cancel = Arc::new(AtomicBool::new(false));
        if let Err(e) = setup_ctrlc_handler(Arc::clone(&cancel)) {
            log::warn!("Could not install Ctrl+C handler: {}", e);
        }
        cancel
    })?;
    if report.cancelled {
        eprintln!("Conversion cancelled.");
    }
    if !report.failed.is_empty() {
        return Err(format!("{} image(s) failed to convert", report.failed.len()).into());
    }
    Ok(())
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
