//! Subcommand handlers and settings resolution.

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use super::args::{Args, ConfigAction};
use crate::ascii::Ramp;
use crate::config::Config;
use crate::convert::{
    announce_images, convert_all, discover_images, BatchReport, ConvertError, ConvertSettings,
};
use crate::prompt::{check_width, PromptError, Prompter};

/// Errors that stop a conversion run before or during the batch.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error(transparent)]
    Convert(#[from] ConvertError),
    #[error(transparent)]
    Prompt(#[from] PromptError),
}

/// Handle config subcommand actions.
pub fn handle_config_action(action: ConfigAction, config: &Config, config_path: &Path) {
    match action {
        ConfigAction::Show => {
            let render = &config.render;
            println!("Current configuration:");
            println!("  Input directory: {}", config.input.directory.display());
            println!("  Output directory: {}", config.output.directory.display());
            match render.width {
                Some(w) => println!("  Width: {}", w),
                None => println!("  Width: (prompt)"),
            }
            match render.invert {
                Some(invert) => println!("  Ramp: {}", Ramp::from_invert(invert).name()),
                None => println!("  Ramp: (prompt)"),
            }
            println!("  Grayscale: {}", render.grayscale.name());
            println!();

            if config_path.exists() {
                println!("Config file: {} (exists)", config_path.display());
            } else {
                println!("Config file: {} (not found)", config_path.display());
            }
        }
    }
}

/// Input directory from CLI, falling back to config.
pub fn resolve_input_dir(args: &Args, config: &Config) -> PathBuf {
    args.input
        .clone()
        .unwrap_or_else(|| config.input.directory.clone())
}

/// Merge CLI flags over config values, prompting for whatever is still missing.
pub fn resolve_settings<R: BufRead, W: Write>(
    args: &Args,
    config: &Config,
    prompter: &mut Prompter<R, W>,
) -> Result<ConvertSettings, PromptError> {
    let config_width = config.render.width.and_then(|w| match check_width(w) {
        Ok(w) => Some(w),
        Err(_) => {
            log::warn!("Ignoring out-of-range width {} from config", w);
            None
        }
    });

    let width = match args.width.or(config_width) {
        Some(w) => w,
        None => prompter.ask_width()?,
    };
    let ramp = match args.invert_choice().or(config.render.invert) {
        Some(invert) => Ramp::from_invert(invert),
        None => prompter.ask_ramp()?,
    };
    let policy = args.grayscale.unwrap_or(config.render.grayscale);
    let output_dir = args
        .output
        .clone()
        .unwrap_or_else(|| config.output.directory.clone());

    Ok(ConvertSettings {
        width,
        ramp,
        policy,
        output_dir,
    })
}

/// Run a full conversion: discover, list, prompt, then convert.
///
/// The input directory is scanned before any prompt so an unsupported file
/// aborts the run without asking for settings. `arm_cancel` is called once
/// settings are resolved and returns the flag the batch polls.
pub fn run_conversion<R, W, S, F>(
    args: &Args,
    config: &Config,
    prompter: &mut Prompter<R, W>,
    status: &mut S,
    arm_cancel: F,
) -> Result<BatchReport, RunError>
where
    R: BufRead,
    W: Write,
    S: Write,
    F: FnOnce() -> Arc<AtomicBool>,
{
    let input_dir = resolve_input_dir(args, config);
    let images = discover_images(&input_dir)?;
    announce_images(&images, status).map_err(ConvertError::from)?;
    status.flush().map_err(ConvertError::from)?;

    let settings = resolve_settings(args, config, prompter)?;
    log::info!(
        "Converting {} at width {} with the {} ramp",
        input_dir.display(),
        settings.width,
        settings.ramp.name()
    );

    let cancel = arm_cancel();
    Ok(convert_all(&images, &settings, &cancel, status)?)
}
