//! Interactive prompts for settings not given on the command line or in config.

use std::io::{BufRead, Write};

use crate::ascii::Ramp;

/// Smallest accepted output width.
pub const MIN_WIDTH: u32 = 50;
/// Largest accepted output width.
pub const MAX_WIDTH: u32 = 340;
/// Width used when the width prompt is answered with an empty line.
pub const DEFAULT_WIDTH: u32 = 50;

/// Errors raised while prompting.
#[derive(Debug, thiserror::Error)]
pub enum PromptError {
    #[error("Input closed before a value was entered")]
    Closed,
    #[error("Prompt I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Check that `width` is within [`MIN_WIDTH`, `MAX_WIDTH`].
pub fn check_width(width: u32) -> Result<u32, String> {
    if (MIN_WIDTH..=MAX_WIDTH).contains(&width) {
        Ok(width)
    } else {
        Err(invalid_width_message())
    }
}

fn invalid_width_message() -> String {
    format!(
        "Invalid input. Type a value between {} and {} next time.",
        MIN_WIDTH, MAX_WIDTH
    )
}

/// Line-based prompter over any reader/writer pair.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Consume the prompter and return its writer.
    pub fn into_output(self) -> W {
        self.output
    }

    fn read_answer(&mut self, question: &str) -> Result<String, PromptError> {
        writeln!(self.output, "{}", question)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(PromptError::Closed);
        }
        Ok(line.trim().to_string())
    }

    /// Ask for the output width until a value in range is entered.
    pub fn ask_width(&mut self) -> Result<u32, PromptError> {
        loop {
            let answer = self.read_answer(&format!(
                "Enter in the width for your image (default: {}; max {}):",
                DEFAULT_WIDTH, MAX_WIDTH
            ))?;
            if answer.is_empty() {
                return Ok(DEFAULT_WIDTH);
            }
            match answer.parse::<u32>().map_err(|_| invalid_width_message()) {
                Ok(width) => match check_width(width) {
                    Ok(width) => return Ok(width),
                    Err(msg) => writeln!(self.output, "{}", msg)?,
                },
                Err(msg) => writeln!(self.output, "{}", msg)?,
            }
        }
    }

    /// Ask whether to invert until `y` or `n` is entered.
    pub fn ask_ramp(&mut self) -> Result<Ramp, PromptError> {
        loop {
            let answer = self.read_answer("Do you want your image(s) to be inverted? Y/N")?;
            match answer.to_lowercase().as_str() {
                "y" => return Ok(Ramp::Inverted),
                "n" => return Ok(Ramp::Normal),
                _ => continue,
            }
        }
    }
}
