use anyhow::Result;
use facemash_vision::Background;
use std::io::{BufRead, Write};
use thiserror::Error;

use crate::color::parse_color;

#[derive(Debug, Error)]
pub enum PromptError {
    #[error("expected a positive whole number, got `{0}`")]
    InvalidCount(String),

    #[error("expected y or n, got `{0}`")]
    InvalidAnswer(String),

    #[error("input closed before an answer was given")]
    Closed,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// `compose` answers given up front on the command line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComposeRequest {
    pub count: Option<u32>,
    pub use_background: Option<bool>,
    pub color: Option<String>,
}

impl ComposeRequest {
    /// A color implies a background; no flag at all leaves the choice open
    pub fn from_flags(
        count: Option<u32>,
        background: bool,
        no_background: bool,
        color: Option<String>,
    ) -> Self {
        let use_background = if background || color.is_some() {
            Some(true)
        } else if no_background {
            Some(false)
        } else {
            None
        };
        Self {
            count,
            use_background,
            color,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComposeSettings {
    pub count: u32,
    pub background: Background,
}

/// Line-based questions on any reader/writer pair
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn ask(&mut self, question: &str) -> Result<String, PromptError> {
        write!(self.output, "{} ", question)?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(PromptError::Closed);
        }
        Ok(line.trim().to_string())
    }

    pub fn count(&mut self) -> Result<u32, PromptError> {
        let answer = self.ask("How many collages do you want to generate?")?;
        match answer.parse::<u32>() {
            Ok(n) if n > 0 => Ok(n),
            _ => Err(PromptError::InvalidCount(answer)),
        }
    }

    pub fn use_background(&mut self) -> Result<bool, PromptError> {
        let answer = self.ask("Do you want to use a background color? (y/n)")?;
        match answer.to_ascii_lowercase().as_str() {
            "y" | "yes" => Ok(true),
            "n" | "no" => Ok(false),
            _ => Err(PromptError::InvalidAnswer(answer)),
        }
    }

    /// Color as typed, `default` when left empty
    pub fn color(&mut self, default: &str) -> Result<String, PromptError> {
        let answer = self.ask(&format!("Enter a color hex code or name [{}]", default))?;
        if answer.is_empty() {
            Ok(default.to_string())
        } else {
            Ok(answer)
        }
    }

    /// Ask for whatever `request` leaves open
    pub fn complete(
        &mut self,
        request: ComposeRequest,
        default_color: &str,
    ) -> Result<ComposeSettings> {
        let count = match request.count {
            Some(0) => return Err(PromptError::InvalidCount("0".to_string()).into()),
            Some(n) => n,
            None => self.count()?,
        };
        let use_background = match request.use_background {
            Some(b) => b,
            None => self.use_background()?,
        };
        let background = if use_background {
            let name = match request.color {
                Some(c) => c,
                None => self.color(default_color)?,
            };
            Background::Solid(parse_color(&name)?)
        } else {
            Background::Transparent
        };
        Ok(ComposeSettings { count, background })
    }
}
