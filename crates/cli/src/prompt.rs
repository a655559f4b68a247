//! Interactive question chain.
//!
//! Each [`Question`] fills one field of a shared [`ChainMessage`]. Fields
//! already set (from command-line flags) are not asked again. The first
//! invalid answer stops the chain.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use tapedeck_core::{SiteUrl, UrlError, UrlKind};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PromptError {
    #[error("Failed to read answer: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid choice: {0:?}")]
    InvalidChoice(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] UrlError),

    #[error("Expected a {expected} URL, got a {actual} URL")]
    KindMismatch { expected: UrlKind, actual: UrlKind },

    #[error("Not a track, album or discography page: {0}")]
    UnsupportedPage(String),

    #[error("No answer given")]
    NoAnswer,
}

/// Answers gathered so far.
#[derive(Debug, Default)]
pub struct ChainMessage {
    pub kind: Option<UrlKind>,
    /// URL as typed or passed on the command line, before validation.
    pub raw_url: Option<String>,
    pub url: Option<SiteUrl>,
    pub output: Option<PathBuf>,
}

/// Source of answers.
pub trait Prompter {
    /// Show `question` and return the trimmed answer.
    fn prompt(&mut self, question: &str) -> Result<String, PromptError>;
}

/// Asks on stdout, reads from stdin.
pub struct StdioPrompter;

impl Prompter for StdioPrompter {
    fn prompt(&mut self, question: &str) -> Result<String, PromptError> {
        let mut stdout = io::stdout().lock();
        write!(stdout, "{}", question)?;
        stdout.flush()?;

        let mut answer = String::new();
        if io::stdin().lock().read_line(&mut answer)? == 0 {
            return Err(PromptError::NoAnswer);
        }
        Ok(answer.trim().to_string())
    }
}

/// One link of the chain.
pub trait Question {
    fn ask(&self, prompter: &mut dyn Prompter, message: &mut ChainMessage)
        -> Result<(), PromptError>;
}

/// What to download. Not asked when a URL was given up front, since the
/// URL already says what it points at.
pub struct KindQuestion;

impl Question for KindQuestion {
    fn ask(
        &self,
        prompter: &mut dyn Prompter,
        message: &mut ChainMessage,
    ) -> Result<(), PromptError> {
        if message.kind.is_some() || message.raw_url.is_some() {
            return Ok(());
        }

        let answer = prompter
            .prompt("What do you want to download?\n\t1. Track\n\t2. Album\n\t3. Discography\n")?;
        let kind = match answer.as_str() {
            "1" => UrlKind::Track,
            "2" => UrlKind::Album,
            "3" => UrlKind::Discography,
            _ => return Err(PromptError::InvalidChoice(answer)),
        };
        message.kind = Some(kind);
        Ok(())
    }
}

/// The page to crawl, checked against the chosen kind.
pub struct UrlQuestion {
    domain: String,
}

impl UrlQuestion {
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
        }
    }

    fn example(&self, kind: Option<UrlKind>) -> Option<String> {
        let path = match kind? {
            UrlKind::Track => "track/{track-name}",
            UrlKind::Album => "album/{album-name}",
            UrlKind::Discography => "music",
            UrlKind::Unknown => return None,
        };
        Some(format!("https://{{band-name}}.{}/{}", self.domain, path))
    }

    /// Parse, check the domain and make sure the URL is of the expected kind.
    pub fn check(&self, raw: &str, expected: Option<UrlKind>) -> Result<SiteUrl, PromptError> {
        let url = SiteUrl::parse_validated(raw, &self.domain)?;
        let actual = url.classify();
        match expected {
            Some(expected) if expected != actual => {
                Err(PromptError::KindMismatch { expected, actual })
            }
            None if actual == UrlKind::Unknown => {
                Err(PromptError::UnsupportedPage(url.to_string()))
            }
            _ => Ok(url),
        }
    }
}

impl Question for UrlQuestion {
    fn ask(
        &self,
        prompter: &mut dyn Prompter,
        message: &mut ChainMessage,
    ) -> Result<(), PromptError> {
        let raw = match message.raw_url.take() {
            Some(raw) => raw,
            None => {
                let question = match self.example(message.kind) {
                    Some(example) => format!("Enter the URL:\n\tExample: {}\n", example),
                    None => "Enter the URL:\n".to_string(),
                };
                prompter.prompt(&question)?
            }
        };

        let url = self.check(&raw, message.kind)?;
        message.kind.get_or_insert(url.classify());
        message.url = Some(url);
        Ok(())
    }
}

/// Where the files go.
pub struct StorageQuestion;

impl Question for StorageQuestion {
    fn ask(
        &self,
        prompter: &mut dyn Prompter,
        message: &mut ChainMessage,
    ) -> Result<(), PromptError> {
        if message.output.is_some() {
            return Ok(());
        }

        let answer = prompter.prompt(
            "Where do you want to save the files?\n\t1. Current directory\n\t2. Custom directory\n",
        )?;
        let output = match answer.as_str() {
            "1" => PathBuf::from("."),
            "2" => {
                let dir = prompter.prompt("Enter the custom directory: ")?;
                if dir.is_empty() {
                    return Err(PromptError::NoAnswer);
                }
                PathBuf::from(dir)
            }
            _ => return Err(PromptError::InvalidChoice(answer)),
        };
        message.output = Some(output);
        Ok(())
    }
}

/// Ordered questions sharing one message.
pub struct Chain {
    questions: Vec<Box<dyn Question>>,
}

impl Chain {
    pub fn new(questions: Vec<Box<dyn Question>>) -> Self {
        Self { questions }
    }

    /// Kind, then URL, then storage.
    pub fn standard(domain: &str) -> Self {
        let questions: Vec<Box<dyn Question>> = vec![
            Box::new(KindQuestion),
            Box::new(UrlQuestion::new(domain)),
            Box::new(StorageQuestion),
        ];
        Self::new(questions)
    }

    pub fn run(
        &self,
        prompter: &mut dyn Prompter,
        mut message: ChainMessage,
    ) -> Result<ChainMessage, PromptError> {
        for question in &self.questions {
            question.ask(prompter, &mut message)?;
        }
        Ok(message)
    }
}
