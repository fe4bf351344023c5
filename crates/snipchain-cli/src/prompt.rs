//! Terminal-backed input and choice providers.
//!
//! Answers given on the command line (`--set`, `--choose`) are used first.
//! Anything else is asked interactively on the controlling terminal, unless
//! `--no-input` is set, in which case the empty string is returned.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use colored::Colorize;
use rustyline::DefaultEditor;
use rustyline::config::{Behavior, Config};
use rustyline::error::ReadlineError;

use snipchain_core::error::{Result, SnipchainError};
use snipchain_core::resolve::engine::choice_prompt;
use snipchain_core::resolve::{ChoiceProvider, InputProvider};

/// Splits `KEY=VALUE`.
pub fn parse_assignment(raw: &str) -> std::result::Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected KEY=VALUE, got '{}'", raw)),
    }
}

pub struct TerminalPrompter {
    /// Prompt label -> queued answers. The last answer is reused.
    answers: Mutex<HashMap<String, VecDeque<String>>>,
    /// Choice prompt -> selected title.
    choices: HashMap<String, String>,
    interactive: bool,
}

impl TerminalPrompter {
    pub fn new(sets: Vec<(String, String)>, chooses: Vec<(String, String)>, interactive: bool) -> Self {
        let mut answers: HashMap<String, VecDeque<String>> = HashMap::new();
        for (label, value) in sets {
            answers.entry(label).or_default().push_back(value);
        }
        let choices = chooses
            .into_iter()
            .map(|(chain, title)| (choice_prompt(&chain), title))
            .collect();

        Self {
            answers: Mutex::new(answers),
            choices,
            interactive,
        }
    }

    fn scripted_answer(&self, prompt: &str) -> Option<String> {
        let mut answers = self.answers.lock().unwrap_or_else(|e| e.into_inner());
        let queue = answers.get_mut(prompt)?;
        if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        }
    }
}

/// Reads one line from the terminal on the blocking pool.
/// Ctrl-C / Ctrl-D cancel with the empty-string sentinel.
async fn read_line(initial: Option<String>) -> Result<String> {
    tokio::task::spawn_blocking(move || {
        let config = Config::builder().behavior(Behavior::PreferTerm).build();
        let mut rl = DefaultEditor::with_config(config)
            .map_err(|e| SnipchainError::provider(format!("Cannot open terminal: {}", e)))?;
        match rl.readline_with_initial("> ", (initial.as_deref().unwrap_or(""), "")) {
            Ok(line) => Ok(line),
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Ok(String::new()),
            Err(e) => Err(SnipchainError::provider(e.to_string())),
        }
    })
    .await
    .map_err(|e| SnipchainError::internal(format!("Prompt task failed: {}", e)))?
}

#[async_trait]
impl InputProvider for TerminalPrompter {
    async fn provide_input(&self, prompt: &str, initial_value: Option<&str>) -> Result<String> {
        if let Some(answer) = self.scripted_answer(prompt) {
            return Ok(answer);
        }
        if !self.interactive {
            return Ok(String::new());
        }

        eprintln!("{}", prompt.bright_cyan());
        read_line(initial_value.map(str::to_string)).await
    }
}

#[async_trait]
impl ChoiceProvider for TerminalPrompter {
    async fn provide_choice(&self, prompt: &str, choices: &[String]) -> Result<String> {
        if let Some(selected) = self.choices.get(prompt) {
            return Ok(selected.clone());
        }
        if !self.interactive {
            return Ok(String::new());
        }

        eprintln!("{}", prompt.bright_cyan());
        for (i, choice) in choices.iter().enumerate() {
            eprintln!("  {} {}", format!("{}.", i + 1).bright_black(), choice);
        }

        loop {
            let line = read_line(None).await?;
            let trimmed = line.trim();
            if trimmed.is_empty() {
                return Ok(String::new());
            }
            if let Ok(n) = trimmed.parse::<usize>() {
                if (1..=choices.len()).contains(&n) {
                    return Ok(choices[n - 1].clone());
                }
            }
            if let Some(choice) = choices.iter().find(|c| c.as_str() == trimmed) {
                return Ok(choice.clone());
            }
            eprintln!("{}", format!("Enter 1-{} or an option title", choices.len()).yellow());
        }
    }
}
