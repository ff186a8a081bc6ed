//! Terminal surface — asks questions over stdin/stdout for local use.

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use crate::error::SurfaceError;
use crate::interview::topic::{SnackingFrequency, Topic, TopicAnswers, TransportMode};
use crate::surface::prompts::{QuestionKind, QuestionSpec, QuestionTarget};
use crate::surface::RenderSurface;

/// Interactive terminal surface. Empty input takes the question's default.
pub struct TerminalSurface {
    lines: Lines<BufReader<Stdin>>,
}

impl TerminalSurface {
    pub fn new() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }

    async fn read_line(&mut self) -> Result<String, SurfaceError> {
        match self.lines.next_line().await? {
            Some(line) => Ok(line.trim().to_string()),
            None => Err(SurfaceError::Closed),
        }
    }

    async fn ask_yes_no(&mut self, prompt: &str, default: bool) -> Result<f64, SurfaceError> {
        let hint = if default { "Y/n" } else { "y/N" };
        loop {
            eprint!("{prompt} [{hint}] ");
            let line = self.read_line().await?;
            if line.is_empty() {
                return Ok(if default { 1.0 } else { 0.0 });
            }
            match line.to_lowercase().as_str() {
                "y" | "yes" => return Ok(1.0),
                "n" | "no" => return Ok(0.0),
                _ => eprintln!("Please answer yes or no."),
            }
        }
    }

    async fn ask_number(
        &mut self,
        prompt: &str,
        min: f64,
        max: f64,
        default: f64,
    ) -> Result<f64, SurfaceError> {
        loop {
            eprint!("{prompt} [{min}-{max}, default {default}] ");
            let line = self.read_line().await?;
            if line.is_empty() {
                return Ok(default);
            }
            match line.parse::<f64>() {
                Ok(v) if (min..=max).contains(&v) => return Ok(v),
                Ok(_) => eprintln!("Value must be between {min} and {max}."),
                Err(_) => eprintln!("Please enter a number."),
            }
        }
    }

    async fn ask_scale(
        &mut self,
        prompt: &str,
        min: i64,
        max: i64,
        default: i64,
    ) -> Result<f64, SurfaceError> {
        loop {
            eprint!("{prompt} [{min}-{max}, default {default}] ");
            let line = self.read_line().await?;
            if line.is_empty() {
                return Ok(default as f64);
            }
            match line.parse::<i64>() {
                Ok(v) if (min..=max).contains(&v) => return Ok(v as f64),
                Ok(_) => eprintln!("Value must be between {min} and {max}."),
                Err(_) => eprintln!("Please enter a whole number."),
            }
        }
    }

    /// Present numbered options; empty input picks `default_index` (0-based).
    async fn ask_choice(
        &mut self,
        prompt: &str,
        options: &[String],
        default_index: usize,
    ) -> Result<usize, SurfaceError> {
        loop {
            eprintln!("{prompt}");
            for (i, option) in options.iter().enumerate() {
                let marker = if i == default_index { "*" } else { " " };
                eprintln!("  {}{} {}", i + 1, marker, option);
            }
            eprint!("Choice [1-{}] ", options.len());
            let line = self.read_line().await?;
            if line.is_empty() {
                return Ok(default_index);
            }
            match line.parse::<usize>() {
                Ok(n) if (1..=options.len()).contains(&n) => return Ok(n - 1),
                _ => eprintln!("Please pick a number between 1 and {}.", options.len()),
            }
        }
    }
}

impl Default for TerminalSurface {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RenderSurface for TerminalSurface {
    async fn collect(
        &mut self,
        topic: Topic,
        questions: &[QuestionSpec],
    ) -> Result<TopicAnswers, SurfaceError> {
        eprintln!("\n── {topic} ──");
        let mut answers = TopicAnswers::default();

        for q in questions {
            match (&q.target, &q.kind) {
                (QuestionTarget::Feature(name), QuestionKind::YesNo { default }) => {
                    let v = self.ask_yes_no(&q.prompt, *default).await?;
                    answers.values.insert(name.clone(), v);
                }
                (QuestionTarget::Feature(name), QuestionKind::Number { min, max, default, .. }) => {
                    let v = self.ask_number(&q.prompt, *min, *max, *default).await?;
                    answers.values.insert(name.clone(), v);
                }
                (QuestionTarget::Feature(name), QuestionKind::Scale { min, max, default }) => {
                    let v = self.ask_scale(&q.prompt, *min, *max, *default).await?;
                    answers.values.insert(name.clone(), v);
                }
                (QuestionTarget::Group(_), QuestionKind::Snacking { default }) => {
                    let options: Vec<String> =
                        SnackingFrequency::ALL.iter().map(|c| c.to_string()).collect();
                    let default_index = SnackingFrequency::ALL
                        .iter()
                        .position(|c| c == default)
                        .unwrap_or(0);
                    let picked = self.ask_choice(&q.prompt, &options, default_index).await?;
                    answers.snacking = Some(SnackingFrequency::ALL[picked]);
                }
                (QuestionTarget::Group(_), QuestionKind::Transport { default }) => {
                    let options: Vec<String> =
                        TransportMode::ALL.iter().map(|c| c.to_string()).collect();
                    let default_index = TransportMode::ALL
                        .iter()
                        .position(|c| c == default)
                        .unwrap_or(0);
                    let picked = self.ask_choice(&q.prompt, &options, default_index).await?;
                    answers.transport = Some(TransportMode::ALL[picked]);
                }
                (target, kind) => {
                    tracing::warn!(?target, ?kind, "mismatched question target and kind");
                }
            }
        }
        Ok(answers)
    }
}
