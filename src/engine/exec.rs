//! engine::exec
//!
//! The script executor.
//!
//! # Architecture
//!
//! The executor owns one in-memory [`Repository`] for the lifetime of a run
//! and is the only component that mutates it. Each script line is parsed,
//! applied, and rendered before the next line is read.
//!
//! # Executor Contract
//!
//! 1. Parse the line; blank and comment lines are skipped
//! 2. Apply the instruction to the repository
//! 3. Render the result (text or JSON) to the output sink
//! 4. On error: stop, or report and continue when `keep_going` is set
//! 5. After the last line: verify repository invariants
//!
//! # Example
//!
//! ```
//! use twig::core::config::Config;
//! use twig::engine::exec::Executor;
//! use twig::engine::Context;
//!
//! let script = "author Jane jane@example.com\ncommit first\nlog\n";
//! let mut executor = Executor::new(&Context::default(), &Config::default(), Vec::new());
//! let summary = executor.run_script(script.as_bytes(), false).unwrap();
//!
//! assert_eq!(summary.executed, 3);
//! assert_eq!(executor.repository().log(None).unwrap().len(), 1);
//! ```

use std::io::{BufRead, Write};

use serde::Serialize;
use thiserror::Error;

use super::script::{parse_line, Instruction, ParseError};
use super::Context;
use crate::core::author::Author;
use crate::core::config::Config;
use crate::core::error::RepoError;
use crate::core::repository::Repository;
use crate::core::types::CommitId;
use crate::core::verify;
use crate::ui::output::{self, Verbosity};

/// Errors from execution.
#[derive(Debug, Error)]
pub enum ExecError {
    /// A script line could not be parsed.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// The repository rejected an instruction.
    #[error("line {line}: {error}")]
    Repo {
        /// 1-based line number
        line: usize,
        error: RepoError,
    },

    /// Reading the script or writing output failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Output could not be serialized.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Errors from applying a single instruction.
///
/// [`Executor::run_script`] attaches the line number when it turns these
/// into [`ExecError`].
#[derive(Debug, Error)]
pub enum StepError {
    /// The repository rejected the instruction.
    #[error(transparent)]
    Repo(#[from] RepoError),

    /// Writing output failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Output could not be serialized.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl StepError {
    fn at_line(self, line: usize) -> ExecError {
        match self {
            StepError::Repo(error) => ExecError::Repo { line, error },
            StepError::Io(err) => ExecError::Io(err),
            StepError::Json(err) => ExecError::Json(err),
        }
    }
}

/// Outcome of a script run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Instructions applied successfully
    pub executed: usize,
    /// Instructions that failed (only non-zero with `keep_going`)
    pub failed: usize,
}

/// How query results are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Full,
    Oneline,
    Json,
}

#[derive(Serialize)]
struct HeadView<'a> {
    branch: &'a str,
    head: Option<&'a CommitId>,
}

/// Applies instructions to an in-memory repository.
#[derive(Debug)]
pub struct Executor<W: Write> {
    repo: Repository,
    author: Option<Author>,
    format: Format,
    verbosity: Verbosity,
    out: W,
}

impl<W: Write> Executor<W> {
    /// Create an executor with a fresh repository.
    ///
    /// The configured `[user]` becomes the initial session author. JSON
    /// output is enabled by `--json` or `log.json`.
    pub fn new(ctx: &Context, config: &Config, out: W) -> Self {
        let format = if ctx.json || config.log_json() {
            Format::Json
        } else if config.log_oneline() {
            Format::Oneline
        } else {
            Format::Full
        };
        Self {
            repo: Repository::new(),
            author: config.author(),
            format,
            verbosity: Verbosity::from_flags(ctx.quiet, ctx.debug),
            out,
        }
    }

    /// The repository being driven.
    pub fn repository(&self) -> &Repository {
        &self.repo
    }

    /// The current session author.
    pub fn author(&self) -> Option<&Author> {
        self.author.as_ref()
    }

    /// Consume the executor and return the output sink.
    pub fn into_output(self) -> W {
        self.out
    }

    /// Run every line of a script.
    ///
    /// Stops at the first failing line unless `keep_going` is set, in which
    /// case failures are reported and counted.
    pub fn run_script(
        &mut self,
        mut reader: impl BufRead,
        keep_going: bool,
    ) -> Result<RunSummary, ExecError> {
        let mut summary = RunSummary::default();
        let mut buf = Vec::new();
        let mut line = 0;

        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            line += 1;
            match self.decode_and_run(line, &buf) {
                Ok(true) => summary.executed += 1,
                Ok(false) => {}
                Err(err @ (ExecError::Parse(_) | ExecError::Repo { .. })) if keep_going => {
                    output::error(&err);
                    summary.failed += 1;
                }
                Err(err) => return Err(err),
            }
        }

        self.verify();
        output::debug(
            format!(
                "Run finished: {} executed, {} failed",
                summary.executed, summary.failed
            ),
            self.verbosity,
        );
        Ok(summary)
    }

    fn decode_and_run(&mut self, line: usize, raw: &[u8]) -> Result<bool, ExecError> {
        let text = std::str::from_utf8(raw).map_err(|_| ParseError {
            line,
            message: "invalid UTF-8".to_string(),
        })?;
        let text = text.strip_suffix('\n').unwrap_or(text);
        let text = text.strip_suffix('\r').unwrap_or(text);
        self.run_line(line, text)
    }

    /// Parse and apply a single line. Returns `false` for skipped lines.
    fn run_line(&mut self, line: usize, text: &str) -> Result<bool, ExecError> {
        let Some(instruction) = parse_line(line, text)? else {
            return Ok(false);
        };
        output::debug(
            format!("Line {}: {}", line, instruction.description()),
            self.verbosity,
        );
        match self.execute(&instruction) {
            Ok(()) => {
                if instruction.is_mutating() {
                    output::debug(
                        format!(
                            "Head of {} is now {}",
                            self.repo.current_branch(),
                            output::format_head(self.repo.head())
                        ),
                        self.verbosity,
                    );
                }
                Ok(true)
            }
            Err(err) => Err(err.at_line(line)),
        }
    }

    /// Apply one instruction and render its result.
    pub fn execute(&mut self, instruction: &Instruction) -> Result<(), StepError> {
        match instruction {
            Instruction::Author { name, email } => {
                self.author = Some(Author::new(name.as_str(), email.as_str())?);
            }
            Instruction::Commit { message } => {
                let author = self.author.as_ref().ok_or_else(|| {
                    RepoError::InvalidArgument(
                        "author is required; add an 'author' line or set user.name and user.email"
                            .to_string(),
                    )
                })?;
                let commit = self.repo.commit(message, author)?;
                match self.format {
                    Format::Json => self.emit_json(&commit)?,
                    _ => self.emit_status(format!(
                        "[{} {}] {}",
                        self.repo.current_branch(),
                        commit.id().short(output::SHORT_ID_LEN),
                        commit.summary()
                    ))?,
                }
            }
            Instruction::Branch { name } => {
                self.repo.create_branch(name)?;
                self.emit_status(format!("Created branch {}", name))?;
            }
            Instruction::Switch { name } => {
                self.repo.switch(name)?;
                self.emit_status(format!("Switched to branch {}", name))?;
            }
            Instruction::Head { branch } => {
                let name = branch
                    .as_deref()
                    .unwrap_or(self.repo.current_branch().as_str());
                let head = self.repo.branch(name)?;
                if self.format == Format::Json {
                    let view = HeadView { branch: name, head };
                    let json = serde_json::to_string(&view)?;
                    writeln!(self.out, "{}", json)?;
                } else {
                    writeln!(self.out, "{}", output::format_head(head))?;
                }
            }
            Instruction::Branches => self.render_branches()?,
            Instruction::Log { branch } => self.render_log(branch.as_deref())?,
            Instruction::Status => {
                let branch = self.repo.current_branch();
                let head = self.repo.head();
                if self.format == Format::Json {
                    let view = HeadView {
                        branch: branch.as_str(),
                        head,
                    };
                    let json = serde_json::to_string(&view)?;
                    writeln!(self.out, "{}", json)?;
                } else {
                    writeln!(self.out, "On branch {}", branch)?;
                    writeln!(self.out, "Head: {}", output::format_head(head))?;
                }
            }
        }
        Ok(())
    }

    fn render_branches(&mut self) -> Result<(), StepError> {
        let current = self.repo.current_branch();
        if self.format == Format::Json {
            let json = serde_json::to_string(self.repo.branches())?;
            writeln!(self.out, "{}", json)?;
            return Ok(());
        }
        for (name, head) in self.repo.branches() {
            let line = output::format_branch(name, head.as_ref(), name == current);
            writeln!(self.out, "{}", line)?;
        }
        Ok(())
    }

    fn render_log(&mut self, branch: Option<&str>) -> Result<(), StepError> {
        let log = self.repo.log(branch)?;
        match self.format {
            Format::Json => {
                let json = serde_json::to_string(&log)?;
                writeln!(self.out, "{}", json)?;
            }
            Format::Oneline => {
                for commit in &log {
                    writeln!(self.out, "{}", output::format_commit_oneline(commit))?;
                }
            }
            Format::Full => {
                let entries: Vec<String> = log.iter().map(|c| output::format_commit(c)).collect();
                write!(self.out, "{}", entries.join("\n"))?;
            }
        }
        Ok(())
    }

    /// Write a confirmation line unless quiet.
    fn emit_status(&mut self, message: String) -> Result<(), StepError> {
        if self.verbosity != Verbosity::Quiet && self.format != Format::Json {
            writeln!(self.out, "{}", message)?;
        }
        Ok(())
    }

    fn emit_json<T: Serialize>(&mut self, value: &T) -> Result<(), StepError> {
        let json = serde_json::to_string(value)?;
        writeln!(self.out, "{}", json)?;
        Ok(())
    }

    fn verify(&self) {
        let result = verify::verify(&self.repo);
        if result.ok {
            output::debug("Repository invariants verified", self.verbosity);
        } else {
            for err in &result.errors {
                output::warn(format!("verification failed: {}", err), self.verbosity);
            }
        }
    }
}
