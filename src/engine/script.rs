//! engine::script
//!
//! Parsing of repository scripts.
//!
//! # Format
//!
//! One instruction per line. Blank lines and lines starting with `#` are
//! skipped. Arguments are separated by whitespace; double-quoted arguments
//! may contain whitespace and the escapes `\"` and `\\`.
//!
//! ```text
//! author "Jane Doe" jane@example.com
//! commit "initial commit"
//! branch feature
//! switch feature
//! log main
//! ```

use thiserror::Error;

/// A script line that could not be parsed.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("line {line}: {message}")]
pub struct ParseError {
    /// 1-based line number
    pub line: usize,
    pub message: String,
}

/// A single parsed instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instruction {
    /// Set the session author.
    Author { name: String, email: String },
    /// Commit on the current branch.
    Commit { message: String },
    /// Create a branch at the current head.
    Branch { name: String },
    /// Change the current branch.
    Switch { name: String },
    /// Print a branch head (current branch when `None`).
    Head { branch: Option<String> },
    /// List all branches.
    Branches,
    /// Print history (current branch when `None`).
    Log { branch: Option<String> },
    /// Print the current branch and its head.
    Status,
}

impl Instruction {
    /// Human-readable description for debug output.
    pub fn description(&self) -> String {
        match self {
            Instruction::Author { name, email } => format!("Set author {} <{}>", name, email),
            Instruction::Commit { message } => format!("Commit {:?}", message),
            Instruction::Branch { name } => format!("Create branch {}", name),
            Instruction::Switch { name } => format!("Switch to {}", name),
            Instruction::Head { branch } => {
                format!("Show head of {}", branch.as_deref().unwrap_or("current branch"))
            }
            Instruction::Branches => "List branches".to_string(),
            Instruction::Log { branch } => {
                format!("Show log of {}", branch.as_deref().unwrap_or("current branch"))
            }
            Instruction::Status => "Show status".to_string(),
        }
    }

    /// Whether the instruction changes repository state.
    pub fn is_mutating(&self) -> bool {
        matches!(
            self,
            Instruction::Commit { .. } | Instruction::Branch { .. } | Instruction::Switch { .. }
        )
    }
}

/// Parse one script line.
///
/// Returns `Ok(None)` for blank and comment lines.
///
/// # Example
///
/// ```
/// use twig::engine::script::{parse_line, Instruction};
///
/// let parsed = parse_line(1, r#"commit "fix the thing""#).unwrap();
/// assert_eq!(
///     parsed,
///     Some(Instruction::Commit { message: "fix the thing".into() })
/// );
/// assert_eq!(parse_line(2, "# comment").unwrap(), None);
/// ```
pub fn parse_line(line: usize, text: &str) -> Result<Option<Instruction>, ParseError> {
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }

    let err = |message: String| ParseError { line, message };
    let mut tokens = tokenize(trimmed).map_err(err)?.into_iter();
    let Some(keyword) = tokens.next() else {
        return Ok(None);
    };
    let args: Vec<String> = tokens.collect();

    let instruction = match keyword.as_str() {
        "author" => {
            let [name, email] = exact::<2>(&keyword, args).map_err(err)?;
            Instruction::Author { name, email }
        }
        "commit" => {
            let [message] = exact::<1>(&keyword, args).map_err(err)?;
            Instruction::Commit { message }
        }
        "branch" => {
            let [name] = exact::<1>(&keyword, args).map_err(err)?;
            Instruction::Branch { name }
        }
        "switch" => {
            let [name] = exact::<1>(&keyword, args).map_err(err)?;
            Instruction::Switch { name }
        }
        "head" => Instruction::Head {
            branch: optional(&keyword, args).map_err(err)?,
        },
        "log" => Instruction::Log {
            branch: optional(&keyword, args).map_err(err)?,
        },
        "branches" => {
            exact::<0>(&keyword, args).map_err(err)?;
            Instruction::Branches
        }
        "status" => {
            exact::<0>(&keyword, args).map_err(err)?;
            Instruction::Status
        }
        other => return Err(err(format!("unknown instruction '{}'", other))),
    };
    Ok(Some(instruction))
}

fn exact<const N: usize>(keyword: &str, args: Vec<String>) -> Result<[String; N], String> {
    let count = args.len();
    args.try_into()
        .map_err(|_| format!("'{}' takes {} argument(s), got {}", keyword, N, count))
}

fn optional(keyword: &str, mut args: Vec<String>) -> Result<Option<String>, String> {
    if args.len() > 1 {
        return Err(format!(
            "'{}' takes at most 1 argument, got {}",
            keyword,
            args.len()
        ));
    }
    Ok(args.pop())
}

/// Split a line into whitespace-separated, optionally quoted tokens.
fn tokenize(text: &str) -> Result<Vec<String>, String> {
    let mut tokens = Vec::new();
    let mut chars = text.chars().peekable();

    while let Some(&c) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
            continue;
        }

        let mut token = String::new();
        if c == '"' {
            chars.next();
            let mut closed = false;
            while let Some(c) = chars.next() {
                match c {
                    '"' => {
                        closed = true;
                        break;
                    }
                    '\\' => match chars.next() {
                        Some(escaped @ ('"' | '\\')) => token.push(escaped),
                        Some(other) => return Err(format!("unknown escape '\\{}'", other)),
                        None => return Err("unterminated escape".to_string()),
                    },
                    _ => token.push(c),
                }
            }
            if !closed {
                return Err("unterminated quoted string".to_string());
            }
            if chars.peek().is_some_and(|c| !c.is_whitespace()) {
                return Err("quoted string must be followed by whitespace".to_string());
            }
        } else {
            while let Some(&c) = chars.peek() {
                if c.is_whitespace() {
                    break;
                }
                if c == '"' {
                    return Err("unexpected quote inside argument".to_string());
                }
                token.push(c);
                chars.next();
            }
        }
        tokens.push(token);
    }

    Ok(tokens)
}
