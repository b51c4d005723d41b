//! run command - Execute a repository script against a fresh repository

use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

use anyhow::{bail, Context as _, Result};

use crate::core::config::Config;
use crate::engine::{Context, Executor};
use crate::ui::output::{self, Verbosity};

/// Execute the script in `file`, or standard input when absent or `-`.
pub fn run(ctx: &Context, file: Option<&Path>, keep_going: bool) -> Result<()> {
    let verbosity = Verbosity::from_flags(ctx.quiet, ctx.debug);
    let config = Config::load(ctx.config.as_deref()).context("Failed to load config")?;
    if let Some(path) = config.loaded_from() {
        output::debug(format!("Loaded config from {}", path.display()), verbosity);
    }

    let stdout = io::stdout();
    let mut executor = Executor::new(ctx, &config, stdout.lock());

    let summary = match file.filter(|p| *p != Path::new("-")) {
        Some(path) => {
            let script = File::open(path)
                .with_context(|| format!("Failed to open script '{}'", path.display()))?;
            executor.run_script(BufReader::new(script), keep_going)?
        }
        None => {
            output::debug("Reading script from standard input", verbosity);
            executor.run_script(io::stdin().lock(), keep_going)?
        }
    };

    if summary.failed > 0 {
        bail!(
            "{} of {} instruction(s) failed",
            summary.failed,
            summary.failed + summary.executed
        );
    }
    Ok(())
}
