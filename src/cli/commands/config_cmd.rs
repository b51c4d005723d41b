//! config command - Get, set, or list configuration values

use anyhow::{Context as _, Result};

use crate::core::config::{Config, KEYS};
use crate::engine::Context;
use crate::ui::output::{self, Verbosity};

fn load(ctx: &Context) -> Result<Config> {
    Config::load(ctx.config.as_deref()).context("Failed to load config")
}

/// Get a configuration value.
///
/// Prints nothing when the key is known but unset.
pub fn get(ctx: &Context, key: &str) -> Result<()> {
    let config = load(ctx)?;
    if let Some(value) = config.get_key(key)? {
        println!("{}", value);
    }
    Ok(())
}

/// Set a configuration value and write the config file.
///
/// A path named by `--config` or `$TWIG_CONFIG` is created if it does not
/// exist yet.
pub fn set(ctx: &Context, key: &str, value: &str) -> Result<()> {
    let target = Config::explicit_path(ctx.config.as_deref());
    let mut config = match &target {
        Some(path) if !path.exists() => Config::default(),
        _ => load(ctx)?,
    };
    config.set_key(key, value)?;

    let path = match target {
        Some(path) => path,
        None => config.write_path()?,
    };
    Config::write(&path, &config.global).context("Failed to write config")?;

    let verbosity = Verbosity::from_flags(ctx.quiet, ctx.debug);
    output::debug(format!("Wrote {}", path.display()), verbosity);
    output::success(format!("Set {} = {}", key, value), verbosity);
    Ok(())
}

/// List all configuration values.
pub fn list(ctx: &Context) -> Result<()> {
    let config = load(ctx)?;

    match config.loaded_from() {
        Some(path) => println!("# Configuration ({})", path.display()),
        None => println!("# Configuration (defaults)"),
    }

    for key in KEYS {
        match config.get_key(key)? {
            Some(value) => println!("{} = {}", key, value),
            None => println!("{} = (not set)", key),
        }
    }
    Ok(())
}
