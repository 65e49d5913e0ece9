//! Config subcommand handlers.

use std::io::IsTerminal;
use std::path::PathBuf;

use wifidash_config::{self as config, Config};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

/// The file `--config` points at, else the platform default.
pub(crate) fn effective_path(global: &GlobalOpts) -> PathBuf {
    global.config.clone().unwrap_or_else(config::config_path)
}

/// Prompt for confirmation, auto-approving if `--yes` was passed.
fn confirm(message: &str, action: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    if !std::io::stdin().is_terminal() {
        return Err(CliError::NonInteractiveRequiresYes { action: action.into() });
    }
    dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))
}

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let path = effective_path(global);
    match args.command {
        ConfigCommand::Show => {
            let cfg = config::load_config_from(&path).map_err(|e| CliError::from_config(e, &path))?;
            let rendered = config::render_config(&cfg).map_err(|e| CliError::from_config(e, &path))?;
            output::print_output(rendered.trim_end(), global.quiet);
            Ok(())
        }

        ConfigCommand::Path => {
            output::print_output(&path.display().to_string(), global.quiet);
            Ok(())
        }

        ConfigCommand::Init { force } => {
            if path.exists() && !force {
                let prompt = format!("{} already exists. Overwrite?", path.display());
                if !confirm(&prompt, "config init", global.yes)? {
                    eprintln!("Aborted; existing config left untouched.");
                    return Ok(());
                }
            }
            config::save_config_to(&Config::default(), &path).map_err(|e| CliError::from_config(e, &path))?;
            tracing::info!(path = %path.display(), "wrote default configuration");
            if !global.quiet {
                eprintln!("✓ Config written to {}", path.display());
            }
            Ok(())
        }
    }
}
