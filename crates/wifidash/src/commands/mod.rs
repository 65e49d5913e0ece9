//! Command dispatch: bridges CLI args -> registry operations -> output formatting.

pub mod config_cmd;
pub mod controls;
pub mod devices;
pub mod session;
pub mod status;
pub mod usage;

use wifidash_config::Config;
use wifidash_core::DeviceRegistry;

use crate::cli::{Command, OutputFormat};
use crate::error::CliError;

/// Resolved presentation settings plus the loaded configuration.
pub struct Ctx {
    pub format: OutputFormat,
    pub color: bool,
    pub quiet: bool,
    pub config: Config,
}

/// Dispatch a registry-bound command to the appropriate handler.
///
/// Handlers return rendered output; printing happens here so the
/// interactive session can reuse them.
pub fn dispatch(cmd: Command, registry: &mut DeviceRegistry, ctx: &Ctx) -> Result<(), CliError> {
    let out = match cmd {
        Command::Devices(args) => devices::handle(registry, args.command, ctx)?,
        Command::Status => status::handle(registry, ctx),
        Command::Usage(args) => usage::handle(registry, &args, ctx),
        Command::Controls(args) => controls::handle(registry, args.command, ctx)?,
        Command::Session => return session::run(registry, ctx),
        // Config and Completions are handled before a registry exists
        Command::Config(_) | Command::Completions(_) => {
            unreachable!("config and completions are dispatched in main")
        }
    };
    crate::output::print_output(&out, ctx.quiet);
    Ok(())
}
