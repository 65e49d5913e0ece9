//! Line-oriented session over one in-memory registry.
//!
//! Each invocation of the CLI starts from the seed, so toggles made by a
//! one-shot command vanish on exit. A session keeps the registry alive and
//! reads commands from stdin until `quit` or end of input. Errors are
//! reported and the session carries on.

use std::io::{self, BufRead, IsTerminal, Write};

use wifidash_core::DeviceRegistry;

use crate::cli::{ControlsCommand, DevicesCommand, UsageArgs};
use crate::error::CliError;
use crate::output;

use super::{Ctx, controls, devices, status, usage};

const HELP: &str = "\
Commands:
  list [term]            list devices, optionally filtered
  get <device>           show one device
  pause <device>         pause or resume a device
  block <device>         block or unblock a device
  rename <device> <name> rename a device
  status                 connected devices and total usage
  usage                  usage ranking
  controls               show access controls
  pause-all on|off       pause or resume every device
  enforce                pause devices over their usage limit
  help                   this message
  quit                   leave the session";

#[derive(Debug, PartialEq, Eq)]
enum Step {
    Output(String),
    Quit,
}

fn usage_error(reason: &str) -> CliError {
    CliError::Validation {
        field: "command".into(),
        reason: reason.into(),
    }
}

fn required<'a>(arg: &'a str, usage: &str) -> Result<&'a str, CliError> {
    if arg.is_empty() { Err(usage_error(usage)) } else { Ok(arg) }
}

/// Execute a single session line against the registry.
fn step(registry: &mut DeviceRegistry, line: &str, ctx: &Ctx) -> Result<Step, CliError> {
    let line = line.trim();
    let (verb, rest) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(verb, rest)| (verb, rest.trim()));

    let out = match verb {
        "" => String::new(),
        "quit" | "exit" => return Ok(Step::Quit),
        "help" | "?" => HELP.to_owned(),

        "list" | "ls" => {
            let search = (!rest.is_empty()).then(|| rest.to_owned());
            devices::handle(registry, DevicesCommand::List { search }, ctx)?
        }
        "get" => {
            let device = required(rest, "usage: get <device>")?.to_owned();
            devices::handle(registry, DevicesCommand::Get { device }, ctx)?
        }
        "pause" => {
            let device = required(rest, "usage: pause <device>")?.to_owned();
            devices::handle(registry, DevicesCommand::Pause { device }, ctx)?
        }
        "block" => {
            let device = required(rest, "usage: block <device>")?.to_owned();
            devices::handle(registry, DevicesCommand::Block { device }, ctx)?
        }
        "rename" => {
            let (device, name) = rest
                .split_once(char::is_whitespace)
                .ok_or_else(|| usage_error("usage: rename <device> <name>"))?;
            let command = DevicesCommand::Rename {
                device: device.to_owned(),
                name: name.trim().to_owned(),
            };
            devices::handle(registry, command, ctx)?
        }

        "status" => status::handle(registry, ctx),
        "usage" => usage::handle(registry, &UsageArgs { top: None, width: 24 }, ctx),

        "controls" => controls::handle(registry, ControlsCommand::Show, ctx)?,
        "pause-all" => {
            let off = match rest {
                "" | "on" => false,
                "off" => true,
                _ => return Err(usage_error("usage: pause-all on|off")),
            };
            controls::handle(registry, ControlsCommand::PauseAll { off }, ctx)?
        }
        "enforce" => controls::handle(registry, ControlsCommand::Enforce, ctx)?,

        other => {
            return Err(usage_error(&format!("unknown command '{other}' (type 'help')")));
        }
    };
    Ok(Step::Output(out))
}

pub fn run(registry: &mut DeviceRegistry, ctx: &Ctx) -> Result<(), CliError> {
    let stdin = io::stdin();
    let interactive = stdin.is_terminal();
    if interactive && !ctx.quiet {
        eprintln!("wifidash session: {} devices loaded. Type 'help' for commands.", registry.len());
    }

    let mut lines = stdin.lock().lines();
    loop {
        if interactive {
            let mut stdout = io::stdout().lock();
            write!(stdout, "wifidash> ")?;
            stdout.flush()?;
        }
        let Some(line) = lines.next() else { break };
        match step(registry, &line?, ctx) {
            Ok(Step::Output(out)) => output::print_output(&out, ctx.quiet),
            Ok(Step::Quit) => break,
            Err(err) => eprintln!("{:?}", miette::Report::new(err)),
        }
    }
    tracing::debug!(devices = registry.len(), "session ended");
    Ok(())
}
