mod cli;
mod commands;
mod error;
mod output;

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use wifidash_config as config;

use crate::cli::{Cli, ColorMode, Command, GlobalOpts, OutputFormat};
use crate::commands::Ctx;
use crate::error::CliError;

fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup tracing based on verbosity
    init_tracing(cli.global.verbose);

    // Dispatch and handle errors with proper exit codes
    if let Err(err) = run(cli) {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        // Config commands work on the file itself, not a registry
        Command::Config(args) => commands::config_cmd::handle(args, &cli.global),

        // Shell completions generation
        Command::Completions(args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "wifidash", &mut std::io::stdout());
            Ok(())
        }

        // Everything else runs against a freshly seeded registry
        cmd => {
            let ctx = build_context(&cli.global)?;
            let mut registry = config::build_registry(&ctx.config, cli.global.seed.as_deref())
                .map_err(CliError::from_seed)?;

            tracing::debug!(command = ?cmd, devices = registry.len(), "dispatching command");
            commands::dispatch(cmd, &mut registry, &ctx)
        }
    }
}

/// Load configuration and resolve presentation flags against its defaults.
fn build_context(global: &GlobalOpts) -> Result<Ctx, CliError> {
    let path = commands::config_cmd::effective_path(global);
    let cfg = config::load_config_from(&path).map_err(|e| CliError::from_config(e, &path))?;

    let format = global
        .output
        .or_else(|| OutputFormat::from_str(&cfg.defaults.output, true).ok())
        .unwrap_or(OutputFormat::Table);
    let color_mode = global
        .color
        .or_else(|| ColorMode::from_str(&cfg.defaults.color, true).ok())
        .unwrap_or(ColorMode::Auto);

    Ok(Ctx {
        format,
        color: output::should_color(color_mode),
        quiet: global.quiet,
        config: cfg,
    })
}
