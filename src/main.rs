mod app;
mod cli;

use clap::Parser;
use cli::{Cli, Command, CommonArgs, InvokeArgs, RunArgs};
use relay_core::config::Config;
use relay_core::lifecycle::logging::{LogOptions, WorkerGuard, init_logging};
use relay_server::gateway::{GatewayEvent, handle_event};
use std::io::Read;

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    match cli.into_command() {
        Command::Run(args) => cmd_run(args),
        Command::Invoke(args) => cmd_invoke(args),
    }
}

/// Peek at the config for the log destination. The real load happens after
/// logging is up so its warnings are visible.
fn init_logging_for(common: &CommonArgs) -> Option<WorkerGuard> {
    let peek = Config::load(&common.config).ok();
    let opts = LogOptions {
        level: &common.log_level,
        format: peek.as_ref().map(|c| c.log_format).unwrap_or_default(),
        to_file: peek.as_ref().is_some_and(|c| c.logging_to_file),
        log_dir: peek.as_ref().and_then(|c| c.log_dir.as_deref()),
    };
    init_logging(&opts)
}

fn cmd_run(args: RunArgs) -> anyhow::Result<()> {
    let _guard = init_logging_for(&args.common);
    let config = app::load_config(&args.common);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async {
        let application = app::Application::build(config, &args)?;
        application.serve().await
    })
}

fn cmd_invoke(args: InvokeArgs) -> anyhow::Result<()> {
    let _guard = init_logging_for(&args.common);
    let config = app::load_config(&args.common);
    config.validate()?;

    let raw = if args.event == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(&args.event)?
    };
    let event: GatewayEvent = serde_json::from_str(&raw)
        .map_err(|e| anyhow::anyhow!("invalid gateway event '{}': {e}", args.event))?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let response = runtime.block_on(async {
        let relay = app::build_relay(&config);
        handle_event(&relay, &event).await
    });

    let out = if args.pretty {
        serde_json::to_string_pretty(&response)?
    } else {
        serde_json::to_string(&response)?
    };
    println!("{out}");
    Ok(())
}
