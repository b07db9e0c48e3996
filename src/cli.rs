//! CLI argument parsing with subcommand architecture.

use clap::{Args, Parser, Subcommand};
use relay_core::provider::Variant;

#[derive(Parser)]
#[command(name = "chat-relay", version, about = "Chat relay for Amazon Bedrock text models")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    // Arguments for the implicit `run` command
    #[command(flatten)]
    pub run: RunArgs,
}

impl Cli {
    /// The selected command; `run` when none is given.
    pub fn into_command(self) -> Command {
        self.command.unwrap_or(Command::Run(self.run))
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP relay server (default when no subcommand is given)
    Run(RunArgs),
    /// Handle a single API Gateway proxy event and print the proxy response
    Invoke(InvokeArgs),
}

/// Options shared by every command that builds a relay.
#[derive(Args, Debug, Clone)]
pub struct CommonArgs {
    /// Path to config file
    #[arg(short, long, default_value = "config.yaml", env = "CHAT_RELAY_CONFIG")]
    pub config: String,

    /// Provider variant: nova (single-turn) or titan (multi-turn prompt)
    #[arg(long, env = "CHAT_RELAY_VARIANT")]
    pub variant: Option<Variant>,

    /// Bedrock region (overrides config and AWS_REGION)
    #[arg(long)]
    pub region: Option<String>,

    /// Log level
    #[arg(long, default_value = "info", env = "CHAT_RELAY_LOG_LEVEL")]
    pub log_level: String,
}

#[derive(Args, Debug)]
pub struct RunArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Listen host
    #[arg(long, env = "CHAT_RELAY_HOST")]
    pub host: Option<String>,

    /// Listen port
    #[arg(long, env = "CHAT_RELAY_PORT")]
    pub port: Option<u16>,
}

#[derive(Args, Debug)]
pub struct InvokeArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Event JSON file, or "-" for stdin
    #[arg(short, long, default_value = "-")]
    pub event: String,

    /// Pretty-print the proxy response
    #[arg(long)]
    pub pretty: bool,
}
