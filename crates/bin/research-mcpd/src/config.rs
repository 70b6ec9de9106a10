use clap::{ArgAction, Parser, builder::BoolishValueParser};
use std::net::SocketAddr;
use std::time::Duration;
use thiserror::Error;

const DEFAULT_MCP_HTTP_ADDR: &str = "127.0.0.1:4020";
const DEFAULT_SSE_KEEP_ALIVE_SECS: u64 = 15;
const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Parser, Debug)]
#[command(name = "research-mcpd", version, about = "Research MCP daemon.")]
struct CliArgs {
    #[arg(
        long = "stdio",
        env = "RESEARCH_ENABLE_STDIO",
        default_value_t = true,
        value_parser = BoolishValueParser::new(),
        action = ArgAction::Set,
        num_args = 0..=1,
        default_missing_value = "true"
    )]
    enable_stdio: bool,

    #[arg(
        long = "http",
        env = "RESEARCH_MCP_SERVE",
        default_value_t = false,
        value_parser = BoolishValueParser::new(),
        action = ArgAction::Set,
        num_args = 0..=1,
        default_missing_value = "true"
    )]
    mcp_serve: bool,

    #[arg(long, env = "RESEARCH_MCP_HTTP_ADDR", default_value = DEFAULT_MCP_HTTP_ADDR)]
    mcp_http_addr: SocketAddr,

    #[arg(
        long = "stateful",
        env = "RESEARCH_MCP_STATEFUL",
        default_value_t = true,
        value_parser = BoolishValueParser::new(),
        action = ArgAction::Set,
        num_args = 0..=1,
        default_missing_value = "true"
    )]
    stateful_mode: bool,

    #[arg(
        long,
        env = "RESEARCH_SSE_KEEP_ALIVE_SECS",
        default_value_t = DEFAULT_SSE_KEEP_ALIVE_SECS
    )]
    sse_keep_alive_secs: u64,

    #[arg(long, env = "RESEARCH_LOG", default_value = DEFAULT_LOG_FILTER)]
    log_filter: String,
}

/// Runtime configuration loaded from CLI arguments and environment variables.
#[derive(Debug, Clone)]
pub struct ResearchConfig {
    pub enable_stdio: bool,
    pub mcp_serve: bool,
    pub mcp_http_addr: SocketAddr,
    pub stateful_mode: bool,
    pub sse_keep_alive: Option<Duration>,
    pub log_filter: String,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no transport enabled: pass --stdio or --http")]
    NoTransport,
    #[error("invalid {name} value: {value}")]
    InvalidSetting { name: &'static str, value: String },
}

impl ResearchConfig {
    pub fn from_args() -> Result<Self, ConfigError> {
        let args = CliArgs::parse();
        Self::try_from(args)
    }

    pub fn default_log_filter() -> &'static str {
        DEFAULT_LOG_FILTER
    }
}

impl TryFrom<CliArgs> for ResearchConfig {
    type Error = ConfigError;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        if !args.enable_stdio && !args.mcp_serve {
            return Err(ConfigError::NoTransport);
        }

        let log_filter = args.log_filter.trim().to_string();
        if log_filter.is_empty() {
            return Err(ConfigError::InvalidSetting {
                name: "RESEARCH_LOG",
                value: args.log_filter,
            });
        }

        let sse_keep_alive = if args.sse_keep_alive_secs == 0 {
            None
        } else {
            Some(Duration::from_secs(args.sse_keep_alive_secs))
        };

        Ok(Self {
            enable_stdio: args.enable_stdio,
            mcp_serve: args.mcp_serve,
            mcp_http_addr: args.mcp_http_addr,
            stateful_mode: args.stateful_mode,
            sse_keep_alive,
            log_filter,
        })
    }
}
