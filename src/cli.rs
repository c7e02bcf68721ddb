//! Command-line interface for Foliochat
//!
//! Provides argument parsing and subcommand handling for the Foliochat binary.

use clap::{Parser, Subcommand};

/// Portfolio assistant chat service with multi-provider failover
#[derive(Parser)]
#[command(name = "foliochat")]
#[command(version)]
#[command(about = "Portfolio assistant chat service with multi-provider failover")]
#[command(
    long_about = "Foliochat serves a portfolio site's conversational assistant: it guards \
    the chat endpoint against abuse, answers through Gemini, OpenAI, or Anthropic with \
    automatic failover, and degrades to deterministic local answers when no backend is usable."
)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml", global = true)]
    pub config: String,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Generate a template configuration file
    Config {
        /// Output file path (prints to stdout if not specified)
        #[arg(short, long)]
        output: Option<String>,
    },
}

/// Generate template configuration content
pub fn generate_config_template() -> &'static str {
    r#"# Foliochat Configuration
# =======================
#
# This file configures the HTTP server, chat pipeline, rate limiting, and
# generative providers. Credentials are NOT configured here: each provider
# reads its API key from the environment at startup
# (GEMINI_API_KEY, OPENAI_API_KEY, ANTHROPIC_API_KEY).

[server]
# IP address to bind to (0.0.0.0 for all interfaces, 127.0.0.1 for localhost only)
host = "0.0.0.0"

# Port to listen on
port = 3000

# Upper bound for a single provider call, in seconds (1-300)
request_timeout_seconds = 30

[chat]
# Operating mode: "local", "gemini", "openai", "anthropic", or "hybrid".
#   local     - never attempt generation, always use canned answers
#   hybrid    - first available of Gemini, OpenAI, Anthropic (in that order)
#   otherwise - pin one backend; if its key is missing, behave like local
mode = "hybrid"

# When the selected provider fails at runtime, serve the local canned
# answer for that request (true) or a generic apology (false)
fallback_enabled = true

# Token budget for the portfolio context sent to providers
max_context_tokens = 1500

# Name the assistant speaks about in the third person
owner_name = "the portfolio owner"

# Path to the portfolio document maintained by the admin tooling
portfolio_path = "portfolio.json"

[rate_limit]
# Sliding-window limit per client for the chat endpoint
max_requests = 10
window_seconds = 60

[providers.gemini]
model = "gemini-1.5-flash"
max_output_tokens = 512
temperature = 0.7

[providers.openai]
model = "gpt-4o-mini"
max_output_tokens = 512
temperature = 0.7

[providers.anthropic]
model = "claude-3-5-haiku-latest"
max_output_tokens = 512
temperature = 0.7

[observability]
# Log level: trace, debug, info, warn, error (RUST_LOG overrides this)
log_level = "info"
"#
}
