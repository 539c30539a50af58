use std::io::{self, Write};

use anyhow::Context;
use clap::Parser;
use gemini_probe::{
    API_KEY_ENV, DEFAULT_BASE_URL, DEFAULT_MODEL, GeminiProbe, ProbeConfig, ProbeRequest, report,
};

/// Command-line arguments.
#[derive(Parser, Debug)]
#[command(name = "gemini-probe")]
#[command(
    about = "Fire a single request at the Gemini API to differentiate rate limits from code bugs."
)]
struct Args {
    /// API key to use (defaults to GEMINI_API_KEY env var).
    #[arg(long, env = API_KEY_ENV, hide_env_values = true)]
    api_key: Option<String>,

    /// Prompt to send in the test request.
    #[arg(long)]
    prompt: Option<String>,

    /// Model identifier to probe.
    #[arg(long, default_value = DEFAULT_MODEL)]
    model: String,

    /// API host, e.g. a proxy in front of the Gemini API.
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Enable debug logging on stderr (RUST_LOG takes precedence)
    #[arg(short, long)]
    verbose: bool,
}

/// Installs `env_logger` on stderr; `RUST_LOG` overrides the level.
fn init_logging(verbose: bool) {
    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = ProbeConfig::resolve(args.api_key, args.prompt)?;

    let probe = GeminiProbe::builder()
        .api_key(config.api_key)
        .model(args.model)
        .base_url(args.base_url)
        .build();
    let endpoint = probe.endpoint_url()?;

    let mut stdout = io::stdout().lock();
    report::write_banner(&mut stdout, endpoint.as_str(), probe.model(), &config.prompt)?;
    stdout.flush()?;

    let response = probe
        .probe(&ProbeRequest::from_prompt(&config.prompt))
        .await
        .with_context(|| format!("request to {endpoint} failed"))?;

    report::write_report(&mut stdout, &response)?;
    stdout.flush()?;

    std::process::exit(i32::from(response.status_code()));
}
