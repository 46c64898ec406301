use std::io::Write;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use env_logger::Env;
use log::{error, info};

use vless2clash::interfaces::{convert_source, subconverter};
use vless2clash::utils::file_exists;
use vless2clash::{ConvertError, SecurityPolicy, Settings};

/// Convert a list of vless:// links into a Clash Meta configuration
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the configuration file (TOML or YAML)
    #[arg(short, long, value_name = "FILE")]
    config: Option<String>,

    /// URL or local path of the link list
    #[arg(short, long, value_name = "URL|FILE")]
    source: Option<String>,

    /// Output file path
    #[arg(short, long, value_name = "OUTPUT_FILE")]
    output: Option<String>,

    /// Base template replacing the built-in one
    #[arg(short, long, value_name = "FILE")]
    base: Option<String>,

    /// Which security modes are accepted
    #[arg(long, value_enum)]
    policy: Option<SecurityPolicy>,

    /// Print the document instead of writing the output file
    #[arg(long)]
    stdout: bool,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, value_name = "LEVEL", default_value = "info")]
    log_level: String,
}

fn load_settings(args: &Args) -> anyhow::Result<Settings> {
    let mut settings = match &args.config {
        Some(path) => Settings::load_from_file(path)
            .with_context(|| format!("failed to load configuration from {}", path))?,
        None if file_exists("pref.toml") => {
            info!("Using configuration from pref.toml");
            Settings::load_from_file("pref.toml").context("failed to load pref.toml")?
        }
        None => Settings::new(),
    };

    // Command line arguments take precedence over the file
    if let Some(source) = &args.source {
        settings.common.source = source.clone();
    }
    if let Some(output) = &args.output {
        settings.common.output = output.clone();
    }
    if let Some(base) = &args.base {
        settings.common.base_path = base.clone();
    }
    if let Some(policy) = args.policy {
        settings.common.security_policy = policy;
    }
    settings.validate().context("invalid configuration")?;
    Ok(settings)
}

fn run(args: &Args) -> anyhow::Result<()> {
    let settings = load_settings(args)?;

    if args.stdout {
        let result = convert_source(&settings)?;
        std::io::stdout()
            .write_all(result.content.as_bytes())
            .context("failed to write to stdout")?;
        info!("Generated {} proxies", result.proxy_count());
    } else {
        let result = subconverter(&settings)?;
        println!(
            "{} proxies written to {}",
            result.proxy_count(),
            settings.common.output
        );
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    // Initialize the logger
    env_logger::init_from_env(Env::default().default_filter_or(args.log_level.as_str()));

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            match e.downcast_ref::<ConvertError>() {
                Some(ConvertError::NoValidProxies { .. }) => ExitCode::from(2),
                _ => ExitCode::FAILURE,
            }
        }
    }
}
