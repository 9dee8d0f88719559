//! dialscope CLI
//!
//! Phone-number intelligence from the command line.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use dialscope_core::ErrorReport;
use dialscope_runtime::Pipeline;
use dialscope_sources::ProviderConfig;

#[derive(Parser)]
#[command(name = "dialscope")]
#[command(author, version, about = "Phone-number intelligence and enrichment", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbosity level (0-3)
    #[arg(short, long, default_value = "1")]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a phone number and print the intelligence report as JSON
    Analyze {
        /// The phone number (E.164 or national format)
        number: String,

        /// Pretty-print the JSON report
        #[arg(short, long)]
        pretty: bool,

        /// Write the report to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Numverify access key (or set NUMVERIFY_API_KEY env var)
        #[arg(long, env = "NUMVERIFY_API_KEY")]
        numverify_key: Option<String>,

        /// Twilio account SID (or set TWILIO_ACCOUNT_SID env var)
        #[arg(long, env = "TWILIO_ACCOUNT_SID")]
        twilio_sid: Option<String>,

        /// Twilio auth token (or set TWILIO_AUTH_TOKEN env var)
        #[arg(long, env = "TWILIO_AUTH_TOKEN")]
        twilio_token: Option<String>,

        /// Have I Been Pwned API key (or set HIBP_API_KEY env var)
        #[arg(long, env = "HIBP_API_KEY")]
        hibp_key: Option<String>,

        /// Disable breach checking
        #[arg(long)]
        no_breach: bool,

        /// Disable osint footprint enrichment
        #[arg(long)]
        no_osint: bool,

        /// Enable social-media lookup
        #[arg(long)]
        social: bool,
    },

    /// List the registered signal sources and their configuration state
    Sources,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Set up logging
    let log_level = match cli.verbose {
        0 => Level::ERROR,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_thread_ids(false)
        .compact()
        .init();

    match cli.command {
        Commands::Analyze {
            number,
            pretty,
            output,
            numverify_key,
            twilio_sid,
            twilio_token,
            hibp_key,
            no_breach,
            no_osint,
            social,
        } => {
            let env = ProviderConfig::from_env();
            let config = ProviderConfig {
                numverify_api_key: numverify_key.or(env.numverify_api_key),
                twilio_account_sid: twilio_sid.or(env.twilio_account_sid),
                twilio_auth_token: twilio_token.or(env.twilio_auth_token),
                hibp_api_key: hibp_key.or(env.hibp_api_key),
                enable_breach_checking: env.enable_breach_checking && !no_breach,
                enable_osint_enrichment: env.enable_osint_enrichment && !no_osint,
                enable_social_lookup: env.enable_social_lookup || social,
            };
            run_analyze(&number, pretty, output, &config).await
        }
        Commands::Sources => {
            list_sources(&ProviderConfig::from_env());
            Ok(ExitCode::SUCCESS)
        }
    }
}

async fn run_analyze(
    number: &str,
    pretty: bool,
    output: Option<PathBuf>,
    config: &ProviderConfig,
) -> Result<ExitCode> {
    let pipeline = Pipeline::new(config);

    match pipeline.analyze(number).await {
        Ok(report) => {
            let json = if pretty {
                serde_json::to_string_pretty(&report)?
            } else {
                serde_json::to_string(&report)?
            };
            match output {
                Some(path) => {
                    fs::write(&path, &json)?;
                    println!("Report saved to: {}", path.display());
                }
                None => println!("{}", json),
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            // The error surface replaces the report wholesale.
            let report = ErrorReport::new(err.to_string());
            eprintln!("{}", serde_json::to_string(&report)?);
            Ok(ExitCode::FAILURE)
        }
    }
}

fn list_sources(config: &ProviderConfig) {
    let pipeline = Pipeline::new(config);
    println!("{:<20} {:<10} {:<10} {}", "ID", "CATEGORY", "PRIORITY", "CONFIGURED");
    for source in pipeline.sources() {
        println!(
            "{:<20} {:<10} {:<10} {}",
            source.id(),
            source.category().to_string(),
            source.priority(),
            if source.configured() { "yes" } else { "no" }
        );
    }
}
