//! `qcloud-dns01`: ACME DNS-01 hook for Tencent Cloud DNS
//!
//! Credentials and tuning come from the `QCLOUD_*` environment variables.
//! Logs and errors go to stderr (`RUST_LOG` controls the level), results go
//! to stdout.
//!
//! ```text
//! qcloud-dns01 present  *.example.com <token> <key-auth>
//! qcloud-dns01 cleanup  *.example.com <token> <key-auth>
//! qcloud-dns01 timeout --json
//! ```

use std::net::IpAddr;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use qcloud_dns01_provider::dns01::{FixedZoneResolver, SoaZoneResolver};
use qcloud_dns01_provider::{
    ChallengeProvider, Config, ProviderError, QcloudDnsProvider, ZoneResolver,
};
use serde::Serialize;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "qcloud-dns01", version, about = "ACME DNS-01 hook for Tencent Cloud DNS")]
struct Cli {
    /// Print results (stdout) and errors (stderr) as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Nameserver used to look up the authoritative zone (repeatable)
    #[arg(long = "dns-resolver", value_name = "IP", global = true)]
    dns_resolvers: Vec<IpAddr>,

    /// Use this zone instead of looking it up in DNS
    #[arg(long, value_name = "ZONE", global = true, conflicts_with = "dns_resolvers")]
    zone: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Create the `_acme-challenge` TXT record
    Present(ChallengeArgs),
    /// Delete the `_acme-challenge` TXT records
    Cleanup(ChallengeArgs),
    /// Print the propagation timeout and polling interval in seconds
    Timeout,
}

#[derive(Debug, Args)]
struct ChallengeArgs {
    /// Domain being validated, `*.` prefix allowed
    domain: String,
    /// ACME challenge token (unused by DNS-01)
    token: String,
    /// Key authorization (`token.thumbprint`)
    key_auth: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ChallengeOutput<'a> {
    action: &'a str,
    domain: &'a str,
    success: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TimeoutOutput {
    timeout_secs: u64,
    interval_secs: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorOutput<'a> {
    success: bool,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a ProviderError>,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .without_time()
                .with_ansi(false),
        )
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let cli = Cli::parse();
    let json = cli.json;

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report_error(&e, json);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::from_env().map_err(ProviderError::from)?;

    if let Some(zone) = cli.zone.as_deref() {
        let provider = QcloudDnsProvider::with_resolver(config, FixedZoneResolver::new(zone))?;
        return execute(&provider, &cli.command, cli.json).await;
    }

    let resolver = if cli.dns_resolvers.is_empty() {
        SoaZoneResolver::system()
    } else {
        SoaZoneResolver::with_nameservers(&cli.dns_resolvers)
    };
    let provider = QcloudDnsProvider::with_resolver(config, resolver)?;
    execute(&provider, &cli.command, cli.json).await
}

async fn execute<R: ZoneResolver>(
    provider: &QcloudDnsProvider<qcloud_dns01_provider::QcloudClient, R>,
    command: &Command,
    json: bool,
) -> anyhow::Result<()> {
    match command {
        Command::Present(args) => {
            provider
                .present(&args.domain, &args.token, &args.key_auth)
                .await
                .with_context(|| format!("present failed for {}", args.domain))?;
            tracing::info!("TXT record presented for {}", args.domain);
            print_challenge("present", &args.domain, json)
        }
        Command::Cleanup(args) => {
            provider
                .cleanup(&args.domain, &args.token, &args.key_auth)
                .await
                .with_context(|| format!("cleanup failed for {}", args.domain))?;
            tracing::info!("TXT records cleaned up for {}", args.domain);
            print_challenge("cleanup", &args.domain, json)
        }
        Command::Timeout => {
            let (timeout, interval) = provider.timeout();
            let output = TimeoutOutput {
                timeout_secs: timeout.as_secs(),
                interval_secs: interval.as_secs(),
            };
            if json {
                println!("{}", serde_json::to_string(&output)?);
            } else {
                println!("{} {}", output.timeout_secs, output.interval_secs);
            }
            Ok(())
        }
    }
}

fn print_challenge(action: &str, domain: &str, json: bool) -> anyhow::Result<()> {
    if json {
        let output = ChallengeOutput {
            action,
            domain,
            success: true,
        };
        println!("{}", serde_json::to_string(&output)?);
    }
    Ok(())
}

fn report_error(err: &anyhow::Error, json: bool) {
    let provider_error = err.downcast_ref::<ProviderError>();

    // 预期内的错误（凭证、配额、域名不存在等）只记 warn
    if provider_error.is_some_and(ProviderError::is_expected) {
        tracing::warn!("{err:#}");
    } else {
        tracing::error!("{err:#}");
    }

    if json {
        let output = ErrorOutput {
            success: false,
            message: format!("{err:#}"),
            error: provider_error,
        };
        match serde_json::to_string(&output) {
            Ok(line) => eprintln!("{line}"),
            Err(e) => tracing::error!("Failed to serialize error: {e}"),
        }
    }
}
