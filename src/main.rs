use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use brands_contract::Config;
use brands_contract::brands::{ApiOutcome, BrandUpdate, BrandsClient, NewBrand};
use brands_contract::cli::{CliArgs, Command, RunArgs};
use brands_contract::fixtures::slugify;
use brands_contract::http::HttpClient;
use brands_contract::runner::Runner;
use brands_contract::scenarios;
use brands_contract::testing::{render, write_report};

#[tokio::main]
async fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .context("Failed to install log subscriber")?;

    let mut config = Config::from_env().context("Failed to read configuration")?;
    config.override_base_url(cli_args.base_url.as_deref())?;
    config.override_timeout_ms(cli_args.timeout_ms)?;

    let http = HttpClient::new(&config).context("Failed to build HTTP client")?;
    info!(base_url = %config.base_url, "using Brands API");

    match cli_args.command {
        Command::Run(args) => run_suites(http, args).await,
        Command::Create { name, slug } => {
            let slug = slug.unwrap_or_else(|| slugify(&name));
            let outcome = BrandsClient::new(http)
                .create(&NewBrand { name, slug })
                .await
                .context("Create request failed")?;
            print_outcome(outcome)
        }
        Command::Get { id } => {
            let outcome = BrandsClient::new(http)
                .get(&id)
                .await
                .context("Get request failed")?;
            print_outcome(outcome)
        }
        Command::Update { id, name, slug } => {
            let outcome = BrandsClient::new(http)
                .update(&id, &BrandUpdate { name, slug })
                .await
                .context("Update request failed")?;
            print_outcome(outcome)
        }
    }
}

async fn run_suites(http: HttpClient, args: RunArgs) -> Result<()> {
    let suites = scenarios::suites(&args.suites);
    let report = Runner::new(http).run(&suites).await;

    if let Some(path) = &args.report {
        write_report(path, &report)
            .with_context(|| format!("Failed to write report to {}", path.display()))?;
        info!(path = %path.display(), "report written");
    }

    print!("{}", render(&report, args.format)?);

    if !report.is_success() {
        std::process::exit(1);
    }
    Ok(())
}

fn print_outcome<T: std::fmt::Debug>(outcome: ApiOutcome<T>) -> Result<()> {
    match outcome {
        ApiOutcome::Success(value) => {
            println!("{value:#?}");
            Ok(())
        }
        ApiOutcome::Invalid(errors) => {
            for (field, messages) in &errors {
                for message in messages {
                    println!("{field}: {message}");
                }
            }
            anyhow::bail!("validation failed")
        }
        ApiOutcome::NotFound(message) => anyhow::bail!("not found: {message}"),
        ApiOutcome::MethodNotAllowed(message) => anyhow::bail!("method not allowed: {message}"),
        ApiOutcome::Unexpected { status, body } => {
            anyhow::bail!("unexpected status {status}: {body}")
        }
    }
}
