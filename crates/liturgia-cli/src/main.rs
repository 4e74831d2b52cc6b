use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use liturgia_fetch::{FetchConfig, FetchError, DEFAULT_URL};
use liturgia_render::{RenderOptions, DEFAULT_WIDTH};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Parser)]
#[command(name = "liturgia")]
#[command(about = "Fetch and read the daily liturgy")]
#[command(version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("BUILD_HASH"), ", built ", env!("BUILD_DATE"), ")"))]
struct Cli {
    /// Log level: error, warn, info, debug, trace
    #[arg(long, global = true, default_value = "warn", value_enum)]
    log_level: LogLevel,

    /// Use UTC timestamps instead of local time
    #[arg(long, global = true)]
    utc: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, clap::ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Args)]
struct FetchArgs {
    /// Liturgy endpoint
    #[arg(short, long, default_value = DEFAULT_URL)]
    url: String,

    /// Request timeout in seconds
    #[arg(short, long, default_value_t = 5)]
    timeout: u64,
}

impl FetchArgs {
    fn config(&self) -> FetchConfig {
        FetchConfig::default()
            .with_url(self.url.clone())
            .with_timeout(Duration::from_secs(self.timeout))
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch today's liturgy and print it as text
    Show {
        #[command(flatten)]
        fetch: FetchArgs,

        /// Wrap reading text at this many columns
        #[arg(short, long, default_value_t = DEFAULT_WIDTH)]
        width: usize,

        /// Print a label before each reading section
        #[arg(long)]
        sections: bool,

        /// Stay open after printing: Enter refreshes, q quits
        #[arg(short, long)]
        interactive: bool,
    },

    /// Fetch today's liturgy and print the normalized page as JSON
    Json {
        #[command(flatten)]
        fetch: FetchArgs,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Map log level, keeping the HTTP stack quiet at debug/trace
    let level = match cli.log_level {
        LogLevel::Error => "error",
        LogLevel::Warn  => "warn",
        LogLevel::Info  => "info",
        LogLevel::Debug => "debug,hyper_util=warn,reqwest=info,rustls=warn",
        LogLevel::Trace => "trace,hyper_util=warn,rustls=warn",
    };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    // Timestamp format: 2026-02-14 19:44:09.123 -08:00
    let time_format = "%Y-%m-%d %H:%M:%S%.3f %:z";

    // Logs go to stderr; stdout carries the liturgy text.
    if cli.utc {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .with_timer(tracing_subscriber::fmt::time::ChronoUtc::new(time_format.to_string()))
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .with_timer(tracing_subscriber::fmt::time::ChronoLocal::new(time_format.to_string()))
            .init();
    }

    match cli.command {
        Commands::Show {
            fetch,
            width,
            sections,
            interactive,
        } => {
            let config = fetch.config();
            let options = RenderOptions {
                width,
                section_labels: sections,
            };
            if interactive {
                run_interactive(&config, &options).await?;
            } else {
                show_once(&config, &options).await?;
            }
        }
        Commands::Json { fetch } => {
            let page = liturgia_fetch::fetch_and_normalize(&fetch.config())
                .await
                .map_err(report)?;
            println!("{}", serde_json::to_string_pretty(&page)?);
        }
    }

    Ok(())
}

async fn show_once(config: &FetchConfig, options: &RenderOptions) -> Result<()> {
    let page = liturgia_fetch::fetch_and_normalize(config)
        .await
        .map_err(report)?;
    print!("{}", liturgia_render::render_page(&page, options));
    Ok(())
}

/// Render, then wait for the reader. Each refresh runs one full cycle and
/// the next prompt only appears once it has finished.
async fn run_interactive(config: &FetchConfig, options: &RenderOptions) -> Result<()> {
    let mut input = BufReader::new(tokio::io::stdin()).lines();

    loop {
        match liturgia_fetch::fetch_and_normalize(config).await {
            Ok(page) => print!("{}", liturgia_render::render_page(&page, options)),
            Err(e) => eprintln!("{}", liturgia_render::render_error(&e)),
        }

        eprintln!("\n[Enter] atualizar  [q] sair");
        match input.next_line().await? {
            Some(line) if line.trim().eq_ignore_ascii_case("q") => break,
            Some(_) => tracing::info!("Refreshing liturgy"),
            None => break,
        }
    }

    Ok(())
}

/// Wrap a failed cycle so `main` prints the reader-facing message once,
/// with the typed error as its cause.
fn report(err: FetchError) -> anyhow::Error {
    let message = liturgia_render::render_error(&err);
    anyhow::Error::new(err).context(message)
}
