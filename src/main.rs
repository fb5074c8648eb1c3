use bankcap::{cli, config::Config};
use clap::{Parser, Subcommand, builder::styling};
use eyre::Result;
use url::Url;

// CLI Styling
const STYLES: styling::Styles = styling::Styles::styled()
    .header(styling::AnsiColor::BrightWhite.on_default())
    .usage(styling::AnsiColor::BrightWhite.on_default())
    .literal(styling::AnsiColor::Green.on_default())
    .placeholder(styling::AnsiColor::Cyan.on_default());

/// Bank Market Cap ETL: scrape the largest-banks table, convert currencies, load CSV + SQLite, report
#[derive(Parser)]
#[command(name = "bankcap", version, styles = STYLES)]
struct Cli {
    /// The dotenv file to source configuration from
    #[arg(short, long, global = true, default_value = ".env")]
    env: String,

    /// More verbose logging
    #[arg(long, global = true)]
    debug: bool,

    /// Command to execute
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full pipeline: extract, transform, load, and report
    Run {
        /// Page to scrape instead of the configured one
        #[arg(short, long)]
        url: Option<Url>,
    },

    /// Run the report queries against an existing database
    Report,

    /// Check the exchange-rate table and display the loaded rates
    Rates,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    if std::path::Path::new(&cli.env).exists() {
        dotenvy::from_filename(&cli.env)?;
    }

    let log_level = match cli.debug {
        true => "debug",
        false => "info",
    };
    let env = env_logger::Env::default().filter_or("LOG_LEVEL", log_level);
    env_logger::Builder::from_env(env)
        .format_timestamp_millis()
        .init();

    let config = Config::from_env()?;

    match cli.command {
        Commands::Run { url } => {
            let config = match url {
                Some(url) => config.with_url(url),
                None => config,
            };
            cli::run_pipeline(&config).await?;
        }
        Commands::Report => {
            cli::report_queries(&config).await?;
        }
        Commands::Rates => {
            cli::show_rates(&config)?;
        }
    }

    Ok(())
}
