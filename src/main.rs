use anyhow::Result;
use clap::{Parser, Subcommand};
use pricer::{Price, PriceModifier, PricePipeline, config::Settings, savings, server};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[derive(Parser)]
#[command(
    about = env!("CARGO_PKG_DESCRIPTION"),
    author = env!("CARGO_PKG_AUTHORS"),
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Runs the HTTP price calculation service.
    Serve {
        #[arg(long, help = "(Optional) Sets the configuration file path.")]
        config: Option<String>,

        #[arg(long, help = "(Optional) Overrides the bind host.")]
        host: Option<String>,

        #[arg(long, help = "(Optional) Overrides the bind port.")]
        port: Option<u16>,
    },
    /// Prices a single item with modifiers applied in the order given.
    Quote {
        #[arg(long, help = "Sets the base price.", required = true)]
        base_price: Price,

        #[arg(
            long = "with",
            help = "Adds a modifier as kind:value (discount, tax, shipping, shipping-pct, bulk).",
            required = false
        )]
        modifiers: Vec<PriceModifier>,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Quote {
    base_price: Price,
    final_price: Price,
    description: String,
    savings: Price,
    modifiers: Vec<PriceModifier>,
}

fn quote(base_price: Price, modifiers: Vec<PriceModifier>) -> Result<()> {
    let pipeline = modifiers
        .into_iter()
        .fold(PricePipeline::new(), PricePipeline::with_modifier);
    let final_price = pipeline.calculate(base_price)?;

    let quote = Quote {
        base_price,
        final_price,
        description: pipeline.describe(),
        savings: savings(base_price, final_price),
        modifiers: pipeline.modifiers().to_vec(),
    };

    println!("{}", serde_json::to_string_pretty(&quote)?);

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    match args.command {
        Command::Serve { config, host, port } => {
            let mut settings = Settings::load(&config)?;
            if let Some(host) = host {
                settings.server.host = host;
            }
            if let Some(port) = port {
                settings.server.port = port;
            }

            init_tracing(&settings.log.filter);

            info!("Starting");

            server::serve(&settings.server).await?;
        }
        Command::Quote {
            base_price,
            modifiers,
        } => {
            init_tracing("warn");
            quote(base_price, modifiers)?;
        }
    }

    Ok(())
}
