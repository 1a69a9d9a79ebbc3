//! Command line front end: `bom_prices [--USD|--EUR|--GBP] [<input> [<output>]]`

use bom_prices::config::DEFAULT_USER_AGENT;
use bom_prices::io::{install_interrupt_cleanup, open_input, with_output};
use bom_prices::{run, Config, Currency, HttpFetcher, Result};
use clap::{ArgGroup, Parser};

/// Append distributor stock and price breaks to a tab-separated BOM.
///
/// The first header cell must be "Key"; columns named "DigiKey" or "Avnet"
/// hold order codes. Input and output may be the same file.
#[derive(Parser, Debug)]
#[command(name = "bom_prices")]
#[command(version, about, long_about = None)]
#[command(group(ArgGroup::new("currency").args(["usd", "eur", "gbp"])))]
struct Args {
    /// Quote prices in US dollars (default)
    #[arg(long = "USD", alias = "usd")]
    usd: bool,

    /// Quote prices in euros
    #[arg(long = "EUR", alias = "eur")]
    eur: bool,

    /// Quote prices in pounds sterling
    #[arg(long = "GBP", alias = "gbp")]
    gbp: bool,

    /// Input table, "-" or omitted for stdin
    input: Option<String>,

    /// Output table, "-" or omitted for stdout
    output: Option<String>,

    /// DigiKey storefront base URL (overrides the currency's regional site)
    #[arg(long, env = "BOM_PRICES_DIGIKEY_URL")]
    digikey_url: Option<String>,

    /// Avnet storefront base URL
    #[arg(long, env = "BOM_PRICES_AVNET_URL")]
    avnet_url: Option<String>,

    /// User-Agent header sent with every request
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    user_agent: String,
}

impl Args {
    fn currency(&self) -> Currency {
        if self.eur {
            Currency::Eur
        } else if self.gbp {
            Currency::Gbp
        } else {
            Currency::Usd
        }
    }

    fn config(&self) -> Result<Config> {
        let mut config = Config::new(self.currency()).with_user_agent(&self.user_agent);
        if let Some(url) = &self.digikey_url {
            config = config.with_digikey_base_url(url)?;
        }
        if let Some(url) = &self.avnet_url {
            config = config.with_avnet_base_url(url)?;
        }
        Ok(config)
    }
}

fn main() {
    // Set RUST_LOG to control verbosity, e.g. RUST_LOG=bom_prices=debug
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    if let Err(e) = install_interrupt_cleanup() {
        log::warn!("Failed to install interrupt handler: {}", e);
    }

    if let Err(e) = enrich_table(&args) {
        log::error!("{e}");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn enrich_table(args: &Args) -> Result<()> {
    let config = args.config()?;
    log::info!("Quoting prices in {}", config.currency.code());

    let fetcher = HttpFetcher::new(&config)?;
    let input = open_input(args.input.as_deref())?;
    with_output(args.output.as_deref(), |out| {
        run(input, out, &fetcher, &config)
    })
}
