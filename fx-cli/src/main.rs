//! FX CLI
//!
//! Command-line currency converter:
//! - Load configuration from `.env` and the environment
//! - Build the provider client and the rate service
//! - Run one command and print the result

mod config;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::json;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fx_client::ExchangeRateClient;
use fx_format::CurrencyFormatter;
use fx_hex::RateService;
use fx_types::{Currency, CurrencyCode};

use config::Config;

#[derive(Parser)]
#[command(name = "fx")]
#[command(author, version, about = "Currency converter backed by ExchangeRate-API", long_about = None)]
struct Cli {
    /// Provider API key [env: EXCHANGE_RATE_API_KEY]
    #[arg(long, global = true)]
    api_key: Option<String>,

    /// Provider base URL [env: EXCHANGE_RATE_API_URL]
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Locale used to format amounts, e.g. pt-BR [env: FX_LOCALE]
    #[arg(long, global = true)]
    locale: Option<String>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List currencies supported by the provider
    Currencies {
        /// Only show currencies whose code or name contains this text
        #[arg(long)]
        filter: Option<String>,
    },
    /// Convert an amount between two currencies
    Convert {
        #[arg(allow_negative_numbers = true)]
        amount: f64,
        #[arg(long)]
        from: String,
        #[arg(long)]
        to: String,
    },
    /// Show the latest rates for a base currency
    Rates {
        base: String,
        /// Restrict output to these codes (comma-separated)
        #[arg(long, value_delimiter = ',')]
        only: Vec<String>,
    },
    /// Format a value as currency without contacting the provider
    Format {
        #[arg(allow_negative_numbers = true)]
        value: f64,
        code: String,
    },
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,fx_hex=info,fx_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn build_service(config: &Config) -> Result<RateService<ExchangeRateClient>> {
    let client = ExchangeRateClient::new(config.api_key.clone().unwrap_or_default())
        .context("set EXCHANGE_RATE_API_KEY or pass --api-key")?
        .with_base_url(&config.api_url)?
        .with_timeout(config.http_timeout)?;

    Ok(RateService::new(client).with_rate_ttl(config.rate_ttl))
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    let config = Config::from_env()?.with_overrides(cli.api_key, cli.api_url, cli.locale);
    let formatter = CurrencyFormatter::new(&config.locale)
        .with_context(|| format!("cannot format for locale {:?}", config.locale))?;
    tracing::debug!(locale = formatter.locale(), api_url = %config.api_url, "Configuration loaded");

    match cli.command {
        Commands::Format { value, code } => {
            if !is_known_code(&code) {
                tracing::warn!(code = %code, "No symbol known; printing the code");
            }
            let formatted = formatter.format(value, &code)?;
            if cli.json {
                println!("{}", json!({ "formatted": formatted }));
            } else {
                println!("{}", formatted);
            }
        }

        Commands::Currencies { filter } => {
            let service = build_service(&config)?;
            let currencies = service.list_currencies().await?;
            let currencies = filter_currencies(currencies, filter.as_deref());
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&currencies)?);
            } else {
                for currency in &currencies {
                    println!("{}  {}", currency.code, currency.name);
                }
            }
        }

        Commands::Convert { amount, from, to } => {
            let service = build_service(&config)?;
            let quote = service.quote(&from, &to, amount).await?;
            let amount_text = formatter.format(quote.amount, quote.from.as_str())?;
            let value_text = formatter.format(quote.value, quote.to.as_str())?;
            if cli.json {
                let out = json!({
                    "conversion": quote,
                    "formatted": { "amount": amount_text, "value": value_text },
                    "locale": formatter.locale(),
                });
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                println!("{} = {}", amount_text, value_text);
                println!(
                    "1 {} = {} {} (rates from {})",
                    quote.from,
                    quote.rate,
                    quote.to,
                    quote.rates_fetched_at.to_rfc3339()
                );
            }
        }

        Commands::Rates { base, only } => {
            let service = build_service(&config)?;
            let base = CurrencyCode::new(&base)?;
            let table = service.get_rates(&base).await?;
            let only = only
                .iter()
                .map(|code| CurrencyCode::new(code))
                .collect::<Result<Vec<_>, _>>()?;
            for code in only.iter().filter(|code| !table.contains(code.as_str())) {
                tracing::warn!(base = %base, code = %code, "No rate quoted");
            }

            let rows: Vec<(String, f64)> = table
                .sorted()
                .into_iter()
                .filter(|(code, _)| only.is_empty() || only.contains(*code))
                .map(|(code, rate)| (code.to_string(), rate))
                .collect();

            if cli.json {
                let rates: serde_json::Map<String, serde_json::Value> =
                    rows.into_iter().map(|(code, rate)| (code, json!(rate))).collect();
                println!(
                    "{}",
                    serde_json::to_string_pretty(&json!({ "base": base, "rates": rates }))?
                );
            } else {
                for (code, rate) in rows {
                    println!("{:<4} {}", code, rate);
                }
            }
        }
    }

    Ok(())
}

fn is_known_code(code: &str) -> bool {
    let code = code.trim().to_ascii_uppercase();
    fx_format::known_codes().contains(&code.as_str())
}

/// Case-insensitive match on code or name.
fn filter_currencies(currencies: Vec<Currency>, filter: Option<&str>) -> Vec<Currency> {
    let Some(needle) = filter.map(str::to_lowercase) else {
        return currencies;
    };
    currencies
        .into_iter()
        .filter(|c| {
            c.code.as_str().to_lowercase().contains(&needle)
                || c.name.to_lowercase().contains(&needle)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn currencies() -> Vec<Currency> {
        vec![
            Currency::new(CurrencyCode::new("USD").unwrap(), "United States Dollar"),
            Currency::new(CurrencyCode::new("BRL").unwrap(), "Brazilian Real"),
            Currency::new(CurrencyCode::new("AUD").unwrap(), "Australian Dollar"),
        ]
    }

    #[test]
    fn test_filter_by_name_and_code() {
        let dollars = filter_currencies(currencies(), Some("dollar"));
        assert_eq!(dollars.len(), 2);

        let brl = filter_currencies(currencies(), Some("brl"));
        assert_eq!(brl.len(), 1);
        assert_eq!(brl[0].name, "Brazilian Real");

        assert_eq!(filter_currencies(currencies(), None).len(), 3);
    }

    #[test]
    fn test_known_code_ignores_case() {
        assert!(is_known_code(" brl "));
        assert!(is_known_code("JPY"));
        assert!(!is_known_code("XYZ"));
    }

    #[test]
    fn test_parse_convert() {
        let cli = Cli::try_parse_from([
            "fx", "--locale", "pt-BR", "convert", "10", "--from", "USD", "--to", "BRL",
        ])
        .unwrap();
        assert_eq!(cli.locale.as_deref(), Some("pt-BR"));
        match cli.command {
            Commands::Convert { amount, from, to } => {
                assert_eq!(amount, 10.0);
                assert_eq!(from, "USD");
                assert_eq!(to, "BRL");
            }
            _ => panic!("expected convert"),
        }
    }

    #[test]
    fn test_parse_rates_only_list() {
        let cli = Cli::try_parse_from(["fx", "rates", "USD", "--only", "BRL,EUR", "--json"]).unwrap();
        assert!(cli.json);
        match cli.command {
            Commands::Rates { base, only } => {
                assert_eq!(base, "USD");
                assert_eq!(only, vec!["BRL", "EUR"]);
            }
            _ => panic!("expected rates"),
        }
    }

    #[test]
    fn test_parse_negative_format_value() {
        let cli = Cli::try_parse_from(["fx", "format", "-12.5", "EUR"]).unwrap();
        match cli.command {
            Commands::Format { value, code } => {
                assert_eq!(value, -12.5);
                assert_eq!(code, "EUR");
            }
            _ => panic!("expected format"),
        }
    }

    #[test]
    fn test_parse_negative_convert_amount() {
        let cli = Cli::try_parse_from(["fx", "convert", "-10", "--from", "USD", "--to", "BRL"])
            .unwrap();
        match cli.command {
            Commands::Convert { amount, .. } => assert_eq!(amount, -10.0),
            _ => panic!("expected convert"),
        }
    }

    #[test]
    fn test_convert_requires_codes() {
        assert!(Cli::try_parse_from(["fx", "convert", "10", "--from", "USD"]).is_err());
    }
}
