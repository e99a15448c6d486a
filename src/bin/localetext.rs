//! localetext - Show prices, quantities and dates formatted for the locale
//!
//! Renders the main screen in the terminal, parses quantities typed in the
//! locale's number format and shows the help and locale settings screens.

use anyhow::{bail, Context, Result};
use chrono::Local;
use clap::{Arg, ArgAction, ArgMatches, Command};
use rust_i18n::t;
use std::io::{self, BufRead, Write};
use tracing_subscriber::EnvFilter;

use localetext::i18n::init_locale;
use localetext::locale::Locale;
use localetext::pricing::{parse_amount, PricingConfig, RateTable, DEFAULT_BASE_PRICE};
use localetext::quantity::parse_quantity;
use localetext::screen::{Navigation, Screen};

rust_i18n::i18n!("locales", fallback = "en");

fn build_cli() -> Command {
    Command::new("localetext")
        .about(t!("help.about").to_string())
        .version(env!("CARGO_PKG_VERSION"))
        .author(env!("CARGO_PKG_AUTHORS"))
        .arg(
            Arg::new("locale")
                .long("locale")
                .short('l')
                .help(t!("help.locale").to_string())
                .value_name("TAG")
                .global(true)
        )
        .arg(
            Arg::new("price")
                .long("price")
                .short('p')
                .help(t!("help.price").to_string())
                .value_name("AMOUNT")
                .global(true)
        )
        .arg(
            Arg::new("rate")
                .long("rate")
                .short('r')
                .help(t!("help.rate").to_string())
                .value_name("REGION=RATE")
                .action(ArgAction::Append)
                .global(true)
        )
        .arg(
            Arg::new("reference_locale")
                .long("reference-locale")
                .help(t!("help.reference_locale").to_string())
                .value_name("TAG")
                .default_value("en-US")
                .global(true)
        )
        .subcommand(Command::new("show").about(t!("help.show").to_string()))
        .subcommand(
            Command::new("price")
                .about(t!("help.price_cmd").to_string())
                .arg(
                    Arg::new("region")
                        .long("region")
                        .help(t!("help.region").to_string())
                        .value_name("REGION")
                )
        )
        .subcommand(
            Command::new("quantity")
                .about(t!("help.quantity_cmd").to_string())
                .arg(
                    Arg::new("text")
                        .help(t!("help.quantity_text").to_string())
                        .required(true)
                        .allow_hyphen_values(true)
                        .index(1)
                )
        )
        .subcommand(Command::new("interactive").about(t!("help.interactive").to_string()))
        .subcommand(Command::new("guide").about(t!("help.guide").to_string()))
        .subcommand(Command::new("settings").about(t!("help.settings").to_string()))
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn option_error(option: &str) -> String {
    t!("cli.invalid_option", option = option).to_string()
}

/// Build the pricing configuration from the global options
fn build_pricing(matches: &ArgMatches) -> Result<PricingConfig> {
    let base_price = match matches.get_one::<String>("price") {
        Some(raw) => parse_amount(raw).with_context(|| option_error("price"))?,
        None => DEFAULT_BASE_PRICE,
    };

    let mut rates = RateTable::defaults();
    if let Some(entries) = matches.get_many::<String>("rate") {
        for entry in entries {
            rates = rates.with_entry(entry).with_context(|| option_error("rate"))?;
        }
    }

    let reference_tag = matches
        .get_one::<String>("reference_locale")
        .map(String::as_str)
        .unwrap_or("en-US");
    let reference = Locale::parse(reference_tag).with_context(|| option_error("reference-locale"))?;

    PricingConfig::new(base_price, rates, reference).with_context(|| option_error("reference-locale"))
}

/// Read quantities from stdin until an empty line or end of input
fn run_interactive(mut screen: Screen) -> Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        println!("{}\n", screen.render());
        print!("{}", t!("cli.prompt"));
        io::stdout().flush()?;

        let line = match lines.next() {
            Some(line) => line.context(t!("cli.failed_read_input").to_string())?,
            None => break,
        };
        if line.trim().is_empty() {
            break;
        }

        // A rejected entry shows the hint on the next render
        if let Err(err) = screen.enter_quantity(&line) {
            tracing::debug!(%err, "quantity not accepted");
        }
        println!();
    }

    Ok(())
}

fn main() -> Result<()> {
    init_tracing();

    // Initialize message language from the system locale (LANG)
    let detected = Locale::detect();
    init_locale(&detected);

    let matches = build_cli().get_matches();

    let locale = match matches.get_one::<String>("locale") {
        Some(tag) => Locale::parse(tag).with_context(|| option_error("locale"))?,
        None => detected,
    };
    init_locale(&locale);

    let pricing = build_pricing(&matches)?;
    tracing::debug!(%locale, base_price = %pricing.base_price(), rates = pricing.rates().len(), "configured");

    match matches.subcommand() {
        Some(("price", sub)) => {
            let target = match sub.get_one::<String>("region") {
                Some(region) => Locale::new(locale.language(), Some(region.as_str()))
                    .with_context(|| option_error("region"))?,
                None => locale,
            };
            println!("{}", pricing.format_for(&target));
        }
        Some(("quantity", sub)) => {
            let text = sub
                .get_one::<String>("text")
                .map(String::as_str)
                .unwrap_or_default();
            match parse_quantity(text, &locale) {
                Ok(parsed) => println!("{}", parsed.formatted),
                Err(_) => bail!(
                    "{}",
                    t!("cli.invalid_quantity", input = text, hint = t!("quantity.hint"))
                ),
            }
        }
        Some(("interactive", _)) => {
            run_interactive(Screen::new(locale, pricing, Local::now().date_naive()))?;
        }
        Some(("guide", _)) => println!("{}", Navigation::Help.render(&locale)),
        Some(("settings", _)) => println!("{}", Navigation::LocaleSettings.render(&locale)),
        _ => {
            let screen = Screen::new(locale, pricing, Local::now().date_naive());
            println!("{}", screen.render());
        }
    }

    Ok(())
}
