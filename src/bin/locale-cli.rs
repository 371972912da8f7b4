use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use serde_json::json;

use locale_gateway::config::{load_config, ConfigError, GatewayConfig};
use locale_gateway::locale::{locale_from_path, localize_path, LocaleSet};
use locale_gateway::routing::{ExclusionMatcher, LocaleResolver, RequestDescriptor};

#[derive(Parser)]
#[command(name = "locale-cli")]
#[command(about = "Offline tooling for the locale gateway", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show how the gateway would answer a request target
    Resolve {
        /// Path with optional query/fragment, e.g. "/pricing?ref=ad"
        target: String,
        #[arg(short, long)]
        accept_language: Option<String>,
        /// Value of the locale-preference cookie
        #[arg(long)]
        cookie: Option<String>,
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Localize a link the way page templates do
    Localize {
        path: String,
        #[arg(short, long, conflicts_with = "from")]
        locale: Option<String>,
        /// Path of the page the link appears on; its locale prefix is used
        #[arg(long)]
        from: Option<String>,
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Load and validate a configuration file
    CheckConfig { path: PathBuf },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::Resolve {
            target,
            accept_language,
            cookie,
            config,
        } => {
            let config = read_config(config.as_deref())?;
            let locales = Arc::new(LocaleSet::from_config(&config.locales)?);
            let resolver = LocaleResolver::new(locales, ExclusionMatcher::from_config(&config.exclusions));

            let descriptor = RequestDescriptor {
                target: &target,
                accept_language: accept_language.as_deref(),
                locale_cookie: cookie.as_deref(),
            };
            let resolution = resolver.resolve(&descriptor);
            println!("{}", serde_json::to_string_pretty(&resolution)?);
        }
        Commands::Localize {
            path,
            locale,
            from,
            config,
        } => {
            let config = read_config(config.as_deref())?;
            let locales = LocaleSet::from_config(&config.locales)?;
            let locale = link_locale(locale.as_deref(), from.as_deref(), &locales)?;
            println!("{}", localize_path(&path, locale, &locales));
        }
        Commands::CheckConfig { path } => match load_config(&path) {
            Ok(config) => {
                let summary = json!({
                    "valid": true,
                    "locales": config.locales.supported,
                    "default": config.locales.default,
                    "upstream": config.upstream.url,
                });
                println!("{}", serde_json::to_string_pretty(&summary)?);
            }
            Err(ConfigError::Validation(errors)) => {
                for error in &errors {
                    eprintln!("- {error}");
                }
                return Err(format!("{} validation error(s) in {}", errors.len(), path.display()).into());
            }
            Err(e) => return Err(e.into()),
        },
    }

    Ok(())
}

/// Pick the locale a link is rendered in: explicit, else the current page's, else the default.
fn link_locale<'a>(
    locale: Option<&'a str>,
    from: Option<&str>,
    locales: &'a LocaleSet,
) -> Result<&'a str, String> {
    match locale {
        Some(locale) if locales.contains(locale) => Ok(locale),
        Some(locale) => Err(format!("unsupported locale {locale:?}")),
        None => Ok(locale_from_path(from.unwrap_or("/"), locales)),
    }
}

fn read_config(path: Option<&Path>) -> Result<GatewayConfig, ConfigError> {
    match path {
        Some(path) => load_config(path),
        None => Ok(GatewayConfig::default()),
    }
}
