// SPDX-License-Identifier: MPL-2.0
use localization_demo::client::{FilePreferenceStore, ForecastClient, LanguageService};
use localization_demo::config::{self, Config};
use localization_demo::error::{Error, Result};
use localization_demo::{api, logging};
use pico_args::Arguments;
use std::path::PathBuf;
use std::process::ExitCode;
use unic_langid::LanguageIdentifier;

const HELP: &str = "\
localization-demo

USAGE:
  localization-demo [serve] [OPTIONS]
  localization-demo forecast [OPTIONS]

SERVE OPTIONS:
  --bind ADDR          Address to bind (default from settings.toml)
  --port PORT          Port to listen on
  --resources DIR      Load <scope>/<locale>.ftl tables from DIR

FORECAST OPTIONS:
  --lang TAG           Switch to and remember a language (en-US, hu)
  --api URL            API base address
  --data-dir DIR       Directory holding the remembered language

COMMON OPTIONS:
  --config-dir DIR     Directory containing settings.toml
  -h, --help           Print help
";

#[tokio::main]
async fn main() -> ExitCode {
    logging::init();

    let mut args = Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        print!("{HELP}");
        return ExitCode::SUCCESS;
    }

    let result = match args.subcommand() {
        Ok(command) => match command.as_deref().unwrap_or("serve") {
            "serve" => run_serve(args).await,
            "forecast" => run_forecast(args).await,
            other => Err(Error::Config(format!("unknown command: {other}"))),
        },
        Err(error) => Err(error.into()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::error!(%error, "command failed");
            ExitCode::FAILURE
        }
    }
}

async fn run_serve(mut args: Arguments) -> Result<()> {
    let config_dir: Option<PathBuf> = args.opt_value_from_str("--config-dir")?;
    let bind: Option<String> = args.opt_value_from_str("--bind")?;
    let port: Option<u16> = args.opt_value_from_str("--port")?;
    let resources: Option<PathBuf> = args.opt_value_from_str("--resources")?;
    reject_unused(args)?;

    let mut config = load_config(config_dir);
    if let Some(bind) = bind {
        config.server.bind_address = bind;
    }
    if let Some(port) = port {
        config.server.port = port;
    }
    if resources.is_some() {
        config.localization.resources_dir = resources;
    }

    api::serve(&config).await
}

async fn run_forecast(mut args: Arguments) -> Result<()> {
    let config_dir: Option<PathBuf> = args.opt_value_from_str("--config-dir")?;
    let lang: Option<LanguageIdentifier> = args.opt_value_from_str("--lang")?;
    let api_address: Option<String> = args.opt_value_from_str("--api")?;
    let data_dir: Option<PathBuf> = args.opt_value_from_str("--data-dir")?;
    reject_unused(args)?;

    let config = load_config(config_dir);
    let store = FilePreferenceStore::in_data_dir(data_dir)
        .ok_or_else(|| Error::Config("no data directory available".to_string()))?;

    let mut language = LanguageService::new(store);
    language.initialize();
    if let Some(lang) = lang {
        if !language.is_supported(&lang) {
            let supported: Vec<String> = language
                .supported_languages()
                .iter()
                .map(|(tag, name)| format!("{tag} ({name})"))
                .collect();
            return Err(Error::Locale(format!(
                "{lang} is not supported; choose one of: {}",
                supported.join(", ")
            )));
        }
        language.set_language(lang);
    }

    let address = api_address.unwrap_or(config.client.api_base_address);
    let client = ForecastClient::new(&address)?;
    let forecasts = client.fetch_forecast(&language).await?;

    println!("Language: {}", language.current_language());
    for forecast in forecasts {
        println!(
            "{}  {:>4} °C  {:>4} °F  {}",
            forecast.date,
            forecast.temperature_c,
            forecast.temperature_f,
            forecast.summary.unwrap_or_default()
        );
    }
    Ok(())
}

fn load_config(config_dir: Option<PathBuf>) -> Config {
    let (config, warning) = config::load_with_override(config_dir);
    if let Some(warning) = warning {
        tracing::warn!(%warning, "using default configuration");
    }
    config
}

fn reject_unused(args: Arguments) -> Result<()> {
    let unused = args.finish();
    if unused.is_empty() {
        return Ok(());
    }
    Err(Error::Config(format!("unexpected arguments: {:?}", unused)))
}
