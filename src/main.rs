use anyhow::Context;
use clap::Parser;
use preml::{cli, commands, config};
use cli::{Cli, Commands};
use config::Config;
use preml_common::{arcsec_to_deg, SkyCoord};

fn init_logger(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter)).init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    let mut config = Config::load().context("failed to load configuration")?;
    let settings = config.clone().with_env_overrides();
    let connect = || {
        log::debug!(
            "main: Action=Connecting, api={}, inference={}",
            settings.api_base_url,
            settings.inference_base_url
        );
        settings.client()
    };

    match cli.command {
        Commands::Search { coords, radius_arcsec } => {
            let radius = radius_arcsec.map(arcsec_to_deg).unwrap_or_else(|| settings.search_radius_deg());
            commands::search(&connect()?, &coords, radius).await?;
        }

        Commands::Details { object_id } => {
            commands::details(&connect()?, &object_id).await?;
        }

        Commands::Cutouts { ra, dec, bands, save_dir } => {
            let prefix = format!("{:.6}_{:.6}", ra, dec);
            commands::cutouts(&connect()?, SkyCoord::new(ra, dec), &bands, save_dir.as_deref(), &prefix).await?;
        }

        Commands::Predict { magnitudes, object_id } => {
            let client = connect()?;
            let values = match object_id {
                Some(id) => {
                    let details = commands::details(&client, &id).await?;
                    println!();
                    (&details).into()
                }
                None => commands::magnitudes_from_args(&magnitudes)?,
            };
            commands::predict(&client, &values).await?;
        }

        Commands::Inspect { coords, radius_arcsec, save_dir } => {
            let radius = radius_arcsec.map(arcsec_to_deg).unwrap_or_else(|| settings.search_radius_deg());
            commands::inspect(&connect()?, &coords, radius, save_dir.as_deref()).await?;
        }

        Commands::Config { set_api_url, set_inference_url, show } => {
            let changed = commands::configure(
                &mut config,
                set_api_url.as_deref(),
                set_inference_url.as_deref(),
                show,
            )?;
            if changed {
                config.save().context("failed to save configuration")?;
                println!("✔ Saved to {}", Config::config_path()?.display());
            }
        }
    }

    Ok(())
}
