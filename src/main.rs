mod cli;

use tvindex::catalog::{EpisodeOrder, FieldValue, Show};
use tvindex::clock::SystemClock;
use tvindex::config;
use tvindex::provider::TimeoutBreaker;
use tvindex::session::Catalog;
use tvindex_common::{Language, ShowId, ShowKey};

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use std::sync::Arc;
use std::time::Duration;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "tvindex=debug,tvindex_common=debug".to_string()
        } else {
            "tvindex=warn".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    match &cli.command {
        Commands::Validate {
            config: config_path,
        } => {
            let path = config_path.clone().or_else(|| cli.config.clone());
            validate_config(path.as_deref())
        }
        Commands::Version => {
            println!("tvindex {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        _ => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(run_lookup(&cli))
        }
    }
}

fn open_catalog(cli: &Cli) -> Result<Catalog> {
    let mut config = config::load_config_or_default(cli.config.as_deref())?;

    if let Some(code) = &cli.language {
        config.catalog.language = Language::parse(code)?;
    }
    if cli.dvd_order {
        config.catalog.episode_order = EpisodeOrder::Dvd;
    }
    config.catalog.banners |= cli.banners;
    config.catalog.actors |= cli.actors;
    config.catalog.force_connect |= cli.force_connect;

    let breaker = Arc::new(TimeoutBreaker::new(
        Duration::from_secs(config.api.cool_down_secs),
        Arc::new(SystemClock),
    ));
    Ok(Catalog::from_config(&config, breaker)?)
}

async fn run_lookup(cli: &Cli) -> Result<()> {
    let key = match &cli.command {
        Commands::Show { key, .. }
        | Commands::Episode { key, .. }
        | Commands::Search { key, .. }
        | Commands::Aired { key, .. } => show_key(key, cli.id)?,
        Commands::Validate { .. } | Commands::Version => return Ok(()),
    };
    let catalog = open_catalog(cli)?;

    match &cli.command {
        Commands::Show { json, .. } => {
            let show = lookup(&catalog, &key).await?;
            if *json {
                println!("{}", serde_json::to_string_pretty(show.data())?);
            } else {
                print_show(&show);
            }
        }
        Commands::Episode {
            season,
            episode,
            field,
            ..
        } => {
            let show = lookup(&catalog, &key).await?;
            let episode = show.season(*season)?.episode(*episode)?;
            match field {
                Some(field) => println!("{}", episode.get(field)?),
                None => {
                    println!("{episode}");
                    if let Some(aired) = episode.first_aired() {
                        println!("  Aired: {aired}");
                    }
                    if let Some(overview) = episode.overview() {
                        println!("  {overview}");
                    }
                }
            }
        }
        Commands::Search { term, field, .. } => {
            let show = lookup(&catalog, &key).await?;
            let hits = show.search(term, field.as_deref())?;
            if hits.is_empty() {
                println!("No episodes match {term:?}");
            }
            for hit in hits {
                println!("{hit}");
            }
        }
        Commands::Aired { date, .. } => {
            let show = lookup(&catalog, &key).await?;
            for hit in show.aired_on(date)? {
                println!("{hit}");
            }
        }
        Commands::Validate { .. } | Commands::Version => {}
    }

    Ok(())
}

fn show_key(key: &str, by_id: bool) -> Result<ShowKey> {
    if by_id {
        let id: ShowId = key
            .parse()
            .with_context(|| format!("Not a series id: {key:?}"))?;
        Ok(ShowKey::Id(id))
    } else {
        Ok(ShowKey::name(key))
    }
}

async fn lookup(catalog: &Catalog, key: &ShowKey) -> Result<Show> {
    tracing::info!("Looking up {}", key);
    Ok(catalog.lookup(key.clone()).await?)
}

fn print_show(show: &Show) {
    println!("{show}");
    for field in ["firstAired", "network", "status", "overview"] {
        match show.get(field) {
            Ok(FieldValue::Null) | Err(_) => {}
            Ok(value) => println!("  {field}: {value}"),
        }
    }
    for season in show.seasons() {
        println!("  {season}");
    }
    let actors = show.actors();
    if !actors.is_empty() {
        println!("  Actors:");
        for actor in actors {
            match actor.role() {
                Some(role) => println!("    {} as {}", actor.name().unwrap_or("?"), role),
                None => println!("    {}", actor.name().unwrap_or("?")),
            }
        }
    }
}

fn validate_config(path: Option<&std::path::Path>) -> Result<()> {
    match path {
        Some(p) => {
            println!("Validating config: {:?}", p);
            let config = config::load_config(p)?;
            println!("✓ Configuration is valid");
            println!("  API: {}", config.api.api_url);
            println!("  API key set: {}", config.api.apikey.is_some());
            println!("  Language: {}", config.catalog.language);
            println!("  Episode order: {:?}", config.catalog.episode_order);
            println!(
                "  Cache: {} shows, sweep every {}s",
                config.cache.capacity, config.cache.sweep_interval_secs
            );
        }
        None => {
            println!("No config file specified, using defaults");
            let config = config::Config::default();
            println!("Default config:");
            println!("  API: {}", config.api.api_url);
            println!("  Language: {}", config.catalog.language);
        }
    }

    Ok(())
}
