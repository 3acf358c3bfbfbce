use anyhow::Result;
use dialoguer::Input;
use spell_ring::{
    catalog::{self, CatalogStore},
    config::ConfigLoader,
    console::{Console, Reply, HELP},
    console::render::ring_view,
    import::import_csv_file,
    logging::init_logger,
    ring::{load_ring, Ring},
    state::SessionManager,
};
use std::path::PathBuf;
use tokio::io::{stdin, AsyncBufReadExt, BufReader};
use tracing::{error, info, warn};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() -> Result<()> {
    // Load or create configuration
    let config_loader = ConfigLoader::new();
    let mut config = config_loader.load()?;

    init_logger(config.log_dir.as_deref())?;
    info!("Starting Ring of Spell Storing v{}", VERSION);
    info!("Configuration: {:?}", config_loader.path());

    // Prompt for the spell library if not set
    if config.catalog_csv.is_none() {
        let path: String = Input::new()
            .with_prompt("Path to your spell CSV")
            .default("data/spells.csv".to_string())
            .interact_text()?;
        config.catalog_csv = Some(PathBuf::from(path));
        config_loader.save(&config)?;
    }

    let mut store = CatalogStore::new();
    if let Some(path) = &config.catalog_csv {
        match import_csv_file(&mut store, path) {
            Ok(summary) => info!("{}", summary.message()),
            Err(e) => warn!("Could not import {:?}: {}. Starting with an empty library", path, e),
        }
    }
    let catalog = catalog::shared(store);

    // Restore the ring from the last run
    let ring_path = config.ring_state_path();
    let ring = match ring_path.as_deref().map(load_ring) {
        Some(Ok(Some(ring))) => ring,
        Some(Err(e)) => {
            warn!("{:#}; starting with an empty ring", e);
            Ring::new()
        }
        Some(Ok(None)) | None => Ring::new(),
    };

    let sessions = SessionManager::new();
    println!("{}", ring_view(&ring));
    let session = sessions.open_with(ring);

    let mut console = Console::new(
        catalog,
        sessions.clone(),
        session,
        config.initial_filter(),
    )
    .with_width(config.description_width);
    if let Some(path) = ring_path {
        console = console.persist_to(path);
    }

    println!("{}", HELP);

    let mut lines = BufReader::new(stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let line = match line {
                    Ok(Some(line)) => line,
                    Ok(None) => break,
                    Err(e) => {
                        error!("Failed to read console input: {}", e);
                        break;
                    }
                };

                match console.handle_line(&line) {
                    Ok(Some(Reply::Text(text))) => println!("{}", text),
                    Ok(Some(Reply::Quit)) => break,
                    Ok(None) => {}
                    Err(e) => {
                        error!("{:#}", e);
                        break;
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted");
                break;
            }
        }
    }

    sessions.close(&session);
    info!("Goodbye");
    Ok(())
}
