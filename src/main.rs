use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};

use pagewire::{
    infrastructure::{
        cli::{Cli, StoreKind},
        config::Config,
        dom::MemoryDom,
        markup::{build_document, PageMarkup},
        storage::{FileStore, MemoryStore, PreferenceStore},
        transport::HttpTransport,
    },
    integration::{event_source::EventSource, page_runtime::PageRuntime, script::load_script},
    utils::{initialize_logging, initialize_panic_handler},
};

async fn tokio_main() -> Result<()> {
    initialize_logging()?;

    initialize_panic_handler()?;

    let args = <Cli as Parser>::parse();

    // Load configuration (file-based)
    let mut config = Config::new()?;
    if let Some(origin) = args.origin {
        config.form.origin = origin;
    }

    let markup = match &args.markup {
        Some(path) => PageMarkup::from_file(path)
            .wrap_err_with(|| format!("loading markup from {}", path.display()))?,
        None => PageMarkup::sample(),
    };
    let script = match &args.events {
        Some(path) => load_script(path)
            .wrap_err_with(|| format!("loading events from {}", path.display()))?,
        None => Vec::new(),
    };

    let store: Box<dyn PreferenceStore> = match args.store {
        StoreKind::Memory => Box::new(MemoryStore::new()),
        StoreKind::File => Box::new(FileStore::in_data_dir()),
    };
    let transport = Arc::new(HttpTransport::new(&config.form.origin)?);

    let mut runtime: PageRuntime<MemoryDom> =
        PageRuntime::new(build_document(&markup)?, &config, store, transport);
    runtime.start()?;
    runtime.load()?;
    runtime.run(EventSource::script(script)).await?;
    runtime.shutdown();

    println!("{}", serde_json::to_string_pretty(&runtime.dom().snapshot())?);

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    if let Err(e) = tokio_main().await {
        eprintln!("{} error: Something went wrong", env!("CARGO_PKG_NAME"));
        Err(e)
    } else {
        Ok(())
    }
}
