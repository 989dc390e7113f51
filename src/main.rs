#![deny(warnings)]

use std::time::Duration;

use clap::Parser;
use color_eyre::eyre::{ensure, eyre, Result, WrapErr};
use thousands::Separable;

use listkeeper::{
    domain::{entity::Record, filters::FilterSet},
    infrastructure::{
        cli::{Cli, OutputFormat},
        config::Config,
        fixture::FixtureLoader,
    },
    integration::store::IncrementalListStore,
    utils::{initialize_logging, initialize_panic_handler},
};

type FixtureStore = IncrementalListStore<Record, FilterSet, FixtureLoader>;

fn report_page(store: &FixtureStore, page: usize) {
    let total = store.total().unwrap_or_default();
    println!(
        "page {page}: {} of {} loaded",
        store.list().len().separate_with_commas(),
        total.separate_with_commas()
    );
}

async fn tokio_main() -> Result<()> {
    let log_path = initialize_logging()?;

    initialize_panic_handler()?;

    let args = <Cli as Parser>::parse();

    let mut config = Config::new()?;
    if let Some(limit) = args.limit {
        ensure!(limit > 0, "--limit must be greater than zero");
        config.list.limit = limit;
    }

    let fixture = args
        .fixture
        .clone()
        .or_else(|| config.fixture.clone())
        .ok_or_else(|| eyre!("no fixture given; pass --fixture or set `fixture` in the config file"))?;
    let loader = FixtureLoader::from_path(&fixture)?
        .with_latency(Duration::from_millis(args.latency_ms));
    tracing::info!(
        fixture = %fixture.display(),
        records = loader.records().len(),
        limit = config.list.limit,
        "starting"
    );

    let mut store: FixtureStore = IncrementalListStore::new(loader, config.list.clone());
    store.init(Some(args.filter_set()));
    store.settle().await;

    let mut pages = 1;
    let summary = args.output == OutputFormat::Summary;
    if summary {
        report_page(&store, pages);
    }

    while store.has_more() && store.last_error().is_none() {
        if args.max_pages.is_some_and(|max| pages >= max) {
            break;
        }
        store.paginate();
        store.settle().await;
        pages += 1;
        if summary {
            report_page(&store, pages);
        }
    }

    if let Some(error) = store.last_error().cloned() {
        store.teardown();
        return Err(error).wrap_err_with(|| format!("see {} for details", log_path.display()));
    }

    match args.output {
        OutputFormat::Summary => {
            if store.has_no_data() {
                println!("no matching records");
            } else if store.has_more() {
                println!("stopped after {pages} pages; more records available");
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(store.list())?);
        }
    }

    store.teardown();
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
