use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use chrono::Utc;
use clap::{ArgGroup, Parser, Subcommand};
use uuid::Uuid;

use cellar_etl::config::Settings;
use cellar_etl::extractors::SampleExtractor;
use cellar_etl::generator::CatalogGenerator;
use cellar_etl::services::{CatalogService, Collector};
use cellar_etl::storage::{JsonWriter, SupabaseStore};
use cellar_etl::utils::init_tracing;

#[derive(Parser)]
#[command(name = "cellar", about = "Wine and spirits catalog ingestion")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Check that the catalog store is reachable
    Check,
    /// Print the number of product rows
    Count,
    /// List a few product rows
    Sample {
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
    /// Generate a synthetic catalog and ingest it under the marketplace seller
    Generate {
        #[arg(long)]
        wines: Option<usize>,
        #[arg(long)]
        spirits: Option<usize>,
        #[arg(long)]
        seed: Option<u64>,
        /// Generate without touching the store
        #[arg(long)]
        dry_run: bool,
        /// Also write the batch to a JSON file under the export directory
        #[arg(long)]
        export: bool,
    },
    /// Collect the curated sample listings over the configured queries
    Collect {
        #[arg(long)]
        dry_run: bool,
    },
    /// Delete product rows
    #[command(group(ArgGroup::new("scope").required(true).args(["all", "generated"])))]
    Clear {
        #[arg(long)]
        all: bool,
        #[arg(long)]
        generated: bool,
    },
}

fn catalog_service(settings: &Settings) -> Result<CatalogService> {
    let store = SupabaseStore::new(&settings.store)?;
    Ok(CatalogService::new(Arc::new(store), settings.ingest.clone()))
}

/// Resolves where a generated batch will land. Runs before generation so a
/// missing or unreachable store fails without doing any work.
async fn generation_target(
    settings: &Settings,
    dry_run: bool,
) -> Result<Option<(CatalogService, Uuid)>> {
    if dry_run {
        return Ok(None);
    }
    let service = catalog_service(settings)?;
    let seller_id = service.ensure_marketplace_seller().await?;
    Ok(Some((service, seller_id)))
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing("cellar_etl=info")?;

    let cli = Cli::parse();
    let settings = Settings::new()?;

    match cli.command {
        Command::Check => {
            let catalog = catalog_service(&settings)?;
            match catalog.test_connection().await {
                Ok(()) => println!("Connection OK"),
                Err(e) => {
                    println!("Connection failed: {}", e);
                    std::process::exit(1);
                }
            }
        }
        Command::Count => {
            let catalog = catalog_service(&settings)?;
            println!("Total products: {}", catalog.count_products().await?);
        }
        Command::Sample { limit } => {
            let catalog = catalog_service(&settings)?;
            let products = catalog.sample_products(limit).await?;
            println!("Sample products ({}):", products.len());
            for (index, product) in products.iter().enumerate() {
                println!("{}. {}", index + 1, product);
            }
        }
        Command::Generate {
            wines,
            spirits,
            seed,
            dry_run,
            export,
        } => {
            let wines = wines.unwrap_or(settings.generator.wines);
            let spirits = spirits.unwrap_or(settings.generator.spirits);
            let mut generator = CatalogGenerator::with_seed(seed.or(settings.generator.seed));

            let target = generation_target(&settings, dry_run).await?;

            let start_time = Instant::now();
            let catalog = generator.generate_catalog(wines, spirits);
            println!("Generated {} wines and {} spirits", wines, spirits);

            if export {
                let filename =
                    format!("catalog_{}.json", Utc::now().format("%Y-%m-%d_%H-%M-%S"));
                let mut writer =
                    JsonWriter::create(&settings.export.output_dir, &filename).await?;
                for record in &catalog {
                    writer.write_record(record).await?;
                }
                let path = writer.path().display().to_string();
                let written = writer.finish().await?;
                println!("Exported {} records to {}", written, path);
            }

            let Some((service, seller_id)) = target else {
                for record in catalog.iter().take(5) {
                    println!(
                        "  {} [{}] - ${:.2}",
                        record.name, record.product_type, record.base_price
                    );
                }
                println!("Dry run: nothing written to the store");
                return Ok(());
            };

            let outcome = service.ingest(catalog, seller_id).await;

            println!("\nGeneration Summary:");
            println!("Seller: {}", seller_id);
            println!("Inserted: {}", outcome.success);
            println!("Failed: {}", outcome.failed);
            println!("Success Rate: {:.1}%", outcome.success_rate());
            println!("Total Time: {:.2} seconds", start_time.elapsed().as_secs_f64());
        }
        Command::Collect { dry_run } => {
            let collector =
                Collector::new(Arc::new(SampleExtractor::new()), settings.collect.clone());
            let report = if dry_run {
                collector.run(None).await?
            } else {
                let service = catalog_service(&settings)?;
                collector.run(Some(&service)).await?
            };

            println!("\nCollection Summary:");
            println!("Queries Run: {}", report.queries_run);
            println!("Records Collected: {}", report.collected);
            println!(
                "Extraction: {} attempted, {} successful, {} failed",
                report.extraction.attempted, report.extraction.successful, report.extraction.failed
            );
            if !dry_run {
                println!("Ingestion: {}", report.ingestion);
            }
        }
        Command::Clear { all, generated } => {
            let catalog = catalog_service(&settings)?;
            if all {
                println!("Removed {} products", catalog.clear_all_products().await?);
            } else if generated {
                println!(
                    "Removed {} generated products",
                    catalog.clear_generated_products().await?
                );
            }
        }
    }

    Ok(())
}
