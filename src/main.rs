use anyhow::Result;
use sports_staging_loader::{
    cli::{Cli, Commands},
    filter::resolve_entities,
    loader::{load_staging_dir, LoadReport},
    schema::{entity_names, ALL_ENTITIES},
    store::{ProductionStore, SqliteStore},
};
use std::time::Instant;

fn main() -> Result<()> {
    let cli = Cli::parse_args();

    match cli.command {
        Commands::Load {
            staging_dir,
            warehouse_db,
            include,
            exclude,
            json,
        } => {
            let start = Instant::now();

            let entities = resolve_entities(include, exclude)?;
            let mut store = SqliteStore::open(&warehouse_db)?;

            println!("\nLoading staging data from {:?}...", staging_dir);
            let reports = load_staging_dir(&staging_dir, &mut store, &entities)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&reports)?);
            } else {
                print_reports(&reports);
            }

            let accepted: u64 = reports.iter().map(|r| r.accepted_count()).sum();
            let rejected: u64 = reports.iter().map(|r| r.rejected_count()).sum();
            let elapsed = start.elapsed();
            println!(
                "\nLoaded {:?}: {} rows accepted, {} rejected in {:.1}s",
                warehouse_db,
                accepted,
                rejected,
                elapsed.as_secs_f64()
            );
        }

        Commands::Counts { warehouse_db } => {
            let store = SqliteStore::open(&warehouse_db)?;
            println!("Warehouse row counts:\n");
            for entity in ALL_ENTITIES {
                let count = store.count(entity.name)?;
                println!("  {:10} {:>10}", entity.name, count);
            }
        }

        Commands::ListEntities => {
            println!("Entities in load order:\n");
            for name in entity_names() {
                println!("  {}", name);
            }
        }
    }

    Ok(())
}

fn print_reports(reports: &[LoadReport]) {
    for report in reports {
        println!(
            "\n{}: {} accepted, {} rejected",
            report.entity,
            report.accepted_count(),
            report.rejected_count()
        );
        for rejection in report.rejections() {
            println!("  {}", rejection);
        }
    }
}
