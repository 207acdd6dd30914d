use sea_orm::Database;
use sea_orm_migration::prelude::*;

const DEFAULT_URL: &str = "sqlite:./inflow.db?mode=rwc";
const TABLES: [&str; 2] = ["ingressos", "registros"];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let mut args = std::env::args().skip(1);
    let cmd = args.next().unwrap_or_else(|| "up".to_string());
    let db_url = args
        .next()
        .or_else(|| std::env::var("DATABASE_URL").ok())
        .unwrap_or_else(|| DEFAULT_URL.to_string());

    let db = Database::connect(&db_url).await?;

    match cmd.as_str() {
        "up" => migration::Migrator::up(&db, None).await?,
        "down" => migration::Migrator::down(&db, None).await?,
        "fresh" => migration::Migrator::fresh(&db).await?,
        "status" => migration::Migrator::status(&db).await?,
        // Report which entry tables exist without touching the schema.
        "check" => {
            let manager = SchemaManager::new(&db);
            let mut missing = 0;
            for table in TABLES {
                let present = manager.has_table(table).await?;
                println!("{table}: {}", if present { "present" } else { "missing" });
                missing += usize::from(!present);
            }
            if missing > 0 {
                std::process::exit(1);
            }
        }
        _ => {
            eprintln!("Usage: migration [up|down|fresh|status|check] [DATABASE_URL]");
            std::process::exit(2);
        }
    }

    db.close().await?;
    Ok(())
}
