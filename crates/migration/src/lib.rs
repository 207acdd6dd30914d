pub use sea_orm_migration::prelude::*;

mod m20240101_000000_entries;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20240101_000000_entries::Migration)]
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::{ConnectionTrait, Database, DbBackend, Statement};

    use super::*;

    async fn table_names(db: &sea_orm::DatabaseConnection) -> Vec<String> {
        let rows = db
            .query_all(Statement::from_string(
                DbBackend::Sqlite,
                "SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name",
            ))
            .await
            .unwrap();
        rows.iter()
            .map(|row| row.try_get::<String>("", "name").unwrap())
            .collect()
    }

    #[tokio::test]
    async fn up_creates_both_entry_tables() {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        Migrator::up(&db, None).await.unwrap();

        let tables = table_names(&db).await;
        assert!(tables.contains(&"ingressos".to_string()));
        assert!(tables.contains(&"registros".to_string()));
    }

    #[tokio::test]
    async fn up_keeps_existing_tables_and_rows() {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        db.execute_unprepared(
            "CREATE TABLE ingressos (code_scale TEXT PRIMARY KEY, code_project TEXT NOT NULL, \
             entry_date TEXT NOT NULL, entered_amount REAL NOT NULL)",
        )
        .await
        .unwrap();
        db.execute_unprepared(
            "INSERT INTO ingressos VALUES ('R-1', 'P-1', '2024-01-01', 10.0)",
        )
        .await
        .unwrap();

        Migrator::up(&db, None).await.unwrap();
        Migrator::up(&db, None).await.unwrap();

        let count = db
            .query_one(Statement::from_string(
                DbBackend::Sqlite,
                "SELECT COUNT(*) AS n FROM ingressos",
            ))
            .await
            .unwrap()
            .unwrap()
            .try_get::<i64>("", "n")
            .unwrap();
        assert_eq!(count, 1);
    }
}
