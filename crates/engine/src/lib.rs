use sea_orm::{
    ConnectionTrait, DatabaseConnection, FromQueryResult, TransactionTrait,
    sea_query::{Alias, Query},
};

pub use entry::{DATE_FORMAT, EntryColumn, EntryKind, EntryRecord, EntryRow};
pub use error::EngineError;
pub use ledger::Ledger;
pub use range::{DateRange, shift_date};
pub use report::{DailyTotal, Report};

mod entry;
mod error;
mod ledger;
mod range;
mod report;

type ResultEngine<T> = Result<T, EngineError>;

/// Read-only gateway over the entry tables.
///
/// The connection is created by the caller and handed over through
/// [`Store::builder`]; the store never opens one on its own.
#[derive(Debug)]
pub struct Store {
    database: DatabaseConnection,
}

impl Store {
    /// Return a builder for `Store`. Help to build the struct.
    pub fn builder() -> StoreBuilder {
        StoreBuilder::default()
    }

    /// Fetch every row of `kind`, unfiltered and in store order.
    ///
    /// The query runs inside its own transaction. On failure the transaction
    /// is dropped, which rolls it back and returns the connection to the pool.
    pub async fn fetch(&self, kind: EntryKind) -> ResultEngine<Vec<EntryRow>> {
        let backend = self.database.get_database_backend();
        let query = Query::select()
            .columns(EntryColumn::ALL)
            .from(Alias::new(kind.table_name()))
            .to_owned();

        let db_tx = self.database.begin().await?;
        let rows = EntryRow::find_by_statement(backend.build(&query))
            .all(&db_tx)
            .await?;
        db_tx.commit().await?;

        tracing::debug!(table = kind.table_name(), rows = rows.len(), "fetched entries");
        Ok(rows)
    }

    /// Fetch `kind` and parse it into a [`Ledger`].
    pub async fn load(&self, kind: EntryKind) -> ResultEngine<Ledger> {
        let rows = self.fetch(kind).await?;
        Ledger::from_rows(kind, rows)
    }

    /// Close the underlying connection. Call once at shutdown.
    pub async fn close(self) -> ResultEngine<()> {
        self.database.close().await?;
        Ok(())
    }
}

#[derive(Default)]
pub struct StoreBuilder {
    database: Option<DatabaseConnection>,
}

impl StoreBuilder {
    /// Pass the required database
    pub fn database(mut self, db: DatabaseConnection) -> StoreBuilder {
        self.database = Some(db);
        self
    }

    /// Construct `Store`
    pub fn build(self) -> ResultEngine<Store> {
        let database = self.database.ok_or(EngineError::MissingDatabase)?;
        Ok(Store { database })
    }
}
