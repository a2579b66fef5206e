use std::path::{Path, PathBuf};

use anyhow::Context;
use sqlx::{
    Sqlite,
    pool::PoolConnection,
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions, SqliteSynchronous},
};
use tracing::info;

pub(super) struct StoreState {
    db_file: PathBuf,
    pool: SqlitePool,
}

impl std::fmt::Debug for StoreState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreState")
            .field("db_file", &self.db_file)
            .field("closed", &self.pool.is_closed())
            .finish()
    }
}

impl StoreState {
    pub(super) async fn open<P: AsRef<Path>>(db_file: P) -> anyhow::Result<Self> {
        let db_file = db_file.as_ref().to_path_buf();
        if let Some(parent) = db_file.parent().filter(|p| !p.as_os_str().is_empty()) {
            if !parent.is_dir() {
                anyhow::bail!("Store directory does not exist: {:?}", parent);
            }
        }

        let connect_opts = SqliteConnectOptions::new()
            .filename(&db_file)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(connect_opts)
            .await
            .with_context(|| format!("Failed to open store {:?}", db_file))?;
        sqlx::migrate!("./migrations").run(&pool).await?;

        info!(path = ?db_file, "document store opened");
        Ok(Self { db_file, pool })
    }

    pub(super) async fn conn(&self) -> anyhow::Result<PoolConnection<Sqlite>> {
        Ok(self.pool.acquire().await?)
    }

    /// Checkpoint the WAL and close every pooled connection. Further use fails.
    pub(super) async fn close(&self) -> anyhow::Result<()> {
        if self.pool.is_closed() {
            return Ok(());
        }
        sqlx::query("PRAGMA wal_checkpoint(TRUNCATE);")
            .execute(&self.pool)
            .await?;
        self.pool.close().await;
        info!(path = ?self.db_file, "document store closed");
        Ok(())
    }

    pub(super) fn is_closed(&self) -> bool {
        self.pool.is_closed()
    }
}
