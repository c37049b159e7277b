use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::info;

use super::repository::{CastingStore, CastingUnit, FyyurStore, FyyurUnit, HealthCheck};
use super::repository::{TriviaStore, TriviaUnit, UnitOfWork};
use super::{DatabaseError, DatabaseManager};
use crate::config::DatabaseConfig;

mod casting;
mod fyyur;
pub mod schema;
mod trivia;

/// Postgres-backed store for all three apps
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

/// One request's transaction
pub struct PgUnit {
    tx: Transaction<'static, Postgres>,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn connect(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        let store = Self::new(DatabaseManager::connect(config).await?);
        if config.install_schema {
            store.install_schema().await?;
        }
        Ok(store)
    }

    /// Create any missing tables
    pub async fn install_schema(&self) -> Result<(), DatabaseError> {
        for statement in schema::STATEMENTS {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        info!("Schema installed ({} statements)", schema::STATEMENTS.len());
        Ok(())
    }

    async fn unit(&self) -> Result<PgUnit, DatabaseError> {
        let tx = self.pool.begin().await?;
        Ok(PgUnit { tx })
    }
}

#[async_trait]
impl UnitOfWork for PgUnit {
    async fn commit(self: Box<Self>) -> Result<(), DatabaseError> {
        self.tx.commit().await.map_err(DatabaseError::from)
    }

    async fn rollback(self: Box<Self>) -> Result<(), DatabaseError> {
        self.tx.rollback().await.map_err(DatabaseError::from)
    }
}

#[async_trait]
impl FyyurStore for PgStore {
    async fn begin(&self) -> Result<Box<dyn FyyurUnit>, DatabaseError> {
        Ok(Box::new(self.unit().await?))
    }
}

#[async_trait]
impl TriviaStore for PgStore {
    async fn begin(&self) -> Result<Box<dyn TriviaUnit>, DatabaseError> {
        Ok(Box::new(self.unit().await?))
    }
}

#[async_trait]
impl CastingStore for PgStore {
    async fn begin(&self) -> Result<Box<dyn CastingUnit>, DatabaseError> {
        Ok(Box::new(self.unit().await?))
    }
}

#[async_trait]
impl HealthCheck for PgStore {
    async fn ping(&self) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
