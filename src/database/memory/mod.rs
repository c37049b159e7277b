//! In-process store used by `serve --memory` and the test-suite.
//!
//! A unit of work holds the store's lock for its whole lifetime and edits a
//! private copy of the tables; commit publishes the copy, anything else
//! discards it. Foreign keys, cascades and unique pairs are checked here the
//! way the Postgres schema enforces them.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{Mutex, OwnedMutexGuard};

use super::models::*;
use super::repository::{CastingStore, CastingUnit, FyyurStore, FyyurUnit, HealthCheck};
use super::repository::{TriviaStore, TriviaUnit, UnitOfWork};
use super::DatabaseError;

mod casting;
mod fyyur;
mod trivia;

#[derive(Debug, Clone)]
struct Table<T> {
    next_id: i32,
    rows: BTreeMap<i32, T>,
}

impl<T: Clone> Table<T> {
    fn insert_with(&mut self, build: impl FnOnce(i32) -> T) -> T {
        let id = self.next_id;
        self.next_id += 1;
        let row = build(id);
        self.rows.insert(id, row.clone());
        row
    }

    fn get(&self, id: i32) -> Option<T> {
        self.rows.get(&id).cloned()
    }

    fn contains(&self, id: i32) -> bool {
        self.rows.contains_key(&id)
    }

    /// Overwrite an existing row; absent ids are left absent
    fn replace(&mut self, id: i32, row: T) {
        if let Some(slot) = self.rows.get_mut(&id) {
            *slot = row;
        }
    }

    fn remove(&mut self, id: i32) -> bool {
        self.rows.remove(&id).is_some()
    }

    /// Rows in id order
    fn all(&self) -> Vec<T> {
        self.rows.values().cloned().collect()
    }

    fn filter(&self, keep: impl Fn(&T) -> bool) -> Vec<T> {
        self.rows.values().filter(|row| keep(*row)).cloned().collect()
    }
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            next_id: 1,
            rows: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, Default)]
struct Tables {
    venues: Table<Venue>,
    artists: Table<Artist>,
    shows: Table<Show>,
    categories: Table<Category>,
    questions: Table<Question>,
    actors: Table<Actor>,
    movies: Table<Movie>,
    performances: BTreeSet<Performance>,
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
}

pub struct MemoryUnit {
    guard: OwnedMutexGuard<Tables>,
    working: Tables,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    async fn unit(&self) -> MemoryUnit {
        let guard = self.tables.clone().lock_owned().await;
        let working = (*guard).clone();
        MemoryUnit { guard, working }
    }
}

#[async_trait]
impl UnitOfWork for MemoryUnit {
    async fn commit(self: Box<Self>) -> Result<(), DatabaseError> {
        let MemoryUnit { mut guard, working } = *self;
        *guard = working;
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> Result<(), DatabaseError> {
        Ok(())
    }
}

#[async_trait]
impl FyyurStore for MemoryStore {
    async fn begin(&self) -> Result<Box<dyn FyyurUnit>, DatabaseError> {
        Ok(Box::new(self.unit().await))
    }
}

#[async_trait]
impl TriviaStore for MemoryStore {
    async fn begin(&self) -> Result<Box<dyn TriviaUnit>, DatabaseError> {
        Ok(Box::new(self.unit().await))
    }
}

#[async_trait]
impl CastingStore for MemoryStore {
    async fn begin(&self) -> Result<Box<dyn CastingUnit>, DatabaseError> {
        Ok(Box::new(self.unit().await))
    }
}

#[async_trait]
impl HealthCheck for MemoryStore {
    async fn ping(&self) -> Result<(), DatabaseError> {
        Ok(())
    }
}

fn missing(table: &str, id: i32) -> DatabaseError {
    DatabaseError::Constraint(format!("{} {} does not exist", table, id))
}
