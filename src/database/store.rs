use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};

use crate::error::{Error, Result};
use crate::models::{application::Application, candidate::Candidate, client::Client, user::User};
use crate::utils::time::now;

/// An entity kind that can live in a [`Table`].
///
/// `New` is the insert command and `Patch` the partial update; `merge` applies
/// only the fields present in the patch and refreshes `updatedAt` when the
/// entity has one.
pub trait Record: Clone {
    type New;
    type Patch;

    fn id(&self) -> i64;
    fn build(id: i64, new: Self::New, now: DateTime<Utc>) -> Self;
    fn merge(&mut self, patch: Self::Patch, now: DateTime<Utc>);
}

/// Id-keyed rows for one entity kind plus its id counter.
#[derive(Debug)]
pub struct Table<R> {
    rows: BTreeMap<i64, R>,
    last_id: i64,
}

impl<R> Default for Table<R> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            last_id: 0,
        }
    }
}

impl<R: Record> Table<R> {
    /// All rows in ascending id order.
    pub fn all(&self) -> Vec<R> {
        self.rows.values().cloned().collect()
    }

    pub fn get(&self, id: i64) -> Option<R> {
        self.rows.get(&id).cloned()
    }

    pub fn find<P>(&self, predicate: P) -> Option<R>
    where
        P: Fn(&R) -> bool,
    {
        self.rows.values().find(|row| predicate(row)).cloned()
    }

    pub fn insert(&mut self, new: R::New) -> R {
        // Ids come from the counter, not the map, so deleted ids are never reused.
        self.last_id += 1;
        let record = R::build(self.last_id, new, now());
        self.rows.insert(record.id(), record.clone());
        record
    }

    pub fn update(&mut self, id: i64, patch: R::Patch) -> Option<R> {
        let record = self.rows.get_mut(&id)?;
        record.merge(patch, now());
        Some(record.clone())
    }

    pub fn remove(&mut self, id: i64) -> bool {
        self.rows.remove(&id).is_some()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[derive(Debug, Default)]
pub struct Tables {
    pub users: Table<User>,
    pub clients: Table<Client>,
    pub candidates: Table<Candidate>,
    pub applications: Table<Application>,
}

/// In-memory store shared by every service. Nothing is persisted.
#[derive(Debug, Default)]
pub struct Store {
    tables: RwLock<Tables>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn read(&self) -> Result<RwLockReadGuard<'_, Tables>> {
        self.tables
            .read()
            .map_err(|_| Error::Internal("store lock poisoned".to_string()))
    }

    pub fn write(&self) -> Result<RwLockWriteGuard<'_, Tables>> {
        self.tables
            .write()
            .map_err(|_| Error::Internal("store lock poisoned".to_string()))
    }
}
