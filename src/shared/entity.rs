//! Generic CRUD over a stored collection of numbered, soft-deletable records.
//!
//! Every operation reads the full collection, mutates it in memory and
//! writes it back through [`Collection::mutate`].

use std::cmp::Ordering;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use utoipa::ToSchema;

use crate::core::error::{AppError, Result};
use crate::modules::storage::{Collection, StorageBackend};
use crate::shared::filtering::ListQuery;

/// A stored record with a numeric id and an `active` flag
pub trait Entity: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Human readable name used in error messages
    const LABEL: &'static str;

    fn id(&self) -> i64;
    fn set_id(&mut self, id: i64);

    fn is_active(&self) -> bool;
    fn set_active(&mut self, active: bool);

    fn touch(&mut self, now: DateTime<Utc>);

    /// `term` is already lowercased
    fn matches(&self, term: &str) -> bool;

    fn is_featured(&self) -> bool {
        false
    }

    fn category(&self) -> Option<&str> {
        None
    }

    fn set_order(&mut self, _order: i32) {}

    /// Listing order; defaults to ascending id
    fn ordering(a: &Self, b: &Self) -> Ordering {
        a.id().cmp(&b.id())
    }
}

/// Next id for a collection: one past the largest existing id
pub fn next_id<T: Entity>(records: &[T]) -> i64 {
    records.iter().map(Entity::id).max().unwrap_or(0) + 1
}

/// Active and total record counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct EntityCounts {
    pub total: i64,
    pub active: i64,
}

pub struct EntityStore<T> {
    collection: Collection<T>,
}

impl<T: Entity> EntityStore<T> {
    pub fn new(backend: Arc<dyn StorageBackend>, name: &str) -> Self {
        Self {
            collection: Collection::new(backend, name),
        }
    }

    pub fn collection(&self) -> &Collection<T> {
        &self.collection
    }

    /// Every record, soft-deleted ones included, in listing order
    pub async fn all(&self) -> Result<Vec<T>> {
        let mut records = self.collection.all().await?;
        records.sort_by(T::ordering);
        Ok(records)
    }

    /// Records matching `predicate`, in listing order
    pub async fn filter(&self, predicate: impl Fn(&T) -> bool) -> Result<Vec<T>> {
        Ok(self.all().await?.into_iter().filter(predicate).collect())
    }

    /// Apply status, category and search filters, then paginate
    pub async fn list(&self, query: &ListQuery) -> Result<(Vec<T>, i64)> {
        let records = self.matching(query).await?;
        Ok(query.pagination().apply(records))
    }

    /// Every record passing the status, category and search filters, unpaged
    pub async fn matching(&self, query: &ListQuery) -> Result<Vec<T>> {
        let term = query.search_term();
        let category = query.category_filter();

        self.filter(|r| {
            query.status.accepts(r.is_active(), r.is_featured())
                && category.is_none_or(|c| r.category() == Some(c))
                && term.as_deref().is_none_or(|t| r.matches(t))
        })
        .await
    }

    /// Case-insensitive text search across all records
    pub async fn search(&self, text: &str) -> Result<Vec<T>> {
        let term = text.trim().to_lowercase();
        if term.is_empty() {
            return self.all().await;
        }
        self.filter(|r| r.matches(&term)).await
    }

    /// Find by id, including soft-deleted records
    pub async fn get_by_id(&self, id: i64) -> Result<T> {
        self.collection
            .all()
            .await?
            .into_iter()
            .find(|r| r.id() == id)
            .ok_or_else(|| not_found::<T>(id))
    }

    /// Allocate the next id and insert the record built by `build`.
    ///
    /// `build` sees the current records so it can enforce uniqueness rules.
    pub async fn create(
        &self,
        build: impl FnOnce(&[T], i64, DateTime<Utc>) -> Result<T>,
    ) -> Result<T> {
        self.collection
            .mutate(|records| {
                let id = next_id(records);
                let mut record = build(records, id, Utc::now())?;
                record.set_id(id);
                records.push(record.clone());
                Ok(record)
            })
            .await
    }

    /// Apply `change` to the record with `id`; `change` also sees all records
    pub async fn update(
        &self,
        id: i64,
        change: impl FnOnce(&mut T, &[T]) -> Result<()>,
    ) -> Result<T> {
        self.collection
            .mutate(|records| {
                let index = records
                    .iter()
                    .position(|r| r.id() == id)
                    .ok_or_else(|| not_found::<T>(id))?;

                let mut record = records[index].clone();
                change(&mut record, records)?;
                record.set_id(id);
                record.touch(Utc::now());
                records[index] = record.clone();
                Ok(record)
            })
            .await
    }

    /// Mark inactive; the record stays retrievable by id
    pub async fn soft_delete(&self, id: i64) -> Result<T> {
        self.set_active(id, false).await
    }

    pub async fn restore(&self, id: i64) -> Result<T> {
        self.set_active(id, true).await
    }

    async fn set_active(&self, id: i64, active: bool) -> Result<T> {
        self.update(id, |record, _| {
            record.set_active(active);
            Ok(())
        })
        .await
    }

    /// Set `order` to the 1-based position of each id; unknown ids are skipped
    pub async fn reorder(&self, ids: &[i64]) -> Result<usize> {
        self.collection
            .mutate(|records| {
                let now = Utc::now();
                let mut moved = 0;
                for (index, id) in ids.iter().enumerate() {
                    if let Some(record) = records.iter_mut().find(|r| r.id() == *id) {
                        record.set_order(index as i32 + 1);
                        record.touch(now);
                        moved += 1;
                    }
                }
                Ok::<_, AppError>(moved)
            })
            .await
            .inspect(|moved| {
                tracing::debug!("Reordered {} record(s) in {}", moved, self.collection.name())
            })
    }

    /// Permanently drop records matching `predicate`; returns how many went
    pub async fn remove_where(&self, predicate: impl Fn(&T) -> bool) -> Result<usize> {
        self.collection
            .mutate(|records| {
                let before = records.len();
                records.retain(|r| !predicate(r));
                Ok::<_, AppError>(before - records.len())
            })
            .await
    }

    pub async fn replace_all(&self, records: &[T]) -> Result<()> {
        Ok(self.collection.replace(records).await?)
    }

    pub async fn count(&self) -> Result<EntityCounts> {
        let records = self.collection.all().await?;
        Ok(EntityCounts {
            total: records.len() as i64,
            active: records.iter().filter(|r| r.is_active()).count() as i64,
        })
    }

    /// True if any active record points at `category`
    pub async fn has_active_in_category(&self, category: &str) -> Result<bool> {
        Ok(self
            .collection
            .all()
            .await?
            .iter()
            .any(|r| r.is_active() && r.category() == Some(category)))
    }
}

fn not_found<T: Entity>(id: i64) -> AppError {
    AppError::NotFound(format!("{} with id {} not found", T::LABEL, id))
}
