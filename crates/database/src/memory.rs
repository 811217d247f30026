use crate::entity::Entity;
use crate::repository::Repository;
use crate::DbError;
use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

struct Table<T> {
    rows: BTreeMap<i32, T>,
    last_id: i32,
}

/// A process-local [`Repository`] with the same contract as `PgRepository`.
///
/// Identifiers start at 1 and are never reused, mirroring a `SERIAL` column.
pub struct InMemoryRepository<T> {
    table: RwLock<Table<T>>,
}

impl<T: Entity> InMemoryRepository<T> {
    pub fn new() -> Self {
        Self {
            table: RwLock::new(Table {
                rows: BTreeMap::new(),
                last_id: 0,
            }),
        }
    }
}

impl<T: Entity> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Entity> Repository<T> for InMemoryRepository<T> {
    async fn get_all(&self) -> Result<Vec<T>, DbError> {
        let table = self.table.read().await;
        Ok(table.rows.values().cloned().collect())
    }

    async fn get_by_id(&self, id: i32) -> Result<Option<T>, DbError> {
        let table = self.table.read().await;
        Ok(table.rows.get(&id).cloned())
    }

    async fn create(&self, entity: &T) -> Result<T, DbError> {
        let mut table = self.table.write().await;
        table.last_id += 1;
        let created = entity.clone().with_id(table.last_id);
        table.rows.insert(created.id(), created.clone());
        Ok(created)
    }

    async fn update(&self, id: i32, entity: &T) -> Result<T, DbError> {
        let mut table = self.table.write().await;
        let row = table
            .rows
            .get_mut(&id)
            .ok_or(DbError::NotFound { table: T::TABLE, id })?;
        *row = entity.clone().with_id(id);
        Ok(row.clone())
    }

    async fn delete(&self, id: i32) -> Result<Option<T>, DbError> {
        let mut table = self.table.write().await;
        Ok(table.rows.remove(&id))
    }
}
