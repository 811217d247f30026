use crate::entity::Entity;
use crate::DbError;
use async_trait::async_trait;
use sqlx::postgres::{PgPool, Postgres};
use std::marker::PhantomData;

/// Generic CRUD access to the table behind an [`Entity`].
///
/// Absence is reported as `None` from `get_by_id` and `delete`; only `update`
/// treats an unknown identifier as an error.
#[async_trait]
pub trait Repository<T: Entity>: Send + Sync {
    /// Every stored row, ordered by identifier.
    async fn get_all(&self) -> Result<Vec<T>, DbError>;

    async fn get_by_id(&self, id: i32) -> Result<Option<T>, DbError>;

    /// Inserts a new row. The identifier on `entity` is ignored and the
    /// returned value carries the one assigned by the store.
    async fn create(&self, entity: &T) -> Result<T, DbError>;

    /// Overwrites every column of row `id` with the fields of `entity`.
    ///
    /// Fails with `DbError::NotFound` if `id` does not exist; this never
    /// inserts.
    async fn update(&self, id: i32, entity: &T) -> Result<T, DbError>;

    /// Removes row `id` and returns what it held.
    async fn delete(&self, id: i32) -> Result<Option<T>, DbError>;
}

/// The `PgRepository` runs the generic CRUD statements for one entity type
/// against a shared PostgreSQL pool.
pub struct PgRepository<T> {
    pool: PgPool,
    _entity: PhantomData<fn() -> T>,
}

impl<T> Clone for PgRepository<T> {
    fn clone(&self) -> Self {
        Self {
            pool: self.pool.clone(),
            _entity: PhantomData,
        }
    }
}

impl<T: Entity> PgRepository<T> {
    /// Creates a new `PgRepository` with a shared database connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            _entity: PhantomData,
        }
    }
}

#[async_trait]
impl<T: Entity> Repository<T> for PgRepository<T> {
    async fn get_all(&self) -> Result<Vec<T>, DbError> {
        let sql = select_all_sql::<T>();
        let rows = sqlx::query_as::<Postgres, T>(&sql).fetch_all(&self.pool).await?;
        Ok(rows)
    }

    async fn get_by_id(&self, id: i32) -> Result<Option<T>, DbError> {
        let sql = select_by_id_sql::<T>();
        let row = sqlx::query_as::<Postgres, T>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn create(&self, entity: &T) -> Result<T, DbError> {
        let sql = insert_sql::<T>();
        let row = entity
            .bind_columns(sqlx::query_as::<Postgres, T>(&sql))
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn update(&self, id: i32, entity: &T) -> Result<T, DbError> {
        let sql = update_sql::<T>();
        entity
            .bind_columns(sqlx::query_as::<Postgres, T>(&sql))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(DbError::NotFound { table: T::TABLE, id })
    }

    async fn delete(&self, id: i32) -> Result<Option<T>, DbError> {
        let sql = delete_sql::<T>();
        let row = sqlx::query_as::<Postgres, T>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }
}

// ==============================================================================
// Statement builders
// ==============================================================================

fn returning<T: Entity>() -> String {
    std::iter::once("id")
        .chain(T::COLUMNS.iter().copied())
        .collect::<Vec<_>>()
        .join(", ")
}

fn select_all_sql<T: Entity>() -> String {
    format!("SELECT {} FROM {} ORDER BY id ASC", returning::<T>(), T::TABLE)
}

fn select_by_id_sql<T: Entity>() -> String {
    format!("SELECT {} FROM {} WHERE id = $1", returning::<T>(), T::TABLE)
}

fn insert_sql<T: Entity>() -> String {
    let placeholders = (1..=T::COLUMNS.len())
        .map(|n| format!("${n}"))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "INSERT INTO {} ({}) VALUES ({}) RETURNING {}",
        T::TABLE,
        T::COLUMNS.join(", "),
        placeholders,
        returning::<T>()
    )
}

fn update_sql<T: Entity>() -> String {
    let assignments = T::COLUMNS
        .iter()
        .enumerate()
        .map(|(i, column)| format!("{column} = ${}", i + 1))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "UPDATE {} SET {} WHERE id = ${} RETURNING {}",
        T::TABLE,
        assignments,
        T::COLUMNS.len() + 1,
        returning::<T>()
    )
}

fn delete_sql<T: Entity>() -> String {
    format!("DELETE FROM {} WHERE id = $1 RETURNING {}", T::TABLE, returning::<T>())
}
