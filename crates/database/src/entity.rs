use core_types::{Course, Mark, Student};
use sqlx::postgres::{PgArguments, PgRow, Postgres};
use sqlx::query::QueryAs;
use sqlx::FromRow;

/// A query whose rows decode into the entity `T`.
pub type EntityQuery<'q, T> = QueryAs<'q, Postgres, T, PgArguments>;

/// A record type stored in its own table under a store-assigned integer `id`.
///
/// `COLUMNS` lists every column except `id`, and `bind_columns` must bind the
/// matching field values in exactly that order.
pub trait Entity: for<'r> FromRow<'r, PgRow> + Clone + Send + Sync + Unpin + 'static {
    const TABLE: &'static str;
    const COLUMNS: &'static [&'static str];

    fn id(&self) -> i32;

    /// Returns the same value carrying `id`.
    fn with_id(self, id: i32) -> Self;

    fn bind_columns<'q>(&self, query: EntityQuery<'q, Self>) -> EntityQuery<'q, Self>;
}

impl Entity for Student {
    const TABLE: &'static str = "students";
    const COLUMNS: &'static [&'static str] = &["student_name"];

    fn id(&self) -> i32 {
        self.id
    }

    fn with_id(self, id: i32) -> Self {
        Self { id, ..self }
    }

    fn bind_columns<'q>(&self, query: EntityQuery<'q, Self>) -> EntityQuery<'q, Self> {
        query.bind(self.student_name.clone())
    }
}

impl Entity for Course {
    const TABLE: &'static str = "courses";
    const COLUMNS: &'static [&'static str] = &["course_name", "description"];

    fn id(&self) -> i32 {
        self.id
    }

    fn with_id(self, id: i32) -> Self {
        Self { id, ..self }
    }

    fn bind_columns<'q>(&self, query: EntityQuery<'q, Self>) -> EntityQuery<'q, Self> {
        query
            .bind(self.course_name.clone())
            .bind(self.description.clone())
    }
}

impl Entity for Mark {
    const TABLE: &'static str = "marks";
    const COLUMNS: &'static [&'static str] = &[
        "student_id",
        "course_id",
        "mark_value",
        "created_on",
        "last_modified_on",
    ];

    fn id(&self) -> i32 {
        self.id
    }

    fn with_id(self, id: i32) -> Self {
        Self { id, ..self }
    }

    fn bind_columns<'q>(&self, query: EntityQuery<'q, Self>) -> EntityQuery<'q, Self> {
        query
            .bind(self.student_id)
            .bind(self.course_id)
            .bind(self.mark_value)
            .bind(self.created_on)
            .bind(self.last_modified_on)
    }
}
