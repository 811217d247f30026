use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use configuration::Settings;
use core_types::{Course, Mark, Student};
use database::{InMemoryRepository, PgPool, PgRepository, Repository};
use std::sync::Arc;
use tower_http::{
    cors::{AllowHeaders, AllowOrigin, Any, CorsLayer, ExposeHeaders},
    trace::TraceLayer,
};

pub mod error;
pub mod handlers;
pub mod marks;

/// The shared application state that all handlers can access.
///
/// Each entity has its own store behind the generic `Repository` trait, so
/// the same router serves PostgreSQL or in-memory tables.
#[derive(Clone)]
pub struct AppState {
    pub students: Arc<dyn Repository<Student>>,
    pub courses: Arc<dyn Repository<Course>>,
    pub marks: Arc<dyn Repository<Mark>>,
}

impl AppState {
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            students: Arc::new(PgRepository::<Student>::new(pool.clone())),
            courses: Arc::new(PgRepository::<Course>::new(pool.clone())),
            marks: Arc::new(PgRepository::<Mark>::new(pool)),
        }
    }

    pub fn in_memory() -> Self {
        Self {
            students: Arc::new(InMemoryRepository::<Student>::new()),
            courses: Arc::new(InMemoryRepository::<Course>::new()),
            marks: Arc::new(InMemoryRepository::<Mark>::new()),
        }
    }
}

/// Builds the application routes and middleware around `state`.
pub fn router(state: Arc<AppState>, body_limit_bytes: usize) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::any())
        .allow_methods(Any)
        .allow_headers(AllowHeaders::any())
        .expose_headers(ExposeHeaders::any());

    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .route(
            "/api/students",
            get(handlers::list_students).post(handlers::create_student),
        )
        .route(
            "/api/students/:id",
            get(handlers::get_student)
                .put(handlers::update_student)
                .delete(handlers::delete_student),
        )
        .route(
            "/api/courses",
            get(handlers::list_courses).post(handlers::create_course),
        )
        .route(
            "/api/courses/:id",
            get(handlers::get_course)
                .put(handlers::update_course)
                .delete(handlers::delete_course),
        )
        .route(
            "/api/marks/student/:student_id/course/:course_id",
            post(marks::add_mark_for_student)
                .put(marks::update_mark_for_student)
                .delete(marks::delete_mark_for_student),
        )
        .route(
            "/api/marks/student/:student_id/marks",
            get(marks::get_marks_by_student_id),
        )
        .route(
            "/api/marks/student/:student_id/details",
            get(marks::get_student_details),
        )
        .route(
            "/api/marks/course/:course_id/highest",
            get(marks::get_highest_mark_for_course),
        )
        .route(
            "/api/marks/course/:course_id/lowest",
            get(marks::get_lowest_mark_for_course),
        )
        .with_state(state)
        .layer(cors)
        // This middleware will automatically log information about every incoming request.
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(body_limit_bytes))
}

/// The main function to configure and run the web server.
///
/// Tracing must already be initialised by the caller.
pub async fn run_server(settings: &Settings) -> anyhow::Result<()> {
    let addr = settings.server.socket_addr()?;

    let db_pool = database::connect(&settings.database).await?;
    if settings.database.run_migrations {
        database::run_migrations(&db_pool).await?;
    }

    let app_state = Arc::new(AppState::postgres(db_pool));
    let app = router(app_state, settings.server.body_limit_bytes);

    tracing::info!("Web server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
