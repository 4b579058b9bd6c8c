use axum::{
    http::{HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    serve::Serve,
    Json, Router,
};
use color_eyre::eyre::{eyre, Result};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::error::Error;
use tokio::signal;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::Level;

pub mod app_state;
pub mod domain;
pub mod routes;
pub mod services;
pub mod utils;

use app_state::AppState;
use domain::ResourceAPIError;
use routes::{
    health,
    members::{
        assign_to_project, delete_member, get_member, list_members,
        new_member, update_member,
    },
    projects::{
        delete_project, get_project, list_projects, new_project,
        update_project,
    },
    skills::{delete_skill, get_skill, list_skills, new_skill, update_skill},
    work_hours::{
        delete_work_hours, get_work_hours, list_work_hours, new_work_hours,
        update_work_hours,
    },
};
use utils::{
    constants::{ALLOWED_ORIGINS, MAX_DB_CONNECTIONS},
    tracing::*,
};

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for ResourceAPIError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            ResourceAPIError::IDNotFoundError(id) => {
                log_error_chain(&self, Level::DEBUG);
                (StatusCode::NOT_FOUND, format!("ID not found: {id}"))
            }
            ResourceAPIError::ValidationError(message) => {
                log_error_chain(&self, Level::DEBUG);
                (StatusCode::BAD_REQUEST, message.to_string())
            }
            ResourceAPIError::UnexpectedError(_) => {
                log_error_chain(&self, Level::ERROR);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Unexpected error".to_string(),
                )
            }
        };
        let body = Json(ErrorResponse {
            error: error_message,
        });
        (status, body).into_response()
    }
}

fn log_error_chain(e: &(dyn Error + 'static), level: Level) {
    let separator =
        "\n-----------------------------------------------------------------------------------\n";
    let mut report = format!("{}{:?}\n", separator, e);
    let mut current = e.source();
    while let Some(cause) = current {
        report = format!("{}\nCaused by:\n\n{:?}", report, cause);
        current = cause.source();
    }
    report = format!("{}\n{}", report, separator);
    match level {
        Level::ERROR => tracing::error!("{}", report),
        Level::WARN => tracing::warn!("{}", report),
        Level::INFO => tracing::info!("{}", report),
        Level::DEBUG => tracing::debug!("{}", report),
        Level::TRACE => tracing::trace!("{}", report),
    }
}

pub struct Application {
    server: Serve<Router, Router>,
    pub address: String,
}

impl Application {
    pub async fn build(app_state: AppState, address: &str) -> Result<Self> {
        let allowed_origins = ALLOWED_ORIGINS
            .iter()
            .map(|origin| {
                origin
                    .parse::<HeaderValue>()
                    .map_err(|e| eyre!("Invalid allowed origin {origin}: {e}"))
            })
            .collect::<Result<Vec<_>>>()?;

        let cors = CorsLayer::new()
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
            .allow_credentials(true)
            .allow_origin(allowed_origins);

        let router = Router::new()
            .route("/health", get(health))
            .route("/members", get(list_members).post(new_member))
            .route(
                "/members/:id",
                get(get_member).put(update_member).delete(delete_member),
            )
            .route("/members/:id/assign_to_project", post(assign_to_project))
            .route("/projects", get(list_projects).post(new_project))
            .route(
                "/projects/:id",
                get(get_project).put(update_project).delete(delete_project),
            )
            .route("/skills", get(list_skills).post(new_skill))
            .route(
                "/skills/:id",
                get(get_skill).put(update_skill).delete(delete_skill),
            )
            .route("/workhours", get(list_work_hours).post(new_work_hours))
            .route(
                "/workhours/:id",
                get(get_work_hours)
                    .put(update_work_hours)
                    .delete(delete_work_hours),
            )
            .with_state(app_state)
            .layer(cors)
            .layer(
                TraceLayer::new_for_http()
                    .make_span_with(make_span_with_request_id)
                    .on_request(on_request)
                    .on_response(on_response),
            );

        let listener = tokio::net::TcpListener::bind(address).await?;
        let address = listener.local_addr()?.to_string();
        let server = axum::serve(listener, router);

        Ok(Application { server, address })
    }

    pub async fn run(self) -> Result<(), std::io::Error> {
        tracing::info!("listening on {}", &self.address);
        self.server.with_graceful_shutdown(shutdown_signal()).await
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("shutting down");
}

pub async fn get_postgres_pool(
    url: &Secret<String>,
) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(MAX_DB_CONNECTIONS)
        .connect(url.expose_secret())
        .await
}

pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!().run(pool).await
}
