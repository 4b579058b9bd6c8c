use chrono::{DateTime, TimeZone, Utc};
use reqwest::Response;
use resource_manager::{
    app_state::AppState,
    domain::FixedClock,
    run_migrations,
    services::data_stores::{
        PostgresMemberStore, PostgresProjectStore, PostgresSkillStore,
        PostgresWorkHoursStore,
    },
    utils::constants::{test, DATABASE_URL, MAX_DB_CONNECTIONS},
    Application,
};
use secrecy::ExposeSecret;
use serde_json::Value;
use sqlx::{
    postgres::{PgConnectOptions, PgPoolOptions},
    Connection, Executor, PgConnection, PgPool,
};
use std::{str::FromStr, sync::Arc};
use test_context::AsyncTestContext;
use tokio::sync::RwLock;
use uuid::Uuid;

pub struct TestApp {
    pub address: String,
    pub http_client: reqwest::Client,
    pub now: DateTime<Utc>,
    pub tmp_db_name: Option<String>,
}

/// Every test app runs on a Monday at noon UTC.
pub fn test_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 3, 12, 0, 0).unwrap()
}

impl TestApp {
    pub async fn new() -> Self {
        let now = test_now();
        let app_state = AppState::in_memory(Arc::new(FixedClock::new(now)));
        Self::serve(app_state, now, None).await
    }

    /// A test app backed by a fresh PostgreSQL database, or `None` when
    /// `DATABASE_URL` is not configured.
    pub async fn with_postgres() -> Option<Self> {
        DATABASE_URL.as_ref()?;

        let now = test_now();
        let tmp_db_name = Uuid::new_v4().to_string();
        let pg_pool = configure_postgresql(&tmp_db_name).await;

        let app_state = AppState::new(
            Arc::new(RwLock::new(PostgresMemberStore::new(pg_pool.clone()))),
            Arc::new(RwLock::new(PostgresProjectStore::new(pg_pool.clone()))),
            Arc::new(RwLock::new(PostgresSkillStore::new(pg_pool.clone()))),
            Arc::new(RwLock::new(PostgresWorkHoursStore::new(pg_pool))),
            Arc::new(FixedClock::new(now)),
        );
        Some(Self::serve(app_state, now, Some(tmp_db_name)).await)
    }

    async fn serve(
        app_state: AppState,
        now: DateTime<Utc>,
        tmp_db_name: Option<String>,
    ) -> Self {
        let app = Application::build(app_state, test::APP_ADDRESS)
            .await
            .expect("Failed to build app");
        let address = format!("http://{}", app.address.clone());

        #[allow(clippy::let_underscore_future)]
        let _ = tokio::spawn(app.run());

        let http_client = reqwest::Client::builder()
            .build()
            .expect("Failed to build HTTP client");

        Self {
            address,
            http_client,
            now,
            tmp_db_name,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", &self.address, path)
    }

    pub async fn get(&self, path: &str) -> Response {
        self.http_client
            .get(self.url(path))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post<Body>(&self, path: &str, body: &Body) -> Response
    where
        Body: serde::Serialize,
    {
        self.http_client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn put<Body>(&self, path: &str, body: &Body) -> Response
    where
        Body: serde::Serialize,
    {
        self.http_client
            .put(self.url(path))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn delete(&self, path: &str) -> Response {
        self.http_client
            .delete(self.url(path))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn get_members(&self, query: &[(&str, &str)]) -> Response {
        self.http_client
            .get(self.url("/members"))
            .query(query)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post_assign_to_project<Body>(
        &self,
        member_id: &str,
        body: &Body,
    ) -> Response
    where
        Body: serde::Serialize,
    {
        self.post(&format!("/members/{member_id}/assign_to_project"), body)
            .await
    }
}

impl AsyncTestContext for TestApp {
    async fn setup() -> TestApp {
        TestApp::new().await
    }

    async fn teardown(self) {
        if let Some(db_name) = &self.tmp_db_name {
            delete_database(db_name).await;
        }
    }
}

/// Context for tests that need the PostgreSQL stores. Holds no app when
/// `DATABASE_URL` is unset, in which case those tests return early.
pub struct PostgresTestApp(Option<TestApp>);

impl PostgresTestApp {
    pub fn app(&self) -> Option<&TestApp> {
        if self.0.is_none() {
            eprintln!("DATABASE_URL is not set, skipping PostgreSQL test");
        }
        self.0.as_ref()
    }
}

impl AsyncTestContext for PostgresTestApp {
    async fn setup() -> PostgresTestApp {
        PostgresTestApp(TestApp::with_postgres().await)
    }

    async fn teardown(self) {
        if let Some(app) = self.0 {
            app.teardown().await;
        }
    }
}

fn server_options() -> PgConnectOptions {
    let url = DATABASE_URL
        .as_ref()
        .expect("DATABASE_URL must be set for PostgreSQL tests");
    PgConnectOptions::from_str(url.expose_secret())
        .expect("Failed to parse PostgreSQL connection string")
}

async fn configure_postgresql(db_name: &str) -> PgPool {
    let options = server_options();

    let mut connection = PgConnection::connect_with(&options)
        .await
        .expect("Failed to connect to Postgres");
    connection
        .execute(format!(r#"CREATE DATABASE "{}";"#, db_name).as_str())
        .await
        .expect("Failed to create database.");

    let pool = PgPoolOptions::new()
        .max_connections(MAX_DB_CONNECTIONS)
        .connect_with(options.database(db_name))
        .await
        .expect("Failed to create Postgres connection pool.");

    run_migrations(&pool)
        .await
        .expect("Failed to migrate the database");
    pool
}

async fn delete_database(db_name: &str) {
    let mut connection = PgConnection::connect_with(&server_options())
        .await
        .expect("Failed to connect to Postgres");

    connection
        .execute(
            format!(
                r#"
                SELECT pg_terminate_backend(pg_stat_activity.pid)
                FROM pg_stat_activity
                WHERE pg_stat_activity.datname = '{}'
                  AND pid <> pg_backend_pid();
                "#,
                db_name
            )
            .as_str(),
        )
        .await
        .expect("Failed to terminate connections to the database.");

    connection
        .execute(format!(r#"DROP DATABASE "{}";"#, db_name).as_str())
        .await
        .expect("Failed to drop the database.");
}

pub async fn get_json_response_body(response: Response) -> Value {
    response
        .json::<Value>()
        .await
        .expect("Failed to parse JSON response body")
}

async fn created_id(response: Response, what: &str) -> String {
    assert_eq!(
        response.status().as_u16(),
        201,
        "Failed to create {what}: {:?}",
        response
    );
    get_json_response_body(response).await["id"]
        .as_str()
        .expect("Response should contain an id")
        .to_owned()
}

pub async fn add_project(app: &TestApp, name: &str) -> String {
    let response = app
        .post("/projects", &serde_json::json!({ "name": name }))
        .await;
    created_id(response, "project").await
}

pub async fn add_skill(app: &TestApp, name: &str) -> String {
    let response = app
        .post("/skills", &serde_json::json!({ "name": name }))
        .await;
    created_id(response, "skill").await
}

pub async fn add_work_hours(
    app: &TestApp,
    start: &str,
    end: &str,
    timezone: &str,
) -> String {
    let response = app
        .post(
            "/workhours",
            &serde_json::json!({
                "start": start,
                "end": end,
                "timezone": timezone
            }),
        )
        .await;
    created_id(response, "work hours").await
}

pub async fn add_member(app: &TestApp, body: &Value) -> String {
    let response = app.post("/members", body).await;
    created_id(response, "member").await
}

/// Ids of the `results` array of a list response, in order.
pub async fn result_ids(response: Response) -> Vec<String> {
    assert_eq!(response.status().as_u16(), 200, "{:?}", response);
    let body = get_json_response_body(response).await;
    let results = body["results"].as_array().expect("results array");
    assert_eq!(body["count"].as_u64(), Some(results.len() as u64));
    results
        .iter()
        .map(|item| item["id"].as_str().unwrap().to_owned())
        .collect()
}
