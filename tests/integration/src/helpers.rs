//! Test helpers for integration tests
//!
//! Provides utilities for spawning test servers, driving them with
//! cookie-aware HTTP clients, and asserting on responses.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU16, Ordering};
use std::time::Duration;

use anyhow::{Context, Result};
use parlor_common::{
    AdminConfig, AppConfig, AuthConfig, DatabaseConfig, LoggingConfig, ServerConfig,
};
use parlor_service::ServiceContext;
use parlor_web::server::{create_app, create_app_state};
use reqwest::{redirect, Client, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Counter for unique test ports
static PORT_COUNTER: AtomicU16 = AtomicU16::new(19000);

/// Get a unique port for testing
pub fn get_test_port() -> u16 {
    PORT_COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// Test server instance that manages lifecycle
///
/// Each server gets its own SQLite file and logs directory under the system
/// temp dir, keyed by port, so concurrently running tests stay isolated.
pub struct TestServer {
    pub addr: SocketAddr,
    /// Direct handle on the running server's repositories, for seeding and
    /// inspecting state without going through HTTP
    pub context: ServiceContext,
    /// Where the category log files and summary reports land
    pub logs_dir: PathBuf,
    _handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a test server with a fresh database and logs directory
    pub async fn start() -> Result<Self> {
        let port = get_test_port();
        let root = std::env::temp_dir().join(format!("parlor-test-{port}"));
        // Stale state from an earlier run that reused this port number
        let _ = std::fs::remove_dir_all(&root);
        let logs_dir = root.join("logs");
        std::fs::create_dir_all(&logs_dir).context("failed to create test logs dir")?;

        let config = AppConfig {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port,
                request_timeout_secs: 30,
            },
            database: DatabaseConfig {
                url: format!("sqlite://{}", root.join("parlor.db").display()),
                max_connections: 5,
            },
            auth: AuthConfig {
                secret_key: "integration-test-secret".to_string(),
                token_ttl_hours: 24,
            },
            logging: LoggingConfig {
                logs_dir: logs_dir.clone(),
                slow_request_ms: 1000,
            },
            admin: AdminConfig {
                username: "admin".to_string(),
                password: "admin-password".to_string(),
            },
        };

        let addr = SocketAddr::from(([127, 0, 0, 1], port));

        // Create app state
        let state = create_app_state(config).await?;
        let context = state.service_context().clone();

        // Build application
        let app = create_app(state);

        // Bind to port
        let listener = TcpListener::bind(addr).await?;
        let actual_addr = listener.local_addr()?;

        // Spawn server task
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        // Wait for server to be ready
        tokio::time::sleep(Duration::from_millis(100)).await;

        Ok(Self {
            addr: actual_addr,
            context,
            logs_dir,
            _handle: handle,
        })
    }

    /// Get base URL for the server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Create a client with its own cookie jar (one browser session)
    ///
    /// Redirects are not followed, so tests can assert on the redirect
    /// responses that the form handlers produce.
    pub fn client(&self) -> TestClient {
        let client = Client::builder()
            .cookie_store(true)
            .redirect(redirect::Policy::none())
            .timeout(Duration::from_secs(10))
            .build()
            .expect("failed to build test client");

        TestClient {
            base_url: self.base_url(),
            client,
        }
    }

    /// Flip the admin flag directly in the store
    pub async fn promote_to_admin(&self, username: &str) -> Result<()> {
        let user = self
            .context
            .user_repo()
            .find_by_username(username)
            .await?
            .with_context(|| format!("no such user: {username}"))?;
        self.context.user_repo().set_admin(user.id, true).await?;
        Ok(())
    }
}

/// HTTP client bound to one server, holding one session's cookies
pub struct TestClient {
    base_url: String,
    client: Client,
}

impl TestClient {
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> Result<Response> {
        Ok(self.client.get(self.url(path)).send().await?)
    }

    /// Make a GET request with query parameters
    pub async fn get_query<T: Serialize + ?Sized>(&self, path: &str, query: &T) -> Result<Response> {
        Ok(self.client.get(self.url(path)).query(query).send().await?)
    }

    /// Make a GET request with a bearer token instead of the session cookie
    pub async fn get_bearer(&self, path: &str, token: &str) -> Result<Response> {
        Ok(self
            .client
            .get(self.url(path))
            .bearer_auth(token)
            .send()
            .await?)
    }

    /// Make a bare POST request with no body
    pub async fn post(&self, path: &str) -> Result<Response> {
        Ok(self.client.post(self.url(path)).send().await?)
    }

    /// Make a POST request with a JSON body
    pub async fn post_json<T: Serialize + ?Sized>(&self, path: &str, body: &T) -> Result<Response> {
        Ok(self.client.post(self.url(path)).json(body).send().await?)
    }

    /// Make a POST request with a form body
    pub async fn post_form<T: Serialize + ?Sized>(&self, path: &str, form: &T) -> Result<Response> {
        Ok(self.client.post(self.url(path)).form(form).send().await?)
    }

    /// GET a page and return its HTML, failing unless the status is 200
    pub async fn page(&self, path: &str) -> Result<String> {
        let response = self.get(path).await?;
        let status = response.status();
        let body = response.text().await?;
        if status != StatusCode::OK {
            anyhow::bail!("Expected 200 for {path}, got {status}. Body: {body}");
        }
        Ok(body)
    }

    /// Submit the registration form
    pub async fn register(&self, username: &str, password: &str) -> Result<Response> {
        self.post_form(
            "/register",
            &[
                ("username", username),
                ("password", password),
                ("confirm_password", password),
            ],
        )
        .await
    }

    /// Submit the login form; on success the session cookie lands in the jar
    pub async fn login(&self, username: &str, password: &str) -> Result<Response> {
        self.post_form("/login", &[("username", username), ("password", password)])
            .await
    }

    /// Register and log in, failing on any unexpected response
    pub async fn sign_up_and_in(&self, username: &str, password: &str) -> Result<()> {
        let response = self.register(username, password).await?;
        assert_redirect(&response, "/login")?;
        let response = self.login(username, password).await?;
        assert_redirect(&response, "/chat")?;
        Ok(())
    }
}

/// Assert a redirect-after-post response, returning the Location value
pub fn assert_redirect(response: &Response, location_prefix: &str) -> Result<String> {
    let status = response.status();
    if status != StatusCode::SEE_OTHER {
        anyhow::bail!("Expected 303 redirect to {location_prefix}, got {status}");
    }
    let location = response
        .headers()
        .get("location")
        .and_then(|value| value.to_str().ok())
        .context("redirect carried no Location header")?
        .to_string();
    if !location.starts_with(location_prefix) {
        anyhow::bail!("Expected redirect to {location_prefix}, got {location}");
    }
    Ok(location)
}

/// Assert response status and parse JSON body
pub async fn assert_json<T: DeserializeOwned>(
    response: Response,
    expected_status: StatusCode,
) -> Result<T> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!(
            "Expected status {}, got {}. Body: {}",
            expected_status,
            status,
            body
        );
    }
    Ok(response.json().await?)
}

/// Assert response status without parsing body
pub async fn assert_status(response: Response, expected_status: StatusCode) -> Result<()> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!(
            "Expected status {}, got {}. Body: {}",
            expected_status,
            status,
            body
        );
    }
    Ok(())
}
