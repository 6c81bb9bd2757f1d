//! Process-level wiring for the Roster server: configuration and the
//! top-level router.

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use axum::Router;
use roster_core::store::RosterStore;
use serde::Deserialize;
use tower_http::trace::TraceLayer;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration.
///
/// Sources, lowest precedence first: built-in defaults, the TOML file, then
/// `ROSTER_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  pub store_path: PathBuf,
}

impl ServerConfig {
  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

/// Load configuration from `path` (optional) layered over defaults and the
/// environment.
pub fn load_config(path: &Path) -> Result<ServerConfig, config::ConfigError> {
  config::Config::builder()
    .set_default("host", "127.0.0.1")?
    .set_default("port", 4741)?
    .set_default("store_path", "roster.db")?
    .add_source(config::File::from(path).required(false))
    .add_source(config::Environment::with_prefix("ROSTER"))
    .build()?
    .try_deserialize()
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// The API router wrapped in HTTP request tracing.
pub fn app<S>(store: Arc<S>) -> Router
where
  S: RosterStore + 'static,
{
  roster_api::api_router(store).layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
  use axum::{
    body::Body,
    http::{Request, StatusCode},
  };
  use roster_store_sqlite::SqliteStore;
  use tower::ServiceExt as _;

  use super::*;

  #[test]
  fn defaults_apply_without_a_file() {
    let cfg = load_config(Path::new("definitely-missing-roster-config.toml")).unwrap();
    assert!(!cfg.host.is_empty());
    assert!(cfg.port > 0);
    assert!(!cfg.store_path.as_os_str().is_empty());
  }

  #[test]
  fn address_joins_host_and_port() {
    let cfg = ServerConfig {
      host:       "0.0.0.0".into(),
      port:       8080,
      store_path: PathBuf::from("x.db"),
    };
    assert_eq!(cfg.address(), "0.0.0.0:8080");
  }

  #[test]
  fn tilde_is_left_alone_mid_path() {
    assert_eq!(expand_tilde(Path::new("data/~/x.db")), PathBuf::from("data/~/x.db"));
  }

  #[tokio::test]
  async fn traced_app_still_requires_auth() {
    let store = Arc::new(SqliteStore::open_in_memory().await.unwrap());
    let resp = app(store)
      .oneshot(Request::get("/subordinates").body(Body::empty()).unwrap())
      .await
      .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
  }
}
