//! Store configuration, read from an optional TOML file and `ROSTER_*`
//! environment variables.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::Result;

const ENV_PREFIX: &str = "ROSTER";

fn default_busy_timeout_ms() -> u64 { 5_000 }

/// Runtime store configuration.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct StoreConfig {
  /// SQLite database file. A leading `~/` is expanded to `$HOME`.
  pub store_path:      PathBuf,
  /// How long a writer waits on a locked database before failing.
  #[serde(default = "default_busy_timeout_ms")]
  pub busy_timeout_ms: u64,
}

impl StoreConfig {
  /// Load from `path` (if it exists), overridden by `ROSTER_STORE_PATH` and
  /// `ROSTER_BUSY_TIMEOUT_MS`.
  pub fn load(path: impl AsRef<Path>) -> Result<Self> {
    Self::load_with_env(path.as_ref(), config::Environment::with_prefix(ENV_PREFIX))
  }

  fn load_with_env(path: &Path, env: config::Environment) -> Result<Self> {
    let settings = config::Config::builder()
      .add_source(config::File::from(path.to_path_buf()).required(false))
      .add_source(env)
      .build()?;
    Ok(settings.try_deserialize()?)
  }

  /// `store_path` with `~/` expanded.
  pub fn resolved_store_path(&self) -> PathBuf { expand_tilde(&self.store_path) }
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

#[cfg(test)]
mod tests {
  use std::io::Write as _;

  use super::*;

  #[test]
  fn loads_toml_file_with_default_timeout() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(file, "store_path = \"/var/lib/roster/roster.db\"").unwrap();

    let cfg = StoreConfig::load(file.path()).unwrap();
    assert_eq!(cfg.store_path, PathBuf::from("/var/lib/roster/roster.db"));
    assert_eq!(cfg.busy_timeout_ms, 5_000);
  }

  #[test]
  fn explicit_timeout_is_kept() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(file, "store_path = \"roster.db\"\nbusy_timeout_ms = 250").unwrap();

    let cfg = StoreConfig::load(file.path()).unwrap();
    assert_eq!(cfg.busy_timeout_ms, 250);
  }

  #[test]
  fn environment_overrides_file() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(file, "store_path = \"from-file.db\"\nbusy_timeout_ms = 250").unwrap();

    let vars: config::Map<String, String> = [
      ("ROSTER_STORE_PATH".to_owned(), "/srv/roster/env.db".to_owned()),
      ("ROSTER_BUSY_TIMEOUT_MS".to_owned(), "750".to_owned()),
    ]
    .into_iter()
    .collect();
    let env = config::Environment::with_prefix(ENV_PREFIX).source(Some(vars));

    let cfg = StoreConfig::load_with_env(file.path(), env).unwrap();
    assert_eq!(cfg.store_path, PathBuf::from("/srv/roster/env.db"));
    assert_eq!(cfg.busy_timeout_ms, 750);
  }

  #[test]
  fn environment_alone_is_enough() {
    let dir = tempfile::tempdir().unwrap();
    let vars: config::Map<String, String> =
      [("ROSTER_STORE_PATH".to_owned(), "env-only.db".to_owned())].into_iter().collect();
    let env = config::Environment::with_prefix(ENV_PREFIX).source(Some(vars));

    let cfg = StoreConfig::load_with_env(&dir.path().join("missing.toml"), env).unwrap();
    assert_eq!(cfg.store_path, PathBuf::from("env-only.db"));
    assert_eq!(cfg.busy_timeout_ms, 5_000);
  }

  #[test]
  fn tilde_path_expands_to_home() {
    let cfg = StoreConfig { store_path: "~/roster/roster.db".into(), busy_timeout_ms: 1 };
    let expected = match std::env::var("HOME") {
      Ok(home) => PathBuf::from(home).join("roster/roster.db"),
      Err(_) => PathBuf::from("~/roster/roster.db"),
    };
    assert_eq!(cfg.resolved_store_path(), expected);
  }

  #[test]
  fn non_tilde_path_is_unchanged() {
    let cfg = StoreConfig { store_path: "/tmp/roster.db".into(), busy_timeout_ms: 1 };
    assert_eq!(cfg.resolved_store_path(), PathBuf::from("/tmp/roster.db"));
  }
}
