//! Embedded PostgreSQL for the adapter suites.
//!
//! Clusters are started one at a time. Unless both `PG_RUNTIME_DIR` and
//! `PG_DATA_DIR` are already set, each start gets fresh directories under
//! `target/pg-embed`, exported only while the cluster boots.

use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use env_lock::lock_env;
use pg_embedded_setup_unpriv::TestCluster;
use uuid::Uuid;

static STARTUP: Mutex<()> = Mutex::new(());

const ATTEMPTS: u32 = 4;
const FIRST_BACKOFF: Duration = Duration::from_millis(500);

/// Download and network hiccups worth another attempt.
const RETRYABLE: [&str; 6] = [
    "error decoding response body",
    "connection reset",
    "connection refused",
    "timed out",
    "temporarily unavailable",
    "dns error",
];

fn scratch_root() -> PathBuf {
    std::env::var_os("CARGO_TARGET_DIR").map_or_else(
        || Path::new(env!("CARGO_MANIFEST_DIR")).join("../target"),
        PathBuf::from,
    )
    .join("pg-embed")
}

fn fresh_dirs() -> std::io::Result<[String; 2]> {
    let run = scratch_root().join(format!("chatte-{}", Uuid::new_v4()));
    let install = run.join("install");
    let data = run.join("data");
    std::fs::create_dir_all(&install)?;
    std::fs::create_dir_all(&data)?;
    Ok([install, data].map(|dir| dir.to_string_lossy().into_owned()))
}

fn is_retryable(message: &str) -> bool {
    let message = message.to_lowercase();
    RETRYABLE.iter().any(|needle| message.contains(needle))
}

/// Start a cluster, backing off and retrying on transient failures.
pub fn test_cluster() -> Result<TestCluster, String> {
    let _serial = STARTUP.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

    let preset = std::env::var_os("PG_RUNTIME_DIR").is_some()
        && std::env::var_os("PG_DATA_DIR").is_some();
    let _env = if preset {
        None
    } else {
        let [install, data] = fresh_dirs().map_err(|err| err.to_string())?;
        Some(lock_env([
            ("PG_RUNTIME_DIR", Some(install)),
            ("PG_DATA_DIR", Some(data)),
        ]))
    };

    let mut backoff = FIRST_BACKOFF;
    let mut attempt = 1;
    loop {
        let message = match TestCluster::new() {
            Ok(cluster) => return Ok(cluster),
            Err(err) => format!("{err:?}"),
        };
        if attempt == ATTEMPTS || !is_retryable(&message) {
            return Err(message);
        }
        eprintln!("embedded postgres attempt {attempt} failed, retrying in {backoff:?}: {message}");
        std::thread::sleep(backoff);
        backoff *= 2;
        attempt += 1;
    }
}
