use anyhow::{anyhow, Context};
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter directives
pub(crate) static LOG_ENV_VAR: &str = "CPDCLAIM_LOG";

static DEFAULT_FILTER: &str = "info";

/// Sends `tracing` events to the file at `path`, appending.  The terminal
/// belongs to the UI, so nothing is ever logged to stdout or stderr.
pub(crate) fn init(path: &Path) -> anyhow::Result<()> {
    let env_filter = filter_from(std::env::var(LOG_ENV_VAR).ok().as_deref())?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;
    let init_result = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(Mutex::new(file))
        .with_target(true)
        .with_level(true)
        .with_ansi(false)
        .try_init();
    if let Err(err) = init_result {
        debug!(error = %err, "tracing subscriber already set, continuing");
    }
    Ok(())
}

fn filter_from(directives: Option<&str>) -> anyhow::Result<EnvFilter> {
    match directives {
        Some(d) if !d.trim().is_empty() => {
            EnvFilter::try_new(d).map_err(|e| anyhow!("invalid {LOG_ENV_VAR} log filter: {e}"))
        }
        _ => EnvFilter::try_new(DEFAULT_FILTER)
            .map_err(|e| anyhow!("invalid default log filter: {e}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_from() {
        assert_eq!(filter_from(None).unwrap().to_string(), "info");
        assert_eq!(filter_from(Some("  ")).unwrap().to_string(), "info");
        assert_eq!(
            filter_from(Some("cpdclaim=debug")).unwrap().to_string(),
            "cpdclaim=debug"
        );
        assert!(filter_from(Some("cpdclaim=notalevel")).is_err());
    }

    #[test]
    fn test_init_creates_log_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cpdclaim.log");
        init(&path).unwrap();
        assert!(path.exists());
    }
}
