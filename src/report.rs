use crate::session::Session;
use std::error::Error;
use tracing::{error, info, warn};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Severity {
    Info,
    Warning,
}

/// Error and event reporting, handed to the components that report rather
/// than reached through a global
pub(crate) trait Reporter {
    fn capture_error(&self, err: &dyn Error, context: &str);

    fn capture_message(&self, message: &str, severity: Severity);

    fn set_user(&mut self, user: Option<&Session>);
}

/// Reports as `tracing` events tagged with the current user
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct TracingReporter {
    user: Option<String>,
}

impl TracingReporter {
    pub(crate) fn new() -> TracingReporter {
        TracingReporter::default()
    }

    fn user(&self) -> &str {
        self.user.as_deref().unwrap_or("-")
    }
}

impl Reporter for TracingReporter {
    fn capture_error(&self, err: &dyn Error, context: &str) {
        error!(user = self.user(), context, error = %err, "captured error");
    }

    fn capture_message(&self, message: &str, severity: Severity) {
        match severity {
            Severity::Info => info!(user = self.user(), "{message}"),
            Severity::Warning => warn!(user = self.user(), "{message}"),
        }
    }

    fn set_user(&mut self, user: Option<&Session>) {
        self.user = user.map(|s| s.email().to_owned());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_user() {
        let mut reporter = TracingReporter::new();
        assert_eq!(reporter.user(), "-");
        let session = Session::from_email("sam@example.org").unwrap();
        reporter.set_user(Some(&session));
        assert_eq!(reporter.user(), "sam@example.org");
        reporter.capture_message("claim submitted", Severity::Info);
        reporter.set_user(None);
        assert_eq!(reporter.user(), "-");
    }
}
