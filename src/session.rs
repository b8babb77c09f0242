use thiserror::Error;

/// The signed-in member.  Passed explicitly to whatever needs to know who is
/// claiming.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Session {
    email: String,
    name: String,
}

impl Session {
    /// The display name is the local part of the address
    pub(crate) fn from_email(email: &str) -> Result<Session, SessionError> {
        let email = email.trim();
        match email.split_once('@') {
            Some((local, domain))
                if !local.is_empty() && !domain.is_empty() && !domain.contains('@') =>
            {
                Ok(Session {
                    email: email.to_owned(),
                    name: local.to_owned(),
                })
            }
            _ => Err(SessionError::InvalidEmail(email.to_owned())),
        }
    }

    pub(crate) fn email(&self) -> &str {
        &self.email
    }

    pub(crate) fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub(crate) enum SessionError {
    #[error("invalid email address: {0:?}")]
    InvalidEmail(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_from_local_part() {
        let session = Session::from_email(" jane.doe@example.org ").unwrap();
        assert_eq!(session.email(), "jane.doe@example.org");
        assert_eq!(session.name(), "jane.doe");
    }

    #[test]
    fn test_invalid_addresses() {
        for bad in ["", "jane", "@example.org", "jane@", "a@b@c"] {
            assert_eq!(
                Session::from_email(bad),
                Err(SessionError::InvalidEmail(bad.to_owned())),
                "{bad:?} should be rejected"
            );
        }
    }
}
