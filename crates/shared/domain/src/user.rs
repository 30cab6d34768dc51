//! User domain entity and related types.

use serde::{Deserialize, Serialize};

/// User domain entity.
///
/// The id is assigned exactly once, by the repository, at creation time.
/// The credential is write-only: queries never read it back, so a `User`
/// loaded from the store always carries an empty credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub credential: Vec<u8>,
}

/// Partial update payload for a user.
///
/// `None` means "not supplied" — the field keeps its current value.
#[derive(Debug, Clone, Default)]
pub struct UserUpdate {
    pub email: Option<String>,
    pub credential: Option<Vec<u8>>,
}

impl User {
    pub fn new(id: String, email: String, credential: Vec<u8>) -> Self {
        Self {
            id,
            email,
            credential,
        }
    }

    /// Merge a partial update into this user, producing the full desired
    /// post-update state.
    ///
    /// The email is overwritten only when supplied and different from the
    /// current value. The credential is overwritten whenever supplied; there
    /// is no equality check because the current credential is never loaded
    /// from the store.
    pub fn apply_update(&mut self, update: &UserUpdate) {
        if let Some(email) = &update.email {
            if *email != self.email {
                self.email = email.clone();
            }
        }

        if let Some(credential) = &update.credential {
            self.credential = credential.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn current_user() -> User {
        User::new(
            "success".to_string(),
            "a@x.com".to_string(),
            b"old".to_vec(),
        )
    }

    #[test]
    fn empty_update_leaves_user_unchanged() {
        let mut user = current_user();
        user.apply_update(&UserUpdate::default());

        assert_eq!(user, current_user());
    }

    #[test]
    fn update_overwrites_credential_and_keeps_email() {
        let mut user = current_user();
        user.apply_update(&UserUpdate {
            email: None,
            credential: Some(b"pw".to_vec()),
        });

        assert_eq!(user.email, "a@x.com");
        assert_eq!(user.credential, b"pw".to_vec());
    }

    #[test]
    fn update_overwrites_email_when_different() {
        let mut user = current_user();
        user.apply_update(&UserUpdate {
            email: Some("b@x.com".to_string()),
            credential: None,
        });

        assert_eq!(user.email, "b@x.com");
        assert_eq!(user.credential, b"old".to_vec());
    }

    #[test]
    fn update_with_same_email_is_a_no_op() {
        let mut user = current_user();
        user.apply_update(&UserUpdate {
            email: Some("a@x.com".to_string()),
            credential: None,
        });

        assert_eq!(user, current_user());
    }
}
