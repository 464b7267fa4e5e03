//! Session state: bearer token, cached user snapshot, staged checkout data

use serde::{Deserialize, Serialize};
use std::sync::RwLock;

/// Cached display data for the signed-in user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserSnapshot {
    pub username: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
}

/// A course staged for a direct "buy now" purchase
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StagedCourse {
    pub course_id: String,
    pub title: String,
    pub instructor: String,
    pub price: f64,
    pub quantity: u32,
}

/// Buy-now payload held until the order is created
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CheckoutStaging {
    pub courses: Vec<StagedCourse>,
}

#[derive(Debug, Default)]
struct SessionState {
    token: Option<String>,
    user: Option<UserSnapshot>,
    staged_checkout: Option<CheckoutStaging>,
}

/// Holder of the opaque bearer token and cached user fields.
///
/// All service clients share one store; a 401 from any endpoint clears it
/// (see [`crate::fetch::FetchBuilder`]), so every protected surface observes
/// the logged-out state at once.
#[derive(Debug, Default)]
pub struct SessionStore {
    state: RwLock<SessionState>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the token and user snapshot returned by a login/signup
    pub fn set_session(&self, token: &str, user: Option<UserSnapshot>) {
        let mut state = self.state.write().unwrap();
        state.token = Some(token.to_string());
        state.user = user;
    }

    /// The stored bearer token, if any
    pub fn token(&self) -> Option<String> {
        self.state.read().unwrap().token.clone()
    }

    /// The cached user snapshot, if any
    pub fn user_snapshot(&self) -> Option<UserSnapshot> {
        self.state.read().unwrap().user.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.read().unwrap().token.is_some()
    }

    /// Tear down the session: token, user snapshot and any staged checkout
    pub fn clear(&self) {
        let mut state = self.state.write().unwrap();
        state.token = None;
        state.user = None;
        state.staged_checkout = None;
    }

    /// Stage a buy-now payload; it takes precedence over the server cart
    /// when the next checkout order is built.
    pub fn stage_checkout(&self, staging: CheckoutStaging) {
        self.state.write().unwrap().staged_checkout = Some(staging);
    }

    pub fn staged_checkout(&self) -> Option<CheckoutStaging> {
        self.state.read().unwrap().staged_checkout.clone()
    }

    /// Remove the staged payload, called once the order has been created
    /// so a later cart checkout does not pick up stale data.
    pub fn clear_staged_checkout(&self) {
        self.state.write().unwrap().staged_checkout = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_drops_token_user_and_staging() {
        let store = SessionStore::new();
        store.set_session(
            "tok",
            Some(UserSnapshot {
                username: "amina".into(),
                email: "amina@example.com".into(),
                profile_image: None,
            }),
        );
        store.stage_checkout(CheckoutStaging {
            courses: vec![StagedCourse {
                course_id: "c1".into(),
                title: "Rust".into(),
                instructor: "Omar".into(),
                price: 499.0,
                quantity: 1,
            }],
        });

        assert!(store.is_authenticated());
        store.clear();
        assert!(!store.is_authenticated());
        assert!(store.user_snapshot().is_none());
        assert!(store.staged_checkout().is_none());
    }
}
