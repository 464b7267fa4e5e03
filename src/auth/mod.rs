//! Identity: login, signup, OTP verification, password reset, profile

mod types;

use reqwest::Client;
use serde_json::json;
use std::sync::Arc;

use crate::error::Error;
use crate::fetch::Fetch;
use crate::session::{SessionStore, UserSnapshot};
use crate::store::SharedStore;

pub use types::{AuthResponse, AuthUser, MessageResponse, Profile, ProfileUpdate};

use types::ProfileResponse;

/// Client for the identity endpoints
#[derive(Debug, Clone)]
pub struct AuthClient {
    base_url: String,
    client: Client,
    session: Arc<SessionStore>,
    store: Arc<SharedStore>,
}

impl AuthClient {
    pub(crate) fn new(
        base_url: &str,
        client: Client,
        session: Arc<SessionStore>,
        store: Arc<SharedStore>,
    ) -> Self {
        Self {
            base_url: base_url.to_string(),
            client,
            session,
            store,
        }
    }

    fn user_url(&self, path: &str) -> String {
        format!("{}/api/user{}", self.base_url, path)
    }

    /// Log in with email and password. On success the token and user
    /// snapshot are stored and the snapshot is published to subscribers.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, Error> {
        let response: AuthResponse = Fetch::post(&self.client, &self.user_url("/login"))
            .json(&json!({ "email": email, "password": password }))?
            .execute()
            .await?;

        let token = response
            .token
            .as_deref()
            .ok_or_else(|| Error::other("login response carried no token"))?;

        let snapshot = response.user.as_ref().map(|user| UserSnapshot {
            username: user.username.clone(),
            email: user.email.clone(),
            profile_image: user.profile_image.clone(),
        });
        self.session.set_session(token, snapshot.clone());
        self.store.set_user_snapshot(snapshot);
        tracing::debug!(email, "login succeeded");

        Ok(response)
    }

    /// Register a new account; the backend follows up with an OTP email
    pub async fn signup(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthResponse, Error> {
        Fetch::post(&self.client, &self.user_url("/signup"))
            .json(&json!({
                "username": username,
                "email": email,
                "password": password,
            }))?
            .execute()
            .await
    }

    /// Confirm the OTP sent after signup. A token in the response is stored
    /// like a login.
    pub async fn verify_otp(&self, email: &str, otp: &str) -> Result<AuthResponse, Error> {
        let response: AuthResponse = Fetch::post(&self.client, &self.user_url("/verify-otp"))
            .json(&json!({ "email": email, "otp": otp }))?
            .execute()
            .await?;

        if let Some(token) = response.token.as_deref() {
            let snapshot = response.user.as_ref().map(|user| UserSnapshot {
                username: user.username.clone(),
                email: user.email.clone(),
                profile_image: user.profile_image.clone(),
            });
            self.session.set_session(token, snapshot.clone());
            self.store.set_user_snapshot(snapshot);
        }

        Ok(response)
    }

    /// Request a password-reset email
    pub async fn forgot_password(&self, email: &str) -> Result<MessageResponse, Error> {
        Fetch::post(&self.client, &self.user_url("/forgot-password"))
            .json(&json!({ "email": email }))?
            .execute()
            .await
    }

    /// Set a new password using the emailed reset token
    pub async fn reset_password(
        &self,
        reset_token: &str,
        new_password: &str,
    ) -> Result<MessageResponse, Error> {
        let url = self.user_url(&format!("/reset-password/{}", reset_token));
        Fetch::post(&self.client, &url)
            .json(&json!({ "password": new_password }))?
            .execute()
            .await
    }

    /// Log out locally: tear down the session and clear published state.
    /// Token invalidation is the backend's concern.
    pub fn logout(&self) {
        self.session.clear();
        self.store.set_user_snapshot(None);
        self.store.set_cart_count(0);
    }

    fn profile_url(&self) -> String {
        format!("{}/api/user-profile/profile", self.base_url)
    }

    /// Fetch the signed-in user's profile
    pub async fn profile(&self) -> Result<Profile, Error> {
        let response: ProfileResponse = Fetch::get(&self.client, &self.profile_url())
            .authed(&self.session)?
            .execute()
            .await?;
        Ok(response.user)
    }

    /// Update the profile and publish the refreshed snapshot
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<Profile, Error> {
        let response: ProfileResponse = Fetch::put(&self.client, &self.profile_url())
            .authed(&self.session)?
            .json(update)?
            .execute()
            .await?;

        let profile = response.user;
        self.store.set_user_snapshot(Some(UserSnapshot {
            username: profile.username.clone(),
            email: profile.email.clone(),
            profile_image: profile.profile_image.clone(),
        }));
        Ok(profile)
    }
}
