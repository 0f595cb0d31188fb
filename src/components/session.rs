use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::auth::demo_auth::{LoginRequest, LoginResponse};
use crate::auth::models::SessionInfo;
use crate::auth::session::NONCE_HEADER;

/// Shared session state, provided once at the application root.
///
/// Every API call reads the nonce from here; login and logout rotate it
/// in place so in-flight components pick up the new value on their next
/// request.
#[derive(Clone, Copy)]
pub struct SessionContext {
    pub info: RwSignal<Option<SessionInfo>>,
}

impl SessionContext {
    pub fn new() -> Self {
        Self {
            info: RwSignal::new(None),
        }
    }

    /// Nonce to attach as the `x-csrf-token` header. Empty until the
    /// session handshake completes; the server rejects such calls.
    pub fn nonce(&self) -> String {
        self.info
            .get()
            .map(|i| i.nonce)
            .unwrap_or_default()
    }

    pub fn authenticated(&self) -> bool {
        self.info
            .get()
            .map(|i| i.authenticated)
            .unwrap_or(false)
    }

    pub fn display_name(&self) -> Option<String> {
        self.info.get().and_then(|i| i.display_name)
    }

    /// Performs the startup handshake: mints (or refreshes) the session
    /// cookie and learns the nonce.
    pub fn load(self) {
        spawn_local(async move {
            match fetch_session().await {
                Ok(info) => self.info.set(Some(info)),
                Err(err) => {
                    leptos::logging::warn!("session handshake failed: {err}");
                }
            }
        });
    }

    pub async fn login(self, username: String, password: String) -> Result<(), String> {
        let nonce = self.nonce();
        let response = reqwest::Client::new()
            .post("/api/auth/login")
            .header(NONCE_HEADER, nonce)
            .json(&LoginRequest { username, password })
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if !response.status().is_success() {
            return Err("Invalid username or password".to_string());
        }
        let body = response
            .json::<LoginResponse>()
            .await
            .map_err(|e| e.to_string())?;
        self.info.set(Some(body.session));
        Ok(())
    }

    pub async fn logout(self) -> Result<(), String> {
        let nonce = self.nonce();
        let response = reqwest::Client::new()
            .post("/api/auth/logout")
            .header(NONCE_HEADER, nonce)
            .send()
            .await
            .map_err(|e| e.to_string())?;
        let info = response
            .json::<SessionInfo>()
            .await
            .map_err(|e| e.to_string())?;
        self.info.set(Some(info));
        Ok(())
    }
}

async fn fetch_session() -> Result<SessionInfo, String> {
    reqwest::get("/api/auth/session")
        .await
        .map_err(|e| e.to_string())?
        .json::<SessionInfo>()
        .await
        .map_err(|e| e.to_string())
}

/// Convenience accessor for components below the root.
pub fn use_session() -> SessionContext {
    use_context::<SessionContext>().unwrap_or_else(SessionContext::new)
}
