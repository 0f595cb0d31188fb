use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use rand::Rng;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::auth::models::{AuthenticatedUser, SessionInfo};
use crate::error::AppError;

/// Name of the signed session cookie.
pub const SESSION_COOKIE: &str = "quadrangle_session";

/// Header the client attaches the session nonce under. Verification is
/// double-submit: the header value must equal the nonce inside the
/// signed cookie.
pub const NONCE_HEADER: &str = "x-csrf-token";

/// A browser session: an optional signed-in user plus the anti-forgery
/// nonce minted when the session was created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub user: Option<AuthenticatedUser>,
    pub nonce: String,
}

impl Session {
    /// A fresh anonymous session.
    pub fn guest() -> Self {
        Self {
            user: None,
            nonce: mint_nonce(),
        }
    }

    /// A fresh session for a signed-in user.
    pub fn for_user(user: AuthenticatedUser) -> Self {
        Self {
            user: Some(user),
            nonce: mint_nonce(),
        }
    }

    pub fn info(&self) -> SessionInfo {
        SessionInfo {
            authenticated: self.user.is_some(),
            display_name: self.user.as_ref().map(|u| u.display_name.clone()),
            nonce: self.nonce.clone(),
        }
    }
}

/// 32 random bytes, URL-safe base64.
pub fn mint_nonce() -> String {
    let bytes: [u8; 32] = rand::rng().random();
    URL_SAFE_NO_PAD.encode(bytes)
}

fn sign(secret: &str, payload: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(secret.as_bytes());
    hasher.update(b".");
    hasher.update(payload.as_bytes());
    URL_SAFE_NO_PAD.encode(hasher.finalize())
}

/// Serialize and sign a session into a cookie value.
pub fn encode_session(session: &Session, secret: &str) -> Result<String, AppError> {
    let payload = serde_json::to_string(session)
        .map_err(|e| AppError::Internal(format!("Failed to serialize session: {e}")))?;
    let encoded = URL_SAFE_NO_PAD.encode(&payload);
    let signature = sign(secret, &encoded);
    Ok(format!("{encoded}.{signature}"))
}

/// Verify the signature and deserialize a session from a cookie value.
pub fn decode_session(value: &str, secret: &str) -> Result<Session, AppError> {
    let (encoded, signature) = value
        .rsplit_once('.')
        .ok_or_else(|| AppError::Auth("Malformed session cookie".into()))?;

    if sign(secret, encoded) != signature {
        return Err(AppError::Auth("Session signature mismatch".into()));
    }

    let payload = URL_SAFE_NO_PAD
        .decode(encoded)
        .map_err(|_| AppError::Auth("Malformed session cookie".into()))?;
    serde_json::from_slice(&payload)
        .map_err(|_| AppError::Auth("Malformed session cookie".into()))
}

/// Build the session cookie the way every session-setting handler does.
#[cfg(feature = "ssr")]
pub fn session_cookie(
    session: &Session,
    secret: &str,
) -> Result<axum_extra::extract::cookie::Cookie<'static>, AppError> {
    let value = encode_session(session, secret)?;
    Ok(
        axum_extra::extract::cookie::Cookie::build((SESSION_COOKIE, value))
            .path("/")
            .http_only(true)
            .same_site(axum_extra::extract::cookie::SameSite::Lax)
            .build(),
    )
}

/// Decode the session carried in the request's cookie jar, if any.
#[cfg(feature = "ssr")]
pub fn session_from_jar(
    jar: &axum_extra::extract::CookieJar,
    secret: &str,
) -> Option<Session> {
    let cookie = jar.get(SESSION_COOKIE)?;
    decode_session(cookie.value(), secret).ok()
}

/// Anti-forgery gate applied by every API handler: a valid session
/// cookie must be present and the nonce header must match it exactly.
#[cfg(feature = "ssr")]
pub fn verify_request(
    jar: &axum_extra::extract::CookieJar,
    headers: &axum::http::HeaderMap,
    secret: &str,
) -> Result<Session, AppError> {
    let session = session_from_jar(jar, secret)
        .ok_or_else(|| AppError::Forbidden("Missing or invalid session".into()))?;

    let header_nonce = headers
        .get(NONCE_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::Forbidden("Missing anti-forgery token".into()))?;

    if header_nonce != session.nonce {
        return Err(AppError::Forbidden("Anti-forgery token mismatch".into()));
    }

    Ok(session)
}

/// `GET /api/auth/session` — the client's startup handshake.
///
/// Returns the current session info, minting a guest session (and
/// setting its cookie) when the request carries none. The nonce in the
/// response is what the client attaches to every subsequent API call.
#[cfg(feature = "ssr")]
pub async fn session_handler(
    axum::extract::State(state): axum::extract::State<crate::state::AppState>,
    jar: axum_extra::extract::CookieJar,
) -> Result<(axum_extra::extract::CookieJar, axum::Json<SessionInfo>), AppError> {
    if let Some(session) = session_from_jar(&jar, &state.session_secret) {
        return Ok((jar, axum::Json(session.info())));
    }

    let session = Session::guest();
    let jar = jar.add(session_cookie(&session, &state.session_secret)?);
    Ok((jar, axum::Json(session.info())))
}
