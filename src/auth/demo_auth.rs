use serde::{Deserialize, Serialize};

use crate::auth::models::{AuthenticatedUser, SessionInfo};
use crate::error::AppError;

/// Built-in demo account definition.
#[derive(Debug, Clone)]
struct DemoAccount {
    username: &'static str,
    password: &'static str,
    display_name: &'static str,
}

/// Hard-coded accounts available when the server runs in demo mode.
const DEMO_ACCOUNTS: &[DemoAccount] = &[
    DemoAccount {
        username: "student",
        password: "student",
        display_name: "Sam Student",
    },
    DemoAccount {
        username: "registrar",
        password: "registrar",
        display_name: "Rae Registrar",
    },
];

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Login response body: session info including the fresh nonce.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub message: String,
    #[serde(flatten)]
    pub session: SessionInfo,
}

/// Validate demo credentials and return the corresponding user.
pub fn authenticate_demo_user(
    username: &str,
    password: &str,
) -> Result<AuthenticatedUser, AppError> {
    DEMO_ACCOUNTS
        .iter()
        .find(|a| a.username == username && a.password == password)
        .map(|a| AuthenticatedUser {
            user_id: format!("demo-{}", a.username),
            display_name: a.display_name.to_string(),
        })
        .ok_or_else(|| AppError::Auth("Invalid username or password".into()))
}

/// `POST /api/auth/login` — demo login.
///
/// On success, replaces the session cookie with a signed-in session
/// carrying a fresh nonce.
#[cfg(feature = "ssr")]
pub async fn login_handler(
    axum::extract::State(state): axum::extract::State<crate::state::AppState>,
    jar: axum_extra::extract::CookieJar,
    axum::Json(req): axum::Json<LoginRequest>,
) -> Result<(axum_extra::extract::CookieJar, axum::Json<LoginResponse>), AppError> {
    use crate::auth::session::{session_cookie, Session};

    let user = authenticate_demo_user(&req.username, &req.password)?;
    let session = Session::for_user(user);
    let jar = jar.add(session_cookie(&session, &state.session_secret)?);

    Ok((
        jar,
        axum::Json(LoginResponse {
            message: "Login successful".to_string(),
            session: session.info(),
        }),
    ))
}

/// `POST /api/auth/logout` — drops back to a fresh guest session.
#[cfg(feature = "ssr")]
pub async fn logout_handler(
    axum::extract::State(state): axum::extract::State<crate::state::AppState>,
    jar: axum_extra::extract::CookieJar,
) -> Result<(axum_extra::extract::CookieJar, axum::Json<SessionInfo>), AppError> {
    use crate::auth::session::{session_cookie, Session};

    let session = Session::guest();
    let jar = jar.add(session_cookie(&session, &state.session_secret)?);
    Ok((jar, axum::Json(session.info())))
}
