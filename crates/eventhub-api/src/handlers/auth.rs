//! Auth handlers: register, login, logout, logout-all, me.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum_extra::extract::cookie::CookieJar;

use eventhub_service::auth::AuthOutcome;

use crate::dto::request::{LoginRequest, RegisterRequest};
use crate::dto::response::{ApiResponse, AuthData, TerminatedData, UserData, UserView};
use crate::error::ApiResult;
use crate::extractors::{AuthUser, ClientIp, ValidatedJson};
use crate::middleware::session::{blank_cookie, session_cookie};
use crate::state::AppState;

fn sign_in(state: &AppState, jar: CookieJar, outcome: &AuthOutcome) -> (CookieJar, AuthData) {
    let cookie = session_cookie(
        &state.config.session,
        outcome.session.token.clone(),
        state.session_manager.ttl(),
    );
    let data = AuthData {
        user: UserView::from(&outcome.user),
        session: (&outcome.session.session).into(),
    };
    (jar.add(cookie), data)
}

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> ApiResult<(StatusCode, CookieJar, Json<ApiResponse<AuthData>>)> {
    let outcome = state.auth_service.register(req.into()).await?;
    let (jar, data) = sign_in(&state, jar, &outcome);

    Ok((
        StatusCode::CREATED,
        jar,
        Json(ApiResponse::with_message(data, "Registration successful")),
    ))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    ClientIp(ip): ClientIp,
    jar: CookieJar,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> ApiResult<(CookieJar, Json<ApiResponse<AuthData>>)> {
    let outcome = state
        .auth_service
        .login(&req.email, &req.password, ip)
        .await?;
    let (jar, data) = sign_in(&state, jar, &outcome);

    Ok((jar, Json(ApiResponse::with_message(data, "Login successful"))))
}

/// POST /api/auth/logout
pub async fn logout(
    State(state): State<AppState>,
    auth: AuthUser,
    jar: CookieJar,
) -> ApiResult<(CookieJar, Json<ApiResponse<()>>)> {
    state.auth_service.logout(&auth).await?;

    Ok((
        jar.add(blank_cookie(&state.config.session)),
        Json(ApiResponse::with_message((), "Logout successful")),
    ))
}

/// POST /api/auth/logout-all
pub async fn logout_all(
    State(state): State<AppState>,
    auth: AuthUser,
    jar: CookieJar,
) -> ApiResult<(CookieJar, Json<ApiResponse<TerminatedData>>)> {
    let terminated = state.auth_service.logout_all(&auth).await?;

    Ok((
        jar.add(blank_cookie(&state.config.session)),
        Json(ApiResponse::with_message(
            TerminatedData { terminated },
            "Logged out of all sessions",
        )),
    ))
}

/// GET /api/auth/me
pub async fn me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<ApiResponse<UserData>>> {
    let user = state.auth_service.me(&auth).await?;

    Ok(Json(ApiResponse::ok(UserData {
        user: UserView::from(&user),
    })))
}
