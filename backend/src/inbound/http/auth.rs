//! Authentication API handlers.
//!
//! ```text
//! POST /api/auth/register             {"email":"a@b.io","password":"..."}
//! POST /api/auth/login                {"email":"a@b.io","password":"..."}
//! POST /api/auth/forgot-password      {"email":"a@b.io"}
//! POST /api/auth/reset-password       {"token":"...","newPassword":"..."}
//! GET  /api/auth/reset-password?token=...
//! POST /api/auth/reset-password-form  token=...&newPassword=...
//! ```

use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};

use crate::domain::{AuthValidationError, Error, LoginCredentials, RegistrationRequest};
use crate::inbound::http::ApiResult;
use crate::inbound::http::envelope::ApiResponse;
use crate::inbound::http::state::HttpState;

/// Path under which the auth routes are mounted.
pub const AUTH_SCOPE: &str = "/api/auth";
/// Answer to every forgot-password request, known address or not.
pub const FORGOT_PASSWORD_MESSAGE: &str =
    "If the email is registered, a password reset link has been sent.";

/// Credentials body for register and login.
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CredentialsRequest {
    /// Account email; matched case-insensitively.
    pub email: Option<String>,
    /// Plaintext password; never logged or echoed back.
    pub password: Option<String>,
}

/// Body for `POST /forgot-password`.
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ForgotPasswordRequest {
    /// Address to send the reset link to, if registered.
    pub email: Option<String>,
}

/// Body for `POST /reset-password`, also used for the HTML form post.
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResetPasswordRequest {
    /// Reset token from the emailed link.
    pub token: Option<String>,
    /// Replacement password, subject to the registration policy.
    pub new_password: Option<String>,
}

/// Query for `GET /reset-password`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ResetPasswordQuery {
    /// Reset token embedded into the rendered form.
    pub token: Option<String>,
}

fn map_validation_error(err: &AuthValidationError) -> Error {
    Error::invalid_request(err.to_string())
}

/// Register a new account.
#[post("/register")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<CredentialsRequest>,
) -> ApiResult<web::Json<ApiResponse<()>>> {
    let CredentialsRequest { email, password } = payload.into_inner();
    let request = RegistrationRequest::try_from_parts(
        email.as_deref().unwrap_or_default(),
        password.as_deref().unwrap_or_default(),
    )
    .map_err(|err| map_validation_error(&err))?;
    state.accounts.register(request).await?;
    Ok(web::Json(ApiResponse::message_only(
        "User registered successfully.",
    )))
}

/// Exchange credentials for an access token returned in `data`.
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<CredentialsRequest>,
) -> ApiResult<web::Json<ApiResponse<String>>> {
    let CredentialsRequest { email, password } = payload.into_inner();
    let credentials = LoginCredentials::try_from_parts(
        email.as_deref().unwrap_or_default(),
        password.as_deref().unwrap_or_default(),
    )
    .map_err(|err| map_validation_error(&err))?;
    let grant = state.accounts.login(credentials).await?;
    Ok(web::Json(ApiResponse::ok("Login successful.", grant.token)))
}

/// Start a password reset. The response never reveals whether the address
/// is registered.
#[post("/forgot-password")]
pub async fn forgot_password(
    state: web::Data<HttpState>,
    payload: web::Json<ForgotPasswordRequest>,
) -> ApiResult<web::Json<ApiResponse<()>>> {
    let email = payload.into_inner().email.unwrap_or_default();
    state.accounts.forgot_password(&email).await?;
    Ok(web::Json(ApiResponse::message_only(FORGOT_PASSWORD_MESSAGE)))
}

async fn redeem(state: &HttpState, request: ResetPasswordRequest) -> ApiResult<HttpResponse> {
    state
        .accounts
        .reset_password(
            request.token.as_deref().unwrap_or_default(),
            request.new_password.as_deref().unwrap_or_default(),
        )
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::message_only("Password reset successfully.")))
}

/// Redeem a reset token from a JSON body.
#[post("/reset-password")]
pub async fn reset_password(
    state: web::Data<HttpState>,
    payload: web::Json<ResetPasswordRequest>,
) -> ApiResult<HttpResponse> {
    redeem(&state, payload.into_inner()).await
}

/// Redeem a reset token submitted by the HTML form.
#[post("/reset-password-form")]
pub async fn reset_password_form(
    state: web::Data<HttpState>,
    form: web::Form<ResetPasswordRequest>,
) -> ApiResult<HttpResponse> {
    redeem(&state, form.into_inner()).await
}

/// Serve the HTML form that posts a new password with the token.
#[get("/reset-password")]
pub async fn reset_password_page(query: web::Query<ResetPasswordQuery>) -> HttpResponse {
    let token = query.into_inner().token.unwrap_or_default();
    if token.trim().is_empty() {
        return HttpResponse::BadRequest()
            .content_type(ContentType::plaintext())
            .body("Token is required.");
    }
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(reset_form_html(&token))
}

fn reset_form_html(token: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<body>
  <form action="{AUTH_SCOPE}/reset-password-form" method="post">
    <input type="hidden" name="token" value="{}" />
    <label for="newPassword">New Password:</label>
    <input type="password" id="newPassword" name="newPassword" required />
    <button type="submit">Reset Password</button>
  </form>
</body>
</html>
"#,
        escape_html(token)
    )
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[cfg(test)]
#[path = "auth_tests.rs"]
mod tests;
