//! Authentication route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::middleware::{clear_current_user, set_current_user};
use crate::models::CurrentUser;
use crate::services::AuthService;
use crate::services::auth::AuthError;
use crate::state::AppState;

/// Login form fields.
#[derive(Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Registration form fields.
#[derive(Deserialize)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Query parameters carrying a flash message.
#[derive(Deserialize, Default)]
pub struct MessageQuery {
    pub error: Option<String>,
    pub success: Option<String>,
}

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub user: Option<CurrentUser>,
    pub error: Option<String>,
    pub success: Option<String>,
}

/// Register page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/register.html")]
pub struct RegisterTemplate {
    pub user: Option<CurrentUser>,
    pub error: Option<String>,
}

/// Display the login page.
pub async fn login_page(Query(query): Query<MessageQuery>) -> impl IntoResponse {
    LoginTemplate {
        user: None,
        error: query.error.map(flash_text),
        success: query.success,
    }
}

/// Handle login form submission.
#[instrument(skip_all, fields(email = %form.email))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Response {
    let auth = AuthService::new(state.pool());

    match auth.login(&form.email, &form.password).await {
        Ok(user) => {
            let current = CurrentUser {
                id: user.id,
                name: user.name,
                is_admin: user.is_admin,
            };

            if let Err(e) = set_current_user(&session, &current).await {
                tracing::error!("Failed to set session: {}", e);
                return Redirect::to("/login?error=session").into_response();
            }

            if current.is_admin {
                Redirect::to("/admin").into_response()
            } else {
                Redirect::to("/menu").into_response()
            }
        }
        Err(e) => {
            tracing::warn!("Login failed: {}", e);
            Redirect::to("/login?error=credentials").into_response()
        }
    }
}

/// Display the registration page.
pub async fn register_page(Query(query): Query<MessageQuery>) -> impl IntoResponse {
    RegisterTemplate {
        user: None,
        error: query.error.map(flash_text),
    }
}

/// Handle registration form submission.
#[instrument(skip_all, fields(email = %form.email))]
pub async fn register(
    State(state): State<AppState>,
    Form(form): Form<RegisterForm>,
) -> Response {
    let auth = AuthService::new(state.pool());

    match auth.register(&form.name, &form.email, &form.password).await {
        Ok(_) => Redirect::to("/login?success=Account+created,+please+log+in").into_response(),
        Err(AuthError::UserAlreadyExists) => {
            Redirect::to("/register?error=exists").into_response()
        }
        Err(AuthError::WeakPassword(_)) => {
            Redirect::to("/register?error=weak_password").into_response()
        }
        Err(AuthError::InvalidEmail(_)) => {
            Redirect::to("/register?error=bad_email").into_response()
        }
        Err(AuthError::InvalidName(_)) => Redirect::to("/register?error=bad_name").into_response(),
        Err(e) => {
            tracing::error!("Registration failed: {}", e);
            Redirect::to("/register?error=internal").into_response()
        }
    }
}

/// Handle logout.
pub async fn logout(session: Session) -> Response {
    if let Err(e) = clear_current_user(&session).await {
        tracing::error!("Failed to clear session: {}", e);
    }
    Redirect::to("/login").into_response()
}

/// Map a flash code from the query string to display text.
fn flash_text(code: String) -> String {
    match code.as_str() {
        "credentials" => "Invalid email or password".to_owned(),
        "session" => "Could not start a session, please try again".to_owned(),
        "exists" => "An account with this email already exists".to_owned(),
        "weak_password" => "Password must be at least 8 characters".to_owned(),
        "bad_email" => "That email address doesn't look right".to_owned(),
        "bad_name" => "Please enter your name".to_owned(),
        _ => "Something went wrong, please try again".to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flash_text_known_codes() {
        assert_eq!(flash_text("credentials".to_owned()), "Invalid email or password");
        assert_eq!(
            flash_text("exists".to_owned()),
            "An account with this email already exists"
        );
    }

    #[test]
    fn test_flash_text_unknown_code_is_generic() {
        assert_eq!(
            flash_text("whatever".to_owned()),
            "Something went wrong, please try again"
        );
    }
}
