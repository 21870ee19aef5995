use askama::Template;
use axum::http::StatusCode;
use axum::response::Html;

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginPage {
    pub error: Option<String>,
}

#[derive(Template)]
#[template(path = "signup.html")]
pub struct SignupPage {
    pub error: Option<String>,
}

#[derive(Template)]
#[template(path = "reset.html")]
pub struct ResetPage {
    pub username: Option<String>,
    pub error: Option<String>,
}

#[derive(Template)]
#[template(path = "signup_success.html")]
pub struct SignupSuccessPage {
    pub send_email: bool,
}

#[derive(Template)]
#[template(path = "reset_success.html")]
pub struct ResetSuccessPage {
    pub send_email: bool,
}

pub fn render<T: Template>(page: T) -> Result<Html<String>, (StatusCode, String)> {
    page.render()
        .map(Html)
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
}
