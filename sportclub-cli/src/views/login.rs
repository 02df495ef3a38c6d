use super::{flash_line, heading, Flash, FormState, Page, RenderOptions};
use crate::api::{ApiClient, ApiError};
use crate::routes::Route;
use crate::session::Credential;

/// Login form (`/login`)
#[derive(Debug, Default)]
pub struct LoginView {
    pub username: String,
    pub password: String,
    form: FormState,
    redirect: Option<Route>,
}

impl LoginView {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            ..Self::default()
        }
    }

    pub fn flash(&self) -> Option<&Flash> {
        self.form.flash()
    }

    /// Where to navigate after a successful login
    pub fn redirect(&self) -> Option<Route> {
        self.redirect
    }

    pub fn prepare(&mut self) -> Result<(String, String), ApiError> {
        let username = self.username.trim().to_string();

        if username.is_empty() {
            return Err(self.form.reject(ApiError::validation("Enter your username")));
        }
        if self.password.is_empty() {
            return Err(self.form.reject(ApiError::validation("Enter your password")));
        }

        self.form.begin()?;
        Ok((username, self.password.clone()))
    }

    pub fn apply(&mut self, result: Result<Credential, ApiError>) {
        match result {
            Ok(_) => {
                self.password.clear();
                self.redirect = Some(Route::Home);
                self.form.finish(Flash::success("Logged in"));
            }
            Err(e) => self.form.finish(Flash::from(&e)),
        }
    }

    /// Submit the form; the client stores the credential in the session
    pub async fn submit(&mut self, client: &ApiClient) {
        if let Ok((username, password)) = self.prepare() {
            let result = client.login(&username, &password).await;
            self.apply(result);
        }
    }
}

impl Page for LoginView {
    fn route(&self) -> Route {
        Route::Login
    }

    fn render(&self, _options: &RenderOptions) -> String {
        let mut lines = vec![heading(Route::Login, "🔑")];
        if let Some(flash) = self.form.flash() {
            lines.push(flash_line(flash));
        }
        if self.redirect.is_none() {
            lines.push("No account yet? sportclub register".to_string());
        }
        lines.join("\n")
    }
}
