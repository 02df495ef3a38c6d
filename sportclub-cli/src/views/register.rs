use super::{flash_line, heading, Flash, FormState, Page, RenderOptions};
use crate::api::{ApiClient, ApiError};
use crate::models::RegisterRequest;
use crate::routes::Route;

/// Registration form (`/register`)
#[derive(Debug, Default)]
pub struct RegisterView {
    pub username: String,
    pub email: String,
    pub password: String,
    form: FormState,
}

impl RegisterView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn flash(&self) -> Option<&Flash> {
        self.form.flash()
    }

    pub fn prepare(&mut self) -> Result<RegisterRequest, ApiError> {
        let username = self.username.trim();
        let email = self.email.trim();

        if username.is_empty() {
            return Err(self.form.reject(ApiError::validation("Choose a username")));
        }
        if !email.contains('@') {
            return Err(self
                .form
                .reject(ApiError::validation("Enter a valid email address")));
        }
        if self.password.is_empty() {
            return Err(self.form.reject(ApiError::validation("Choose a password")));
        }

        let request = RegisterRequest {
            username: username.to_string(),
            email: email.to_string(),
            password: self.password.clone(),
        };

        self.form.begin()?;
        Ok(request)
    }

    pub fn apply(&mut self, result: Result<String, ApiError>) {
        match result {
            Ok(message) => {
                self.password.clear();
                self.form.finish(Flash::success(message));
            }
            Err(e) => self.form.finish(Flash::from(&e)),
        }
    }

    pub async fn submit(&mut self, client: &ApiClient) {
        if let Ok(request) = self.prepare() {
            let result = client.register(&request).await;
            self.apply(result);
        }
    }
}

impl Page for RegisterView {
    fn route(&self) -> Route {
        Route::Register
    }

    fn render(&self, _options: &RenderOptions) -> String {
        let mut lines = vec![heading(Route::Register, "📝")];
        if let Some(flash) = self.form.flash() {
            lines.push(flash_line(flash));
            if !flash.is_error() {
                lines.push("You can now log in: sportclub login".to_string());
            }
        }
        lines.join("\n")
    }
}
