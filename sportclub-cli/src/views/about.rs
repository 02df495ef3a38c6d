use colored::Colorize;

use super::{heading, Page, RenderOptions};
use crate::routes::Route;

/// Static club description
#[derive(Debug, Default)]
pub struct AboutView;

impl Page for AboutView {
    fn route(&self) -> Route {
        Route::About
    }

    fn render(&self, _options: &RenderOptions) -> String {
        [
            heading(Route::About, "ℹ️"),
            String::new(),
            "SportCenter brings the club's sections, your training diary and".to_string(),
            "the member roster to one place.".to_string(),
            String::new(),
            format!("Client version {}", env!("CARGO_PKG_VERSION"))
                .dimmed()
                .to_string(),
        ]
        .join("\n")
    }
}
