use anyhow::Result;
use clap::Args;
use dialoguer::{Input, Password};

use super::{fail_if, with_spinner, AppContext};
use crate::routes::nav_links;
use crate::views::{LoginView, Page};

#[derive(Args)]
pub struct LoginCommand {
    /// Username (prompted when omitted)
    #[arg(short, long)]
    username: Option<String>,

    /// Password (prompted when omitted)
    #[arg(short, long)]
    password: Option<String>,
}

impl LoginCommand {
    pub async fn execute(self, ctx: &AppContext) -> Result<()> {
        if ctx.state().is_authenticated() {
            println!("Already logged in. Use 'sportclub logout' to switch accounts.");
            return Ok(());
        }

        let username = match self.username {
            Some(username) => username,
            None => Input::new().with_prompt("Username").interact_text()?,
        };
        let password = match self.password {
            Some(password) => password,
            None => Password::new().with_prompt("Password").interact()?,
        };

        let mut view = LoginView::new(username, password);
        with_spinner("Logging in…", view.submit(&ctx.client)).await;
        println!("{}", view.render(&ctx.render_options()));

        match view.redirect() {
            Some(route) => {
                println!();
                println!("Continue with 'sportclub {}'.", route.title().to_lowercase());
                let pages: Vec<_> = nav_links(&ctx.state())
                    .into_iter()
                    .map(|r| r.path())
                    .collect();
                println!("Pages: {}", pages.join("  "));
                Ok(())
            }
            None => fail_if(true),
        }
    }
}
