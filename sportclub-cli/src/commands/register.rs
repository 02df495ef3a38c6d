use anyhow::Result;
use clap::Args;
use dialoguer::{Input, Password};

use super::{fail_if, with_spinner, AppContext};
use crate::views::{Page, RegisterView};

#[derive(Args)]
pub struct RegisterCommand {
    /// Username (prompted when omitted)
    #[arg(short, long)]
    username: Option<String>,

    /// Email address (prompted when omitted)
    #[arg(short, long)]
    email: Option<String>,

    /// Password (prompted when omitted)
    #[arg(short, long)]
    password: Option<String>,
}

impl RegisterCommand {
    pub async fn execute(self, ctx: &AppContext) -> Result<()> {
        let mut view = RegisterView::new();

        view.username = match self.username {
            Some(username) => username,
            None => Input::new().with_prompt("Username").interact_text()?,
        };
        view.email = match self.email {
            Some(email) => email,
            None => Input::new().with_prompt("Email").interact_text()?,
        };
        view.password = match self.password {
            Some(password) => password,
            None => Password::new()
                .with_prompt("Password")
                .with_confirmation("Confirm password", "Passwords don't match")
                .interact()?,
        };

        with_spinner("Creating account…", view.submit(&ctx.client)).await;
        println!("{}", view.render(&ctx.render_options()));

        let failed = view.flash().map_or(true, |f| f.is_error());
        if !failed {
            println!();
            println!("You can now log in with 'sportclub login'.");
        }
        fail_if(failed)
    }
}
