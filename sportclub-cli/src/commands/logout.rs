use anyhow::Result;
use clap::Args;

use super::AppContext;
use crate::session;

#[derive(Args)]
pub struct LogoutCommand {}

impl LogoutCommand {
    pub async fn execute(self, ctx: &AppContext) -> Result<()> {
        let mut session = session::lock(&ctx.session);

        if !session.is_authenticated() {
            println!("You are not logged in.");
            return Ok(());
        }

        session.logout()?;
        println!("✅ Logged out");

        Ok(())
    }
}
