use anyhow::Result;
use clap::Args;
use colored::Colorize;

use super::{with_spinner, AppContext};
use crate::routes::nav_links;

#[derive(Args)]
pub struct StatusCommand {
    /// Skip the backend reachability check
    #[arg(long)]
    offline: bool,
}

impl StatusCommand {
    pub async fn execute(self, ctx: &AppContext) -> Result<()> {
        let state = ctx.state();

        println!("{}", "SportCenter status".bold());
        println!("────────────────────────────────");
        println!("Backend:  {}", ctx.client.base_url());

        if state.is_authenticated() {
            println!("Session:  {}", "logged in".green());
        } else {
            println!("Session:  {}", "anonymous".yellow());
        }

        let pages: Vec<_> = nav_links(&state).into_iter().map(|r| r.path()).collect();
        println!("Pages:    {}", pages.join("  "));
        if state.is_authenticated() {
            println!("Actions:  sportclub logout");
        }

        if self.offline {
            return Ok(());
        }

        match with_spinner("Contacting backend…", ctx.client.ping()).await {
            Ok(message) => println!("Server:   {} ({})", "reachable".green(), message),
            Err(e) => println!("Server:   {} ({})", "unreachable".red(), e),
        }

        Ok(())
    }
}
