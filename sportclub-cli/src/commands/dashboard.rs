use anyhow::Result;
use clap::Args;

use super::AppContext;
use crate::routes::Route;
use crate::ui::Dashboard;

#[derive(Args)]
pub struct DashboardCommand {}

impl DashboardCommand {
    pub async fn execute(self, ctx: &AppContext) -> Result<()> {
        if !ctx.enter(Route::Home) {
            return Ok(());
        }

        let mut dashboard = Dashboard::new(ctx.state(), ctx.config.ui.date_format.clone())?;
        let result = dashboard.run(&ctx.client).await;
        dashboard.cleanup()?;
        result
    }
}
