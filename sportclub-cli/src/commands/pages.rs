use anyhow::Result;

use super::{fail_if, with_spinner, AppContext};
use crate::routes::{GuardDecision, Route};
use crate::views::{
    AboutView, DiaryView, HomeView, LoginView, RegisterView, SectionsView, UsersView,
};

/// Navigate to an arbitrary path, following guard redirects
pub async fn open(ctx: &AppContext, path: &str) -> Result<()> {
    let state = ctx.state();

    if let GuardDecision::RedirectTo(target) = ctx.guard.check(&state, path) {
        println!("↪ {} redirects to {}", path, target.path());
    }

    match ctx.guard.resolve(&state, path) {
        Route::Home => home(ctx).await,
        Route::Sections => sections(ctx).await,
        Route::Diary => diary(ctx).await,
        Route::Users => users(ctx).await,
        Route::About => about(ctx).await,
        Route::Login => {
            ctx.print(&LoginView::default());
            println!("Use 'sportclub login' to authenticate.");
            Ok(())
        }
        Route::Register => {
            ctx.print(&RegisterView::new());
            println!("Use 'sportclub register' to create an account.");
            Ok(())
        }
    }
}

pub async fn home(ctx: &AppContext) -> Result<()> {
    if !ctx.enter(Route::Home) {
        return Ok(());
    }

    let mut view = HomeView::new();
    with_spinner("Loading…", view.load(&ctx.client)).await;
    ctx.print(&view);
    Ok(())
}

pub async fn sections(ctx: &AppContext) -> Result<()> {
    if !ctx.enter(Route::Sections) {
        return Ok(());
    }

    let mut view = SectionsView::new();
    with_spinner("Loading sections…", view.load(&ctx.client)).await;
    ctx.print(&view);
    fail_if(view.sections().is_failed())
}

pub async fn join_section(ctx: &AppContext, id: i64) -> Result<()> {
    if !ctx.enter(Route::Sections) {
        return Ok(());
    }

    let mut view = SectionsView::new();
    with_spinner("Loading sections…", view.load(&ctx.client)).await;

    if view.sections().is_failed() {
        ctx.print(&view);
        return fail_if(true);
    }

    with_spinner("Joining…", view.join(&ctx.client, Some(id))).await;
    ctx.print(&view);
    fail_if(view.flash().map_or(true, |f| f.is_error()))
}

pub async fn diary(ctx: &AppContext) -> Result<()> {
    if !ctx.enter(Route::Diary) {
        return Ok(());
    }

    let mut view = DiaryView::new();
    with_spinner("Loading diary…", view.load(&ctx.client)).await;
    ctx.print(&view);
    fail_if(view.trainings().is_failed())
}

pub async fn users(ctx: &AppContext) -> Result<()> {
    if !ctx.enter(Route::Users) {
        return Ok(());
    }

    let mut view = UsersView::new();
    with_spinner("Loading members…", view.load(&ctx.client)).await;
    ctx.print(&view);
    fail_if(view.members().is_failed())
}

pub async fn about(ctx: &AppContext) -> Result<()> {
    if ctx.enter(Route::About) {
        ctx.print(&AboutView);
    }
    Ok(())
}
