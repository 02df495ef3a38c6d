use sportclub_cli::routes::{guard, nav_links, Fallback, GuardDecision, Route, RouteGuard};
use sportclub_cli::session::{Credential, SessionState};

fn signed_in() -> SessionState {
    SessionState::Authenticated(Credential::new("abc"))
}

#[test]
fn test_anonymous_diary_redirects_to_login() {
    let decision = guard(&SessionState::Anonymous, "/diary", Fallback::Home);
    assert_eq!(decision, GuardDecision::RedirectTo(Route::Login));
}

#[test]
fn test_public_routes_always_allowed() {
    for route in Route::ALL.into_iter().filter(|r| r.is_public()) {
        for state in [SessionState::Anonymous, signed_in()] {
            assert_eq!(
                guard(&state, route.path(), Fallback::Home),
                GuardDecision::Allow(route)
            );
        }
    }
}

#[test]
fn test_protected_routes_follow_session() {
    for route in Route::ALL.into_iter().filter(|r| !r.is_public()) {
        assert_eq!(
            guard(&signed_in(), route.path(), Fallback::Home),
            GuardDecision::Allow(route)
        );
        assert_eq!(
            guard(&SessionState::Anonymous, route.path(), Fallback::Home),
            GuardDecision::RedirectTo(Route::Login)
        );
    }
}

#[test]
fn test_unknown_path_uses_fallback() {
    assert_eq!(
        guard(&signed_in(), "/nope", Fallback::Home),
        GuardDecision::RedirectTo(Route::Home)
    );
    assert_eq!(
        guard(&signed_in(), "/nope", Fallback::Login),
        GuardDecision::RedirectTo(Route::Login)
    );
}

#[test]
fn test_resolve_follows_redirect_chain() {
    let guard = RouteGuard::new(Fallback::Home);

    // unknown -> home -> login
    assert_eq!(guard.resolve(&SessionState::Anonymous, "/nope"), Route::Login);
    assert_eq!(guard.resolve(&signed_in(), "/nope"), Route::Home);
    assert_eq!(guard.resolve(&signed_in(), "/Diary/?tab=1"), Route::Diary);
}

#[test]
fn test_nav_links_depend_on_session() {
    let anonymous = nav_links(&SessionState::Anonymous);
    assert!(anonymous.contains(&Route::Login));
    assert!(!anonymous.contains(&Route::Diary));

    let member = nav_links(&signed_in());
    assert!(member.contains(&Route::Diary));
    assert!(!member.contains(&Route::Login));
}
