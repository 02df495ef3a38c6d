// Client-side routes and the guard deciding what an unauthenticated user may see

use serde::{Deserialize, Serialize};

use crate::session::SessionState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Sections,
    Diary,
    Users,
    Login,
    Register,
    About,
}

impl Route {
    pub const ALL: [Route; 7] = [
        Route::Home,
        Route::Sections,
        Route::Diary,
        Route::Users,
        Route::Login,
        Route::Register,
        Route::About,
    ];

    pub fn path(self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Sections => "/sections",
            Route::Diary => "/diary",
            Route::Users => "/users",
            Route::Login => "/login",
            Route::Register => "/register",
            Route::About => "/about",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Route::Home => "Home",
            Route::Sections => "Sections",
            Route::Diary => "Diary",
            Route::Users => "Members",
            Route::Login => "Log in",
            Route::Register => "Register",
            Route::About => "About",
        }
    }

    /// Reachable without a credential
    pub fn is_public(self) -> bool {
        matches!(self, Route::Login | Route::Register | Route::About)
    }

    /// Match a requested path. Query string, fragment, trailing slashes and
    /// case are ignored.
    pub fn from_path(path: &str) -> Option<Route> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let normalized = path.trim().trim_matches('/').to_ascii_lowercase();

        Route::ALL
            .into_iter()
            .find(|route| route.path().trim_start_matches('/') == normalized)
    }
}

/// Redirect target for paths that match no route
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Fallback {
    #[default]
    Home,
    Login,
}

impl Fallback {
    pub fn route(self) -> Route {
        match self {
            Fallback::Home => Route::Home,
            Fallback::Login => Route::Login,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Allow(Route),
    RedirectTo(Route),
}

/// Decide whether `path` is rendered for the given session state
pub fn guard(state: &SessionState, path: &str, fallback: Fallback) -> GuardDecision {
    match Route::from_path(path) {
        Some(route) if route.is_public() => GuardDecision::Allow(route),
        Some(route) if state.is_authenticated() => GuardDecision::Allow(route),
        Some(_) => GuardDecision::RedirectTo(Route::Login),
        None => GuardDecision::RedirectTo(fallback.route()),
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RouteGuard {
    fallback: Fallback,
}

impl RouteGuard {
    pub fn new(fallback: Fallback) -> Self {
        Self { fallback }
    }

    pub fn check(&self, state: &SessionState, path: &str) -> GuardDecision {
        guard(state, path, self.fallback)
    }

    /// Follow redirects until a route is allowed
    pub fn resolve(&self, state: &SessionState, path: &str) -> Route {
        let mut decision = self.check(state, path);

        // unknown -> fallback -> login is the longest chain
        for _ in 0..Route::ALL.len() {
            match decision {
                GuardDecision::Allow(route) => return route,
                GuardDecision::RedirectTo(target) => {
                    tracing::debug!("Redirecting {} -> {}", path, target.path());
                    decision = self.check(state, target.path());
                }
            }
        }

        Route::Login
    }
}

/// Navigation entries visible for the current session
pub fn nav_links(state: &SessionState) -> Vec<Route> {
    let mut links = Vec::new();

    if state.is_authenticated() {
        links.extend([Route::Home, Route::Sections, Route::Diary, Route::Users]);
    }

    links.push(Route::About);

    if !state.is_authenticated() {
        links.push(Route::Login);
    }

    links
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_path_normalizes() {
        assert_eq!(Route::from_path("/"), Some(Route::Home));
        assert_eq!(Route::from_path(""), Some(Route::Home));
        assert_eq!(Route::from_path("/diary/"), Some(Route::Diary));
        assert_eq!(Route::from_path("users"), Some(Route::Users));
        assert_eq!(Route::from_path("/Sections?tab=mine"), Some(Route::Sections));
        assert_eq!(Route::from_path("/about#team"), Some(Route::About));
        assert_eq!(Route::from_path("/admin"), None);
        assert_eq!(Route::from_path("/diary/42"), None);
    }

    #[test]
    fn test_paths_round_trip() {
        for route in Route::ALL {
            assert_eq!(Route::from_path(route.path()), Some(route));
        }
    }

    #[test]
    fn test_nav_links_depend_on_session() {
        let anonymous = nav_links(&SessionState::Anonymous);
        assert_eq!(anonymous, vec![Route::About, Route::Login]);

        let authenticated = nav_links(&SessionState::Authenticated(
            crate::session::Credential::new("t"),
        ));
        assert!(authenticated.contains(&Route::Diary));
        assert!(!authenticated.contains(&Route::Login));
    }
}
