//! View routing and guarding

use std::fmt;

use crate::domain::SessionState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Register,
    Dashboard,
    CreateInvoice,
    Analytics,
}

impl Route {
    pub const ALL: [Route; 5] = [
        Route::Login,
        Route::Register,
        Route::Dashboard,
        Route::CreateInvoice,
        Route::Analytics,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Route::Login => "/",
            Route::Register => "/register",
            Route::Dashboard => "/dashboard",
            Route::CreateInvoice => "/create-invoice",
            Route::Analytics => "/analytics",
        }
    }

    pub fn from_path(path: &str) -> Option<Route> {
        Route::ALL.into_iter().find(|r| r.path() == path)
    }

    /// Protected routes need an authenticated session
    pub fn is_protected(&self) -> bool {
        !matches!(self, Route::Login | Route::Register)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// What the front end does for a requested route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteOutcome {
    Render(Route),
    Redirect(Route),
    /// Session not restored yet; protected content waits
    Loading,
    /// Session not restored yet; public content stays empty
    Blank,
}

/// Guard a route against the session state
pub fn guard(route: Route, state: &SessionState) -> RouteOutcome {
    match (state, route.is_protected()) {
        (SessionState::Unknown, true) => RouteOutcome::Loading,
        (SessionState::Unknown, false) => RouteOutcome::Blank,
        (SessionState::Anonymous, true) => RouteOutcome::Redirect(Route::Login),
        (SessionState::Anonymous, false) => RouteOutcome::Render(route),
        (SessionState::Authenticated(_), true) => RouteOutcome::Render(route),
        (SessionState::Authenticated(_), false) => RouteOutcome::Redirect(Route::Dashboard),
    }
}

/// Resolve a raw path; unknown paths redirect to the login view
pub fn resolve(path: &str, state: &SessionState) -> RouteOutcome {
    match Route::from_path(path) {
        Some(route) => guard(route, state),
        None => RouteOutcome::Redirect(Route::Login),
    }
}
