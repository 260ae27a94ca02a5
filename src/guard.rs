//! Route guard: decides whether a path may render for the current session.
//!
//! SYSTEM CONTEXT
//! ==============
//! `decide` is a pure function of (path, session, loading). It never
//! navigates or notifies by itself; the web host's middleware performs the
//! redirect and queues the paired notification. The guard keeps no state, so
//! a session change shows up on the very next navigation and never
//! retroactively on a page already rendered.

use crate::notify::Notification;
use crate::session::Session;

pub const HOME_PATH: &str = "/";
pub const LOGIN_PATH: &str = "/login";
pub const SIGNUP_PATH: &str = "/signup";
pub const FORGOT_PASSWORD_PATH: &str = "/forgot-password";
pub const ADMIN_PREFIX: &str = "/admin";

const AUTH_FLOW_PATHS: &[&str] = &[LOGIN_PATH, SIGNUP_PATH, FORGOT_PASSWORD_PATH];
const REGISTERED_PREFIXES: &[&str] = &["/programs"];
const AUTHENTICATED_PREFIXES: &[&str] = &["/donate", "/volunteer", "/profile", "/verify-email"];

/// How a path is gated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RouteClass {
    /// The public home page.
    Home,
    /// Login, signup and password recovery.
    AuthFlow,
    /// Anything under `/admin`.
    Admin,
    /// Needs a session; `registration` additionally needs a registered one.
    Protected { registration: bool },
    /// No requirements.
    Open,
}

/// Outcome of a guard evaluation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Decision {
    Allow,
    /// Session is still being restored; decide again once it has loaded.
    Defer,
    Redirect(Redirect),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Redirect {
    /// Where to send the visitor.
    pub target: &'static str,
    /// Path to come back to after a successful login.
    pub return_to: Option<String>,
    /// The one notification explaining the denial.
    pub notice: Notification,
}

/// Classify a request path. Trailing slashes are ignored.
#[must_use]
pub fn classify(path: &str) -> RouteClass {
    let path = normalize_path(path);
    if path == HOME_PATH {
        return RouteClass::Home;
    }
    if AUTH_FLOW_PATHS.contains(&path) {
        return RouteClass::AuthFlow;
    }
    if under(path, ADMIN_PREFIX) {
        return RouteClass::Admin;
    }
    if REGISTERED_PREFIXES.iter().any(|prefix| under(path, prefix)) {
        return RouteClass::Protected { registration: true };
    }
    if AUTHENTICATED_PREFIXES.iter().any(|prefix| under(path, prefix)) {
        return RouteClass::Protected { registration: false };
    }
    RouteClass::Open
}

/// Evaluate the guard. First matching rule wins.
#[must_use]
pub fn decide(path: &str, session: Option<&Session>, loading: bool) -> Decision {
    if loading {
        return Decision::Defer;
    }

    match (classify(path), session) {
        (RouteClass::Home | RouteClass::AuthFlow | RouteClass::Open, _) => Decision::Allow,
        (RouteClass::Admin, None) => Decision::Redirect(Redirect {
            target: LOGIN_PATH,
            return_to: None,
            notice: Notification::error("Please log in with an administrator account to access the admin area."),
        }),
        (RouteClass::Admin, Some(session)) if !session.is_admin => Decision::Redirect(Redirect {
            target: HOME_PATH,
            return_to: None,
            notice: Notification::error("You do not have permission to access the admin area."),
        }),
        (RouteClass::Admin, Some(_)) => Decision::Allow,
        (RouteClass::Protected { .. }, None) => Decision::Redirect(Redirect {
            target: LOGIN_PATH,
            return_to: Some(normalize_path(path).to_owned()),
            notice: Notification::warning("Please log in to continue."),
        }),
        (RouteClass::Protected { registration: true }, Some(session)) if !session.is_registered => {
            Decision::Redirect(Redirect {
                target: SIGNUP_PATH,
                return_to: None,
                notice: Notification::info("Please complete your registration to access this page."),
            })
        }
        (RouteClass::Protected { .. }, Some(_)) => Decision::Allow,
    }
}

/// Accept only same-site absolute paths as a post-login destination.
#[must_use]
pub fn safe_return_path(raw: &str) -> Option<&str> {
    let ok = raw.starts_with('/')
        && !raw.starts_with("//")
        && !raw.contains('\\')
        && !raw.chars().any(char::is_control);
    ok.then_some(raw)
}

fn normalize_path(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() { HOME_PATH } else { trimmed }
}

fn under(path: &str, prefix: &str) -> bool {
    path == prefix
        || path
            .strip_prefix(prefix)
            .is_some_and(|rest| rest.starts_with('/'))
}

#[cfg(test)]
#[path = "guard_test.rs"]
mod tests;
