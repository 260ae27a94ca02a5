//! Leptos page shell, rendered on the server.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every page renders through `render_document`, which wraps the page body in
//! `Shell`. The shell reads the session to decide which navigation to show
//! (guest, member, admin), shows queued toasts, and nudges unverified visitors
//! toward verification. The nudge is advisory; the guard never enforces
//! verification.
//!
//! There is no hydration: pages are plain HTML documents, and forms post back
//! to the server.

use leptos::prelude::*;

use crate::notify::Notification;
use crate::session::Session;

/// Inputs shared by every rendered page.
pub struct Chrome {
    pub site_name: String,
    pub viewer: Option<Session>,
    pub toasts: Vec<Notification>,
}

/// One entry of the admin sidebar.
#[derive(Clone, Debug)]
pub struct SidebarLink {
    pub href: String,
    pub label: &'static str,
    pub active: bool,
}

/// Render `body` inside the site shell as a complete HTML document.
pub fn render_document(chrome: Chrome, title: &str, body: impl IntoView + 'static) -> String {
    let title = format!("{title} | {}", chrome.site_name);
    let owner = Owner::new();
    let html = owner.with(move || {
        view! {
            <html lang="en">
                <head>
                    <meta charset="utf-8"/>
                    <meta name="viewport" content="width=device-width, initial-scale=1"/>
                    <title>{title}</title>
                    <link rel="stylesheet" href="/assets/site.css"/>
                </head>
                <body>
                    <Shell chrome=chrome>{body}</Shell>
                </body>
            </html>
        }
        .to_html()
    });
    format!("<!DOCTYPE html>{html}")
}

#[component]
pub fn Shell(chrome: Chrome, children: Children) -> impl IntoView {
    let Chrome { site_name, viewer, toasts } = chrome;
    let footer = format!("\u{a9} {site_name}. Every gift changes a life.");
    let banner = viewer
        .as_ref()
        .filter(|session| !session.is_verified)
        .map(|_| view! { <VerificationBanner/> });

    view! {
        <header class="site-header">
            <a class="site-brand" href="/">{site_name}</a>
            <nav class="site-nav">
                <SiteNav viewer=viewer/>
            </nav>
        </header>
        {banner}
        <Toasts toasts=toasts/>
        <main class="site-main">{children()}</main>
        <footer class="site-footer">
            <p>{footer}</p>
        </footer>
    }
}

#[component]
fn SiteNav(viewer: Option<Session>) -> impl IntoView {
    let account = match viewer {
        None => view! {
            <a href="/login">"Log in"</a>
            <a href="/signup">"Sign up"</a>
        }
        .into_any(),
        Some(session) => {
            let admin = session.is_admin.then(|| view! { <a href="/admin">"Admin"</a> });
            view! {
                {admin}
                <a href="/profile">{session.name}</a>
                <form class="site-nav__logout" method="post" action="/logout">
                    <button type="submit">"Log out"</button>
                </form>
            }
            .into_any()
        }
    };

    view! {
        <a href="/about">"About"</a>
        <a href="/programs">"Programs"</a>
        <a href="/events">"Events"</a>
        <a href="/gallery">"Gallery"</a>
        <a href="/donate" class="site-nav__cta">"Donate"</a>
        <a href="/volunteer">"Volunteer"</a>
        {account}
    }
}

#[component]
fn VerificationBanner() -> impl IntoView {
    view! {
        <div class="banner banner--warning">
            <span>"Please verify your email address."</span>
            <a href="/verify-email">"Verify now"</a>
        </div>
    }
}

#[component]
fn Toasts(toasts: Vec<Notification>) -> impl IntoView {
    (!toasts.is_empty()).then(|| {
        view! {
            <div class="toasts" role="status">
                {toasts
                    .into_iter()
                    .map(|toast| {
                        view! {
                            <div class=format!("toast toast--{}", toast.severity.as_str())>
                                {toast.message}
                            </div>
                        }
                    })
                    .collect_view()}
            </div>
        }
    })
}

/// Admin sidebar next to the section body.
#[component]
pub fn AdminShell(sidebar: Vec<SidebarLink>, children: Children) -> impl IntoView {
    view! {
        <div class="admin-shell">
            <aside class="admin-nav">
                {sidebar
                    .into_iter()
                    .map(|link| {
                        let class = if link.active {
                            "admin-nav__link admin-nav__link--active"
                        } else {
                            "admin-nav__link"
                        };
                        view! { <a class=class href=link.href>{link.label}</a> }
                    })
                    .collect_view()}
            </aside>
            <section class="admin-body">{children()}</section>
        </div>
    }
}

#[cfg(test)]
#[path = "view_test.rs"]
mod tests;
