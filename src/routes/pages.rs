//! Public and member pages.
//!
//! Page bodies are static marketing content rendered as Leptos components;
//! forms post to `routes::auth`. Donation and volunteer pages are
//! placeholders: no payment or application data is processed.

use axum::Extension;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum_extra::extract::cookie::CookieJar;
use leptos::prelude::*;

use super::guard::Viewer;
use super::render_page;
use crate::session::Session;
use crate::state::AppState;

/// Programs shown on the home and programs pages: (slug, title, summary).
pub const PROGRAMS: &[(&str, &str, &str)] = &[
    ("clean-water", "Clean Water", "Wells and filtration for rural communities."),
    ("education", "Education for All", "School supplies, scholarships and mentoring."),
    ("health", "Community Health", "Mobile clinics and maternal care."),
    ("food-security", "Food Security", "Seed banks, school meals and food parcels."),
];

/// Upcoming events: (title, date, place).
pub const EVENTS: &[(&str, &str, &str)] = &[
    ("Charity Run", "Saturday, 14 November", "Riverside Park"),
    ("Volunteer Orientation", "Wednesday, 18 November", "Community Hall"),
    ("Winter Gala", "Friday, 11 December", "Grand Hotel Ballroom"),
];

// =============================================================================
// COMPONENTS
// =============================================================================

#[component]
fn ProgramCards() -> impl IntoView {
    view! {
        <ul class="cards">
            {PROGRAMS
                .iter()
                .map(|(slug, title, summary)| {
                    view! {
                        <li class="card">
                            <h3>
                                <a href=format!("/programs/{slug}")>{*title}</a>
                            </h3>
                            <p>{*summary}</p>
                        </li>
                    }
                })
                .collect_view()}
        </ul>
    }
}

#[component]
fn HomePage(site_name: String, viewer: Option<Session>) -> impl IntoView {
    let lead = match viewer {
        Some(session) => format!("Welcome back, {}.", session.name),
        None => "Together we bring water, learning and care to those who need it most.".to_owned(),
    };
    view! {
        <section class="hero">
            <h1>{site_name}</h1>
            <p class="lead">{lead}</p>
            <p>
                <a class="button" href="/donate">"Donate"</a>
                <a class="button button--secondary" href="/volunteer">"Volunteer"</a>
            </p>
        </section>
        <section>
            <h2>"Our programs"</h2>
            <ProgramCards/>
        </section>
    }
}

#[component]
fn AboutPage(site_name: String) -> impl IntoView {
    let text = format!(
        "{site_name} is a volunteer-driven foundation funding clean water, education and health \
         programs. Every donation is tracked to the program it supports."
    );
    view! {
        <h1>"About us"</h1>
        <p>{text}</p>
    }
}

#[component]
fn EventsPage() -> impl IntoView {
    view! {
        <h1>"Events"</h1>
        <ul class="events">
            {EVENTS
                .iter()
                .map(|(title, date, place)| {
                    view! {
                        <li>
                            <strong>{*title}</strong>
                            <span class="events__when">{format!(" \u{b7} {date} \u{b7} {place}")}</span>
                        </li>
                    }
                })
                .collect_view()}
        </ul>
    }
}

#[component]
fn ProgramPage(title: &'static str, summary: &'static str) -> impl IntoView {
    view! {
        <h1>{title}</h1>
        <p>{summary}</p>
        <p>
            <a class="button" href="/donate">"Support this program"</a>
        </p>
    }
}

#[component]
fn ProfilePage(viewer: Option<Session>) -> impl IntoView {
    let details = viewer.map(|session| {
        view! {
            <dl class="profile">
                <dt>"Name"</dt>
                <dd>{session.name}</dd>
                <dt>"Email"</dt>
                <dd>{session.email}</dd>
                <dt>"Role"</dt>
                <dd>{if session.is_admin { "Administrator" } else { "Member" }}</dd>
                <dt>"Registration"</dt>
                <dd>{if session.is_registered { "Complete" } else { "Pending" }}</dd>
                <dt>"Email verified"</dt>
                <dd>{if session.is_verified { "Yes" } else { "No" }}</dd>
            </dl>
        }
    });
    view! {
        <h1>"Your profile"</h1>
        {details}
    }
}

#[component]
fn VerifyEmailPage(viewer: Option<Session>, echoed_link: Option<String>) -> impl IntoView {
    let body = match viewer {
        Some(session) if session.is_verified => {
            view! { <p>"Your email address is verified. Thank you!"</p> }.into_any()
        }
        Some(session) => {
            let dev_link = echoed_link.map(|link| {
                let href = link.clone();
                view! {
                    <p class="dev-echo">
                        <span>"Development link: "</span>
                        <a href=href>{link}</a>
                    </p>
                }
            });
            view! {
                <p>
                    <span>"We sent a confirmation link to "</span>
                    <strong>{session.email}</strong>
                </p>
                <form method="post" action="/verify-email/check">
                    <button type="submit">"I have confirmed my email"</button>
                </form>
                <form method="post" action="/verify-email/resend">
                    <button type="submit" class="button--secondary">"Resend email"</button>
                </form>
                {dev_link}
            }
            .into_any()
        }
        None => view! { <p>"Log in to verify your email address."</p> }.into_any(),
    };
    view! {
        <h1>"Verify your email"</h1>
        {body}
    }
}

#[component]
fn LoginPage(viewer: Option<Session>) -> impl IntoView {
    let signed_in = viewer.map(|session| {
        let text = format!("You are already signed in as {}.", session.email);
        view! { <p class="notice">{text}</p> }
    });
    view! {
        <h1>"Log in"</h1>
        {signed_in}
        <form class="auth-form" method="post" action="/login">
            <label>"Email" <input type="email" name="email" required=true/></label>
            <label>"Password" <input type="password" name="password" required=true/></label>
            <button type="submit">"Log in"</button>
        </form>
        <p>
            <a href="/forgot-password">"Forgot your password?"</a>
            <a href="/signup">"Create an account"</a>
        </p>
    }
}

#[component]
fn SignupPage() -> impl IntoView {
    view! {
        <h1>"Create an account"</h1>
        <form class="auth-form" method="post" action="/signup">
            <label>"Name" <input type="text" name="name" required=true/></label>
            <label>"Email" <input type="email" name="email" required=true/></label>
            <label>"Password" <input type="password" name="password" minlength="6" required=true/></label>
            <button type="submit">"Sign up"</button>
        </form>
        <p>
            <span>"Already have an account? "</span>
            <a href="/login">"Log in"</a>
        </p>
    }
}

// =============================================================================
// HANDLERS
// =============================================================================

pub async fn home(State(state): State<AppState>, Extension(viewer): Extension<Viewer>, jar: CookieJar) -> Response {
    let site_name = state.config.site_name.clone();
    let session = viewer.0.clone();
    render_page(&state, &viewer, jar, "Home", view! { <HomePage site_name=site_name viewer=session/> })
}

pub async fn about(State(state): State<AppState>, Extension(viewer): Extension<Viewer>, jar: CookieJar) -> Response {
    let site_name = state.config.site_name.clone();
    render_page(&state, &viewer, jar, "About", view! { <AboutPage site_name=site_name/> })
}

pub async fn events(State(state): State<AppState>, Extension(viewer): Extension<Viewer>, jar: CookieJar) -> Response {
    render_page(&state, &viewer, jar, "Events", view! { <EventsPage/> })
}

pub async fn gallery(State(state): State<AppState>, Extension(viewer): Extension<Viewer>, jar: CookieJar) -> Response {
    let body = view! {
        <h1>"Gallery"</h1>
        <p>"Photos from the field are published here after each program visit."</p>
    };
    render_page(&state, &viewer, jar, "Gallery", body)
}

pub async fn contact(State(state): State<AppState>, Extension(viewer): Extension<Viewer>, jar: CookieJar) -> Response {
    let body = view! {
        <h1>"Contact"</h1>
        <p>
            <span>"Write to us at "</span>
            <a href="mailto:hello@hopefoundation.org">"hello@hopefoundation.org"</a>
        </p>
    };
    render_page(&state, &viewer, jar, "Contact", body)
}

pub async fn programs(State(state): State<AppState>, Extension(viewer): Extension<Viewer>, jar: CookieJar) -> Response {
    let body = view! {
        <h1>"Programs"</h1>
        <ProgramCards/>
    };
    render_page(&state, &viewer, jar, "Programs", body)
}

pub async fn program(
    State(state): State<AppState>,
    Extension(viewer): Extension<Viewer>,
    Path(slug): Path<String>,
    jar: CookieJar,
) -> Response {
    let Some(&(_, title, summary)) = PROGRAMS.iter().find(|(s, _, _)| *s == slug) else {
        return not_found(State(state), Extension(viewer), jar).await;
    };
    render_page(&state, &viewer, jar, title, view! { <ProgramPage title=title summary=summary/> })
}

pub async fn donate(State(state): State<AppState>, Extension(viewer): Extension<Viewer>, jar: CookieJar) -> Response {
    let body = view! {
        <h1>"Donate"</h1>
        <p>"Choose an amount to support our programs."</p>
        <ul class="amounts">
            <li>"$25"</li>
            <li>"$50"</li>
            <li>"$100"</li>
            <li>"$250"</li>
        </ul>
        <p class="notice">"Online payments are not enabled yet. Please contact us to arrange a gift."</p>
    };
    render_page(&state, &viewer, jar, "Donate", body)
}

pub async fn volunteer(State(state): State<AppState>, Extension(viewer): Extension<Viewer>, jar: CookieJar) -> Response {
    let body = view! {
        <h1>"Volunteer"</h1>
        <p>"We welcome help at events, in the office and in the field."</p>
        <p class="notice">"Volunteer applications open soon. We will email you when they do."</p>
    };
    render_page(&state, &viewer, jar, "Volunteer", body)
}

pub async fn profile(State(state): State<AppState>, Extension(viewer): Extension<Viewer>, jar: CookieJar) -> Response {
    let session = viewer.0.clone();
    render_page(&state, &viewer, jar, "Profile", view! { <ProfilePage viewer=session/> })
}

pub async fn verify_email(State(state): State<AppState>, Extension(viewer): Extension<Viewer>, jar: CookieJar) -> Response {
    let session = viewer.0.clone();
    let echoed_link = session
        .as_ref()
        .filter(|s| !s.is_verified)
        .and_then(|s| state.auth.echoed_verification_link(s));
    let body = view! { <VerifyEmailPage viewer=session echoed_link=echoed_link/> };
    render_page(&state, &viewer, jar, "Verify email", body)
}

pub async fn login(State(state): State<AppState>, Extension(viewer): Extension<Viewer>, jar: CookieJar) -> Response {
    let session = viewer.0.clone();
    render_page(&state, &viewer, jar, "Log in", view! { <LoginPage viewer=session/> })
}

pub async fn signup(State(state): State<AppState>, Extension(viewer): Extension<Viewer>, jar: CookieJar) -> Response {
    render_page(&state, &viewer, jar, "Sign up", view! { <SignupPage/> })
}

pub async fn forgot_password(State(state): State<AppState>, Extension(viewer): Extension<Viewer>, jar: CookieJar) -> Response {
    let body = view! {
        <h1>"Reset your password"</h1>
        <form class="auth-form" method="post" action="/forgot-password">
            <label>"Email" <input type="email" name="email" required=true/></label>
            <button type="submit">"Send reset instructions"</button>
        </form>
    };
    render_page(&state, &viewer, jar, "Reset password", body)
}

pub async fn not_found(State(state): State<AppState>, Extension(viewer): Extension<Viewer>, jar: CookieJar) -> Response {
    let body = view! {
        <h1>"Page not found"</h1>
        <p>
            <a href="/">"Back to the home page"</a>
        </p>
    };
    let response = render_page(&state, &viewer, jar, "Not found", body);
    (StatusCode::NOT_FOUND, response).into_response()
}
