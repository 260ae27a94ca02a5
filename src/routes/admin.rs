//! Admin shell: dashboard and section pages.
//!
//! Access is enforced by the guard middleware before these handlers run. The
//! sections render placeholder tables; there is no admin data store.

use axum::Extension;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum_extra::extract::cookie::CookieJar;
use leptos::prelude::*;

use super::guard::Viewer;
use super::render_page;
use crate::state::AppState;
use crate::view::{AdminShell, SidebarLink};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminSection {
    Dashboard,
    Programs,
    Events,
    Gallery,
    Reviews,
    Donations,
    Volunteers,
    Users,
    Notifications,
    Settings,
}

impl AdminSection {
    pub const ALL: [Self; 10] = [
        Self::Dashboard,
        Self::Programs,
        Self::Events,
        Self::Gallery,
        Self::Reviews,
        Self::Donations,
        Self::Volunteers,
        Self::Users,
        Self::Notifications,
        Self::Settings,
    ];

    #[must_use]
    pub fn slug(self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Programs => "programs",
            Self::Events => "events",
            Self::Gallery => "gallery",
            Self::Reviews => "reviews",
            Self::Donations => "donations",
            Self::Volunteers => "volunteers",
            Self::Users => "users",
            Self::Notifications => "notifications",
            Self::Settings => "settings",
        }
    }

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Programs => "Programs",
            Self::Events => "Events",
            Self::Gallery => "Gallery",
            Self::Reviews => "Reviews",
            Self::Donations => "Donations",
            Self::Volunteers => "Volunteers",
            Self::Users => "Users",
            Self::Notifications => "Notifications",
            Self::Settings => "Settings",
        }
    }

    #[must_use]
    pub fn summary(self) -> &'static str {
        match self {
            Self::Dashboard => "Overview of site activity.",
            Self::Programs => "Create and edit the programs shown on the public site.",
            Self::Events => "Schedule upcoming events.",
            Self::Gallery => "Manage published photos.",
            Self::Reviews => "Moderate testimonials before they appear on the site.",
            Self::Donations => "Review received donations.",
            Self::Volunteers => "Review volunteer applications.",
            Self::Users => "Member accounts and roles.",
            Self::Notifications => "Announcements sent to members.",
            Self::Settings => "Site name, contact details and integrations.",
        }
    }

    /// Column headings of the section's table.
    #[must_use]
    pub fn columns(self) -> &'static [&'static str] {
        match self {
            Self::Dashboard => &["Metric", "Value"],
            Self::Programs => &["Title", "Status", "Updated"],
            Self::Events => &["Event", "Date", "Location"],
            Self::Gallery => &["Image", "Caption", "Published"],
            Self::Reviews => &["Author", "Rating", "Status"],
            Self::Donations => &["Donor", "Amount", "Date"],
            Self::Volunteers => &["Name", "Interest", "Status"],
            Self::Users => &["Name", "Email", "Role"],
            Self::Notifications => &["Title", "Audience", "Sent"],
            Self::Settings => &["Setting", "Value"],
        }
    }

    #[must_use]
    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.slug() == slug)
    }

    #[must_use]
    pub fn href(self) -> String {
        format!("/admin/{}", self.slug())
    }
}

#[component]
fn AdminSectionPage(section: AdminSection) -> impl IntoView {
    let columns = section.columns();
    view! {
        <h1>{section.title()}</h1>
        <p>{section.summary()}</p>
        <table class="admin-table">
            <thead>
                <tr>{columns.iter().map(|column| view! { <th>{*column}</th> }).collect_view()}</tr>
            </thead>
            <tbody>
                <tr>
                    <td class="empty" colspan=columns.len().to_string()>"Nothing here yet."</td>
                </tr>
            </tbody>
        </table>
    }
}

fn sidebar(active: Option<AdminSection>) -> Vec<SidebarLink> {
    AdminSection::ALL
        .into_iter()
        .map(|s| SidebarLink { href: s.href(), label: s.title(), active: Some(s) == active })
        .collect()
}

fn render(state: &AppState, viewer: &Viewer, jar: CookieJar, section: AdminSection) -> Response {
    let links = sidebar(Some(section));
    let body = view! {
        <AdminShell sidebar=links>
            <AdminSectionPage section=section/>
        </AdminShell>
    };
    render_page(state, viewer, jar, section.title(), body)
}

pub async fn dashboard(State(state): State<AppState>, Extension(viewer): Extension<Viewer>, jar: CookieJar) -> Response {
    render(&state, &viewer, jar, AdminSection::Dashboard)
}

pub async fn section(
    State(state): State<AppState>,
    Extension(viewer): Extension<Viewer>,
    Path(slug): Path<String>,
    jar: CookieJar,
) -> Response {
    if let Some(section) = AdminSection::from_slug(&slug) {
        return render(&state, &viewer, jar, section);
    }
    tracing::debug!(%slug, "unknown admin section");
    let links = sidebar(None);
    let body = view! {
        <AdminShell sidebar=links>
            <h1>"Unknown admin section"</h1>
            <p>
                <a href="/admin">"Back to the dashboard"</a>
            </p>
        </AdminShell>
    };
    let response = render_page(&state, &viewer, jar, "Not found", body);
    (StatusCode::NOT_FOUND, response).into_response()
}

#[cfg(test)]
#[path = "admin_test.rs"]
mod tests;
