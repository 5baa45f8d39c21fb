use leptos::prelude::*;
use leptos_router::hooks::use_location;

use crate::app::use_app;

#[component]
pub fn Sidebar() -> impl IntoView {
    let app = use_app();

    let full_name = move || {
        app.session
            .with(|s| s.profile().map(|p| p.full_name.clone()))
            .unwrap_or_default()
    };
    let email = move || {
        app.session
            .with(|s| s.profile().map(|p| p.email.clone()))
            .unwrap_or_default()
    };
    let initial = move || {
        full_name()
            .chars()
            .next()
            .map(|c| c.to_uppercase().to_string())
            .unwrap_or_else(|| "U".to_string())
    };

    // Clearing the session sends the route guard back to /login
    let on_logout = move |_| app.services().auth.logout();

    view! {
        <nav class="sidebar">
            <a href="/dashboard" class="sidebar-header">
                <span class="brand-mark">"T"</span>
                <div>
                    <h1 class="sidebar-title">"TalentConnect"</h1>
                    <p class="sidebar-subtitle">"Outreach Manager"</p>
                </div>
            </a>
            <ul class="nav-list">
                <NavItem path="/dashboard" label="Dashboard" />
                <NavItem path="/hr-management" label="HR Contacts" />
                <NavItem path="/resume" label="Resume" />
            </ul>
            <div class="sidebar-footer">
                <div class="user-chip">
                    <span class="user-avatar">{initial}</span>
                    <div class="user-info">
                        <p class="user-name">{full_name}</p>
                        <p class="user-email">{email}</p>
                    </div>
                </div>
                <button class="btn btn-ghost logout-btn" on:click=on_logout>
                    "Sign Out"
                </button>
            </div>
        </nav>
    }
}

#[component]
fn NavItem(path: &'static str, label: &'static str) -> impl IntoView {
    let location = use_location();
    let active = move || location.pathname.get() == path;

    view! {
        <li class="nav-item">
            <a href=path class="nav-link" class:nav-link-active=active>
                {label}
            </a>
        </li>
    }
}
