use leptos::prelude::*;
use tracing::warn;
use wasm_bindgen_futures::spawn_local;

use crate::api::types::DashboardStats;
use crate::app::use_app;
use crate::components::resume_upload::ResumeUpload;
use crate::components::spinner::Spinner;

struct StatCard {
    label: &'static str,
    class: &'static str,
    value: u64,
}

fn stat_cards(stats: &DashboardStats) -> [StatCard; 4] {
    [
        StatCard {
            label: "Total HR Contacts",
            class: "stat-card stat-total",
            value: stats.total_hr_contacts,
        },
        StatCard {
            label: "Emails Sent",
            class: "stat-card stat-sent",
            value: stats.emails_sent,
        },
        StatCard {
            label: "Pending",
            class: "stat-card stat-pending",
            value: stats.emails_pending,
        },
        StatCard {
            label: "Failed",
            class: "stat-card stat-failed",
            value: stats.emails_failed,
        },
    ]
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let app = use_app();
    let (stats, set_stats) = signal(None::<DashboardStats>);
    let (is_loading, set_is_loading) = signal(true);

    // Counters are informational; a failure only goes to the console
    Effect::new(move |_| {
        let services = app.services();
        spawn_local(async move {
            match services.backend.dashboard_stats().await {
                Ok(loaded) => set_stats.set(Some(loaded)),
                Err(e) => warn!("Failed to load stats: {}", e),
            }
            set_is_loading.set(false);
        });
    });

    view! {
        <div class="page">
            <div class="page-header">
                <div>
                    <h2>"Dashboard"</h2>
                    <p class="page-description">"Overview of your outreach activity"</p>
                </div>
                <a href="/hr-management" class="btn btn-primary">"Manage HR Contacts"</a>
            </div>

            <Show when=move || !is_loading.get() fallback=|| view! { <Spinner /> }>
                <div class="stats-grid">
                    {move || {
                        stats
                            .get()
                            .map(|s| {
                                stat_cards(&s)
                                    .into_iter()
                                    .map(|card| {
                                        view! {
                                            <div class=card.class>
                                                <p class="stat-value">{card.value}</p>
                                                <p class="stat-label">{card.label}</p>
                                            </div>
                                        }
                                    })
                                    .collect_view()
                            })
                    }}
                </div>
            </Show>

            <section class="card">
                <h3>"Your Resume"</h3>
                <p class="section-description">
                    "Upload your resume once and it will be automatically attached to all outreach emails."
                </p>
                <ResumeUpload />
            </section>
        </div>
    }
}
