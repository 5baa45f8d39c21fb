use chrono::NaiveDate;
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::api::types::EmailStatus;
use crate::app::use_app;
use crate::contacts::{FilterChange, Filters};

const DATE_FORMAT: &str = "%Y-%m-%d";

fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).ok()
}

fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format(DATE_FORMAT).to_string())
        .unwrap_or_default()
}

/// Collapsible status / company / date-range filters for the contact list.
#[component]
pub fn FilterBar() -> impl IntoView {
    let app = use_app();
    let (open, set_open) = signal(false);
    let filters = Memo::new(move |_| app.contacts.with(|s| s.filters.clone()));
    let has_filters = move || !filters.with(Filters::is_empty);

    let apply = move |change: FilterChange| {
        let services = app.services();
        spawn_local(async move {
            services.contacts.set_filter(change).await;
        });
    };
    let clear = move |_| {
        let services = app.services();
        spawn_local(async move {
            services.contacts.clear_filters().await;
        });
    };

    view! {
        <div class="filter-bar">
            <div class="filter-toolbar">
                <button
                    class="btn btn-outline"
                    class:filter-active=has_filters
                    on:click=move |_| set_open.update(|o| *o = !*o)
                >
                    "Filters"
                    {move || has_filters().then_some(" \u{2022}")}
                </button>
                <Show when=has_filters>
                    <button class="btn btn-clear" on:click=clear>
                        "\u{2715} Clear"
                    </button>
                </Show>
            </div>

            <Show when=move || open.get()>
                <div class="card filter-panel">
                    <div class="form-group">
                        <label>"Status"</label>
                        <select
                            prop:value=move || {
                                filters.with(|f| f.status.map(EmailStatus::as_str).unwrap_or(""))
                            }
                            on:change=move |ev| {
                                apply(FilterChange::Status(EmailStatus::parse(&event_target_value(&ev))))
                            }
                        >
                            <option value="">"All Statuses"</option>
                            {EmailStatus::ALL
                                .into_iter()
                                .map(|status| {
                                    view! { <option value=status.as_str()>{status.label()}</option> }
                                })
                                .collect_view()}
                        </select>
                    </div>
                    <div class="form-group">
                        <label>"Company"</label>
                        <input
                            type="text"
                            placeholder="Search company..."
                            prop:value=move || {
                                filters.with(|f| f.company_name.clone().unwrap_or_default())
                            }
                            on:input=move |ev| apply(FilterChange::CompanyName(event_target_value(&ev)))
                        />
                    </div>
                    <div class="form-group">
                        <label>"From Date"</label>
                        <input
                            type="date"
                            prop:value=move || filters.with(|f| format_date(f.start_date))
                            on:change=move |ev| {
                                apply(FilterChange::StartDate(parse_date(&event_target_value(&ev))))
                            }
                        />
                    </div>
                    <div class="form-group">
                        <label>"To Date"</label>
                        <input
                            type="date"
                            prop:value=move || filters.with(|f| format_date(f.end_date))
                            on:change=move |ev| {
                                apply(FilterChange::EndDate(parse_date(&event_target_value(&ev))))
                            }
                        />
                    </div>
                </div>
            </Show>
        </div>
    }
}
