use leptos::prelude::*;

use crate::api::types::EmailStatus;

#[component]
pub fn StatusBadge(
    /// Delivery state reported by the backend
    status: EmailStatus,
) -> impl IntoView {
    let (icon, class) = match status {
        EmailStatus::Sent => ("\u{2713}", "status-badge status-sent"),
        EmailStatus::Failed => ("\u{2717}", "status-badge status-failed"),
        EmailStatus::Pending => ("\u{2022}", "status-badge status-pending"),
    };

    view! {
        <span class=class>
            <span class="status-icon">{icon}</span>
            {status.label()}
        </span>
    }
}
