use leptos::prelude::*;

#[component]
pub fn Spinner(
    /// Optional caption under the spinner
    #[prop(optional, into)]
    label: Option<String>,
) -> impl IntoView {
    view! {
        <div class="loading-indicator">
            <div class="spinner"></div>
            {label.map(|text| view! { <p>{text}</p> })}
        </div>
    }
}

/// Small inline spinner for busy buttons.
#[component]
pub fn ButtonSpinner() -> impl IntoView {
    view! { <span class="btn-spinner"></span> }
}
