use leptos::prelude::*;
use leptos_router::components::Redirect;

use crate::app::use_app;
use crate::components::layout::Layout;
use crate::components::spinner::Spinner;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Gate {
    Pending,
    Allowed,
    Denied,
}

/// Renders its children inside the app layout for a signed-in user and
/// redirects to /login otherwise. Waits while the session is rehydrating.
#[component]
pub fn RequireAuth(children: ChildrenFn) -> impl IntoView {
    let app = use_app();

    // Memoized so resume status changes do not remount the page
    let gate = Memo::new(move |_| {
        app.session.with(|s| {
            if s.loading {
                Gate::Pending
            } else if s.is_authenticated() {
                Gate::Allowed
            } else {
                Gate::Denied
            }
        })
    });

    move || match gate.get() {
        Gate::Pending => view! {
            <div class="page-loading">
                <Spinner />
            </div>
        }
        .into_any(),
        Gate::Allowed => {
            let children = children.clone();
            view! { <Layout>{children()}</Layout> }.into_any()
        }
        Gate::Denied => view! { <Redirect path="/login" /> }.into_any(),
    }
}
