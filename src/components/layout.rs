use leptos::prelude::*;

use crate::components::sidebar::Sidebar;

/// Shell for every signed-in page: fixed sidebar plus the content column.
#[component]
pub fn Layout(children: Children) -> impl IntoView {
    view! {
        <div class="app-layout">
            <Sidebar />
            <main class="main-content">{children()}</main>
        </div>
    }
}
