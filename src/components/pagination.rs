use leptos::prelude::*;

use crate::contacts::Pagination;

/// Page summary plus previous / numbered / next buttons. Hidden for a single page.
#[component]
pub fn PaginationBar(
    #[prop(into)] pagination: Signal<Pagination>,
    /// Called with the 0-based page index to show
    on_page: Callback<u32>,
) -> impl IntoView {
    let summary = move || {
        pagination.with(|p| {
            format!(
                "Showing page {} of {} ({} total)",
                p.page_index + 1,
                p.total_pages,
                p.total_elements
            )
        })
    };
    let go_previous = move |_| {
        let current = pagination.with_untracked(|p| p.page_index);
        on_page.run(current.saturating_sub(1));
    };
    let go_next = move |_| {
        let current = pagination.with_untracked(|p| p.page_index);
        on_page.run(current + 1);
    };

    view! {
        <Show when=move || pagination.with(Pagination::is_visible)>
            <div class="pagination">
                <p class="pagination-summary">{summary}</p>
                <div class="pagination-buttons">
                    <button
                        class="page-btn"
                        title="Previous page"
                        disabled=move || !pagination.with(Pagination::has_previous)
                        on:click=go_previous
                    >
                        "\u{2039}"
                    </button>
                    <For
                        each=move || pagination.with(Pagination::window)
                        key=|index| *index
                        children=move |index| {
                            view! {
                                <button
                                    class="page-btn"
                                    class:page-btn-active=move || {
                                        pagination.with(|p| p.page_index == index)
                                    }
                                    on:click=move |_| on_page.run(index)
                                >
                                    {index + 1}
                                </button>
                            }
                        }
                    />
                    <button
                        class="page-btn"
                        title="Next page"
                        disabled=move || !pagination.with(Pagination::has_next)
                        on:click=go_next
                    >
                        "\u{203a}"
                    </button>
                </div>
            </div>
        </Show>
    }
}
