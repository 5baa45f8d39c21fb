//! Transient notifications. [`ToastNotifier`] is the [`Notifier`] the services
//! report through; [`Toaster`] renders whatever is currently queued.

use std::cell::Cell;
use std::time::Duration;

use leptos::prelude::*;

use crate::notify::{Notice, NoticeKind, Notifier};

const TOAST_LIFETIME: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    id: u64,
    notice: Notice,
}

pub struct ToastNotifier {
    toasts: RwSignal<Vec<Toast>>,
    next_id: Cell<u64>,
}

impl ToastNotifier {
    pub fn new() -> Self {
        Self {
            toasts: RwSignal::new(Vec::new()),
            next_id: Cell::new(0),
        }
    }

    /// The queue, for [`Toaster`] to read through context.
    pub fn toasts(&self) -> RwSignal<Vec<Toast>> {
        self.toasts
    }
}

impl Default for ToastNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier for ToastNotifier {
    fn notify(&self, notice: Notice) {
        let id = self.next_id.get();
        self.next_id.set(id + 1);

        let toasts = self.toasts;
        toasts.update(|list| list.push(Toast { id, notice }));
        set_timeout(move || dismiss(toasts, id), TOAST_LIFETIME);
    }
}

fn dismiss(toasts: RwSignal<Vec<Toast>>, id: u64) {
    toasts.try_update(|list| list.retain(|t| t.id != id));
}

#[component]
pub fn Toaster() -> impl IntoView {
    let toasts = expect_context::<RwSignal<Vec<Toast>>>();

    view! {
        <div class="toast-stack">
            <For
                each=move || toasts.get()
                key=|toast| toast.id
                children=move |toast| {
                    let class = match toast.notice.kind {
                        NoticeKind::Success => "toast toast-success",
                        NoticeKind::Error => "toast toast-error",
                    };
                    let id = toast.id;
                    view! {
                        <div class=class role="status" on:click=move |_| dismiss(toasts, id)>
                            {toast.notice.message}
                        </div>
                    }
                }
            />
        </div>
    }
}
