use std::rc::Rc;

use leptos::prelude::*;
use leptos_router::components::*;
use leptos_router::path;
use tracing::warn;

use crate::api::{ApiClient, Backend};
use crate::auth::Authenticator;
use crate::components::guard::RequireAuth;
use crate::components::toasts::{ToastNotifier, Toaster};
use crate::config::AppConfig;
use crate::contacts::{ContactListController, ListState};
use crate::notify::Notifier;
use crate::pages::contact_form::ContactFormPage;
use crate::pages::contacts::ContactsPage;
use crate::pages::dashboard::DashboardPage;
use crate::pages::login::LoginPage;
use crate::pages::resume::ResumePage;
use crate::pages::signup::SignupPage;
use crate::resume::ResumeUploader;
use crate::session::{SessionSnapshot, SessionStore};
use crate::storage::{BrowserStorage, KeyValueStore, MemoryStore};

/// Everything the views talk to, constructed once at startup.
pub struct AppServices {
    pub session: Rc<SessionStore>,
    pub backend: Rc<dyn Backend>,
    pub auth: Authenticator,
    pub contacts: Rc<ContactListController>,
    pub resume: ResumeUploader,
}

impl AppServices {
    pub fn new(
        config: AppConfig,
        storage: Box<dyn KeyValueStore>,
        notifier: Rc<dyn Notifier>,
    ) -> Self {
        let session = Rc::new(SessionStore::open(storage));
        let page_size = config.page_size;
        let backend: Rc<dyn Backend> = Rc::new(ApiClient::new(config, session.clone()));
        let contacts = Rc::new(ContactListController::new(
            backend.clone(),
            session.clone(),
            notifier.clone(),
            page_size,
        ));
        // Lives as long as the services; holds the controller weakly
        contacts.follow_session();
        Self {
            auth: Authenticator::new(backend.clone(), session.clone(), notifier.clone()),
            contacts,
            resume: ResumeUploader::new(backend.clone(), session.clone(), notifier),
            session,
            backend,
        }
    }
}

/// Reactive handles shared through context. The services themselves are
/// single-threaded and live in a local stored value.
#[derive(Clone, Copy)]
pub struct AppContext {
    services: StoredValue<Rc<AppServices>, LocalStorage>,
    pub session: ReadSignal<SessionSnapshot>,
    pub contacts: ReadSignal<ListState>,
}

impl AppContext {
    pub fn services(&self) -> Rc<AppServices> {
        self.services.get_value()
    }
}

pub fn use_app() -> AppContext {
    expect_context::<AppContext>()
}

fn open_storage() -> Box<dyn KeyValueStore> {
    match BrowserStorage::open() {
        Ok(storage) => Box::new(storage),
        Err(e) => {
            warn!("{}; session will not survive a reload", e);
            Box::new(MemoryStore::new())
        }
    }
}

#[component]
pub fn App(config: AppConfig) -> impl IntoView {
    let notifier = Rc::new(ToastNotifier::new());
    provide_context(notifier.toasts());

    let services = Rc::new(AppServices::new(config, open_storage(), notifier));

    // Mirror the single-threaded stores into signals for rendering
    let (session, set_session) = signal(services.session.snapshot());
    let session_mirror = services
        .session
        .subscribe(move |snap| set_session.set(snap.clone()));

    let (contacts, set_contacts) = signal(services.contacts.state());
    let contacts_mirror = services
        .contacts
        .subscribe(move |state| set_contacts.set(state.clone()));

    let app = AppContext {
        services: StoredValue::new_local(services),
        session,
        contacts,
    };
    provide_context(app);
    on_cleanup(move || {
        if let Some(services) = app.services.try_get_value() {
            services.session.unsubscribe(session_mirror);
            services.contacts.unsubscribe(contacts_mirror);
        }
    });

    view! {
        <Router>
            <Toaster />
            <Routes fallback=|| view! { <Redirect path="/dashboard" /> }>
                <Route path=path!("/login") view=LoginPage />
                <Route path=path!("/signup") view=SignupPage />
                <Route
                    path=path!("/dashboard")
                    view=|| view! { <RequireAuth><DashboardPage /></RequireAuth> }
                />
                <Route
                    path=path!("/hr-management")
                    view=|| view! { <RequireAuth><ContactsPage /></RequireAuth> }
                />
                <Route
                    path=path!("/hr-management/add")
                    view=|| view! { <RequireAuth><ContactFormPage /></RequireAuth> }
                />
                <Route
                    path=path!("/hr-management/edit/:id")
                    view=|| view! { <RequireAuth><ContactFormPage /></RequireAuth> }
                />
                <Route
                    path=path!("/resume")
                    view=|| view! { <RequireAuth><ResumePage /></RequireAuth> }
                />
                <Route path=path!("/") view=|| view! { <Redirect path="/dashboard" /> } />
            </Routes>
        </Router>
    }
}
