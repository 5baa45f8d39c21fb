use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use wasm_bindgen_futures::spawn_local;

use crate::app::use_app;
use crate::auth::LoginForm;
use crate::components::field_error::FieldError;
use crate::components::spinner::ButtonSpinner;
use crate::contacts::FormError;
use crate::validate::FieldErrors;

#[component]
pub fn LoginPage() -> impl IntoView {
    let app = use_app();
    let navigate = StoredValue::new_local(use_navigate());
    let form = RwSignal::new(LoginForm::default());
    let errors = RwSignal::new(FieldErrors::default());
    let (submitting, set_submitting) = signal(false);

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let services = app.services();
        let navigate = navigate.get_value();
        let current = form.get_untracked();
        set_submitting.set(true);
        spawn_local(async move {
            match services.auth.login(&current).await {
                Ok(_) => {
                    errors.set(FieldErrors::default());
                    navigate("/dashboard", Default::default());
                }
                Err(FormError::Invalid(invalid)) => errors.set(invalid),
                Err(_) => {}
            }
            set_submitting.set(false);
        });
    };

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <div class="auth-brand">
                    <span class="brand-mark brand-mark-large">"T"</span>
                    <h1>"Welcome Back"</h1>
                    <p class="page-description">"Sign in to your Talent Connect account"</p>
                </div>

                <form class="card auth-form" on:submit=on_submit>
                    <div class="form-group">
                        <label>"Email"</label>
                        <input
                            type="email"
                            placeholder="you@example.com"
                            prop:value=move || form.with(|f| f.email.clone())
                            on:input=move |ev| form.update(|f| f.email = event_target_value(&ev))
                        />
                        <FieldError errors=errors field="email" />
                    </div>
                    <div class="form-group">
                        <label>"Password"</label>
                        <input
                            type="password"
                            placeholder="\u{2022}\u{2022}\u{2022}\u{2022}\u{2022}\u{2022}\u{2022}\u{2022}"
                            prop:value=move || form.with(|f| f.password.clone())
                            on:input=move |ev| form.update(|f| f.password = event_target_value(&ev))
                        />
                        <FieldError errors=errors field="password" />
                    </div>

                    <button type="submit" class="btn btn-primary btn-block" disabled=move || submitting.get()>
                        <Show when=move || submitting.get() fallback=|| "Sign In">
                            <ButtonSpinner />
                            "Signing in..."
                        </Show>
                    </button>

                    <p class="auth-switch">
                        "Don't have an account? "
                        <a href="/signup">"Sign Up"</a>
                    </p>
                </form>
            </div>
        </div>
    }
}
