use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::app::use_app;
use crate::components::resume_upload::ResumeUpload;

#[component]
pub fn ResumePage() -> impl IntoView {
    let app = use_app();

    // Pick up the stored file name, which login does not return
    Effect::new(move |_| {
        let services = app.services();
        spawn_local(async move {
            services.resume.sync_status().await;
        });
    });

    view! {
        <div class="page page-narrow">
            <h2>"Resume"</h2>
            <p class="page-description">
                "Upload your resume here. It will be automatically attached to all outreach emails you send."
            </p>
            <section class="card">
                <h3>"Upload Resume"</h3>
                <p class="section-description">
                    "Supported formats: PDF, DOC, DOCX. Maximum file size: 10MB."
                </p>
                <ResumeUpload />
            </section>
        </div>
    }
}
