use js_sys::{ArrayBuffer, Uint8Array};
use leptos::prelude::*;
use tracing::debug;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};

use crate::app::use_app;
use crate::components::spinner::Spinner;

const FILE_INPUT_ID: &str = "resume-file-input";
const ACCEPTED: &str = ".pdf,.doc,.docx";

/// Resume drop zone with a browse fallback. Once a resume is on file it shows
/// the stored name and lets the user replace it.
#[component]
pub fn ResumeUpload() -> impl IntoView {
    let app = use_app();
    let (is_over, set_is_over) = signal(false);
    let (uploading, set_uploading) = signal(false);

    let has_resume = move || app.session.with(|s| s.profile().is_some_and(|p| p.has_resume));
    let resume_name = move || {
        app.session
            .with(|s| s.profile().and_then(|p| p.resume_name.clone()))
            .unwrap_or_default()
    };

    let upload = move |file: web_sys::File| {
        let services = app.services();
        set_uploading.set(true);
        spawn_local(async move {
            let name = file.name();
            let size = file.size() as u64;
            if let Err(e) = services
                .resume
                .upload(&name, size, move || read_file_bytes(file))
                .await
            {
                debug!("Resume upload did not complete: {}", e);
            }
            set_uploading.set(false);
        });
    };

    let on_drop = move |ev: web_sys::DragEvent| {
        ev.prevent_default();
        set_is_over.set(false);
        if let Some(file) = ev
            .data_transfer()
            .and_then(|dt| dt.files())
            .and_then(|files| files.get(0))
        {
            upload(file);
        }
    };

    let on_input_change = move |ev: web_sys::Event| {
        let Some(input) = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
        else {
            return;
        };
        if let Some(file) = input.files().and_then(|files| files.get(0)) {
            upload(file);
        }
        // Allow picking the same file again after a rejection
        input.set_value("");
    };

    view! {
        <Show
            when=has_resume
            fallback=move || view! {
                <div
                    class="drop-zone"
                    class:drop-zone-active=move || is_over.get()
                    class:drop-zone-loading=move || uploading.get()
                    on:dragover=move |ev: web_sys::DragEvent| {
                        ev.prevent_default();
                        set_is_over.set(true);
                    }
                    on:dragleave=move |_| set_is_over.set(false)
                    on:drop=on_drop
                >
                    <Show
                        when=move || uploading.get()
                        fallback=move || view! {
                            <label for=FILE_INPUT_ID class="drop-zone-content">
                                <div class="drop-icon">"\u{2191}"</div>
                                <p class="drop-main">
                                    "Drag & drop your resume here, or "
                                    <span class="drop-link">"browse"</span>
                                </p>
                                <p class="drop-formats">"PDF, DOC, DOCX \u{2022} Max 10MB"</p>
                            </label>
                            <input
                                type="file"
                                id=FILE_INPUT_ID
                                accept=ACCEPTED
                                style="display: none"
                                on:change=on_input_change
                            />
                        }
                    >
                        <Spinner label="Uploading..." />
                    </Show>
                </div>
            }
        >
            <label for=FILE_INPUT_ID class="resume-on-file">
                <span class="resume-check">"\u{2713}"</span>
                <div class="resume-details">
                    <p class="resume-status">"Resume uploaded"</p>
                    <p class="resume-name">{resume_name}</p>
                </div>
                <span class="resume-replace">
                    {move || if uploading.get() { "Uploading..." } else { "Click to replace" }}
                </span>
            </label>
            <input
                type="file"
                id=FILE_INPUT_ID
                accept=ACCEPTED
                style="display: none"
                on:change=on_input_change
            />
        </Show>
    }
}

/// Read the whole file into memory.
async fn read_file_bytes(file: web_sys::File) -> Result<Vec<u8>, String> {
    let buffer: ArrayBuffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| format!("{:?}", e))?
        .dyn_into()
        .map_err(|_| "Failed to convert to ArrayBuffer".to_string())?;

    Ok(Uint8Array::new(&buffer).to_vec())
}
