pub mod compose_modal;
pub mod contact_table;
pub mod field_error;
pub mod filter_bar;
pub mod guard;
pub mod layout;
pub mod modal;
pub mod pagination;
pub mod resume_upload;
pub mod sidebar;
pub mod spinner;
pub mod status_badge;
pub mod toasts;
