pub mod contact_form;
pub mod contacts;
pub mod dashboard;
pub mod login;
pub mod resume;
pub mod signup;
