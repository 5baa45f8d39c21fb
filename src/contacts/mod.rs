pub mod controller;
pub mod form;
pub mod state;

pub use controller::{ContactListController, DeleteError, FormError, SendError};
pub use form::{ContactDraft, DraftField};
pub use state::{FilterChange, Filters, ListState, Pagination, Selection};
