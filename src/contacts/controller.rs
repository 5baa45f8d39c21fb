//! Orchestrates the contact list against the backend: fetching pages,
//! reacting to filter/page changes, and the create/update/delete/send flows.
//!
//! Every successful mutation leads to exactly one list fetch. Delete and send
//! run on the list view and [`ContactListController::invalidate`] in place.
//! Create and update hand control back to the list view, so they only mark
//! the page stale and the view's mount fetch replaces it.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use thiserror::Error;
use tracing::{debug, info};

use super::form::ContactDraft;
use super::state::{FilterChange, ListState};
use crate::api::types::{ContactId, EmailSendRequest, EmailSendResult, HrContact};
use crate::api::Backend;
use crate::error::ApiError;
use crate::notify::Notifier;
use crate::observe::{Observers, Subscription};
use crate::session::SessionStore;
use crate::validate::FieldErrors;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Please correct the highlighted fields")]
    Invalid(FieldErrors),
    #[error("A save is already in progress")]
    Busy,
    #[error("{0}")]
    Api(ApiError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SendError {
    #[error("No contacts selected")]
    NoRecipients,
    #[error("Please fill in both subject and body")]
    EmptyMessage,
    #[error("Please upload your resume first from the Dashboard")]
    NoResume,
    #[error("Emails are already being sent")]
    Busy,
    #[error("{0}")]
    Api(ApiError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeleteError {
    #[error("No contact is awaiting deletion")]
    NothingPending,
    #[error("A delete is already in progress")]
    Busy,
    #[error("{0}")]
    Api(ApiError),
}

type Flag = fn(&mut ListState) -> &mut bool;

fn saving(state: &mut ListState) -> &mut bool {
    &mut state.saving
}

fn sending(state: &mut ListState) -> &mut bool {
    &mut state.sending
}

fn deleting(state: &mut ListState) -> &mut bool {
    &mut state.deleting
}

pub struct ContactListController {
    backend: Rc<dyn Backend>,
    session: Rc<SessionStore>,
    notifier: Rc<dyn Notifier>,
    state: RefCell<ListState>,
    observers: Observers<ListState>,
}

impl ContactListController {
    pub fn new(
        backend: Rc<dyn Backend>,
        session: Rc<SessionStore>,
        notifier: Rc<dyn Notifier>,
        page_size: u32,
    ) -> Self {
        Self {
            backend,
            session,
            notifier,
            state: RefCell::new(ListState::new(page_size)),
            observers: Observers::default(),
        }
    }

    pub fn state(&self) -> ListState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self, callback: impl Fn(&ListState) + 'static) -> Subscription {
        self.observers.subscribe(callback)
    }

    pub fn unsubscribe(&self, subscription: Subscription) {
        self.observers.unsubscribe(subscription);
    }

    /// Empty the list whenever the session ends, so the next account never
    /// sees this one's contacts, filters or selection.
    pub fn follow_session(self: &Rc<Self>) -> Subscription {
        let controller: Weak<Self> = Rc::downgrade(self);
        self.session.subscribe(move |snapshot| {
            if snapshot.is_authenticated() || snapshot.loading {
                return;
            }
            if let Some(controller) = controller.upgrade() {
                controller.reset();
            }
        })
    }

    pub fn reset(&self) {
        debug!("Contact list reset");
        self.update(ListState::reset);
    }

    fn publish(&self) {
        let snapshot = self.state();
        self.observers.emit(&snapshot);
    }

    fn update(&self, f: impl FnOnce(&mut ListState)) {
        f(&mut self.state.borrow_mut());
        self.publish();
    }

    // -- Fetching --

    /// Fetch the page described by the current filters and page index. Only
    /// the most recently issued fetch may replace the list or clear `loading`.
    pub async fn refresh(&self) {
        let (seq, query) = self.state.borrow_mut().begin_fetch();
        self.publish();
        let _loading = LoadingGuard {
            controller: self,
            seq,
        };

        debug!(seq, page = query.page, "Fetching HR contacts");
        let result = self.backend.list_contacts(&query).await;

        let mut state = self.state.borrow_mut();
        if !state.is_latest(seq) {
            debug!(seq, "Discarding superseded contact page");
            return;
        }
        match result {
            Ok(page) => state.apply_page(page),
            Err(e) => {
                drop(state);
                self.notifier
                    .error(&e.user_message("Failed to load HR contacts"));
            }
        }
    }

    /// Fetch the current page again after a mutation made on the list view.
    pub async fn invalidate(&self) {
        debug!("Contact list invalidated");
        self.refresh().await;
    }

    /// Initial load when the list view mounts; skipped while a fetch is in flight.
    pub async fn load_if_idle(&self) {
        if self.state.borrow().loading {
            return;
        }
        self.refresh().await;
    }

    pub async fn set_filter(&self, change: FilterChange) {
        self.update(|s| s.change_filter(change));
        self.refresh().await;
    }

    pub async fn clear_filters(&self) {
        self.update(ListState::clear_filters);
        self.refresh().await;
    }

    pub async fn set_page(&self, index: u32) {
        self.update(|s| s.set_page(index));
        self.refresh().await;
    }

    // -- Selection --

    pub fn toggle_select(&self, id: ContactId) {
        self.update(|s| s.selection.toggle(id));
    }

    pub fn toggle_select_all(&self) {
        self.update(ListState::toggle_select_all);
    }

    pub fn select_only(&self, id: ContactId) {
        self.update(|s| s.selection.select_only(id));
    }

    pub fn clear_selection(&self) {
        self.update(|s| s.selection.clear());
    }

    // -- Single contact --

    pub async fn load_contact(&self, id: ContactId) -> Result<HrContact, ApiError> {
        self.backend.get_contact(id).await.inspect_err(|e| {
            self.notifier.error(&e.user_message("Failed to load"));
        })
    }

    pub async fn create_contact(&self, draft: &ContactDraft) -> Result<HrContact, FormError> {
        self.save_contact(None, draft).await
    }

    pub async fn update_contact(
        &self,
        id: ContactId,
        draft: &ContactDraft,
    ) -> Result<HrContact, FormError> {
        self.save_contact(Some(id), draft).await
    }

    async fn save_contact(
        &self,
        id: Option<ContactId>,
        draft: &ContactDraft,
    ) -> Result<HrContact, FormError> {
        let fields = draft.validate().map_err(FormError::Invalid)?;
        let busy = self.acquire(saving).ok_or(FormError::Busy)?;

        let result = match id {
            Some(id) => self.backend.update_contact(id, &fields).await,
            None => self.backend.create_contact(&fields).await,
        };
        drop(busy);

        match result {
            Ok(contact) => {
                info!(id = contact.id, "Saved HR contact");
                self.notifier.success(if id.is_some() {
                    "HR contact updated"
                } else {
                    "HR contact added"
                });
                self.update(ListState::mark_stale);
                Ok(contact)
            }
            Err(e) => {
                self.notifier.error(&e.user_message("Operation failed"));
                Err(FormError::Api(e))
            }
        }
    }

    // -- Delete --

    /// First step of a delete: remember which contact the user wants gone.
    pub fn request_delete(&self, id: ContactId) {
        self.update(|s| s.pending_delete = Some(id));
    }

    pub fn cancel_delete(&self) {
        self.update(|s| s.pending_delete = None);
    }

    /// Second step: delete the pending contact.
    pub async fn confirm_delete(&self) -> Result<(), DeleteError> {
        let id = self
            .state
            .borrow()
            .pending_delete
            .ok_or(DeleteError::NothingPending)?;
        let busy = self.acquire(deleting).ok_or(DeleteError::Busy)?;

        let result = self.backend.delete_contact(id).await;
        drop(busy);

        match result {
            Ok(()) => {
                info!(id, "Deleted HR contact");
                self.update(|s| {
                    s.pending_delete = None;
                    s.selection.remove(id);
                });
                self.notifier.success("HR contact deleted");
                self.invalidate().await;
                Ok(())
            }
            Err(e) => {
                self.notifier.error(&e.user_message("Failed to delete"));
                Err(DeleteError::Api(e))
            }
        }
    }

    // -- Bulk send --

    /// Send one email per id with the stored resume attached. Nothing reaches
    /// the network unless there are recipients, subject and body are filled in
    /// and the signed-in user has uploaded a resume.
    pub async fn send_emails(
        &self,
        ids: Vec<ContactId>,
        subject: &str,
        body: &str,
    ) -> Result<EmailSendResult, SendError> {
        let rejection = if ids.is_empty() {
            Some(SendError::NoRecipients)
        } else if subject.trim().is_empty() || body.trim().is_empty() {
            Some(SendError::EmptyMessage)
        } else if !self.session.has_resume() {
            Some(SendError::NoResume)
        } else {
            None
        };
        if let Some(err) = rejection {
            self.notifier.error(&err.to_string());
            return Err(err);
        }
        let busy = self.acquire(sending).ok_or(SendError::Busy)?;

        let request = EmailSendRequest {
            hr_detail_ids: ids,
            subject: subject.to_string(),
            body: body.to_string(),
        };
        debug!(recipients = request.hr_detail_ids.len(), "Sending emails");
        let result = self.backend.send_emails(&request).await;
        drop(busy);

        match result {
            Ok(outcome) => {
                info!(
                    sent = outcome.success_count,
                    failed = outcome.fail_count,
                    "Bulk send finished"
                );
                self.notifier.success(&format!(
                    "Sent: {}, Failed: {}",
                    outcome.success_count, outcome.fail_count
                ));
                self.clear_selection();
                self.invalidate().await;
                Ok(outcome)
            }
            Err(e) => {
                self.notifier.error(&e.user_message("Failed to send emails"));
                Err(SendError::Api(e))
            }
        }
    }

    /// Set an in-flight flag, or `None` if it is already set.
    fn acquire(&self, flag: Flag) -> Option<BusyGuard<'_>> {
        {
            let mut state = self.state.borrow_mut();
            let busy = flag(&mut state);
            if *busy {
                return None;
            }
            *busy = true;
        }
        self.publish();
        Some(BusyGuard {
            controller: self,
            flag,
        })
    }
}

/// Clears `loading` when its fetch finishes, unless a newer fetch took over.
struct LoadingGuard<'a> {
    controller: &'a ContactListController,
    seq: u64,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        {
            let mut state = self.controller.state.borrow_mut();
            if state.is_latest(self.seq) {
                state.loading = false;
            }
        }
        self.controller.publish();
    }
}

struct BusyGuard<'a> {
    controller: &'a ContactListController,
    flag: Flag,
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        *(self.flag)(&mut self.controller.state.borrow_mut()) = false;
        self.controller.publish();
    }
}
