//! Client-side state of the contact list: filters, paging, selection and the
//! currently loaded page. Pure data; the controller drives the transitions.

use std::collections::BTreeSet;
use std::ops::Range;

use chrono::NaiveDate;

use crate::api::types::{ContactId, ContactPage, ContactQuery, EmailStatus, HrContact};

/// Number of page buttons the pager shows at once.
const PAGE_WINDOW: u32 = 5;

/// One edit to the filter bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterChange {
    Status(Option<EmailStatus>),
    CompanyName(String),
    StartDate(Option<NaiveDate>),
    EndDate(Option<NaiveDate>),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filters {
    pub status: Option<EmailStatus>,
    pub company_name: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl Filters {
    pub fn apply(&mut self, change: FilterChange) {
        match change {
            FilterChange::Status(status) => self.status = status,
            FilterChange::CompanyName(name) => {
                self.company_name = Some(name).filter(|n| !n.trim().is_empty());
            }
            FilterChange::StartDate(date) => self.start_date = date,
            FilterChange::EndDate(date) => self.end_date = date,
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Filters::default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    pub page_index: u32,
    pub page_size: u32,
    pub total_pages: u32,
    pub total_elements: u64,
}

impl Pagination {
    pub fn new(page_size: u32) -> Self {
        Self {
            page_index: 0,
            page_size,
            total_pages: 0,
            total_elements: 0,
        }
    }

    pub fn has_previous(&self) -> bool {
        self.page_index > 0
    }

    pub fn has_next(&self) -> bool {
        self.page_index + 1 < self.total_pages
    }

    /// The pager is hidden for a single page.
    pub fn is_visible(&self) -> bool {
        self.total_pages > 1
    }

    /// Page indices to render as buttons: up to five, starting two before the
    /// current page.
    pub fn window(&self) -> Range<u32> {
        let start = self.page_index.saturating_sub(2);
        let end = self.total_pages.min(start + PAGE_WINDOW);
        start..end.max(start)
    }
}

/// Ids the user has ticked. Only ever holds ids from the rendered page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection(BTreeSet<ContactId>);

impl Selection {
    pub fn toggle(&mut self, id: ContactId) {
        if !self.0.remove(&id) {
            self.0.insert(id);
        }
    }

    /// Empty when every id on the page is already selected, otherwise exactly
    /// the page's ids.
    pub fn toggle_all(&mut self, page_ids: &[ContactId]) {
        if !page_ids.is_empty() && page_ids.iter().all(|id| self.0.contains(id)) {
            self.0.clear();
        } else {
            self.0 = page_ids.iter().copied().collect();
        }
    }

    pub fn select_only(&mut self, id: ContactId) {
        self.0.clear();
        self.0.insert(id);
    }

    pub fn remove(&mut self, id: ContactId) {
        self.0.remove(&id);
    }

    pub fn retain_page(&mut self, page_ids: &[ContactId]) {
        self.0.retain(|id| page_ids.contains(id));
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn contains(&self, id: ContactId) -> bool {
        self.0.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn ids(&self) -> Vec<ContactId> {
        self.0.iter().copied().collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListState {
    pub filters: Filters,
    pub pagination: Pagination,
    pub selection: Selection,
    pub contacts: Vec<HrContact>,
    /// A list fetch is in flight.
    pub loading: bool,
    /// At least one page has been received.
    pub loaded: bool,
    /// A saved change is not reflected in `contacts` yet.
    pub stale: bool,
    pub saving: bool,
    pub sending: bool,
    pub deleting: bool,
    /// Contact awaiting delete confirmation.
    pub pending_delete: Option<ContactId>,
    issued: u64,
}

impl ListState {
    pub fn new(page_size: u32) -> Self {
        Self {
            filters: Filters::default(),
            pagination: Pagination::new(page_size),
            selection: Selection::default(),
            contacts: Vec::new(),
            loading: false,
            loaded: false,
            stale: false,
            saving: false,
            sending: false,
            deleting: false,
            pending_delete: None,
            issued: 0,
        }
    }

    /// Request for the current filters and page.
    pub fn query(&self) -> ContactQuery {
        ContactQuery {
            page: self.pagination.page_index,
            size: self.pagination.page_size,
            status: self.filters.status,
            company_name: self.filters.company_name.clone(),
            start_date: self.filters.start_date,
            end_date: self.filters.end_date,
        }
    }

    pub fn page_ids(&self) -> Vec<ContactId> {
        self.contacts.iter().map(|c| c.id).collect()
    }

    pub fn all_selected(&self) -> bool {
        !self.contacts.is_empty() && self.contacts.iter().all(|c| self.selection.contains(c.id))
    }

    pub fn change_filter(&mut self, change: FilterChange) {
        self.filters.apply(change);
        self.pagination.page_index = 0;
    }

    pub fn clear_filters(&mut self) {
        self.filters = Filters::default();
        self.pagination.page_index = 0;
    }

    pub fn set_page(&mut self, index: u32) {
        self.pagination.page_index = index;
    }

    pub fn toggle_select_all(&mut self) {
        let ids = self.page_ids();
        self.selection.toggle_all(&ids);
    }

    /// Whether the list view should show a spinner instead of the rows it has.
    pub fn awaiting_fresh_page(&self) -> bool {
        self.loading && (!self.loaded || self.stale)
    }

    pub(crate) fn mark_stale(&mut self) {
        self.stale = true;
    }

    /// Back to an empty list for the next account. Fetches still in flight
    /// are superseded and will be discarded.
    pub(crate) fn reset(&mut self) {
        let issued = self.issued + 1;
        *self = ListState::new(self.pagination.page_size);
        self.issued = issued;
    }

    /// Mark a new fetch as the latest and return its sequence number and query.
    pub(crate) fn begin_fetch(&mut self) -> (u64, ContactQuery) {
        self.issued += 1;
        self.loading = true;
        (self.issued, self.query())
    }

    /// Whether `seq` is still the most recently issued fetch.
    pub(crate) fn is_latest(&self, seq: u64) -> bool {
        seq == self.issued
    }

    /// Replace the page wholesale with a server response.
    pub(crate) fn apply_page(&mut self, page: ContactPage) {
        self.contacts = page.content;
        self.pagination.total_pages = page.total_pages;
        self.pagination.total_elements = page.total_elements;
        self.loaded = true;
        self.stale = false;
        let ids = self.page_ids();
        self.selection.retain_page(&ids);
    }
}
