//! In-memory backend and notifier shared by the integration tests.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use async_trait::async_trait;
use talentconnect::api::types::*;
use talentconnect::api::Backend;
use talentconnect::error::ApiError;
use talentconnect::notify::{Notice, NoticeKind, Notifier};
use talentconnect::session::SessionStore;
use talentconnect::storage::MemoryStore;

/// One recorded backend call.
#[derive(Debug, Clone)]
pub enum Call {
    Signup(String),
    Login(String),
    List(ContactQuery),
    Get(ContactId),
    Create(ContactFields),
    Update(ContactId, ContactFields),
    Delete(ContactId),
    Stats,
    Send(EmailSendRequest),
    Upload { file_name: String, len: usize },
    ResumeInfo,
}

/// A queued list response. `yields` makes the call stay pending for that many
/// polls so tests can interleave fetches.
pub struct QueuedPage {
    pub yields: usize,
    pub result: Result<ContactPage, ApiError>,
}

pub struct FakeBackend {
    calls: RefCell<Vec<Call>>,
    pages: RefCell<VecDeque<QueuedPage>>,
    pub auth: RefCell<Result<AuthResponse, ApiError>>,
    pub contact: RefCell<Result<HrContact, ApiError>>,
    pub stats: RefCell<Result<DashboardStats, ApiError>>,
    pub send_result: RefCell<Result<EmailSendResult, ApiError>>,
    pub mutation_error: RefCell<Option<ApiError>>,
    pub upload_result: RefCell<Result<ResumeUploaded, ApiError>>,
    pub resume: RefCell<Result<ResumeInfo, ApiError>>,
}

impl Default for FakeBackend {
    fn default() -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            pages: RefCell::new(VecDeque::new()),
            auth: RefCell::new(Ok(auth_response("a@b.com", false))),
            contact: RefCell::new(Ok(contact(1, "Priya Shah", "Globex"))),
            stats: RefCell::new(Ok(DashboardStats::default())),
            send_result: RefCell::new(Ok(EmailSendResult::default())),
            mutation_error: RefCell::new(None),
            upload_result: RefCell::new(Ok(ResumeUploaded::default())),
            resume: RefCell::new(Ok(ResumeInfo::default())),
        }
    }
}

impl FakeBackend {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn queue_page(&self, result: Result<ContactPage, ApiError>) {
        self.queue_delayed_page(0, result);
    }

    pub fn queue_delayed_page(&self, yields: usize, result: Result<ContactPage, ApiError>) {
        self.pages.borrow_mut().push_back(QueuedPage { yields, result });
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn list_queries(&self) -> Vec<ContactQuery> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|c| match c {
                Call::List(q) => Some(q.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn list_count(&self) -> usize {
        self.list_queries().len()
    }

    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }

    fn mutation<T>(&self, value: T) -> Result<T, ApiError> {
        match self.mutation_error.borrow().clone() {
            Some(err) => Err(err),
            None => Ok(value),
        }
    }
}

#[async_trait(?Send)]
impl Backend for FakeBackend {
    async fn signup(&self, request: &SignupRequest) -> Result<AuthResponse, ApiError> {
        self.record(Call::Signup(request.email.clone()));
        self.auth.borrow().clone()
    }

    async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, ApiError> {
        self.record(Call::Login(request.email.clone()));
        self.auth.borrow().clone()
    }

    async fn list_contacts(&self, query: &ContactQuery) -> Result<ContactPage, ApiError> {
        self.record(Call::List(query.clone()));
        let queued = self.pages.borrow_mut().pop_front();
        match queued {
            Some(QueuedPage { yields, result }) => {
                for _ in 0..yields {
                    tokio::task::yield_now().await;
                }
                result
            }
            None => Ok(ContactPage::default()),
        }
    }

    async fn get_contact(&self, id: ContactId) -> Result<HrContact, ApiError> {
        self.record(Call::Get(id));
        self.contact.borrow().clone()
    }

    async fn create_contact(&self, fields: &ContactFields) -> Result<HrContact, ApiError> {
        self.record(Call::Create(fields.clone()));
        self.mutation(contact(100, &fields.hr_name, &fields.company_name))
    }

    async fn update_contact(
        &self,
        id: ContactId,
        fields: &ContactFields,
    ) -> Result<HrContact, ApiError> {
        self.record(Call::Update(id, fields.clone()));
        self.mutation(contact(id, &fields.hr_name, &fields.company_name))
    }

    async fn delete_contact(&self, id: ContactId) -> Result<(), ApiError> {
        self.record(Call::Delete(id));
        self.mutation(())
    }

    async fn dashboard_stats(&self) -> Result<DashboardStats, ApiError> {
        self.record(Call::Stats);
        self.stats.borrow().clone()
    }

    async fn send_emails(&self, request: &EmailSendRequest) -> Result<EmailSendResult, ApiError> {
        self.record(Call::Send(request.clone()));
        self.send_result.borrow().clone()
    }

    async fn upload_resume(&self, upload: ResumeUpload) -> Result<ResumeUploaded, ApiError> {
        self.record(Call::Upload {
            file_name: upload.file_name,
            len: upload.bytes.len(),
        });
        self.upload_result.borrow().clone()
    }

    async fn resume_info(&self) -> Result<ResumeInfo, ApiError> {
        self.record(Call::ResumeInfo);
        self.resume.borrow().clone()
    }
}

/// Collects every notice instead of showing it.
#[derive(Default)]
pub struct RecordingNotifier {
    notices: RefCell<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices.borrow().clone()
    }

    pub fn last(&self) -> Option<Notice> {
        self.notices.borrow().last().cloned()
    }

    pub fn errors(&self) -> Vec<String> {
        self.of_kind(NoticeKind::Error)
    }

    pub fn successes(&self) -> Vec<String> {
        self.of_kind(NoticeKind::Success)
    }

    fn of_kind(&self, kind: NoticeKind) -> Vec<String> {
        self.notices
            .borrow()
            .iter()
            .filter(|n| n.kind == kind)
            .map(|n| n.message.clone())
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        self.notices.borrow_mut().push(notice);
    }
}

pub fn auth_response(email: &str, has_resume: bool) -> AuthResponse {
    AuthResponse {
        token: "tok-123".to_string(),
        full_name: "Jo Kim".to_string(),
        email: email.to_string(),
        has_resume,
    }
}

pub fn contact(id: ContactId, hr_name: &str, company: &str) -> HrContact {
    HrContact {
        id,
        hr_name: hr_name.to_string(),
        email: format!("hr{}@example.com", id),
        mobile_number: None,
        company_name: company.to_string(),
        job_role: None,
        notes: None,
        email_status: EmailStatus::Pending,
        email_sent_at: None,
        date_added: None,
    }
}

pub fn page_of(ids: &[ContactId], total_pages: u32, total_elements: u64) -> ContactPage {
    ContactPage {
        content: ids.iter().map(|&id| contact(id, "HR", "Acme")).collect(),
        total_pages,
        total_elements,
        ..Default::default()
    }
}

/// A session store with a signed-in user.
pub fn signed_in(has_resume: bool) -> Rc<SessionStore> {
    let session = Rc::new(SessionStore::open(Box::new(MemoryStore::new())));
    session.login(&auth_response("a@b.com", has_resume));
    session
}

pub fn signed_out() -> Rc<SessionStore> {
    Rc::new(SessionStore::open(Box::new(MemoryStore::new())))
}
