mod common;

use std::rc::Rc;

use talentconnect::api::types::{EmailSendResult, EmailStatus};
use talentconnect::contacts::{
    ContactDraft, ContactListController, DeleteError, FilterChange, FormError, SendError,
};
use talentconnect::error::ApiError;
use talentconnect::session::SessionStore;

use common::*;

struct Harness {
    backend: Rc<FakeBackend>,
    notifier: Rc<RecordingNotifier>,
    session: Rc<SessionStore>,
    controller: Rc<ContactListController>,
}

fn harness(has_resume: bool) -> Harness {
    let backend = FakeBackend::new();
    let notifier = RecordingNotifier::new();
    let session = signed_in(has_resume);
    let controller = Rc::new(ContactListController::new(
        backend.clone(),
        session.clone(),
        notifier.clone(),
        10,
    ));
    controller.follow_session();
    Harness {
        backend,
        notifier,
        session,
        controller,
    }
}

fn filled_draft() -> ContactDraft {
    ContactDraft {
        hr_name: "Priya Shah".to_string(),
        email: "priya@globex.com".to_string(),
        company_name: "Globex".to_string(),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_page_two_with_status_filter_builds_query() {
    let h = harness(false);
    h.controller.set_filter(FilterChange::Status(Some(EmailStatus::Sent))).await;

    h.backend.queue_page(Ok(page_of(&[21, 22, 23], 5, 43)));
    h.controller.set_page(2).await;

    let query = h.backend.list_queries().last().cloned().unwrap();
    assert_eq!(query.page, 2);
    assert_eq!(query.size, 10);
    assert_eq!(query.status, Some(EmailStatus::Sent));
    assert!(query.company_name.is_none());

    let state = h.controller.state();
    assert_eq!(state.page_ids(), vec![21, 22, 23]);
    assert_eq!(state.pagination.total_pages, 5);
    assert_eq!(state.pagination.total_elements, 43);
    assert!(!state.loading);
}

#[tokio::test]
async fn test_filter_change_resets_page_before_fetch() {
    let h = harness(false);
    h.backend.queue_page(Ok(page_of(&[1], 4, 40)));
    h.controller.set_page(3).await;
    assert_eq!(h.controller.state().pagination.page_index, 3);

    h.controller
        .set_filter(FilterChange::CompanyName("Globex".to_string()))
        .await;

    let query = h.backend.list_queries().last().cloned().unwrap();
    assert_eq!(query.page, 0);
    assert_eq!(query.company_name.as_deref(), Some("Globex"));
    assert_eq!(h.controller.state().pagination.page_index, 0);
}

#[tokio::test]
async fn test_clear_filters_resets_everything() {
    let h = harness(false);
    h.controller
        .set_filter(FilterChange::Status(Some(EmailStatus::Failed)))
        .await;
    h.controller.set_page(1).await;

    h.controller.clear_filters().await;

    let query = h.backend.list_queries().last().cloned().unwrap();
    assert_eq!(query.page, 0);
    assert!(query.status.is_none());
    assert!(h.controller.state().filters.is_empty());
}

#[tokio::test]
async fn test_failed_fetch_keeps_previous_list() {
    let h = harness(false);
    h.backend.queue_page(Ok(page_of(&[1, 2], 1, 2)));
    h.controller.refresh().await;

    h.backend.queue_page(Err(ApiError::Network("offline".to_string())));
    h.controller.refresh().await;

    let state = h.controller.state();
    assert_eq!(state.page_ids(), vec![1, 2]);
    assert!(!state.loading);
    assert_eq!(h.notifier.errors(), vec!["Failed to load HR contacts"]);
}

#[tokio::test]
async fn test_fetch_failure_prefers_server_message() {
    let h = harness(false);
    h.backend.queue_page(Err(ApiError::Status {
        status: 500,
        message: Some("Database unavailable".to_string()),
    }));
    h.controller.refresh().await;
    assert_eq!(h.notifier.errors(), vec!["Database unavailable"]);
}

#[tokio::test]
async fn test_stale_page_is_discarded() {
    let h = harness(false);
    h.backend.queue_delayed_page(3, Ok(page_of(&[1, 2, 3], 1, 3)));
    h.backend.queue_page(Ok(page_of(&[9], 1, 1)));

    tokio::join!(
        h.controller
            .set_filter(FilterChange::CompanyName("Glo".to_string())),
        h.controller
            .set_filter(FilterChange::CompanyName("Globex".to_string())),
    );

    let state = h.controller.state();
    assert_eq!(state.page_ids(), vec![9]);
    assert_eq!(state.filters.company_name.as_deref(), Some("Globex"));
    assert!(!state.loading);
    assert_eq!(h.backend.list_count(), 2);
}

#[tokio::test]
async fn test_select_all_toggles_current_page() {
    let h = harness(false);
    h.backend.queue_page(Ok(page_of(&[1, 2, 3], 1, 3)));
    h.controller.refresh().await;

    h.controller.toggle_select(2);
    h.controller.toggle_select_all();
    assert_eq!(h.controller.state().selection.ids(), vec![1, 2, 3]);

    h.controller.toggle_select_all();
    assert!(h.controller.state().selection.is_empty());

    h.controller.toggle_select(3);
    h.controller.toggle_select(3);
    assert!(h.controller.state().selection.is_empty());
}

#[tokio::test]
async fn test_create_with_empty_name_makes_no_call() {
    let h = harness(false);
    let mut draft = filled_draft();
    draft.hr_name = "   ".to_string();

    let err = h.controller.create_contact(&draft).await.unwrap_err();

    match err {
        FormError::Invalid(errors) => {
            assert_eq!(errors.get("hrName"), Some("HR name is required"));
        }
        other => panic!("expected field errors, got {:?}", other),
    }
    assert!(h.backend.calls().is_empty());
    assert!(h.notifier.notices().is_empty());
}

#[tokio::test]
async fn test_create_refreshes_exactly_once() {
    let h = harness(false);
    h.backend.queue_page(Ok(page_of(&[1, 2], 1, 2)));
    h.controller.load_if_idle().await;
    h.backend.clear_calls();

    let saved = h.controller.create_contact(&filled_draft()).await.unwrap();
    assert_eq!(saved.hr_name, "Priya Shah");
    assert_eq!(h.backend.list_count(), 0);
    assert!(h.controller.state().stale);
    assert!(!h.controller.state().saving);

    // The form hands back to the list view, whose mount does the fetch
    h.backend.queue_page(Ok(page_of(&[1, 2, 3], 1, 3)));
    h.controller.load_if_idle().await;

    let calls = h.backend.calls();
    assert_eq!(calls.len(), 2);
    assert!(matches!(&calls[0], Call::Create(fields) if fields.company_name == "Globex"));
    assert!(matches!(&calls[1], Call::List(_)));
    assert_eq!(h.notifier.successes(), vec!["HR contact added"]);
    let state = h.controller.state();
    assert_eq!(state.page_ids(), vec![1, 2, 3]);
    assert!(!state.stale);
}

#[tokio::test]
async fn test_update_refreshes_exactly_once() {
    let h = harness(false);

    h.controller.update_contact(7, &filled_draft()).await.unwrap();
    h.controller.load_if_idle().await;

    assert_eq!(h.backend.list_count(), 1);
    assert!(matches!(h.backend.calls()[0], Call::Update(7, _)));
    assert_eq!(h.notifier.successes(), vec!["HR contact updated"]);
}

#[tokio::test]
async fn test_sign_out_empties_the_list_for_the_next_account() {
    let h = harness(false);
    h.controller.set_filter(FilterChange::Status(Some(EmailStatus::Sent))).await;
    h.backend.queue_page(Ok(page_of(&[1, 2, 3], 1, 3)));
    h.controller.load_if_idle().await;
    h.controller.toggle_select(2);

    h.session.logout();

    let state = h.controller.state();
    assert!(state.contacts.is_empty());
    assert!(state.filters.is_empty());
    assert!(state.selection.is_empty());
    assert!(!state.loaded);

    h.session.login(&auth_response("next@b.com", false));
    h.backend.queue_page(Err(ApiError::Network("offline".to_string())));
    h.controller.load_if_idle().await;

    let state = h.controller.state();
    assert!(state.contacts.is_empty());
    assert_eq!(state.filters.status, None);
    assert!(!state.loaded);
    let query = h.backend.list_queries().last().cloned().unwrap();
    assert_eq!(query.status, None);
}

#[tokio::test]
async fn test_sign_out_discards_a_page_still_in_flight() {
    let h = harness(false);
    h.backend.queue_delayed_page(2, Ok(page_of(&[1, 2, 3], 1, 3)));

    let fetch = h.controller.load_if_idle();
    let sign_out = async {
        tokio::task::yield_now().await;
        h.session.logout();
    };
    tokio::join!(fetch, sign_out);

    let state = h.controller.state();
    assert!(state.contacts.is_empty());
    assert!(!state.loading);
}

#[tokio::test]
async fn test_failed_save_reports_and_does_not_refresh() {
    let h = harness(false);
    *h.backend.mutation_error.borrow_mut() = Some(ApiError::Status {
        status: 400,
        message: None,
    });

    let err = h.controller.create_contact(&filled_draft()).await.unwrap_err();

    assert!(matches!(err, FormError::Api(_)));
    assert_eq!(h.backend.list_count(), 0);
    assert_eq!(h.notifier.errors(), vec!["Operation failed"]);
    assert!(!h.controller.state().saving);
}

#[tokio::test]
async fn test_delete_is_two_step() {
    let h = harness(false);
    h.backend.queue_page(Ok(page_of(&[4, 5], 1, 2)));
    h.controller.refresh().await;
    h.controller.toggle_select(5);
    h.backend.clear_calls();

    h.controller.request_delete(5);
    assert_eq!(h.controller.state().pending_delete, Some(5));
    assert!(h.backend.calls().is_empty());

    h.controller.confirm_delete().await.unwrap();

    let calls = h.backend.calls();
    assert_eq!(calls.len(), 2);
    assert!(matches!(calls[0], Call::Delete(5)));
    assert!(matches!(calls[1], Call::List(_)));
    let state = h.controller.state();
    assert_eq!(state.pending_delete, None);
    assert!(!state.selection.contains(5));
    assert_eq!(h.notifier.successes(), vec!["HR contact deleted"]);
}

#[tokio::test]
async fn test_cancelled_delete_never_reaches_backend() {
    let h = harness(false);
    h.controller.request_delete(5);
    h.controller.cancel_delete();

    assert_eq!(
        h.controller.confirm_delete().await,
        Err(DeleteError::NothingPending)
    );
    assert!(h.backend.calls().is_empty());
}

#[tokio::test]
async fn test_failed_delete_keeps_confirmation_open() {
    let h = harness(false);
    *h.backend.mutation_error.borrow_mut() = Some(ApiError::Network("offline".to_string()));
    h.controller.request_delete(5);

    assert!(h.controller.confirm_delete().await.is_err());
    assert_eq!(h.controller.state().pending_delete, Some(5));
    assert_eq!(h.notifier.errors(), vec!["Failed to delete"]);
    assert_eq!(h.backend.list_count(), 0);
}

#[tokio::test]
async fn test_bulk_send_reports_counts_and_clears_selection() {
    let h = harness(true);
    h.backend.queue_page(Ok(page_of(&[1, 2, 3], 1, 3)));
    h.controller.refresh().await;
    h.controller.toggle_select_all();
    *h.backend.send_result.borrow_mut() = Ok(EmailSendResult {
        success_count: 2,
        fail_count: 1,
        total_requested: Some(3),
        errors: vec!["hr3@example.com: mailbox full".to_string()],
    });
    h.backend.clear_calls();

    let ids = h.controller.state().selection.ids();
    let outcome = h
        .controller
        .send_emails(ids, "Application", "Dear HR,")
        .await
        .unwrap();

    assert_eq!(outcome.success_count, 2);
    let calls = h.backend.calls();
    assert_eq!(calls.len(), 2);
    match &calls[0] {
        Call::Send(request) => {
            assert_eq!(request.hr_detail_ids, vec![1, 2, 3]);
            assert_eq!(request.subject, "Application");
        }
        other => panic!("expected a send, got {:?}", other),
    }
    assert!(matches!(calls[1], Call::List(_)));

    let message = h.notifier.last().unwrap().message;
    assert_eq!(message, "Sent: 2, Failed: 1");
    assert!(h.controller.state().selection.is_empty());
    assert!(!h.controller.state().sending);
}

#[tokio::test]
async fn test_send_rejects_blank_message_locally() {
    let h = harness(true);

    let err = h
        .controller
        .send_emails(vec![1], "  ", "Dear HR,")
        .await
        .unwrap_err();

    assert_eq!(err, SendError::EmptyMessage);
    assert!(h.backend.calls().is_empty());
    assert_eq!(
        h.notifier.errors(),
        vec!["Please fill in both subject and body"]
    );
}

#[tokio::test]
async fn test_send_requires_resume() {
    let h = harness(false);

    let err = h
        .controller
        .send_emails(vec![1], "Application", "Dear HR,")
        .await
        .unwrap_err();

    assert_eq!(err, SendError::NoResume);
    assert!(h.backend.calls().is_empty());
    assert_eq!(
        h.notifier.errors(),
        vec!["Please upload your resume first from the Dashboard"]
    );
}

#[tokio::test]
async fn test_send_without_recipients() {
    let h = harness(true);
    let err = h
        .controller
        .send_emails(Vec::new(), "Application", "Dear HR,")
        .await
        .unwrap_err();
    assert_eq!(err, SendError::NoRecipients);
    assert!(h.backend.calls().is_empty());
}

#[tokio::test]
async fn test_failed_send_keeps_selection() {
    let h = harness(true);
    h.backend.queue_page(Ok(page_of(&[1, 2], 1, 2)));
    h.controller.refresh().await;
    h.controller.toggle_select(1);
    *h.backend.send_result.borrow_mut() = Err(ApiError::Status {
        status: 400,
        message: Some("SMTP not configured".to_string()),
    });

    let result = h
        .controller
        .send_emails(vec![1], "Application", "Dear HR,")
        .await;

    assert!(matches!(result, Err(SendError::Api(_))));
    assert_eq!(h.controller.state().selection.ids(), vec![1]);
    assert_eq!(h.notifier.errors(), vec!["SMTP not configured"]);
    assert_eq!(h.backend.list_count(), 1);
}

#[tokio::test]
async fn test_selection_is_pruned_to_the_loaded_page() {
    let h = harness(false);
    h.backend.queue_page(Ok(page_of(&[1, 2], 2, 12)));
    h.controller.refresh().await;
    h.controller.toggle_select(1);

    h.backend.queue_page(Ok(page_of(&[11, 12], 2, 12)));
    h.controller.set_page(1).await;

    assert!(h.controller.state().selection.is_empty());
}
