//! End-to-end signup flows against a scripted backend.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use votebymail_core::address::format_address_input_parts;
use votebymail_core::extension::{GeorgiaFields, WisconsinFields};
use votebymail_core::{
    Address, AddressInputParts, ContactAddress, ContactData, FailureKind, FieldId, Jurisdiction,
    MailingAddress, RegistrationArgs, RegistrationLookup, RegistrationStatus, RpcRet,
    SignatureKind, SignupService, StateFields, StateInfo, StatusSlot, TransportError, Voter,
};
use votebymail_signup::{
    BlockReason, FILL_REQUIRED_FORMATS, ModalContext, NoticeCategory, Phase, SignupError,
    SignupForm, SubmitOutcome,
};

type Lookup = Result<RpcRet<RegistrationLookup>, TransportError>;
type Register = Result<RpcRet<String>, TransportError>;

/// Backend that replays queued answers and counts calls.
#[derive(Default)]
struct ScriptedService {
    contact: Mutex<Option<ContactAddress>>,
    lookups: Mutex<VecDeque<Lookup>>,
    registers: Mutex<VecDeque<Register>>,
    lookup_calls: AtomicUsize,
    register_calls: AtomicUsize,
    submitted: Mutex<Vec<StateInfo>>,
    /// Calls never answer while set.
    hang: AtomicBool,
}

impl ScriptedService {
    fn for_state(j: Jurisdiction) -> Self {
        let service = Self::default();
        *service.contact.lock().unwrap() = Some(contact_for(j));
        service
    }

    fn lookup_returns(&self, status: RegistrationStatus) -> &Self {
        self.lookups
            .lock()
            .unwrap()
            .push_back(Ok(RpcRet::data(RegistrationLookup {
                id: "alloy-7".into(),
                status,
            })));
        self
    }

    fn register_returns(&self, result: Register) -> &Self {
        self.registers.lock().unwrap().push_back(result);
        self
    }

    fn hang(&self, hang: bool) {
        self.hang.store(hang, Ordering::SeqCst);
    }

    async fn maybe_hang(&self) {
        if self.hang.load(Ordering::SeqCst) {
            std::future::pending::<()>().await;
        }
    }

    fn register_calls(&self) -> usize {
        self.register_calls.load(Ordering::SeqCst)
    }

    fn last_submitted(&self) -> StateInfo {
        self.submitted.lock().unwrap().last().cloned().unwrap()
    }
}

#[async_trait]
impl SignupService for ScriptedService {
    async fn fetch_contact_address(
        &self,
        _addr: &AddressInputParts,
    ) -> Result<RpcRet<ContactAddress>, TransportError> {
        self.maybe_hang().await;
        match self.contact.lock().unwrap().clone() {
            Some(contact) => Ok(RpcRet::data(contact)),
            None => Ok(RpcRet::error("address not found")),
        }
    }

    async fn is_registered(&self, _args: &RegistrationArgs) -> Lookup {
        self.lookup_calls.fetch_add(1, Ordering::SeqCst);
        self.lookups
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::unknown("no scripted lookup")))
    }

    async fn register(&self, info: &StateInfo, _voter: &Voter) -> Register {
        self.register_calls.fetch_add(1, Ordering::SeqCst);
        self.submitted.lock().unwrap().push(info.clone());
        self.maybe_hang().await;
        self.registers
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(RpcRet::data("confirm-1".to_string())))
    }
}

fn contact_for(j: Jurisdiction) -> ContactAddress {
    let abbr = j.state().abbr();
    ContactAddress {
        contact: ContactData {
            state: j.name().into(),
            county: Some("Example County".into()),
            emails: vec!["clerk@example.gov".into()],
            ..Default::default()
        },
        address: Address {
            query_addr: format!("12 Elm St, Springfield, {abbr}"),
            full_addr: format!("12 Elm St, Springfield, {abbr} 00012, USA"),
            city: Some("Springfield".into()),
            postcode: "00012".into(),
            state: j.name().into(),
            state_abbr: Some(abbr.into()),
            country: "US".into(),
            street_number: Some("12".into()),
            street: Some("Elm St".into()),
            ..Default::default()
        },
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn voter() -> Voter {
    Voter {
        uid: "0123456789abcdef0123456789abcdef".into(),
        ..Default::default()
    }
}

fn home() -> AddressInputParts {
    AddressInputParts {
        street: "12 Elm St".into(),
        city: "Springfield".into(),
        state: "XX".into(),
        postcode: "00012".into(),
        ..Default::default()
    }
}

/// Resolve the address, fill valid base fields, and sign if required.
async fn ready_form(service: &ScriptedService, j: Jurisdiction, today: NaiveDate) -> SignupForm {
    let mut form = SignupForm::new(j, today, "default");
    form.resolve_address(service, &home()).await.unwrap();
    form.update_field(FieldId::FirstName, "Grace");
    form.update_field(FieldId::LastName, "Hopper");
    form.update_field(FieldId::Email, "grace@example.com");
    form.update_field(FieldId::Birthdate, "12/09/1906");
    if j.signature_mode().requires_signature() {
        let kind = form.signature().active();
        form.signature_mut()
            .capture(kind, "data:image/png;base64,iVBORw0KGgo=")
            .unwrap();
    }
    let ticket = form.blur_field(FieldId::Birthdate).expect("lookup issued");
    form.check_registration(service, ticket).await;
    form
}

#[tokio::test]
async fn unregistered_then_sign_up_anyway_registers_once() {
    let service = ScriptedService::for_state(Jurisdiction::Florida);
    service.lookup_returns(RegistrationStatus::Unregistered);
    let mut form = ready_form(&service, Jurisdiction::Florida, date(2020, 10, 1)).await;
    assert!(form.submit_enabled());

    let outcome = form.press_submit(&service, &voter()).await.unwrap();
    let SubmitOutcome::NeedsConfirmation(modal) = outcome else {
        panic!("expected confirmation, got {outcome:?}");
    };
    assert_eq!(modal.context, ModalContext::FormSubmit);
    assert_eq!(
        modal.message,
        "Based on our search of public records, you are not currently registered to vote at this address."
    );
    assert_eq!(form.phase(), &Phase::NeedsConfirmation);
    assert_eq!(service.register_calls(), 0);

    let outcome = form.submit_anyway(&service, &voter()).await.unwrap();
    assert_eq!(
        outcome,
        Some(SubmitOutcome::Submitted {
            confirmation_id: "confirm-1".into()
        })
    );
    assert!(matches!(form.status(), StatusSlot::Ignored(_)));
    assert_eq!(form.modal(), None);
    assert_eq!(service.register_calls(), 1);
    assert_eq!(form.phase().confirmation_id(), Some("confirm-1"));

    let info = service.last_submitted();
    assert_eq!(info.base.alloy.as_ref().unwrap().status, "Unregistered");

    assert!(matches!(
        form.press_submit(&service, &voter()).await,
        Err(SignupError::AlreadySubmitted)
    ));
    assert_eq!(service.register_calls(), 1);
}

#[tokio::test]
async fn ignore_from_click_does_not_submit() {
    let service = ScriptedService::for_state(Jurisdiction::Maine);
    service.lookup_returns(RegistrationStatus::NotFound);
    let mut form = ready_form(&service, Jurisdiction::Maine, date(2020, 10, 1)).await;

    form.open_status_modal();
    assert_eq!(form.submit_anyway(&service, &voter()).await.unwrap(), None);
    assert_eq!(service.register_calls(), 0);
    assert_eq!(form.status().label(), "Ignored");

    let outcome = form.press_submit(&service, &voter()).await.unwrap();
    assert!(matches!(outcome, SubmitOutcome::Submitted { .. }));
}

#[tokio::test]
async fn lookup_error_needs_confirmation_too() {
    let service = ScriptedService::for_state(Jurisdiction::Oklahoma);
    // Nothing scripted: the lookup fails.
    let mut form = ready_form(&service, Jurisdiction::Oklahoma, date(2020, 10, 1)).await;
    assert_eq!(form.status().label(), "Error");

    let outcome = form.press_submit(&service, &voter()).await.unwrap();
    let SubmitOutcome::NeedsConfirmation(modal) = outcome else {
        panic!("expected confirmation");
    };
    assert_eq!(modal.message, "Error while checking your registration status.");

    form.recheck_fields();
    assert_eq!(form.phase(), &Phase::Editing);
    assert_eq!(service.register_calls(), 0);
}

#[tokio::test]
async fn timeout_is_retryable_and_keeps_fields() {
    let service = ScriptedService::for_state(Jurisdiction::Maryland);
    service
        .lookup_returns(RegistrationStatus::Active)
        .register_returns(Err(TransportError::timeout("operation timed out")));
    let mut form = ready_form(&service, Jurisdiction::Maryland, date(2020, 10, 1)).await;

    let outcome = form.press_submit(&service, &voter()).await.unwrap();
    assert_eq!(outcome, SubmitOutcome::Failed(FailureKind::Timeout));
    assert_eq!(form.phase(), &Phase::Failed(FailureKind::Timeout));
    assert_eq!(form.phase().confirmation_id(), None);
    assert!(form.submit_enabled());
    assert_eq!(form.fields().value(FieldId::FirstName), "Grace");
    assert_eq!(form.fields().value(FieldId::Email), "grace@example.com");

    let notices = form.take_notices();
    let failure = notices
        .iter()
        .find(|n| n.category == NoticeCategory::Submission(FailureKind::Timeout))
        .expect("timeout notice");
    assert_eq!(
        failure.message,
        "Timeout Error: Try resubmitting.  If this persists, try again in a little while."
    );

    let retry = form.press_submit(&service, &voter()).await.unwrap();
    assert!(matches!(retry, SubmitOutcome::Submitted { .. }));
    assert_eq!(service.register_calls(), 2);
}

#[tokio::test]
async fn backend_error_reply_is_unknown_failure() {
    let service = ScriptedService::for_state(Jurisdiction::Florida);
    service
        .lookup_returns(RegistrationStatus::Active)
        .register_returns(Ok(RpcRet::error("database unavailable")));
    let mut form = ready_form(&service, Jurisdiction::Florida, date(2020, 10, 1)).await;

    let outcome = form.press_submit(&service, &voter()).await.unwrap();
    assert_eq!(outcome, SubmitOutcome::Failed(FailureKind::Unknown));
    assert!(form.submit_enabled());
}

#[tokio::test]
async fn georgia_party_follows_primary_window() {
    // After the cutoff: no party needed, none sent.
    let service = ScriptedService::for_state(Jurisdiction::Georgia);
    service.lookup_returns(RegistrationStatus::Active);
    let mut form = ready_form(&service, Jurisdiction::Georgia, date(2020, 10, 1)).await;
    let outcome = form.press_submit(&service, &voter()).await.unwrap();
    assert!(matches!(outcome, SubmitOutcome::Submitted { .. }));
    let json = serde_json::to_value(service.last_submitted()).unwrap();
    assert_eq!(json["state"], "Georgia");
    assert!(json.get("party").is_none());

    // Before the cutoff: blocked until a party from the list is chosen.
    let service = ScriptedService::for_state(Jurisdiction::Georgia);
    service.lookup_returns(RegistrationStatus::Active);
    let mut form = ready_form(&service, Jurisdiction::Georgia, date(2020, 3, 1)).await;
    let outcome = form.press_submit(&service, &voter()).await.unwrap();
    assert!(matches!(outcome, SubmitOutcome::Blocked(BlockReason::StateFields(_))));
    assert!(
        form.take_notices()
            .iter()
            .any(|n| n.message == FILL_REQUIRED_FORMATS)
    );

    form.set_state_fields(StateFields::Georgia(GeorgiaFields {
        party: Some("Republican Party".into()),
    }))
    .unwrap();
    assert_eq!(form.phase(), &Phase::Editing);
    let outcome = form.press_submit(&service, &voter()).await.unwrap();
    assert!(matches!(outcome, SubmitOutcome::Submitted { .. }));
    let json = serde_json::to_value(service.last_submitted()).unwrap();
    assert_eq!(json["party"], "Republican Party");
    assert_eq!(service.register_calls(), 1);
}

#[tokio::test]
async fn wisconsin_first_timer_needs_id_photo() {
    let service = ScriptedService::for_state(Jurisdiction::Wisconsin);
    service.lookup_returns(RegistrationStatus::Active);
    let mut form = ready_form(&service, Jurisdiction::Wisconsin, date(2020, 10, 1)).await;

    form.set_state_fields(StateFields::Wisconsin(WisconsinFields {
        first_time: true,
        id_photo: None,
    }))
    .unwrap();
    let outcome = form.press_submit(&service, &voter()).await.unwrap();
    assert!(matches!(outcome, SubmitOutcome::Blocked(_)));

    form.set_state_fields(StateFields::Wisconsin(WisconsinFields {
        first_time: false,
        id_photo: None,
    }))
    .unwrap();
    let outcome = form.press_submit(&service, &voter()).await.unwrap();
    assert!(matches!(outcome, SubmitOutcome::Submitted { .. }));

    // No signature is required or sent.
    let info = service.last_submitted();
    assert_eq!(info.signature, None);
}

#[tokio::test]
async fn missing_signature_blocks_with_signature_notice() {
    let service = ScriptedService::for_state(Jurisdiction::Nebraska);
    service.lookup_returns(RegistrationStatus::Active);
    let mut form = ready_form(&service, Jurisdiction::Nebraska, date(2020, 10, 1)).await;
    form.signature_mut().clear();

    let outcome = form.press_submit(&service, &voter()).await.unwrap();
    assert!(matches!(outcome, SubmitOutcome::Blocked(BlockReason::Signature(_))));
    let notices = form.take_notices();
    assert_eq!(notices[0].category, NoticeCategory::Signature);
    assert_eq!(service.register_calls(), 0);

    // Nebraska only takes uploads.
    assert!(form.signature_mut().capture(SignatureKind::Drawn, "data:x").is_err());
    form.signature_mut()
        .capture(SignatureKind::Uploaded, "data:image/png;base64,AAAA")
        .unwrap();
    let outcome = form.press_submit(&service, &voter()).await.unwrap();
    assert!(matches!(outcome, SubmitOutcome::Submitted { .. }));
}

#[tokio::test]
async fn mailing_address_round_trips_into_submission() {
    let service = ScriptedService::for_state(Jurisdiction::Florida);
    service.lookup_returns(RegistrationStatus::Active);
    let mut form = ready_form(&service, Jurisdiction::Florida, date(2020, 10, 1)).await;

    let mailing = AddressInputParts {
        street: "500 Ocean Dr".into(),
        street_number: None,
        city: "Miami Beach".into(),
        state: "FL".into(),
        postcode: "33139".into(),
        unit: Some("Apt 4".into()),
    };
    let line = format_address_input_parts(&mailing);
    form.set_mailing(Some(MailingAddress::Line { line: line.clone() }));
    form.press_submit(&service, &voter()).await.unwrap();

    let info = service.last_submitted();
    assert_eq!(info.base.mailing_address.as_deref(), Some(line.as_str()));
    let parts = info.base.mailing_address_parts.unwrap();
    assert_eq!(parts.street, mailing.street);
    assert_eq!(parts.city, mailing.city);
    assert_eq!(parts.state, mailing.state);
    assert_eq!(parts.postcode, mailing.postcode);
}

#[tokio::test]
async fn stale_lookup_is_discarded() {
    let service = ScriptedService::for_state(Jurisdiction::Virginia);
    let mut form = SignupForm::new(Jurisdiction::Virginia, date(2020, 10, 1), "default");
    form.resolve_address(&service, &home()).await.unwrap();
    form.update_field(FieldId::FirstName, "Grace");
    form.update_field(FieldId::LastName, "Hopper");
    form.update_field(FieldId::Birthdate, "12/09/1906");

    let first = form.blur_field(FieldId::Birthdate).unwrap();
    let second = form.blur_field(FieldId::LastName).unwrap();
    assert!(second.generation() > first.generation());

    service.lookup_returns(RegistrationStatus::Active);
    assert!(form.check_registration(&service, second).await);

    service.lookup_returns(RegistrationStatus::Purged);
    assert!(!form.check_registration(&service, first).await);
    assert!(form.status().clears_submission());
    assert_eq!(service.lookup_calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn address_in_another_state_is_rejected() {
    let service = ScriptedService::for_state(Jurisdiction::Kansas);
    let mut form = SignupForm::new(Jurisdiction::Michigan, date(2020, 10, 1), "default");
    let err = form.resolve_address(&service, &home()).await.unwrap_err();
    assert!(matches!(err, SignupError::Jurisdiction(_)));
    assert!(form.resolved_address().is_none());
}

#[tokio::test]
async fn press_before_lookup_is_refused() {
    let service = ScriptedService::for_state(Jurisdiction::Florida);
    let mut form = SignupForm::new(Jurisdiction::Florida, date(2020, 10, 1), "default");
    form.resolve_address(&service, &home()).await.unwrap();
    assert!(matches!(
        form.press_submit(&service, &voter()).await,
        Err(SignupError::SubmitDisabled)
    ));
    assert_eq!(form.phase(), &Phase::Editing);
}

#[tokio::test]
async fn abandoned_submission_reenables_submit() {
    let service = ScriptedService::for_state(Jurisdiction::Florida);
    service.lookup_returns(RegistrationStatus::Active);
    let mut form = ready_form(&service, Jurisdiction::Florida, date(2020, 10, 1)).await;

    service.hang(true);
    let abandoned =
        tokio::time::timeout(Duration::from_millis(20), form.press_submit(&service, &voter())).await;
    assert!(abandoned.is_err());
    assert_eq!(service.register_calls(), 1);
    assert!(!form.is_fetching());
    assert_eq!(form.phase(), &Phase::Editing);
    assert!(form.submit_enabled());

    service.hang(false);
    let outcome = form.press_submit(&service, &voter()).await.unwrap();
    assert!(matches!(outcome, SubmitOutcome::Submitted { .. }));
}

#[tokio::test]
async fn abandoned_address_lookup_clears_fetching() {
    let service = ScriptedService::for_state(Jurisdiction::Florida);
    service.hang(true);
    let mut form = SignupForm::new(Jurisdiction::Florida, date(2020, 10, 1), "default");
    let abandoned =
        tokio::time::timeout(Duration::from_millis(20), form.resolve_address(&service, &home())).await;
    assert!(abandoned.is_err());
    assert!(!form.is_fetching());
    assert!(form.resolved_address().is_none());
}
