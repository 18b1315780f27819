//! One voter's signup form: base fields, the jurisdiction's own questions,
//! the signature, the registration lookup and the submit flow.

use chrono::NaiveDate;
use tracing::{debug, info, warn};
use votebymail_core::states;
use votebymail_core::{
    AddressInputParts, AlloyStatus, BaseFields, BaseInfo, ContactAddress, EnrichContext,
    EnrichError, FailureKind, FieldId, Jurisdiction, LookupOutcome, MailingAddress,
    RegistrationArgs, RegistrationLookup, RpcRet, SignatureCapture, SignupService, State,
    StateFields, StateInfo, StatusSlot, TransportError, Voter,
};

use crate::error::SignupError;
use crate::notice::{Notice, NoticeCategory};
use crate::phase::{
    BlockReason, ModalContext, Phase, StatusModal, SubmitOutcome, ValidationReport,
};

/// A registration lookup the form has asked for.
///
/// Run it with [`SignupForm::check_registration`], or run `args` against the
/// service yourself and hand the result to [`SignupForm::apply_lookup`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupTicket {
    generation: u64,
    args: RegistrationArgs,
}

impl LookupTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn args(&self) -> &RegistrationArgs {
        &self.args
    }
}

pub struct SignupForm {
    jurisdiction: Jurisdiction,
    ctx: EnrichContext,
    oid: String,
    fields: BaseFields,
    mailing: Option<MailingAddress>,
    state_fields: StateFields,
    signature: SignatureCapture,
    resolved: Option<ContactAddress>,
    status: StatusSlot,
    /// Bumped whenever an in-flight lookup's answer stops being wanted.
    generation: u64,
    modal: Option<ModalContext>,
    fetching: bool,
    phase: Phase,
    notices: Vec<Notice>,
}

impl SignupForm {
    pub fn new(jurisdiction: Jurisdiction, today: NaiveDate, oid: impl Into<String>) -> Self {
        Self {
            jurisdiction,
            ctx: EnrichContext::new(today),
            oid: oid.into(),
            fields: BaseFields::new(),
            mailing: None,
            state_fields: StateFields::blank(jurisdiction),
            signature: SignatureCapture::new(jurisdiction.signature_mode()),
            resolved: None,
            status: StatusSlot::Unknown,
            generation: 0,
            modal: None,
            fetching: false,
            phase: Phase::Editing,
            notices: Vec::new(),
        }
    }

    /// Start a form for an address that has already been resolved.
    pub fn for_address(
        resolved: ContactAddress,
        today: NaiveDate,
        oid: impl Into<String>,
    ) -> Result<Self, SignupError> {
        let jurisdiction = jurisdiction_of(&resolved)?;
        let mut form = Self::new(jurisdiction, today, oid);
        form.resolved = Some(resolved);
        Ok(form)
    }

    /// Also require a matching confirm-email entry.
    pub fn require_confirm_email(mut self) -> Self {
        self.fields = self.fields.with_confirm_email();
        self
    }

    // ── Accessors ──

    pub fn jurisdiction(&self) -> Jurisdiction {
        self.jurisdiction
    }

    pub fn today(&self) -> NaiveDate {
        self.ctx.today
    }

    pub fn primary_eligible(&self) -> bool {
        self.ctx.primary_eligible(self.jurisdiction)
    }

    pub fn fields(&self) -> &BaseFields {
        &self.fields
    }

    pub fn status(&self) -> &StatusSlot {
        &self.status
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn modal(&self) -> Option<ModalContext> {
        self.modal
    }

    pub fn is_fetching(&self) -> bool {
        self.fetching
    }

    pub fn resolved_address(&self) -> Option<&ContactAddress> {
        self.resolved.as_ref()
    }

    pub fn state_fields(&self) -> &StateFields {
        &self.state_fields
    }

    pub fn signature(&self) -> &SignatureCapture {
        &self.signature
    }

    pub fn signature_mut(&mut self) -> &mut SignatureCapture {
        &mut self.signature
    }

    pub fn mailing(&self) -> Option<&MailingAddress> {
        self.mailing.as_ref()
    }

    // ── Editing ──

    /// Store a base field value.
    ///
    /// A first or last name change forgets the registration status and any
    /// lookup still in flight. Birthdate changes do not: the voter file is
    /// searched without it.
    pub fn update_field(&mut self, field: FieldId, value: &str) {
        let before = self.fields.value(field).to_string();
        self.fields.update(field, value);
        let name_changed = matches!(field, FieldId::FirstName | FieldId::LastName)
            && self.fields.value(field) != before;
        if name_changed {
            debug!(field = ?field, "name changed; registration status reset");
            self.reset_status();
        }
        self.touch();
    }

    /// Replace the jurisdiction's answers.
    pub fn set_state_fields(&mut self, fields: StateFields) -> Result<(), SignupError> {
        if fields.jurisdiction() != self.jurisdiction {
            return Err(EnrichError::WrongJurisdiction {
                expected: self.jurisdiction.name(),
                actual: fields.jurisdiction().name(),
            }
            .into());
        }
        self.state_fields = fields;
        self.touch();
        Ok(())
    }

    /// Mail the ballot somewhere other than the registration address, or
    /// `None` to use the registration address.
    pub fn set_mailing(&mut self, mailing: Option<MailingAddress>) {
        self.mailing = mailing;
        self.touch();
    }

    fn touch(&mut self) {
        if self.phase.settles_on_edit() {
            self.phase = Phase::Editing;
        }
    }

    fn reset_status(&mut self) {
        self.status = StatusSlot::Unknown;
        self.generation += 1;
    }

    // ── Registration lookup ──

    /// A field lost focus.
    ///
    /// Queues a warning for malformed content, and for name and birthdate
    /// fields returns a lookup to run once the address is resolved, all three
    /// are valid, and the voter has not chosen to ignore the status.
    pub fn blur_field(&mut self, field: FieldId) -> Option<LookupTicket> {
        if let Some(warning) = votebymail_core::fields::blur_check(field, self.fields.value(field)) {
            self.notices.push(warning.into());
        }
        let ignored = matches!(self.status, StatusSlot::Ignored(_));
        if !field.triggers_lookup()
            || ignored
            || self.resolved.is_none()
            || !self.fields.can_check_registration()
        {
            return None;
        }
        self.generation += 1;
        self.status = StatusSlot::Loading;
        debug!(generation = self.generation, "registration lookup issued");
        Some(LookupTicket {
            generation: self.generation,
            args: self.registration_args(),
        })
    }

    fn registration_args(&self) -> RegistrationArgs {
        let name = self.fields.name_parts();
        let address = self.resolved.as_ref().map(|r| &r.address);
        let or_empty = |part: Option<&String>| part.cloned().unwrap_or_default();
        RegistrationArgs {
            first_name: name.first,
            last_name: name.last,
            middle_name: name.middle,
            suffix: name.suffix,
            birthdate: Some(self.fields.value(FieldId::Birthdate).to_string()),
            state_abbr: or_empty(address.and_then(|a| a.state_abbr.as_ref())),
            city: or_empty(address.and_then(|a| a.city.as_ref())),
            postcode: or_empty(address.map(|a| &a.postcode)),
            street: or_empty(address.and_then(|a| a.street.as_ref())),
            street_number: or_empty(address.and_then(|a| a.street_number.as_ref())),
        }
    }

    /// Record a lookup's result. Returns `false` when the ticket is stale and
    /// the result was dropped.
    pub fn apply_lookup(
        &mut self,
        ticket: &LookupTicket,
        result: Result<RpcRet<RegistrationLookup>, TransportError>,
    ) -> bool {
        if ticket.generation != self.generation {
            debug!(
                ticket = ticket.generation,
                current = self.generation,
                "discarding stale registration lookup"
            );
            return false;
        }
        let outcome = match result {
            Ok(RpcRet::Data { data }) => {
                info!(status = %data.status, "registration lookup finished");
                LookupOutcome::Found(data)
            }
            Ok(RpcRet::Error { message }) => {
                warn!(message = %message, "registration lookup rejected");
                LookupOutcome::Error
            }
            Err(e) => {
                warn!(error = %e, "registration lookup failed");
                LookupOutcome::Error
            }
        };
        self.status = StatusSlot::Resolved(outcome);
        true
    }

    /// Run a lookup against the service and record its result.
    pub async fn check_registration(
        &mut self,
        service: &dyn SignupService,
        ticket: LookupTicket,
    ) -> bool {
        let result = service.is_registered(&ticket.args).await;
        self.apply_lookup(&ticket, result)
    }

    // ── Address ──

    /// Resolve the registration address and its election official.
    ///
    /// The address must fall in this form's jurisdiction. A new address
    /// forgets the registration status.
    pub async fn resolve_address(
        &mut self,
        service: &dyn SignupService,
        parts: &AddressInputParts,
    ) -> Result<(), SignupError> {
        let result = {
            let _in_flight = InFlight::start(&mut self.fetching, &mut self.phase);
            service.fetch_contact_address(parts).await
        };

        let resolved = match result {
            Ok(RpcRet::Data { data }) => data,
            Ok(RpcRet::Error { message }) => {
                self.notices
                    .push(Notice::error(NoticeCategory::Address, message.clone()));
                return Err(SignupError::Service(message));
            }
            Err(e) => {
                self.notices.push(Notice::error(
                    NoticeCategory::Address,
                    e.kind.user_message(),
                ));
                return Err(e.into());
            }
        };
        let jurisdiction = jurisdiction_of(&resolved)?;
        if jurisdiction != self.jurisdiction {
            return Err(EnrichError::WrongJurisdiction {
                expected: self.jurisdiction.name(),
                actual: jurisdiction.name(),
            }
            .into());
        }
        info!(address = %resolved.address.full_addr, "registration address resolved");
        self.resolved = Some(resolved);
        self.reset_status();
        self.touch();
        Ok(())
    }

    // ── Submission ──

    /// The submit control accepts presses.
    pub fn submit_enabled(&self) -> bool {
        !self.fetching
            && !matches!(self.phase, Phase::Success { .. })
            && !matches!(self.status, StatusSlot::Unknown | StatusSlot::Loading)
            && self.fields.all_valid()
    }

    pub fn validation_report(&self) -> ValidationReport {
        ValidationReport {
            address_resolved: self.resolved.is_some(),
            invalid_fields: self.fields.invalid_fields(),
            mailing: self.mailing.as_ref().and_then(|m| m.resolve().err()),
            state_fields: self.state_fields.enrich(&self.ctx).err(),
            signature: self.signature.attach().err(),
            status: self.status.label(),
            submit_enabled: self.submit_enabled(),
        }
    }

    /// Assemble the record to submit: base fields, then the jurisdiction's
    /// fields, then the signature.
    pub fn build_info(&self) -> Result<StateInfo, BlockReason> {
        let resolved = self.resolved.as_ref().ok_or(BlockReason::MissingAddress)?;
        if !self.fields.all_valid() {
            return Err(BlockReason::InvalidFields(self.fields.invalid_fields()));
        }
        let (mailing_address, mailing_address_parts) = match &self.mailing {
            Some(mailing) => {
                let (line, parts) = mailing.resolve().map_err(BlockReason::MailingAddress)?;
                (Some(line), Some(parts))
            }
            None => (None, None),
        };
        let extension = self
            .state_fields
            .enrich(&self.ctx)
            .map_err(BlockReason::StateFields)?;
        let signature = self.signature.attach().map_err(BlockReason::Signature)?;

        let name_parts = self.fields.name_parts();
        let alloy = match self.status.outcome() {
            Some(outcome @ LookupOutcome::Found(_)) => Some(AlloyStatus::from(outcome)),
            _ => None,
        };
        let base = BaseInfo {
            name: name_parts.full_name(),
            name_parts,
            email: self.fields.value(FieldId::Email).trim().to_string(),
            phone: self.fields.value(FieldId::Telephone).trim().to_string(),
            birthdate: self.fields.value(FieldId::Birthdate).to_string(),
            usps_address: resolved.address.full_addr.clone(),
            mailing_address,
            mailing_address_parts,
            address: resolved.address.clone(),
            oid: self.oid.clone(),
            contact: resolved.contact.clone(),
            alloy,
        };
        Ok(StateInfo::new(base, extension, signature))
    }

    /// Press the submit control.
    ///
    /// Blocks on an incomplete record, asks for confirmation when the
    /// registration status is not active (and not ignored), and otherwise
    /// calls `register` exactly once.
    pub async fn press_submit(
        &mut self,
        service: &dyn SignupService,
        voter: &Voter,
    ) -> Result<SubmitOutcome, SignupError> {
        self.guard_submit()?;
        if !self.submit_enabled() {
            return Err(SignupError::SubmitDisabled);
        }

        self.phase = Phase::Validating;
        let info = match self.build_info() {
            Ok(info) => info,
            Err(reason) => {
                debug!(reason = %reason, "submission blocked");
                self.notices.extend(reason.notices());
                self.phase = Phase::Blocked(reason.clone());
                return Ok(SubmitOutcome::Blocked(reason));
            }
        };

        self.phase = Phase::Checking;
        if !self.status.clears_submission() {
            self.phase = Phase::NeedsConfirmation;
            self.modal = Some(ModalContext::FormSubmit);
            return Ok(SubmitOutcome::NeedsConfirmation(StatusModal::new(
                ModalContext::FormSubmit,
                self.status.outcome(),
            )));
        }

        self.phase = Phase::Confirmed;
        Ok(self.submit(service, &info, voter).await)
    }

    fn guard_submit(&self) -> Result<(), SignupError> {
        match self.phase {
            Phase::Submitting => Err(SignupError::SubmissionInProgress),
            Phase::Success { .. } => Err(SignupError::AlreadySubmitted),
            _ if self.fetching => Err(SignupError::SubmissionInProgress),
            _ => Ok(()),
        }
    }

    async fn submit(
        &mut self,
        service: &dyn SignupService,
        info: &StateInfo,
        voter: &Voter,
    ) -> SubmitOutcome {
        self.phase = Phase::Submitting;
        info!(state = %info.jurisdiction(), "submitting signup");
        let result = {
            let _in_flight = InFlight::start(&mut self.fetching, &mut self.phase);
            service.register(info, voter).await
        };

        let kind = match result {
            Ok(RpcRet::Data { data }) => {
                info!(confirmation_id = %data, "signup accepted");
                self.phase = Phase::Success {
                    confirmation_id: data.clone(),
                };
                return SubmitOutcome::Submitted {
                    confirmation_id: data,
                };
            }
            Ok(RpcRet::Error { message }) => {
                warn!(message = %message, "signup rejected");
                FailureKind::Unknown
            }
            Err(e) => {
                warn!(error = %e, "signup failed");
                e.kind
            }
        };
        self.notices.push(Notice::submission_failed(kind));
        self.phase = Phase::Failed(kind);
        SubmitOutcome::Failed(kind)
    }

    // ── Status modal ──

    /// Open the modal explaining the registration status.
    pub fn open_status_modal(&mut self) -> StatusModal {
        self.modal = Some(ModalContext::Click);
        StatusModal::new(ModalContext::Click, self.status.outcome())
    }

    /// "Sign up anyway" / "Ignore Warning".
    ///
    /// Marks a settled status as ignored and closes the modal. When the
    /// modal came from a submit press, the submission goes ahead.
    pub async fn submit_anyway(
        &mut self,
        service: &dyn SignupService,
        voter: &Voter,
    ) -> Result<Option<SubmitOutcome>, SignupError> {
        let context = self.modal.take();
        if let Some(outcome) = self.status.outcome().cloned() {
            info!(status = outcome.label(), "registration status ignored");
            self.status = StatusSlot::Ignored(outcome);
        }
        if self.phase == Phase::NeedsConfirmation {
            self.phase = Phase::Editing;
        }
        match context {
            Some(ModalContext::FormSubmit) => self.press_submit(service, voter).await.map(Some),
            _ => Ok(None),
        }
    }

    /// "Recheck Fields": close the modal and stop ignoring the status.
    pub fn recheck_fields(&mut self) {
        self.modal = None;
        if let StatusSlot::Ignored(outcome) = &self.status {
            self.status = StatusSlot::Resolved(outcome.clone());
        }
        if self.phase == Phase::NeedsConfirmation {
            self.phase = Phase::Editing;
        }
    }

    /// Drain queued notices, oldest first.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }
}

/// Holds the fetching flag for one service call.
///
/// Dropping it, whether the call finished or its future was abandoned, clears
/// the flag and returns an unfinished submission to editing.
struct InFlight<'a> {
    fetching: &'a mut bool,
    phase: &'a mut Phase,
}

impl<'a> InFlight<'a> {
    fn start(fetching: &'a mut bool, phase: &'a mut Phase) -> Self {
        *fetching = true;
        Self { fetching, phase }
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        *self.fetching = false;
        if *self.phase == Phase::Submitting {
            *self.phase = Phase::Editing;
        }
    }
}

/// The supported jurisdiction a resolved address belongs to.
fn jurisdiction_of(resolved: &ContactAddress) -> Result<Jurisdiction, SignupError> {
    let name = if resolved.contact.state.trim().is_empty() {
        &resolved.address.state
    } else {
        &resolved.contact.state
    };
    let state = State::lookup(name).ok_or_else(|| SignupError::UnsupportedState(name.clone()))?;
    states::lookup(state.name()).ok_or_else(|| SignupError::UnsupportedState(state.name().to_string()))
}
