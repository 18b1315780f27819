pub mod address;
pub mod error;
pub mod extension;
pub mod fields;
pub mod info;
pub mod name;
pub mod options;
pub mod rpc;
pub mod signature;
pub mod states;
pub mod status;

pub use address::{Address, AddressInputParts, ContactAddress, ContactData};
pub use error::EnrichError;
pub use extension::{EnrichContext, Extension, StateFields};
pub use fields::{BaseFields, FieldId, FieldWarning, MailingAddress};
pub use info::{AlloyStatus, BaseInfo, StateInfo, Utm, Voter};
pub use name::NameParts;
pub use rpc::{FailureKind, RpcRet, SignupService, TransportError};
pub use signature::{SignatureCapture, SignatureKind, SignatureProof, SignatureState};
pub use states::{Jurisdiction, SignatureMode, State};
pub use status::{LookupOutcome, RegistrationArgs, RegistrationLookup, RegistrationStatus, StatusSlot};
