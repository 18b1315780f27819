//! Signature capture: drawn on a pad or uploaded as an image, depending on
//! what the jurisdiction accepts.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::error::EnrichError;
use crate::states::SignatureMode;

/// How a signature was captured. Wire names match the signup server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignatureKind {
    #[serde(rename = "canvas")]
    Drawn,
    #[serde(rename = "upload")]
    Uploaded,
}

impl SignatureKind {
    pub fn allowed_by(&self, mode: SignatureMode) -> bool {
        match mode {
            SignatureMode::DrawnOnly => *self == SignatureKind::Drawn,
            SignatureMode::UploadedOnly => *self == SignatureKind::Uploaded,
            SignatureMode::Either | SignatureMode::None => true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignatureState {
    NotSigned,
    DrawnReady,
    UploadedReady,
}

/// Captured image data tagged with how it was captured.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureProof {
    pub kind: SignatureKind,
    /// Image as a data URL.
    pub data: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CaptureError {
    #[error("this state does not accept {0:?} signatures")]
    NotAllowed(SignatureKind),
}

/// Signature capture state for one form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureCapture {
    mode: SignatureMode,
    active: SignatureKind,
    proof: Option<SignatureProof>,
}

impl SignatureCapture {
    pub fn new(mode: SignatureMode) -> Self {
        let active = match mode {
            SignatureMode::DrawnOnly => SignatureKind::Drawn,
            _ => SignatureKind::Uploaded,
        };
        Self {
            mode,
            active,
            proof: None,
        }
    }

    pub fn mode(&self) -> SignatureMode {
        self.mode
    }

    /// Capture method currently shown to the voter.
    pub fn active(&self) -> SignatureKind {
        self.active
    }

    pub fn state(&self) -> SignatureState {
        match &self.proof {
            None => SignatureState::NotSigned,
            Some(p) if p.kind == SignatureKind::Drawn => SignatureState::DrawnReady,
            Some(_) => SignatureState::UploadedReady,
        }
    }

    pub fn proof(&self) -> Option<&SignatureProof> {
        self.proof.as_ref()
    }

    /// Switch capture method. Only `Either` allows switching; the other
    /// method's capture is discarded.
    pub fn toggle(&mut self, kind: SignatureKind) -> Result<(), CaptureError> {
        if !kind.allowed_by(self.mode) {
            return Err(CaptureError::NotAllowed(kind));
        }
        if kind != self.active {
            debug!(from = ?self.active, to = ?kind, "signature method switched");
            self.active = kind;
            self.proof = None;
        }
        Ok(())
    }

    /// Record the output of a capture. Empty data (a cleared pad, a
    /// cancelled upload) leaves the form unsigned.
    pub fn capture(&mut self, kind: SignatureKind, data: &str) -> Result<SignatureState, CaptureError> {
        self.toggle(kind)?;
        let data = data.trim();
        self.proof = (!data.is_empty()).then(|| SignatureProof {
            kind,
            data: data.to_string(),
        });
        Ok(self.state())
    }

    pub fn clear(&mut self) {
        self.proof = None;
    }

    /// The signature to attach to a submission.
    ///
    /// Fails when the jurisdiction requires a signature and none has been
    /// captured; passes through any optional capture otherwise.
    pub fn attach(&self) -> Result<Option<SignatureProof>, EnrichError> {
        match (&self.proof, self.mode.requires_signature()) {
            (None, true) => Err(EnrichError::Missing("signature")),
            (proof, _) => Ok(proof.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG: &str = "data:image/png;base64,iVBORw0KGgo=";

    #[test]
    fn starts_unsigned_and_blocks_attach() {
        let capture = SignatureCapture::new(SignatureMode::Either);
        assert_eq!(capture.state(), SignatureState::NotSigned);
        assert_eq!(capture.attach(), Err(EnrichError::Missing("signature")));
    }

    #[test]
    fn empty_capture_stays_unsigned() {
        let mut capture = SignatureCapture::new(SignatureMode::Either);
        assert_eq!(
            capture.capture(SignatureKind::Drawn, "  "),
            Ok(SignatureState::NotSigned)
        );
    }

    #[test]
    fn drawn_then_uploaded_discards_drawn() {
        let mut capture = SignatureCapture::new(SignatureMode::Either);
        assert_eq!(
            capture.capture(SignatureKind::Drawn, PNG),
            Ok(SignatureState::DrawnReady)
        );
        capture.toggle(SignatureKind::Uploaded).unwrap();
        assert_eq!(capture.state(), SignatureState::NotSigned);
        assert_eq!(
            capture.capture(SignatureKind::Uploaded, PNG),
            Ok(SignatureState::UploadedReady)
        );
        let proof = capture.attach().unwrap().unwrap();
        assert_eq!(proof.kind, SignatureKind::Uploaded);
    }

    #[test]
    fn toggle_to_same_method_keeps_capture() {
        let mut capture = SignatureCapture::new(SignatureMode::Either);
        capture.capture(SignatureKind::Uploaded, PNG).unwrap();
        capture.toggle(SignatureKind::Uploaded).unwrap();
        assert_eq!(capture.state(), SignatureState::UploadedReady);
    }

    #[test]
    fn upload_only_rejects_drawing() {
        let mut capture = SignatureCapture::new(SignatureMode::UploadedOnly);
        assert_eq!(
            capture.capture(SignatureKind::Drawn, PNG),
            Err(CaptureError::NotAllowed(SignatureKind::Drawn))
        );
        assert_eq!(capture.active(), SignatureKind::Uploaded);
    }

    #[test]
    fn drawn_only_starts_on_pad() {
        let capture = SignatureCapture::new(SignatureMode::DrawnOnly);
        assert_eq!(capture.active(), SignatureKind::Drawn);
    }

    #[test]
    fn no_signature_mode_bypasses_requirement() {
        let mut capture = SignatureCapture::new(SignatureMode::None);
        assert_eq!(capture.attach(), Ok(None));
        capture.capture(SignatureKind::Drawn, PNG).unwrap();
        assert!(capture.attach().unwrap().is_some());
    }

    #[test]
    fn kind_serializes_with_wire_names() {
        assert_eq!(
            serde_json::to_string(&SignatureKind::Drawn).unwrap(),
            "\"canvas\""
        );
    }
}
