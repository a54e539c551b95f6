//! Verification outcome

use serde::{Deserialize, Serialize};

use crate::detect::DetectionError;

/// Outcome of one check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CheckStatus {
    /// The check was never run, typically because the key was unusable
    NotEvaluated,
    Passed,
    Failed,
}

impl CheckStatus {
    pub fn from_passed(passed: bool) -> Self {
        if passed {
            CheckStatus::Passed
        } else {
            CheckStatus::Failed
        }
    }

    pub fn is_passed(&self) -> bool {
        matches!(self, CheckStatus::Passed)
    }

    /// Boolean reading of the legacy report, where "not evaluated" is `true`
    pub fn legacy_flag(&self) -> bool {
        !matches!(self, CheckStatus::Failed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorType {
    WrongPublicKey,
    UnsupportedKeyType,
    AlgoMismatch,
}

impl From<DetectionError> for ErrorType {
    fn from(error: DetectionError) -> Self {
        match error {
            DetectionError::WrongPublicKey => ErrorType::WrongPublicKey,
            DetectionError::UnsupportedKeyType => ErrorType::UnsupportedKeyType,
        }
    }
}

/// Result of one verification call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationResult {
    pub signature: CheckStatus,
    pub integrity: CheckStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_type: Option<ErrorType>,
    /// Method the caller should have claimed, set with [`ErrorType::AlgoMismatch`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub corrected_method: Option<String>,
}

impl VerificationResult {
    /// The key could not be used; nothing else was evaluated
    pub fn detection_failed(error: DetectionError) -> Self {
        Self {
            signature: CheckStatus::NotEvaluated,
            integrity: CheckStatus::NotEvaluated,
            error_type: Some(error.into()),
            corrected_method: None,
        }
    }

    pub fn signature_failed(integrity_valid: bool) -> Self {
        Self {
            signature: CheckStatus::Failed,
            integrity: CheckStatus::from_passed(integrity_valid),
            error_type: None,
            corrected_method: None,
        }
    }

    pub fn algorithm_mismatch(integrity_valid: bool, corrected_method: String) -> Self {
        Self {
            signature: CheckStatus::Passed,
            integrity: CheckStatus::from_passed(integrity_valid),
            error_type: Some(ErrorType::AlgoMismatch),
            corrected_method: Some(corrected_method),
        }
    }

    pub fn verified(integrity_valid: bool) -> Self {
        Self {
            signature: CheckStatus::Passed,
            integrity: CheckStatus::from_passed(integrity_valid),
            error_type: None,
            corrected_method: None,
        }
    }

    pub fn signature_valid(&self) -> bool {
        self.signature.is_passed()
    }

    pub fn integrity_valid(&self) -> bool {
        self.integrity.is_passed()
    }

    /// Signature and digests passed and the claim matched the key
    pub fn is_accepted(&self) -> bool {
        self.signature_valid() && self.integrity_valid() && self.error_type.is_none()
    }

    pub fn to_legacy(&self) -> LegacyReport {
        LegacyReport {
            signature_valid: self.signature.legacy_flag(),
            integrity_valid: self.integrity.legacy_flag(),
            error_type: self.error_type,
            corrected_method: self.corrected_method.clone(),
        }
    }
}

/// Flat boolean report for consumers of the older result shape
///
/// `signatureValid` and `integrityValid` are `true` when the check was not
/// evaluated, so `errorType` must be read first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyReport {
    pub signature_valid: bool,
    pub integrity_valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_type: Option<ErrorType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub corrected_method: Option<String>,
}
