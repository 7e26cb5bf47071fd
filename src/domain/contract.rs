//! Contract status machine: draft → signature exchange → active work →
//! completion, with cancellation reachable from any non-terminal status.

use sea_orm::ActiveEnum;

use super::{ContractParty, TransitionError, ValidationError};
use crate::models::contracts::ContractStatus;

/// Which signatures are already on the contract when a transition is
/// attempted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SignatureState {
    pub engineer_signed: bool,
    pub company_signed: bool,
}

/// `Draft → PendingSignature` — the contract is dispatched to the engineer.
pub fn send_for_signature(status: &ContractStatus) -> Result<ContractStatus, TransitionError> {
    match status {
        ContractStatus::Draft => Ok(ContractStatus::PendingSignature),
        other => Err(TransitionError::InvalidTransition {
            from: other.to_value(),
            action: "send for signature",
        }),
    }
}

/// Signature exchange. The engineer signs first
/// (`PendingSignature → Signed`), then the company countersigns
/// (`Signed → Active`). A party that already signed gets `AlreadySigned`;
/// signatures are never overwritten.
pub fn sign(
    status: &ContractStatus,
    sigs: SignatureState,
    party: ContractParty,
) -> Result<ContractStatus, TransitionError> {
    match (status, party) {
        (ContractStatus::PendingSignature, ContractParty::Engineer) => {
            if sigs.engineer_signed {
                Err(TransitionError::AlreadySigned { party: "engineer" })
            } else {
                Ok(ContractStatus::Signed)
            }
        }
        // Countersigning waits for the engineer's signature.
        (ContractStatus::PendingSignature, ContractParty::Company) => {
            Err(TransitionError::InvalidTransition {
                from: status.to_value(),
                action: "countersign",
            })
        }
        (ContractStatus::Signed, ContractParty::Engineer) => {
            Err(TransitionError::AlreadySigned { party: "engineer" })
        }
        (ContractStatus::Signed, ContractParty::Company) => {
            if sigs.company_signed {
                Err(TransitionError::AlreadySigned { party: "company" })
            } else {
                Ok(ContractStatus::Active)
            }
        }
        (ContractStatus::Active, p) => Err(TransitionError::AlreadySigned { party: p.label() }),
        (ContractStatus::Draft, _)
        | (ContractStatus::Completed, _)
        | (ContractStatus::Cancelled, _) => Err(TransitionError::InvalidTransition {
            from: status.to_value(),
            action: "sign",
        }),
    }
}

/// Either party may cancel a contract that is not already terminal.
pub fn cancel(status: &ContractStatus) -> Result<ContractStatus, TransitionError> {
    match status {
        ContractStatus::Draft
        | ContractStatus::PendingSignature
        | ContractStatus::Signed
        | ContractStatus::Active => Ok(ContractStatus::Cancelled),
        ContractStatus::Completed | ContractStatus::Cancelled => {
            Err(TransitionError::InvalidTransition {
                from: status.to_value(),
                action: "cancel",
            })
        }
    }
}

/// `Active → Completed`. For SOW contracts this fires once every milestone is
/// paid out; day-rate contracts are completed by an explicit company action.
pub fn complete(status: &ContractStatus) -> Result<ContractStatus, TransitionError> {
    match status {
        ContractStatus::Active => Ok(ContractStatus::Completed),
        other => Err(TransitionError::InvalidTransition {
            from: other.to_value(),
            action: "complete",
        }),
    }
}

/// Guard shared by milestone and timesheet actions: work only happens on an
/// active contract.
pub fn require_active(
    status: &ContractStatus,
    action: &'static str,
) -> Result<(), TransitionError> {
    match status {
        ContractStatus::Active => Ok(()),
        other => Err(TransitionError::ContractNotActive {
            status: other.to_value(),
            action,
        }),
    }
}

/// Signing requires a typed name and an explicit agreement flag.
pub fn validate_signature(name: &str, agreed: bool) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::Empty { field: "name" });
    }
    if !agreed {
        return Err(ValidationError::AgreementRequired);
    }
    Ok(())
}

/// Boilerplate agreement terms interpolated from the party names, used when
/// the company supplies no description of its own.
pub fn boilerplate_terms(company_name: &str, engineer_name: &str, job_title: &str) -> String {
    format!(
        "This agreement is entered into between {company_name} (\"the Company\") and \
         {engineer_name} (\"the Engineer\") for the engagement \"{job_title}\". The Engineer \
         will deliver the work described herein to a professional standard, and the Company \
         will remit payment under the agreed schedule. Either party may terminate this \
         agreement in writing; payment obligations for work already performed survive \
         termination."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_signature_exchange() {
        let status = send_for_signature(&ContractStatus::Draft).unwrap();
        assert_eq!(status, ContractStatus::PendingSignature);

        let status = sign(&status, SignatureState::default(), ContractParty::Engineer).unwrap();
        assert_eq!(status, ContractStatus::Signed);

        let sigs = SignatureState {
            engineer_signed: true,
            company_signed: false,
        };
        let status = sign(&status, sigs, ContractParty::Company).unwrap();
        assert_eq!(status, ContractStatus::Active);
    }

    #[test]
    fn company_cannot_sign_before_engineer() {
        let err = sign(
            &ContractStatus::PendingSignature,
            SignatureState::default(),
            ContractParty::Company,
        )
        .unwrap_err();
        assert!(matches!(err, TransitionError::InvalidTransition { .. }));
    }

    #[test]
    fn second_signature_by_same_party_is_rejected() {
        let sigs = SignatureState {
            engineer_signed: true,
            company_signed: false,
        };
        let err = sign(&ContractStatus::Signed, sigs, ContractParty::Engineer).unwrap_err();
        assert_eq!(err, TransitionError::AlreadySigned { party: "engineer" });

        let err = sign(
            &ContractStatus::Active,
            SignatureState {
                engineer_signed: true,
                company_signed: true,
            },
            ContractParty::Company,
        )
        .unwrap_err();
        assert_eq!(err, TransitionError::AlreadySigned { party: "company" });
    }

    #[test]
    fn terminal_statuses_accept_no_signature() {
        for status in [ContractStatus::Completed, ContractStatus::Cancelled] {
            for party in [ContractParty::Engineer, ContractParty::Company] {
                assert!(sign(&status, SignatureState::default(), party).is_err());
            }
        }
    }

    #[test]
    fn cancel_from_any_non_terminal_status() {
        for status in [
            ContractStatus::Draft,
            ContractStatus::PendingSignature,
            ContractStatus::Signed,
            ContractStatus::Active,
        ] {
            assert_eq!(cancel(&status).unwrap(), ContractStatus::Cancelled);
        }
        assert!(cancel(&ContractStatus::Completed).is_err());
        assert!(cancel(&ContractStatus::Cancelled).is_err());
    }

    #[test]
    fn complete_requires_active() {
        assert_eq!(
            complete(&ContractStatus::Active).unwrap(),
            ContractStatus::Completed
        );
        assert!(complete(&ContractStatus::Signed).is_err());
    }

    #[test]
    fn signature_validation() {
        assert!(validate_signature("Jane Doe", true).is_ok());
        assert_eq!(
            validate_signature("  ", true).unwrap_err(),
            ValidationError::Empty { field: "name" }
        );
        assert_eq!(
            validate_signature("Jane Doe", false).unwrap_err(),
            ValidationError::AgreementRequired
        );
    }
}
