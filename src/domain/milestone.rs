//! Milestone escrow machine for SOW contracts:
//! `AwaitingFunding → FundedInProgress → SubmittedForApproval →
//! ApprovedPendingInvoice → CompletedPaid`, strictly forward.

use sea_orm::ActiveEnum;

use super::{ContractParty, TransitionError};
use crate::models::milestones::MilestoneStatus;

/// What approval resolves to: park the milestone for invoicing, or pay out
/// on the spot. A deployment-level policy rather than a hardcoded branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ApprovalPolicy {
    /// Approval parks the milestone until it is covered by an invoice.
    #[default]
    Invoice,
    /// Approval pays out immediately, skipping the invoice step.
    Direct,
}

impl ApprovalPolicy {
    /// Reads `MILESTONE_APPROVAL_POLICY` (`invoice` | `direct`); anything
    /// else falls back to the default.
    pub fn from_env() -> Self {
        match std::env::var("MILESTONE_APPROVAL_POLICY").as_deref() {
            Ok("direct") => ApprovalPolicy::Direct,
            _ => ApprovalPolicy::Invoice,
        }
    }
}

/// `AwaitingFunding → FundedInProgress`. The company escrows the milestone
/// amount through the payment gateway before this commits.
pub fn fund(
    status: &MilestoneStatus,
    actor: ContractParty,
) -> Result<MilestoneStatus, TransitionError> {
    match actor {
        ContractParty::Company => {}
        ContractParty::Engineer => {
            return Err(TransitionError::WrongParty {
                action: "fund a milestone",
                expected: "company",
            });
        }
    }
    match status {
        MilestoneStatus::AwaitingFunding => Ok(MilestoneStatus::FundedInProgress),
        other => Err(TransitionError::InvalidTransition {
            from: other.to_value(),
            action: "fund",
        }),
    }
}

/// `FundedInProgress → SubmittedForApproval`. The engineer hands the work in.
pub fn submit(
    status: &MilestoneStatus,
    actor: ContractParty,
) -> Result<MilestoneStatus, TransitionError> {
    match actor {
        ContractParty::Engineer => {}
        ContractParty::Company => {
            return Err(TransitionError::WrongParty {
                action: "submit a milestone",
                expected: "engineer",
            });
        }
    }
    match status {
        MilestoneStatus::FundedInProgress => Ok(MilestoneStatus::SubmittedForApproval),
        other => Err(TransitionError::InvalidTransition {
            from: other.to_value(),
            action: "submit",
        }),
    }
}

/// `SubmittedForApproval → ApprovedPendingInvoice | CompletedPaid`, depending
/// on the deployment's approval policy.
pub fn approve(
    status: &MilestoneStatus,
    actor: ContractParty,
    policy: ApprovalPolicy,
) -> Result<MilestoneStatus, TransitionError> {
    match actor {
        ContractParty::Company => {}
        ContractParty::Engineer => {
            return Err(TransitionError::WrongParty {
                action: "approve a milestone",
                expected: "company",
            });
        }
    }
    match status {
        MilestoneStatus::SubmittedForApproval => Ok(match policy {
            ApprovalPolicy::Invoice => MilestoneStatus::ApprovedPendingInvoice,
            ApprovalPolicy::Direct => MilestoneStatus::CompletedPaid,
        }),
        other => Err(TransitionError::InvalidTransition {
            from: other.to_value(),
            action: "approve",
        }),
    }
}

/// `ApprovedPendingInvoice → CompletedPaid` — the invoice covering this
/// milestone was submitted and the payout released.
pub fn invoice(status: &MilestoneStatus) -> Result<MilestoneStatus, TransitionError> {
    match status {
        MilestoneStatus::ApprovedPendingInvoice => Ok(MilestoneStatus::CompletedPaid),
        other => Err(TransitionError::InvalidTransition {
            from: other.to_value(),
            action: "invoice",
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [MilestoneStatus; 5] = [
        MilestoneStatus::AwaitingFunding,
        MilestoneStatus::FundedInProgress,
        MilestoneStatus::SubmittedForApproval,
        MilestoneStatus::ApprovedPendingInvoice,
        MilestoneStatus::CompletedPaid,
    ];

    #[test]
    fn forward_path_under_invoice_policy() {
        let s = fund(&MilestoneStatus::AwaitingFunding, ContractParty::Company).unwrap();
        assert_eq!(s, MilestoneStatus::FundedInProgress);
        let s = submit(&s, ContractParty::Engineer).unwrap();
        assert_eq!(s, MilestoneStatus::SubmittedForApproval);
        let s = approve(&s, ContractParty::Company, ApprovalPolicy::Invoice).unwrap();
        assert_eq!(s, MilestoneStatus::ApprovedPendingInvoice);
        let s = invoice(&s).unwrap();
        assert_eq!(s, MilestoneStatus::CompletedPaid);
    }

    #[test]
    fn direct_policy_skips_the_invoice_parking_state() {
        let s = approve(
            &MilestoneStatus::SubmittedForApproval,
            ContractParty::Company,
            ApprovalPolicy::Direct,
        )
        .unwrap();
        assert_eq!(s, MilestoneStatus::CompletedPaid);
    }

    #[test]
    fn no_skipping_or_reversing() {
        // fund only ever applies to AwaitingFunding
        for s in ALL.iter().filter(|s| **s != MilestoneStatus::AwaitingFunding) {
            assert!(fund(s, ContractParty::Company).is_err());
        }
        // submit only ever applies to FundedInProgress
        for s in ALL.iter().filter(|s| **s != MilestoneStatus::FundedInProgress) {
            assert!(submit(s, ContractParty::Engineer).is_err());
        }
        // approve only ever applies to SubmittedForApproval
        for s in ALL
            .iter()
            .filter(|s| **s != MilestoneStatus::SubmittedForApproval)
        {
            assert!(approve(s, ContractParty::Company, ApprovalPolicy::Invoice).is_err());
        }
        // invoicing only ever applies to ApprovedPendingInvoice
        for s in ALL
            .iter()
            .filter(|s| **s != MilestoneStatus::ApprovedPendingInvoice)
        {
            assert!(invoice(s).is_err());
        }
    }

    #[test]
    fn role_gates() {
        assert!(matches!(
            fund(&MilestoneStatus::AwaitingFunding, ContractParty::Engineer),
            Err(TransitionError::WrongParty { .. })
        ));
        assert!(matches!(
            submit(&MilestoneStatus::FundedInProgress, ContractParty::Company),
            Err(TransitionError::WrongParty { .. })
        ));
        assert!(matches!(
            approve(
                &MilestoneStatus::SubmittedForApproval,
                ContractParty::Engineer,
                ApprovalPolicy::Invoice
            ),
            Err(TransitionError::WrongParty { .. })
        ));
    }
}
