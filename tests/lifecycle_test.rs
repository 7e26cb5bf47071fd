//! End-to-end contract lifecycle scenarios driven through the domain state
//! machines, with no server or database. These mirror the flows the HTTP
//! handlers execute: every status below is produced by the same transition
//! functions the handlers call before persisting.
use rust_decimal::Decimal;
use uuid::Uuid;

use workbridge_backend::domain::application::{self, ApplicationActor};
use workbridge_backend::domain::contract::{self, SignatureState};
use workbridge_backend::domain::milestone::{self, ApprovalPolicy};
use workbridge_backend::domain::timesheet;
use workbridge_backend::domain::{ContractParty, TransitionError};
use workbridge_backend::models::applications::ApplicationStatus;
use workbridge_backend::models::contracts::ContractStatus;
use workbridge_backend::models::invoices::InvoiceItem;
use workbridge_backend::models::milestones::MilestoneStatus;
use workbridge_backend::models::timesheets::TimesheetStatus;

/// SOW scenario: two milestones (Design 1000, Build 2000), both parties
/// sign, milestone one is funded, submitted, and approved.
#[test]
fn sow_contract_end_to_end() {
    // Creation: total is the milestone sum.
    let milestones = [
        ("Design", Decimal::from(1000)),
        ("Build", Decimal::from(2000)),
    ];
    let total: Decimal = milestones.iter().map(|(_, amount)| *amount).sum();
    assert_eq!(total, Decimal::from(3000));

    // Dispatch and signature exchange.
    let status = contract::send_for_signature(&ContractStatus::Draft).unwrap();
    assert_eq!(status, ContractStatus::PendingSignature);

    // Jane Doe signs for the engineer side.
    contract::validate_signature("Jane Doe", true).unwrap();
    let status = contract::sign(&status, SignatureState::default(), ContractParty::Engineer)
        .unwrap();
    assert_eq!(status, ContractStatus::Signed);

    let status = contract::sign(
        &status,
        SignatureState {
            engineer_signed: true,
            company_signed: false,
        },
        ContractParty::Company,
    )
    .unwrap();
    assert_eq!(status, ContractStatus::Active);

    // Milestone one through the escrow machine.
    contract::require_active(&status, "fund a milestone").unwrap();
    let m1 = milestone::fund(&MilestoneStatus::AwaitingFunding, ContractParty::Company).unwrap();
    assert_eq!(m1, MilestoneStatus::FundedInProgress);
    let m1 = milestone::submit(&m1, ContractParty::Engineer).unwrap();
    assert_eq!(m1, MilestoneStatus::SubmittedForApproval);

    // Approval lands where the deployment policy says it does.
    let parked = milestone::approve(&m1, ContractParty::Company, ApprovalPolicy::Invoice).unwrap();
    assert_eq!(parked, MilestoneStatus::ApprovedPendingInvoice);
    let direct = milestone::approve(&m1, ContractParty::Company, ApprovalPolicy::Direct).unwrap();
    assert_eq!(direct, MilestoneStatus::CompletedPaid);

    // The parked milestone pays out when its invoice is submitted.
    assert_eq!(
        milestone::invoice(&parked).unwrap(),
        MilestoneStatus::CompletedPaid
    );
}

/// Day-rate scenario: rate 500, one timesheet for "Week 1" × 5 days.
#[test]
fn day_rate_contract_end_to_end() {
    let day_rate = Decimal::from(500);

    let status = contract::send_for_signature(&ContractStatus::Draft).unwrap();
    let status = contract::sign(&status, SignatureState::default(), ContractParty::Engineer)
        .unwrap();
    let status = contract::sign(
        &status,
        SignatureState {
            engineer_signed: true,
            company_signed: false,
        },
        ContractParty::Company,
    )
    .unwrap();
    assert_eq!(status, ContractStatus::Active);

    // Submission is validated, and the payable amount is derived.
    let days = Decimal::from(5);
    timesheet::validate_submission("Week 1", days).unwrap();
    assert_eq!(day_rate * days, Decimal::from(2500));

    // Approval pays out and lands on Paid.
    let ts = timesheet::approve(&TimesheetStatus::Submitted, ContractParty::Company).unwrap();
    assert_eq!(ts, TimesheetStatus::Approved);
    let ts = timesheet::mark_paid(&ts).unwrap();
    assert_eq!(ts, TimesheetStatus::Paid);

    // Explicit completion closes the contract.
    assert_eq!(
        contract::complete(&status).unwrap(),
        ContractStatus::Completed
    );
}

/// Active is unreachable without both signatures, in order.
#[test]
fn active_requires_both_signatures() {
    // Company cannot countersign a contract the engineer has not signed.
    let err = contract::sign(
        &ContractStatus::PendingSignature,
        SignatureState::default(),
        ContractParty::Company,
    )
    .unwrap_err();
    assert!(matches!(err, TransitionError::InvalidTransition { .. }));

    // Nothing jumps straight from Draft to Active.
    assert!(
        contract::sign(
            &ContractStatus::Draft,
            SignatureState::default(),
            ContractParty::Engineer
        )
        .is_err()
    );
}

/// Signatures are write-once per party.
#[test]
fn signing_is_idempotent_per_party() {
    let signed_once = SignatureState {
        engineer_signed: true,
        company_signed: false,
    };
    assert_eq!(
        contract::sign(&ContractStatus::Signed, signed_once, ContractParty::Engineer).unwrap_err(),
        TransitionError::AlreadySigned { party: "engineer" }
    );

    let fully_signed = SignatureState {
        engineer_signed: true,
        company_signed: true,
    };
    for party in [ContractParty::Engineer, ContractParty::Company] {
        assert!(matches!(
            contract::sign(&ContractStatus::Active, fully_signed, party).unwrap_err(),
            TransitionError::AlreadySigned { .. }
        ));
    }
}

/// Invoice totals are the plain sum of their items.
#[test]
fn invoice_total_matches_item_sum() {
    let items = vec![
        InvoiceItem {
            milestone_id: Uuid::new_v4(),
            description: "Design".to_string(),
            amount: Decimal::from(1000),
        },
        InvoiceItem {
            milestone_id: Uuid::new_v4(),
            description: "Build".to_string(),
            amount: Decimal::from(2000),
        },
    ];

    let total = items.iter().fold(Decimal::ZERO, |acc, i| acc + i.amount);
    assert_eq!(total, Decimal::from(3000));

    // Round-trips through the stored JSON representation unchanged.
    let encoded = serde_json::to_value(&items).unwrap();
    let decoded: Vec<InvoiceItem> = serde_json::from_value(encoded).unwrap();
    let decoded_total = decoded.iter().fold(Decimal::ZERO, |acc, i| acc + i.amount);
    assert_eq!(decoded_total, total);
}

/// The application pipeline feeding contract creation.
#[test]
fn application_pipeline_to_contract() {
    let status = ApplicationStatus::Applied;
    assert!(application::contractable(&status));

    let status = application::offer(&status, ApplicationActor::JobOwner).unwrap();
    let status = application::accept(&status, ApplicationActor::Applicant).unwrap();
    assert_eq!(status, ApplicationStatus::Accepted);
    assert!(application::contractable(&status));

    // Rejected and withdrawn applications cannot produce contracts.
    assert!(!application::contractable(&ApplicationStatus::Rejected));
    assert!(!application::contractable(&ApplicationStatus::Withdrawn));
}

/// A cancelled contract stops all further work.
#[test]
fn cancellation_freezes_the_contract() {
    let status = contract::cancel(&ContractStatus::Active).unwrap();
    assert_eq!(status, ContractStatus::Cancelled);

    assert!(contract::require_active(&status, "fund a milestone").is_err());
    assert!(contract::require_active(&status, "submit a timesheet").is_err());
    assert!(contract::sign(&status, SignatureState::default(), ContractParty::Engineer).is_err());
    assert!(contract::cancel(&status).is_err());
}
