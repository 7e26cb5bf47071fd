//! Timesheet machine for day-rate contracts:
//! `Submitted → Approved → Paid`, with `Rejected` reachable from `Submitted`.

use rust_decimal::Decimal;
use sea_orm::ActiveEnum;

use super::{ContractParty, TransitionError, ValidationError};
use crate::models::timesheets::TimesheetStatus;

/// A timesheet needs a period label and a positive day count before it is
/// accepted at all.
pub fn validate_submission(period: &str, days: Decimal) -> Result<(), ValidationError> {
    if period.trim().is_empty() {
        return Err(ValidationError::Empty { field: "period" });
    }
    if days <= Decimal::ZERO {
        return Err(ValidationError::NotPositive { field: "days" });
    }
    Ok(())
}

/// `Submitted → Approved`. The approve handler pays out and marks `Paid` in
/// the same request.
pub fn approve(
    status: &TimesheetStatus,
    actor: ContractParty,
) -> Result<TimesheetStatus, TransitionError> {
    match actor {
        ContractParty::Company => {}
        ContractParty::Engineer => {
            return Err(TransitionError::WrongParty {
                action: "approve a timesheet",
                expected: "company",
            });
        }
    }
    match status {
        TimesheetStatus::Submitted => Ok(TimesheetStatus::Approved),
        other => Err(TransitionError::InvalidTransition {
            from: other.to_value(),
            action: "approve",
        }),
    }
}

/// `Approved → Paid`, after the gateway settles the payout.
pub fn mark_paid(status: &TimesheetStatus) -> Result<TimesheetStatus, TransitionError> {
    match status {
        TimesheetStatus::Approved => Ok(TimesheetStatus::Paid),
        other => Err(TransitionError::InvalidTransition {
            from: other.to_value(),
            action: "mark paid",
        }),
    }
}

/// `Submitted → Rejected`. Terminal; corrections arrive as a new timesheet.
pub fn reject(
    status: &TimesheetStatus,
    actor: ContractParty,
) -> Result<TimesheetStatus, TransitionError> {
    match actor {
        ContractParty::Company => {}
        ContractParty::Engineer => {
            return Err(TransitionError::WrongParty {
                action: "reject a timesheet",
                expected: "company",
            });
        }
    }
    match status {
        TimesheetStatus::Submitted => Ok(TimesheetStatus::Rejected),
        other => Err(TransitionError::InvalidTransition {
            from: other.to_value(),
            action: "reject",
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn submission_validation() {
        assert!(validate_submission("Week 1", Decimal::from(5)).is_ok());
        assert_eq!(
            validate_submission("", Decimal::from(5)).unwrap_err(),
            ValidationError::Empty { field: "period" }
        );
        assert_eq!(
            validate_submission("Week 1", Decimal::ZERO).unwrap_err(),
            ValidationError::NotPositive { field: "days" }
        );
        assert!(validate_submission("Week 1", Decimal::from(-2)).is_err());
    }

    #[test]
    fn approve_then_pay() {
        let s = approve(&TimesheetStatus::Submitted, ContractParty::Company).unwrap();
        assert_eq!(s, TimesheetStatus::Approved);
        assert_eq!(mark_paid(&s).unwrap(), TimesheetStatus::Paid);
    }

    #[test]
    fn monotonic() {
        assert!(approve(&TimesheetStatus::Approved, ContractParty::Company).is_err());
        assert!(approve(&TimesheetStatus::Paid, ContractParty::Company).is_err());
        assert!(approve(&TimesheetStatus::Rejected, ContractParty::Company).is_err());
        assert!(mark_paid(&TimesheetStatus::Submitted).is_err());
        assert!(mark_paid(&TimesheetStatus::Paid).is_err());
        assert!(reject(&TimesheetStatus::Paid, ContractParty::Company).is_err());
    }

    #[test]
    fn engineer_cannot_approve_or_reject() {
        assert!(matches!(
            approve(&TimesheetStatus::Submitted, ContractParty::Engineer),
            Err(TransitionError::WrongParty { .. })
        ));
        assert!(matches!(
            reject(&TimesheetStatus::Submitted, ContractParty::Engineer),
            Err(TransitionError::WrongParty { .. })
        ));
    }
}
