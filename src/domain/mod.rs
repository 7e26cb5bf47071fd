//! Lifecycle state machines for contracts, milestones, timesheets, and
//! applications.
//!
//! Everything in here is pure: transition functions take the current status
//! (plus whatever facts the rule needs) and return the next status or a typed
//! error. Handlers decide HTTP codes; the database layer persists whatever a
//! function here allowed. No other code path writes a status.

pub mod application;
pub mod contract;
pub mod milestone;
pub mod timesheet;

use thiserror::Error;

/// Which side of a contract the acting user is on. Admins act on the
/// company side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContractParty {
    Engineer,
    Company,
}

impl ContractParty {
    pub fn label(self) -> &'static str {
        match self {
            ContractParty::Engineer => "engineer",
            ContractParty::Company => "company",
        }
    }
}

/// A lifecycle move the state machine does not define.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("cannot {action} from status {from}")]
    InvalidTransition { from: String, action: &'static str },
    #[error("the {party} has already signed this contract")]
    AlreadySigned { party: &'static str },
    #[error("only the {expected} can {action}")]
    WrongParty {
        action: &'static str,
        expected: &'static str,
    },
    #[error("contract is {status}; {action} requires an active contract")]
    ContractNotActive {
        status: String,
        action: &'static str,
    },
    #[error("{action} applies to {expected} contracts only")]
    WrongContractType {
        action: &'static str,
        expected: &'static str,
    },
}

/// A request that failed structural validation before any transition was
/// attempted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} must not be empty")]
    Empty { field: &'static str },
    #[error("{field} must be greater than zero")]
    NotPositive { field: &'static str },
    #[error("signing requires explicit agreement to the terms")]
    AgreementRequired,
}
