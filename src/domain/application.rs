//! Application pipeline transitions. The job owner moves applications to
//! `Offered`/`Rejected`; the applicant accepts an offer or withdraws.

use sea_orm::ActiveEnum;

use super::TransitionError;
use crate::models::applications::ApplicationStatus;

/// Who is acting on an application. Admins act as the job owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplicationActor {
    Applicant,
    JobOwner,
}

/// `Applied → Offered` (job owner).
pub fn offer(
    status: &ApplicationStatus,
    actor: ApplicationActor,
) -> Result<ApplicationStatus, TransitionError> {
    match actor {
        ApplicationActor::JobOwner => {}
        ApplicationActor::Applicant => {
            return Err(TransitionError::WrongParty {
                action: "extend an offer",
                expected: "job owner",
            });
        }
    }
    match status {
        ApplicationStatus::Applied => Ok(ApplicationStatus::Offered),
        other => Err(TransitionError::InvalidTransition {
            from: other.to_value(),
            action: "offer",
        }),
    }
}

/// `Applied → Rejected` (job owner).
pub fn reject(
    status: &ApplicationStatus,
    actor: ApplicationActor,
) -> Result<ApplicationStatus, TransitionError> {
    match actor {
        ApplicationActor::JobOwner => {}
        ApplicationActor::Applicant => {
            return Err(TransitionError::WrongParty {
                action: "reject an application",
                expected: "job owner",
            });
        }
    }
    match status {
        ApplicationStatus::Applied => Ok(ApplicationStatus::Rejected),
        other => Err(TransitionError::InvalidTransition {
            from: other.to_value(),
            action: "reject",
        }),
    }
}

/// `Offered → Accepted` (applicant).
pub fn accept(
    status: &ApplicationStatus,
    actor: ApplicationActor,
) -> Result<ApplicationStatus, TransitionError> {
    match actor {
        ApplicationActor::Applicant => {}
        ApplicationActor::JobOwner => {
            return Err(TransitionError::WrongParty {
                action: "accept an offer",
                expected: "applicant",
            });
        }
    }
    match status {
        ApplicationStatus::Offered => Ok(ApplicationStatus::Accepted),
        other => Err(TransitionError::InvalidTransition {
            from: other.to_value(),
            action: "accept",
        }),
    }
}

/// `Applied | Offered → Withdrawn` (applicant).
pub fn withdraw(
    status: &ApplicationStatus,
    actor: ApplicationActor,
) -> Result<ApplicationStatus, TransitionError> {
    match actor {
        ApplicationActor::Applicant => {}
        ApplicationActor::JobOwner => {
            return Err(TransitionError::WrongParty {
                action: "withdraw an application",
                expected: "applicant",
            });
        }
    }
    match status {
        ApplicationStatus::Applied | ApplicationStatus::Offered => Ok(ApplicationStatus::Withdrawn),
        other => Err(TransitionError::InvalidTransition {
            from: other.to_value(),
            action: "withdraw",
        }),
    }
}

/// A contract can be drawn up from an application that is still live on the
/// company's side.
pub fn contractable(status: &ApplicationStatus) -> bool {
    matches!(
        status,
        ApplicationStatus::Applied | ApplicationStatus::Accepted
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offer_accept_path() {
        let s = offer(&ApplicationStatus::Applied, ApplicationActor::JobOwner).unwrap();
        assert_eq!(s, ApplicationStatus::Offered);
        let s = accept(&s, ApplicationActor::Applicant).unwrap();
        assert_eq!(s, ApplicationStatus::Accepted);
    }

    #[test]
    fn terminal_statuses_are_frozen() {
        for s in [
            ApplicationStatus::Accepted,
            ApplicationStatus::Rejected,
            ApplicationStatus::Withdrawn,
        ] {
            assert!(offer(&s, ApplicationActor::JobOwner).is_err());
            assert!(reject(&s, ApplicationActor::JobOwner).is_err());
            assert!(accept(&s, ApplicationActor::Applicant).is_err());
            assert!(withdraw(&s, ApplicationActor::Applicant).is_err());
        }
    }

    #[test]
    fn actor_gates() {
        assert!(matches!(
            offer(&ApplicationStatus::Applied, ApplicationActor::Applicant),
            Err(TransitionError::WrongParty { .. })
        ));
        assert!(matches!(
            accept(&ApplicationStatus::Offered, ApplicationActor::JobOwner),
            Err(TransitionError::WrongParty { .. })
        ));
    }

    #[test]
    fn contractable_statuses() {
        assert!(contractable(&ApplicationStatus::Applied));
        assert!(contractable(&ApplicationStatus::Accepted));
        assert!(!contractable(&ApplicationStatus::Rejected));
        assert!(!contractable(&ApplicationStatus::Withdrawn));
    }
}
