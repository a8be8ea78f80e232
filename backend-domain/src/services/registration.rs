// Registration counter
// Keeps 0 <= currentParticipants <= maxParticipants across join/leave and
// re-derives status. Pure so both the store and tests can drive it directly.

use thiserror::Error;

use crate::entities::Event;
use crate::value_objects::{EventId, EventStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationDelta {
    Join,
    Leave,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    #[error("event {id} is at capacity ({max} participants)")]
    Capacity { id: EventId, max: u32 },
    #[error("event {id} has no participants to remove")]
    NoParticipants { id: EventId },
    #[error("event {id} is cancelled")]
    Cancelled { id: EventId },
}

impl RegistrationError {
    pub fn kind(&self) -> &'static str {
        match self {
            RegistrationError::Capacity { .. } => "capacity",
            RegistrationError::NoParticipants { .. } => "no_participants",
            RegistrationError::Cancelled { .. } => "cancelled",
        }
    }
}

/// Returns the event after one participant joins or leaves. The input is never
/// modified, so a rejected delta leaves the caller's record as it was.
///
/// Join derives `Full` from capacity. Leave clears `Full` back to `Open`.
/// `Cancelled` events accept neither.
pub fn apply_registration_delta(
    event: &Event,
    delta: RegistrationDelta,
) -> Result<Event, RegistrationError> {
    if event.status == EventStatus::Cancelled {
        return Err(RegistrationError::Cancelled {
            id: event.id.clone(),
        });
    }

    let mut next = event.clone();
    match delta {
        RegistrationDelta::Join => {
            if event.current_participants >= event.max_participants {
                return Err(RegistrationError::Capacity {
                    id: event.id.clone(),
                    max: event.max_participants,
                });
            }
            next.current_participants += 1;
            next.status =
                EventStatus::for_occupancy(next.current_participants, next.max_participants);
        }
        RegistrationDelta::Leave => {
            if event.current_participants == 0 {
                return Err(RegistrationError::NoParticipants {
                    id: event.id.clone(),
                });
            }
            next.current_participants -= 1;
            next.status = EventStatus::Open;
        }
    }
    Ok(next)
}
