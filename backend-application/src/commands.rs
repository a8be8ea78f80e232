pub mod event_commands;
pub mod registration_commands;

use crate::{AppError, AppState};

/// Counts storage failures on their way back to the caller.
pub(crate) fn observe<T>(state: &AppState, result: Result<T, AppError>) -> Result<T, AppError> {
    if let Err(AppError::Persistence(_)) = &result {
        state.metrics.record_persistence_error();
    }
    result
}
