use thiserror::Error;

use crate::store::StoreError;

/// User-correctable precondition violations of the attendance core. All are
/// detected before any write; nothing is mutated on an error path.
#[derive(Debug, Error)]
pub enum AttendanceError {
    #[error("You have already checked in today")]
    AlreadyCheckedIn,

    #[error("You have already checked out today")]
    AlreadyCheckedOut,

    #[error("You need to check in before checking out")]
    NotCheckedIn,

    #[error("You already submitted a request for this date")]
    DuplicateRequest,

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl AttendanceError {
    /// True for the precondition errors that should surface as a rejected
    /// operation rather than a server failure.
    pub fn is_user_error(&self) -> bool {
        !matches!(self, AttendanceError::Store(_))
    }
}
