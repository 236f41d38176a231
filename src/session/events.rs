// ABOUTME: Session-changed events published by the SessionManager
// ABOUTME: Presentation code routes between signed-in and signed-out flows from these

use crate::models::User;

/// Session state change, delivered in the order the changes happened
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// A session was signed in or restored from storage
    Available(User),
    /// The signed-in user's profile changed
    Updated(User),
    /// No session: signed out, renewal failed, or nothing stored at startup
    Ended,
}

impl SessionEvent {
    /// Whether the event leaves a user signed in
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        matches!(self, Self::Available(_) | Self::Updated(_))
    }

    /// User carried by the event
    #[must_use]
    pub const fn user(&self) -> Option<&User> {
        match self {
            Self::Available(user) | Self::Updated(user) => Some(user),
            Self::Ended => None,
        }
    }
}
