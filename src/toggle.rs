//! Optimistic toggle outcomes shared by the favorites and cart controllers

/// Severity of a user-facing notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Info,
    Error,
}

/// A user-facing notification emitted by a toggle action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

impl Notification {
    pub fn success<T: Into<String>>(message: T) -> Self {
        Self {
            kind: NotificationKind::Success,
            message: message.into(),
        }
    }

    pub fn info<T: Into<String>>(message: T) -> Self {
        Self {
            kind: NotificationKind::Info,
            message: message.into(),
        }
    }

    pub fn error<T: Into<String>>(message: T) -> Self {
        Self {
            kind: NotificationKind::Error,
            message: message.into(),
        }
    }
}

/// How an optimistic flip was resolved against the server
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The server accepted the mutation; the optimistic state stands
    Committed,
    /// The server reported the item already in the requested state; local
    /// state is forced to the server's implied truth
    Reconciled,
    /// The mutation failed; the optimistic flip was reverted
    RolledBack,
}

/// Result of a toggle action: the item's resulting on/off state, how it was
/// resolved, and the notification to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleOutcome {
    pub state: bool,
    pub resolution: Resolution,
    pub notification: Notification,
}

impl ToggleOutcome {
    pub fn committed(state: bool, notification: Notification) -> Self {
        Self {
            state,
            resolution: Resolution::Committed,
            notification,
        }
    }

    pub fn reconciled(state: bool, notification: Notification) -> Self {
        Self {
            state,
            resolution: Resolution::Reconciled,
            notification,
        }
    }

    pub fn rolled_back(state: bool, notification: Notification) -> Self {
        Self {
            state,
            resolution: Resolution::RolledBack,
            notification,
        }
    }
}
