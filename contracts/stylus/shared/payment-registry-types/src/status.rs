//! Closed vocabularies shared by both registries.
//!
//! All of these cross the ABI as `uint8`; discriminants are part of the wire contract and must
//! never be reordered.

/// Lifecycle status of a payment intent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum IntentStatus {
    #[default]
    None = 0,
    Created = 1,
    Quoting = 2,
    Routed = 3,
    Sent = 4,
    Pending = 5,
    Confirmed = 6,
    Failed = 7,
    NeedsReview = 8,
    Cancelled = 9,
}

impl IntentStatus {
    /// Statuses after which an intent can no longer be mutated.
    pub const TERMINAL: [IntentStatus; 3] = [
        IntentStatus::Confirmed,
        IntentStatus::Failed,
        IntentStatus::Cancelled,
    ];

    pub fn is_terminal(self) -> bool {
        Self::TERMINAL.contains(&self)
    }

    /// Whether `cancelIntent` may move an intent in this status to `Cancelled`.
    ///
    /// Once funds are sent (or anything later) cancellation is off the table.
    pub fn is_cancellable(self) -> bool {
        matches!(
            self,
            IntentStatus::None
                | IntentStatus::Created
                | IntentStatus::Quoting
                | IntentStatus::Routed
                | IntentStatus::NeedsReview
        )
    }
}

impl TryFrom<u8> for IntentStatus {
    type Error = ();

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        use IntentStatus::*;
        let status = match value {
            0 => None,
            1 => Created,
            2 => Quoting,
            3 => Routed,
            4 => Sent,
            5 => Pending,
            6 => Confirmed,
            7 => Failed,
            8 => NeedsReview,
            9 => Cancelled,
            _ => return Err(()),
        };
        Ok(status)
    }
}

/// Reason attached to the most recent failed attempt (or to a receipt outcome).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum FailReason {
    #[default]
    None = 0,
    InvalidRecipient = 1,
    LimitExceeded = 2,
    ProviderDown = 3,
    Timeout = 4,
    Duplicate = 5,
    InsufficientFunds = 6,
    PendingTooLong = 7,
    Unsupported = 8,
    Unknown = 9,
}

impl TryFrom<u8> for FailReason {
    type Error = ();

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        use FailReason::*;
        let reason = match value {
            0 => None,
            1 => InvalidRecipient,
            2 => LimitExceeded,
            3 => ProviderDown,
            4 => Timeout,
            5 => Duplicate,
            6 => InsufficientFunds,
            7 => PendingTooLong,
            8 => Unsupported,
            9 => Unknown,
            _ => return Err(()),
        };
        Ok(reason)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum RecipientType {
    #[default]
    Unknown = 0,
    Qr = 1,
    Mobile = 2,
    BankAccount = 3,
    WalletId = 4,
}

impl TryFrom<u8> for RecipientType {
    type Error = ();

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        use RecipientType::*;
        let kind = match value {
            0 => Unknown,
            1 => Qr,
            2 => Mobile,
            3 => BankAccount,
            4 => WalletId,
            _ => return Err(()),
        };
        Ok(kind)
    }
}

/// Routing preference recorded alongside the provider decision.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum RoutePreference {
    #[default]
    Default = 0,
    Cheapest = 1,
    Fastest = 2,
    PreferredProvider = 3,
}

impl TryFrom<u8> for RoutePreference {
    type Error = ();

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        use RoutePreference::*;
        let pref = match value {
            0 => Default,
            1 => Cheapest,
            2 => Fastest,
            3 => PreferredProvider,
            _ => return Err(()),
        };
        Ok(pref)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_set_is_confirmed_failed_cancelled() {
        let terminal: Vec<u8> = (0u8..=9)
            .filter_map(|v| IntentStatus::try_from(v).ok())
            .filter(|s| s.is_terminal())
            .map(|s| s as u8)
            .collect();
        assert_eq!(terminal, vec![6, 7, 9]);
    }

    #[test]
    fn cancellable_excludes_sent_and_later() {
        assert!(IntentStatus::None.is_cancellable());
        assert!(IntentStatus::Created.is_cancellable());
        assert!(IntentStatus::Quoting.is_cancellable());
        assert!(IntentStatus::Routed.is_cancellable());
        assert!(IntentStatus::NeedsReview.is_cancellable());

        assert!(!IntentStatus::Sent.is_cancellable());
        assert!(!IntentStatus::Pending.is_cancellable());
        assert!(!IntentStatus::Confirmed.is_cancellable());
        assert!(!IntentStatus::Failed.is_cancellable());
        assert!(!IntentStatus::Cancelled.is_cancellable());
    }

    #[test]
    fn out_of_range_discriminants_are_rejected() {
        assert!(IntentStatus::try_from(10).is_err());
        assert!(FailReason::try_from(10).is_err());
        assert!(RecipientType::try_from(5).is_err());
        assert!(RoutePreference::try_from(4).is_err());
        assert_eq!(RecipientType::try_from(3), Ok(RecipientType::BankAccount));
    }
}
