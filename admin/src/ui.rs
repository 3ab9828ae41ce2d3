// Presentation boundary: what the panel shows, never how.
// Business logic produces values and hands them to a `Presenter`.

use crate::session::Session;
use gpmf_common::chain::ExplorerLinks;
use serde::Serialize;
use strum::{Display, EnumIter, IntoEnumIterator};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, Serialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Control {
    ConnectWallet,
    NetworkSelector,
    Disconnect,
    Refresh,
    ExplorerLinks,
    Pause,
    Unpause,
    SetLockup,
    ExtendLockup,
    DecreaseLockAmount,
    ReleaseLockup,
    ClearExpiredLockup,
    Transfer,
    Burn,
    CheckLockup,
    CheckUnlocked,
    CheckBalance,
}

impl Control {
    pub fn is_owner_only(&self) -> bool {
        matches!(
            self,
            Control::Pause
                | Control::Unpause
                | Control::SetLockup
                | Control::ExtendLockup
                | Control::DecreaseLockAmount
                | Control::ReleaseLockup
                | Control::ClearExpiredLockup
        )
    }

    // Usable whatever the connection state
    pub fn is_always_enabled(&self) -> bool {
        matches!(self, Control::ConnectWallet | Control::NetworkSelector)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Availability {
    Enabled,
    // Using it shows the connect reminder
    Disconnected,
    OwnerRequired,
}

// Enablement of every control, derived from the session and nothing else
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ControlState {
    connected: bool,
    is_owner: bool,
}

impl ControlState {
    pub fn from_session(session: Option<&Session>) -> Self {
        match session {
            Some(session) => Self {
                connected: true,
                is_owner: session.is_owner(),
            },
            None => Self::default(),
        }
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    pub fn is_owner(&self) -> bool {
        self.is_owner
    }

    pub fn availability(&self, control: Control) -> Availability {
        if control.is_always_enabled() {
            return Availability::Enabled;
        }

        if !self.connected {
            return Availability::Disconnected;
        }

        if control.is_owner_only() && !self.is_owner {
            return Availability::OwnerRequired;
        }

        Availability::Enabled
    }

    pub fn is_enabled(&self, control: Control) -> bool {
        self.availability(control) == Availability::Enabled
    }

    pub fn all(&self) -> Vec<(Control, Availability)> {
        Control::iter().map(|c| (c, self.availability(c))).collect()
    }
}

// Single value display slots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum Field {
    ConnectButton,
    WalletAddress,
    NativeBalance,
    TokenBalance,
    WalletRole,
    Name,
    Symbol,
    Decimals,
    TotalSupply,
    Paused,
    Owner,
}

// Multi line query result boxes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "snake_case")]
pub enum ResultArea {
    LockupInfo,
    UnlockedBalance,
    Balance,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Status {
    Success,
    Failure,
    Neutral,
}

pub trait Presenter: Send + Sync {
    fn set_text(&self, field: Field, value: &str);

    fn show_result(&self, area: ResultArea, text: &str, status: Status);

    fn set_links(&self, links: &ExplorerLinks);

    fn apply_controls(&self, state: &ControlState);

    // Blocking notice: action outcomes and reminders
    fn alert(&self, message: &str);
}
