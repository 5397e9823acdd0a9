use duit_types::models::TxKind;

/// The multi-turn flows, one variant each, with per-state typed scratch.
/// A chat is in at most one of these at a time; whatever the state machine
/// needs to remember between turns lives inside the state itself, so flows
/// can never read each other's leftovers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dialogue {
    Register(RegisterFlow),
    Login(LoginFlow),
    Entry(EntryFlow),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegisterFlow {
    AwaitingUsername,
    AwaitingPassword { username: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginFlow {
    AwaitingUsername,
    AwaitingPassword { username: String },
}

/// Add-income and add-expense are the same flow; `kind` is fixed at entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryFlow {
    pub kind: TxKind,
    pub state: EntryState,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryState {
    AwaitingAmount,
    AwaitingNote { amount: i64 },
}

impl Dialogue {
    pub fn register() -> Self {
        Dialogue::Register(RegisterFlow::AwaitingUsername)
    }

    pub fn login() -> Self {
        Dialogue::Login(LoginFlow::AwaitingUsername)
    }

    pub fn entry(kind: TxKind) -> Self {
        Dialogue::Entry(EntryFlow {
            kind,
            state: EntryState::AwaitingAmount,
        })
    }
}
