//! Event classification and the text dispatch rule.
//!
//! The priority between an active dialogue and the menu is not an artifact
//! of handler registration order; it is the explicit [`route_text`]
//! function below.

use crate::text;

/// Slash commands from the command surface. Dispatched globally, whether
/// or not a dialogue is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Register,
    Login,
    Logout,
    Cancel,
}

/// Plain-text menu entry points, consulted only for idle sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    AddIncome,
    AddExpense,
    IncomeToday,
    ExpenseThisWeek,
    MonthRecap,
    Logout,
}

/// An inbound message after classification. Unknown commands get their own
/// class: they are ignored everywhere and must not reach a dialogue as
/// ordinary text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundEvent {
    Command(Command),
    Text(String),
    UnknownCommand,
}

pub fn classify(raw: &str) -> InboundEvent {
    let trimmed = raw.trim();
    if let Some(name) = trimmed.strip_prefix('/') {
        return match name {
            "start" => InboundEvent::Command(Command::Start),
            "register" => InboundEvent::Command(Command::Register),
            "login" => InboundEvent::Command(Command::Login),
            "logout" => InboundEvent::Command(Command::Logout),
            "cancel" => InboundEvent::Command(Command::Cancel),
            _ => InboundEvent::UnknownCommand,
        };
    }
    InboundEvent::Text(trimmed.to_string())
}

/// Where a plain-text event goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// An active dialogue consumes every text event, menu triggers included.
    ActiveDialogue,
    Menu(MenuAction),
    Unhandled,
}

pub fn route_text(dialogue_active: bool, text: &str) -> Route {
    if dialogue_active {
        return Route::ActiveDialogue;
    }
    match match_trigger(text) {
        Some(action) => Route::Menu(action),
        None => Route::Unhandled,
    }
}

pub fn match_trigger(text: &str) -> Option<MenuAction> {
    match text {
        text::TRIGGER_INCOME => Some(MenuAction::AddIncome),
        text::TRIGGER_EXPENSE => Some(MenuAction::AddExpense),
        text::TRIGGER_INCOME_TODAY => Some(MenuAction::IncomeToday),
        text::TRIGGER_EXPENSE_WEEK => Some(MenuAction::ExpenseThisWeek),
        text::TRIGGER_MONTH_RECAP => Some(MenuAction::MonthRecap),
        text::TRIGGER_LOGOUT => Some(MenuAction::Logout),
        _ => None,
    }
}
