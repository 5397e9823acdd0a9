use std::sync::{Arc, PoisonError};

use tracing::{debug, error};

use duit_db::Database;
use duit_types::models::{ChatId, TxKind};

use crate::clock::now_wita;
use crate::credentials::{CredentialError, CredentialStore, MIN_PASSWORD_LEN, MIN_USERNAME_LEN};
use crate::dialogue::{Dialogue, EntryFlow, EntryState, LoginFlow, RegisterFlow};
use crate::ledger::LedgerStore;
use crate::money::parse_amount;
use crate::report::{month_range, today_range, week_range};
use crate::router::{Command, InboundEvent, MenuAction, Route, classify, route_text};
use crate::session::{Session, SessionManager};
use crate::text;

/// One outbound notice. `show_menu` asks the transport to present the main
/// menu next to the message; the engine itself never renders anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub show_menu: bool,
}

impl Reply {
    fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            show_menu: false,
        }
    }

    fn with_menu(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            show_menu: true,
        }
    }
}

/// The conversational core: session registry, credential and ledger stores,
/// and the dialogue state machines over them. One instance serves every
/// chat; all state beyond the two stores lives in the session manager.
pub struct Engine {
    sessions: SessionManager,
    credentials: CredentialStore,
    ledger: LedgerStore,
}

impl Engine {
    pub fn new(db: Arc<Database>) -> Self {
        Self {
            sessions: SessionManager::new(),
            credentials: CredentialStore::new(Arc::clone(&db)),
            ledger: LedgerStore::new(db),
        }
    }

    /// Process one inbound message. The session lock is held from state
    /// read to state write, so events within one chat never interleave;
    /// `None` means the event is ignored (no outbound notice).
    pub fn handle(&self, chat_id: ChatId, raw: &str) -> Option<Reply> {
        let session = self.sessions.session(chat_id);
        let mut session = session.lock().unwrap_or_else(PoisonError::into_inner);

        let event = classify(raw);
        // free text is never logged here; mid-dialogue it may be a password
        if let InboundEvent::Command(cmd) = &event {
            debug!(chat_id, ?cmd, "command");
        }

        match event {
            InboundEvent::Command(cmd) => self.handle_command(&mut session, cmd),
            InboundEvent::Text(input) => match route_text(session.has_dialogue(), &input) {
                Route::ActiveDialogue => self.advance_dialogue(&mut session, &input),
                Route::Menu(action) => self.handle_menu(&mut session, action),
                Route::Unhandled => None,
            },
            InboundEvent::UnknownCommand => None,
        }
    }

    // -- Command surface --

    fn handle_command(&self, session: &mut Session, cmd: Command) -> Option<Reply> {
        match cmd {
            Command::Start => Some(Reply::plain(text::INTRO)),
            Command::Register => {
                session.set_dialogue(Dialogue::register());
                Some(Reply::plain(text::ASK_NEW_USERNAME))
            }
            Command::Login => {
                session.set_dialogue(Dialogue::login());
                Some(Reply::plain(text::ASK_USERNAME))
            }
            Command::Logout => {
                session.clear_authentication();
                Some(Reply::plain(text::LOGGED_OUT))
            }
            Command::Cancel => {
                // a fallback inside a flow; idle chats ignore it
                if session.has_dialogue() {
                    session.clear_dialogue();
                    Some(Reply::plain(text::CANCELLED))
                } else {
                    None
                }
            }
        }
    }

    // -- Menu entry points (idle sessions only; see router::route_text) --

    fn handle_menu(&self, session: &mut Session, action: MenuAction) -> Option<Reply> {
        match action {
            MenuAction::AddIncome => self.start_entry(session, TxKind::In),
            MenuAction::AddExpense => self.start_entry(session, TxKind::Out),
            MenuAction::IncomeToday => self.report_income_today(session),
            MenuAction::ExpenseThisWeek => self.report_expense_week(session),
            MenuAction::MonthRecap => self.report_month(session),
            MenuAction::Logout => {
                session.clear_authentication();
                Some(Reply::plain(text::LOGGED_OUT))
            }
        }
    }

    fn start_entry(&self, session: &mut Session, kind: TxKind) -> Option<Reply> {
        if !session.is_authenticated() {
            return Some(Reply::plain(text::NOT_LOGGED_IN));
        }
        session.set_dialogue(Dialogue::entry(kind));
        let prompt = match kind {
            TxKind::In => text::ASK_INCOME_AMOUNT,
            TxKind::Out => text::ASK_EXPENSE_AMOUNT,
        };
        Some(Reply::plain(prompt))
    }

    // -- Dialogue stepping --

    fn advance_dialogue(&self, session: &mut Session, input: &str) -> Option<Reply> {
        let dialogue = session.take_dialogue()?;
        let (next, reply) = match dialogue {
            Dialogue::Register(flow) => self.step_register(flow, input),
            Dialogue::Login(flow) => self.step_login(session, flow, input),
            Dialogue::Entry(flow) => self.step_entry(session, flow, input),
        };
        if let Some(next) = next {
            session.set_dialogue(next);
        }
        Some(reply)
    }

    fn step_register(&self, flow: RegisterFlow, input: &str) -> (Option<Dialogue>, Reply) {
        match flow {
            RegisterFlow::AwaitingUsername => {
                let username = input.trim();
                if username.chars().count() < MIN_USERNAME_LEN {
                    return (
                        Some(Dialogue::Register(RegisterFlow::AwaitingUsername)),
                        Reply::plain(text::USERNAME_TOO_SHORT),
                    );
                }
                match self.credentials.username_taken(username) {
                    Ok(true) => (
                        Some(Dialogue::Register(RegisterFlow::AwaitingUsername)),
                        Reply::plain(text::USERNAME_TAKEN),
                    ),
                    Ok(false) => (
                        Some(Dialogue::Register(RegisterFlow::AwaitingPassword {
                            username: username.to_string(),
                        })),
                        Reply::plain(text::ASK_NEW_PASSWORD),
                    ),
                    Err(e) => {
                        error!("username lookup failed: {e}");
                        (
                            Some(Dialogue::Register(RegisterFlow::AwaitingUsername)),
                            Reply::plain(text::STORE_FAILURE),
                        )
                    }
                }
            }
            RegisterFlow::AwaitingPassword { username } => {
                let password = input.trim();
                if password.chars().count() < MIN_PASSWORD_LEN {
                    return (
                        Some(Dialogue::Register(RegisterFlow::AwaitingPassword { username })),
                        Reply::plain(text::PASSWORD_TOO_SHORT),
                    );
                }
                match self.credentials.register(&username, password) {
                    // no auto-login; the user is told to /login
                    Ok(_) => (None, Reply::plain(text::REGISTER_DONE)),
                    Err(CredentialError::DuplicateUsername) => {
                        // name was taken between the username check and now
                        (
                            Some(Dialogue::Register(RegisterFlow::AwaitingUsername)),
                            Reply::plain(text::USERNAME_TAKEN),
                        )
                    }
                    Err(e) => {
                        error!("registration failed: {e}");
                        (
                            Some(Dialogue::Register(RegisterFlow::AwaitingPassword { username })),
                            Reply::plain(text::STORE_FAILURE),
                        )
                    }
                }
            }
        }
    }

    fn step_login(
        &self,
        session: &mut Session,
        flow: LoginFlow,
        input: &str,
    ) -> (Option<Dialogue>, Reply) {
        match flow {
            // no existence check here: lookup happens only at verify time,
            // so the prompt sequence never reveals which usernames exist
            LoginFlow::AwaitingUsername => (
                Some(Dialogue::Login(LoginFlow::AwaitingPassword {
                    username: input.trim().to_string(),
                })),
                Reply::plain(text::ASK_PASSWORD),
            ),
            LoginFlow::AwaitingPassword { username } => {
                match self.credentials.verify(&username, input.trim()) {
                    Ok(user) => {
                        let welcome = text::welcome(&user.username);
                        session.set_authenticated(user);
                        (None, Reply::with_menu(welcome))
                    }
                    // terminal: the user must re-invoke /login to retry
                    Err(CredentialError::AuthFailure) => (None, Reply::plain(text::LOGIN_FAILED)),
                    Err(e) => {
                        error!("login verification failed: {e}");
                        (
                            Some(Dialogue::Login(LoginFlow::AwaitingPassword { username })),
                            Reply::plain(text::STORE_FAILURE),
                        )
                    }
                }
            }
        }
    }

    fn step_entry(
        &self,
        session: &mut Session,
        flow: EntryFlow,
        input: &str,
    ) -> (Option<Dialogue>, Reply) {
        let EntryFlow { kind, state } = flow;
        match state {
            EntryState::AwaitingAmount => match parse_amount(input) {
                Some(amount) => (
                    Some(Dialogue::Entry(EntryFlow {
                        kind,
                        state: EntryState::AwaitingNote { amount },
                    })),
                    Reply::plain(text::ASK_NOTE),
                ),
                None => (
                    Some(Dialogue::Entry(EntryFlow {
                        kind,
                        state: EntryState::AwaitingAmount,
                    })),
                    Reply::plain(text::AMOUNT_NOT_NUMERIC),
                ),
            },
            EntryState::AwaitingNote { amount } => {
                let Some(user) = session.auth() else {
                    // logged out mid-flow (/logout between steps)
                    return (None, Reply::plain(text::NOT_LOGGED_IN));
                };
                let note = match input.trim() {
                    "-" => None,
                    s => Some(s),
                };
                match self.ledger.record(user.user_id, kind, amount, note) {
                    Ok(_) => (None, Reply::with_menu(text::entry_recorded(kind, amount))),
                    Err(e) => {
                        error!("ledger write failed: {e}");
                        (
                            Some(Dialogue::Entry(EntryFlow {
                                kind,
                                state: EntryState::AwaitingNote { amount },
                            })),
                            Reply::plain(text::STORE_FAILURE),
                        )
                    }
                }
            }
        }
    }

    // -- Reports --

    fn report_income_today(&self, session: &Session) -> Option<Reply> {
        let user = match session.auth() {
            Some(user) => user,
            None => return Some(Reply::plain(text::NOT_LOGGED_IN)),
        };
        let range = today_range(now_wita());
        match self
            .ledger
            .sum_in_range(user.user_id, TxKind::In, range.start, range.end)
        {
            Ok(total) => Some(Reply::with_menu(text::income_today(total))),
            Err(e) => {
                error!("today report failed: {e}");
                Some(Reply::plain(text::STORE_FAILURE))
            }
        }
    }

    fn report_expense_week(&self, session: &Session) -> Option<Reply> {
        let user = match session.auth() {
            Some(user) => user,
            None => return Some(Reply::plain(text::NOT_LOGGED_IN)),
        };
        let range = week_range(now_wita());
        match self
            .ledger
            .sum_in_range(user.user_id, TxKind::Out, range.start, range.end)
        {
            Ok(total) => Some(Reply::with_menu(text::expense_week(total))),
            Err(e) => {
                error!("week report failed: {e}");
                Some(Reply::plain(text::STORE_FAILURE))
            }
        }
    }

    fn report_month(&self, session: &Session) -> Option<Reply> {
        let user = match session.auth() {
            Some(user) => user,
            None => return Some(Reply::plain(text::NOT_LOGGED_IN)),
        };
        let range = month_range(now_wita());
        let totals = self
            .ledger
            .sum_in_range(user.user_id, TxKind::In, range.start, range.end)
            .and_then(|income| {
                let expense =
                    self.ledger
                        .sum_in_range(user.user_id, TxKind::Out, range.start, range.end)?;
                Ok((income, expense))
            });
        match totals {
            Ok((income, expense)) => Some(Reply::with_menu(text::month_recap(income, expense))),
            Err(e) => {
                error!("month recap failed: {e}");
                Some(Reply::plain(text::STORE_FAILURE))
            }
        }
    }
}
