use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use duit_types::models::ChatId;

use crate::credentials::AuthUser;
use crate::dialogue::Dialogue;

/// State of one conversation: who is logged in, if anyone, and which flow
/// is mid-flight, if any. Lives for the process lifetime; there is no
/// persistence and no expiry.
#[derive(Debug, Default)]
pub struct Session {
    auth: Option<AuthUser>,
    dialogue: Option<Dialogue>,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        self.auth.is_some()
    }

    pub fn auth(&self) -> Option<&AuthUser> {
        self.auth.as_ref()
    }

    pub fn set_authenticated(&mut self, user: AuthUser) {
        self.auth = Some(user);
    }

    /// Logout. Any active dialogue is left alone.
    pub fn clear_authentication(&mut self) {
        self.auth = None;
    }

    pub fn has_dialogue(&self) -> bool {
        self.dialogue.is_some()
    }

    /// Entering a flow abandons whatever flow was active before; the old
    /// one is overwritten, never resumed.
    pub fn set_dialogue(&mut self, dialogue: Dialogue) {
        self.dialogue = Some(dialogue);
    }

    pub fn take_dialogue(&mut self) -> Option<Dialogue> {
        self.dialogue.take()
    }

    /// Cancel. Authentication is untouched.
    pub fn clear_dialogue(&mut self) {
        self.dialogue = None;
    }
}

/// All sessions, keyed by chat identity. The per-session `Mutex` is held
/// for the whole of one event's processing: events within a chat are
/// serialized, while different chats proceed concurrently.
#[derive(Default)]
pub struct SessionManager {
    sessions: RwLock<HashMap<ChatId, Arc<Mutex<Session>>>>,
}

impl SessionManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self, chat_id: ChatId) -> Arc<Mutex<Session>> {
        {
            let map = self.sessions.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(session) = map.get(&chat_id) {
                return Arc::clone(session);
            }
        }

        let mut map = self.sessions.write().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(map.entry(chat_id).or_default())
    }
}
