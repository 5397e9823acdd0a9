use serde::{Deserialize, Serialize};

use crate::models::ChatId;

// -- Webhook transport --

/// One inbound chat event: a message typed in conversation `chat_id`.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateRequest {
    pub chat_id: ChatId,
    pub text: String,
}

/// Outbound notices for one processed event. `show_menu` tells the
/// transport whether to render the main menu alongside the last message;
/// the core never renders UI affordances itself.
#[derive(Debug, Serialize)]
pub struct ReplyResponse {
    pub messages: Vec<String>,
    pub show_menu: bool,
}
