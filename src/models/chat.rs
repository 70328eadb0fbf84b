use chrono::{ SecondsFormat, Utc };
use serde::{ Deserialize, Serialize };
use std::sync::atomic::{ AtomicI64, Ordering };

pub const GREETING: &str =
    "Hello! I'm your AI traffic management assistant. How can I help you today?";

static LAST_TURN_ID: AtomicI64 = AtomicI64::new(0);

/// Millisecond clock reading, bumped so ids handed out by this process never repeat.
pub fn next_turn_id() -> i64 {
    let now = Utc::now().timestamp_millis();
    let mut last = LAST_TURN_ID.load(Ordering::Relaxed);
    loop {
        let candidate = if now > last { now } else { last + 1 };
        match
            LAST_TURN_ID.compare_exchange_weak(last, candidate, Ordering::AcqRel, Ordering::Relaxed)
        {
            Ok(_) => {
                return candidate;
            }
            Err(actual) => {
                last = actual;
            }
        }
    }
}

/// ISO-8601 UTC with millisecond precision, e.g. `2024-05-01T10:15:30.123Z`.
pub fn iso_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Ai,
}

impl Sender {
    /// Role name used by chat-completion endpoints.
    pub fn completion_role(&self) -> &'static str {
        match self {
            Sender::User => "user",
            Sender::Ai => "assistant",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub id: i64,
    pub text: String,
    pub sender: Sender,
    pub timestamp: String,
}

impl ConversationTurn {
    pub fn new(sender: Sender, text: impl Into<String>) -> Self {
        Self {
            id: next_turn_id(),
            text: text.into(),
            sender,
            timestamp: iso_timestamp(),
        }
    }
}

/// What the router needs from a prior turn. Callers on the HTTP API send only these two fields.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub text: String,
    pub sender: Sender,
}

impl From<&ConversationTurn> for HistoryEntry {
    fn from(turn: &ConversationTurn) -> Self {
        Self {
            text: turn.text.clone(),
            sender: turn.sender,
        }
    }
}

/// Append-only chat history for one session. Turns are never edited once pushed.
#[derive(Clone, Debug)]
pub struct Conversation {
    pub id: String,
    turns: Vec<ConversationTurn>,
}

impl Conversation {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into(), turns: Vec::new() }
    }

    /// A session opened the way the chat widget opens one: with the assistant greeting.
    pub fn with_greeting(id: impl Into<String>) -> Self {
        let mut conversation = Self::new(id);
        conversation.turns.push(ConversationTurn::new(Sender::Ai, GREETING));
        conversation
    }

    pub fn push_user(&mut self, text: impl Into<String>) -> &ConversationTurn {
        self.push(ConversationTurn::new(Sender::User, text))
    }

    /// Records an assistant reply, keeping the id and timestamp the router produced.
    pub fn push_ai(&mut self, result: &ClassificationResult) -> &ConversationTurn {
        self.push(ConversationTurn {
            id: result.id,
            text: result.message.clone(),
            sender: Sender::Ai,
            timestamp: result.timestamp.clone(),
        })
    }

    fn push(&mut self, turn: ConversationTurn) -> &ConversationTurn {
        self.turns.push(turn);
        &self.turns[self.turns.len() - 1]
    }

    pub fn turns(&self) -> &[ConversationTurn] {
        &self.turns
    }

    pub fn history(&self) -> Vec<HistoryEntry> {
        self.turns.iter().map(HistoryEntry::from).collect()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum RouterAction {
    Redirect {
        target: String,
    },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub success: bool,
    pub message: String,
    pub timestamp: String,
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<RouterAction>,
}

impl ClassificationResult {
    pub fn reply(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            timestamp: iso_timestamp(),
            id: next_turn_id(),
            action: None,
        }
    }

    pub fn with_action(mut self, action: RouterAction) -> Self {
        self.action = Some(action);
        self
    }
}
