// src/services/chat_session.rs
//! Client-side chat state: a transcript plus a pending flag, advanced by a
//! pure [`update`] function. Whoever drives it performs the returned
//! [`Effect`] and feeds the outcome back as [`Event::Settled`].

pub const GREETING: &str =
    "Hello! I'm your sustainability assistant. Ask me anything about environmental topics.";
pub const CLIENT_FALLBACK: &str =
    "Sorry, I'm having trouble connecting to the knowledge base. Please try again later.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sender {
    User,
    Bot,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message {
    pub text: String,
    pub sender: Sender,
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self { text: text.into(), sender: Sender::User }
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self { text: text.into(), sender: Sender::Bot }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatState {
    messages: Vec<Message>,
    pending: bool,
}

impl Default for ChatState {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatState {
    /// Fresh session, greeting already in the transcript.
    pub fn new() -> Self {
        Self {
            messages: vec![Message::bot(GREETING)],
            pending: false,
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Raw text from the input box.
    Submit(String),
    /// The in-flight call finished; `None` means it failed.
    Settled(Option<String>),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    Ask(String),
}

pub fn update(mut state: ChatState, event: Event) -> (ChatState, Option<Effect>) {
    match event {
        Event::Submit(text) => {
            if state.pending || text.trim().is_empty() {
                return (state, None);
            }
            state.messages.push(Message::user(text.clone()));
            state.pending = true;
            (state, Some(Effect::Ask(text)))
        }
        Event::Settled(outcome) => {
            if !state.pending {
                tracing::warn!("settle event with no request in flight");
                return (state, None);
            }
            let text = outcome.unwrap_or_else(|| CLIENT_FALLBACK.to_string());
            state.messages.push(Message::bot(text));
            state.pending = false;
            (state, None)
        }
    }
}
