pub mod chat_api;
pub mod chat_session;
pub mod relay;
