pub mod chat_manager;
pub mod message_censor;
pub mod message_censor_impl;

/// Identifies one connected client.
pub type ClientId = uuid::Uuid;
