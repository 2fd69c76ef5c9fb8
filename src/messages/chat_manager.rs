use std::{
    fmt::{Display, Formatter},
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
};

use super::{
    message_censor::{CensorOutcome, CensorRequest, MessageCensorer},
    ClientId,
};

#[derive(Clone, Debug)]
pub struct ChatManagerConfig {
    pub max_message_length: usize,
}

pub struct ChatManager {
    max_message_length: usize,
    censorer: Arc<dyn MessageCensorer + Send + Sync>,
    id_counter: AtomicU64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendMessageInput {
    pub text: String,
    pub channel: String,
    pub sender_name: String,
    pub sender_id: ClientId,
    pub from_bot: bool,
    pub reply_to: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditMessageInput {
    pub id: u64,
    pub text: String,
    pub channel: String,
    pub sender_id: ClientId,
    pub from_bot: bool,
    pub reply_to: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatError {
    InvalidMessageLength,
    /// Blocked by the message filter.
    Suppressed(String),
}
impl Display for ChatError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ChatError::InvalidMessageLength => write!(f, "invalid message length"),
            ChatError::Suppressed(reason) => write!(f, "message suppressed: {}", reason),
        }
    }
}
impl std::error::Error for ChatError {}

#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub struct SentMessage {
    pub text: String,
    pub channel: String,
    pub sender_name: String,
    pub id: u64,
    pub reply_to: Option<u64>,
}

#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub struct EditedMessage {
    pub id: u64,
    pub text: String,
    pub channel: String,
}

impl ChatManager {
    pub fn new(
        config: ChatManagerConfig,
        censorer: Arc<dyn MessageCensorer + Send + Sync>,
    ) -> Self {
        ChatManager {
            max_message_length: config.max_message_length,
            censorer,
            id_counter: AtomicU64::new(0),
        }
    }

    /// The length limit applies to what the author typed; a redaction mask
    /// may come out longer than the text it covers.
    async fn filter(&self, request: CensorRequest<'_>) -> Result<String, ChatError> {
        if request.text.len() > self.max_message_length || request.text.is_empty() {
            return Err(ChatError::InvalidMessageLength);
        }

        match self.censorer.censor(&request).await {
            CensorOutcome::Deliver(text) => Ok(text),
            CensorOutcome::Suppress(reason) => Err(ChatError::Suppressed(reason)),
        }
    }

    pub async fn handle_message(
        &self,
        message: SendMessageInput,
    ) -> Result<SentMessage, ChatError> {
        let text = self
            .filter(CensorRequest {
                text: message.text.trim(),
                from_bot: message.from_bot,
                author: message.sender_id,
                channel: &message.channel,
                root_id: message.reply_to,
            })
            .await?;

        Ok(SentMessage {
            channel: message.channel,
            sender_name: message.sender_name,
            text,
            id: self.id_counter.fetch_add(1, Ordering::Relaxed),
            reply_to: message.reply_to,
        })
    }

    /// Edits go through the same filter as new messages.
    pub async fn handle_edit(&self, edit: EditMessageInput) -> Result<EditedMessage, ChatError> {
        let text = self
            .filter(CensorRequest {
                text: edit.text.trim(),
                from_bot: edit.from_bot,
                author: edit.sender_id,
                channel: &edit.channel,
                root_id: edit.reply_to,
            })
            .await?;

        Ok(EditedMessage {
            id: edit.id,
            text,
            channel: edit.channel,
        })
    }
}
