#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
pub enum RPCServerMessage {
    NewMessage {
        id: u64,
        reply_to: Option<u64>,
        text: String,
        channel: String,
        sender_name: String,
    },
    MessageEdited {
        id: u64,
        text: String,
        channel: String,
    },
    /// Only ever sent to the author of a rejected message.
    Warning {
        channel: String,
        reply_to: Option<u64>,
        text: String,
    },
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
pub struct RPCSendMessageInput {
    pub text: String,
    pub reply_to: Option<u64>,
    pub channel: String,
    pub sender_name: String,
    #[serde(default)]
    pub from_bot: bool,
}

impl RPCSendMessageInput {
    pub fn new(text: impl Into<String>, channel: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            reply_to: None,
            channel: channel.into(),
            sender_name: "anonymous".to_string(),
            from_bot: false,
        }
    }
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
pub struct RPCEditMessageInput {
    pub id: u64,
    pub text: String,
    pub reply_to: Option<u64>,
    pub channel: String,
    #[serde(default)]
    pub from_bot: bool,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
pub enum RPCClientMessage {
    SendMessage(RPCSendMessageInput),
    EditMessage(RPCEditMessageInput),
}
