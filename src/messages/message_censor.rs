use super::ClientId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CensorRequest<'a> {
    pub text: &'a str,
    pub from_bot: bool,
    pub author: ClientId,
    pub channel: &'a str,
    pub root_id: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CensorOutcome {
    Deliver(String),
    /// Do not deliver; carries a diagnostic naming the matched terms.
    Suppress(String),
}

#[async_trait::async_trait]
pub trait MessageCensorer {
    async fn censor(&self, request: &CensorRequest<'_>) -> CensorOutcome;
}

/// A private message only its recipient can see.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EphemeralNotice {
    pub channel: String,
    pub root_id: Option<u64>,
    pub text: String,
}

#[async_trait::async_trait]
pub trait NotificationSink: Send + Sync {
    async fn send_ephemeral(&self, recipient: ClientId, notice: EphemeralNotice);
}
