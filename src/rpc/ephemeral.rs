use log::warn;

use super::{rpc_types::RPCServerMessage, Clients};
use crate::messages::{
    message_censor::{EphemeralNotice, NotificationSink},
    ClientId,
};

/// Delivers notices straight to the recipient's own connection.
pub struct ClientNotifier {
    clients: Clients,
}

impl ClientNotifier {
    pub fn new(clients: Clients) -> Self {
        Self { clients }
    }
}

#[async_trait::async_trait]
impl NotificationSink for ClientNotifier {
    async fn send_ephemeral(&self, recipient: ClientId, notice: EphemeralNotice) {
        let clients = self.clients.read().await;
        let Some(tx) = clients.get(&recipient) else {
            warn!("dropping warning for disconnected client {}", recipient);
            return;
        };
        if tx
            .send(RPCServerMessage::Warning {
                channel: notice.channel,
                reply_to: notice.root_id,
                text: notice.text,
            })
            .is_err()
        {
            warn!("could not deliver warning to client {}", recipient);
        }
    }
}
