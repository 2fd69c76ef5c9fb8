use crate::generic_result::GenericResult;
use crate::messages::chat_manager::{ChatManager, EditMessageInput, SendMessageInput};
use crate::messages::ClientId;
use crate::rpc::rpc_types::{self, RPCServerMessage};

use tokio::sync::mpsc::UnboundedSender;

use std::sync::Arc;

/// Handles the messages of one websocket connection.
pub struct RPCHandler {
    pub message_handler: Arc<ChatManager>,
    pub broadcast_tx: UnboundedSender<RPCServerMessage>,
    pub(crate) client_id: ClientId,
}

impl RPCHandler {
    pub(crate) fn new(
        message_handler: Arc<ChatManager>,
        broadcast_tx: UnboundedSender<RPCServerMessage>,
        client_id: ClientId,
    ) -> Self {
        Self {
            message_handler,
            broadcast_tx,
            client_id,
        }
    }

    pub async fn handle_incoming(&self, msg: rpc_types::RPCClientMessage) -> GenericResult<()> {
        match msg {
            rpc_types::RPCClientMessage::SendMessage(input) => {
                self.handle_send_message(input).await?;
            }
            rpc_types::RPCClientMessage::EditMessage(input) => {
                self.handle_edit_message(input).await?;
            }
        };
        Ok(())
    }

    pub(crate) async fn handle_send_message(
        &self,
        input: rpc_types::RPCSendMessageInput,
    ) -> GenericResult<()> {
        let message = SendMessageInput {
            reply_to: input.reply_to,
            text: input.text,
            sender_id: self.client_id,
            from_bot: input.from_bot,
            channel: input.channel,
            sender_name: input.sender_name,
        };
        let sent_message = self.message_handler.handle_message(message).await?;

        let message = RPCServerMessage::NewMessage {
            channel: sent_message.channel,
            text: sent_message.text,
            sender_name: sent_message.sender_name,
            reply_to: sent_message.reply_to,
            id: sent_message.id,
        };
        self.broadcast_tx.send(message)?;
        Ok(())
    }

    pub(crate) async fn handle_edit_message(
        &self,
        input: rpc_types::RPCEditMessageInput,
    ) -> GenericResult<()> {
        let edit = EditMessageInput {
            id: input.id,
            text: input.text,
            channel: input.channel,
            sender_id: self.client_id,
            from_bot: input.from_bot,
            reply_to: input.reply_to,
        };
        let edited = self.message_handler.handle_edit(edit).await?;

        self.broadcast_tx.send(RPCServerMessage::MessageEdited {
            id: edited.id,
            text: edited.text,
            channel: edited.channel,
        })?;
        Ok(())
    }
}
