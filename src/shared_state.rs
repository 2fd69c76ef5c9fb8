use crate::censor::FilterStore;
use crate::messages::chat_manager::ChatManager;
use crate::rpc::{rpc_types::RPCServerMessage, Clients};

use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct SharedState {
    pub message_handler: Arc<ChatManager>,
    pub filter: Arc<FilterStore>,
    pub broadcast_tx: tokio::sync::mpsc::UnboundedSender<RPCServerMessage>,
    pub clients: Clients,
}
