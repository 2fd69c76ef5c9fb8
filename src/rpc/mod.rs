use std::{collections::HashMap, sync::Arc};

use tokio::sync::{mpsc::UnboundedSender, RwLock};

use crate::messages::ClientId;

pub mod ephemeral;
pub mod rpc_handler;
pub mod rpc_types;

pub type Clients = Arc<RwLock<HashMap<ClientId, UnboundedSender<rpc_types::RPCServerMessage>>>>;
