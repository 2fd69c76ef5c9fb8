#[cfg(test)]
#[macro_use]
extern crate rstest;

pub mod censor;
pub mod client;
pub mod generic_result;
pub mod messages;
#[cfg(test)]
mod mock;
pub mod rpc;
mod shared_state;
pub mod test_utils;

use std::{collections::HashMap, sync::Arc};

use derive_builder::Builder;
use futures::{SinkExt, StreamExt};
use log::{debug, info, warn};
use tokio::sync::{
    mpsc::{unbounded_channel, UnboundedReceiver},
    RwLock,
};
use uuid::Uuid;
use warp::{
    http::StatusCode,
    ws::{Message, Ws},
    Filter, Reply,
};

use self::{
    censor::{FilterConfig, FilterConfigProvider, FilterStore},
    messages::{
        chat_manager::{ChatManager, ChatManagerConfig},
        message_censor_impl::BlockListCensorer,
    },
    rpc::{ephemeral::ClientNotifier, rpc_handler::RPCHandler, rpc_types::RPCServerMessage, Clients},
    shared_state::SharedState,
};
pub use generic_result::GenericResult;

const MAX_FILTER_BODY: u64 = 4 * 1024 * 1024;

#[derive(Debug, Clone, Builder)]
pub struct GeneralConfig {
    pub port: u16,
    pub max_message_length: usize,
    pub filter: FilterConfig,
}

pub async fn run_app(general_config: GeneralConfig) -> GenericResult<()> {
    let filter = Arc::new(FilterStore::new(general_config.filter.clone())?);
    let clients: Clients = Arc::new(RwLock::new(HashMap::new()));
    let message_handler = create_chat_manager(&general_config, filter.clone(), clients.clone());

    let (broadcast_tx, broadcast_rx) = unbounded_channel::<RPCServerMessage>();
    let shared_state = SharedState {
        message_handler: Arc::new(message_handler),
        filter,
        broadcast_tx,
        clients,
    };

    handle_broadcast_messages(shared_state.clients.clone(), broadcast_rx);
    info!("listening on 127.0.0.1:{}", general_config.port);
    warp::serve(get_routes(&shared_state))
        .run(([127, 0, 0, 1], general_config.port))
        .await;
    Ok(())
}

fn create_chat_manager(
    general_config: &GeneralConfig,
    filter: Arc<FilterStore>,
    clients: Clients,
) -> ChatManager {
    let notifier = Arc::new(ClientNotifier::new(clients));
    let message_censor = Arc::new(BlockListCensorer::new(filter, notifier));
    let config = ChatManagerConfig {
        max_message_length: general_config.max_message_length,
    };
    ChatManager::new(config, message_censor)
}

fn get_routes(
    shared_state: &SharedState,
) -> impl Filter<Extract = impl Reply, Error = warp::Rejection> + Clone {
    let shared_state_filter = {
        let t = shared_state.clone();
        warp::any().map(move || t.clone())
    };
    let ws = warp::path("ws")
        .and(warp::ws())
        .and(shared_state_filter)
        .map(|ws: Ws, shared_state: SharedState| {
            ws.on_upgrade(move |w| async move {
                handle_connection(shared_state, w).await;
            })
        });
    ws.or(filter_routes(shared_state.filter.clone()))
}

/// `GET /filter` shows the active configuration, `PUT /filter` replaces it.
fn filter_routes(
    filter: Arc<FilterStore>,
) -> impl Filter<Extract = impl Reply, Error = warp::Rejection> + Clone {
    let store = warp::any().map(move || filter.clone());
    let show = warp::path("filter")
        .and(warp::path::end())
        .and(warp::get())
        .and(store.clone())
        .map(|filter: Arc<FilterStore>| warp::reply::json(filter.snapshot().config()));
    let reload = warp::path("filter")
        .and(warp::path::end())
        .and(warp::put())
        .and(warp::body::content_length_limit(MAX_FILTER_BODY))
        .and(warp::body::json())
        .and(store)
        .map(|config: FilterConfig, filter: Arc<FilterStore>| {
            match filter.reload(config) {
                Ok(()) => warp::reply::with_status(String::new(), StatusCode::NO_CONTENT),
                Err(e) => warp::reply::with_status(e.to_string(), StatusCode::BAD_REQUEST),
            }
        });
    show.or(reload)
}

async fn handle_connection(shared_state: SharedState, socket: warp::ws::WebSocket) {
    let (local_sender, mut local_receiver) = unbounded_channel();
    let client_id = Uuid::new_v4();
    shared_state
        .clients
        .write()
        .await
        .insert(client_id, local_sender);
    let (mut websocket_sender, mut websocket_receiver) = socket.split();
    let handler = RPCHandler::new(
        shared_state.message_handler.clone(),
        shared_state.broadcast_tx.clone(),
        client_id,
    );

    tokio::spawn(async move {
        while let Some(msg) = local_receiver.recv().await {
            let text = match serde_json::to_string(&msg) {
                Ok(text) => text,
                Err(e) => {
                    warn!("could not encode {:?}: {}", msg, e);
                    continue;
                }
            };
            if let Err(e) = websocket_sender.send(Message::text(text)).await {
                debug!("error sending message to {}: {}", client_id, e);
                break;
            }
        }
    });
    while let Some(msg) = websocket_receiver.next().await {
        let client_message = match msg {
            Ok(msg) if msg.is_text() => match serde_json::from_slice(msg.as_bytes()) {
                Ok(m) => m,
                Err(e) => {
                    debug!("ignoring malformed message from {}: {}", client_id, e);
                    continue;
                }
            },
            Err(e) => {
                debug!("connection {} failed: {}", client_id, e);
                break;
            }
            _ => continue,
        };
        if let Err(e) = handler.handle_incoming(client_message).await {
            debug!("message from {} not delivered: {}", client_id, e);
        }
    }
    shared_state.clients.write().await.remove(&client_id);
}

fn handle_broadcast_messages(clients: Clients, mut broadcast_rx: UnboundedReceiver<RPCServerMessage>) {
    tokio::spawn(async move {
        while let Some(msg) = broadcast_rx.recv().await {
            let clients = clients.read().await;
            for tx in clients.values() {
                // a closed receiver is cleaned up by its connection task
                let _ = tx.send(msg.clone());
            }
        }
    });
}
