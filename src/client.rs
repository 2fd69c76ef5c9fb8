use futures::{SinkExt, StreamExt};
use tokio::sync::Mutex;
use tokio_tungstenite::{connect_async, tungstenite::Message, MaybeTlsStream, WebSocketStream};

use crate::{
    generic_result::GenericResult,
    rpc::rpc_types::{RPCClientMessage, RPCServerMessage},
};

pub struct ChatClient {
    socket: Mutex<WebSocketStream<MaybeTlsStream<tokio::net::TcpStream>>>,
}

impl ChatClient {
    pub async fn connect(url: &str) -> GenericResult<Self> {
        let (socket, _) = connect_async(url).await?;
        Ok(Self {
            socket: Mutex::new(socket),
        })
    }

    pub async fn send_message(&self, message: RPCClientMessage) -> GenericResult<()> {
        let text = serde_json::to_string(&message)?;
        self.socket.lock().await.send(Message::text(text)).await?;
        Ok(())
    }

    pub async fn receive_message(&self) -> GenericResult<RPCServerMessage> {
        loop {
            let message = self
                .socket
                .lock()
                .await
                .next()
                .await
                .ok_or("connection closed")??;
            if let Message::Text(text) = message {
                return Ok(serde_json::from_str(&text)?);
            }
        }
    }
}
