use std::time::Duration;

use crate::{
    censor::{FilterConfig, FilterConfigBuilder},
    client::ChatClient,
    GeneralConfigBuilder,
};

/// The block-list used throughout the tests.
pub fn default_filter() -> FilterConfig {
    FilterConfigBuilder::default()
        .bad_words("def ghi,abc,啊")
        .censor_character('*')
        .exclude_bots(true)
        .build()
        .unwrap()
}

pub fn default_builder() -> GeneralConfigBuilder {
    let mut builder = GeneralConfigBuilder::default();
    let port = portpicker::pick_unused_port().unwrap();

    builder
        .port(port)
        .max_message_length(4000usize)
        .filter(default_filter());
    builder
}

pub async fn connect(port: u16) -> ChatClient {
    let url = format!("ws://127.0.0.1:{port}/ws");
    for _ in 0..50 {
        if let Ok(client) = ChatClient::connect(&url).await {
            return client;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    panic!("server on port {port} never came up");
}
