use censor_chat::{censor::FilterConfig, run_app, GeneralConfig, GenericResult};
use log::{info, warn};

const FILTER_FILE: &str = "filter.json";

#[tokio::main]
async fn main() -> GenericResult<()> {
    pretty_env_logger::init();

    let filter = match tokio::fs::read(FILTER_FILE).await {
        Ok(raw) => {
            info!("loading filter configuration from {}", FILTER_FILE);
            FilterConfig::from_json(&raw)?
        }
        Err(e) => {
            warn!("{} not readable ({}), starting with an empty block-list", FILTER_FILE, e);
            FilterConfig::default()
        }
    };
    let general_config = GeneralConfig {
        max_message_length: 400,
        port: 3030,
        filter,
    };

    run_app(general_config).await
}
