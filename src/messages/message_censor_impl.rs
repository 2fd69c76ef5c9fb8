use std::sync::Arc;

use log::info;

use super::message_censor::{
    CensorOutcome, CensorRequest, EphemeralNotice, MessageCensorer, NotificationSink,
};
use crate::censor::{inspect, InspectionInput, InspectionResult, SharedFilterConfigProvider};

/// Runs messages through the active block-list filter.
pub struct BlockListCensorer {
    filter: SharedFilterConfigProvider,
    notifier: Arc<dyn NotificationSink>,
}

impl BlockListCensorer {
    pub fn new(filter: SharedFilterConfigProvider, notifier: Arc<dyn NotificationSink>) -> Self {
        Self { filter, notifier }
    }
}

#[async_trait::async_trait]
impl MessageCensorer for BlockListCensorer {
    async fn censor(&self, request: &CensorRequest<'_>) -> CensorOutcome {
        let result = {
            let snapshot = self.filter.snapshot();
            inspect(
                &snapshot,
                &InspectionInput {
                    text: request.text,
                    from_bot: request.from_bot,
                },
            )
        };

        match result {
            InspectionResult::Pass => CensorOutcome::Deliver(request.text.to_string()),
            InspectionResult::Redacted(text) => CensorOutcome::Deliver(text),
            InspectionResult::Rejected {
                diagnostic,
                warning,
                ..
            } => {
                info!("suppressed message from {}: {}", request.author, diagnostic);
                self.notifier
                    .send_ephemeral(
                        request.author,
                        EphemeralNotice {
                            channel: request.channel.to_string(),
                            root_id: request.root_id,
                            text: warning,
                        },
                    )
                    .await;
                CensorOutcome::Suppress(diagnostic)
            }
        }
    }
}
