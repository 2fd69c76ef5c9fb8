use std::time::Duration;

use censor_chat::client::ChatClient;
use censor_chat::generic_result::GenericResult;
use censor_chat::rpc::rpc_types::{
    RPCClientMessage, RPCEditMessageInput, RPCSendMessageInput, RPCServerMessage,
};
use censor_chat::run_app;
use censor_chat::test_utils::*;
use tokio::time::timeout;

const WAIT: Duration = Duration::from_secs(5);

async fn start(reject_posts: bool) -> (ChatClient, ChatClient) {
    let mut filter = default_filter();
    filter.reject_posts = reject_posts;
    filter.warning_message = "Not allowed here: %s".to_string();
    let config = default_builder().filter(filter).build().unwrap();

    let port = config.port;
    tokio::spawn(async move { run_app(config).await });
    let sender = connect(port).await;
    let receiver = connect(port).await;
    // let the server register both connections
    tokio::time::sleep(Duration::from_millis(50)).await;
    (sender, receiver)
}

async fn next_matching<T>(
    client: &ChatClient,
    pick: impl Fn(RPCServerMessage) -> Option<T>,
) -> GenericResult<T> {
    loop {
        let msg = timeout(WAIT, client.receive_message()).await??;
        if let Some(found) = pick(msg) {
            return Ok(found);
        }
    }
}

async fn next_text(client: &ChatClient) -> GenericResult<String> {
    next_matching(client, |msg| match msg {
        RPCServerMessage::NewMessage { text, .. } => Some(text),
        _ => None,
    })
    .await
}

fn say(text: &str) -> RPCClientMessage {
    RPCClientMessage::SendMessage(RPCSendMessageInput::new(text, "general"))
}

#[rstest::rstest]
#[case("123 abc 456 啊", "123 *** 456 ***")]
#[case("123 ABC AbC 456", "123 *** *** 456")]
#[case("123 def ghi 456", "123 ******* 456")]
#[case("123 abc, 456", "123 ***, 456")]
#[case("helloabcworld helloabc abchello", "helloabcworld helloabc abchello")]
#[tokio::test]
async fn it_should_broadcast_censored_text(
    #[case] text: &str,
    #[case] expected: &str,
) -> GenericResult<()> {
    let (sender, receiver) = start(false).await;
    sender.send_message(say(text)).await?;

    assert_eq!(next_text(&receiver).await?, expected);
    assert_eq!(next_text(&sender).await?, expected);
    Ok(())
}

#[rstest::rstest]
#[tokio::test]
async fn it_should_let_bot_messages_through() -> GenericResult<()> {
    let (sender, receiver) = start(false).await;
    let mut input = RPCSendMessageInput::new("abc", "general");
    input.from_bot = true;
    sender
        .send_message(RPCClientMessage::SendMessage(input))
        .await?;

    assert_eq!(next_text(&receiver).await?, "abc");
    Ok(())
}

#[rstest::rstest]
#[tokio::test]
async fn it_should_reject_and_warn_only_the_author() -> GenericResult<()> {
    let (sender, receiver) = start(true).await;
    let mut input = RPCSendMessageInput::new("well abc", "general");
    input.reply_to = Some(42);
    sender
        .send_message(RPCClientMessage::SendMessage(input))
        .await?;

    let warning = next_matching(&sender, |msg| match msg {
        RPCServerMessage::Warning {
            channel,
            reply_to,
            text,
        } => Some((channel, reply_to, text)),
        _ => None,
    })
    .await?;
    assert_eq!(
        warning,
        (
            "general".to_string(),
            Some(42),
            "Not allowed here: abc".to_string()
        )
    );

    sender.send_message(say("all good")).await?;
    // the rejected message never reached anyone, so the first delivery is the clean one
    assert_eq!(next_text(&receiver).await?, "all good");
    Ok(())
}

#[rstest::rstest]
#[tokio::test]
async fn it_should_censor_edits() -> GenericResult<()> {
    let (sender, receiver) = start(false).await;
    sender
        .send_message(RPCClientMessage::EditMessage(RPCEditMessageInput {
            id: 3,
            text: "now with 啊".into(),
            reply_to: None,
            channel: "general".into(),
            from_bot: false,
        }))
        .await?;

    let edited = next_matching(&receiver, |msg| match msg {
        RPCServerMessage::MessageEdited { id, text, .. } => Some((id, text)),
        _ => None,
    })
    .await?;
    assert_eq!(edited, (3, "now with ***".to_string()));
    Ok(())
}
