use futures::{ SinkExt, StreamExt };
use serde_json::{ json, Value };
use std::sync::Arc;
use tokio::io::DuplexStream;
use tokio_tungstenite::tungstenite::protocol::{ Message, Role };
use tokio_tungstenite::WebSocketStream;
use traffix_assistant::knowledge::CannedTopic;
use traffix_assistant::router::{ IntentRouter, REPORT_REDIRECT_REPLY };
use traffix_assistant::server::websocket::handle_connection;

async fn connect(router: Arc<IntentRouter>) -> (WebSocketStream<DuplexStream>, tokio::task::JoinHandle<()>) {
    let (server_io, client_io) = tokio::io::duplex(256 * 1024);
    let server = tokio::spawn(async move {
        let ws = WebSocketStream::from_raw_socket(server_io, Role::Server, None).await;
        handle_connection("127.0.0.1:9".parse().unwrap(), ws, router).await;
    });
    let client = WebSocketStream::from_raw_socket(client_io, Role::Client, None).await;
    (client, server)
}

async fn next_frame(client: &mut WebSocketStream<DuplexStream>) -> Value {
    match client.next().await.unwrap().unwrap() {
        Message::Text(text) => serde_json::from_str(&text).unwrap(),
        other => panic!("unexpected frame {:?}", other),
    }
}

async fn chat(client: &mut WebSocketStream<DuplexStream>, content: &str) {
    let frame = json!({ "type": "chat", "content": content }).to_string();
    client.send(Message::Text(frame)).await.unwrap();
}

#[tokio::test]
async fn chat_round_trip_over_a_session() {
    let (mut client, server) = connect(Arc::new(IntentRouter::new(None))).await;

    chat(&mut client, "hello").await;
    assert_eq!(next_frame(&mut client).await, json!({ "type": "processing" }));
    let reply = next_frame(&mut client).await;
    assert_eq!(reply["type"], "response");
    assert_eq!(reply["content"], CannedTopic::Greeting.response());
    assert!(reply.get("action").is_none());

    chat(&mut client, "generate report").await;
    next_frame(&mut client).await;
    let reply = next_frame(&mut client).await;
    assert_eq!(reply["content"], REPORT_REDIRECT_REPLY);
    assert_eq!(reply["action"]["target"], "/report-generator");

    client.close(None).await.unwrap();
    server.await.unwrap();
}

#[tokio::test]
async fn bad_frames_get_error_replies_and_session_survives() {
    let (mut client, server) = connect(Arc::new(IntentRouter::new(None))).await;

    client.send(Message::Text("not json".into())).await.unwrap();
    let err = next_frame(&mut client).await;
    assert_eq!(err["type"], "error");
    assert!(err["message"].as_str().unwrap().starts_with("Failed to parse message"));

    chat(&mut client, "   ").await;
    assert_eq!(next_frame(&mut client).await, json!({ "type": "error", "message": "Message is empty" }));

    chat(&mut client, "fine for seatbelt").await;
    next_frame(&mut client).await;
    let reply = next_frame(&mut client).await;
    assert!(reply["content"].as_str().unwrap().contains("Not Wearing Seatbelt: ₹1,000"));

    client.close(None).await.unwrap();
    server.await.unwrap();
}
