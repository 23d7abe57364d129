//! Tests for the serving client against a loopback HTTP server.

use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use lineage_explain::{
    ChatMessage, ClientError, InferenceClient, ServingClient, ServingConfig,
};

/// Serve exactly one canned response; the handle yields the raw request.
async fn serve_once(status_line: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let address = listener.local_addr().expect("local addr");
    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.expect("accept");
        let request = read_request(&mut socket).await;
        let response = format!(
            "HTTP/1.1 {status_line}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.expect("write");
        socket.shutdown().await.ok();
        request
    });
    (format!("http://{address}"), handle)
}

async fn read_request(socket: &mut tokio::net::TcpStream) -> String {
    let mut buffer = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        let read = socket.read(&mut chunk).await.expect("read");
        if read == 0 {
            break;
        }
        buffer.extend_from_slice(&chunk[..read]);
        let text = String::from_utf8_lossy(&buffer);
        if let Some(header_end) = text.find("\r\n\r\n") {
            let content_length = text[..header_end]
                .lines()
                .find_map(|line| {
                    let (name, value) = line.split_once(':')?;
                    name.eq_ignore_ascii_case("content-length")
                        .then(|| value.trim().parse::<usize>().ok())
                        .flatten()
                })
                .unwrap_or(0);
            if buffer.len() >= header_end + 4 + content_length {
                break;
            }
        }
    }
    String::from_utf8_lossy(&buffer).into_owned()
}

fn client(base_url: String) -> ServingClient {
    ServingClient::new(&ServingConfig {
        endpoint: "lineage-chat".to_string(),
        base_url,
        token: Some("secret-token".to_string()),
        timeout: Duration::from_secs(5),
    })
    .expect("client")
}

#[tokio::test]
async fn query_posts_messages_and_reads_choice() {
    let (base_url, server) = serve_once(
        "200 OK",
        r#"{"choices":[{"message":{"role":"assistant","content":"Vendor A wins because Calc is NULL."}}]}"#,
    )
    .await;

    let response = client(base_url)
        .query_model("lineage-chat", &[ChatMessage::user("why?")], 4096)
        .await
        .expect("response");
    assert_eq!(response.content, "Vendor A wins because Calc is NULL.");

    let request = server.await.expect("server task");
    assert!(request.starts_with("POST /serving-endpoints/lineage-chat/invocations HTTP/1.1"));
    assert!(request.to_ascii_lowercase().contains("authorization: bearer secret-token"));
    let body = request.split("\r\n\r\n").nth(1).expect("body");
    let json: serde_json::Value = serde_json::from_str(body).expect("json body");
    assert_eq!(
        json,
        serde_json::json!({"messages": [{"role": "user", "content": "why?"}], "max_tokens": 4096})
    );
}

#[tokio::test]
async fn server_error_is_reported_with_status() {
    let (base_url, server) = serve_once(
        "503 Service Unavailable",
        r#"{"error_code":"TEMPORARILY_UNAVAILABLE"}"#,
    )
    .await;

    let error = client(base_url)
        .query_model("lineage-chat", &[ChatMessage::user("why?")], 2048)
        .await
        .unwrap_err();
    server.await.expect("server task");

    match error {
        ClientError::Server { status, body } => {
            assert_eq!(status, 503);
            assert!(body.contains("TEMPORARILY_UNAVAILABLE"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn response_without_content_is_unexpected() {
    let (base_url, server) = serve_once("200 OK", r#"{"predictions":[1]}"#).await;

    let error = client(base_url)
        .query_model("lineage-chat", &[ChatMessage::user("why?")], 2048)
        .await
        .unwrap_err();
    server.await.expect("server task");

    assert!(matches!(error, ClientError::UnexpectedResponse(_)));
}

#[tokio::test]
async fn endpoint_task_decides_support() {
    let (base_url, server) = serve_once("200 OK", r#"{"name":"lineage-chat","task":"llm/v1/chat"}"#).await;
    assert!(
        client(base_url)
            .is_endpoint_supported("lineage-chat")
            .await
            .expect("supported")
    );
    let request = server.await.expect("server task");
    assert!(request.starts_with("GET /api/2.0/serving-endpoints/lineage-chat HTTP/1.1"));

    let (base_url, server) = serve_once("200 OK", r#"{"name":"embed","task":"llm/v1/embeddings"}"#).await;
    assert!(
        !client(base_url)
            .is_endpoint_supported("embed")
            .await
            .expect("supported")
    );
    server.await.expect("server task");
}

#[tokio::test]
async fn unreachable_host_is_a_network_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let address = listener.local_addr().expect("local addr");
    drop(listener);

    let error = client(format!("http://{address}"))
        .query_model("lineage-chat", &[ChatMessage::user("why?")], 2048)
        .await
        .unwrap_err();
    assert!(matches!(error, ClientError::Network(_)));
}
