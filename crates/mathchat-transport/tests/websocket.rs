//! Integration tests for the WebSocket transport.
//!
//! A real `tokio-tungstenite` client connects to the transport and
//! exchanges text frames, one line per frame.

#[cfg(feature = "websocket")]
mod websocket {
    use std::time::Duration;

    use futures_util::{SinkExt, StreamExt};
    use mathchat_transport::{Connection, Transport, WebSocketTransport};
    use tokio::io::AsyncReadExt;
    use tokio::net::TcpStream;
    use tokio_tungstenite::tungstenite::Message;

    async fn connect_client(
        addr: &str,
    ) -> tokio_tungstenite::WebSocketStream<
        tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>,
    > {
        let url = format!("ws://{addr}");
        let (ws, _) = tokio_tungstenite::connect_async(&url)
            .await
            .expect("client should connect");
        ws
    }

    #[tokio::test]
    async fn test_websocket_accept_and_send_receive() {
        let mut transport = WebSocketTransport::bind("127.0.0.1:0")
            .await
            .expect("should bind");
        let addr = transport.local_addr().unwrap().to_string();

        let server_handle = tokio::spawn(async move {
            transport.accept().await.expect("should accept")
        });

        let mut client_ws = connect_client(&addr).await;
        let server_conn = server_handle.await.expect("task should complete");

        // --- Server sends a newline-terminated frame, client sees text ---
        server_conn
            .send(b"hello from server\n")
            .await
            .expect("send should succeed");
        match client_ws.next().await.unwrap().unwrap() {
            Message::Text(text) => assert_eq!(text.to_string(), "hello from server"),
            other => panic!("expected a text frame, got {other:?}"),
        }

        // --- Client sends, server receives ---
        client_ws
            .send(Message::Text("hello from client".to_string().into()))
            .await
            .unwrap();
        let received = server_conn
            .recv()
            .await
            .expect("recv should succeed")
            .expect("should have data");
        assert_eq!(received, b"hello from client");

        server_conn.close().await.expect("close should succeed");
    }

    #[tokio::test]
    async fn test_websocket_recv_returns_none_on_client_close() {
        let mut transport = WebSocketTransport::bind("127.0.0.1:0")
            .await
            .expect("should bind");
        let addr = transport.local_addr().unwrap().to_string();

        let server_handle = tokio::spawn(async move {
            transport.accept().await.expect("should accept")
        });

        let mut client_ws = connect_client(&addr).await;
        let server_conn = server_handle.await.unwrap();

        client_ws.send(Message::Close(None)).await.unwrap();

        let result = server_conn.recv().await.expect("recv should not error");
        assert!(result.is_none(), "should return None on client close");
    }

    #[tokio::test]
    async fn test_websocket_silent_peer_does_not_block_accept() {
        let mut transport = WebSocketTransport::bind("127.0.0.1:0")
            .await
            .expect("should bind")
            .with_upgrade_timeout(Duration::from_millis(200));
        let addr = transport.local_addr().unwrap().to_string();

        let server_handle = tokio::spawn(async move {
            transport.accept().await.expect("should accept")
        });

        // Opens a socket and never sends the upgrade request.
        let mut silent = TcpStream::connect(&addr).await.unwrap();
        let _client_ws = connect_client(&addr).await;

        let server_conn = tokio::time::timeout(Duration::from_secs(2), server_handle)
            .await
            .expect("accept should not wait on the silent peer")
            .expect("task should complete");
        assert!(server_conn.id().into_inner() > 0);

        // The stalled upgrade is given up on and its socket dropped.
        let mut buf = [0u8; 16];
        let read = tokio::time::timeout(Duration::from_secs(2), silent.read(&mut buf))
            .await
            .expect("silent peer should be disconnected");
        assert!(matches!(read, Ok(0) | Err(_)));
    }
}
