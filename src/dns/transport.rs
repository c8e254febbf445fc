//! UDP and TCP message exchange with a single DNS server.
//!
//! Neither function applies a timeout; the client bounds the whole exchange.

use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};

use hickory_proto::op::{Message, MessageType};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpStream, UdpSocket};

use crate::config::MAX_UDP_RESPONSE_SIZE;
use crate::error_handling::TransportError;

/// Sends `query` over UDP and waits for the response carrying `id`.
///
/// Datagrams answering a different ID are ignored; a datagram that fails to
/// decode is an error.
pub async fn exchange_udp(
    server: SocketAddr,
    query: &[u8],
    id: u16,
) -> Result<Message, TransportError> {
    let bind_addr: SocketAddr = if server.is_ipv4() {
        (Ipv4Addr::UNSPECIFIED, 0).into()
    } else {
        (Ipv6Addr::UNSPECIFIED, 0).into()
    };

    let socket = UdpSocket::bind(bind_addr).await?;
    socket.connect(server).await?;
    socket.send(query).await?;

    let mut buf = vec![0u8; MAX_UDP_RESPONSE_SIZE];
    loop {
        let len = socket.recv(&mut buf).await?;
        let response = Message::from_vec(&buf[..len])?;
        if response.id() == id && response.message_type() == MessageType::Response {
            return Ok(response);
        }
    }
}

/// Sends `query` over TCP using the two-byte length prefix framing.
pub async fn exchange_tcp(
    server: SocketAddr,
    query: &[u8],
    id: u16,
) -> Result<Message, TransportError> {
    let len = u16::try_from(query.len()).map_err(|_| {
        std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "query exceeds 65535 bytes",
        )
    })?;

    let mut stream = TcpStream::connect(server).await?;
    stream.write_all(&len.to_be_bytes()).await?;
    stream.write_all(query).await?;
    stream.flush().await?;

    let response_len = stream.read_u16().await? as usize;
    let mut buf = vec![0u8; response_len];
    stream.read_exact(&mut buf).await?;

    let response = Message::from_vec(&buf)?;
    if response.id() != id {
        return Err(TransportError::IdMismatch {
            expected: id,
            actual: response.id(),
        });
    }
    Ok(response)
}
