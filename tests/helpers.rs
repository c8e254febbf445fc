// Shared test helpers: an in-process DNS server answering over UDP.
//
// Answers depend on the first label of the queried name:
// - `empty-*` gets a response with no answers
// - `a-*` gets a single A record
// - anything else gets a CNAME to `target.example.net.`

use hickory_proto::op::{Message, MessageType, OpCode, ResponseCode};
use hickory_proto::rr::rdata::{A, CNAME};
use hickory_proto::rr::{Name, RData, Record, RecordType};
use hickory_proto::serialize::binary::BinEncodable;
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::{Arc, Mutex};
use tokio::net::UdpSocket;

/// CNAME target returned for every resolvable name.
#[allow(dead_code)] // Used by other test files
pub const MOCK_TARGET: &str = "target.example.net.";

/// A query as received by the mock server.
#[allow(dead_code)] // Used by other test files
#[derive(Debug, Clone)]
pub struct ReceivedQuery {
    pub name: String,
    pub query_type: RecordType,
    pub recursion_desired: bool,
}

/// Handle to a running mock DNS server.
pub struct MockDnsServer {
    pub addr: SocketAddr,
    queries: Arc<Mutex<Vec<ReceivedQuery>>>,
}

#[allow(dead_code)] // Used by other test files
impl MockDnsServer {
    /// Binds to a random localhost port and serves until the runtime shuts down.
    pub async fn start() -> Self {
        let socket = UdpSocket::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock DNS server");
        let addr = socket.local_addr().expect("Failed to read mock address");
        let queries = Arc::new(Mutex::new(Vec::new()));

        let recorded = Arc::clone(&queries);
        tokio::spawn(async move {
            let mut buf = vec![0u8; 4096];
            loop {
                let Ok((len, peer)) = socket.recv_from(&mut buf).await else {
                    break;
                };
                let Ok(query) = Message::from_vec(&buf[..len]) else {
                    continue;
                };
                if let Some(q) = query.queries().first() {
                    recorded
                        .lock()
                        .expect("queries lock")
                        .push(ReceivedQuery {
                            name: q.name().to_utf8(),
                            query_type: q.query_type(),
                            recursion_desired: query.recursion_desired(),
                        });
                }
                let bytes = answer(&query).to_vec().expect("Failed to encode answer");
                let _ = socket.send_to(&bytes, peer).await;
            }
        });

        Self { addr, queries }
    }

    /// Queries received so far, in arrival order.
    pub fn queries(&self) -> Vec<ReceivedQuery> {
        self.queries.lock().expect("queries lock").clone()
    }
}

fn answer(query: &Message) -> Message {
    let mut response = Message::new();
    response
        .set_id(query.id())
        .set_message_type(MessageType::Response)
        .set_op_code(OpCode::Query)
        .set_recursion_desired(query.recursion_desired())
        .set_recursion_available(true)
        .set_response_code(ResponseCode::NoError);

    let Some(q) = query.queries().first() else {
        return response;
    };
    response.add_query(q.clone());

    let owner = q.name().clone();
    let label = owner.to_utf8();
    if label.starts_with("empty-") {
        return response;
    }

    let rdata = if label.starts_with("a-") {
        RData::A(A(Ipv4Addr::new(192, 0, 2, 10)))
    } else {
        RData::CNAME(CNAME(
            Name::from_ascii(MOCK_TARGET).expect("valid mock target"),
        ))
    };
    response.add_answer(Record::from_rdata(owner, 300, rdata));
    response
}
