//! CNAME query construction.

use hickory_proto::op::{Message, MessageType, OpCode, Query};
use hickory_proto::rr::{Name, RecordType};
use hickory_proto::serialize::binary::BinEncodable;

use crate::error_handling::LookupError;

/// Appends the root label if `domain` is not already fully qualified.
pub fn to_fqdn(domain: &str) -> String {
    if domain.ends_with('.') {
        domain.to_string()
    } else {
        format!("{domain}.")
    }
}

/// Serializes a recursive CNAME query for `fqdn` with message ID `id`.
///
/// ASCII names are encoded label by label as given; names with non-ASCII
/// characters go through IDNA (punycode).
///
/// # Errors
///
/// Returns `LookupError::InvalidName` if the name cannot be encoded (empty or
/// over-long labels, invalid characters).
pub fn build_cname_query(fqdn: &str, id: u16) -> Result<Vec<u8>, LookupError> {
    let invalid = |source| LookupError::InvalidName {
        domain: fqdn.to_string(),
        source,
    };

    let name = if fqdn.is_ascii() {
        Name::from_ascii(fqdn)
    } else {
        Name::from_utf8(fqdn)
    }
    .map_err(invalid)?;

    let mut message = Message::new();
    message
        .set_id(id)
        .set_message_type(MessageType::Query)
        .set_op_code(OpCode::Query)
        .set_recursion_desired(true);
    message.add_query(Query::query(name, RecordType::CNAME));

    message.to_vec().map_err(invalid)
}
