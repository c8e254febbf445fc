//! CNAME extraction from DNS responses.

use hickory_proto::op::Message;
use hickory_proto::rr::RData;

use crate::error_handling::LookupError;

/// Returns the target of the first CNAME record in the answer section.
///
/// The target is returned as the server encoded it, dot-terminated. Only the
/// record type is checked: the owner name is not compared with the query and
/// chains are not followed.
///
/// # Errors
///
/// - `LookupError::NoAnswer` if the answer section is empty
/// - `LookupError::NoCname` if no answer is a CNAME (e.g. only A/AAAA)
pub fn extract_cname(response: &Message, fqdn: &str) -> Result<String, LookupError> {
    let answers = response.answers();
    if answers.is_empty() {
        return Err(LookupError::NoAnswer {
            domain: fqdn.to_string(),
        });
    }

    answers
        .iter()
        .find_map(|record| match record.data() {
            Some(RData::CNAME(cname)) => Some(cname.0.to_utf8()),
            _ => None,
        })
        .ok_or_else(|| LookupError::NoCname {
            domain: fqdn.to_string(),
        })
}
