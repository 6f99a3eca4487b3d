//! The `Signature` record used to verify a matcher hit against
//! constraints the multi-pattern matcher does not itself enforce.

use crate::pattern::{Direction, IpProto};
use crate::proto::AppProto;

/// A `(ip_proto, app_proto, pattern)` record: when its pattern is located
/// in the allowed `[offset, depth)` window and the transport protocol
/// agrees, the flow is identified as `app_proto`.
#[derive(Debug, Clone)]
pub struct Signature {
    /// Transport protocol this signature is constrained to.
    pub ip_proto: IpProto,
    /// Application protocol this signature identifies.
    pub app_proto: AppProto,
    /// Direction this signature was registered against.
    pub direction: Direction,
    /// Raw content bytes to search for, within `[offset, depth)`.
    pub content: Vec<u8>,
    /// Offset into the buffer the content must occur at or after.
    pub offset: u16,
    /// Upper bound on where the content's match window ends.
    pub depth: u16,
    /// Interned pattern-id this signature's pattern was assigned.
    pub pattern_id: u32,
}

impl Signature {
    /// Verifies this signature against a buffer and transport protocol,
    /// per §4.4 step 4 of the detection algorithm:
    ///
    /// - mismatched `ip_proto` disqualifies immediately
    /// - `offset > buflen` or `depth > buflen` disqualifies (a signature
    ///   declaring depth N requires at least N bytes observed; a partial
    ///   inspection is never attempted)
    /// - otherwise, search for the exact content within
    ///   `buffer[offset..depth]`
    pub fn verify(&self, buffer: &[u8], ip_proto: IpProto) -> bool {
        if self.ip_proto != ip_proto {
            return false;
        }
        let buflen = buffer.len();
        if self.offset as usize > buflen || self.depth as usize > buflen {
            return false;
        }
        let window = &buffer[self.offset as usize..self.depth as usize];
        memchr::memmem::find(window, &self.content).is_some()
    }
}
