//! Built-in protocol signatures.
//!
//! The fixed set of patterns this core ships out of the box, carried over
//! from the reference application-layer detector's protocol table: HTTP,
//! TLS/SSL, SSH, IMAP, SMTP, FTP, MSN, SMB/SMB2, and DCE/RPC. Offsets,
//! depths, and directions are exact matches for that table; they are load
//! bearing; do not "clean up" a depth or offset without checking it against
//! a real capture.

use crate::context::{DetectionContext, DetectionContextBuilder};
use crate::error::DetectError;
use crate::mpm::{AhoCorasickMpm, MultiPatternMatcher};
use crate::pattern::{Direction, IpProto};
use crate::proto::AppProto;

struct BuiltinSignature {
    ip_proto: IpProto,
    app_proto: AppProto,
    pattern: &'static str,
    offset: u16,
    depth: u16,
    direction: Direction,
}

macro_rules! sig {
    ($ip:expr, $proto:expr, $pattern:expr, $offset:expr, $depth:expr, $dir:expr) => {
        BuiltinSignature {
            ip_proto: $ip,
            app_proto: $proto,
            pattern: $pattern,
            offset: $offset,
            depth: $depth,
            direction: $dir,
        }
    };
}

const BUILTIN_SIGNATURES: &[BuiltinSignature] = &[
    // HTTP request methods, space and horizontal-tab variants, to_server.
    sig!(IpProto::Tcp, AppProto::Http, "GET|20|", 0, 4, Direction::ToServer),
    sig!(IpProto::Tcp, AppProto::Http, "GET|09|", 0, 4, Direction::ToServer),
    sig!(IpProto::Tcp, AppProto::Http, "PUT|20|", 0, 4, Direction::ToServer),
    sig!(IpProto::Tcp, AppProto::Http, "PUT|09|", 0, 4, Direction::ToServer),
    sig!(IpProto::Tcp, AppProto::Http, "POST|20|", 0, 5, Direction::ToServer),
    sig!(IpProto::Tcp, AppProto::Http, "POST|09|", 0, 5, Direction::ToServer),
    sig!(IpProto::Tcp, AppProto::Http, "HEAD|20|", 0, 5, Direction::ToServer),
    sig!(IpProto::Tcp, AppProto::Http, "HEAD|09|", 0, 5, Direction::ToServer),
    sig!(IpProto::Tcp, AppProto::Http, "TRACE|20|", 0, 6, Direction::ToServer),
    sig!(IpProto::Tcp, AppProto::Http, "TRACE|09|", 0, 6, Direction::ToServer),
    sig!(IpProto::Tcp, AppProto::Http, "OPTIONS|20|", 0, 8, Direction::ToServer),
    sig!(IpProto::Tcp, AppProto::Http, "OPTIONS|09|", 0, 8, Direction::ToServer),
    sig!(IpProto::Tcp, AppProto::Http, "CONNECT|20|", 0, 8, Direction::ToServer),
    sig!(IpProto::Tcp, AppProto::Http, "CONNECT|09|", 0, 8, Direction::ToServer),
    // HTTP response line, to_client.
    sig!(IpProto::Tcp, AppProto::Http, "HTTP/", 0, 5, Direction::ToClient),
    // SSH banner, both directions.
    sig!(IpProto::Tcp, AppProto::Ssh, "SSH-", 0, 4, Direction::ToServer),
    sig!(IpProto::Tcp, AppProto::Ssh, "SSH-", 0, 4, Direction::ToClient),
    // SSLv2 handshake.
    sig!(IpProto::Tcp, AppProto::Ssl, "|01 00 02|", 2, 5, Direction::ToServer),
    sig!(IpProto::Tcp, AppProto::Ssl, "|00 02|", 5, 7, Direction::ToClient),
    // SSLv3 / TLS 1.0-1.2 handshake, to_server.
    sig!(IpProto::Tcp, AppProto::Tls, "|01 03 00|", 0, 3, Direction::ToServer),
    sig!(IpProto::Tcp, AppProto::Tls, "|01 03 01|", 0, 3, Direction::ToServer),
    sig!(IpProto::Tcp, AppProto::Tls, "|01 03 02|", 0, 3, Direction::ToServer),
    sig!(IpProto::Tcp, AppProto::Tls, "|01 03 03|", 0, 3, Direction::ToServer),
    // TLS record header, both directions.
    sig!(IpProto::Tcp, AppProto::Tls, "|16 03 00|", 0, 3, Direction::ToServer),
    sig!(IpProto::Tcp, AppProto::Tls, "|16 03 01|", 0, 3, Direction::ToServer),
    sig!(IpProto::Tcp, AppProto::Tls, "|16 03 02|", 0, 3, Direction::ToServer),
    sig!(IpProto::Tcp, AppProto::Tls, "|16 03 03|", 0, 3, Direction::ToServer),
    sig!(IpProto::Tcp, AppProto::Tls, "|16 03 00|", 0, 3, Direction::ToClient),
    sig!(IpProto::Tcp, AppProto::Tls, "|16 03 01|", 0, 3, Direction::ToClient),
    sig!(IpProto::Tcp, AppProto::Tls, "|16 03 02|", 0, 3, Direction::ToClient),
    sig!(IpProto::Tcp, AppProto::Tls, "|16 03 03|", 0, 3, Direction::ToClient),
    // IMAP.
    sig!(IpProto::Tcp, AppProto::Imap, "|2A 20|OK|20|", 0, 5, Direction::ToClient),
    sig!(IpProto::Tcp, AppProto::Imap, "1|20|capability", 0, 12, Direction::ToServer),
    // SMTP.
    sig!(IpProto::Tcp, AppProto::Smtp, "EHLO|20|", 0, 5, Direction::ToClient),
    sig!(IpProto::Tcp, AppProto::Smtp, "HELO|20|", 0, 5, Direction::ToClient),
    sig!(IpProto::Tcp, AppProto::Smtp, "ESMTP|20|", 4, 64, Direction::ToServer),
    sig!(IpProto::Tcp, AppProto::Smtp, "SMTP|20|", 4, 64, Direction::ToServer),
    // FTP.
    sig!(IpProto::Tcp, AppProto::Ftp, "USER|20|", 0, 5, Direction::ToServer),
    sig!(IpProto::Tcp, AppProto::Ftp, "PASS|20|", 0, 5, Direction::ToServer),
    sig!(IpProto::Tcp, AppProto::Ftp, "PORT|20|", 0, 5, Direction::ToServer),
    sig!(IpProto::Tcp, AppProto::Ftp, "AUTH|20|SSL", 0, 8, Direction::ToClient),
    // MSN Messenger, both directions.
    sig!(IpProto::Tcp, AppProto::Msn, "MSNP", 6, 10, Direction::ToServer),
    sig!(IpProto::Tcp, AppProto::Msn, "MSNP", 6, 10, Direction::ToClient),
    // SMB / SMB2, both directions.
    sig!(IpProto::Tcp, AppProto::Smb, "|ff|SMB", 4, 8, Direction::ToServer),
    sig!(IpProto::Tcp, AppProto::Smb, "|ff|SMB", 4, 8, Direction::ToClient),
    sig!(IpProto::Tcp, AppProto::Smb2, "|fe|SMB", 4, 8, Direction::ToServer),
    sig!(IpProto::Tcp, AppProto::Smb2, "|fe|SMB", 4, 8, Direction::ToClient),
    // DCE/RPC, both directions.
    sig!(IpProto::Udp, AppProto::DcerpcUdp, "|04 00|", 0, 2, Direction::ToServer),
    sig!(IpProto::Udp, AppProto::DcerpcUdp, "|04 00|", 0, 2, Direction::ToClient),
    sig!(IpProto::Tcp, AppProto::Dcerpc, "|05 00|", 0, 2, Direction::ToServer),
    sig!(IpProto::Tcp, AppProto::Dcerpc, "|05 00|", 0, 2, Direction::ToClient),
];

/// Registers every built-in signature into `builder`.
pub fn register_builtin_signatures<M: MultiPatternMatcher>(
    builder: &mut DetectionContextBuilder<M>,
) -> Result<(), DetectError> {
    for s in BUILTIN_SIGNATURES {
        builder.add(
            s.ip_proto,
            s.app_proto,
            s.pattern,
            s.offset,
            s.depth,
            s.direction,
        )?;
    }
    Ok(())
}

/// Builds a finalized [`DetectionContext`] carrying the full built-in
/// signature set, over the default `aho-corasick` backend.
pub fn builtin_context() -> Result<DetectionContext<AhoCorasickMpm>, DetectError> {
    let mut builder: DetectionContextBuilder<AhoCorasickMpm> = DetectionContextBuilder::new();
    register_builtin_signatures(&mut builder)?;
    builder.finalize()
}
