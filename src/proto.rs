//! The closed set of application protocol identifiers this core can name.

use std::fmt;

/// Symbolic application-layer protocol identifier.
///
/// Numeric values are an internal concern; only the symbolic names are
/// part of the external API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AppProto {
    /// No signature matched.
    Unknown,
    /// Hypertext Transfer Protocol.
    Http,
    /// Transport Layer Security.
    Tls,
    /// Secure Sockets Layer (v2/v3 handshake).
    Ssl,
    /// Secure Shell.
    Ssh,
    /// File Transfer Protocol.
    Ftp,
    /// Simple Mail Transfer Protocol.
    Smtp,
    /// Internet Message Access Protocol.
    Imap,
    /// MSN Messenger protocol.
    Msn,
    /// Server Message Block v1.
    Smb,
    /// Server Message Block v2+.
    Smb2,
    /// DCE/RPC over TCP.
    Dcerpc,
    /// DCE/RPC over UDP.
    DcerpcUdp,
}

impl fmt::Display for AppProto {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AppProto::Unknown => "UNKNOWN",
            AppProto::Http => "HTTP",
            AppProto::Tls => "TLS",
            AppProto::Ssl => "SSL",
            AppProto::Ssh => "SSH",
            AppProto::Ftp => "FTP",
            AppProto::Smtp => "SMTP",
            AppProto::Imap => "IMAP",
            AppProto::Msn => "MSN",
            AppProto::Smb => "SMB",
            AppProto::Smb2 => "SMB2",
            AppProto::Dcerpc => "DCERPC",
            AppProto::DcerpcUdp => "DCERPC_UDP",
        };
        write!(f, "{name}")
    }
}
