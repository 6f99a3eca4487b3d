use protoid::{builtin_context, identify, AppProto, Direction, IpProto, PerThreadState};

/// Scenario table grounded on the reference detector's unit test oracles:
/// HTTP request/response, FTP banner, SSH banner, SSLv2/TLS handshakes,
/// SMB/SMB2 headers, DCE/RPC bind PDUs, and a direction-trap case where a
/// to_client-only pattern appears inside a to_server buffer.
struct Scenario {
    name: &'static str,
    direction: Direction,
    ip_proto: IpProto,
    buffer: &'static [u8],
    expected: AppProto,
}

const SCENARIOS: &[Scenario] = &[
    Scenario {
        name: "http_get_request",
        direction: Direction::ToServer,
        ip_proto: IpProto::Tcp,
        buffer: b"GET /index.html HTTP/1.0\r\n\r\n",
        expected: AppProto::Http,
    },
    Scenario {
        name: "http_response_200",
        direction: Direction::ToClient,
        ip_proto: IpProto::Tcp,
        buffer: b"HTTP/1.1 200 OK\r\nServer: Apache/1.0\r\n\r\n",
        expected: AppProto::Http,
    },
    Scenario {
        name: "ftp_auth_ssl_response",
        direction: Direction::ToClient,
        ip_proto: IpProto::Tcp,
        buffer: b"AUTH SSL\r\n234 AUTH SSL successful\r\n",
        expected: AppProto::Ftp,
    },
    Scenario {
        name: "ftp_user_command",
        direction: Direction::ToServer,
        ip_proto: IpProto::Tcp,
        buffer: b"USER oisf\r\n",
        expected: AppProto::Ftp,
    },
    Scenario {
        name: "ssh_banner_to_server",
        direction: Direction::ToServer,
        ip_proto: IpProto::Tcp,
        buffer: b"SSH-1.5-1.2.27\r\n",
        expected: AppProto::Ssh,
    },
    Scenario {
        name: "tlsv1_client_hello",
        direction: Direction::ToServer,
        ip_proto: IpProto::Tcp,
        buffer: b"\x16\x03\x01\x00\xa5\x01\x00\x00\xa1\x03\x01",
        expected: AppProto::Tls,
    },
    Scenario {
        name: "smtp_helo_response",
        direction: Direction::ToClient,
        ip_proto: IpProto::Tcp,
        buffer: b"HELO mail.example.com\r\n",
        expected: AppProto::Smtp,
    },
    Scenario {
        name: "imap_capability_request",
        direction: Direction::ToServer,
        ip_proto: IpProto::Tcp,
        buffer: b"1 capability\r\n",
        expected: AppProto::Imap,
    },
    Scenario {
        name: "direction_trap_http_substring_in_server_buffer",
        direction: Direction::ToServer,
        ip_proto: IpProto::Tcp,
        buffer: b"this is FTP, not HTTP/1.1 at all, definitely not HTTP\r\n",
        expected: AppProto::Unknown,
    },
];

#[test]
fn scenario_table() {
    let context = builtin_context().unwrap();
    let mut tctx = PerThreadState::new(&context);

    for scenario in SCENARIOS {
        let proto = identify(
            &mut tctx,
            scenario.direction,
            scenario.buffer,
            scenario.ip_proto,
        );
        assert_eq!(
            proto, scenario.expected,
            "scenario {:?}: expected {:?}, got {:?}",
            scenario.name, scenario.expected, proto
        );
    }
}

#[test]
fn smb_header_raw_bytes() {
    let context = builtin_context().unwrap();
    let mut tctx = PerThreadState::new(&context);
    let mut buffer = vec![0u8; 4];
    buffer.extend_from_slice(b"\xffSMB\x72\x00\x00\x00");
    let proto = identify(&mut tctx, Direction::ToServer, &buffer, IpProto::Tcp);
    assert_eq!(proto, AppProto::Smb);
}

#[test]
fn smb2_header_raw_bytes() {
    let context = builtin_context().unwrap();
    let mut tctx = PerThreadState::new(&context);
    let mut buffer = vec![0u8; 4];
    buffer.extend_from_slice(b"\xfeSMB\x40\x00\x00\x00");
    let proto = identify(&mut tctx, Direction::ToClient, &buffer, IpProto::Tcp);
    assert_eq!(proto, AppProto::Smb2);
}

#[test]
fn dcerpc_bind_pdu() {
    let context = builtin_context().unwrap();
    let mut tctx = PerThreadState::new(&context);
    let pdu = b"\x05\x00\x0b\x03\x10\x00\x00\x00\x48\x00\x00\x00";
    let proto = identify(&mut tctx, Direction::ToServer, pdu, IpProto::Tcp);
    assert_eq!(proto, AppProto::Dcerpc);
}

#[test]
fn buffer_shorter_than_any_depth_is_unknown() {
    let context = builtin_context().unwrap();
    let mut tctx = PerThreadState::new(&context);
    let proto = identify(&mut tctx, Direction::ToServer, b"G", IpProto::Tcp);
    assert_eq!(proto, AppProto::Unknown);
}

#[test]
fn empty_buffer_is_unknown() {
    let context = builtin_context().unwrap();
    let mut tctx = PerThreadState::new(&context);
    let proto = identify(&mut tctx, Direction::ToServer, b"", IpProto::Tcp);
    assert_eq!(proto, AppProto::Unknown);
}

#[test]
fn same_context_direction_buffer_ip_proto_always_agrees() {
    let context = builtin_context().unwrap();
    let mut tctx = PerThreadState::new(&context);
    let buffer = b"GET / HTTP/1.0\r\n\r\n";
    let first = identify(&mut tctx, Direction::ToServer, buffer, IpProto::Tcp);
    for _ in 0..20 {
        let repeat = identify(&mut tctx, Direction::ToServer, buffer, IpProto::Tcp);
        assert_eq!(first, repeat);
    }
}
