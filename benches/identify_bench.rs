use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use protoid::{builtin_context, identify, Direction, IpProto, PerThreadState};
use std::hint::black_box;

fn bench_identify(c: &mut Criterion) {
    let context = builtin_context().unwrap();

    let buffers: &[(&str, Direction, &[u8])] = &[
        (
            "http_request",
            Direction::ToServer,
            b"GET /index.html HTTP/1.1\r\nHost: example.com\r\nUser-Agent: bench\r\n\r\n",
        ),
        (
            "http_response",
            Direction::ToClient,
            b"HTTP/1.1 200 OK\r\nServer: nginx\r\nContent-Length: 0\r\n\r\n",
        ),
        ("ssh_banner", Direction::ToServer, b"SSH-2.0-OpenSSH_8.9\r\n"),
        (
            "unrecognized",
            Direction::ToServer,
            b"this buffer matches no built-in signature at all",
        ),
    ];

    let mut group = c.benchmark_group("identify");
    for (name, direction, buffer) in buffers {
        group.throughput(Throughput::Bytes(buffer.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(name), buffer, |b, buffer| {
            let mut tctx = PerThreadState::new(&context);
            b.iter(|| {
                let proto = identify(&mut tctx, *direction, black_box(buffer), IpProto::Tcp);
                black_box(proto);
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_identify);
criterion_main!(benches);
