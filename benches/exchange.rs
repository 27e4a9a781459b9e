use cmdsrv::common::spawn_command_server;
use cmdsrv::security::{CommandValidator, sanitize};
use cmdsrv::udp::{CommandConfig, ExchangeClient};
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use tokio::runtime::Runtime;

fn bench_validation_pipeline(c: &mut Criterion) {
    let validator = CommandValidator::default();

    let mut group = c.benchmark_group("validation_pipeline");

    let cases: Vec<(&str, Vec<u8>)> = vec![
        ("accepted", b"COMMAND_A".to_vec()),
        ("rejected", b"DROP TABLE users;".to_vec()),
        ("oversized", vec![b'x'; 2000]),
        ("noisy_1k", {
            let mut v = Vec::with_capacity(1024);
            for i in 0..1024u32 {
                v.push((i % 256) as u8);
            }
            v
        }),
    ];

    for (name, payload) in &cases {
        group.throughput(Throughput::Bytes(payload.len() as u64));
        group.bench_with_input(BenchmarkId::new("check", name), payload, |b, payload| {
            b.iter(|| validator.check(black_box(payload)));
        });
    }

    group.finish();
}

fn bench_sanitize(c: &mut Criterion) {
    let mut group = c.benchmark_group("sanitize");

    let sizes = vec![64, 256, 1024];
    for size in sizes {
        let text: String = (0..size).map(|i| if i % 3 == 0 { ';' } else { 'a' }).collect();
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::new("filter", size), &text, |b, text| {
            b.iter(|| sanitize(black_box(text)));
        });
    }

    group.finish();
}

fn bench_exchange_round_trip(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();

    c.bench_function("command_round_trip", |b| {
        b.to_async(&rt).iter(|| async {
            let (server_handle, addr) = spawn_command_server(CommandConfig::default())
                .await
                .unwrap();

            let mut client = ExchangeClient::connect(addr).await.unwrap();
            let (reply, _) = client.exchange(black_box(b"COMMAND_A")).await.unwrap();
            assert!(!reply.is_empty());

            server_handle.abort();
            reply
        });
    });
}

criterion_group!(
    benches,
    bench_validation_pipeline,
    bench_sanitize,
    bench_exchange_round_trip
);
criterion_main!(benches);
