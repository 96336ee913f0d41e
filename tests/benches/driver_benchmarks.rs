//! # Mint-Bench Driver Benchmarks
//!
//! Host-side overhead of a run, excluding the external tool:
//!
//! | Operation | Input | Target |
//! |-----------|-------|--------|
//! | Payload encoding | 0 / 200 / 500 / 64k filler bytes | < 100µs |
//! | Matrix expansion | default 3 × 3 table | < 1ms |
//! | Receipt parsing | `cast send` receipt | < 50µs |
//! | Command rendering | one matrix entry | < 50µs |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use mint_bench::{build_matrix, encode_filler_payload, parse_gas_receipt, BenchConfig};

const RECEIPT: &str = "\
blockHash               0x3f1c2b6a9e0d4c7b8a5f6e3d2c1b0a99887766554433221100ffeeddccbbaa99
blockNumber             28112377
contractAddress
cumulativeGasUsed       2871233
effectiveGasPrice       1500000000
gasUsed                 151234
logs                    []
logsBloom               0x00000000000000000000000000000000000000000000000000000000000000000000
root
status                  1 (success)
transactionHash         0x9a8b7c6d5e4f30211203f4e5d6c7b8a99a8b7c6d5e4f30211203f4e5d6c7b8a9
transactionIndex        3
type                    2
";

// ============================================================================
// Payload encoding
// ============================================================================

fn bench_payload_encoding(c: &mut Criterion) {
    let mut group = c.benchmark_group("payload-encoding");

    for length in [0usize, 200, 500, 65_536] {
        group.throughput(Throughput::Bytes(length as u64));
        group.bench_with_input(BenchmarkId::from_parameter(length), &length, |b, &len| {
            b.iter(|| encode_filler_payload(black_box(len), 'a'))
        });
    }

    group.finish();
}

// ============================================================================
// Matrix expansion and rendering
// ============================================================================

fn bench_matrix(c: &mut Criterion) {
    let mut group = c.benchmark_group("matrix");
    let config = BenchConfig::default();

    group.bench_function("build_default", |b| {
        b.iter(|| build_matrix(black_box(&config)))
    });

    let entries = build_matrix(&config);
    group.bench_function("render_invocation", |b| {
        b.iter(|| black_box(&entries[8]).invocation.render())
    });

    group.finish();
}

// ============================================================================
// Receipt parsing
// ============================================================================

fn bench_receipt_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("receipt");
    group.throughput(Throughput::Bytes(RECEIPT.len() as u64));

    group.bench_function("parse_cast_receipt", |b| {
        b.iter(|| parse_gas_receipt(black_box(RECEIPT)))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_payload_encoding,
    bench_matrix,
    bench_receipt_parsing
);
criterion_main!(benches);
