//! Benchmark suite for GIF decoding
//!
//! This benchmark measures full-frame decode throughput and header parsing
//! over synthetic inputs, and helps identify hot paths in the decoder.
//!
//! Run with: cargo bench --manifest-path benches/Cargo.toml
//!
//! For flamegraph profiling:
//! cargo bench --manifest-path benches/Cargo.toml -- --profile-time=5

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use gifray_benches::{generate_test_gif, sizes};
use gifray_types::gif::{File, Header};
use std::hint::black_box;

/// Benchmark full-frame decoding at several image sizes
fn bench_decode_synthetic(c: &mut Criterion) {
	let mut group = c.benchmark_group("gif_decode_synthetic");

	let cases = [
		("tiny", sizes::TINY),
		("small", sizes::SMALL),
		("medium", sizes::MEDIUM),
		("large", sizes::LARGE),
	];

	for (name, (width, height)) in cases {
		let data = generate_test_gif(width, height);

		let pixels = u64::from(width) * u64::from(height);
		group.throughput(Throughput::Elements(pixels));
		group.bench_with_input(BenchmarkId::new("decode", name), &data, |b, data| {
			b.iter(|| {
				let mut gif = File::from_bytes(black_box(data).as_slice());
				let frame = gif.next_frame();
				black_box(frame)
			});
		});
	}

	group.finish();
}

/// Benchmark header parsing separately
fn bench_header_parsing(c: &mut Criterion) {
	let data = generate_test_gif(sizes::SMALL.0, sizes::SMALL.1);

	c.bench_function("gif_header_parse", |b| {
		b.iter(|| {
			let header = Header::from_bytes(black_box(&data));
			black_box(header)
		});
	});
}

criterion_group!(benches, bench_decode_synthetic, bench_header_parsing);
criterion_main!(benches);
