//! Micro-benchmark for frame encoding/decoding.
//!
//! Generates a fixed sequence of pseudo-random payloads (Linear Congruential
//! Generator seeded with 0xDEADBEEF), encodes each one with a reused
//! `FrameEncoder`, concatenates the frames and measures how long a single
//! `FrameDecoder` takes to pull every payload back out of the stream.
//!
//! Run with:
//!
//! ```text
//! cargo run --release --example benchmark
//! ```
//!
//! Set `BENCH_FRAMES` for a quicker run, e.g. `BENCH_FRAMES=20000`.
use frameline::{frame_capacity, FrameDecoder, FrameEncoder};
use std::time::{Duration, Instant};

const FRAME_COUNT: usize = 1_000_000;
const PAYLOAD_LEN: usize = 128;
const CAP: usize = frame_capacity(PAYLOAD_LEN);

fn main() {
    let frame_count = std::env::var("BENCH_FRAMES")
        .ok()
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(FRAME_COUNT);

    // Arbitrary bytes: roughly one in 128 needs escaping.
    let payloads_random = make_payloads(frame_count, 0xDEADBEEF, |rng: &mut Lcg| rng.next_u8());

    // Reserved-heavy bytes: every other byte is a delimiter or escape.
    let payloads_reserved = make_payloads(frame_count, 0xDEADBEEF, |rng: &mut Lcg| {
        match rng.next_u8() % 4 {
            0 => 0x7E,
            1 => 0x7D,
            _ => rng.next_u8(),
        }
    });

    run_bench("random bytes", &payloads_random);
    run_bench("reserved-heavy bytes", &payloads_reserved);
}

fn ns_per_item(duration: Duration, count: usize) -> f64 {
    duration.as_nanos() as f64 / count as f64
}

fn mb_per_sec(bytes: usize, duration: Duration) -> f64 {
    let secs = duration.as_secs_f64();
    if secs > 0.0 {
        (bytes as f64 / 1_000_000.0) / secs
    } else {
        0.0
    }
}

fn run_bench(label: &str, payloads: &[Vec<u8>]) {
    let frame_count = payloads.len();
    let mut encoder = FrameEncoder::<CAP>::new();

    let start = Instant::now();
    let mut stream = Vec::new();
    for payload in payloads {
        encoder.write(payload);
        stream.extend_from_slice(encoder.data());
    }
    let encode_elapsed = start.elapsed();

    let mut decoder = FrameDecoder::<CAP>::new();
    let mut decoded = Vec::with_capacity(frame_count);
    let start = Instant::now();
    let mut rest = &stream[..];
    while !rest.is_empty() {
        let (consumed, complete) = decoder.feed(rest);
        rest = &rest[consumed..];
        if complete {
            let mut payload = vec![0; decoder.available()];
            decoder.read(&mut payload);
            decoded.push(payload);
        }
    }
    let decode_elapsed = start.elapsed();

    assert_eq!(payloads, &decoded[..], "round-trip mismatch for {label}");

    println!("--- Benchmark: {label} ---");
    println!("Frames processed: {frame_count}");
    println!("Encoded bytes: {}", stream.len());
    println!(
        "Encoding took: {:?} ({:.2} ns/frame, {:.2} MB/s)",
        encode_elapsed,
        ns_per_item(encode_elapsed, frame_count),
        mb_per_sec(stream.len(), encode_elapsed)
    );
    println!(
        "Decoding took: {:?} ({:.2} ns/frame, {:.2} MB/s)",
        decode_elapsed,
        ns_per_item(decode_elapsed, frame_count),
        mb_per_sec(stream.len(), decode_elapsed)
    );
    println!();
}

struct Lcg {
    state: u64,
}

impl Lcg {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    fn next(&mut self) -> u64 {
        // Constants from Numerical Recipes LCG.
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    fn next_u8(&mut self) -> u8 {
        (self.next() >> 24) as u8
    }
}

fn make_payloads<F>(frame_count: usize, seed: u64, mut next_byte: F) -> Vec<Vec<u8>>
where
    F: FnMut(&mut Lcg) -> u8,
{
    let mut rng = Lcg::new(seed);
    (0..frame_count)
        .map(|_| (0..PAYLOAD_LEN).map(|_| next_byte(&mut rng)).collect())
        .collect()
}
