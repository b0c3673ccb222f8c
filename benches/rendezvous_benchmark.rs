//! Rendezvous benchmark: Measure the cost of a line crossing the engine.
//!
//! Covers the uncontended fast path (state answers immediately) and a
//! full cross-thread hand-off where the reader is already blocked.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use flywheel_readline::line::{Reply, Request, Signal};
use flywheel_readline::{Join, LineSource, ReadRequest};
use std::sync::Arc;
use std::thread;

fn available_fast_path(c: &mut Criterion) {
    let join = Join::new(LineSource::new());
    c.bench_function("available_empty", |b| {
        b.iter(|| black_box(join.call(Request::Available)))
    });
}

fn line_then_chunked_reads(c: &mut Criterion) {
    let join = Join::new(LineSource::new());
    let line = "puts [1, 2, 3].map { |x| x * 2 }\n".to_string();

    c.bench_function("line_read_8_byte_chunks", |b| {
        b.iter(|| {
            join.send(Signal::Line(line.clone()));
            let mut total = 0;
            while total < line.len() {
                match join.call(Request::Read(ReadRequest::new(0, 8))) {
                    Ok(Reply::Bytes { bytes, .. }) => total += bytes.len(),
                    other => panic!("unexpected {other:?}"),
                }
            }
            black_box(total)
        });
    });
}

fn cross_thread_get_line(c: &mut Criterion) {
    c.bench_function("get_line_cross_thread", |b| {
        b.iter_custom(|iters| {
            let join = Arc::new(Join::new(LineSource::new()));
            let reader = {
                let join = join.clone();
                thread::spawn(move || {
                    for _ in 0..iters {
                        let _ = black_box(join.call(Request::GetLine));
                    }
                })
            };

            let start = std::time::Instant::now();
            for _ in 0..iters {
                join.send(Signal::Line("x\n".to_string()));
            }
            reader.join().unwrap();
            start.elapsed()
        });
    });
}

criterion_group!(
    benches,
    available_fast_path,
    line_then_chunked_reads,
    cross_thread_get_line,
);
criterion_main!(benches);
