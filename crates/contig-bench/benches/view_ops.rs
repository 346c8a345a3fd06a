//! Criterion micro-benchmarks for views and handles.

use std::hint::black_box;

use contig_bench::{random_bytes, random_u32s};
use contig_handle::Handle;
use contig_view::View;
use criterion::{criterion_group, criterion_main, Criterion};

const LEN: usize = 64 * 1024;

/// Benchmark: copy 64K `u32`s between disjoint views.
fn bench_copy_to_disjoint(c: &mut Criterion) {
    let src = random_u32s(LEN, 1);
    let mut dst = vec![0u32; LEN];
    c.bench_function("copy_to_disjoint_64k", |b| {
        b.iter(|| {
            let from = View::from_slice(black_box(&src));
            let mut to = View::from_mut_slice(&mut dst);
            from.copy_to(&mut to).unwrap();
            black_box(to[0]);
        });
    });
}

/// Benchmark: copy 64K `u32`s to an overlapping window one element ahead.
fn bench_copy_to_overlapping(c: &mut Criterion) {
    let mut data = random_u32s(LEN + 1, 2);
    c.bench_function("copy_to_overlapping_64k", |b| {
        b.iter(|| {
            let ptr = data.as_mut_ptr();
            // SAFETY: both views lie inside `data`, which outlives them and
            // is not otherwise accessed while they live.
            let (src, mut dst) = unsafe {
                (
                    View::<u32>::from_raw_parts(ptr, LEN),
                    View::<u32>::from_raw_parts(ptr.add(1), LEN),
                )
            };
            src.copy_to(&mut dst).unwrap();
            black_box(dst[0]);
        });
    });
}

/// Benchmark: fill then clear 64K bytes.
fn bench_fill_and_clear(c: &mut Criterion) {
    let mut data = random_bytes(LEN, 3);
    c.bench_function("fill_clear_u8_64k", |b| {
        b.iter(|| {
            let mut view = View::from_mut_slice(&mut data);
            view.fill(black_box(0xA5));
            view.clear();
            black_box(view[LEN - 1]);
        });
    });
}

/// Benchmark: slice a handle, project a view, pin and release.
fn bench_handle_project_and_pin(c: &mut Criterion) {
    let handle = Handle::from_vec(random_u32s(LEN, 4));
    c.bench_function("handle_slice_view_pin", |b| {
        b.iter(|| {
            let window = handle.slice(black_box(16), black_box(1024)).unwrap();
            let first = window.as_read_only_view().unwrap()[0];
            let pin = window.pin().unwrap();
            black_box((first, pin.as_ptr()));
            pin.release();
        });
    });
}

criterion_group!(
    benches,
    bench_copy_to_disjoint,
    bench_copy_to_overlapping,
    bench_fill_and_clear,
    bench_handle_project_and_pin
);
criterion_main!(benches);
