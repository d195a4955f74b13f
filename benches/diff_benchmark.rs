//! Diffing engine benchmark: Measure cell buffer diff and render cycle cost.
//!
//! Target: < 500µs for 200×50 buffer

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::sync::Arc;
use xedit::buffer::diff::{diff, full};
use xedit::{Buffer, Cell, Session, Theme, ThemeColor};

const PALETTE: [ThemeColor; 4] = [
    ThemeColor::Code,
    ThemeColor::Opcode,
    ThemeColor::Comment,
    ThemeColor::Number,
];

/// Create a buffer with varied content for benchmarking.
fn create_test_buffer(width: u16, height: u16, seed: u16) -> Buffer {
    let mut buffer = Buffer::new(width, height);
    for y in 0..height {
        for x in 0..width {
            let ch = ((x + y + seed) % 26 + 65) as u8; // A-Z
            let fg = PALETTE[usize::from((x * 3 + y + seed) % 4)];
            buffer.set(x, y, Cell::new(ch, fg, ThemeColor::BackNormal));
        }
    }
    buffer
}

fn source_text(lines: usize) -> String {
    let line = "\tint value = compute(42); // running total\n";
    line.repeat(lines)
}

fn diff_identical_buffers(c: &mut Criterion) {
    let theme = Theme::dark();
    let buffer = create_test_buffer(200, 50, 0);
    let buffer_clone = buffer.clone();

    c.bench_function("diff_200x50_identical", |b| {
        b.iter(|| diff(black_box(&buffer), black_box(&buffer_clone), &theme));
    });
}

fn diff_single_cell_change(c: &mut Criterion) {
    let theme = Theme::dark();
    let buffer_a = create_test_buffer(200, 50, 0);
    let mut buffer_b = buffer_a.clone();
    // Change a single cell in the middle
    buffer_b.set(100, 25, Cell::new(b'X', ThemeColor::Define, ThemeColor::BackNormal));

    c.bench_function("diff_200x50_single_change", |b| {
        b.iter(|| diff(black_box(&buffer_a), black_box(&buffer_b), &theme));
    });
}

fn diff_line_change(c: &mut Criterion) {
    let theme = Theme::dark();
    let buffer_a = create_test_buffer(200, 50, 0);
    let mut buffer_b = buffer_a.clone();
    // Change one full line
    for x in 0..200 {
        buffer_b.set(x, 25, Cell::new(b'*', ThemeColor::Text, ThemeColor::BackNormal));
    }

    c.bench_function("diff_200x50_line_change", |b| {
        b.iter(|| diff(black_box(&buffer_a), black_box(&buffer_b), &theme));
    });
}

fn full_repaint(c: &mut Criterion) {
    let theme = Theme::dark();
    let buffer = create_test_buffer(200, 50, 0);

    c.bench_function("full_200x50", |b| {
        b.iter(|| full(black_box(&buffer), &theme));
    });
}

fn diff_various_sizes(c: &mut Criterion) {
    let theme = Theme::dark();
    let mut group = c.benchmark_group("diff_by_size");

    for (width, height) in [(80, 24), (120, 40), (200, 50), (300, 80)] {
        let buffer_a = create_test_buffer(width, height, 0);
        let buffer_b = create_test_buffer(width, height, 1);

        group.bench_with_input(
            BenchmarkId::new("full_change", format!("{width}x{height}")),
            &(buffer_a, buffer_b),
            |b, (a, bb)| {
                b.iter(|| diff(black_box(a), black_box(bb), &theme));
            },
        );
    }

    group.finish();
}

fn keystroke_cycle(c: &mut Criterion) {
    let mut session = Session::load_text(source_text(200), Arc::new(Theme::dark()));
    session.on_resize(1800, 800);
    session.render();

    // Insert then delete, so the text does not grow across iterations
    c.bench_function("session_keystroke_200_lines", |b| {
        b.iter(|| {
            session.on_insert_char(b'x');
            black_box(session.render());
            session.on_delete_last_char();
            black_box(session.render())
        });
    });
}

criterion_group!(
    benches,
    diff_identical_buffers,
    diff_single_cell_change,
    diff_line_change,
    full_repaint,
    diff_various_sizes,
    keystroke_cycle,
);
criterion_main!(benches);
