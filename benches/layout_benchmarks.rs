//! Layout reconstruction benchmarks
//!
//! Measures word linking and full page analysis on synthetic pages of
//! increasing size. Each page is a grid of word boxes laid out like body
//! text: fixed line pitch, slightly varying word widths.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use page_oxide::geometry::{Angle, Contour, PolygonShapes};
use page_oxide::layout::{BoundaryLine, FixedMargin, Margin, Word, WordArena, WordGraph};
use page_oxide::pipeline::{LayoutPipeline, LinkingConfig};

/// Contours of a synthetic page with `lines` rows of `per_line` words.
fn synthetic_page(lines: i32, per_line: i32) -> Vec<Contour> {
    let mut contours = Vec::with_capacity((lines * per_line) as usize);
    let mut s: u64 = 42;

    for row in 0..lines {
        let mut x = 100;
        for _ in 0..per_line {
            s = s.wrapping_mul(6364136223846793005).wrapping_add(1);
            let width = 40 + ((s >> 33) % 80) as i32;
            contours.push(Contour::rectangle(x, 100 + row * 60, width, 30));
            x += width + 15;
        }
    }

    contours
}

fn page_margin() -> FixedMargin {
    FixedMargin::new(Margin::new(
        Angle::ZERO,
        BoundaryLine::vertical(100.0, 0.0, 4000.0),
        BoundaryLine::vertical(1500.0, 0.0, 4000.0),
    ))
}

/// Benchmark candidate search and link selection
fn bench_link_words(c: &mut Criterion) {
    let mut group = c.benchmark_group("link_words");

    for lines in [10, 30, 50] {
        let words = WordArena::new(
            synthetic_page(lines, 10)
                .into_iter()
                .filter_map(|contour| Word::new(contour, &PolygonShapes).ok())
                .collect(),
        );

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}_words", words.len())),
            &words,
            |b, words| b.iter(|| black_box(WordGraph::link(black_box(words), &LinkingConfig::default()))),
        );
    }

    group.finish();
}

/// Benchmark the whole pipeline from contours to classified lines
fn bench_analyze_page(c: &mut Criterion) {
    let mut group = c.benchmark_group("analyze_page");
    let pipeline = LayoutPipeline::new();
    let margin = page_margin();

    for lines in [10, 30, 50] {
        let contours = synthetic_page(lines, 10);

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}_lines", lines)),
            &contours,
            |b, contours| {
                b.iter(|| {
                    let page = pipeline.analyze(black_box(contours.clone()), &margin).unwrap();
                    black_box(page)
                })
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_link_words, bench_analyze_page);
criterion_main!(benches);
