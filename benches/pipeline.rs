//! Benchmarks for the iconsheet pipeline.

use std::fs;
use std::path::Path;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use iconsheet::{assemble_sprite, build, normalize_symbol, optimize_svg, BuildOptions, IconName, OptimizeOptions};

const ICON: &str = r##"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" width="24" height="24" viewBox="0 0 24 24" fill="none" stroke="#000000">
  <!-- Layer 1 -->
  <path d="M12 2L2 7l10 5 10-5-10-5z"/>
  <path d="M2 17l10 5 10-5"/>
  <path d="M2 12l10 5 10-5"/>
</svg>
"##;

fn symbols(count: usize) -> Vec<String> {
    (0..count)
        .map(|i| {
            let name = IconName::from_relative(&format!("icon-{i}.svg"));
            normalize_symbol(ICON, &name, Path::new("icon.svg")).unwrap()
        })
        .collect()
}

fn bench_symbols(c: &mut Criterion) {
    let mut group = c.benchmark_group("symbols");
    let name = IconName::from_relative("layers.svg");

    group.bench_function("normalize", |b| {
        b.iter(|| normalize_symbol(black_box(ICON), &name, Path::new("layers.svg")).unwrap())
    });

    let many = symbols(500);
    group.bench_function("assemble_500", |b| b.iter(|| assemble_sprite(black_box(&many))));

    let sprite = assemble_sprite(&many);
    let options = OptimizeOptions::default();
    group.bench_function("optimize_500", |b| {
        b.iter(|| optimize_svg(black_box(&sprite), &options).unwrap())
    });

    group.finish();
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("icons");
    fs::create_dir_all(&input).unwrap();
    for i in 0..200 {
        fs::write(input.join(format!("icon-{i}.svg")), ICON).unwrap();
    }

    let mut options = BuildOptions::new(&input, dir.path().join("out"));
    build(&options).unwrap();

    group.bench_function("up_to_date_200", |b| b.iter(|| build(black_box(&options)).unwrap()));

    options.force = true;
    group.bench_function("forced_200", |b| b.iter(|| build(black_box(&options)).unwrap()));

    group.finish();
}

criterion_group!(benches, bench_symbols, bench_build);
criterion_main!(benches);
