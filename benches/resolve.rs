//! Benchmarks for import parsing and usage resolution
//!
//! Measures parsing of candidate files, matching of their imports against a
//! large declaration set, and a full scan over a synthetic tree.

use std::fs;
use std::path::Path;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use fanout::analysis::{scan, ExclusionList, ImportResolver, UsageIndex};
use fanout::parser::{Declaration, DeclarationKind, SourceLanguage, SourceParser};
use fanout::{AnalysisOptions, RenderOptions};

/// Create a candidate module importing `imports` of `declarations` events.
fn create_module(index: usize, declarations: usize, imports: usize) -> String {
    let names: Vec<String> = (0..imports)
        .map(|i| format!("Event{}", (index * 7 + i) % declarations))
        .collect();
    format!(
        "import {{ {} }} from './events';\nimport * as util from './util';\n\nexport function handler{}() {{\n  return util.run({});\n}}\n",
        names.join(", "),
        index,
        names.join(", ")
    )
}

fn create_declarations(count: usize) -> Vec<Declaration> {
    (0..count)
        .map(|i| Declaration::new(format!("Event{}", i), DeclarationKind::Variable, true, i + 1))
        .collect()
}

/// Benchmark parsing one candidate file
fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_candidate");
    let mut parser = SourceParser::new().unwrap();

    for imports in [1, 10, 50].iter() {
        let source = create_module(0, 100, *imports);

        group.bench_with_input(BenchmarkId::new("imports", imports), &source, |b, source| {
            b.iter(|| {
                black_box(
                    parser
                        .parse_source(source, SourceLanguage::TypeScript, Path::new("module.ts"))
                        .unwrap(),
                )
            });
        });
    }

    group.finish();
}

/// Benchmark matching parsed imports against the declaration set
fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve_imports");
    let mut parser = SourceParser::new().unwrap();
    let exclusions = ExclusionList::new(["generated.ts"]);

    for declarations in [10, 100, 1000].iter() {
        let decls = create_declarations(*declarations);
        let resolver = ImportResolver::new(&decls, &exclusions);
        let files: Vec<_> = (0..100)
            .map(|i| {
                parser
                    .parse_source(
                        &create_module(i, *declarations, 5),
                        SourceLanguage::TypeScript,
                        Path::new(&format!("module{}.ts", i)),
                    )
                    .unwrap()
            })
            .collect();

        group.bench_with_input(
            BenchmarkId::new("declarations_100_files", declarations),
            &files,
            |b, files| {
                b.iter(|| {
                    let mut index = UsageIndex::new();
                    for file in files {
                        black_box(resolver.resolve(file, &mut index));
                    }
                    index
                });
            },
        );
    }

    group.finish();
}

/// Benchmark a full scan of a synthetic tree on disk
fn bench_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("scan_tree");
    group.sample_size(10);

    for files in [50, 200].iter() {
        let dir = tempfile::TempDir::new().unwrap();
        let declarations: String = (0..100)
            .map(|i| format!("export const Event{} = 'event-{}';\n", i, i))
            .collect();
        fs::write(dir.path().join("events.ts"), declarations).unwrap();

        let src = dir.path().join("src");
        for i in 0..*files {
            let sub = src.join(format!("feature{}", i % 10));
            fs::create_dir_all(&sub).unwrap();
            fs::write(sub.join(format!("module{}.ts", i)), create_module(i, 100, 5)).unwrap();
        }

        let options = AnalysisOptions::new(dir.path().join("events.ts"), &src, dir.path().join("events"))
            .with_render(RenderOptions {
                skip_image: true,
                ..RenderOptions::default()
            });

        group.bench_with_input(BenchmarkId::new("files", files), &options, |b, options| {
            b.iter(|| black_box(scan(options).unwrap()));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_parse, bench_resolve, bench_scan);
criterion_main!(benches);
