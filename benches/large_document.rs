//! Performance benchmarks for large tag-value documents.
//!
//! Run with: cargo bench --bench large_document

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use spdx_tagvalue::config::ValidationConfig;
use spdx_tagvalue::{parse_tag_value, write_document, Validator, WriteOptions};
use std::fmt::Write as _;
use std::hint::black_box;

/// Generate a document with `packages` packages of `files` files each.
fn generate_document(packages: usize, files: usize) -> String {
    let mut out = String::from(
        "SPDXVersion: SPDX-2.3\n\
         DataLicense: CC0-1.0\n\
         SPDXID: SPDXRef-DOCUMENT\n\
         DocumentName: bench\n\
         DocumentNamespace: https://example.com/spdx/bench\n\
         Creator: Tool: bench-gen\n\
         Created: 2024-01-01T00:00:00Z\n",
    );

    for p in 0..packages {
        let _ = write!(
            out,
            "\nPackageName: pkg-{p}\n\
             SPDXID: SPDXRef-pkg-{p}\n\
             PackageVersion: 1.{}.{}\n\
             PackageDownloadLocation: https://example.com/pkg-{p}.tar.gz\n\
             PackageLicenseConcluded: (MIT OR Apache-2.0) AND BSD-3-Clause\n\
             PackageLicenseDeclared: MIT OR Apache-2.0\n\
             PackageCopyrightText: <text>Copyright {p} Example\nAll rights reserved.</text>\n",
            p % 10,
            p % 100
        );
        for f in 0..files {
            let _ = write!(
                out,
                "\nFileName: ./pkg-{p}/src/file-{f}.c\n\
                 SPDXID: SPDXRef-file-{p}-{f}\n\
                 FileType: SOURCE\n\
                 FileChecksum: SHA1: {:040x}\n\
                 LicenseConcluded: MIT\n\
                 FileCopyrightText: NOASSERTION\n",
                p * files + f
            );
        }
    }

    out.push('\n');
    for p in 0..packages {
        let _ = writeln!(out, "Relationship: SPDXRef-DOCUMENT DESCRIBES SPDXRef-pkg-{p}");
        if p > 0 {
            let _ = writeln!(
                out,
                "Relationship: SPDXRef-pkg-{p} DEPENDS_ON SPDXRef-pkg-{}",
                p - 1
            );
        }
    }
    out
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");
    for packages in [10, 100, 500] {
        let text = generate_document(packages, 10);
        group.bench_with_input(BenchmarkId::from_parameter(packages), &text, |b, text| {
            b.iter(|| black_box(parse_tag_value(black_box(text))));
        });
    }
    group.finish();
}

fn bench_validate(c: &mut Criterion) {
    let document = parse_tag_value(&generate_document(500, 10))
        .expect("generated document tokenizes")
        .document;

    let mut group = c.benchmark_group("validate_5500_entities");
    for (name, parallel) in [("sequential", false), ("parallel", true)] {
        let validator = Validator::new(ValidationConfig {
            parallel,
            ..ValidationConfig::default()
        });
        group.bench_function(name, |b| {
            b.iter(|| black_box(validator.validate(black_box(&document))));
        });
    }
    group.finish();
}

fn bench_write(c: &mut Criterion) {
    let document = parse_tag_value(&generate_document(100, 10))
        .expect("generated document tokenizes")
        .document;

    let mut group = c.benchmark_group("write_1100_entities");
    group.bench_function("plain", |b| {
        let options = WriteOptions {
            validate: false,
            drop_duplicates: false,
            ..WriteOptions::default()
        };
        b.iter(|| black_box(write_document(black_box(&document), &options)));
    });
    group.bench_function("validate_and_deduplicate", |b| {
        let options = WriteOptions::default();
        b.iter(|| black_box(write_document(black_box(&document), &options)));
    });
    group.finish();
}

criterion_group!(benches, bench_parse, bench_validate, bench_write);
criterion_main!(benches);
