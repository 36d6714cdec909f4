// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Seqline-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Seqline and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use seqline::format::{parse, serialize};

mod fixtures;
mod profiler;

// Benchmark identity (keep stable):
// - Group names in this file: `format.parse`, `format.serialize`
// - Case IDs (the string after the `/`) come from `fixtures::Case::id` and must not be renamed,
//   so results stay comparable over time.
fn benches_parse(c: &mut Criterion) {
    {
        let mut group = c.benchmark_group("format.parse");

        for case in fixtures::Case::ALL {
            let text = fixtures::fixture(case);
            group.throughput(Throughput::Bytes(text.len() as u64));
            group.bench_function(case.id(), move |b| {
                b.iter(|| {
                    let document = parse(black_box(&text));
                    black_box(fixtures::checksum_document(black_box(&document)))
                })
            });
        }

        group.finish();
    }

    {
        let mut group = c.benchmark_group("format.serialize");

        for case in fixtures::Case::ALL {
            let document = parse(&fixtures::fixture(case));
            group.throughput(Throughput::Elements(document.len() as u64));
            group.bench_function(case.id(), move |b| {
                b.iter(|| black_box(serialize(black_box(&document)).len()))
            });
        }

        group.finish();
    }
}

criterion_group! {
    name = benches;
    config = profiler::criterion();
    targets = benches_parse
}
criterion_main!(benches);
