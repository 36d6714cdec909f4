// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Seqline-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Seqline and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use seqline::format::parse;
use seqline::layout::{calculate_layout_with, LayoutConfig};

mod fixtures;
mod profiler;

// Benchmark identity (keep stable):
// - Group name in this file: `seq.layout`
// - Case IDs come from `fixtures::Case::id`; do not rename them.
fn benches_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("seq.layout");
    let config = LayoutConfig::default();

    for case in fixtures::Case::ALL {
        let document = parse(&fixtures::fixture(case));
        group.throughput(Throughput::Elements(document.len() as u64));
        let config = config.clone();
        group.bench_function(case.id(), move |b| {
            b.iter(|| {
                let layout = calculate_layout_with(black_box(&document), &config);
                black_box(fixtures::checksum_layout(black_box(&layout)))
            })
        });
    }

    group.finish();
}

criterion_group! {
    name = benches;
    config = profiler::criterion();
    targets = benches_layout
}
criterion_main!(benches);
