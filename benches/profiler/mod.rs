// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Seqline-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Seqline and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::str::FromStr;
use std::time::Duration;

use criterion::Criterion;

use pprof::criterion::{Output, PProfProfiler};

/// Reads `SEQLINE_BENCH_<name>`, clamped to `[min, max]`.
fn setting<T: FromStr + Ord>(name: &str, default: T, min: T, max: T) -> T {
    std::env::var(format!("SEQLINE_BENCH_{name}"))
        .ok()
        .and_then(|raw| raw.trim().parse::<T>().ok())
        .unwrap_or(default)
        .clamp(min, max)
}

/// Criterion with a flamegraph profiler attached; only active under `--profile-time`.
pub fn criterion() -> Criterion {
    let frequency = setting::<i32>("PROFILE_FREQ", 100, 1, 1000);
    let sample_size = setting::<usize>("SAMPLE_SIZE", 50, 10, 200);
    let warmup = setting::<u64>("WARMUP_SECS", 2, 1, 60);
    let measurement = setting::<u64>("MEASUREMENT_SECS", 5, 1, 120);

    Criterion::default()
        .sample_size(sample_size)
        .warm_up_time(Duration::from_secs(warmup))
        .measurement_time(Duration::from_secs(measurement))
        .with_profiler(PProfProfiler::new(frequency, Output::Flamegraph(None)))
}
