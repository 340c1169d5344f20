use std::hint::black_box;
use std::io;

use coretop::system::sample::CpuSample;
use coretop::system::sampler::{CpuTimeSource, Sampler};
use coretop::system::utilization::utilization;
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

fn make_samples(core_count: usize) -> (CpuSample, CpuSample) {
    let previous = CpuSample {
        wall_time_ns: 1_000_000_000,
        core_times_ns: (0..core_count).map(|core| core as u64 * 7_000_000).collect(),
    };
    let current = CpuSample {
        wall_time_ns: 2_000_000_000,
        core_times_ns: (0..core_count)
            .map(|core| core as u64 * 7_000_000 + (core as u64 % 10) * 90_000_000)
            .collect(),
    };
    (previous, current)
}

struct SyntheticCpuTimes {
    now_ns: u64,
}

impl CpuTimeSource for SyntheticCpuTimes {
    fn core_time_ns(&mut self, core: usize) -> io::Result<u64> {
        self.now_ns += 250_000;
        Ok(self.now_ns + core as u64)
    }
}

fn bench_utilization(c: &mut Criterion) {
    let mut group = c.benchmark_group("utilization_1_8_32");

    for core_count in [1usize, 8, 32] {
        let samples = make_samples(core_count);
        group.bench_with_input(
            BenchmarkId::from_parameter(core_count),
            &samples,
            |b, (previous, current)| {
                b.iter(|| {
                    let result = utilization(black_box(previous), black_box(current));
                    black_box(result);
                })
            },
        );
    }

    group.finish();
}

fn bench_capture(c: &mut Criterion) {
    let mut group = c.benchmark_group("capture_1_8_32");

    for core_count in [1usize, 8, 32] {
        group.bench_with_input(
            BenchmarkId::from_parameter(core_count),
            &core_count,
            |b, &core_count| {
                let mut sampler = Sampler::new(SyntheticCpuTimes { now_ns: 0 }, core_count);
                b.iter(|| {
                    let sample = sampler.capture();
                    black_box(sample);
                })
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_utilization, bench_capture);
criterion_main!(benches);
