use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use walker_alias::{AliasTable, ParallelDevice, WalkerAlias, sampler};

fn gen_weights(n: usize) -> Vec<f32> {
    let mut rng = Pcg32::seed_from_u64(777);
    (0..n).map(|_| 0.1 + rng.random::<f32>()).collect()
}

fn gen_draws(len: usize) -> Vec<f32> {
    let mut rng = Pcg32::seed_from_u64(999);
    (0..len).map(|_| rng.random::<f32>()).collect()
}

fn bench_alias_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("alias_build");
    for &n in &[2usize, 8, 64, 256, 1024, 65536] {
        let weights = gen_weights(n);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("new_n={n}"), |b| {
            b.iter(|| black_box(AliasTable::new(black_box(&weights))).unwrap());
        });
    }
    group.finish();
}

fn bench_alias_sample(c: &mut Criterion) {
    let mut group = c.benchmark_group("alias_sample");
    const DRAWS_PER_ITER: usize = 1 << 16;
    let draws = gen_draws(DRAWS_PER_ITER);

    for &n in &[2usize, 64, 1024, 65536] {
        let cpu = WalkerAlias::new(&gen_weights(n)).unwrap();
        let par = cpu.clone().to_device(ParallelDevice::new());
        group.throughput(Throughput::Elements(DRAWS_PER_ITER as u64));

        group.bench_function(format!("kernel_n={n}"), |b| {
            b.iter(|| black_box(sampler::sample(cpu.table(), black_box(&draws))));
        });

        group.bench_function(format!("cpu_device_n={n}"), |b| {
            b.iter(|| black_box(cpu.sample_draws(black_box(&draws))));
        });

        group.bench_function(format!("parallel_device_n={n}"), |b| {
            b.iter(|| black_box(par.sample_draws(black_box(&draws))));
        });

        group.bench_function(format!("shaped_with_rng_n={n}"), |b| {
            b.iter_batched_ref(
                || Pcg32::seed_from_u64(1001),
                |rng| black_box(cpu.sample(rng, &[256, 256]).unwrap()),
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(alias, bench_alias_build, bench_alias_sample);
criterion_main!(alias);
