use alife::{random::default_rng, Population, Simulation, Variant};
use criterion::Criterion;

fn mixed(size: usize) -> Population {
    Population::new(
        [
            (Variant::Cooperator, size / 3),
            (Variant::Defector, size / 3),
            (Variant::PartialCooperator, size - 2 * (size / 3)),
        ],
        &mut default_rng(),
    )
    .unwrap()
}

fn bench_update(bench: &mut Criterion) {
    let mut rng = default_rng();
    for size in [10, 1_000, 100_000] {
        let mut population = mixed(size);
        bench.bench_function(&format!("update-{size}"), |b| {
            b.iter(|| population.update(&mut rng));
        });
    }
}

fn bench_run(bench: &mut Criterion) {
    let mut rng = default_rng();
    let population = mixed(1_000);
    bench.bench_function("run-1000x100", |b| {
        b.iter(|| Simulation::new(population.clone()).run(100, &mut rng));
    });
}

pub fn benches() {
    #[cfg(not(feature = "smol_bench"))]
    let mut criterion: criterion::Criterion<_> = Criterion::default()
        .sample_size(100)
        .significance_level(0.1);
    #[cfg(feature = "smol_bench")]
    let mut criterion: criterion::Criterion<_> = {
        use core::time::Duration;
        Criterion::default()
            .measurement_time(Duration::from_millis(1))
            .sample_size(10)
            .nresamples(1)
            .without_plots()
            .configure_from_args()
    };
    bench_update(&mut criterion);
    bench_run(&mut criterion);
}

fn main() {
    benches();
    criterion::Criterion::default()
        .configure_from_args()
        .final_summary();
}
