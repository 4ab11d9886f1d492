use criterion::{Criterion, black_box, criterion_group, criterion_main};
use xrr::qgrid::linspace;
use xrr::{Layer, Model, Resolution, RoughnessModel, SimulationRequest, Stack, simulate};

fn multilayer(periods: usize) -> Vec<Layer> {
    let mut layers = Vec::with_capacity(2 * periods + 1);
    for i in 0..periods {
        layers.push(Layer::new(format!("w{i}"), "W", 12.0, 3.0, 19.3));
        layers.push(Layer::new(format!("si{i}"), "Si", 25.0, 3.5, 2.33));
    }
    layers.push(Layer::new("sub", "SiO2", 0.0, 4.0, 2.2));
    layers
}

fn bench_parratt(c: &mut Criterion) {
    let q = linspace(0.005, 0.6, 1000);

    for periods in [1, 10, 50] {
        let stack = Stack::from_request(&multilayer(periods), 0.0).unwrap();
        c.bench_function(&format!("parratt_{}_layers_1000_q", 2 * periods + 1), |b| {
            b.iter(|| {
                black_box(xrr::parratt::reflectivity(
                    black_box(&stack),
                    black_box(&q),
                    RoughnessModel::NevotCroce,
                ))
            });
        });
    }
}

fn bench_simulate_request(c: &mut Criterion) {
    let mut req = SimulationRequest::new(multilayer(10));
    req.model = Model::Parratt;
    req.points = 500;
    req.q_max = 0.6;

    c.bench_function("simulate_request_21_layers", |b| {
        b.iter(|| black_box(simulate(black_box(&req)).unwrap()));
    });

    req.resolution = Some(Resolution::Relative { fraction: 0.05 });
    c.bench_function("simulate_request_21_layers_smeared", |b| {
        b.iter(|| black_box(simulate(black_box(&req)).unwrap()));
    });

    let synthetic = SimulationRequest::new(multilayer(1));
    c.bench_function("simulate_synthetic_100", |b| {
        b.iter(|| black_box(simulate(black_box(&synthetic)).unwrap()));
    });
}

criterion_group!(benches, bench_parratt, bench_simulate_request);
criterion_main!(benches);
