use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use rentsplit_calculator::{
    Bill, BillScenario, CalculationWeights, MemoizedSplitter, Occupant, Room, split_bill,
    split_bill_detailed,
};

fn generate_scenario(room_count: usize) -> BillScenario {
    let rooms = (0..room_count)
        .map(|i| {
            let mut room = Room::new(format!("room_{i}"), 1.0 + (i % 4) as f64);
            for j in 0..(i % 4) {
                room.occupants.push(Occupant::new(format!("p_{i}_{j}"), ((i + j) % 31) as u32));
            }
            room
        })
        .collect();
    BillScenario::new(
        rooms,
        Bill { amount: 25_000.0, ..Bill::default() },
        CalculationWeights::default(),
    )
}

fn bench_split(c: &mut Criterion) {
    let mut group = c.benchmark_group("split_bill");

    for size in [10, 200, 5_000].iter() {
        let scenario = generate_scenario(*size);
        group.bench_with_input(BenchmarkId::new("plain", size), &scenario, |b, s| {
            b.iter(|| black_box(split_bill(&s.rooms, &s.bill, &s.weights)));
        });
        group.bench_with_input(BenchmarkId::new("detailed", size), &scenario, |b, s| {
            b.iter(|| black_box(split_bill_detailed(&s.rooms, &s.bill, &s.weights)));
        });
    }
    group.finish();
}

fn bench_memoized(c: &mut Criterion) {
    let scenario = generate_scenario(200);
    let mut splitter = MemoizedSplitter::new();

    c.bench_function("memoized_unchanged_200", |b| {
        b.iter(|| black_box(splitter.split(&scenario).len()));
    });
}

criterion_group!(benches, bench_split, bench_memoized);
criterion_main!(benches);
