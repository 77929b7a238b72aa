use criterion::{black_box, criterion_group, criterion_main, Criterion, BenchmarkId};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;
use coup_resolver::{Action, Challenge, CounterAction, CounterKind, Game, GameConfig, Outcome, Resolver};

fn resolve_rounds(depth: usize) {
    let mut rng = Pcg64::seed_from_u64(depth as u64);
    let mut game = black_box(Game::new(["P0", "P1", "P2", "P3", "P4", "P5"], &GameConfig::seeded(1)).unwrap());
    let mut resolver = Resolver::new();

    for _ in 0..100 {
        resolver.declare(Action::foreign_aid(0));
        for _ in 0..depth {
            let player_idx = rng.gen_range(1..6);
            if rng.gen_bool(0.5) {
                resolver.declare(CounterAction::new(CounterKind::BlockForeignAid, player_idx));
            } else {
                resolver.declare(Challenge::new(player_idx, 0));
            }
        }

        resolver.resolve(&mut game, Outcome::from(rng.gen_bool(0.5))).unwrap();
        resolver.sink_mut().clear();
    }
}

fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve_rounds");
    for depth in [0usize, 1, 2, 4, 8] {
        group.bench_with_input(BenchmarkId::from_parameter(depth), &depth, |b, &depth| {
            b.iter(|| resolve_rounds(depth))
        });
    }
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
