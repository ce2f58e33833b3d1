//! Benchmarks for permission queries
//!
//! Run with: cargo bench -p colony-core --bench permission_check

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;
use std::sync::Arc;

use colony_core::{
    models::{Action, PlayerId, Rank},
    service::{Identity, ProfileCache},
    AuthorizationService, PermissionView,
};

fn colony_with_players(count: usize) -> (AuthorizationService, Vec<PlayerId>) {
    let ids: Vec<PlayerId> = (0..count).map(|_| PlayerId::new()).collect();
    let cache: ProfileCache = ids
        .iter()
        .enumerate()
        .map(|(i, id)| Identity::new(*id, format!("player_{i}")))
        .collect();
    let mut colony = AuthorizationService::new(Arc::new(cache));
    for (i, id) in ids.iter().enumerate() {
        colony.set_player_rank(id, Rank::ALL[1 + i % (Rank::COUNT - 1)]);
    }
    (colony, ids)
}

/// Benchmark: rank lookup plus flag test for a registered player
fn bench_player_has_permission(c: &mut Criterion) {
    let (colony, ids) = colony_with_players(64);
    let id = ids[17];

    c.bench_function("player_has_permission", |b| {
        b.iter(|| black_box(colony.player_has_permission(black_box(&id), Action::SendMessages)))
    });
}

/// Benchmark: message recipients for growing colonies
fn bench_message_players(c: &mut Criterion) {
    let mut group = c.benchmark_group("message_players");
    for size in [16, 256, 4096] {
        let (colony, _) = colony_with_players(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &colony, |b, colony| {
            b.iter(|| black_box(colony.message_players()))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_player_has_permission, bench_message_players);
criterion_main!(benches);
