use criterion::{criterion_group, criterion_main, Criterion};
use std::{hint::black_box, sync::Arc, time::Duration};
use tokio::runtime::Runtime;

use aegis_agent::{
    config::AgentConfig,
    db,
    domain::models::ConnectMethod,
    engine::{self, ThreadRandom},
    repository::{sqlite::SqliteSiteRepository, SiteRepository},
    service::AgentRunner,
};

fn bench_analyze(c: &mut Criterion) {
    let rng = ThreadRandom;
    let history = [None, Some(72), Some(68), Some(70)];

    c.bench_function("analyze_domain", |b| {
        b.iter(|| engine::analyze(black_box("aegisindex.com"), black_box(&history), &rng))
    });
}

fn bench_run_for_site(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let pool = rt.block_on(async {
        let pool = db::init_db("sqlite::memory:").await.expect("Failed to init db");
        SqliteSiteRepository::new(pool.clone())
            .create("aegisindex.com", ConnectMethod::Manual, "bench")
            .await
            .expect("Failed to create site");
        pool
    });
    let runner = Arc::new(AgentRunner::with_sqlite(pool, &AgentConfig::without_delays()));

    c.bench_function("run_for_site", |b| {
        b.to_async(&rt).iter(|| async {
            let result = runner
                .run_for_site(black_box("aegisindex.com"))
                .await
                .expect("Failed");

            black_box(result)
        });
    });
}

criterion_group! {
    name = benches;
    config = Criterion::default()
        .sample_size(20)
        .measurement_time(Duration::from_secs(10));
    targets = bench_analyze, bench_run_for_site
}

criterion_main!(benches);
