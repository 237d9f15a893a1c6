//! Micro-benchmark: cost of one diff-and-emit tick as the number of blocks
//! grows. Mirrors the teacher's bench suite (`search_bench`, `wrap_bench`)
//! in spirit, not subject: this times the render engine's hottest path
//! instead of an editor's search/wrap routines.

use std::sync::Arc;

use criterion::{Criterion, criterion_group, criterion_main};
use live_render::{RenderEngine, WriteQueue};
use live_state::BlockStore;
use live_text::StyledData;

fn identity() -> Arc<dyn Fn(&String) -> StyledData + Send + Sync> {
    Arc::new(|s: &String| StyledData::plain(s.clone()))
}

fn bench_tick_with_n_blocks(c: &mut Criterion, n: usize) {
    c.bench_function(&format!("render_tick/{n}_blocks"), |b| {
        b.iter_batched(
            || {
                let mut store: BlockStore<usize, String> = BlockStore::new();
                for i in 0..n {
                    store.register(i, format!("block {i}"), identity());
                }
                let queue: WriteQueue<()> = WriteQueue::new();
                (store, queue, RenderEngine::new(), false)
            },
            |(mut store, mut queue, mut engine, mut above_paint_done)| {
                // First tick paints everything (Phase C); representative of
                // steady-state cost once warmed, we immediately update every
                // block and tick again to exercise Phase B.
                engine.tick(&mut store, &mut queue, 80, &mut above_paint_done);
                for i in 0..n {
                    store.set_state(&i, format!("block {i} updated"));
                }
                engine.tick(&mut store, &mut queue, 80, &mut above_paint_done);
            },
            criterion::BatchSize::SmallInput,
        )
    });
}

fn bench_renderer(c: &mut Criterion) {
    for n in [1, 10, 50, 200] {
        bench_tick_with_n_blocks(c, n);
    }
}

criterion_group!(benches, bench_renderer);
criterion_main!(benches);
