use criterion::{Criterion, criterion_group, criterion_main};
use deal_timeline::api::{TimelineEngine, TimelineEngineConfig};
use deal_timeline::core::{DealId, MonthGrid, MonthRange};
use deal_timeline::interaction::{DragMode, propose_range};
use std::hint::black_box;

fn bench_pixel_to_month(c: &mut Criterion) {
    let grid = MonthGrid::new(1_920.0).expect("valid grid");

    c.bench_function("pixel_to_month_round_trip", |b| {
        b.iter(|| {
            let month = grid.pixel_to_month(black_box(1_234.5)).expect("map");
            let _ = grid.month_to_pixel_offset(black_box(month));
        })
    });
}

fn bench_propose_range(c: &mut Criterion) {
    let grid = MonthGrid::new(1_920.0).expect("valid grid");
    let origin = MonthRange::new(2, 6).expect("valid range");

    c.bench_function("propose_range_all_modes", |b| {
        b.iter(|| {
            for mode in [DragMode::Move, DragMode::ResizeStart, DragMode::ResizeEnd] {
                let _ = propose_range(black_box(origin), mode, black_box(437.0), grid)
                    .expect("propose");
            }
        })
    });
}

fn bench_drag_gesture_with_snapshot(c: &mut Criterion) {
    let mut engine =
        TimelineEngine::seeded(TimelineEngineConfig::new(1_920.0)).expect("engine init");

    c.bench_function("drag_gesture_64_moves_with_snapshot", |b| {
        b.iter(|| {
            engine
                .pointer_down(DealId(3), DragMode::Move)
                .expect("pointer down");
            for step in 0..64 {
                engine
                    .pointer_move(black_box(f64::from(step) * 7.5 - 240.0))
                    .expect("move");
                let _ = black_box(engine.snapshot());
            }
            let _ = engine.cancel_drag();
        })
    });
}

criterion_group!(
    benches,
    bench_pixel_to_month,
    bench_propose_range,
    bench_drag_gesture_with_snapshot
);
criterion_main!(benches);
