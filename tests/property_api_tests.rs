use deal_timeline::api::{TimelineEngine, TimelineEngineConfig};
use deal_timeline::core::{Deal, DealId, DealStore, LAST_MONTH, MonthGrid, MonthRange};
use deal_timeline::interaction::{DragMode, propose_range};
use proptest::prelude::*;

fn drag_mode() -> impl Strategy<Value = DragMode> {
    prop_oneof![
        Just(DragMode::Move),
        Just(DragMode::ResizeStart),
        Just(DragMode::ResizeEnd),
    ]
}

fn month_range() -> impl Strategy<Value = MonthRange> {
    (0i32..=11, 0i32..=11).prop_map(|(a, b)| {
        MonthRange::new(a.min(b), a.max(b)).expect("ordered bounds are valid")
    })
}

#[derive(Debug, Clone, Copy)]
enum StoreEdit {
    Untouched,
    SetRange(i32, i32),
    Recreate(u8),
}

fn store_edit() -> impl Strategy<Value = StoreEdit> {
    prop_oneof![
        Just(StoreEdit::Untouched),
        (-20i32..20, -20i32..20).prop_map(|(start, end)| StoreEdit::SetRange(start, end)),
        (0u8..=LAST_MONTH).prop_map(StoreEdit::Recreate),
    ]
}

proptest! {
    #[test]
    fn pixel_to_month_stays_on_track(
        pixel_offset in -1.0e7f64..1.0e7,
        track_width in 0.001f64..1.0e6
    ) {
        let grid = MonthGrid::new(track_width).expect("positive width");
        let month = grid.pixel_to_month(pixel_offset).expect("finite offset");
        prop_assert!(month <= LAST_MONTH);
    }

    #[test]
    fn double_mapping_is_idempotent_on_month_bucket(
        pixel_offset in -5_000.0f64..5_000.0,
        track_width in 12.0f64..10_000.0
    ) {
        let grid = MonthGrid::new(track_width).expect("positive width");
        let month = grid.pixel_to_month(pixel_offset).expect("map");
        let snapped = grid.month_to_pixel_offset(month);
        prop_assert_eq!(grid.pixel_to_month(snapped).expect("re-map"), month);
    }

    #[test]
    fn set_range_always_leaves_ordered_bounds(
        proposals in prop::collection::vec((-50i32..50, -50i32..50), 1..32)
    ) {
        let mut store = DealStore::from_deals([
            Deal::new(DealId(1), "Deal", MonthRange::new(0, 0).expect("range")),
        ])
        .expect("store");
        for (start, end) in proposals {
            let range = store.set_range(DealId(1), start, end).expect("clamp policy");
            prop_assert!(range.start_month() <= range.end_month());
            prop_assert!(range.end_month() <= LAST_MONTH);
            prop_assert_eq!(store.range(DealId(1)).expect("stored"), range);
        }
    }

    #[test]
    fn proposed_ranges_respect_mode_policy(
        origin in month_range(),
        mode in drag_mode(),
        dx in -3_000.0f64..3_000.0
    ) {
        let grid = MonthGrid::new(1200.0).expect("grid");
        let proposed = propose_range(origin, mode, dx, grid).expect("propose");
        prop_assert!(proposed.start_month() <= proposed.end_month());
        prop_assert!(proposed.end_month() <= LAST_MONTH);
        match mode {
            DragMode::Move => {
                prop_assert_eq!(proposed.duration_months(), origin.duration_months());
            }
            DragMode::ResizeStart => {
                prop_assert_eq!(proposed.end_month(), origin.end_month());
            }
            DragMode::ResizeEnd => {
                prop_assert_eq!(proposed.start_month(), origin.start_month());
            }
        }
    }

    #[test]
    fn gestures_never_break_range_invariant(
        origin in month_range(),
        moves in prop::collection::vec((drag_mode(), prop::collection::vec(-2_000.0f64..2_000.0, 1..6)), 1..8),
        track_width in 120.0f64..3_000.0
    ) {
        let store = DealStore::from_deals([Deal::new(DealId(7), "Deal", origin)]).expect("store");
        let mut engine = TimelineEngine::new(TimelineEngineConfig::new(track_width), store)
            .expect("engine init");
        for (mode, steps) in moves {
            engine.pointer_down(DealId(7), mode).expect("pointer down");
            for dx in steps {
                engine.pointer_move(dx).expect("move");
            }
            engine.pointer_up().expect("commit");
            let range = engine.range(DealId(7)).expect("range");
            prop_assert!(range.start_month() <= range.end_month());
            prop_assert!(range.end_month() <= LAST_MONTH);
        }
    }

    #[test]
    fn store_edits_mid_gesture_are_never_overwritten(
        origin in month_range(),
        gestures in prop::collection::vec(
            (drag_mode(), prop::collection::vec(-2_000.0f64..2_000.0, 1..4), store_edit()),
            1..8,
        ),
        track_width in 120.0f64..3_000.0
    ) {
        // A single deal, so a removed id is always handed out again on create.
        let store = DealStore::from_deals([Deal::new(DealId(1), "Deal", origin)]).expect("store");
        let mut engine = TimelineEngine::new(TimelineEngineConfig::new(track_width), store)
            .expect("engine init");
        for (mode, steps, edit) in gestures {
            engine.pointer_down(DealId(1), mode).expect("pointer down");
            for dx in &steps {
                engine.pointer_move(*dx).expect("move");
            }
            let edited = match edit {
                StoreEdit::Untouched => None,
                StoreEdit::SetRange(start, end) => {
                    Some(engine.set_range(DealId(1), start, end).expect("clamp policy"))
                }
                StoreEdit::Recreate(month) => {
                    engine.remove_deal(DealId(1)).expect("remove");
                    let id = engine
                        .create_deal(Deal::new(DealId(0), "Fresh", MonthRange::single(month)))
                        .expect("create");
                    prop_assert_eq!(id, DealId(1));
                    Some(MonthRange::single(month))
                }
            };
            for dx in steps {
                engine.pointer_move(-dx).expect("late move");
            }
            let request = engine.pointer_up();
            let range = engine.range(DealId(1)).expect("range");
            prop_assert!(range.start_month() <= range.end_month());
            prop_assert!(range.end_month() <= LAST_MONTH);
            match edited {
                Some(expected) => {
                    prop_assert_eq!(request, None);
                    prop_assert_eq!(range, expected);
                }
                None => {
                    let request = request.expect("untouched gesture commits");
                    prop_assert_eq!(request.range, range);
                }
            }
        }
    }
}
