use std::time::Duration;

use deal_timeline::TimelineError;
use deal_timeline::api::{TimelineEngine, TimelineEngineConfig};
use deal_timeline::core::{Deal, DealEdit, DealId, DealStatus, MonthRange};
use deal_timeline::interaction::DragMode;
use deal_timeline::persistence::{
    DEFAULT_SAVE_DELAY, DealService, DealServiceConfig, FaultPlan, SaveRequest,
};
use tokio::time::Instant;

fn range(start: i32, end: i32) -> MonthRange {
    MonthRange::new(start, end).expect("valid range")
}

fn service() -> DealService {
    DealService::seeded(DealServiceConfig::default()).expect("seeded service")
}

#[tokio::test(start_paused = true)]
async fn save_echoes_range_after_fixed_delay() {
    let service = service();
    let started = Instant::now();
    let saved = service
        .save_range(DealId(1), range(4, 6))
        .await
        .expect("save");
    assert_eq!(saved, range(4, 6));
    assert!(started.elapsed() >= DEFAULT_SAVE_DELAY);

    let stored = service.get_by_id(DealId(1)).await.expect("deal");
    assert_eq!(stored.range, range(4, 6));
}

#[tokio::test(start_paused = true)]
async fn engine_commit_is_applied_before_save_resolves() {
    let mut engine =
        TimelineEngine::seeded(TimelineEngineConfig::new(1200.0)).expect("engine init");
    let service = DealService::seeded(engine_config_service()).expect("service");

    engine
        .pointer_down(DealId(2), DragMode::Move)
        .expect("pointer down");
    engine.pointer_move(300.0).expect("move");
    let request = engine.pointer_up().expect("commit");

    let handle = service.spawn_save(request);
    // Local state is already updated while the save is in flight.
    assert_eq!(engine.range(DealId(2)).expect("range"), range(4, 7));
    assert!(!handle.is_finished());

    let saved = handle.await.expect("join").expect("save");
    assert_eq!(saved, range(4, 7));
    assert_eq!(
        service.get_by_id(DealId(2)).await.expect("deal").range,
        range(4, 7)
    );
}

fn engine_config_service() -> DealServiceConfig {
    TimelineEngineConfig::new(1200.0)
        .with_save_delay_ms(40)
        .service_config()
}

#[tokio::test(start_paused = true)]
async fn save_for_missing_deal_fails() {
    let service = service();
    let err = service
        .save(SaveRequest {
            deal_id: DealId(404),
            range: range(0, 0),
        })
        .await
        .expect_err("missing deal");
    assert_eq!(err, TimelineError::DealNotFound { deal_id: DealId(404) });
}

#[tokio::test(start_paused = true)]
async fn crud_round_trip_uses_max_plus_one_ids() {
    let service = service();
    assert_eq!(service.get_all().await.len(), 8);

    let created = service
        .create(Deal::new(DealId(0), "Linear Team Plan", range(2, 3)))
        .await
        .expect("create");
    assert_eq!(created.id, DealId(9));

    let updated = service
        .update(
            DealId(9),
            DealEdit {
                status: Some(DealStatus::Closed),
                ..DealEdit::default()
            },
        )
        .await
        .expect("update");
    assert_eq!(updated.status, DealStatus::Closed);

    service.delete(DealId(9)).await.expect("delete");
    assert!(matches!(
        service.get_by_id(DealId(9)).await,
        Err(TimelineError::DealNotFound { .. })
    ));
    assert!(matches!(
        service.delete(DealId(9)).await,
        Err(TimelineError::DealNotFound { .. })
    ));
}

#[tokio::test(start_paused = true)]
async fn fault_plan_rejects_every_nth_save() {
    let config = DealServiceConfig::default()
        .with_delay(Duration::from_millis(10))
        .with_fault_plan(FaultPlan::every(2).expect("plan"));
    let service = DealService::seeded(config).expect("service");

    service
        .save_range(DealId(1), range(1, 2))
        .await
        .expect("first save");
    let err = service
        .save_range(DealId(1), range(5, 6))
        .await
        .expect_err("second save rejected");
    assert_eq!(
        err,
        TimelineError::PersistenceRejected {
            deal_id: DealId(1),
            attempt: 2
        }
    );
    assert_eq!(
        service.get_by_id(DealId(1)).await.expect("deal").range,
        range(1, 2)
    );
}

#[tokio::test(start_paused = true)]
async fn retry_recovers_from_rejected_save() {
    let config = DealServiceConfig::default().with_fault_plan(FaultPlan::every(1).expect("plan"));
    let service = DealService::seeded(config).expect("service");
    let request = SaveRequest {
        deal_id: DealId(3),
        range: range(0, 1),
    };
    let err = service
        .save_with_retry(request, 3)
        .await
        .expect_err("every attempt is rejected");
    assert!(matches!(
        err,
        TimelineError::PersistenceRejected { attempt: 3, .. }
    ));
    assert_eq!(service.save_attempts(), 3);

    let config = DealServiceConfig::default().with_fault_plan(FaultPlan::every(2).expect("plan"));
    let service = DealService::seeded(config).expect("service");
    service.save(request).await.expect("attempt 1 succeeds");
    let saved = service
        .save_with_retry(request, 2)
        .await
        .expect("attempt 2 rejected, attempt 3 succeeds");
    assert_eq!(saved, range(0, 1));
    assert_eq!(service.save_attempts(), 3);
}

#[test]
fn zero_interval_fault_plan_is_invalid() {
    assert!(matches!(
        FaultPlan::every(0),
        Err(TimelineError::InvalidData(_))
    ));
}
