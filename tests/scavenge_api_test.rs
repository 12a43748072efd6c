// ==========================================
// ScavengeApi 集成测试
// ==========================================
// 测试目标: 验证边界校验、状态读取端口、派遣端口
// ==========================================

mod test_helpers;

use chrono::{TimeZone, Utc};
use scavenge_optimizer::api::{
    ApiError, GameSnapshot, GameStateReader, InMemoryGameState, NoOpDispatcher, PlanRequest,
    ScavengeApi, ScavengeDispatcher, TimeLimit,
};
use scavenge_optimizer::domain::{CarrierType, RunResult, TierLevel};
use scavenge_optimizer::engine::OptimizationMode;
use std::sync::Mutex;
use test_helpers::{raw_inventory, reference_tiers};

// ==========================================
// 测试用协作方
// ==========================================

struct FailingReader;

impl GameStateReader for FailingReader {
    fn read_snapshot(&self) -> anyhow::Result<GameSnapshot> {
        Err(anyhow::anyhow!("页面未加载"))
    }
}

#[derive(Default)]
struct RecordingDispatcher {
    dispatched: Mutex<Vec<(TierLevel, u64)>>,
}

impl ScavengeDispatcher for RecordingDispatcher {
    fn dispatch(&self, result: &RunResult) -> anyhow::Result<()> {
        self.dispatched
            .lock()
            .map_err(|_| anyhow::anyhow!("锁已中毒"))?
            .push((result.level, result.capacity));
        Ok(())
    }
}

struct RejectingDispatcher;

impl ScavengeDispatcher for RejectingDispatcher {
    fn dispatch(&self, _result: &RunResult) -> anyhow::Result<()> {
        anyhow::bail!("部队已被占用")
    }
}

fn snapshot() -> GameSnapshot {
    let mut tiers = reference_tiers();
    tiers[3] = tiers[3].with_active(true);
    GameSnapshot {
        carriers: raw_inventory(&[("heavy", 1000), ("spear", 400)]),
        tiers,
        world_speed: 1.0,
    }
}

// ==========================================
// 边界校验
// ==========================================

#[test]
fn test_negative_count_is_rejected() {
    let api = ScavengeApi::with_reference_config().unwrap();
    let request = PlanRequest::new(raw_inventory(&[("heavy", 10), ("axe", -5)]), 1.0, "per_run");

    match api.plan(&request) {
        Err(ApiError::NegativeCarrierCount { carrier, count }) => {
            assert_eq!(carrier, "axe");
            assert_eq!(count, -5);
        }
        other => panic!("unexpected: {:?}", other),
    }
}

#[test]
fn test_no_carriers_entered() {
    let api = ScavengeApi::with_reference_config().unwrap();
    let request = PlanRequest::new(raw_inventory(&[("heavy", 0)]), 1.0, "per_run");
    assert!(matches!(api.plan(&request), Err(ApiError::NoCarriersEntered)));
}

#[test]
fn test_invalid_world_speed_surfaces_engine_error() {
    let api = ScavengeApi::with_reference_config().unwrap();
    let request = PlanRequest::new(raw_inventory(&[("heavy", 10)]), 0.0, "per_run");
    assert!(matches!(api.plan(&request), Err(ApiError::EngineError(_))));
}

#[test]
fn test_time_limit_is_applied() {
    let api = ScavengeApi::with_reference_config().unwrap();
    let request = PlanRequest::new(raw_inventory(&[("heavy", 5000)]), 1.0, "per-hour")
        .with_time_limit(1, 30);
    let plan = api.plan(&request).unwrap();

    assert_eq!(plan.max_duration_secs, Some(5_400.0));
    assert!(!plan.is_empty());
    for result in &plan.results {
        assert!(result.duration_secs <= 5_400.0 + 1e-6);
    }
}

#[test]
fn test_zero_time_limit_means_unlimited() {
    let api = ScavengeApi::with_reference_config().unwrap();
    let request = PlanRequest::new(raw_inventory(&[("heavy", 1000)]), 1.0, "per_hour")
        .with_time_limit(0, 0);
    let plan = api.plan(&request).unwrap();

    assert_eq!(plan.max_duration_secs, None);
    assert_eq!(plan.allocation.amounts(), vec![0.0, 0.0, 0.0, 50_000.0]);
}

// ==========================================
// 端口
// ==========================================

#[test]
fn test_plan_from_reader_skips_running_tier() {
    let api = ScavengeApi::with_reference_config().unwrap();
    let reader = InMemoryGameState::new(snapshot());

    let plan = api
        .plan_from_reader(&reader, "per_hour", None, Some(TimeLimit::new(0, 0)))
        .unwrap();

    assert_eq!(plan.mode, OptimizationMode::PerHour);
    assert_eq!(plan.total_capacity, 60_000);
    assert!(plan.result_for(4).is_none());
    assert_eq!(plan.results.len(), 1);
    assert_eq!(plan.results[0].level, 3);
}

#[test]
fn test_reader_failure_is_wrapped() {
    let api = ScavengeApi::with_reference_config().unwrap();
    match api.plan_from_reader(&FailingReader, "per_run", None, None) {
        Err(ApiError::StateReadError(reason)) => assert!(reason.contains("页面未加载")),
        other => panic!("unexpected: {:?}", other),
    }
}

#[test]
fn test_dispatch_level_returns_receipt() {
    let api = ScavengeApi::with_reference_config().unwrap();
    let reader = InMemoryGameState::new(snapshot());
    let plan = api.plan_from_reader(&reader, "per_run", None, None).unwrap();

    let dispatcher = RecordingDispatcher::default();
    let now = Utc.with_ymd_and_hms(2026, 3, 1, 8, 0, 0).unwrap();
    let receipt = api.dispatch_level(&plan, 2, &dispatcher, now).unwrap();

    let result = plan.result_for(2).unwrap();
    assert_eq!(receipt.level, 2);
    assert_eq!(receipt.carriers, result.carriers);
    assert_eq!(receipt.dispatched_at, now);
    assert!(receipt.returns_at.unwrap() > now);
    assert_eq!(
        dispatcher.dispatched.lock().unwrap().as_slice(),
        &[(2, result.capacity)]
    );
}

#[test]
fn test_dispatch_errors() {
    let api = ScavengeApi::with_reference_config().unwrap();
    let reader = InMemoryGameState::new(snapshot());
    let plan = api.plan_from_reader(&reader, "per_run", None, None).unwrap();
    let now = Utc.with_ymd_and_hms(2026, 3, 1, 8, 0, 0).unwrap();

    // 进行中的等级没有结果
    assert!(matches!(
        api.dispatch_level(&plan, 4, &NoOpDispatcher, now),
        Err(ApiError::LevelNotFound(4))
    ));

    match api.dispatch_level(&plan, 1, &RejectingDispatcher, now) {
        Err(ApiError::DispatchError { level, reason }) => {
            assert_eq!(level, 1);
            assert!(reason.contains("部队已被占用"));
        }
        other => panic!("unexpected: {:?}", other),
    }
}

#[test]
fn test_noop_dispatcher_accepts_everything() {
    let api = ScavengeApi::with_reference_config().unwrap();
    let request = PlanRequest::new(raw_inventory(&[("light", 100)]), 1.0, "equal_duration");
    let plan = api.plan(&request).unwrap();
    let level = plan.results[0].level;

    let receipt = api
        .dispatch_level(&plan, level, &NoOpDispatcher, Utc::now())
        .unwrap();
    assert!(receipt.carriers.available(&CarrierType::from("light")) > 0);
}

#[test]
fn test_dispatch_on_extremely_slow_world_does_not_panic() {
    let api = ScavengeApi::with_reference_config().unwrap();
    let request = PlanRequest::new(raw_inventory(&[("heavy", 1000)]), 1e-15, "per_hour");
    let plan = api.plan(&request).unwrap();
    let now = Utc.with_ymd_and_hms(2026, 3, 1, 8, 0, 0).unwrap();

    let receipt = api
        .dispatch_level(&plan, 4, &NoOpDispatcher, now)
        .unwrap();

    assert_eq!(receipt.level, 4);
    assert_eq!(receipt.dispatched_at, now);
    assert_eq!(receipt.returns_at, None);
}

#[test]
fn test_reader_with_duplicate_levels_is_rejected() {
    let api = ScavengeApi::with_reference_config().unwrap();
    let mut state = snapshot();
    state.tiers = vec![
        scavenge_optimizer::domain::Tier::new(4, 0.75),
        scavenge_optimizer::domain::Tier::new(4, 0.10),
    ];
    let reader = InMemoryGameState::new(state);

    assert!(matches!(
        api.plan_from_reader(&reader, "per_run", None, None),
        Err(ApiError::EngineError(
            scavenge_optimizer::engine::EngineError::DuplicateTierLevel(4)
        ))
    ));
}

#[test]
fn test_time_limit_hours_are_capped() {
    let api = ScavengeApi::with_reference_config().unwrap();
    let request = PlanRequest::new(raw_inventory(&[("heavy", 1000)]), 1.0, "per_hour")
        .with_time_limit(24, 0);
    assert!(matches!(api.plan(&request), Err(ApiError::InvalidInput(_))));
}
