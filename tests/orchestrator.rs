use unveil::prelude::*;

const TICKERS: [&str; 4] = ["btc", "eth", "sol", "ada"];

fn ticker(i: usize) -> RevealDescriptor {
    RevealDescriptor::new(TICKERS[i])
        .initial([("opacity", 0.0), ("y", 100.0)])
        .target([("opacity", 1.0), ("y", 0.0)])
        .delay(Stagger::new(0.0, 200.0).delay_for(i))
        .duration(500.0)
        .timing(TimingFunction::Linear)
}

fn mount_tickers() -> (ManualClock, Orchestrator<ManualClock>) {
    let clock = ManualClock::new();
    let mut orch = Orchestrator::with_clock(clock.clone());
    for i in 0..TICKERS.len() {
        orch.register(ticker(i)).unwrap();
    }
    for id in TICKERS {
        assert_eq!(orch.report_trigger(&id.into()), TriggerOutcome::Scheduled);
    }
    (clock, orch)
}

fn value(orch: &Orchestrator<ManualClock>, id: &str, property: &str) -> f32 {
    orch.current_state(&id.into())
        .and_then(|state| state.get(property))
        .unwrap()
}

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-3
}

#[test]
fn test_staggered_tickers_over_time() {
    let (clock, mut orch) = mount_tickers();

    for id in TICKERS {
        assert_eq!(value(&orch, id, "opacity"), 0.0);
        assert_eq!(value(&orch, id, "y"), 100.0);
    }

    clock.set_elapsed(250);
    orch.pump();
    assert!(approx(value(&orch, "btc", "opacity"), 0.5));
    assert!(approx(value(&orch, "btc", "y"), 50.0));
    // eth started at 200ms
    assert!(approx(value(&orch, "eth", "opacity"), 0.1));
    assert_eq!(value(&orch, "sol", "opacity"), 0.0);
    assert_eq!(value(&orch, "ada", "opacity"), 0.0);

    clock.set_elapsed(1200);
    let report = orch.pump();
    for id in TICKERS {
        assert_eq!(value(&orch, id, "opacity"), 1.0);
        assert_eq!(value(&orch, id, "y"), 0.0);
        assert_eq!(orch.phase(&id.into()), Some(Phase::Settled));
    }
    assert!(report.changes.contains(ChangeFlags::PHASE_CHANGED));
    assert!(!orch.has_animations());
}

#[test]
fn test_stagger_completion_order() {
    let (clock, mut orch) = mount_tickers();

    clock.set_elapsed(2000);
    let report = orch.pump();

    let settled: Vec<&str> = report.settled().map(|id| id.as_str()).collect();
    assert_eq!(settled, TICKERS.to_vec());

    let started: Vec<&str> = report
        .events
        .iter()
        .filter(|e| e.kind == RevealEventKind::Started)
        .map(|e| e.id.as_str())
        .collect();
    assert_eq!(started, TICKERS.to_vec());

    // Events come out in deadline order
    let times: Vec<_> = report.events.iter().map(|e| e.at).collect();
    let mut sorted = times.clone();
    sorted.sort();
    assert_eq!(times, sorted);
}

#[test]
fn test_unregister_cancels_pending_reveal() {
    let clock = ManualClock::new();
    let mut orch = Orchestrator::with_clock(clock.clone());
    orch.register(
        RevealDescriptor::new("a")
            .initial([("opacity", 0.0)])
            .target([("opacity", 1.0)])
            .delay(100.0)
            .duration(200.0),
    )
    .unwrap();
    orch.report_trigger(&"a".into());

    clock.set_elapsed(50);
    assert!(orch.unregister(&"a".into()));
    assert!(orch.next_deadline().is_none());

    clock.set_elapsed(500);
    let report = orch.pump();
    assert!(report.events.is_empty());
    assert!(orch.current_state(&"a".into()).is_none());
    assert!(!orch.unregister(&"a".into()));
}

#[test]
fn test_reregistration_ignores_stale_timers() {
    let clock = ManualClock::new();
    let mut orch = Orchestrator::with_clock(clock.clone());
    let fade = || {
        RevealDescriptor::new("card")
            .initial([("opacity", 0.0)])
            .target([("opacity", 1.0)])
            .trigger(Trigger::OnViewportEnter(ViewportPolicy::once()))
            .delay(100.0)
            .duration(200.0)
    };

    let first = orch.register(fade()).unwrap();
    orch.report_trigger(&"card".into());
    clock.set_elapsed(50);
    orch.unregister(&"card".into());

    let second = orch.register(fade()).unwrap();
    assert_ne!(first, second);

    // The old registration's deadlines pass without effect
    clock.set_elapsed(500);
    assert!(orch.pump().events.is_empty());
    assert_eq!(orch.phase(&"card".into()), Some(Phase::Pending));
    assert_eq!(value(&orch, "card", "opacity"), 0.0);

    orch.report_trigger(&"card".into());
    clock.set_elapsed(800);
    let report = orch.pump();
    assert_eq!(report.settled().count(), 1);
    assert_eq!(value(&orch, "card", "opacity"), 1.0);
}

#[test]
fn test_once_reveal_is_idempotent() {
    let clock = ManualClock::new();
    let mut orch = Orchestrator::with_clock(clock.clone());
    orch.register(
        RevealDescriptor::new("feature-0")
            .initial([("opacity", 0.0), ("y", 50.0)])
            .target([("opacity", 1.0), ("y", 0.0)])
            .trigger(Trigger::OnViewportEnter(ViewportPolicy::once())),
    )
    .unwrap();
    let id = ElementId::from("feature-0");

    assert_eq!(orch.report_trigger(&id), TriggerOutcome::Scheduled);
    clock.advance(100);
    assert_eq!(orch.report_trigger(&id), TriggerOutcome::Ignored);

    clock.advance(1000);
    let report = orch.pump();
    assert_eq!(report.settled().count(), 1);

    // Leaving and re-entering changes nothing
    assert_eq!(orch.report_exit(&id), TriggerOutcome::Ignored);
    assert_eq!(orch.report_trigger(&id), TriggerOutcome::Ignored);
    clock.advance(1000);
    assert!(orch.pump().events.is_empty());
    assert_eq!(value(&orch, "feature-0", "opacity"), 1.0);
}

#[test]
fn test_replayable_reveal_conceals_and_replays() {
    let clock = ManualClock::new();
    let mut orch = Orchestrator::with_clock(clock.clone());
    orch.register(
        RevealDescriptor::new("chart-line")
            .initial([("pathLength", 0.0)])
            .target([("pathLength", 1.0)])
            .trigger(Trigger::OnViewportEnter(ViewportPolicy::always()))
            .duration(200.0),
    )
    .unwrap();
    let id = ElementId::from("chart-line");

    orch.report_trigger(&id);
    clock.advance(300);
    orch.pump();
    assert_eq!(orch.phase(&id), Some(Phase::Settled));

    assert_eq!(orch.report_exit(&id), TriggerOutcome::Scheduled);
    assert_eq!(orch.phase(&id), Some(Phase::Pending));
    clock.advance(300);
    let report = orch.pump();
    assert!(report
        .events
        .iter()
        .any(|e| e.kind == RevealEventKind::Concealed));
    assert_eq!(value(&orch, "chart-line", "pathLength"), 0.0);

    assert_eq!(orch.report_trigger(&id), TriggerOutcome::Scheduled);
    clock.advance(300);
    assert_eq!(orch.pump().settled().count(), 1);
    assert_eq!(value(&orch, "chart-line", "pathLength"), 1.0);
}

#[test]
fn test_zero_duration_is_rejected() {
    let mut orch = Orchestrator::with_clock(ManualClock::new());
    let err = orch
        .register(
            RevealDescriptor::new("instant")
                .initial([("opacity", 0.0)])
                .target([("opacity", 1.0)])
                .duration(0.0),
        )
        .unwrap_err();

    assert!(matches!(err, RevealError::InvalidDescriptor { .. }));
    assert!(!orch.is_registered(&"instant".into()));
    assert_eq!(orch.report_trigger(&"instant".into()), TriggerOutcome::Unknown);
}

#[test]
fn test_double_registration_keeps_first() {
    let mut orch = Orchestrator::with_clock(ManualClock::new());
    orch.register(ticker(0)).unwrap();

    let other = RevealDescriptor::new("btc")
        .initial([("scale", 0.0)])
        .target([("scale", 1.0)]);
    let err = orch.register(other).unwrap_err();
    assert!(matches!(err, RevealError::DoubleRegistration(ref id) if id.as_str() == "btc"));

    let state = orch.current_state(&"btc".into()).unwrap();
    assert_eq!(state.get("opacity"), Some(0.0));
    assert_eq!(state.get("scale"), None);
}

#[test]
fn test_every_timing_converges_to_target() {
    let timings = [
        TimingFunction::Linear,
        TimingFunction::EaseIn,
        TimingFunction::EaseOut,
        TimingFunction::EaseInOut,
        TimingFunction::CubicBezier(0.68, -0.6, 0.32, 1.6),
        TimingFunction::custom(|t| t * t * t),
    ];

    for (i, timing) in timings.into_iter().enumerate() {
        let clock = ManualClock::new();
        let mut orch = Orchestrator::with_clock(clock.clone());
        let id = format!("el-{i}");
        orch.register(
            RevealDescriptor::new(id.as_str())
                .initial([("opacity", 0.0), ("y", 37.5)])
                .target([("opacity", 1.0), ("y", 0.0)])
                .delay(33.0)
                .duration(257.0)
                .timing(timing),
        )
        .unwrap();

        clock.advance(17);
        orch.report_trigger(&id.as_str().into());
        clock.advance(33 + 257);
        orch.pump();

        let state = orch.current_state(&id.as_str().into()).unwrap();
        assert_eq!(state.get("opacity"), Some(1.0), "{}", id);
        assert_eq!(state.get("y"), Some(0.0), "{}", id);
    }
}

#[test]
fn test_state_holds_during_delay_window() {
    let (clock, orch) = mount_tickers();

    clock.set_elapsed(599);
    assert_eq!(value(&orch, "ada", "opacity"), 0.0);
    assert_eq!(value(&orch, "ada", "y"), 100.0);
    assert_eq!(orch.phase(&"ada".into()), Some(Phase::Triggered));
}

#[test]
fn test_settle_now_skips_animation() {
    let (clock, mut orch) = mount_tickers();

    assert!(orch.settle_now(&"ada".into()));
    assert_eq!(value(&orch, "ada", "opacity"), 1.0);
    assert_eq!(orch.phase(&"ada".into()), Some(Phase::Settled));

    clock.set_elapsed(2000);
    let report = orch.pump();
    assert!(report.events.iter().all(|e| e.id.as_str() != "ada"));
    assert!(!orch.settle_now(&"doge".into()));
}

#[test]
fn test_unregistered_element_renders_target() {
    let orch = Orchestrator::with_clock(ManualClock::new());
    let state = orch.state_or_target(&ticker(2));
    assert_eq!(state.get("opacity"), Some(1.0));
    assert_eq!(state.get("y"), Some(0.0));
}

#[test]
fn test_observations_drive_the_orchestrator() {
    let clock = ManualClock::new();
    let mut orch = Orchestrator::with_clock(clock.clone());
    let mut mounts = MountNotifier::new();
    let mut watcher = ViewportWatcher::new();

    orch.register(ticker(0)).unwrap();
    mounts.mounted("btc");
    orch.register(
        RevealDescriptor::new("cta")
            .initial([("scale", 0.9)])
            .target([("scale", 1.0)])
            .trigger(Trigger::OnViewportEnter(ViewportPolicy::once())),
    )
    .unwrap();
    watcher.watch("cta", Rect::new(0.0, 3000.0, 800.0, 400.0));

    let viewport = Rect::new(0.0, 0.0, 1280.0, 800.0);
    let mut observations = mounts.drain();
    observations.extend(watcher.poll(viewport));
    let outcomes: Vec<_> = observations.iter().map(|o| o.deliver(&mut orch)).collect();
    assert_eq!(outcomes, vec![TriggerOutcome::Scheduled]);
    assert_eq!(orch.phase(&"cta".into()), Some(Phase::Pending));

    for o in watcher.poll(viewport.offset(0.0, 2600.0)) {
        assert_eq!(o.deliver(&mut orch), TriggerOutcome::Scheduled);
    }
    assert_eq!(orch.phase(&"cta".into()), Some(Phase::Triggered));
}
