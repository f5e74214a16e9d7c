mod common;

use common::*;
use oven_core::traits::Direction;
use oven_core::{Duration, Event, PauseSnapshot, ProcessState, StageId};

const STAGE1: ProcessState = ProcessState::Stage(StageId::First);
const STAGE2: ProcessState = ProcessState::Stage(StageId::Second);
const STAGE3: ProcessState = ProcessState::Stage(StageId::Third);

#[test]
fn test_new_oven_is_idle_and_untouched() {
    let oven = oven();
    assert_eq!(oven.state(), ProcessState::Idle);
    assert_eq!(oven.state_name(), "Idle");
    assert_eq!(oven.display_state(), "Detenido");
    assert!(!oven.heater_on());
    assert!(oven.heater().run_log.is_empty());
    assert_eq!(oven.pause_snapshot(), None);
}

#[test]
fn test_stop_turns_everything_off_from_every_running_state() {
    for target in [ProcessState::Preheating, STAGE1, STAGE2, STAGE3] {
        let mut oven = oven_with_temps([Some(20.0); 3]);
        oven.heater_mut().pv = Some(30.0);

        match target {
            ProcessState::Preheating => oven.event_preheat(secs(0)),
            ProcessState::Stage(stage) => {
                oven.set_pause_snapshot(Some(PauseSnapshot::stage(stage, Duration::ZERO)), secs(0))
            }
            ProcessState::Idle => unreachable!(),
        }
        oven.tick(secs(1));
        assert_eq!(oven.state(), target);
        assert!(oven.heater_on());
        assert!(fans(&oven).iter().any(|on| *on), "fans should run in {:?}", target);

        oven.event_stop(secs(2));

        assert_eq!(oven.state(), ProcessState::Idle);
        assert!(!oven.heater_on());
        assert_eq!(fans(&oven), [false; 3]);
        assert!(!oven.rotation_active());
    }
}

#[test]
fn test_fresh_start_runs_stages_in_order() {
    let mut oven = oven();
    oven.set_config(&short_config());
    oven.event_start(secs(0));

    let mut visited = vec![oven.state()];
    let mut t = 0;
    while t <= 200_000 {
        oven.tick(ms(t));
        if visited.last() != Some(&oven.state()) {
            visited.push(oven.state());
        }
        t += 100;
    }

    assert_eq!(visited, vec![STAGE1, STAGE2, STAGE3, ProcessState::Idle]);
    assert_eq!(oven.rotation().forward_starts, 3);
    assert!(!oven.heater_on());
}

#[test]
fn test_stage_timer_boundary_is_strict() {
    let mut oven = oven();
    oven.set_config(&short_config());
    oven.event_start(secs(0));

    oven.tick(secs(10));
    assert_eq!(oven.state(), STAGE1);

    oven.tick(ms(10_001));
    assert_eq!(oven.state(), STAGE2);
    assert_eq!(oven.current_stage_elapsed(ms(10_001)), Some(Duration::ZERO));
}

#[test]
fn test_stage_entry_sets_heater_and_rotation() {
    let mut oven = oven();
    oven.event_start(secs(0));

    assert_eq!(oven.state(), STAGE1);
    assert_eq!(oven.heater().sv, Some(60.0));
    assert_eq!(oven.heater().run_log, vec![true]);
    assert_eq!(oven.rotation_direction(), Some(Direction::Forward));
    assert_eq!(oven.target_temp(), Some(60.0));
}

#[test]
fn test_completing_stage_regulates_toward_previous_target() {
    let mut oven = oven_with_temps([Some(50.0); 3]);
    let mut config = short_config();
    config.stage_mut(StageId::First).temp = 40.0;
    config.stage_mut(StageId::Second).temp = 90.0;
    oven.set_config(&config);
    oven.event_start(secs(0));

    oven.tick(secs(11));
    assert_eq!(oven.state(), STAGE2);
    assert_eq!(oven.heater().sv, Some(90.0));
    // 50 °C is inside the 40 °C stage's dead zone, so the fans stay off
    assert_eq!(fans(&oven), [false; 3]);

    oven.tick(secs(12));
    assert_eq!(fans(&oven), [true; 3]);
}

#[test]
fn test_pause_then_start_resumes_without_reentry() {
    let mut oven = oven();
    oven.set_config(&short_config());
    oven.event_start(secs(0));
    oven.tick(ms(10_500));
    assert_eq!(oven.state(), STAGE2);

    oven.event_pause(ms(40_500));
    assert_eq!(oven.state(), ProcessState::Idle);
    let snapshot = PauseSnapshot::stage(StageId::Second, Duration::from_secs(30));
    assert_eq!(oven.pause_snapshot(), Some(snapshot));
    assert_eq!(oven.persistence().stored_pause(), Some(snapshot));

    oven.tick(secs(60));
    oven.event_start(secs(100));
    assert_eq!(oven.state(), STAGE2);
    assert_eq!(oven.pause_snapshot(), None);
    assert_eq!(
        oven.current_stage_elapsed(secs(100)),
        Some(Duration::from_secs(30))
    );

    let forward_starts = oven.rotation().forward_starts;
    let run_calls = oven.heater().run_log.len();

    oven.tick(secs(100));
    oven.tick(ms(100_050));

    assert_eq!(oven.state(), STAGE2);
    assert_eq!(oven.rotation().forward_starts, forward_starts);
    assert_eq!(oven.heater().run_log.len(), run_calls);
    assert_eq!(
        oven.current_stage_elapsed(ms(100_050)),
        Some(Duration::from_millis(30_050))
    );
}

#[test]
fn test_pause_while_preheating_resumes_preheat() {
    let mut oven = oven();
    oven.heater_mut().pv = Some(30.0);
    oven.event_preheat(secs(0));
    oven.event_pause(secs(5));

    assert_eq!(oven.pause_snapshot(), Some(PauseSnapshot::preheating()));

    oven.event_start(secs(10));
    assert_eq!(oven.state(), ProcessState::Preheating);
    assert_eq!(oven.heater().sv, Some(60.0));
}

#[test]
fn test_pause_while_idle_does_nothing() {
    let mut oven = oven();
    oven.event_pause(secs(1));

    assert_eq!(oven.state(), ProcessState::Idle);
    assert_eq!(oven.pause_snapshot(), None);
    assert!(oven.persistence().writes.is_empty());
}

#[test]
fn test_start_and_preheat_ignored_while_running() {
    let mut oven = oven();
    oven.set_config(&short_config());
    oven.event_start(secs(0));
    oven.tick(secs(11));
    assert_eq!(oven.state(), STAGE2);

    oven.event_start(secs(12));
    oven.event_preheat(secs(12));
    assert_eq!(oven.state(), STAGE2);
    assert_eq!(oven.current_stage_elapsed(secs(12)), Some(Duration::from_secs(1)));
}

#[test]
fn test_stop_discards_held_and_stored_snapshot() {
    let mut oven = oven();
    oven.event_start(secs(0));
    oven.event_pause(secs(30));
    assert!(oven.persistence().stored_pause().is_some());

    oven.event_stop(secs(31));
    assert_eq!(oven.pause_snapshot(), None);
    assert_eq!(oven.persistence().stored_pause(), None);

    oven.event_start(secs(40));
    assert_eq!(oven.state(), STAGE1);
    assert_eq!(oven.current_stage_elapsed(secs(40)), Some(Duration::ZERO));
}

#[test]
fn test_preheat_exits_when_target_reached() {
    let mut oven = oven();
    let mut config = short_config();
    config.preheat_temp = 60.0;
    oven.set_config(&config);

    oven.heater_mut().pv = Some(59.0);
    oven.event_preheat(secs(0));
    assert_eq!(oven.heater().sv, Some(60.0));

    oven.tick(secs(1));
    assert_eq!(oven.state(), ProcessState::Preheating);
    // Chamber 3 reads 49 °C, below the band
    assert!(oven.fan_on(2));

    oven.heater_mut().pv = Some(60.0);
    let serviced = oven.heater().serviced;
    oven.tick(secs(2));

    assert_eq!(oven.state(), ProcessState::Idle);
    assert!(!oven.heater_on());
    // No regulation after the exit: chamber 3 now reads 50 °C and would
    // otherwise have been switched back on
    assert_eq!(fans(&oven), [false; 3]);
    assert_eq!(oven.heater().serviced, serviced);
}

#[test]
fn test_preheat_without_any_reading_keeps_heating() {
    let mut oven = oven_with_temps([None; 3]);
    oven.heater_mut().pv = None;
    oven.event_preheat(secs(0));

    oven.tick(secs(1));
    assert_eq!(oven.state(), ProcessState::Preheating);
    assert_eq!(fans(&oven), [false; 3]);
}

#[test]
fn test_oven_temp_projects_controller_reading() {
    let mut oven = oven_with_temps([Some(1.0), Some(2.0), Some(3.0)]);
    oven.heater_mut().pv = Some(50.0);

    assert_eq!(oven.oven_temp(secs(0)), Some(50.0));
    assert_eq!(oven.chamber_temp(0, secs(0)), Some(60.0));
    assert_eq!(oven.chamber_temp(1, secs(0)), Some(55.0));
    assert_eq!(oven.chamber_temp(2, secs(0)), Some(40.0));
}

#[test]
fn test_oven_temp_falls_back_to_coldest_chamber() {
    let mut oven = oven_with_temps([Some(30.0), Some(24.5), Some(28.0)]);
    oven.heater_mut().pv = None;
    assert_eq!(oven.oven_temp(secs(0)), Some(24.5));

    let mut oven = oven_with_temps([Some(30.0), None, Some(28.0)]);
    oven.heater_mut().pv = None;
    assert_eq!(oven.oven_temp(secs(0)), None);
}

#[test]
fn test_forced_chamber_temps_can_be_cleared() {
    let mut oven = oven_with_temps([Some(30.0); 3]);
    oven.force_chamber_temp(1, 99.0);
    oven.force_chamber_temp(7, 99.0);
    assert_eq!(oven.chamber_temp(1, secs(0)), Some(99.0));

    oven.unforce_chamber_temps();
    assert_eq!(oven.chamber_temp(1, secs(0)), Some(30.0));
    assert_eq!(oven.chamber_temp(7, secs(0)), None);
}

#[test]
fn test_idle_keeps_fans_off() {
    let mut oven = oven_with_temps([Some(0.0); 3]);
    oven.chamber_mut(0).unwrap().fan_mut().on = true;
    oven.tick(secs(1));
    assert_eq!(fans(&oven), [false; 3]);
}

#[test]
fn test_rotation_override_applies_outside_stages_only() {
    let mut oven = oven();

    oven.handle(Event::RotateBackward, secs(0));
    oven.tick(secs(1));
    assert_eq!(oven.rotation_direction(), Some(Direction::Backward));

    oven.handle(Event::RotateBackwardStop, secs(2));
    oven.tick(secs(2));
    assert_eq!(oven.rotation_direction(), None);

    oven.heater_mut().pv = Some(30.0);
    oven.event_preheat(secs(3));
    oven.event_rotate_forward();
    oven.tick(secs(4));
    assert_eq!(oven.rotation_direction(), Some(Direction::Forward));
    oven.event_rotate_forward_stop();
    oven.tick(secs(5));
    assert!(!oven.rotation_active());

    oven.event_stop(secs(6));
    oven.event_start(secs(6));
    oven.event_rotate_backward();
    oven.tick(secs(7));
    assert_eq!(oven.rotation_direction(), Some(Direction::Forward));
}

#[test]
fn test_heater_service_runs_only_while_heating() {
    let mut oven = oven();
    oven.tick(secs(1));
    assert_eq!(oven.heater().serviced, 0);

    oven.event_start(secs(2));
    oven.tick(secs(3));
    oven.tick(secs(4));
    assert_eq!(oven.heater().serviced, 2);
}

#[test]
fn test_set_config_reapplies_setpoint_and_keeps_progress() {
    let mut oven = oven();
    oven.event_start(secs(0));
    oven.tick(secs(60));

    let mut config = oven.config();
    config.stage_mut(StageId::First).temp = 72.0;
    config.stage_mut(StageId::First).duration = Duration::from_secs(90);
    oven.set_config(&config);

    assert_eq!(oven.heater().sv, Some(72.0));
    assert_eq!(oven.config(), config);
    assert_eq!(oven.current_stage_elapsed(secs(60)), Some(Duration::from_secs(60)));

    oven.tick(ms(90_001));
    assert_eq!(oven.state(), STAGE2);
}

#[test]
fn test_set_config_while_idle_leaves_setpoint_alone() {
    let mut oven = oven();
    oven.set_config(&short_config());
    assert_eq!(oven.heater().sv, None);

    oven.set_preheat_temp(45.0);
    assert_eq!(oven.config().preheat_temp, 45.0);
    assert_eq!(oven.heater().sv, None);
}

#[test]
fn test_handle_dispatches_process_events() {
    let mut oven = oven();
    oven.heater_mut().pv = Some(30.0);

    oven.handle(Event::Preheat, secs(0));
    assert_eq!(oven.state(), ProcessState::Preheating);
    oven.handle(Event::Stop, secs(1));
    assert_eq!(oven.state(), ProcessState::Idle);
    oven.handle(Event::Start, secs(2));
    assert_eq!(oven.state(), STAGE1);
    oven.handle(Event::Pause, secs(3));
    assert_eq!(oven.state(), ProcessState::Idle);
    assert!(oven.pause_snapshot().is_some());
}

#[test]
fn test_status_reports_running_stage() {
    let mut oven = oven();
    oven.heater_mut().pv = Some(40.0);
    oven.event_start(secs(0));

    let status = oven.status(secs(120));
    assert_eq!(status.state, STAGE1);
    assert!(status.heater_on);
    assert_eq!(status.oven_temp, Some(40.0));
    assert_eq!(status.chamber_temps, [Some(50.0), Some(45.0), Some(30.0)]);
    assert_eq!(status.rotation, Some(Direction::Forward));
    assert_eq!(status.stage_elapsed, Some(Duration::from_secs(120)));
    assert_eq!(status.stage_remaining(), Some(Duration::from_mins(28)));
    assert!(!status.paused);
    assert_eq!(status.display_state(), "Etapa Inicial");
}
