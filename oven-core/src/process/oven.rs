//! The oven process controller
//!
//! Flow: `Idle → Preheating → Idle` for warm-up, and
//! `Idle → Stage1 → Stage2 → Stage3 → Idle` for a cure run. A run can be
//! paused at any point and resumed later, also across a power cycle.
//!
//! Entry actions (heater setpoint and run flag, fans, rotation, stage timer)
//! run exactly once, at the moment of the transition. [`Oven::tick`] only
//! performs the per-state control work.

use embedded_hal::delay::DelayNs;
use log::{debug, error, info, warn};
use oven_hal::StorageError;

use super::chamber::Chamber;
use super::status::OvenStatus;
use crate::config::{Config, STAGE_COUNT};
use crate::control::{Hysteresis, HysteresisAction};
use crate::safety::{HeaterWatchdog, WatchdogVerdict, HEATER_RECOVERY_PAUSE_MS};
use crate::state::{Event, PauseSnapshot, ProcessState, RotationMode, StageId};
use crate::time::{Duration, Timestamp};
use crate::timer::Timer;
use crate::traits::{Direction, HeaterController, Output, Persistence, Rotation, TempSensor};
use crate::Celsius;

/// Number of fan-regulated chambers
pub const CHAMBER_COUNT: usize = 3;

/// Offset of each chamber from the controller's process value
///
/// The controller probe sits between the chambers; these offsets were
/// measured on the real oven.
pub const CHAMBER_PV_OFFSETS: [Celsius; CHAMBER_COUNT] = [10.0, 5.0, -10.0];

/// Period of the progress snapshot written while a run is active
pub const SNAPSHOT_INTERVAL: Duration = Duration::from_mins(5);

/// Oven process controller
pub struct Oven<S, F, R, H, P, D> {
    chambers: [Chamber<S, F>; CHAMBER_COUNT],
    rotation: R,
    heater: H,
    persistence: P,
    delay: D,

    config: Config,
    hysteresis: Hysteresis,
    state: ProcessState,
    rotation_mode: RotationMode,
    /// Snapshot waiting for `event_start`
    pause: Option<PauseSnapshot>,
    /// Snapshot last written to persistence
    stored_pause: Option<PauseSnapshot>,
    stage_timers: [Timer; STAGE_COUNT],
    snapshot_timer: Timer,
    watchdog: HeaterWatchdog,
}

impl<S, F, R, H, P, D> Oven<S, F, R, H, P, D>
where
    S: TempSensor,
    F: Output,
    R: Rotation,
    H: HeaterController,
    P: Persistence,
    D: DelayNs,
{
    /// Create an idle oven with the factory configuration
    ///
    /// No hardware is touched. Call [`Oven::restore`] at boot to load the
    /// stored configuration and resume an interrupted run.
    pub fn new(
        chambers: [Chamber<S, F>; CHAMBER_COUNT],
        rotation: R,
        heater: H,
        persistence: P,
        delay: D,
    ) -> Self {
        let config = Config::default();
        Self {
            chambers,
            rotation,
            heater,
            persistence,
            delay,
            config,
            hysteresis: Hysteresis::new(config.chamber_temp_hist),
            state: ProcessState::Idle,
            rotation_mode: RotationMode::Normal,
            pause: None,
            stored_pause: None,
            stage_timers: config.stages.map(|stage| Timer::new(stage.duration)),
            snapshot_timer: Timer::new(SNAPSHOT_INTERVAL),
            watchdog: HeaterWatchdog::new(),
        }
    }

    // ---- Configuration ----

    /// Replace the configuration
    ///
    /// Stage timers keep their reference point, so a running stage is
    /// measured against the new length. The heater setpoint is re-applied
    /// immediately.
    pub fn set_config(&mut self, config: &Config) {
        self.config = *config;
        self.hysteresis = Hysteresis::new(config.chamber_temp_hist);
        for (timer, stage) in self.stage_timers.iter_mut().zip(config.stages.iter()) {
            timer.set_period(stage.duration);
        }
        self.apply_heater_setpoint();
    }

    pub fn config(&self) -> Config {
        self.config
    }

    /// Change the preheat target without touching the heater
    pub fn set_preheat_temp(&mut self, temp: Celsius) {
        self.config.preheat_temp = temp;
    }

    /// Write the current configuration, keeping whatever snapshot is stored
    pub fn save_config(&mut self) -> Result<(), StorageError> {
        self.persistence
            .persist(&self.config, self.stored_pause.as_ref())
            .map_err(|e| {
                error!("Failed to save configuration: {}", e);
                e
            })
    }

    /// Install a snapshot and resume it right away
    ///
    /// `None` just drops any held snapshot.
    pub fn set_pause_snapshot(&mut self, snapshot: Option<PauseSnapshot>, now: Timestamp) {
        self.pause = snapshot;
        if let Some(snapshot) = self.pause.take() {
            self.resume(snapshot, now);
        }
    }

    /// Boot path: load configuration and snapshot, resume if one was stored
    pub fn restore(&mut self, now: Timestamp) {
        let (config, pause) = self.persistence.restore();
        self.set_config(&config);
        self.stored_pause = pause;
        self.set_pause_snapshot(pause, now);
    }

    // ---- Control loop ----

    /// Run one control iteration
    pub fn tick(&mut self, now: Timestamp) {
        match self.state {
            ProcessState::Idle => {
                for chamber in self.chambers.iter_mut() {
                    chamber.fan_off();
                }
            }
            ProcessState::Preheating => {
                let target = self.config.preheat_temp;
                if let Some(temp) = self.oven_temp(now) {
                    if temp >= target {
                        info!("Preheat reached {}°C (target {}°C)", temp, target);
                        self.finish_run(now);
                        return;
                    }
                }
                self.regulate_chambers(target, now);
            }
            ProcessState::Stage(stage) => {
                // Chambers are regulated toward the stage that was active at
                // the start of this tick, even if its timer just ran out.
                let target = self.config.stage(stage).temp;
                let timer = &mut self.stage_timers[stage.index()];
                if timer.is_done(now) {
                    timer.reset(now);
                    match stage.next() {
                        Some(next) => self.enter(ProcessState::Stage(next), now),
                        None => {
                            info!("Cure run complete");
                            self.finish_run(now);
                        }
                    }
                }
                self.regulate_chambers(target, now);
            }
        }

        if self.state.allows_rotation_override() {
            self.rotation.drive(self.rotation_mode.forced_direction());
        }

        if self.state.is_heating() {
            self.check_heater(now);
            self.heater.service(now);
        }

        if self.snapshot_timer.is_done(now) {
            self.snapshot_timer.reset(now);
            self.save_progress(now);
        }
    }

    // ---- Events ----

    /// Dispatch an operator event
    pub fn handle(&mut self, event: Event, now: Timestamp) {
        match event {
            Event::Preheat => self.event_preheat(now),
            Event::Stop => self.event_stop(now),
            Event::Pause => self.event_pause(now),
            Event::Start => self.event_start(now),
            Event::RotateForward => self.event_rotate_forward(),
            Event::RotateForwardStop => self.event_rotate_forward_stop(),
            Event::RotateBackward => self.event_rotate_backward(),
            Event::RotateBackwardStop => self.event_rotate_backward_stop(),
        }
    }

    pub fn event_preheat(&mut self, now: Timestamp) {
        match self.state {
            ProcessState::Idle => self.enter(ProcessState::Preheating, now),
            _ => debug!("Preheat ignored in {}", self.state.name()),
        }
    }

    /// Abort: everything off, held and stored snapshots dropped
    pub fn event_stop(&mut self, now: Timestamp) {
        self.pause = None;
        self.finish_run(now);
    }

    /// Suspend the run, keeping its progress for `event_start`
    pub fn event_pause(&mut self, now: Timestamp) {
        let Some(snapshot) = self.capture(now) else {
            debug!("Pause ignored while idle");
            return;
        };

        info!(
            "Pausing {} at {}",
            self.state.name(),
            snapshot.elapsed().to_clock_string()
        );
        self.pause = Some(snapshot);
        self.store_snapshot(Some(snapshot));
        self.enter(ProcessState::Idle, now);
    }

    /// Start a fresh cure run, or resume the paused one
    pub fn event_start(&mut self, now: Timestamp) {
        if self.state != ProcessState::Idle {
            debug!("Start ignored in {}", self.state.name());
            return;
        }

        match self.pause.take() {
            Some(snapshot) => self.resume(snapshot, now),
            None => {
                info!(
                    "Starting cure run ({} of stages)",
                    self.config.total_duration().to_clock_string()
                );
                self.enter(ProcessState::Stage(StageId::First), now);
            }
        }
    }

    pub fn event_rotate_forward(&mut self) {
        self.rotation_mode = RotationMode::ForceForward;
    }

    pub fn event_rotate_forward_stop(&mut self) {
        self.rotation_mode = RotationMode::Normal;
    }

    pub fn event_rotate_backward(&mut self) {
        self.rotation_mode = RotationMode::ForceBackward;
    }

    pub fn event_rotate_backward_stop(&mut self) {
        self.rotation_mode = RotationMode::Normal;
    }

    // ---- Readouts ----

    pub fn state(&self) -> ProcessState {
        self.state
    }

    /// Internal state name for logs and the console
    pub fn state_name(&self) -> &'static str {
        self.state.name()
    }

    /// State name shown to the operator
    pub fn display_state(&self) -> &'static str {
        self.state.display_name()
    }

    pub fn heater_on(&self) -> bool {
        self.heater.is_running()
    }

    /// Fan state of chamber `index`; unknown chambers read as off
    pub fn fan_on(&self, index: usize) -> bool {
        self.chambers
            .get(index)
            .is_some_and(|chamber| chamber.fan_on())
    }

    pub fn chamber_temp(&mut self, index: usize, now: Timestamp) -> Option<Celsius> {
        self.chambers.get_mut(index)?.temp(now)
    }

    pub fn rotation_active(&self) -> bool {
        self.rotation.is_active()
    }

    pub fn rotation_direction(&self) -> Option<Direction> {
        self.rotation.direction()
    }

    pub fn rotation_mode(&self) -> RotationMode {
        self.rotation_mode
    }

    /// Progress into the current stage, `None` outside stages
    pub fn current_stage_elapsed(&self, now: Timestamp) -> Option<Duration> {
        let stage = self.state.stage()?;
        Some(self.stage_timers[stage.index()].elapsed(now))
    }

    /// Setpoint the heater is driven to in the current state
    pub fn target_temp(&self) -> Option<Celsius> {
        match self.state {
            ProcessState::Idle => None,
            ProcessState::Preheating => Some(self.config.preheat_temp),
            ProcessState::Stage(stage) => Some(self.config.stage(stage).temp),
        }
    }

    pub fn pause_snapshot(&self) -> Option<PauseSnapshot> {
        self.pause
    }

    /// Estimate the oven temperature
    ///
    /// With a controller reading, each chamber sensor is forced to the
    /// reading plus its offset and the reading is returned. Without one,
    /// the coldest chamber is used, or `None` if any chamber fails to read.
    pub fn oven_temp(&mut self, now: Timestamp) -> Option<Celsius> {
        match self.heater.read_pv(now) {
            Some(pv) => {
                for (chamber, offset) in self.chambers.iter_mut().zip(CHAMBER_PV_OFFSETS) {
                    chamber.sensor_mut().force_temp(pv + offset);
                }
                Some(pv)
            }
            None => {
                warn!("Controller PV unavailable, using chamber sensors");
                self.min_chamber_temp(now)
            }
        }
    }

    /// Read everything a status screen needs
    pub fn status(&mut self, now: Timestamp) -> OvenStatus {
        let oven_temp = self.oven_temp(now);
        let mut chamber_temps = [None; CHAMBER_COUNT];
        for (slot, chamber) in chamber_temps.iter_mut().zip(self.chambers.iter_mut()) {
            *slot = chamber.temp(now);
        }

        OvenStatus {
            state: self.state,
            heater_on: self.heater_on(),
            fans: core::array::from_fn(|i| self.chambers[i].fan_on()),
            oven_temp,
            chamber_temps,
            rotation: self.rotation.direction(),
            stage_elapsed: self.current_stage_elapsed(now),
            stage_duration: self
                .state
                .stage()
                .map(|stage| self.stage_timers[stage.index()].period()),
            paused: self.pause.is_some(),
        }
    }

    // ---- Service overrides ----

    /// Pin chamber `index` to a fixed reading
    pub fn force_chamber_temp(&mut self, index: usize, temp: Celsius) {
        match self.chambers.get_mut(index) {
            Some(chamber) => chamber.sensor_mut().force_temp(temp),
            None => warn!("No chamber {}", index),
        }
    }

    /// Return every chamber sensor to live reads
    pub fn unforce_chamber_temps(&mut self) {
        for chamber in self.chambers.iter_mut() {
            chamber.sensor_mut().unforce_temp();
        }
    }

    // ---- Collaborator access ----

    pub fn chambers(&self) -> &[Chamber<S, F>; CHAMBER_COUNT] {
        &self.chambers
    }

    pub fn chamber_mut(&mut self, index: usize) -> Option<&mut Chamber<S, F>> {
        self.chambers.get_mut(index)
    }

    pub fn rotation(&self) -> &R {
        &self.rotation
    }

    pub fn heater(&self) -> &H {
        &self.heater
    }

    pub fn heater_mut(&mut self) -> &mut H {
        &mut self.heater
    }

    pub fn persistence(&self) -> &P {
        &self.persistence
    }

    pub fn persistence_mut(&mut self) -> &mut P {
        &mut self.persistence
    }

    pub fn delay(&self) -> &D {
        &self.delay
    }

    pub fn watchdog(&self) -> &HeaterWatchdog {
        &self.watchdog
    }

    // ---- Internals ----

    /// Switch state and run the entry actions of the new state
    fn enter(&mut self, state: ProcessState, now: Timestamp) {
        info!("State change: {} -> {}", self.state.name(), state.name());
        self.state = state;

        self.apply_heater_setpoint();

        match state {
            ProcessState::Idle => {
                self.heater.set_run(false);
                for chamber in self.chambers.iter_mut() {
                    chamber.fan_off();
                }
                self.rotation.stop();
            }
            ProcessState::Preheating => {
                self.heater.set_run(true);
            }
            ProcessState::Stage(stage) => {
                self.heater.set_run(true);
                self.rotation.start_forward();
                self.stage_timers[stage.index()].reset(now);
            }
        }
    }

    /// Enter the snapshot's state and restore its timer progress
    fn resume(&mut self, snapshot: PauseSnapshot, now: Timestamp) {
        info!(
            "Resuming {} at {}",
            snapshot.state().name(),
            snapshot.elapsed().to_clock_string()
        );

        let state = snapshot.state();
        self.enter(state, now);
        if let Some(stage) = state.stage() {
            self.stage_timers[stage.index()].set_elapsed(now, snapshot.elapsed());
        }
    }

    /// Go idle at the end of a run and bring storage in line with the
    /// held snapshot
    fn finish_run(&mut self, now: Timestamp) {
        self.enter(ProcessState::Idle, now);
        if self.stored_pause != self.pause {
            self.store_snapshot(self.pause);
        }
    }

    fn apply_heater_setpoint(&mut self) {
        if let Some(target) = self.target_temp() {
            self.heater.set_sv(target);
        }
    }

    fn regulate_chambers(&mut self, target: Celsius, now: Timestamp) {
        let law = self.hysteresis;
        for (index, chamber) in self.chambers.iter_mut().enumerate() {
            match chamber.regulate(&law, target, now) {
                HysteresisAction::SensorFault => {
                    warn!("Chamber {} sensor read failed, fan off", index);
                }
                HysteresisAction::TurnOn => debug!("Chamber {} fan on", index),
                HysteresisAction::TurnOff => debug!("Chamber {} fan off", index),
                HysteresisAction::Hold => {}
            }
        }
    }

    fn min_chamber_temp(&mut self, now: Timestamp) -> Option<Celsius> {
        let mut min: Option<Celsius> = None;
        for chamber in self.chambers.iter_mut() {
            let temp = chamber.temp(now)?;
            min = Some(min.map_or(temp, |m| m.min(temp)));
        }
        min
    }

    /// Feed the watchdog and run a stop/restart cycle on a stall
    fn check_heater(&mut self, now: Timestamp) {
        let output = self.heater.read_out1(now);
        let pv = self.heater.read_pv(now);

        match self.watchdog.observe(now, output, pv) {
            WatchdogVerdict::Healthy => {}
            WatchdogVerdict::NoReading => {
                warn!("Heater watchdog: no process value");
            }
            WatchdogVerdict::Stalled { elapsed, rise } => {
                warn!(
                    "Heater stalled: +{}°C in {}s, restarting controller",
                    rise,
                    elapsed.as_secs()
                );
                self.heater.set_run(false);
                self.delay.delay_ms(HEATER_RECOVERY_PAUSE_MS);
                self.heater.set_run(true);
            }
        }
    }

    fn capture(&self, now: Timestamp) -> Option<PauseSnapshot> {
        match self.state {
            ProcessState::Idle => None,
            ProcessState::Preheating => Some(PauseSnapshot::preheating()),
            ProcessState::Stage(stage) => Some(PauseSnapshot::stage(
                stage,
                self.stage_timers[stage.index()].elapsed(now),
            )),
        }
    }

    /// Periodic progress save; nothing to save while idle
    fn save_progress(&mut self, now: Timestamp) {
        if let Some(snapshot) = self.capture(now) {
            debug!(
                "Saving progress: {} at {}",
                snapshot.state().name(),
                snapshot.elapsed().to_clock_string()
            );
            self.store_snapshot(Some(snapshot));
        }
    }

    fn store_snapshot(&mut self, snapshot: Option<PauseSnapshot>) {
        match self.persistence.persist(&self.config, snapshot.as_ref()) {
            Ok(()) => self.stored_pause = snapshot,
            Err(e) => error!("Failed to save oven state: {}", e),
        }
    }
}
