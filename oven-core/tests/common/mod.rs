//! Mock hardware shared by the integration tests

#![allow(dead_code)]

use embedded_hal::delay::DelayNs;
use oven_core::traits::{Direction, HeaterController, Output, Persistence, Rotation, TempSensor};
use oven_core::{Celsius, Chamber, Config, Duration, Oven, PauseSnapshot, StageId, Timestamp};
use oven_hal::StorageError;

pub struct MockSensor {
    pub live: Option<Celsius>,
    pub forced: Option<Celsius>,
}

impl TempSensor for MockSensor {
    fn read_temp(&mut self, _now: Timestamp) -> Option<Celsius> {
        self.forced.or(self.live)
    }

    fn force_temp(&mut self, temp: Celsius) {
        self.forced = Some(temp);
    }

    fn unforce_temp(&mut self) {
        self.forced = None;
    }
}

#[derive(Default)]
pub struct MockFan {
    pub on: bool,
    pub writes: usize,
}

impl Output for MockFan {
    fn write(&mut self, on: bool) {
        self.on = on;
        self.writes += 1;
    }

    fn read(&self) -> bool {
        self.on
    }
}

#[derive(Default)]
pub struct MockRotation {
    pub direction: Option<Direction>,
    pub forward_starts: usize,
}

impl Rotation for MockRotation {
    fn start_forward(&mut self) {
        self.direction = Some(Direction::Forward);
        self.forward_starts += 1;
    }

    fn start_backward(&mut self) {
        self.direction = Some(Direction::Backward);
    }

    fn stop(&mut self) {
        self.direction = None;
    }

    fn direction(&self) -> Option<Direction> {
        self.direction
    }
}

pub struct MockHeater {
    pub sv: Option<Celsius>,
    pub running: bool,
    pub pv: Option<Celsius>,
    pub out1: Option<bool>,
    /// Every `set_run` call, in order
    pub run_log: Vec<bool>,
    pub serviced: usize,
}

impl Default for MockHeater {
    fn default() -> Self {
        Self {
            sv: None,
            running: false,
            pv: Some(25.0),
            out1: Some(false),
            run_log: Vec::new(),
            serviced: 0,
        }
    }
}

impl HeaterController for MockHeater {
    fn set_sv(&mut self, target: Celsius) {
        self.sv = Some(target);
    }

    fn set_run(&mut self, run: bool) {
        self.running = run;
        self.run_log.push(run);
    }

    fn is_running(&self) -> bool {
        self.running
    }

    fn read_pv(&mut self, _now: Timestamp) -> Option<Celsius> {
        self.pv
    }

    fn read_out1(&mut self, _now: Timestamp) -> Option<bool> {
        self.out1
    }

    fn service(&mut self, _now: Timestamp) {
        self.serviced += 1;
    }
}

#[derive(Default)]
pub struct MockPersistence {
    pub stored: Option<(Config, Option<PauseSnapshot>)>,
    /// Snapshot argument of every successful write
    pub writes: Vec<Option<PauseSnapshot>>,
    pub fail: bool,
}

impl MockPersistence {
    pub fn stored_pause(&self) -> Option<PauseSnapshot> {
        self.stored.and_then(|(_, pause)| pause)
    }
}

impl Persistence for MockPersistence {
    fn persist(
        &mut self,
        config: &Config,
        pause: Option<&PauseSnapshot>,
    ) -> Result<(), StorageError> {
        if self.fail {
            return Err(StorageError::Backend);
        }
        self.stored = Some((*config, pause.copied()));
        self.writes.push(pause.copied());
        Ok(())
    }

    fn restore(&mut self) -> (Config, Option<PauseSnapshot>) {
        self.stored.unwrap_or((Config::default(), None))
    }
}

#[derive(Default)]
pub struct MockDelay {
    pub total_ns: u64,
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += u64::from(ns);
    }
}

pub type TestOven = Oven<MockSensor, MockFan, MockRotation, MockHeater, MockPersistence, MockDelay>;

pub fn ms(millis: u64) -> Timestamp {
    Timestamp::from_millis(millis)
}

pub fn secs(secs: u64) -> Timestamp {
    Timestamp::from_millis(secs * 1_000)
}

/// Oven with three chambers reading the given live temperatures
pub fn oven_with_temps(temps: [Option<Celsius>; 3]) -> TestOven {
    let chambers = temps.map(|live| {
        Chamber::new(MockSensor { live, forced: None }, MockFan::default())
    });
    Oven::new(
        chambers,
        MockRotation::default(),
        MockHeater::default(),
        MockPersistence::default(),
        MockDelay::default(),
    )
}

pub fn oven() -> TestOven {
    oven_with_temps([Some(25.0); 3])
}

/// Configuration with stages short enough to run through in a test
pub fn short_config() -> Config {
    let mut config = Config::default();
    config.stage_mut(StageId::First).duration = Duration::from_secs(10);
    config.stage_mut(StageId::Second).duration = Duration::from_secs(60);
    config.stage_mut(StageId::Third).duration = Duration::from_secs(30);
    config
}

pub fn fans(oven: &TestOven) -> [bool; 3] {
    core::array::from_fn(|i| oven.fan_on(i))
}
