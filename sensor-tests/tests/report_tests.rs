//! Integration Tests für die Report-Schleife
//!
//! Diese Tests laufen auf dem Host (x86_64) und nutzen Mocks für LED,
//! Sensor, Host-Link und Delay. Alle Mocks schreiben in ein gemeinsames
//! Event-Log, damit die Reihenfolge über alle Geräte geprüft werden kann.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use embassy_futures::block_on;
use rgb::RGB8;
use sensor_core::{
    ConnectWait, CycleOutcome, DATA_MAX, HostLink, Indicator, LedError, LinkError, LinkState,
    Mode, OFF, PACKET_MARKER, Packet, Reading, ReportConfig, ReportError, ReportLoop,
    STARTUP_SEQUENCE, STATUS_COLOR, Sensor, SensorError,
};

// ============================================================================
// Event-Log
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
enum Event {
    Color(RGB8),
    Write(Vec<u8>),
    Sleep(u32),
    Poll(bool),
    Configure(Mode),
    Read,
}

type Log = Rc<RefCell<Vec<Event>>>;

fn new_log() -> Log {
    Rc::new(RefCell::new(Vec::new()))
}

fn events(log: &Log) -> Vec<Event> {
    log.borrow().clone()
}

// ============================================================================
// Mocks
// ============================================================================

struct MockIndicator {
    log: Log,
    fail_writes: bool,
}

impl Indicator for MockIndicator {
    fn set_color(&mut self, color: RGB8) -> Result<(), LedError> {
        if self.fail_writes {
            return Err(LedError::WriteFailed);
        }
        self.log.borrow_mut().push(Event::Color(color));
        Ok(())
    }
}

/// Liefert die vorbereiteten Messwerte, danach `SensorError::I2c`
struct MockSensor {
    log: Log,
    readings: VecDeque<Reading>,
    fail_configure: bool,
}

impl Sensor for MockSensor {
    fn configure(&mut self, mode: Mode) -> Result<(), SensorError> {
        if self.fail_configure {
            return Err(SensorError::I2c);
        }
        self.log.borrow_mut().push(Event::Configure(mode));
        Ok(())
    }

    fn read(&mut self) -> Result<Reading, SensorError> {
        self.log.borrow_mut().push(Event::Read);
        self.readings.pop_front().ok_or(SensorError::I2c)
    }
}

struct MockLink {
    log: Log,
    /// Anzahl der `is_connected()` Aufrufe die noch `false` liefern
    polls_until_connected: u32,
    fail_next_write: bool,
}

impl HostLink for MockLink {
    fn is_connected(&mut self) -> bool {
        let connected = self.polls_until_connected == 0;
        if !connected {
            self.polls_until_connected -= 1;
        }
        self.log.borrow_mut().push(Event::Poll(connected));
        connected
    }

    fn write(&mut self, bytes: &[u8]) -> Result<(), LinkError> {
        if self.fail_next_write {
            self.fail_next_write = false;
            return Err(LinkError::WriteFailed);
        }
        self.log.borrow_mut().push(Event::Write(bytes.to_vec()));
        Ok(())
    }
}

struct MockDelay {
    log: Log,
}

impl embedded_hal_async::delay::DelayNs for MockDelay {
    async fn delay_ns(&mut self, ns: u32) {
        self.log.borrow_mut().push(Event::Sleep(ns / 1_000_000));
    }

    async fn delay_ms(&mut self, ms: u32) {
        self.log.borrow_mut().push(Event::Sleep(ms));
    }
}

type TestLoop = ReportLoop<MockIndicator, MockSensor, MockLink, MockDelay>;

fn reading(temperature: f32, humidity: f32) -> Reading {
    Reading {
        temperature,
        humidity,
    }
}

fn build(log: &Log, readings: &[Reading], polls_until_connected: u32) -> TestLoop {
    build_with_config(log, readings, polls_until_connected, ReportConfig::default())
}

fn build_with_config(
    log: &Log,
    readings: &[Reading],
    polls_until_connected: u32,
    config: ReportConfig,
) -> TestLoop {
    ReportLoop::new(
        MockIndicator {
            log: log.clone(),
            fail_writes: false,
        },
        MockSensor {
            log: log.clone(),
            readings: readings.iter().copied().collect(),
            fail_configure: false,
        },
        MockLink {
            log: log.clone(),
            polls_until_connected,
            fail_next_write: false,
        },
        MockDelay { log: log.clone() },
        config,
    )
}

fn writes(log: &Log) -> Vec<Vec<u8>> {
    events(log)
        .into_iter()
        .filter_map(|event| match event {
            Event::Write(bytes) => Some(bytes),
            _ => None,
        })
        .collect()
}

// ============================================================================
// Tests: Verbindungsaufbau
// ============================================================================

#[test]
fn test_wait_for_host_three_polls() {
    let log = new_log();
    let mut report = build(&log, &[], 3);
    assert_eq!(report.state(), LinkState::AwaitingConnection);

    let waits = block_on(report.wait_for_host()).unwrap();

    assert_eq!(waits, 3);
    assert_eq!(report.state(), LinkState::Connected);
    assert_eq!(
        events(&log),
        vec![
            Event::Poll(false),
            Event::Sleep(1_000),
            Event::Poll(false),
            Event::Sleep(1_000),
            Event::Poll(false),
            Event::Sleep(1_000),
            Event::Poll(true),
        ]
    );
}

#[test]
fn test_wait_for_host_already_connected() {
    let log = new_log();
    let mut report = build(&log, &[], 0);

    let waits = block_on(report.wait_for_host()).unwrap();

    assert_eq!(waits, 0);
    assert_eq!(events(&log), vec![Event::Poll(true)]);
}

#[test]
fn test_wait_for_host_bounded_gives_up() {
    let log = new_log();
    let config = ReportConfig {
        connect_wait: ConnectWait::Polls(2),
        ..ReportConfig::default()
    };
    let mut report = build_with_config(&log, &[], u32::MAX, config);

    let result = block_on(report.wait_for_host());

    assert_eq!(result, Err(ReportError::ConnectionNeverEstablished));
    assert_eq!(report.state(), LinkState::AwaitingConnection);
    let sleeps = events(&log)
        .iter()
        .filter(|event| matches!(event, Event::Sleep(_)))
        .count();
    assert_eq!(sleeps, 2);
}

#[test]
fn test_wait_for_host_bounded_connects_in_time() {
    let log = new_log();
    let config = ReportConfig {
        connect_wait: ConnectWait::Polls(3),
        ..ReportConfig::default()
    };
    let mut report = build_with_config(&log, &[], 3, config);

    assert_eq!(block_on(report.wait_for_host()), Ok(3));
}

// ============================================================================
// Tests: Start-Sequenz
// ============================================================================

#[test]
fn test_signal_connected_sequence() {
    let log = new_log();
    let mut report = build(&log, &[], 0);

    block_on(report.signal_connected());

    assert_eq!(
        events(&log),
        vec![
            Event::Color(STARTUP_SEQUENCE[0]),
            Event::Sleep(200),
            Event::Color(STARTUP_SEQUENCE[1]),
            Event::Sleep(200),
            Event::Color(STARTUP_SEQUENCE[2]),
            Event::Sleep(200),
            Event::Color(OFF),
        ]
    );
}

// ============================================================================
// Tests: Report-Zyklus
// ============================================================================

#[test]
fn test_cycle_end_to_end() {
    let log = new_log();
    let mut report = build(&log, &[reading(21.2, 55.7)], 0);

    let outcome = block_on(report.cycle()).unwrap();

    assert_eq!(
        outcome,
        CycleOutcome::Sent(Packet {
            temperature: 21,
            humidity: 56
        })
    );
    assert_eq!(
        events(&log),
        vec![
            Event::Read,
            Event::Write(vec![255, 21, 56]),
            Event::Color(STATUS_COLOR),
            Event::Color(OFF),
            Event::Sleep(5_000),
        ]
    );
}

#[test]
fn test_cycle_rounding() {
    let log = new_log();
    let mut report = build(&log, &[reading(23.4, 40.0), reading(23.5, 40.5)], 0);

    block_on(report.cycle()).unwrap();
    block_on(report.cycle()).unwrap();

    assert_eq!(writes(&log), vec![vec![255, 23, 40], vec![255, 24, 41]]);
}

#[test]
fn test_cycle_out_of_range_values() {
    let log = new_log();
    let mut report = build(&log, &[reading(-12.0, 300.0)], 0);

    block_on(report.cycle()).unwrap();

    assert_eq!(writes(&log), vec![vec![PACKET_MARKER, 0, DATA_MAX]]);
}

#[test]
fn test_cycle_identical_readings_identical_packets() {
    let log = new_log();
    let same = reading(22.6, 48.1);
    let mut report = build(&log, &[same, same, same], 0);

    for _ in 0..3 {
        block_on(report.cycle()).unwrap();
    }

    let packets = writes(&log);
    assert_eq!(packets.len(), 3);
    assert!(packets.iter().all(|packet| packet == &packets[0]));
}

#[test]
fn test_cycle_status_hold_time() {
    let log = new_log();
    let config = ReportConfig {
        status_flash_ms: 50,
        update_interval_secs: 10,
        ..ReportConfig::default()
    };
    let mut report = build_with_config(&log, &[reading(20.0, 50.0)], 0, config);

    block_on(report.cycle()).unwrap();

    assert_eq!(
        events(&log),
        vec![
            Event::Read,
            Event::Write(vec![255, 20, 50]),
            Event::Color(STATUS_COLOR),
            Event::Sleep(50),
            Event::Color(OFF),
            Event::Sleep(10_000),
        ]
    );
}

#[test]
fn test_cycle_link_write_failure_skips_flash() {
    let log = new_log();
    let mut report = ReportLoop::new(
        MockIndicator {
            log: log.clone(),
            fail_writes: false,
        },
        MockSensor {
            log: log.clone(),
            readings: [reading(21.0, 50.0), reading(21.0, 50.0)]
                .into_iter()
                .collect(),
            fail_configure: false,
        },
        MockLink {
            log: log.clone(),
            polls_until_connected: 0,
            fail_next_write: true,
        },
        MockDelay { log: log.clone() },
        ReportConfig::default(),
    );

    let first = block_on(report.cycle()).unwrap();
    let second = block_on(report.cycle()).unwrap();

    let packet = Packet {
        temperature: 21,
        humidity: 50,
    };
    assert_eq!(first, CycleOutcome::Skipped(packet));
    assert_eq!(second, CycleOutcome::Sent(packet));
    assert_eq!(report.skipped_cycles(), 1);
    assert_eq!(
        events(&log),
        vec![
            Event::Read,
            Event::Sleep(5_000),
            Event::Read,
            Event::Write(vec![255, 21, 50]),
            Event::Color(STATUS_COLOR),
            Event::Color(OFF),
            Event::Sleep(5_000),
        ]
    );
}

#[test]
fn test_cycle_indicator_failure_keeps_reporting() {
    let log = new_log();
    let mut report = ReportLoop::new(
        MockIndicator {
            log: log.clone(),
            fail_writes: true,
        },
        MockSensor {
            log: log.clone(),
            readings: [reading(19.0, 30.0)].into_iter().collect(),
            fail_configure: false,
        },
        MockLink {
            log: log.clone(),
            polls_until_connected: 0,
            fail_next_write: false,
        },
        MockDelay { log: log.clone() },
        ReportConfig::default(),
    );

    let outcome = block_on(report.cycle()).unwrap();

    assert!(matches!(outcome, CycleOutcome::Sent(_)));
    assert_eq!(writes(&log), vec![vec![255, 19, 30]]);
}

#[test]
fn test_cycle_sensor_failure() {
    let log = new_log();
    let mut report = build(&log, &[], 0);

    let result = block_on(report.cycle());

    assert_eq!(result, Err(ReportError::SensorUnavailable(SensorError::I2c)));
    assert!(writes(&log).is_empty());
}

// ============================================================================
// Tests: komplette Schleife
// ============================================================================

#[test]
fn test_run_full_sequence() {
    let log = new_log();
    let mut report = build(&log, &[reading(21.2, 55.7), reading(21.2, 55.7)], 1);

    // Sensor meldet nach zwei Messungen einen Fehler → run() kehrt zurück
    let result = block_on(report.run());
    assert_eq!(
        result.unwrap_err(),
        ReportError::SensorUnavailable(SensorError::I2c)
    );

    let log = events(&log);
    let first_write = log
        .iter()
        .position(|event| matches!(event, Event::Write(_)))
        .unwrap();

    // Start-Sequenz genau einmal und vor dem ersten Paket
    for color in STARTUP_SEQUENCE {
        let positions: Vec<usize> = log
            .iter()
            .enumerate()
            .filter(|(_, event)| **event == Event::Color(color))
            .map(|(index, _)| index)
            .collect();
        assert_eq!(positions.len(), 1);
        assert!(positions[0] < first_write);
    }

    // Sensor wird nach der Start-Sequenz konfiguriert
    let configure = log
        .iter()
        .position(|event| *event == Event::Configure(Mode::NoHeatHighPrecision))
        .unwrap();
    let last_startup_color = log
        .iter()
        .position(|event| *event == Event::Color(STARTUP_SEQUENCE[2]))
        .unwrap();
    assert!(configure > last_startup_color);

    let packets: Vec<&Vec<u8>> = log
        .iter()
        .filter_map(|event| match event {
            Event::Write(bytes) => Some(bytes),
            _ => None,
        })
        .collect();
    assert_eq!(packets, vec![&vec![255, 21, 56], &vec![255, 21, 56]]);
}

#[test]
fn test_run_configure_failure_is_fatal() {
    let log = new_log();
    let mut report = ReportLoop::new(
        MockIndicator {
            log: log.clone(),
            fail_writes: false,
        },
        MockSensor {
            log: log.clone(),
            readings: VecDeque::new(),
            fail_configure: true,
        },
        MockLink {
            log: log.clone(),
            polls_until_connected: 0,
            fail_next_write: false,
        },
        MockDelay { log: log.clone() },
        ReportConfig::default(),
    );

    let result = block_on(report.run());

    assert_eq!(
        result.unwrap_err(),
        ReportError::SensorUnavailable(SensorError::I2c)
    );
    assert!(!events(&log).contains(&Event::Read));
}

#[test]
fn test_into_parts_returns_handles() {
    let log = new_log();
    let report = build(&log, &[reading(1.0, 2.0)], 0);

    let (_indicator, sensor, link, _delay) = report.into_parts();

    assert_eq!(sensor.readings.len(), 1);
    assert_eq!(link.polls_until_connected, 0);
}
