//! Integration tests for alvik-ble host-testable logic.
//!
//! Writes go in through the same bounded channels the firmware uses, the
//! listeners run concurrently on one executor, and the simulated robot
//! records what reached the actuators.

use alvik_ble::codec;
use alvik_ble::drive::{self, DriveCommand};
use alvik_ble::gatt::{NotifySink, Payload};
use alvik_ble::indicator;
use alvik_ble::robot::sim::SimulatedRobot;
use alvik_ble::robot::{Rgb, Side, Vector3};
use alvik_ble::telemetry;
use alvik_ble::Error;
use embassy_futures::block_on;
use embassy_futures::select::{select, select3, Either, Either3};
use embassy_futures::yield_now;
use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::mutex::Mutex;

type Queue = Channel<NoopRawMutex, Payload, 8>;
type Robot = Mutex<NoopRawMutex, SimulatedRobot>;

fn payload(bytes: &[u8]) -> Payload {
    Payload::from_slice(bytes).unwrap()
}

fn drive_write(angle: i16, x: i16, y: i16) -> Payload {
    payload(&codec::encode_drive_command(&DriveCommand {
        angle_raw: angle,
        pos_x_raw: x,
        pos_y_raw: y,
    }))
}

/// Run both command listeners until they have drained their queues.
fn run_listeners(drive_q: &Queue, indicator_q: &Queue, robot: &Robot) {
    let mut drive_rx = drive_q.receiver();
    let mut indicator_rx = indicator_q.receiver();

    let outcome = block_on(select3(
        drive::run(&mut drive_rx, robot),
        indicator::run(&mut indicator_rx, robot),
        async {
            for _ in 0..4 {
                yield_now().await;
            }
        },
    ));
    assert!(matches!(outcome, Either3::Third(())));
}

#[test]
fn malformed_drive_write_does_not_stop_listener() {
    let drive_q = Queue::new();
    let indicator_q = Queue::new();
    let robot = Robot::new(SimulatedRobot::new());

    drive_q.try_send(payload(&[0x00, 0x2D, 0x00])).unwrap();
    drive_q.try_send(drive_write(45, 0, 10)).unwrap();
    run_listeners(&drive_q, &indicator_q, &robot);

    let robot = robot.try_lock().unwrap();
    assert_eq!(robot.drives().len(), 1);
    let call = robot.last_drive().unwrap();
    assert_eq!(call.speed, -1.3);
    assert_eq!(call.angle_degrees, 45.0);
}

#[test]
fn out_of_range_heading_is_discarded() {
    let drive_q = Queue::new();
    let indicator_q = Queue::new();
    let robot = Robot::new(SimulatedRobot::new());

    drive_q.try_send(drive_write(270, 0, 10)).unwrap();
    drive_q.try_send(drive_write(135, 0, 10)).unwrap();
    run_listeners(&drive_q, &indicator_q, &robot);

    let robot = robot.try_lock().unwrap();
    assert_eq!(robot.drives().len(), 1);
    let call = robot.last_drive().unwrap();
    assert_eq!(call.speed, 1.3);
    assert_eq!(call.angle_degrees, -45.0);
}

#[test]
fn drive_and_indicator_writes_are_both_served() {
    let drive_q = Queue::new();
    let indicator_q = Queue::new();
    let robot = Robot::new(SimulatedRobot::new());

    indicator_q
        .try_send(payload(&codec::encode_indicator_command(10)))
        .unwrap();
    drive_q.try_send(drive_write(-135, 3, 4)).unwrap();
    drive_q.try_send(drive_write(-45, 3, 4)).unwrap();
    indicator_q.try_send(payload(&[0x0A])).unwrap();
    run_listeners(&drive_q, &indicator_q, &robot);

    let robot = robot.try_lock().unwrap();
    let drives = robot.drives();
    assert_eq!(drives.len(), 2);
    assert_eq!(drives[0].angle_degrees, 45.0);
    assert!(drives[0].speed > 0.0);
    assert_eq!(drives[1].angle_degrees, -45.0);
    assert!(drives[1].speed < 0.0);

    // The short indicator write was dropped; the lights stay on.
    assert_eq!(robot.indicator(Side::Left), Rgb::BLUE);
    assert_eq!(robot.indicator(Side::Right), Rgb::BLUE);
}

#[test]
fn undefined_indicator_value_keeps_state() {
    let drive_q = Queue::new();
    let indicator_q = Queue::new();
    let robot = Robot::new(SimulatedRobot::new());

    for value in [10, 0, 7] {
        indicator_q
            .try_send(payload(&codec::encode_indicator_command(value)))
            .unwrap();
    }
    run_listeners(&drive_q, &indicator_q, &robot);

    let robot = robot.try_lock().unwrap();
    assert!(robot.indicator(Side::Left).is_off());
    assert!(robot.indicator(Side::Right).is_off());
    assert!(robot.drives().is_empty());
}

// ═══════════════════════════════════════════════════════════════════════════
// Telemetry
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Default)]
struct Characteristic {
    value: Vec<u8>,
    notifications: usize,
}

impl NotifySink for Characteristic {
    fn write_notify(&mut self, value: &[u8]) -> Result<(), Error> {
        self.value = value.to_vec();
        self.notifications += 1;
        Ok(())
    }
}

#[test]
fn telemetry_characteristics_decode_to_sensor_values() {
    let mut sim = SimulatedRobot::new();
    let acc = Vector3::new(0.01, -0.02, 0.98);
    let gyro = Vector3::new(1.5, 0.0, -12.25);
    sim.set_motion(acc, gyro);
    let robot = Robot::new(sim);

    let mut acc_char = Characteristic::default();
    let mut gyro_char = Characteristic::default();
    block_on(telemetry::publish_once(&robot, &mut acc_char, &mut gyro_char)).unwrap();

    assert_eq!(codec::decode_vector3(&acc_char.value), Ok(acc));
    assert_eq!(codec::decode_vector3(&gyro_char.value), Ok(gyro));
}

#[test]
fn telemetry_keeps_publishing_while_commands_arrive() {
    struct Ticks(u32);

    impl telemetry::Tick for Ticks {
        async fn tick(&mut self) {
            if self.0 == 0 {
                core::future::pending::<()>().await;
            }
            self.0 -= 1;
            yield_now().await;
        }
    }

    let drive_q = Queue::new();
    let robot = Robot::new(SimulatedRobot::new());
    let mut acc_char = Characteristic::default();
    let mut gyro_char = Characteristic::default();
    let mut ticks = Ticks(4);
    let mut drive_rx = drive_q.receiver();

    drive_q.try_send(drive_write(180, 0, 50)).unwrap();

    let outcome = block_on(select(
        select(
            telemetry::run(&robot, &mut acc_char, &mut gyro_char, &mut ticks),
            drive::run(&mut drive_rx, &robot),
        ),
        async {
            for _ in 0..16 {
                yield_now().await;
            }
        },
    ));
    assert!(matches!(outcome, Either::Second(())));

    assert_eq!(acc_char.notifications, 5);
    assert_eq!(gyro_char.notifications, 5);
    assert_eq!(robot.try_lock().unwrap().drives().len(), 1);
}
