//! alvik-ble firmware entry point.
//!
//! Task layout (all on the thread-mode executor):
//!
//! ```text
//!   softdevice_task   SoftDevice event pump
//!   lifecycle_task    advertise -> connect -> serve -> disconnect, forever
//!   telemetry_task    IMU sample every 100 ms -> acceleration / angular rate
//!   drive_task        drive command writes -> motors
//!   indicator_task    indicator writes -> LEDs
//! ```
//!
//! Lifecycle and telemetry run under a restart budget; the two command
//! listeners never return.

#![no_std]
#![no_main]

mod board;
mod softdevice;

use core::convert::Infallible;

use defmt::{error, info, unwrap};
use embassy_executor::Spawner;
use embassy_nrf::gpio::{AnyPin, Level, Output, OutputDrive, Pin};
use embassy_nrf::interrupt::{self, InterruptExt, Priority};
use embassy_nrf::pwm::SimplePwm;
use embassy_nrf::{bind_interrupts, peripherals, twim};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::mutex::Mutex;
use embassy_time::{Duration, Instant, Ticker, Timer};
use nrf_softdevice::Softdevice;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use alvik_ble::ble::AdvertisingConfig;
use alvik_ble::config::{
    MAX_TASK_RESTARTS, TASK_HEALTHY_RUN_MS, TASK_RESTART_BACKOFF_MS, TELEMETRY_PERIOD_MS,
};
use alvik_ble::supervisor::{RestartBudget, TaskId, Verdict};
use alvik_ble::{drive, indicator, lifecycle, telemetry, Error};

use board::imu::Lsm6dsox;
use board::leds::RgbLed;
use board::motors::Motors;
use board::AlvikBoard;
use softdevice::advertiser::Advertiser;
use softdevice::server::{MotionChannel, MotionNotifier, Server, DRIVE_WRITES, INDICATOR_WRITES};

bind_interrupts!(struct Irqs {
    SPIM0_SPIS0_TWIM0_TWIS0_SPI0_TWI0 => twim::InterruptHandler<peripherals::TWISPI0>;
});

type SharedRobot = Mutex<CriticalSectionRawMutex, AlvikBoard>;

static SERVER: StaticCell<Server> = StaticCell::new();
static ROBOT: StaticCell<SharedRobot> = StaticCell::new();

// ═══════════════════════════════════════════════════════════════════════════
// Tasks
// ═══════════════════════════════════════════════════════════════════════════

#[embassy_executor::task]
async fn softdevice_task(sd: &'static Softdevice) -> ! {
    sd.run().await
}

#[embassy_executor::task]
async fn lifecycle_task(sd: &'static Softdevice, server: &'static Server) {
    let mut advertiser = match Advertiser::new(sd, server, &AdvertisingConfig::robot()) {
        Ok(advertiser) => advertiser,
        Err(e) => {
            error!("Advertising payload: {}", e);
            cortex_m::peripheral::SCB::sys_reset();
        }
    };
    let mut budget = RestartBudget::new(TaskId::Lifecycle, MAX_TASK_RESTARTS, TASK_HEALTHY_RUN_MS);

    loop {
        let started = Instant::now();
        let e = fatal(lifecycle::run(&mut advertiser).await);
        after_failure(&mut budget, &e, started).await;
    }
}

/// Every run (first start and each restart) re-initialises the IMU. An IMU
/// that stays unreachable fails each run at once, so the restart budget
/// runs out after a few backoffs and the whole device resets.
#[embassy_executor::task]
async fn telemetry_task(server: &'static Server, robot: &'static SharedRobot) {
    let mut acceleration = MotionNotifier::new(server, MotionChannel::Acceleration);
    let mut angular_rate = MotionNotifier::new(server, MotionChannel::AngularRate);
    let mut budget = RestartBudget::new(TaskId::Telemetry, MAX_TASK_RESTARTS, TASK_HEALTHY_RUN_MS);

    loop {
        let mut ticker = Ticker::every(Duration::from_millis(TELEMETRY_PERIOD_MS));
        let started = Instant::now();
        let e = fatal(telemetry::run(robot, &mut acceleration, &mut angular_rate, &mut ticker).await);
        after_failure(&mut budget, &e, started).await;
    }
}

#[embassy_executor::task]
async fn drive_task(robot: &'static SharedRobot) -> ! {
    drive::run(&mut DRIVE_WRITES.receiver(), robot).await
}

#[embassy_executor::task]
async fn indicator_task(robot: &'static SharedRobot) -> ! {
    indicator::run(&mut INDICATOR_WRITES.receiver(), robot).await
}

fn led(pin: AnyPin) -> Output<'static> {
    Output::new(pin, Level::Low, OutputDrive::Standard)
}

fn fatal(result: Result<Infallible, Error>) -> Error {
    match result {
        Ok(never) => match never {},
        Err(e) => e,
    }
}

/// Back off and re-run, or reset once the task is out of restarts.
async fn after_failure(budget: &mut RestartBudget, error: &Error, started: Instant) {
    match budget.on_failure(error, started.elapsed().as_millis()) {
        Verdict::Restart => Timer::after(Duration::from_millis(TASK_RESTART_BACKOFF_MS)).await,
        Verdict::Reset => cortex_m::peripheral::SCB::sys_reset(),
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Entry
// ═══════════════════════════════════════════════════════════════════════════

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("alvik-ble starting");

    // The SoftDevice reserves priorities 0, 1 and 4.
    let mut config = embassy_nrf::config::Config::default();
    config.gpiote_interrupt_priority = Priority::P2;
    config.time_interrupt_priority = Priority::P2;
    let p = embassy_nrf::init(config);
    interrupt::SPIM0_SPIS0_TWIM0_TWIS0_SPI0_TWI0.set_priority(Priority::P3);

    // Board
    let i2c = twim::Twim::new(p.TWISPI0, Irqs, p.P0_26, p.P0_27, twim::Config::default());
    // Configured by the telemetry task at the start of every run.
    let imu = Lsm6dsox::new(i2c);

    let motors = Motors::new(SimplePwm::new_4ch(p.PWM0, p.P0_02, p.P0_03, p.P0_04, p.P0_28));

    let leds = [
        RgbLed::new(led(p.P0_13.degrade()), led(p.P0_14.degrade()), led(p.P0_15.degrade())),
        RgbLed::new(led(p.P0_16.degrade()), led(p.P0_17.degrade()), led(p.P0_19.degrade())),
    ];

    let robot: &'static SharedRobot =
        ROBOT.init(Mutex::new(AlvikBoard::new(imu, motors, leds)));

    // SoftDevice
    let sd = softdevice::enable();
    let server: &'static Server = SERVER.init(unwrap!(Server::new(sd)));
    let sd: &'static Softdevice = sd;
    if let Err(e) = server.init_values() {
        error!("Temperature init failed: {}", e);
    }

    unwrap!(spawner.spawn(softdevice_task(sd)));
    unwrap!(spawner.spawn(lifecycle_task(sd, server)));
    unwrap!(spawner.spawn(telemetry_task(server, robot)));
    unwrap!(spawner.spawn(drive_task(robot)));
    unwrap!(spawner.spawn(indicator_task(robot)));
}
