// elora-myriad entry point and main loop
//
// Boot sequence: hardware -> card detection -> pointing init -> scan timer
// Main loop: WFI -> scan tick on timer wake -> hand reports to USB -> repeat
//
// Card detection runs once, before the scan timer starts; the card is
// configured lazily by the first scan tick. The timer fires every 1ms,
// matching the host's matrix scan rate.

#![no_std]
#![no_main]

use esp_backtrace as _;
use esp_hal::clock::CpuClock;
use esp_hal::delay::Delay;
use esp_hal::time::Duration;
use esp_hal::timer::PeriodicTimer;
use esp_hal::timer::timg::TimerGroup;
use log::{info, trace};

use core::cell::RefCell;
use critical_section::Mutex;

use elora_myriad::board::Board;
use elora_myriad::kernel::link::POINTER_REPORTS;
use elora_myriad::kernel::{Mailboxes, try_wake, uptime_ms, wait_for_interrupt, wake};
use myriad::{Eeprom, Half, Myriad, Scanner};

esp_bootloader_esp_idf::esp_app_desc!();

const SCAN_PERIOD_MS: u64 = 1;

// Side of the keyboard carrying the card slot
const CARD_HALF: Half = Half::Left;

static TIMER0: Mutex<RefCell<Option<PeriodicTimer<'static, esp_hal::Blocking>>>> =
    Mutex::new(RefCell::new(None));

#[esp_hal::handler(priority = esp_hal::interrupt::Priority::Priority1)]
fn timer0_handler() {
    critical_section::with(|cs| {
        if let Some(timer) = TIMER0.borrow_ref_mut(cs).as_mut() {
            timer.clear_interrupt();
        }
    });
    wake::signal_scan();
}

#[esp_hal::main]
fn main() -> ! {
    esp_println::logger::init_logger_from_env();
    let config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    let peripherals = esp_hal::init(config);

    info!("booting...");

    let mut board = Board::init(peripherals);
    info!("hardware initialized.");

    let mut myriad = Myriad::default();
    let mut eeprom = Eeprom::new(board.detect.i2c);
    myriad.detect(&mut board.detect.present, &mut eeprom, &mut Delay::new());

    let mut scanner = Scanner::new(myriad, board.port, CARD_HALF);

    let timg0 = TimerGroup::new(board.timg0);
    let mut timer0 = PeriodicTimer::new(timg0.timer0);
    wake::set_tick_ms(SCAN_PERIOD_MS as u32);
    critical_section::with(|cs| {
        timer0.set_interrupt_handler(timer0_handler);
        timer0.start(Duration::from_millis(SCAN_PERIOD_MS)).unwrap();
        timer0.listen();
        TIMER0.borrow_ref_mut(cs).replace(timer0);
    });
    info!("scan timer running.");

    loop {
        if try_wake() {
            scanner.tick(&mut Mailboxes, uptime_ms());
        }

        // USB HID transport goes here; until then reports are traced
        while let Ok(report) = POINTER_REPORTS.try_receive() {
            trace!("usb: {:?}", report);
        }

        wait_for_interrupt();
    }
}
