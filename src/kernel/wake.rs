// Wake flag signaling between the scan timer ISR and the main loop
//
// The ISR sets an atomic flag; the main loop consumes it via try_wake().
// Critical section guards riscv32imc (no atomic RMW).
// Uptime is kept in milliseconds and wraps after ~49 days; every
// consumer compares timestamps with wrapping_sub.

use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};

static WAKE_SCAN: AtomicBool = AtomicBool::new(false);

// ms added per timer interrupt
static TICK_MS: AtomicU32 = AtomicU32::new(1);

// cs: riscv32imc has no atomic add
static UPTIME_MS: critical_section::Mutex<core::cell::Cell<u32>> =
    critical_section::Mutex::new(core::cell::Cell::new(0));

/// Called from the timer ISR once per scan period.
#[inline]
pub fn signal_scan() {
    WAKE_SCAN.store(true, Ordering::Release);
    let step = TICK_MS.load(Ordering::Relaxed);
    critical_section::with(|cs| {
        let ms = UPTIME_MS.borrow(cs);
        ms.set(ms.get().wrapping_add(step));
    });
}

pub fn set_tick_ms(ms: u32) {
    TICK_MS.store(ms, Ordering::Release);
}

pub fn uptime_ms() -> u32 {
    critical_section::with(|cs| UPTIME_MS.borrow(cs).get())
}

#[inline]
pub fn wait_for_interrupt() {
    #[cfg(target_arch = "riscv32")]
    unsafe {
        core::arch::asm!("wfi", options(nomem, nostack));
    }

    #[cfg(not(target_arch = "riscv32"))]
    core::hint::spin_loop();
}

/// Consume a pending scan wake-up.
pub fn try_wake() -> bool {
    critical_section::with(|_| {
        let due = WAKE_SCAN.load(Ordering::Relaxed);
        if due {
            WAKE_SCAN.store(false, Ordering::Relaxed);
        }
        due
    })
}
