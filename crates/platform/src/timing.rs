//! Timing and liveness primitives
//!
//! Blocking delays come from `embedded_hal_async::delay::DelayNs`; this
//! module adds the monotonic clock and the loop watchdog the voice task
//! has to cooperate with.

use embassy_time::Instant;

/// Monotonic time source.
pub trait Clock {
    /// Current time since boot.
    fn now(&self) -> Instant;
}

impl<T: Clock + ?Sized> Clock for &T {
    fn now(&self) -> Instant {
        (**self).now()
    }
}

/// Liveness watchdog guarding the cooperative main loop.
///
/// The loop task feeds it once per iteration; anything that blocks the loop
/// longer than the timeout must switch it off first.
pub trait LoopWatchdog {
    /// Returns `true` if the watchdog is currently armed.
    fn is_enabled(&self) -> bool;

    /// Arm the watchdog.
    fn enable(&mut self);

    /// Disarm the watchdog.
    fn disable(&mut self);
}

/// Suspends a [`LoopWatchdog`] for as long as the guard lives.
///
/// Only a watchdog that was armed at construction is re-armed on drop, so a
/// watchdog disabled by configuration stays disabled.
pub struct WatchdogSuspension<'a, W: LoopWatchdog + ?Sized> {
    watchdog: &'a mut W,
    was_enabled: bool,
}

impl<'a, W: LoopWatchdog + ?Sized> WatchdogSuspension<'a, W> {
    /// Disarm `watchdog` if it is armed.
    pub fn new(watchdog: &'a mut W) -> Self {
        let was_enabled = watchdog.is_enabled();
        if was_enabled {
            watchdog.disable();
        }
        Self {
            watchdog,
            was_enabled,
        }
    }

    /// Whether the guard will re-arm the watchdog on drop.
    pub fn was_enabled(&self) -> bool {
        self.was_enabled
    }
}

impl<W: LoopWatchdog + ?Sized> Drop for WatchdogSuspension<'_, W> {
    fn drop(&mut self) {
        if self.was_enabled {
            self.watchdog.enable();
        }
    }
}
