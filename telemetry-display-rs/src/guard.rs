//! Mutual exclusion around the display bus.
//!
//! On the Sprig the TFT shares its SPI bus with other peripherals, and the
//! coordinator can be driven from more than one execution context. Every
//! draw sequence therefore runs inside [`BusGuard::exclusive()`].

use embassy_sync::blocking_mutex::{raw::RawMutex, Mutex};

/// Runs a closure with exclusive access to the display bus.
///
/// Implementations must not return until `f` has finished, and must not let
/// two calls overlap. Calls are never nested by this crate.
pub trait BusGuard {
    /// Run `f` while holding the guard.
    fn exclusive<R>(&self, f: impl FnOnce() -> R) -> R;
}

/// Any embassy blocking mutex is a guard; the protected value is ignored.
///
/// With `CriticalSectionRawMutex` this excludes interrupts and the other
/// core for the duration of the draw.
impl<M: RawMutex, T> BusGuard for Mutex<M, T> {
    fn exclusive<R>(&self, f: impl FnOnce() -> R) -> R {
        self.lock(|_| f())
    }
}

impl<G: BusGuard + ?Sized> BusGuard for &G {
    fn exclusive<R>(&self, f: impl FnOnce() -> R) -> R {
        (**self).exclusive(f)
    }
}

/// Guard for a display that only one context ever touches.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unshared;

impl BusGuard for Unshared {
    #[inline]
    fn exclusive<R>(&self, f: impl FnOnce() -> R) -> R {
        f()
    }
}
