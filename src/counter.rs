//! Counters shared between interrupt handlers and the main loop.

use core::cell::Cell;

use critical_section::{CriticalSection, Mutex};

/// Integer types an [`IsrCounter`] can hold.
pub trait CounterValue: Copy + Default {
    fn wrapping_inc(self) -> Self;
}

macro_rules! impl_counter_value {
    ($($ty:ty),*) => {
        $(
            impl CounterValue for $ty {
                #[inline]
                fn wrapping_inc(self) -> Self {
                    self.wrapping_add(1)
                }
            }
        )*
    };
}

impl_counter_value!(u8, u16, u32);

/// A counter an interrupt handler bumps and the main loop reads.
///
/// Multi-byte values are only ever touched inside a critical section, so
/// the main loop never observes a half-updated value. Wraps on overflow.
///
/// ```
/// use embedded_memmap::counter::IsrCounter;
///
/// static TICKS: IsrCounter<u16> = IsrCounter::new(0);
///
/// // in the timer interrupt
/// TICKS.increment();
///
/// assert_eq!(TICKS.get(), 1);
/// ```
#[derive(Debug)]
pub struct IsrCounter<T: CounterValue> {
    value: Mutex<Cell<T>>,
}

impl<T: CounterValue> IsrCounter<T> {
    pub const fn new(value: T) -> Self {
        Self {
            value: Mutex::new(Cell::new(value)),
        }
    }

    /// Adds one and returns the new value.
    pub fn increment(&self) -> T {
        critical_section::with(|cs| self.increment_in(cs))
    }

    /// Adds one from code that already holds a critical section.
    pub fn increment_in(&self, cs: CriticalSection<'_>) -> T {
        let cell = self.value.borrow(cs);
        let next = cell.get().wrapping_inc();
        cell.set(next);
        next
    }

    pub fn get(&self) -> T {
        critical_section::with(|cs| self.value.borrow(cs).get())
    }

    pub fn set(&self, value: T) {
        critical_section::with(|cs| self.value.borrow(cs).set(value));
    }

    /// Returns the current value and resets the counter to zero.
    pub fn take(&self) -> T {
        critical_section::with(|cs| self.value.borrow(cs).replace(T::default()))
    }
}

impl<T: CounterValue> Default for IsrCounter<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}
