//! Monotonic millisecond time source.

/// Monotonic millisecond counter.
///
/// The counter is a `u32` and wraps after ~49.7 days, like a classic
/// millisecond tick. Always compare timestamps with [`elapsed_ms`], never with
/// plain subtraction or ordering.
pub trait Clock {
    /// Milliseconds since boot, wrapping at `u32::MAX`.
    fn now_ms(&self) -> u32;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_ms(&self) -> u32 {
        (**self).now_ms()
    }
}

/// Milliseconds from `since` to `now`, correct across one counter wrap.
#[inline]
#[must_use]
pub const fn elapsed_ms(now: u32, since: u32) -> u32 {
    now.wrapping_sub(since)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elapsed_is_plain_difference_without_wrap() {
        assert_eq!(elapsed_ms(1_500, 1_000), 500);
        assert_eq!(elapsed_ms(7, 7), 0);
    }

    #[test]
    fn elapsed_survives_counter_wrap() {
        assert_eq!(elapsed_ms(10, u32::MAX - 9), 20);
    }
}
