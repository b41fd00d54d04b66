// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Truncated exponential backoff with bounded jitter.
//!
//! The delay after attempt `n` is `initial_delay * scaling^(n-1)`, truncated
//! to the maximum delay. The result is then multiplied by a random factor in
//! the `[0.8, 1.2]` range, and clamped back to `[initial_delay,
//! maximum_delay]`.
//!
//! It implements the [BackoffPolicy] trait.
//!
//! [BackoffPolicy]: crate::backoff_policy::BackoffPolicy

use std::time::Duration;

const JITTER_LOW: f64 = 0.8;
const JITTER_HIGH: f64 = 1.2;

/// The error type for exponential backoff creation.
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("the scaling value ({0}) should be >= 1.0")]
    InvalidScalingFactor(f64),
    #[error("the initial delay ({0:?}) should be greater than zero")]
    InvalidInitialDelay(Duration),
    #[error(
        "the maximum delay ({maximum:?}) should be greater than or equal to the initial delay ({initial:?})"
    )]
    EmptyRange {
        maximum: Duration,
        initial: Duration,
    },
}

/// Creates [ExponentialBackoff] policies.
#[derive(Clone, Debug)]
pub struct ExponentialBackoffBuilder {
    initial_delay: Duration,
    maximum_delay: Duration,
    scaling: f64,
}

impl ExponentialBackoffBuilder {
    /// Creates a builder with the default parameters.
    ///
    /// The defaults are a one second initial delay, a 60 second maximum delay
    /// and a scaling factor of 2.0.
    ///
    /// # Example
    /// ```
    /// # use azure_sdk_core::exponential_backoff::Error;
    /// # use azure_sdk_core::exponential_backoff::ExponentialBackoffBuilder;
    /// use std::time::Duration;
    ///
    /// let policy = ExponentialBackoffBuilder::new()
    ///         .with_initial_delay(Duration::from_secs(3))
    ///         .with_maximum_delay(Duration::from_secs(90))
    ///         .build()?;
    /// # Ok::<(), Error>(())
    /// ```
    pub fn new() -> Self {
        Self {
            initial_delay: Duration::from_secs(1),
            maximum_delay: Duration::from_secs(60),
            scaling: 2.0,
        }
    }

    /// Change the initial delay.
    pub fn with_initial_delay<V: Into<Duration>>(mut self, v: V) -> Self {
        self.initial_delay = v.into();
        self
    }

    /// Change the maximum delay.
    pub fn with_maximum_delay<V: Into<Duration>>(mut self, v: V) -> Self {
        self.maximum_delay = v.into();
        self
    }

    /// Change the scaling factor in this backoff policy.
    pub fn with_scaling<V: Into<f64>>(mut self, v: V) -> Self {
        self.scaling = v.into();
        self
    }

    /// Creates a new exponential backoff policy.
    ///
    /// # Example
    /// ```
    /// # use azure_sdk_core::exponential_backoff::Error;
    /// # use azure_sdk_core::exponential_backoff::ExponentialBackoffBuilder;
    /// # use azure_sdk_core::backoff_policy::BackoffPolicy;
    /// use std::time::Duration;
    /// use std::time::Instant;
    /// let backoff = ExponentialBackoffBuilder::new()
    ///     .with_initial_delay(Duration::from_secs(5))
    ///     .with_maximum_delay(Duration::from_secs(50))
    ///     .with_scaling(2.0)
    ///     .build()?;
    /// let p = backoff.on_failure(Instant::now(), 1);
    /// assert!(p >= Duration::from_secs(5) && p <= Duration::from_secs(6));
    /// # Ok::<(), Error>(())
    /// ```
    pub fn build(self) -> Result<ExponentialBackoff, Error> {
        if self.scaling < 1.0 {
            return Err(Error::InvalidScalingFactor(self.scaling));
        }
        if self.initial_delay.is_zero() {
            return Err(Error::InvalidInitialDelay(self.initial_delay));
        }
        if self.maximum_delay < self.initial_delay {
            return Err(Error::EmptyRange {
                maximum: self.maximum_delay,
                initial: self.initial_delay,
            });
        }
        Ok(ExponentialBackoff {
            maximum_delay: self.maximum_delay,
            scaling: self.scaling,
            initial_delay: self.initial_delay,
        })
    }

    /// Creates a new exponential backoff policy clamping the ranges towards
    /// recommended values.
    ///
    /// The maximum delay is clamped first, to be between one second and one
    /// day (both inclusive). Then the initial delay is clamped to be between
    /// one millisecond and the maximum delay. Finally, the scaling factor is
    /// clamped to the `[1.0, 32.0]` range.
    ///
    /// # Example
    /// ```
    /// # use azure_sdk_core::exponential_backoff::ExponentialBackoffBuilder;
    /// # use azure_sdk_core::backoff_policy::BackoffPolicy;
    /// use std::time::Duration;
    /// use std::time::Instant;
    /// let backoff = ExponentialBackoffBuilder::new().with_scaling(0.5).clamp();
    /// assert!(backoff.on_failure(Instant::now(), 1) > Duration::ZERO);
    /// ```
    pub fn clamp(self) -> ExponentialBackoff {
        let scaling = self.scaling.clamp(1.0, 32.0);
        let maximum_delay = self
            .maximum_delay
            .clamp(Duration::from_secs(1), Duration::from_secs(24 * 60 * 60));
        let initial_delay = self
            .initial_delay
            .clamp(Duration::from_millis(1), maximum_delay);
        ExponentialBackoff {
            initial_delay,
            maximum_delay,
            scaling,
        }
    }
}

impl Default for ExponentialBackoffBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Implements truncated exponential backoff with bounded jitter.
#[derive(Debug)]
pub struct ExponentialBackoff {
    initial_delay: Duration,
    maximum_delay: Duration,
    scaling: f64,
}

impl ExponentialBackoff {
    fn delay(&self, _loop_start: std::time::Instant, attempt_count: u32) -> Duration {
        let exp = std::cmp::min(i32::MAX as u32, attempt_count) as i32;
        let exp = exp.saturating_sub(1);
        let scaling = self.scaling.powi(exp);
        if scaling >= self.maximum_delay.div_duration_f64(self.initial_delay) {
            self.maximum_delay
        } else {
            // scaling >= 1.0 and initial_delay * scaling < maximum_delay
            self.initial_delay.mul_f64(scaling)
        }
    }

    fn delay_with_jitter(
        &self,
        loop_start: std::time::Instant,
        attempt_count: u32,
        factor: f64,
    ) -> Duration {
        let delay = self.delay(loop_start, attempt_count);
        let jittered = delay.mul_f64(factor.clamp(JITTER_LOW, JITTER_HIGH));
        jittered.clamp(self.initial_delay, self.maximum_delay)
    }
}

impl Default for ExponentialBackoff {
    fn default() -> Self {
        Self {
            initial_delay: Duration::from_secs(1),
            maximum_delay: Duration::from_secs(60),
            scaling: 2.0,
        }
    }
}

impl crate::backoff_policy::BackoffPolicy for ExponentialBackoff {
    fn on_failure(&self, loop_start: std::time::Instant, attempt_count: u32) -> Duration {
        use rand::Rng;
        let factor = rand::rng().random_range(JITTER_LOW..=JITTER_HIGH);
        self.delay_with_jitter(loop_start, attempt_count, factor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backoff_policy::BackoffPolicy;
    use test_case::test_case;

    #[test]
    fn exponential_build_errors() {
        let b = ExponentialBackoffBuilder::new()
            .with_initial_delay(Duration::ZERO)
            .with_maximum_delay(Duration::from_secs(5))
            .build();
        assert!(matches!(b, Err(Error::InvalidInitialDelay(_))), "{b:?}");
        let b = ExponentialBackoffBuilder::new()
            .with_initial_delay(Duration::from_secs(10))
            .with_maximum_delay(Duration::from_secs(5))
            .build();
        assert!(matches!(b, Err(Error::EmptyRange { .. })), "{b:?}");

        let b = ExponentialBackoffBuilder::new().with_scaling(0.0).build();
        assert!(matches!(b, Err(Error::InvalidScalingFactor(_))), "{b:?}");
        let b = ExponentialBackoffBuilder::new().with_scaling(-1.0).build();
        assert!(matches!(b, Err(Error::InvalidScalingFactor(_))), "{b:?}");
    }

    #[test]
    fn exponential_builder_defaults() {
        let r = ExponentialBackoffBuilder::new().build();
        assert!(r.is_ok(), "{r:?}");
        let r = ExponentialBackoffBuilder::default().build();
        assert!(r.is_ok(), "{r:?}");
    }

    #[test_case(Duration::from_secs(1), Duration::MAX, 0.5; "scaling below range")]
    #[test_case(Duration::from_secs(1), Duration::MAX, 1_000_000.0; "scaling over range")]
    #[test_case(Duration::from_secs(1), Duration::MAX, 8.0; "max over range")]
    #[test_case(Duration::from_secs(1), Duration::ZERO, 8.0; "max below range")]
    #[test_case(Duration::from_secs(10), Duration::ZERO, 8.0; "init over range")]
    #[test_case(Duration::ZERO, Duration::ZERO, 8.0; "init below range")]
    fn exponential_clamp(init: Duration, max: Duration, scaling: f64) {
        let b = ExponentialBackoffBuilder::new()
            .with_initial_delay(init)
            .with_maximum_delay(max)
            .with_scaling(scaling)
            .clamp();
        assert_eq!(b.scaling.clamp(1.0, 32.0), b.scaling);
        assert_eq!(
            b.initial_delay
                .clamp(Duration::from_millis(1), b.maximum_delay),
            b.initial_delay
        );
        assert_eq!(
            b.maximum_delay
                .clamp(b.initial_delay, Duration::from_secs(24 * 60 * 60)),
            b.maximum_delay
        );
    }

    #[test]
    fn exponential_scaling() -> anyhow::Result<()> {
        let b = ExponentialBackoffBuilder::new()
            .with_initial_delay(Duration::from_secs(3))
            .with_maximum_delay(Duration::from_secs(90))
            .with_scaling(2.0)
            .build()?;

        let now = std::time::Instant::now();
        assert_eq!(b.delay(now, 1), Duration::from_secs(3));
        assert_eq!(b.delay(now, 2), Duration::from_secs(6));
        assert_eq!(b.delay(now, 3), Duration::from_secs(12));
        assert_eq!(b.delay(now, 6), Duration::from_secs(90));
        assert_eq!(b.delay(now, u32::MAX), Duration::from_secs(90));
        Ok(())
    }

    #[test_case(1, 0.8, Duration::from_secs(3); "low jitter clamped to initial")]
    #[test_case(1, 1.2, Duration::from_millis(3600))]
    #[test_case(2, 0.8, Duration::from_millis(4800))]
    #[test_case(2, 1.0, Duration::from_secs(6))]
    #[test_case(2, 1.2, Duration::from_millis(7200))]
    #[test_case(6, 0.8, Duration::from_secs(72))]
    #[test_case(6, 1.2, Duration::from_secs(90); "high jitter clamped to maximum")]
    #[test_case(2, 5.0, Duration::from_millis(7200); "factor is bounded")]
    fn exponential_jitter(attempt: u32, factor: f64, want: Duration) -> anyhow::Result<()> {
        let b = ExponentialBackoffBuilder::new()
            .with_initial_delay(Duration::from_secs(3))
            .with_maximum_delay(Duration::from_secs(90))
            .build()?;
        let now = std::time::Instant::now();
        let got = b.delay_with_jitter(now, attempt, factor);
        let diff = got.abs_diff(want);
        assert!(diff < Duration::from_millis(1), "{got:?} vs {want:?}");
        Ok(())
    }

    #[test]
    fn on_failure() -> anyhow::Result<()> {
        let b = ExponentialBackoffBuilder::new()
            .with_initial_delay(Duration::from_secs(1))
            .with_maximum_delay(Duration::from_secs(4))
            .with_scaling(2.0)
            .build()?;

        let now = std::time::Instant::now();
        for (attempt, lo, hi) in [
            (1, 1000, 1200),
            (2, 1600, 2400),
            (3, 3200, 4000),
            (4, 3200, 4000),
            (5, 3200, 4000),
        ] {
            let d = b.on_failure(now, attempt);
            assert!(
                Duration::from_millis(lo) <= d && d <= Duration::from_millis(hi),
                "{attempt} {d:?}"
            );
        }
        Ok(())
    }

    #[test]
    fn default() {
        let b = ExponentialBackoff::default();
        let now = std::time::Instant::now();
        assert_eq!(b.delay(now, 1), Duration::from_secs(1));
        assert_eq!(b.delay(now, 2), Duration::from_secs(2));
        assert_eq!(b.delay(now, 3), Duration::from_secs(4));
    }
}
