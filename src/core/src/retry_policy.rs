// Copyright 2024 Google LLC
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

//! Defines traits for retry policies and some common implementations.
//!
//! The client libraries automatically retry requests when they fail due to
//! transient errors and the operation is idempotent, that is, it is safe to
//! perform the operation more than once.
//!
//! Applications may override the default behavior, for example, to retry
//! operations that are not safe in general, but are safe given how the
//! application manages resources.
//!
//! # Example
//! ```
//! # use azure_sdk_core::retry_policy::*;
//! use std::time::Duration;
//! // Retry for at most 30 seconds or at most 5 attempts: whichever limit is
//! // reached first stops the retry loop.
//! let policy = RetryableErrors
//!     .with_time_limit(Duration::from_secs(30))
//!     .with_attempt_limit(5);
//! ```

use crate::error::Error;
use crate::retry_result::RetryResult;
use std::sync::Arc;
use std::time::Duration;

/// The HTTP status codes considered transient by [RetryableErrors].
///
/// `501 Not Implemented` and `505 HTTP Version Not Supported` are never
/// retried.
pub const RETRYABLE_STATUS_CODES: [u16; 6] = [408, 429, 500, 502, 503, 504];

/// Determines how errors are handled in the retry loop.
///
/// Implementations of this trait determine if errors are retryable, and for
/// how long the retry loop may continue.
pub trait RetryPolicy: Send + Sync + std::fmt::Debug {
    /// Query the retry policy after an error.
    ///
    /// # Parameters
    /// * `loop_start` - when the retry loop started.
    /// * `attempt_count` - the number of attempts. This includes the initial
    ///   attempt. This method is called after the first attempt, so the
    ///   value is always non-zero.
    /// * `idempotent` - if `true` assume the operation is idempotent. Many more
    ///   errors are retryable on idempotent operations.
    /// * `error` - the last error when attempting the request.
    fn on_error(
        &self,
        loop_start: std::time::Instant,
        attempt_count: u32,
        idempotent: bool,
        error: Error,
    ) -> RetryResult;

    /// The remaining time in the retry policy.
    ///
    /// For policies based on time, this returns the remaining time in the
    /// policy. The retry loop can use this value to adjust the next request
    /// timeout. For policies that are not time based this returns `None`.
    fn remaining_time(
        &self,
        _loop_start: std::time::Instant,
        _attempt_count: u32,
    ) -> Option<Duration> {
        None
    }
}

/// A helper type to use [RetryPolicy] in client and request options.
#[derive(Clone)]
pub struct RetryPolicyArg(Arc<dyn RetryPolicy>);

impl<T> std::convert::From<T> for RetryPolicyArg
where
    T: RetryPolicy + 'static,
{
    fn from(value: T) -> Self {
        Self(Arc::new(value))
    }
}

impl std::convert::From<Arc<dyn RetryPolicy>> for RetryPolicyArg {
    fn from(value: Arc<dyn RetryPolicy>) -> Self {
        Self(value)
    }
}

impl From<RetryPolicyArg> for Arc<dyn RetryPolicy> {
    fn from(value: RetryPolicyArg) -> Arc<dyn RetryPolicy> {
        value.0
    }
}

/// Extension trait for [RetryPolicy]
pub trait RetryPolicyExt: RetryPolicy + Sized {
    /// Decorate a [RetryPolicy] to limit the total elapsed time in the retry
    /// loop.
    ///
    /// While the time spent in the retry loop (including time in backoff) is
    /// less than the prescribed duration the `on_error()` method returns the
    /// results of the inner policy. After that time it returns
    /// [Exhausted][RetryResult::Exhausted] if the inner policy returns
    /// [Continue][RetryResult::Continue].
    ///
    /// # Example
    /// ```
    /// # use azure_sdk_core::*;
    /// use retry_policy::*;
    /// use std::time::{Duration, Instant};
    /// let policy = RetryableErrors.with_time_limit(Duration::from_secs(10));
    /// let start = Instant::now() - Duration::from_secs(20);
    /// assert!(policy.on_error(start, 1, true, transient_error()).is_exhausted());
    ///
    /// use azure_sdk_core::error::Error;
    /// fn transient_error() -> Error { Error::io("connection reset") }
    /// ```
    fn with_time_limit(self, maximum_duration: Duration) -> LimitedElapsedTime<Self> {
        LimitedElapsedTime::custom(self, maximum_duration)
    }

    /// Decorate a [RetryPolicy] to limit the number of attempts.
    ///
    /// The policy passes through the results from the inner policy as long as
    /// `attempt_count < maximum_attempts`. Once the maximum number of attempts
    /// is reached, the policy returns [Exhausted][RetryResult::Exhausted] if
    /// the inner policy returns [Continue][RetryResult::Continue].
    ///
    /// # Example
    /// ```
    /// # use azure_sdk_core::*;
    /// use retry_policy::*;
    /// use std::time::Instant;
    /// let policy = RetryableErrors.with_attempt_limit(3);
    /// assert!(policy.on_error(Instant::now(), 1, true, transient_error()).is_continue());
    /// assert!(policy.on_error(Instant::now(), 2, true, transient_error()).is_continue());
    /// assert!(policy.on_error(Instant::now(), 3, true, transient_error()).is_exhausted());
    ///
    /// use azure_sdk_core::error::Error;
    /// fn transient_error() -> Error { Error::io("connection reset") }
    /// ```
    fn with_attempt_limit(self, maximum_attempts: u32) -> LimitedAttemptCount<Self> {
        LimitedAttemptCount::custom(self, maximum_attempts)
    }
}

impl<T: RetryPolicy> RetryPolicyExt for T {}

/// The default retry policy for the Azure services.
///
/// This policy must be decorated to limit the number of retry attempts or the
/// duration of the retry loop.
///
/// The policy retries:
/// * authentication errors reported as transient, these happen before the
///   request is sent and are always safe to retry,
/// * i/o and timeout errors on idempotent operations,
/// * responses with status codes in [RETRYABLE_STATUS_CODES] on idempotent
///   operations.
///
/// # Example
/// ```
/// # use azure_sdk_core::retry_policy::*;
/// use std::time::Instant;
/// let policy = RetryableErrors;
/// assert!(policy.on_error(Instant::now(), 1, true, busy()).is_continue());
/// assert!(policy.on_error(Instant::now(), 1, false, busy()).is_permanent());
///
/// use azure_sdk_core::error::{Error, Status};
/// fn busy() -> Error {
///     Error::service_with_http_metadata(Status::default().set_code("ServerBusy"), Some(503), None)
/// }
/// ```
#[derive(Clone, Debug)]
pub struct RetryableErrors;

impl RetryPolicy for RetryableErrors {
    fn on_error(
        &self,
        _loop_start: std::time::Instant,
        _attempt_count: u32,
        idempotent: bool,
        error: Error,
    ) -> RetryResult {
        if error.is_transient_and_before_rpc() {
            return RetryResult::Continue(error);
        }
        if !idempotent {
            return RetryResult::Permanent(error);
        }
        if error.is_io() || error.is_timeout() {
            return RetryResult::Continue(error);
        }
        match error.http_status_code() {
            Some(code) if RETRYABLE_STATUS_CODES.contains(&code) => RetryResult::Continue(error),
            _ => RetryResult::Permanent(error),
        }
    }
}

/// Retries errors where the request did not produce an HTTP response.
///
/// Connection failures, dropped connections and attempt timeouts are retried
/// regardless of the operation idempotency. Any error with an HTTP status code
/// is permanent for this policy.
///
/// This policy must be decorated to limit the number of retry attempts or the
/// duration of the retry loop.
#[derive(Clone, Debug)]
pub struct SystemErrors;

impl RetryPolicy for SystemErrors {
    fn on_error(
        &self,
        _loop_start: std::time::Instant,
        _attempt_count: u32,
        _idempotent: bool,
        error: Error,
    ) -> RetryResult {
        if error.is_transient_and_before_rpc() || error.is_io() || error.is_timeout() {
            return RetryResult::Continue(error);
        }
        RetryResult::Permanent(error)
    }
}

/// A retry policy that retries all errors.
///
/// This policy must be decorated to limit the number of retry attempts or the
/// duration of the retry loop.
///
/// The policy retries all errors. This may be useful if the service guarantees
/// idempotency, maybe through the use of request ids.
///
/// # Example
/// ```
/// # use azure_sdk_core::retry_policy::*;
/// use std::time::Instant;
/// let policy = AlwaysRetry;
/// assert!(policy.on_error(Instant::now(), 1, false, permanent_error()).is_continue());
///
/// use azure_sdk_core::error::{Error, Status};
/// fn permanent_error() -> Error { Error::service(Status::default().set_code("AuthenticationFailed")) }
/// ```
#[derive(Clone, Debug)]
pub struct AlwaysRetry;

impl RetryPolicy for AlwaysRetry {
    fn on_error(
        &self,
        _loop_start: std::time::Instant,
        _attempt_count: u32,
        _idempotent: bool,
        error: Error,
    ) -> RetryResult {
        RetryResult::Continue(error)
    }
}

/// A retry policy that never retries.
///
/// This policy is useful when the client already has (or may already have)
/// a retry policy configured, and you want to avoid retrying a particular
/// request.
///
/// # Example
/// ```
/// # use azure_sdk_core::retry_policy::*;
/// use std::time::Instant;
/// let policy = NeverRetry;
/// assert!(policy.on_error(Instant::now(), 1, true, transient_error()).is_exhausted());
///
/// use azure_sdk_core::error::Error;
/// fn transient_error() -> Error { Error::io("connection reset") }
/// ```
#[derive(Clone, Debug)]
pub struct NeverRetry;

impl RetryPolicy for NeverRetry {
    fn on_error(
        &self,
        _loop_start: std::time::Instant,
        _attempt_count: u32,
        _idempotent: bool,
        error: Error,
    ) -> RetryResult {
        RetryResult::Exhausted(error)
    }
}

/// A retry policy decorator that limits the total time in the retry loop.
///
/// This policy decorates an inner policy and limits the duration of retry
/// loops. While the time spent in the retry loop (including time in backoff)
/// is less than the prescribed duration the `on_error()` method returns the
/// results of the inner policy. After that time it returns
/// [Exhausted][RetryResult::Exhausted] if the inner policy returns
/// [Continue][RetryResult::Continue].
///
/// The `remaining_time()` function returns the remaining time. This is always
/// [Duration::ZERO] once or after the policy's deadline is reached.
///
/// # Parameters
/// * `P` - the inner retry policy, defaults to [RetryableErrors].
#[derive(Debug)]
pub struct LimitedElapsedTime<P = RetryableErrors>
where
    P: RetryPolicy,
{
    inner: P,
    maximum_duration: Duration,
}

impl LimitedElapsedTime {
    /// Creates a new instance, with the default inner policy.
    ///
    /// # Example
    /// ```
    /// # use azure_sdk_core::retry_policy::*;
    /// use std::time::{Duration, Instant};
    /// let policy = LimitedElapsedTime::new(Duration::from_secs(10));
    /// let start = Instant::now() - Duration::from_secs(20);
    /// assert!(policy.on_error(start, 1, true, transient_error()).is_exhausted());
    ///
    /// use azure_sdk_core::error::Error;
    /// fn transient_error() -> Error { Error::io("connection reset") }
    /// ```
    pub fn new(maximum_duration: Duration) -> Self {
        Self {
            inner: RetryableErrors,
            maximum_duration,
        }
    }
}

impl<P> LimitedElapsedTime<P>
where
    P: RetryPolicy,
{
    /// Creates a new instance with a custom inner policy.
    pub fn custom(inner: P, maximum_duration: Duration) -> Self {
        Self {
            inner,
            maximum_duration,
        }
    }
}

impl<P> RetryPolicy for LimitedElapsedTime<P>
where
    P: RetryPolicy + 'static,
{
    fn on_error(
        &self,
        start: std::time::Instant,
        count: u32,
        idempotent: bool,
        error: Error,
    ) -> RetryResult {
        match self.inner.on_error(start, count, idempotent, error) {
            RetryResult::Permanent(e) => RetryResult::Permanent(e),
            RetryResult::Exhausted(e) => RetryResult::Exhausted(e),
            RetryResult::Continue(e) => {
                if std::time::Instant::now() >= start + self.maximum_duration {
                    RetryResult::Exhausted(e)
                } else {
                    RetryResult::Continue(e)
                }
            }
        }
    }

    fn remaining_time(&self, start: std::time::Instant, count: u32) -> Option<Duration> {
        let deadline = start + self.maximum_duration;
        let remaining = deadline.saturating_duration_since(std::time::Instant::now());
        if let Some(inner) = self.inner.remaining_time(start, count) {
            return Some(std::cmp::min(remaining, inner));
        }
        Some(remaining)
    }
}

/// A retry policy decorator that limits the number of attempts.
///
/// This policy decorates an inner policy and limits the total number of
/// attempts. Note that `on_error()` is called only after an attempt fails.
/// Therefore, setting the maximum number of attempts to 0 or 1 results in no
/// retries after the initial attempt.
///
/// # Parameters
/// * `P` - the inner retry policy, defaults to [RetryableErrors].
#[derive(Debug)]
pub struct LimitedAttemptCount<P = RetryableErrors>
where
    P: RetryPolicy,
{
    inner: P,
    maximum_attempts: u32,
}

impl LimitedAttemptCount {
    /// Creates a new instance, with the default inner policy.
    ///
    /// # Example
    /// ```
    /// # use azure_sdk_core::retry_policy::*;
    /// use std::time::Instant;
    /// let policy = LimitedAttemptCount::new(5);
    /// let attempt_count = 10;
    /// assert!(policy.on_error(Instant::now(), attempt_count, true, transient_error()).is_exhausted());
    ///
    /// use azure_sdk_core::error::Error;
    /// fn transient_error() -> Error { Error::io("connection reset") }
    /// ```
    pub fn new(maximum_attempts: u32) -> Self {
        Self {
            inner: RetryableErrors,
            maximum_attempts,
        }
    }
}

impl<P> LimitedAttemptCount<P>
where
    P: RetryPolicy,
{
    /// Creates a new instance with a custom inner policy.
    pub fn custom(inner: P, maximum_attempts: u32) -> Self {
        Self {
            inner,
            maximum_attempts,
        }
    }
}

impl<P> RetryPolicy for LimitedAttemptCount<P>
where
    P: RetryPolicy,
{
    fn on_error(
        &self,
        start: std::time::Instant,
        count: u32,
        idempotent: bool,
        error: Error,
    ) -> RetryResult {
        match self.inner.on_error(start, count, idempotent, error) {
            RetryResult::Continue(e) if count >= self.maximum_attempts => {
                RetryResult::Exhausted(e)
            }
            result => result,
        }
    }

    fn remaining_time(&self, start: std::time::Instant, count: u32) -> Option<Duration> {
        self.inner.remaining_time(start, count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CredentialsError, Status};
    use std::time::Instant;
    use test_case::test_case;

    fn from_status_code(code: u16) -> Error {
        Error::service_with_http_metadata(Status::default().set_code("test-only"), Some(code), None)
    }

    fn http_error(code: u16) -> Error {
        Error::http(code, http::HeaderMap::new(), bytes::Bytes::from_static(b"uh-oh"))
    }

    #[test_case(408)]
    #[test_case(429)]
    #[test_case(500)]
    #[test_case(502)]
    #[test_case(503)]
    #[test_case(504)]
    fn retryable_errors_transient(code: u16) {
        let p = RetryableErrors;
        let now = Instant::now();
        assert!(p.on_error(now, 1, true, from_status_code(code)).is_continue());
        assert!(p.on_error(now, 1, false, from_status_code(code)).is_permanent());
        assert!(p.on_error(now, 1, true, http_error(code)).is_continue());
        assert!(p.on_error(now, 1, false, http_error(code)).is_permanent());
    }

    #[test_case(400)]
    #[test_case(401)]
    #[test_case(403)]
    #[test_case(404)]
    #[test_case(409)]
    #[test_case(412)]
    #[test_case(501)]
    #[test_case(505)]
    fn retryable_errors_permanent(code: u16) {
        let p = RetryableErrors;
        let now = Instant::now();
        assert!(p.on_error(now, 1, true, from_status_code(code)).is_permanent());
        assert!(p.on_error(now, 1, false, from_status_code(code)).is_permanent());
        assert!(p.on_error(now, 1, true, http_error(code)).is_permanent());
    }

    #[test]
    fn retryable_errors_other() {
        let p = RetryableErrors;
        let now = Instant::now();

        assert!(p.on_error(now, 1, true, Error::io("err")).is_continue());
        assert!(p.on_error(now, 1, false, Error::io("err")).is_permanent());
        assert!(p.on_error(now, 1, true, Error::timeout("err")).is_continue());
        assert!(p.on_error(now, 1, false, Error::timeout("err")).is_permanent());

        let transient = || Error::authentication(CredentialsError::from_msg(true, "err"));
        assert!(p.on_error(now, 1, true, transient()).is_continue());
        assert!(p.on_error(now, 1, false, transient()).is_continue());
        let permanent = || Error::authentication(CredentialsError::from_msg(false, "err"));
        assert!(p.on_error(now, 1, true, permanent()).is_permanent());

        assert!(p.on_error(now, 1, true, Error::ser("err")).is_permanent());
        assert!(p.on_error(now, 1, true, Error::deser("err")).is_permanent());
        assert!(p.on_error(now, 1, true, Error::other("err")).is_permanent());
        assert!(p.remaining_time(now, 1).is_none());
    }

    #[test_case(true)]
    #[test_case(false)]
    fn system_errors(idempotent: bool) {
        let p = SystemErrors;
        let now = Instant::now();
        assert!(p.on_error(now, 1, idempotent, Error::io("err")).is_continue());
        assert!(p.on_error(now, 1, idempotent, Error::timeout("err")).is_continue());
        assert!(
            p.on_error(now, 1, idempotent, http_error(503))
                .is_permanent()
        );
        assert!(
            p.on_error(now, 1, idempotent, from_status_code(500))
                .is_permanent()
        );
    }

    #[test_case(true)]
    #[test_case(false)]
    fn always_and_never(idempotent: bool) {
        let now = Instant::now();
        assert!(
            AlwaysRetry
                .on_error(now, 1, idempotent, from_status_code(404))
                .is_continue()
        );
        assert!(
            NeverRetry
                .on_error(now, 1, idempotent, Error::io("err"))
                .is_exhausted()
        );
    }

    #[test]
    fn limited_elapsed_time() {
        let policy = LimitedElapsedTime::new(Duration::from_secs(20));
        let now = Instant::now();
        assert!(policy.on_error(now, 1, true, Error::io("err")).is_continue());
        assert!(
            policy
                .on_error(now, 1, true, from_status_code(404))
                .is_permanent()
        );

        let start = now - Duration::from_secs(30);
        let result = policy.on_error(start, 1, true, Error::io("err"));
        assert!(result.is_exhausted(), "{result:?}");
        // The error is passed unchanged.
        assert!(result.into_error().is_io());
        let result = policy.on_error(start, 1, true, from_status_code(404));
        assert!(result.is_permanent(), "{result:?}");
    }

    #[test]
    fn limited_elapsed_time_remaining() {
        let policy = LimitedElapsedTime::new(Duration::from_secs(20));
        let remaining = policy.remaining_time(Instant::now(), 1);
        assert!(
            remaining.is_some_and(|d| d <= Duration::from_secs(20) && d > Duration::from_secs(10)),
            "{remaining:?}"
        );
        let start = Instant::now() - Duration::from_secs(30);
        assert_eq!(policy.remaining_time(start, 1), Some(Duration::ZERO));

        let policy = LimitedElapsedTime::custom(
            LimitedElapsedTime::new(Duration::from_secs(5)),
            Duration::from_secs(20),
        );
        let remaining = policy.remaining_time(Instant::now(), 1);
        assert!(
            remaining.is_some_and(|d| d <= Duration::from_secs(5)),
            "{remaining:?}"
        );
    }

    #[test]
    fn limited_attempt_count() {
        let policy = LimitedAttemptCount::new(3);
        let now = Instant::now();
        assert!(policy.on_error(now, 1, true, Error::io("err")).is_continue());
        assert!(policy.on_error(now, 2, true, Error::io("err")).is_continue());
        let result = policy.on_error(now, 3, true, Error::io("err"));
        assert!(result.is_exhausted(), "{result:?}");
        assert!(result.into_error().is_io());
        assert!(
            policy
                .on_error(now, 3, true, from_status_code(404))
                .is_permanent()
        );
        assert!(policy.remaining_time(now, 1).is_none());
    }

    #[test]
    fn composed() {
        let policy = SystemErrors
            .with_attempt_limit(4)
            .with_time_limit(Duration::from_secs(60));
        let now = Instant::now();
        assert!(policy.on_error(now, 3, true, Error::io("err")).is_continue());
        assert!(policy.on_error(now, 4, true, Error::io("err")).is_exhausted());
        assert!(policy.remaining_time(now, 1).is_some());
    }

    #[test]
    fn retry_policy_arg() {
        let _ = RetryPolicyArg::from(RetryableErrors);
        let policy: Arc<dyn RetryPolicy> = Arc::new(NeverRetry);
        let arg = RetryPolicyArg::from(policy);
        let _: Arc<dyn RetryPolicy> = arg.into();
    }
}
