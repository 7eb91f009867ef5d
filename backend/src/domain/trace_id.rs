//! Per-request correlation id.
//!
//! The trace middleware installs a fresh [`TraceId`] in task-local storage for
//! every request. Domain errors and log lines read it back with
//! [`TraceId::current`]. Task locals do not follow `tokio::spawn` or
//! `spawn_blocking`, so work moved off the request task must be wrapped in
//! [`TraceId::scope`] or [`TraceId::sync_scope`].

use std::fmt;
use std::future::Future;
use std::str::FromStr;

use uuid::Uuid;

/// Response header carrying the trace id.
pub const TRACE_ID_HEADER: &str = "trace-id";

tokio::task_local! {
    static CURRENT: TraceId;
}

/// Correlation id shared by every log line and error of one request.
///
/// # Examples
/// ```
/// use safety_backend::TraceId;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let id: TraceId = "00000000-0000-0000-0000-000000000000".parse().expect("uuid");
/// let seen = TraceId::scope(id, async { TraceId::current() }).await;
/// assert_eq!(seen, Some(id));
/// # });
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TraceId(Uuid);

impl TraceId {
    pub(crate) fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    #[must_use]
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// The id of the request being served, if any.
    #[must_use]
    pub fn current() -> Option<Self> {
        CURRENT.try_with(|id| *id).ok()
    }

    #[must_use]
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Run `fut` with `trace_id` as the current id.
    pub async fn scope<F: Future>(trace_id: Self, fut: F) -> F::Output {
        CURRENT.scope(trace_id, fut).await
    }

    /// Synchronous counterpart of [`TraceId::scope`] for blocking threads.
    pub fn sync_scope<R>(trace_id: Self, f: impl FnOnce() -> R) -> R {
        CURRENT.sync_scope(trace_id, f)
    }
}

impl fmt::Display for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for TraceId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn nothing_in_scope_outside_a_request() {
        assert_eq!(TraceId::current(), None);
    }

    #[rstest]
    #[tokio::test]
    async fn scope_exposes_the_id() {
        let id = TraceId::generate();
        assert_eq!(TraceId::scope(id, async { TraceId::current() }).await, Some(id));
    }

    #[rstest]
    #[tokio::test]
    async fn sync_scope_reaches_blocking_threads() {
        let id = TraceId::generate();
        let seen = tokio::task::spawn_blocking(move || TraceId::sync_scope(id, TraceId::current))
            .await
            .expect("blocking task joins");
        assert_eq!(seen, Some(id));
    }

    #[rstest]
    #[case("00000000-0000-0000-0000-000000000000", true)]
    #[case("not-a-trace", false)]
    fn parses_only_uuids(#[case] raw: &str, #[case] ok: bool) {
        let parsed = raw.parse::<TraceId>();
        assert_eq!(parsed.is_ok(), ok);
        if let Ok(id) = parsed {
            assert_eq!(id.to_string(), raw);
            assert_eq!(TraceId::from_uuid(*id.as_uuid()), id);
        }
    }
}
