use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use axum::body::Body;
use axum::extract::State;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::error::Error;

const WINDOW: Duration = Duration::from_secs(1);

#[derive(Debug)]
struct Window {
    opened_at: Instant,
    hits: u32,
}

/// Fixed one-second window shared by every route behind the layer. The
/// public intake and the staff API each get their own instance.
#[derive(Clone, Debug)]
pub struct RateLimiter {
    limit: u32,
    window: Arc<Mutex<Window>>,
}

impl RateLimiter {
    pub fn new(rps: u32) -> Self {
        Self {
            limit: rps.max(1),
            window: Arc::new(Mutex::new(Window {
                opened_at: Instant::now(),
                hits: 0,
            })),
        }
    }

    /// Counts a hit at `now`, or returns how long until the window reopens.
    fn check(&self, now: Instant) -> Result<(), Duration> {
        // The window only holds a counter, so a poisoned lock is still usable.
        let mut window = self
            .window
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let elapsed = now.saturating_duration_since(window.opened_at);
        if elapsed >= WINDOW {
            window.opened_at = now;
            window.hits = 0;
        }
        if window.hits >= self.limit {
            return Err(WINDOW.saturating_sub(elapsed));
        }
        window.hits += 1;
        Ok(())
    }
}

pub async fn rps_middleware(
    State(limiter): State<RateLimiter>,
    req: Request<Body>,
    next: Next,
) -> Response {
    if let Err(wait) = limiter.check(Instant::now()) {
        tracing::warn!(path = %req.uri().path(), "rate limit exceeded");
        let retry_after_secs = wait.as_secs() + u64::from(wait.subsec_nanos() > 0);
        return Error::RateLimited { retry_after_secs }.into_response();
    }
    next.run(req).await
}
