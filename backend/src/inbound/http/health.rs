//! Liveness, readiness and ping endpoints.
//!
//! `/health/*` probes are for orchestrators and report through status codes
//! only. `/api/ping` is the client-facing check and answers with the text
//! `ok` whenever the process can serve requests.

use std::sync::atomic::{AtomicBool, Ordering};

use actix_web::{HttpResponse, get, http::header, web};

/// Probe kinds answered by [`HealthState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Probe {
    /// Database pool built and migrations applied.
    Ready,
    /// Process not yet draining.
    Live,
}

/// Process health shared between the server and the probe handlers.
#[derive(Debug)]
pub struct HealthState {
    ready: AtomicBool,
    live: AtomicBool,
}

impl Default for HealthState {
    fn default() -> Self {
        Self {
            ready: AtomicBool::new(false),
            live: AtomicBool::new(true),
        }
    }
}

impl HealthState {
    /// Start live but not ready.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the service as ready once the listener is bound.
    pub fn mark_ready(&self) {
        self.ready.store(true, Ordering::Release);
    }

    /// Fail liveness so orchestrators stop routing during shutdown.
    pub fn mark_unhealthy(&self) {
        self.live.store(false, Ordering::Release);
    }

    /// Current answer for `probe`.
    pub fn passes(&self, probe: Probe) -> bool {
        match probe {
            Probe::Ready => self.ready.load(Ordering::Acquire),
            Probe::Live => self.live.load(Ordering::Acquire),
        }
    }

    fn respond(&self, probe: Probe) -> HttpResponse {
        let mut response = if self.passes(probe) {
            HttpResponse::Ok()
        } else {
            HttpResponse::ServiceUnavailable()
        };
        response
            .insert_header((header::CACHE_CONTROL, "no-store"))
            .finish()
    }
}

/// Readiness probe.
#[utoipa::path(
    get,
    path = "/health/ready",
    tags = ["health"],
    security([]),
    responses(
        (status = 200, description = "Server is ready to handle traffic"),
        (status = 503, description = "Server is not ready")
    )
)]
#[get("/health/ready")]
pub async fn ready(state: web::Data<HealthState>) -> HttpResponse {
    state.respond(Probe::Ready)
}

/// Liveness probe. Call [`HealthState::mark_unhealthy`] before a graceful
/// shutdown to surface the drain early.
#[utoipa::path(
    get,
    path = "/health/live",
    tags = ["health"],
    security([]),
    responses(
        (status = 200, description = "Server is alive"),
        (status = 503, description = "Server is shutting down")
    )
)]
#[get("/health/live")]
pub async fn live(state: web::Data<HealthState>) -> HttpResponse {
    state.respond(Probe::Live)
}

/// Check that the server is up.
#[utoipa::path(
    get,
    path = "/api/ping",
    tags = ["health"],
    security([]),
    responses(
        (status = 200, description = "Server can serve requests", body = String, content_type = "text/plain")
    )
)]
#[get("/ping")]
pub async fn ping() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body("ok")
}
