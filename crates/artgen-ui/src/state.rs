use artgen_client::GenerationResult;
use strum::Display;

/// Status shown while a request is in flight
pub const LOADING_STATUS: &str = "Generating...";

/// Status shown when a failure carries no message
pub const FALLBACK_ERROR_STATUS: &str = "An error occurred";

/// Lifecycle phase of the generate-and-render cycle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Phase {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

/// Identifies one submit cycle
///
/// Only the token of the in-flight cycle may complete it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestToken(u64);

impl RequestToken {
    pub const fn sequence(self) -> u64 {
        self.0
    }
}

/// Controller-owned UI state, changed only through the transitions below
#[derive(Debug, Default)]
pub struct GenerationState {
    phase: Phase,
    status: String,
    last_error: Option<String>,
    last_results: Option<GenerationResult>,
    sequence: u64,
    in_flight: Option<u64>,
}

impl GenerationState {
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Text of the status line
    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub const fn last_results(&self) -> Option<&GenerationResult> {
        self.last_results.as_ref()
    }

    /// Whether the submit control accepts clicks
    pub fn submit_enabled(&self) -> bool {
        self.phase != Phase::Loading
    }

    /// Whether the loading indicator is shown
    pub fn loading_visible(&self) -> bool {
        self.phase == Phase::Loading
    }

    /// Enter `Loading`, unless a cycle is already running
    pub fn begin(&mut self) -> Option<RequestToken> {
        if self.phase == Phase::Loading {
            return None;
        }

        self.sequence += 1;
        self.in_flight = Some(self.sequence);
        self.phase = Phase::Loading;
        LOADING_STATUS.clone_into(&mut self.status);

        tracing::debug!(sequence = self.sequence, "generation started");

        Some(RequestToken(self.sequence))
    }

    /// Whether `token` belongs to the running cycle
    pub fn is_current(&self, token: RequestToken) -> bool {
        self.in_flight == Some(token.0)
    }

    /// Finish the cycle with images; `false` if `token` is stale
    pub fn succeed(&mut self, token: RequestToken, result: GenerationResult) -> bool {
        if !self.settle(token) {
            return false;
        }

        self.phase = Phase::Success;
        self.status = format!("Generated {} image(s)", result.images.len());
        self.last_error = None;
        self.last_results = Some(result);

        tracing::debug!(sequence = token.0, status = %self.status, "generation succeeded");
        true
    }

    /// Finish the cycle with a failure; `false` if `token` is stale
    pub fn fail(&mut self, token: RequestToken, message: &str) -> bool {
        if !self.settle(token) {
            return false;
        }

        self.phase = Phase::Error;
        let message = if message.is_empty() { FALLBACK_ERROR_STATUS } else { message };
        message.clone_into(&mut self.status);
        self.last_error = Some(message.to_owned());

        tracing::debug!(sequence = token.0, error = %message, "generation failed");
        true
    }

    fn settle(&mut self, token: RequestToken) -> bool {
        if !self.is_current(token) {
            tracing::warn!(sequence = token.0, current = ?self.in_flight, "discarding stale generation result");
            return false;
        }

        self.in_flight = None;
        true
    }
}
