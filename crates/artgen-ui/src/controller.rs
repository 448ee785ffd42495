//! The generation controller
//!
//! Owns the form, the lifecycle state, the gallery and the toast container,
//! and reacts to a small set of commands. A submit is split into a
//! synchronous start, which validates and enters `Loading` before anything
//! touches the network, and a finish that applies the backend's answer.

use std::time::Instant;

use artgen_client::{GenerationBackend, GenerationRequest, GenerationResult, ImageModel};

use crate::download::{DownloadError, DownloadLink, DownloadSurface, trigger_download};
use crate::form::{FormState, ValidationError};
use crate::gallery::{DownloadHandle, Gallery};
use crate::notify::{NotificationTiming, Notifications, Severity};
use crate::state::{GenerationState, Phase, RequestToken};

/// Toast shown after a successful generation
pub const SUCCESS_TOAST: &str = "Images generated successfully!";

/// User actions the controller understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// The generate button was pressed
    Submit,
    /// The model selector changed
    ModelChanged(ImageModel),
    /// The download button of the card at this position was pressed
    DownloadRequested(usize),
}

/// What a command did
#[derive(Debug)]
pub enum Outcome {
    /// Submit refused before any network activity
    Rejected(ValidationError),
    /// Submit ignored because a cycle is already running
    Busy,
    /// Cycle ended in `Success` with this many cards
    Generated { count: usize },
    /// Cycle ended in `Error`
    Failed { message: String },
    /// Size and quality selectors were repopulated
    OptionsReplaced,
    Downloaded(DownloadLink),
    DownloadFailed(DownloadError),
}

/// Why `start_submit` did not enter `Loading`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitRejection {
    Invalid(ValidationError),
    Busy,
}

/// A started cycle waiting for the backend
///
/// Only `start_submit` creates one and `finish_submit` consumes it, so each
/// cycle settles exactly once and the submit guard stays closed until then.
#[derive(Debug)]
pub struct PendingGeneration {
    token: RequestToken,
    request: GenerationRequest,
}

impl PendingGeneration {
    /// Request captured from the form at submit time
    pub const fn request(&self) -> &GenerationRequest {
        &self.request
    }

    pub const fn token(&self) -> RequestToken {
        self.token
    }
}

/// Drives the generate-and-render lifecycle
pub struct Controller<B, S> {
    backend: B,
    surface: S,
    form: FormState,
    state: GenerationState,
    gallery: Gallery,
    notifications: Notifications,
}

impl<B, S> Controller<B, S> {
    pub fn new(backend: B, surface: S, form: FormState, timing: NotificationTiming) -> Self {
        Self {
            backend,
            surface,
            form,
            state: GenerationState::default(),
            gallery: Gallery::default(),
            notifications: Notifications::new(timing),
        }
    }

    pub const fn form(&self) -> &FormState {
        &self.form
    }

    /// Form controls; typing into them never changes an in-flight request
    pub const fn form_mut(&mut self) -> &mut FormState {
        &mut self.form
    }

    pub const fn state(&self) -> &GenerationState {
        &self.state
    }

    /// Current phase, for callers that only care about the lifecycle
    pub const fn phase(&self) -> Phase {
        self.state.phase()
    }

    pub const fn gallery(&self) -> &Gallery {
        &self.gallery
    }

    pub const fn notifications(&self) -> &Notifications {
        &self.notifications
    }

    pub const fn backend(&self) -> &B {
        &self.backend
    }

    pub const fn surface(&self) -> &S {
        &self.surface
    }

    pub const fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Remove toasts whose fade has finished
    pub fn tick(&mut self, now: Instant) {
        self.notifications.sweep(now);
    }

    /// Repopulate size and quality for `model`
    pub fn change_model(&mut self, model: ImageModel) {
        self.form.select_model(model);
        tracing::debug!(
            model = %model,
            size = %self.form.size(),
            quality = %self.form.quality(),
            "model changed"
        );
    }

    /// Validate the form and enter `Loading`
    ///
    /// # Errors
    ///
    /// `Busy` while a cycle is running (the control is disabled, so nothing
    /// is shown); `Invalid` with an error toast for a blank prompt
    pub fn start_submit(&mut self) -> Result<PendingGeneration, SubmitRejection> {
        if !self.state.submit_enabled() {
            tracing::debug!("submit ignored while loading");
            return Err(SubmitRejection::Busy);
        }

        let request = match self.form.build_request() {
            Ok(request) => request,
            Err(e) => {
                self.notify(e.to_string(), Severity::Error);
                return Err(SubmitRejection::Invalid(e));
            }
        };

        let token = self.state.begin().ok_or(SubmitRejection::Busy)?;
        self.gallery.hide();

        tracing::info!(
            sequence = token.sequence(),
            model = %request.model,
            n = ?request.n,
            "generating images"
        );

        Ok(PendingGeneration { token, request })
    }

    /// Apply the backend's answer to a started cycle
    pub fn finish_submit(&mut self, pending: PendingGeneration, result: artgen_client::Result<GenerationResult>) -> Outcome {
        let PendingGeneration { token, request } = pending;

        match result {
            Ok(result) => {
                let count = result.images.len();
                self.gallery.render(&result, &request.prompt);
                self.gallery.show();
                self.state.succeed(token, result);
                self.notify(SUCCESS_TOAST, Severity::Success);

                tracing::info!(sequence = token.sequence(), count, "images generated");
                Outcome::Generated { count }
            }
            Err(e) => {
                tracing::error!(sequence = token.sequence(), error = %e, "error generating images");
                self.state.fail(token, &e.to_string());

                let message = self.state.status().to_owned();
                self.notify(message.clone(), Severity::Error);
                Outcome::Failed { message }
            }
        }
    }

    fn notify(&mut self, message: impl Into<String>, severity: Severity) {
        let now = Instant::now();
        self.notifications.sweep(now);
        self.notifications.push(message, severity, now);
    }
}

impl<B: GenerationBackend, S: DownloadSurface> Controller<B, S> {
    /// Handle one user action
    pub async fn dispatch(&mut self, command: Command) -> Outcome {
        match command {
            Command::Submit => self.submit().await,
            Command::ModelChanged(model) => {
                self.change_model(model);
                Outcome::OptionsReplaced
            }
            Command::DownloadRequested(index) => match self.download(index) {
                Ok(link) => Outcome::Downloaded(link),
                Err(e) => {
                    tracing::warn!(index, error = %e, "download failed");
                    Outcome::DownloadFailed(e)
                }
            },
        }
    }

    /// Run one full cycle: start, one backend call, finish
    pub async fn submit(&mut self) -> Outcome {
        let pending = match self.start_submit() {
            Ok(pending) => pending,
            Err(SubmitRejection::Invalid(e)) => return Outcome::Rejected(e),
            Err(SubmitRejection::Busy) => return Outcome::Busy,
        };

        let result = self.backend.generate(pending.request()).await;
        self.finish_submit(pending, result)
    }

    /// Download the image of the card at `index`
    ///
    /// # Errors
    ///
    /// Returns `UnknownImage` if no card is at `index`
    pub fn download(&mut self, index: usize) -> Result<DownloadLink, DownloadError> {
        let handle = self.gallery.card(index).ok_or(DownloadError::UnknownImage(index))?.download.clone();
        self.download_handle(&handle)
    }

    /// Save the image a card's download button is bound to
    ///
    /// # Errors
    ///
    /// Returns an error if the surface fails to complete the download
    pub fn download_handle(&mut self, handle: &DownloadHandle) -> Result<DownloadLink, DownloadError> {
        let link = DownloadLink::new(handle, jiff::Timestamp::now().as_millisecond());
        trigger_download(&mut self.surface, &link)?;

        tracing::debug!(index = handle.index, filename = %link.filename, "download triggered");
        Ok(link)
    }
}
