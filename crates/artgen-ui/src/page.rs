//! The assembled page
//!
//! Ties the controller to the visual fallback patch over one document.

use artgen_client::GenerationBackend;

use crate::controller::{Command, Controller, Outcome};
use crate::dom::Document;
use crate::fallback::{self, Capabilities, FallbackReport, Parallax};

/// A ready page: controller plus whatever the fallback patch installed
pub struct Page<B, C> {
    controller: Controller<B, Document>,
    capabilities: C,
    parallax: Option<Parallax>,
}

impl<B: GenerationBackend, C: Capabilities> Page<B, C> {
    /// Run the startup work: the fallback patch, once
    pub fn ready(mut controller: Controller<B, Document>, capabilities: C) -> (Self, FallbackReport) {
        let report = fallback::install(&capabilities, controller.surface_mut());
        let page = Self {
            controller,
            capabilities,
            parallax: report.parallax,
        };
        (page, report)
    }

    pub const fn controller(&self) -> &Controller<B, Document> {
        &self.controller
    }

    pub const fn controller_mut(&mut self) -> &mut Controller<B, Document> {
        &mut self.controller
    }

    pub const fn document(&self) -> &Document {
        self.controller.surface()
    }

    pub async fn dispatch(&mut self, command: Command) -> Outcome {
        self.controller.dispatch(command).await
    }

    /// Forward a pointer move to the parallax handler, if one was installed
    pub fn pointer_move(&mut self, x: f64, y: f64) {
        if let Some(parallax) = self.parallax {
            let viewport = self.capabilities.viewport();
            parallax.on_pointer_move(self.controller.surface_mut(), x, y, viewport);
        }
    }
}
