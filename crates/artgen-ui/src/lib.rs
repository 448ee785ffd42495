//! Headless generation controller for the artgen image form
//!
//! The page is modelled as a small in-memory document. The [`Controller`]
//! owns the form, the generate-and-render lifecycle, the gallery and the
//! toast container; [`fallback`] holds the one-time visual patch.

#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

pub mod controller;
pub mod dom;
pub mod download;
pub mod fallback;
pub mod form;
pub mod gallery;
pub mod notify;
pub mod options;
pub mod page;
pub mod state;

pub use controller::{Command, Controller, Outcome, PendingGeneration, SUCCESS_TOAST, SubmitRejection};
pub use dom::{Document, Element, NodeId};
pub use download::{DirectorySink, DownloadError, DownloadLink, DownloadSurface, trigger_download};
pub use fallback::{Capabilities, FallbackReport, Parallax, StaticCapabilities, Viewport};
pub use form::{FormError, FormState, ValidationError, parse_count};
pub use gallery::{DownloadHandle, Gallery, ImageCard};
pub use notify::{Notification, NotificationTiming, Notifications, Severity, Visibility};
pub use page::Page;
pub use state::{GenerationState, Phase, RequestToken};
