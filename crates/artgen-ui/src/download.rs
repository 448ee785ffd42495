//! Client-side image downloads
//!
//! A download is a transient anchor: appended, clicked and removed in one
//! synchronous call, leaving the surface as it was.

use std::path::{Path, PathBuf};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use indexmap::IndexMap;

use crate::dom::{Element, NodeId};
use crate::gallery::DownloadHandle;

/// Download failures
#[derive(Debug, thiserror::Error)]
pub enum DownloadError {
    /// No card at the requested position
    #[error("no image at index {0}")]
    UnknownImage(usize),

    /// The anchor was not attached when clicked
    #[error("download anchor is not attached")]
    Detached,

    /// The anchor's href is not a base64 data URI
    #[error("invalid data URI: {0}")]
    InvalidDataUri(String),

    /// Filename would escape the download directory
    #[error("refusing to write '{0}'")]
    InvalidFilename(String),

    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Target and suggested filename of a download
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadLink {
    pub href: String,
    pub filename: String,
}

impl DownloadLink {
    /// Link for `handle`, named with the given millisecond timestamp
    pub fn new(handle: &DownloadHandle, timestamp_ms: i64) -> Self {
        Self {
            href: artgen_client::data_uri(&handle.filetype, &handle.b64_json),
            filename: format!("generated-image-{timestamp_ms}-{}.{}", handle.index, handle.filetype),
        }
    }

    /// `<a href=… download=…>` element for this link
    pub fn to_anchor(&self) -> Element {
        Element::new("a")
            .with_attribute("href", &self.href)
            .with_attribute("download", &self.filename)
    }
}

/// Where transient download anchors live
pub trait DownloadSurface {
    /// Attach `anchor` and return its handle
    fn append_anchor(&mut self, anchor: Element) -> NodeId;

    /// Activate an attached anchor
    fn click(&mut self, node: NodeId) -> Result<(), DownloadError>;

    /// Detach an anchor; unknown handles are ignored
    fn remove(&mut self, node: NodeId);
}

/// Append, click and remove an anchor for `link`
///
/// The anchor is removed even when the click fails.
pub fn trigger_download<S: DownloadSurface + ?Sized>(surface: &mut S, link: &DownloadLink) -> Result<(), DownloadError> {
    let node = surface.append_anchor(link.to_anchor());
    let clicked = surface.click(node);
    surface.remove(node);
    clicked
}

/// Decode the payload of a `data:<mime>;base64,<payload>` URI
pub fn decode_data_uri(href: &str) -> Result<Vec<u8>, DownloadError> {
    let invalid = || DownloadError::InvalidDataUri(truncate(href));

    let rest = href.strip_prefix("data:").ok_or_else(invalid)?;
    let (meta, payload) = rest.split_once(',').ok_or_else(invalid)?;
    if !meta.ends_with(";base64") {
        return Err(invalid());
    }

    STANDARD.decode(payload).map_err(|e| DownloadError::InvalidDataUri(e.to_string()))
}

fn truncate(s: &str) -> String {
    s.chars().take(32).collect()
}

/// Download surface that writes clicked anchors into a directory
#[derive(Debug)]
pub struct DirectorySink {
    directory: PathBuf,
    attached: IndexMap<NodeId, Element>,
    written: Vec<PathBuf>,
    next_node: u64,
}

impl DirectorySink {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            attached: IndexMap::new(),
            written: Vec::new(),
            next_node: 0,
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Files written so far, oldest first
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    /// Anchors currently attached
    pub fn attached(&self) -> usize {
        self.attached.len()
    }

    fn write(&self, anchor: &Element) -> Result<PathBuf, DownloadError> {
        let href = anchor.attribute("href").ok_or_else(|| DownloadError::InvalidDataUri(String::new()))?;
        let filename = anchor.attribute("download").unwrap_or_default();

        if filename.is_empty() || filename.contains(['/', '\\']) || filename.starts_with('.') {
            return Err(DownloadError::InvalidFilename(filename.to_owned()));
        }

        let bytes = decode_data_uri(href)?;
        let path = self.directory.join(filename);

        std::fs::write(&path, bytes).map_err(|source| DownloadError::Io {
            path: path.clone(),
            source,
        })?;

        Ok(path)
    }
}

impl DownloadSurface for DirectorySink {
    fn append_anchor(&mut self, anchor: Element) -> NodeId {
        let id = NodeId::new(self.next_node);
        self.next_node += 1;
        self.attached.insert(id, anchor);
        id
    }

    fn click(&mut self, node: NodeId) -> Result<(), DownloadError> {
        let anchor = self.attached.get(&node).ok_or(DownloadError::Detached)?;
        let path = self.write(anchor)?;

        tracing::info!(path = %path.display(), "image saved");
        self.written.push(path);
        Ok(())
    }

    fn remove(&mut self, node: NodeId) {
        self.attached.shift_remove(&node);
    }
}

#[cfg(test)]
mod tests {
    use regex::Regex;

    use super::*;
    use crate::dom::Document;

    fn handle(index: usize, b64: &str, filetype: &str) -> DownloadHandle {
        DownloadHandle {
            index,
            b64_json: b64.to_owned(),
            filetype: filetype.to_owned(),
        }
    }

    #[test]
    fn filename_embeds_timestamp_and_index() {
        let link = DownloadLink::new(&handle(2, "QUJD", "png"), 1_700_000_000_123);
        assert_eq!(link.filename, "generated-image-1700000000123-2.png");
        assert_eq!(link.href, "data:image/png;base64,QUJD");

        let pattern = Regex::new(r"^generated-image-\d+-\d+\.[a-z]+$").unwrap();
        assert!(pattern.is_match(&link.filename));
    }

    #[test]
    fn document_is_unchanged_after_download() {
        let mut doc = Document::new();
        let link = DownloadLink::new(&handle(0, "QUJD", "png"), 1);

        trigger_download(&mut doc, &link).unwrap();

        assert_eq!(doc.transient_children(), 0);
        assert_eq!(doc.clicked().len(), 1);
        assert_eq!(doc.clicked()[0].attribute("download"), Some(link.filename.as_str()));
        assert_eq!(doc.clicked()[0].attribute("href"), Some(link.href.as_str()));
    }

    #[test]
    fn directory_sink_writes_decoded_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = DirectorySink::new(dir.path());
        let link = DownloadLink::new(&handle(0, "QUJD", "png"), 42);

        trigger_download(&mut sink, &link).unwrap();

        let written = dir.path().join("generated-image-42-0.png");
        assert_eq!(std::fs::read(&written).unwrap(), b"ABC");
        assert_eq!(sink.written(), [written]);
        assert_eq!(sink.attached(), 0);
    }

    #[test]
    fn anchor_is_removed_when_write_fails() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = DirectorySink::new(dir.path());
        let link = DownloadLink::new(&handle(0, "not base64!", "png"), 1);

        let err = trigger_download(&mut sink, &link).unwrap_err();
        assert!(matches!(err, DownloadError::InvalidDataUri(_)));
        assert_eq!(sink.attached(), 0);
    }

    #[test]
    fn path_like_filetypes_are_refused() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = DirectorySink::new(dir.path());
        let link = DownloadLink::new(&handle(0, "QUJD", "png/../../x"), 1);

        let err = trigger_download(&mut sink, &link).unwrap_err();
        assert!(matches!(err, DownloadError::InvalidFilename(_)));
    }

    #[test]
    fn data_uri_decoding() {
        assert_eq!(decode_data_uri("data:image/png;base64,QUJD").unwrap(), b"ABC");
        assert!(decode_data_uri("https://example.com/a.png").is_err());
        assert!(decode_data_uri("data:image/png,QUJD").is_err());
    }
}
