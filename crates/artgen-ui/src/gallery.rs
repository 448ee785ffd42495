use artgen_client::{GenerationResult, ImageRecord};

/// What a card's download button is bound to
///
/// Captured at render time so the button serves its own image no matter
/// what the gallery shows later.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadHandle {
    pub index: usize,
    pub b64_json: String,
    pub filetype: String,
}

/// One rendered image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageCard {
    /// `data:` URI shown in the `img` element
    pub src: String,
    /// Accessible description
    pub alt: String,
    pub download: DownloadHandle,
}

impl ImageCard {
    fn from_record(index: usize, record: &ImageRecord, prompt: &str) -> Self {
        Self {
            src: record.data_uri(),
            alt: alt_text(index, prompt),
            download: DownloadHandle {
                index,
                b64_json: record.b64_json.clone(),
                filetype: record.filetype.clone(),
            },
        }
    }
}

/// Alt text for the image at zero-based `index`
pub fn alt_text(index: usize, prompt: &str) -> String {
    format!("Generated image {} for \"{prompt}\"", index + 1)
}

/// The result area
#[derive(Debug, Default)]
pub struct Gallery {
    cards: Vec<ImageCard>,
    hidden: bool,
}

impl Gallery {
    /// Replace every card with one per image, in response order
    pub fn render(&mut self, result: &GenerationResult, prompt: &str) {
        self.cards.clear();
        self.cards.extend(
            result
                .images
                .iter()
                .enumerate()
                .map(|(index, record)| ImageCard::from_record(index, record, prompt)),
        );
    }

    pub fn cards(&self) -> &[ImageCard] {
        &self.cards
    }

    pub fn card(&self, index: usize) -> Option<&ImageCard> {
        self.cards.get(index)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub const fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub const fn hide(&mut self) {
        self.hidden = true;
    }

    pub const fn show(&mut self) {
        self.hidden = false;
    }
}
