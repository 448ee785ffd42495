use std::str::FromStr;

use artgen_client::{GenerationRequest, ImageModel, ImageQuality, ImageSize};
use artgen_config::FormConfig;

use crate::options::{OptionSet, quality_options, size_options};

/// Why a submit never left the form
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please enter a prompt")]
    EmptyPrompt,
}

/// A selector was given a value it does not offer
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("unknown model '{0}'")]
    UnknownModel(String),
    #[error("size {size} is not offered for {model}")]
    SizeNotOffered { model: ImageModel, size: ImageSize },
    #[error("quality {quality} is not offered for {model}")]
    QualityNotOffered { model: ImageModel, quality: ImageQuality },
}

/// Live values of the form controls
#[derive(Debug, Clone)]
pub struct FormState {
    prompt: String,
    model: ImageModel,
    size_options: OptionSet<ImageSize>,
    size: ImageSize,
    quality_options: OptionSet<ImageQuality>,
    quality: ImageQuality,
    count: String,
}

impl FormState {
    /// Form with `model` selected and its default size and quality
    pub fn new(model: ImageModel) -> Self {
        let size_options = size_options(model);
        let quality_options = quality_options(model);

        Self {
            prompt: String::new(),
            model,
            size_options,
            size: size_options.default_value(),
            quality_options,
            quality: quality_options.default_value(),
            count: "1".to_owned(),
        }
    }

    /// Form seeded from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configured model is unknown
    pub fn from_config(config: &FormConfig) -> Result<Self, FormError> {
        let model = ImageModel::from_str(&config.model).map_err(|_| FormError::UnknownModel(config.model.clone()))?;

        let mut form = Self::new(model);
        form.set_count(&config.count);
        Ok(form)
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn set_prompt(&mut self, prompt: &str) {
        prompt.clone_into(&mut self.prompt);
    }

    pub const fn model(&self) -> ImageModel {
        self.model
    }

    /// Switch model, replacing both option sets and reselecting their defaults
    pub fn select_model(&mut self, model: ImageModel) {
        self.model = model;
        self.size_options = size_options(model);
        self.size = self.size_options.default_value();
        self.quality_options = quality_options(model);
        self.quality = self.quality_options.default_value();
    }

    pub const fn size(&self) -> ImageSize {
        self.size
    }

    pub const fn size_options(&self) -> OptionSet<ImageSize> {
        self.size_options
    }

    /// # Errors
    ///
    /// Returns an error if the current model does not offer `size`
    pub fn select_size(&mut self, size: ImageSize) -> Result<(), FormError> {
        if !self.size_options.contains(size) {
            return Err(FormError::SizeNotOffered { model: self.model, size });
        }
        self.size = size;
        Ok(())
    }

    pub const fn quality(&self) -> ImageQuality {
        self.quality
    }

    pub const fn quality_options(&self) -> OptionSet<ImageQuality> {
        self.quality_options
    }

    /// # Errors
    ///
    /// Returns an error if the current model does not offer `quality`
    pub fn select_quality(&mut self, quality: ImageQuality) -> Result<(), FormError> {
        if !self.quality_options.contains(quality) {
            return Err(FormError::QualityNotOffered { model: self.model, quality });
        }
        self.quality = quality;
        Ok(())
    }

    /// Raw text of the count input
    pub fn count(&self) -> &str {
        &self.count
    }

    pub fn set_count(&mut self, count: &str) {
        count.clone_into(&mut self.count);
    }

    /// Read the controls into a request
    ///
    /// # Errors
    ///
    /// Returns `EmptyPrompt` if the prompt is blank after trimming
    pub fn build_request(&self) -> Result<GenerationRequest, ValidationError> {
        let prompt = self.prompt.trim();
        if prompt.is_empty() {
            return Err(ValidationError::EmptyPrompt);
        }

        Ok(GenerationRequest::new(
            self.model,
            prompt.to_owned(),
            parse_count(&self.count),
            self.size,
            self.quality,
        ))
    }
}

/// Read a leading base-10 integer the way a numeric input is read
///
/// Leading whitespace and a sign are accepted, parsing stops at the first
/// non-digit, and no digits at all yields `None`.
pub fn parse_count(input: &str) -> Option<i64> {
    let s = input.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }

    let value: i64 = rest[..digits].parse().ok()?;
    Some(if negative { -value } else { value })
}
