//! Size and quality choices offered for each model

use artgen_client::{ImageModel, ImageQuality, ImageSize};

/// One `<option>` of a selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectOption<T: 'static> {
    pub value: T,
    pub label: &'static str,
    /// Whether this option is preselected
    pub selected: bool,
}

/// The full contents of a selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionSet<T: 'static>(&'static [SelectOption<T>]);

impl<T: Copy + PartialEq + 'static> OptionSet<T> {
    pub const fn options(&self) -> &'static [SelectOption<T>] {
        self.0
    }

    pub fn values(&self) -> Vec<T> {
        self.0.iter().map(|o| o.value).collect()
    }

    /// Value that gets selected when the set is installed
    pub fn default_value(&self) -> T {
        self.0.iter().find(|o| o.selected).unwrap_or(&self.0[0]).value
    }

    pub fn contains(&self, value: T) -> bool {
        self.0.iter().any(|o| o.value == value)
    }
}

const fn opt<T>(value: T, label: &'static str, selected: bool) -> SelectOption<T> {
    SelectOption { value, label, selected }
}

static SMALL_SIZES: [SelectOption<ImageSize>; 3] = [
    opt(ImageSize::Small, "Small (256×256)", false),
    opt(ImageSize::Medium, "Medium (512×512)", false),
    opt(ImageSize::Square, "Large (1024×1024)", true),
];

static LARGE_SIZES: [SelectOption<ImageSize>; 3] = [
    opt(ImageSize::Square, "Square (1024×1024)", true),
    opt(ImageSize::Landscape, "Landscape (1792×1024)", false),
    opt(ImageSize::Portrait, "Portrait (1024×1792)", false),
];

static HD_QUALITIES: [SelectOption<ImageQuality>; 2] = [
    opt(ImageQuality::Standard, "Standard", true),
    opt(ImageQuality::Hd, "HD", false),
];

static MEDIUM_QUALITY: [SelectOption<ImageQuality>; 1] = [opt(ImageQuality::Medium, "Medium", true)];

// dall-e-2 takes no quality parameter but the selector must never be empty
static STANDARD_QUALITY: [SelectOption<ImageQuality>; 1] = [opt(ImageQuality::Standard, "Standard", true)];

/// Sizes offered for `model`
pub fn size_options(model: ImageModel) -> OptionSet<ImageSize> {
    match model {
        ImageModel::DallE2 => OptionSet(&SMALL_SIZES),
        ImageModel::DallE3 | ImageModel::GptImage1 => OptionSet(&LARGE_SIZES),
    }
}

/// Qualities offered for `model`
pub fn quality_options(model: ImageModel) -> OptionSet<ImageQuality> {
    match model {
        ImageModel::DallE3 => OptionSet(&HD_QUALITIES),
        ImageModel::GptImage1 => OptionSet(&MEDIUM_QUALITY),
        ImageModel::DallE2 => OptionSet(&STANDARD_QUALITY),
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn small_size_model_offers_small_sizes() {
        let sizes = size_options(ImageModel::DallE2);
        assert_eq!(sizes.values(), [ImageSize::Small, ImageSize::Medium, ImageSize::Square]);
        assert_eq!(sizes.default_value(), ImageSize::Square);
    }

    #[test]
    fn other_models_offer_large_sizes() {
        for model in ImageModel::iter().filter(|m| *m != ImageModel::DallE2) {
            let sizes = size_options(model);
            assert_eq!(sizes.values(), [ImageSize::Square, ImageSize::Landscape, ImageSize::Portrait]);
            assert_eq!(sizes.default_value(), ImageSize::Square);
        }
    }

    #[test]
    fn quality_table() {
        let hd = quality_options(ImageModel::DallE3);
        assert_eq!(hd.values(), [ImageQuality::Standard, ImageQuality::Hd]);
        assert_eq!(hd.default_value(), ImageQuality::Standard);

        let medium = quality_options(ImageModel::GptImage1);
        assert_eq!(medium.values(), [ImageQuality::Medium]);

        let standard = quality_options(ImageModel::DallE2);
        assert_eq!(standard.values(), [ImageQuality::Standard]);
    }

    #[test]
    fn every_set_has_exactly_one_default() {
        for model in ImageModel::iter() {
            assert_eq!(size_options(model).options().iter().filter(|o| o.selected).count(), 1);
            assert_eq!(quality_options(model).options().iter().filter(|o| o.selected).count(), 1);
        }
    }

    #[test]
    fn labels_match_the_form() {
        let labels: Vec<_> = size_options(ImageModel::DallE2).options().iter().map(|o| o.label).collect();
        assert_eq!(labels, ["Small (256×256)", "Medium (512×512)", "Large (1024×1024)"]);
    }
}
