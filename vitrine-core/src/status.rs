//! Inline status messages shown in the `loading-message` element.

use vitrine_config::ConfigInvalid;

use crate::dom::Document;

pub const LOADING_MESSAGE_ID: &str = "loading-message";

/// A user-visible notice replacing the loading indicator's content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusNotice {
    Loading,
    ApiKeyMissing,
    SourceMissing,
    NoImages,
    FetchFailed(String),
}

impl StatusNotice {
    pub fn message(&self) -> String {
        match self {
            StatusNotice::Loading => "Loading images...".to_string(),
            StatusNotice::ApiKeyMissing => {
                "⚠️ ImageKit API key not configured. \
                 Please check the setup documentation."
                    .to_string()
            }
            StatusNotice::SourceMissing => {
                "Gallery folder or tags not configured.".to_string()
            }
            StatusNotice::NoImages => {
                "No images found in this album.".to_string()
            }
            StatusNotice::FetchFailed(detail) => {
                format!("Failed to load album images: {detail}")
            }
        }
    }

    pub fn class(&self) -> &'static str {
        match self {
            StatusNotice::Loading | StatusNotice::NoImages => "text-white",
            StatusNotice::ApiKeyMissing | StatusNotice::SourceMissing => {
                "text-yellow-400"
            }
            StatusNotice::FetchFailed(_) => "text-red-400",
        }
    }

    /// Replace the indicator's content with this notice. Pages without a
    /// loading indicator are left untouched.
    pub fn show(&self, doc: &mut Document) -> bool {
        let Some(indicator) = doc.get_element_by_id(LOADING_MESSAGE_ID) else {
            return false;
        };
        doc.clear_children(indicator);
        let p = doc.append_new(indicator, "p");
        doc.add_class(p, self.class());
        doc.set_text(p, self.message());
        true
    }
}

impl From<ConfigInvalid> for StatusNotice {
    fn from(value: ConfigInvalid) -> Self {
        match value {
            ConfigInvalid::MissingSource => StatusNotice::SourceMissing,
            ConfigInvalid::MissingApiKey => StatusNotice::ApiKeyMissing,
        }
    }
}

pub fn hide_loading(doc: &mut Document) {
    if let Some(indicator) = doc.get_element_by_id(LOADING_MESSAGE_ID) {
        doc.set_style(indicator, "display", "none");
    }
}

/// Take the indicator out of the page entirely.
pub fn remove_loading(doc: &mut Document) {
    if let Some(indicator) = doc.get_element_by_id(LOADING_MESSAGE_ID) {
        doc.remove(indicator);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notice_replaces_indicator_content() {
        let mut doc = Document::new();
        let indicator = doc.append_new(doc.body(), "div");
        doc.set_attr(indicator, "id", LOADING_MESSAGE_ID);
        StatusNotice::Loading.show(&mut doc);

        let failed =
            StatusNotice::FetchFailed("API request failed: 401".into());
        assert!(failed.show(&mut doc));
        assert_eq!(
            doc.inner_html(indicator),
            "<p class=\"text-red-400\">\
             Failed to load album images: API request failed: 401</p>"
        );
    }

    #[test]
    fn missing_indicator_is_tolerated() {
        let mut doc = Document::new();
        assert!(!StatusNotice::NoImages.show(&mut doc));
        hide_loading(&mut doc);
    }
}
