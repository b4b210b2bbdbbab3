/// `fileType` value the asset API reports for raster images.
pub const IMAGE_FILE_TYPE: &str = "image";

/// Lowercase filename suffixes accepted into a gallery.
pub const IMAGE_EXTENSIONS: [&str; 5] =
    [".jpg", ".jpeg", ".png", ".webp", ".gif"];

/// A single file entry as listed by the remote asset host.
///
/// Only `url`, `name` and `file_type` drive gallery behavior; the remaining
/// fields are carried through when the host provides them.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ImageRecord {
    pub url: String,
    pub name: String,
    pub file_type: String,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub file_id: Option<String>,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub file_path: Option<String>,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub tags: Option<Vec<String>>,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub width: Option<u32>,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub height: Option<u32>,
}

impl ImageRecord {
    pub fn new(
        url: impl Into<String>,
        name: impl Into<String>,
        file_type: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            name: name.into(),
            file_type: file_type.into(),
            ..Self::default()
        }
    }

    /// True when the host classified the file as an image.
    pub fn is_image_type(&self) -> bool {
        self.file_type == IMAGE_FILE_TYPE
    }

    /// True when the filename ends in a recognized image extension,
    /// compared case-insensitively.
    pub fn has_image_extension(&self) -> bool {
        let lowered = self.name.to_lowercase();
        IMAGE_EXTENSIONS.iter().any(|ext| lowered.ends_with(ext))
    }

    pub fn is_gallery_image(&self) -> bool {
        self.is_image_type() && self.has_image_extension()
    }
}

/// Keep only gallery-eligible images, preserving their listing order.
pub fn filter_image_files<I>(files: I) -> Vec<ImageRecord>
where
    I: IntoIterator<Item = ImageRecord>,
{
    files
        .into_iter()
        .filter(ImageRecord::is_gallery_image)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{ImageRecord, filter_image_files};

    fn record(name: &str, file_type: &str) -> ImageRecord {
        ImageRecord::new(format!("https://ik.example/{name}"), name, file_type)
    }

    #[test]
    fn keeps_only_images_with_known_extensions_in_order() {
        let files = vec![
            record("b.JPG", "image"),
            record("notes.pdf", "non-image"),
            record("clip.mp4", "image"),
            record("a.webp", "image"),
            record("fake.png", "non-image"),
            record("c.jpeg", "image"),
            record("d.Gif", "image"),
        ];

        let names: Vec<_> = filter_image_files(files)
            .into_iter()
            .map(|r| r.name)
            .collect();

        assert_eq!(names, vec!["b.JPG", "a.webp", "c.jpeg", "d.Gif"]);
    }

    #[test]
    fn extension_must_be_a_suffix() {
        let files =
            vec![record("photo.jpg.txt", "image"), record("png", "image")];
        assert!(filter_image_files(files).is_empty());
    }

    #[test]
    fn empty_listing_filters_to_empty() {
        assert!(filter_image_files(Vec::new()).is_empty());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserializes_api_listing_and_ignores_unknown_fields() {
        let raw = r#"[{
            "fileId": "abc",
            "name": "sunset.jpg",
            "url": "https://ik.example/sunset.jpg",
            "fileType": "image",
            "filePath": "/Photography/sunset.jpg",
            "tags": ["travel"],
            "height": 800,
            "width": 1200,
            "isPrivateFile": false
        }, {
            "name": "readme.txt",
            "url": "https://ik.example/readme.txt",
            "fileType": "non-image"
        }]"#;

        let records: Vec<ImageRecord> = serde_json::from_str(raw).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].file_id.as_deref(), Some("abc"));
        assert_eq!(
            records[0].tags.as_deref(),
            Some(&["travel".to_string()][..])
        );
        assert_eq!(records[1].width, None);

        let kept = filter_image_files(records);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].name, "sunset.jpg");
    }
}
