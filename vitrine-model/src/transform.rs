use std::fmt::{self, Display};

/// Which rendition of an asset a caller wants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ImageVariant {
    /// Grid thumbnail.
    Thumbnail,
    /// Full-screen viewer and outbound links.
    Full,
}

/// URL suffix requesting a resized or optimized rendition of an asset,
/// e.g. `?tr=w-400,q-80`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Transform(String);

impl Transform {
    pub fn new(suffix: impl Into<String>) -> Self {
        Self(suffix.into())
    }

    /// The identity transform; [`Transform::apply`] returns the URL unchanged.
    pub fn none() -> Self {
        Self(String::new())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Append this suffix to an asset URL.
    ///
    /// A suffix starting with `?` is joined with `&` when the URL already
    /// carries a query string.
    pub fn apply(&self, url: &str) -> String {
        match self.0.strip_prefix('?') {
            Some(params) if url.contains('?') => format!("{url}&{params}"),
            _ => format!("{url}{}", self.0),
        }
    }
}

impl Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Transform {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Transform {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::Transform;

    #[test]
    fn appends_suffix_to_plain_url() {
        let t = Transform::new("?tr=w-400,q-80");
        assert_eq!(
            t.apply("https://ik.imagekit.io/demo/a.jpg"),
            "https://ik.imagekit.io/demo/a.jpg?tr=w-400,q-80"
        );
    }

    #[test]
    fn joins_with_ampersand_when_url_has_query() {
        let t = Transform::new("?tr=w-1200,q-90");
        assert_eq!(
            t.apply("https://ik.imagekit.io/demo/a.jpg?updatedAt=1"),
            "https://ik.imagekit.io/demo/a.jpg?updatedAt=1&tr=w-1200,q-90"
        );
    }

    #[test]
    fn empty_transform_is_identity() {
        assert_eq!(
            Transform::none().apply("https://x/y.png"),
            "https://x/y.png"
        );
    }

    #[test]
    fn path_style_suffix_is_appended_verbatim() {
        let t = Transform::new("/tr:w-300");
        assert_eq!(
            t.apply("https://x/y.png?v=2"),
            "https://x/y.png?v=2/tr:w-300"
        );
    }
}
