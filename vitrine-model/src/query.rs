use crate::error::{ModelError, Result};

/// Selection of files to list from the asset host.
///
/// A query is path-based, tag-based, or both; an empty query is rejected at
/// construction.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FileQuery {
    path: Option<String>,
    tags: Vec<String>,
}

impl FileQuery {
    pub fn new<I, S>(path: Option<String>, tags: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let path = path.map(|p| p.trim().to_string()).filter(|p| !p.is_empty());

        let mut normalized = Vec::new();
        for tag in tags {
            let tag = tag.into();
            let trimmed = tag.trim();
            if trimmed.is_empty() {
                continue;
            }
            if trimmed.contains(',') {
                return Err(ModelError::InvalidTag(tag));
            }
            if !normalized.iter().any(|t: &String| t == trimmed) {
                normalized.push(trimmed.to_string());
            }
        }

        if path.is_none() && normalized.is_empty() {
            return Err(ModelError::EmptyQuery);
        }

        Ok(Self {
            path,
            tags: normalized,
        })
    }

    pub fn folder(path: impl Into<String>) -> Result<Self> {
        Self::new(Some(path.into()), std::iter::empty::<String>())
    }

    pub fn tagged<I, S>(tags: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(None, tags)
    }

    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Tags joined the way the listing endpoint expects them.
    pub fn tags_param(&self) -> Option<String> {
        if self.tags.is_empty() {
            None
        } else {
            Some(self.tags.join(","))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::FileQuery;
    use crate::ModelError;

    #[test]
    fn rejects_query_without_folder_or_tags() {
        assert_eq!(
            FileQuery::new(Some("  ".into()), ["", " "]),
            Err(ModelError::EmptyQuery)
        );
    }

    #[test]
    fn combined_query_keeps_both_parts() {
        let q = FileQuery::new(
            Some("/Photography".into()),
            ["travel", "bw", "travel"],
        )
        .unwrap();
        assert_eq!(q.path(), Some("/Photography"));
        assert_eq!(q.tags(), ["travel", "bw"]);
        assert_eq!(q.tags_param().as_deref(), Some("travel,bw"));
    }

    #[test]
    fn tags_with_commas_are_rejected() {
        assert!(matches!(
            FileQuery::tagged(["a,b"]),
            Err(ModelError::InvalidTag(_))
        ));
    }

    #[test]
    fn folder_only_query_has_no_tag_param() {
        let q = FileQuery::folder("/Albums/Iceland").unwrap();
        assert_eq!(q.tags_param(), None);
    }
}
