use crate::models::{ImageRef, ResolvedImage};

/// Resolves catalog image references to displayable URLs. Total: every
/// reference resolves to either a real URL or the placeholder, never an
/// error.
#[derive(Debug, Clone)]
pub struct ImageResolver {
    search_base: String,
    placeholder: String,
}

impl ImageResolver {
    pub fn new(search_base: impl Into<String>, placeholder: impl Into<String>) -> Self {
        Self {
            search_base: search_base.into(),
            placeholder: placeholder.into(),
        }
    }

    pub fn from_config(config: &crate::config::Config) -> Self {
        Self::new(
            config.image_search_url.clone(),
            config.placeholder_image_url.clone(),
        )
    }

    pub fn resolve(&self, image: &ImageRef) -> ResolvedImage {
        match image {
            ImageRef::Url { url } if !url.trim().is_empty() => ResolvedImage {
                url: url.clone(),
                attribution: None,
            },
            ImageRef::Stock { query } if !query.trim().is_empty() => ResolvedImage {
                url: format!("{}?q={}", self.search_base, encode_query(query)),
                attribution: Some("Stock photo search".to_string()),
            },
            // Generated prompts are resolved offline by the media
            // collaborator; until then the placeholder stands in
            _ => self.placeholder(),
        }
    }

    pub fn placeholder(&self) -> ResolvedImage {
        ResolvedImage {
            url: self.placeholder.clone(),
            attribution: None,
        }
    }
}

fn encode_query(query: &str) -> String {
    query
        .trim()
        .chars()
        .map(|c| if c.is_whitespace() { '+' } else { c })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver() -> ImageResolver {
        ImageResolver::new("https://img.example/search", "https://img.example/placeholder")
    }

    #[test]
    fn test_direct_url_passes_through() {
        let resolved = resolver().resolve(&ImageRef::Url {
            url: "https://cdn.example/costume.jpg".to_string(),
        });
        assert_eq!(resolved.url, "https://cdn.example/costume.jpg");
        assert!(resolved.attribution.is_none());
    }

    #[test]
    fn test_stock_query_is_encoded() {
        let resolved = resolver().resolve(&ImageRef::Stock {
            query: "disco diver outfit".to_string(),
        });
        assert_eq!(
            resolved.url,
            "https://img.example/search?q=disco+diver+outfit"
        );
        assert!(resolved.attribution.is_some());
    }

    #[test]
    fn test_generated_and_empty_fall_back_to_placeholder() {
        let generated = resolver().resolve(&ImageRef::Generated {
            prompt: "a costume".to_string(),
        });
        assert_eq!(generated.url, "https://img.example/placeholder");

        let empty = resolver().resolve(&ImageRef::Url {
            url: "  ".to_string(),
        });
        assert_eq!(empty.url, "https://img.example/placeholder");
    }
}
