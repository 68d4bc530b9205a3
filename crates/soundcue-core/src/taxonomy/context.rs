use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::TaxonomyError;

/// A video-editing use case that music can be suggested for.
///
/// Serialized by its lowercase slug (e.g. `"wedding"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VideoContext {
    Funny,
    Vlog,
    Drama,
    Cinematic,
    Gaming,
    Action,
    Romantic,
    Horror,
    Documentary,
    Travel,
    Corporate,
    Sports,
    Wedding,
}

impl VideoContext {
    /// Every context, in browse-page display order.
    pub const ALL: [VideoContext; 13] = [
        VideoContext::Funny,
        VideoContext::Vlog,
        VideoContext::Drama,
        VideoContext::Cinematic,
        VideoContext::Gaming,
        VideoContext::Action,
        VideoContext::Romantic,
        VideoContext::Horror,
        VideoContext::Documentary,
        VideoContext::Travel,
        VideoContext::Corporate,
        VideoContext::Sports,
        VideoContext::Wedding,
    ];

    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Funny => "funny",
            Self::Vlog => "vlog",
            Self::Drama => "drama",
            Self::Cinematic => "cinematic",
            Self::Gaming => "gaming",
            Self::Action => "action",
            Self::Romantic => "romantic",
            Self::Horror => "horror",
            Self::Documentary => "documentary",
            Self::Travel => "travel",
            Self::Corporate => "corporate",
            Self::Sports => "sports",
            Self::Wedding => "wedding",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Funny => "Funny",
            Self::Vlog => "Vlog",
            Self::Drama => "Drama",
            Self::Cinematic => "Cinematic",
            Self::Gaming => "Gaming",
            Self::Action => "Action",
            Self::Romantic => "Romantic",
            Self::Horror => "Horror",
            Self::Documentary => "Documentary",
            Self::Travel => "Travel",
            Self::Corporate => "Corporate",
            Self::Sports => "Sports",
            Self::Wedding => "Wedding",
        }
    }

    /// One-line editorial description shown on the context browse page.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Funny => "Upbeat and energetic music for comedy and lighthearted content",
            Self::Vlog => "Casual and easy-listening music for daily vlogs",
            Self::Drama => "Emotional and impactful music for dramatic scenes",
            Self::Cinematic => "Epic and atmospheric music for cinematic productions",
            Self::Gaming => "High-energy and immersive music for gaming content and streams",
            Self::Action => "Intense and fast-paced music for action sequences and thrillers",
            Self::Romantic => "Soft and emotional music for romantic scenes and love stories",
            Self::Horror => "Dark and suspenseful music for horror and thriller content",
            Self::Documentary => {
                "Neutral and informative music for documentaries and educational content"
            }
            Self::Travel => {
                "Adventurous and inspiring music for travel vlogs and exploration content"
            }
            Self::Corporate => "Professional and polished music for business and corporate videos",
            Self::Sports => {
                "Energetic and motivational music for sports highlights and athletic content"
            }
            Self::Wedding => {
                "Elegant and celebratory music for wedding videos and special occasions"
            }
        }
    }
}

impl fmt::Display for VideoContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// Parses a slug, ignoring ASCII case.
impl FromStr for VideoContext {
    type Err = TaxonomyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.slug().eq_ignore_ascii_case(s))
            .ok_or_else(|| TaxonomyError::UnknownContext(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_slugs_parse_back() {
        for context in VideoContext::ALL {
            assert_eq!(context.slug().parse::<VideoContext>().unwrap(), context);
        }
    }

    #[test]
    fn test_context_from_str_ignores_case() {
        assert_eq!("Wedding".parse::<VideoContext>().unwrap(), VideoContext::Wedding);
        assert_eq!(" gaming ".parse::<VideoContext>().unwrap(), VideoContext::Gaming);
    }

    #[test]
    fn test_context_from_str_unknown() {
        let err = "karaoke".parse::<VideoContext>().unwrap_err();
        assert_eq!(err, TaxonomyError::UnknownContext("karaoke".to_string()));
    }

    #[test]
    fn test_context_serde_uses_slug() {
        let json = serde_json::to_string(&VideoContext::Documentary).unwrap();
        assert_eq!(json, "\"documentary\"");
        let back: VideoContext = serde_json::from_str("\"sports\"").unwrap();
        assert_eq!(back, VideoContext::Sports);
    }

    #[test]
    fn test_context_labels_and_descriptions_present() {
        for context in VideoContext::ALL {
            assert!(context.label().eq_ignore_ascii_case(context.slug()));
            assert!(!context.description().is_empty());
        }
    }
}
