//! # Platform Catalog
//!
//! Target platforms, their content specifications, and the tone catalog.
//! The specs drive both prompt construction and the fallback formatters.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A supported publishing platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Platform {
    LinkedIn,
    #[serde(rename = "X (Twitter)")]
    Twitter,
    Instagram,
    YouTube,
    Newsletter,
    Blog,
}

/// Content constraints and style for one platform.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PlatformSpec {
    pub max_length: usize,
    pub style: &'static str,
    pub hashtag_min: u8,
    pub hashtag_max: u8,
    pub format: &'static str,
}

impl Platform {
    pub fn all() -> [Platform; 6] {
        [
            Platform::LinkedIn,
            Platform::Twitter,
            Platform::Instagram,
            Platform::YouTube,
            Platform::Newsletter,
            Platform::Blog,
        ]
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Platform::LinkedIn => "LinkedIn",
            Platform::Twitter => "X (Twitter)",
            Platform::Instagram => "Instagram",
            Platform::YouTube => "YouTube",
            Platform::Newsletter => "Newsletter",
            Platform::Blog => "Blog",
        }
    }

    /// Broad category used by the platforms metadata endpoint.
    pub fn kind(&self) -> &'static str {
        match self {
            Platform::LinkedIn => "professional",
            Platform::Twitter => "social",
            Platform::Instagram => "visual",
            Platform::YouTube => "video",
            Platform::Newsletter => "email",
            Platform::Blog => "long-form",
        }
    }

    pub fn spec(&self) -> PlatformSpec {
        match self {
            Platform::LinkedIn => PlatformSpec {
                max_length: 3000,
                style: "professional",
                hashtag_min: 3,
                hashtag_max: 5,
                format: "paragraph",
            },
            Platform::Twitter => PlatformSpec {
                max_length: 280,
                style: "conversational",
                hashtag_min: 1,
                hashtag_max: 3,
                format: "thread",
            },
            Platform::Instagram => PlatformSpec {
                max_length: 2200,
                style: "visual",
                hashtag_min: 5,
                hashtag_max: 10,
                format: "caption",
            },
            Platform::YouTube => PlatformSpec {
                max_length: 5000,
                style: "engaging",
                hashtag_min: 3,
                hashtag_max: 7,
                format: "description",
            },
            Platform::Newsletter => PlatformSpec {
                max_length: 10000,
                style: "informative",
                hashtag_min: 0,
                hashtag_max: 0,
                format: "article",
            },
            Platform::Blog => PlatformSpec {
                max_length: 15000,
                style: "comprehensive",
                hashtag_min: 3,
                hashtag_max: 8,
                format: "article",
            },
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "LinkedIn" => Ok(Platform::LinkedIn),
            "X (Twitter)" | "Twitter" | "X" => Ok(Platform::Twitter),
            "Instagram" => Ok(Platform::Instagram),
            "YouTube" => Ok(Platform::YouTube),
            "Newsletter" => Ok(Platform::Newsletter),
            "Blog" => Ok(Platform::Blog),
            other => Err(format!("Unsupported platform: {other}")),
        }
    }
}

/// A content tone with usage guidance.
///
/// Tones stay free-form strings in requests; this catalog only feeds the
/// metadata endpoint and the UI.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ToneInfo {
    pub name: &'static str,
    pub description: &'static str,
    pub best_for: &'static [Platform],
}

pub fn tone_catalog() -> &'static [ToneInfo] {
    &[
        ToneInfo {
            name: "Professional",
            description: "Formal business language, industry expertise focus",
            best_for: &[Platform::LinkedIn, Platform::Newsletter, Platform::Blog],
        },
        ToneInfo {
            name: "Casual",
            description: "Conversational, friendly, approachable tone",
            best_for: &[Platform::Instagram, Platform::Twitter, Platform::YouTube],
        },
        ToneInfo {
            name: "Educational",
            description: "Informative, teaching-focused, expert guidance",
            best_for: &[Platform::YouTube, Platform::Blog, Platform::Newsletter],
        },
        ToneInfo {
            name: "Entertaining",
            description: "Fun, engaging, personality-driven content",
            best_for: &[Platform::Instagram, Platform::Twitter, Platform::YouTube],
        },
        ToneInfo {
            name: "Inspirational",
            description: "Motivational, uplifting, aspirational messaging",
            best_for: &[Platform::LinkedIn, Platform::Instagram, Platform::Newsletter],
        },
        ToneInfo {
            name: "Conversational",
            description: "Direct, personal, like talking to a friend",
            best_for: &[Platform::Twitter, Platform::Instagram, Platform::YouTube],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_display_roundtrip() {
        for platform in Platform::all() {
            let parsed: Platform = platform.display_name().parse().unwrap();
            assert_eq!(parsed, platform);
        }
    }

    #[test]
    fn test_twitter_aliases() {
        assert_eq!("Twitter".parse::<Platform>().unwrap(), Platform::Twitter);
        assert_eq!("X".parse::<Platform>().unwrap(), Platform::Twitter);
        assert_eq!(
            "X (Twitter)".parse::<Platform>().unwrap(),
            Platform::Twitter
        );
    }

    #[test]
    fn test_unknown_platform_rejected() {
        let err = "MySpace".parse::<Platform>().unwrap_err();
        assert!(err.contains("MySpace"));
    }

    #[test]
    fn test_serde_uses_display_names() {
        let json = serde_json::to_string(&Platform::Twitter).unwrap();
        assert_eq!(json, "\"X (Twitter)\"");
        let back: Platform = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Platform::Twitter);
    }

    #[test]
    fn test_spec_lengths() {
        assert_eq!(Platform::Twitter.spec().max_length, 280);
        assert_eq!(Platform::LinkedIn.spec().max_length, 3000);
        assert_eq!(Platform::Blog.spec().max_length, 15000);
        assert_eq!(Platform::Newsletter.spec().hashtag_max, 0);
    }

    #[test]
    fn test_tone_catalog_complete() {
        let tones = tone_catalog();
        assert_eq!(tones.len(), 6);
        assert!(tones.iter().any(|t| t.name == "Professional"));
        assert!(tones.iter().all(|t| !t.best_for.is_empty()));
    }
}
