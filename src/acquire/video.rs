use std::fmt;
use url::Url;

use crate::error::{Result, BisubError};

const VIDEO_ID_LEN: usize = 11;
const YOUTUBE_HOSTS: &[&str] = &[
    "youtube.com",
    "www.youtube.com",
    "m.youtube.com",
    "music.youtube.com",
    "youtube-nocookie.com",
    "www.youtube-nocookie.com",
];
const PATH_PREFIXES: &[&str] = &["embed", "shorts", "v", "live"];

/// Canonical 11-character YouTube video identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VideoId(String);

impl VideoId {
    /// Resolve the video identifier from any common YouTube URL form
    pub fn from_url(raw_url: &str) -> Result<Self> {
        let parsed = Url::parse(raw_url.trim())
            .map_err(|e| BisubError::InvalidUrl(format!("{}: {}", raw_url, e)))?;

        let host = parsed
            .host_str()
            .ok_or_else(|| BisubError::InvalidUrl(format!("{}: missing host", raw_url)))?
            .to_lowercase();

        let mut segments = parsed
            .path_segments()
            .map(|s| s.filter(|seg| !seg.is_empty()).collect::<Vec<_>>())
            .unwrap_or_default()
            .into_iter();

        let candidate = if host == "youtu.be" || host == "www.youtu.be" {
            segments.next().map(str::to_string)
        } else if YOUTUBE_HOSTS.contains(&host.as_str()) {
            match segments.next() {
                Some("watch") => parsed
                    .query_pairs()
                    .find(|(key, _)| key == "v")
                    .map(|(_, value)| value.into_owned()),
                Some(prefix) if PATH_PREFIXES.contains(&prefix) => {
                    segments.next().map(str::to_string)
                }
                _ => None,
            }
        } else {
            return Err(BisubError::InvalidUrl(format!("{}: not a YouTube domain", raw_url)));
        };

        let id = candidate
            .ok_or_else(|| BisubError::InvalidUrl(format!("{}: no video id found", raw_url)))?;
        Self::parse(&id)
    }

    /// Validate a bare identifier
    pub fn parse(id: &str) -> Result<Self> {
        let valid = id.len() == VIDEO_ID_LEN
            && id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');

        if valid {
            Ok(Self(id.to_string()))
        } else {
            Err(BisubError::InvalidUrl(format!("'{}' is not a valid video id", id)))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ID: &str = "BdfsuRS8UfA";

    #[test]
    fn test_supported_url_forms() {
        let urls = [
            "https://www.youtube.com/watch?v=BdfsuRS8UfA",
            "https://youtube.com/watch?v=BdfsuRS8UfA&t=42s",
            "https://m.youtube.com/watch?feature=share&v=BdfsuRS8UfA",
            "https://music.youtube.com/watch?v=BdfsuRS8UfA",
            "https://youtu.be/BdfsuRS8UfA",
            "https://youtu.be/BdfsuRS8UfA?si=abc",
            "https://www.youtube.com/embed/BdfsuRS8UfA",
            "https://www.youtube.com/shorts/BdfsuRS8UfA",
            "https://www.youtube.com/v/BdfsuRS8UfA",
            "https://www.youtube.com/live/BdfsuRS8UfA",
            "  https://WWW.YOUTUBE.COM/watch?v=BdfsuRS8UfA  ",
        ];

        for url in urls {
            let id = VideoId::from_url(url).unwrap_or_else(|e| panic!("{}: {}", url, e));
            assert_eq!(id.as_str(), ID, "{}", url);
        }
    }

    #[test]
    fn test_rejected_urls() {
        let urls = [
            "not a url",
            "https://vimeo.com/123456789",
            "https://www.youtube.com/watch?list=PL123",
            "https://www.youtube.com/@channel",
            "https://www.youtube.com/watch?v=short",
            "https://youtu.be/",
            "https://www.youtube.com/watch?v=BdfsuRS8Uf!",
        ];

        for url in urls {
            assert!(
                matches!(VideoId::from_url(url), Err(BisubError::InvalidUrl(_))),
                "{}",
                url
            );
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(VideoId::parse(ID).unwrap().to_string(), ID);
    }
}
