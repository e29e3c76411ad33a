//! Overpass mirror endpoints.

use url::Url;

use super::OverpassError;

/// Public mirrors tried in this order when nothing else is configured.
pub const DEFAULT_MIRRORS: &[&str] = &[
    "https://lz4.overpass-api.de/api/",
    "https://z.overpass-api.de/api/",
];

/// One Overpass API instance, identified by its base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mirror {
    base: Url,
    status: Url,
    interpreter: Url,
}

impl Mirror {
    /// Parse a base URL such as `https://z.overpass-api.de/api/`.
    ///
    /// A base without a trailing slash is treated as a directory, so
    /// `.../api` and `.../api/` name the same mirror.
    pub fn parse(base_url: &str) -> Result<Self, OverpassError> {
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{}/", base_url)
        };

        let invalid = |source: url::ParseError| OverpassError::InvalidMirror {
            url: base_url.to_string(),
            source,
        };
        let base = Url::parse(&normalized).map_err(invalid)?;
        let status = base.join("status").map_err(invalid)?;
        let interpreter = base.join("interpreter").map_err(invalid)?;

        Ok(Self {
            base,
            status,
            interpreter,
        })
    }

    /// Parse a list of base URLs, preserving order
    pub fn parse_all<I, S>(urls: I) -> Result<Vec<Self>, OverpassError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        urls.into_iter().map(|u| Self::parse(u.as_ref())).collect()
    }

    /// The built-in public mirror list
    pub fn defaults() -> Vec<Self> {
        DEFAULT_MIRRORS
            .iter()
            .filter_map(|u| Self::parse(u).ok())
            .collect()
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    pub fn status_url(&self) -> &Url {
        &self.status
    }

    pub fn interpreter_url(&self) -> &Url {
        &self.interpreter
    }
}

impl std::fmt::Display for Mirror {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.base)
    }
}
