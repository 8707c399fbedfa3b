//! Amazon regional domains and request-locale configuration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Accept-Language sent when the marketplace domain is not recognized.
pub const DEFAULT_ACCEPT_LANGUAGE: &str = "en-US,en;q=0.5";

/// Supported Amazon marketplaces with their domains and locales.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    #[default]
    Us,
    Uk,
    De,
    Fr,
    Es,
    It,
    Ca,
    Au,
    Jp,
    In,
    Br,
    Mx,
    Nl,
    Se,
}

impl Region {
    /// Returns the Amazon domain for this region.
    pub fn domain(&self) -> &'static str {
        match self {
            Region::Us => "amazon.com",
            Region::Uk => "amazon.co.uk",
            Region::De => "amazon.de",
            Region::Fr => "amazon.fr",
            Region::Es => "amazon.es",
            Region::It => "amazon.it",
            Region::Ca => "amazon.ca",
            Region::Au => "amazon.com.au",
            Region::Jp => "amazon.co.jp",
            Region::In => "amazon.in",
            Region::Br => "amazon.com.br",
            Region::Mx => "amazon.com.mx",
            Region::Nl => "amazon.nl",
            Region::Se => "amazon.se",
        }
    }

    /// Returns the Accept-Language header value for this region.
    pub fn accept_language(&self) -> &'static str {
        match self {
            Region::Us => "en-US,en;q=0.5",
            Region::Uk => "en-GB,en;q=0.9",
            Region::De => "de-DE,de;q=0.9,en;q=0.8",
            Region::Fr => "fr-FR,fr;q=0.9,en;q=0.8",
            Region::Es => "es-ES,es;q=0.9,en;q=0.8",
            Region::It => "it-IT,it;q=0.9,en;q=0.8",
            Region::Ca => "en-CA,en;q=0.9,fr-CA;q=0.8",
            Region::Au => "en-AU,en;q=0.9",
            Region::Jp => "ja-JP,ja;q=0.9,en;q=0.8",
            Region::In => "en-IN,en;q=0.9,hi;q=0.8",
            Region::Br => "pt-BR,pt;q=0.9,en;q=0.8",
            Region::Mx => "es-MX,es;q=0.9,en;q=0.8",
            Region::Nl => "nl-NL,nl;q=0.9,en;q=0.8",
            Region::Se => "sv-SE,sv;q=0.9,en;q=0.8",
        }
    }

    /// Finds the region for a marketplace domain extracted from a URL.
    ///
    /// Matches by suffix so `www.amazon.co.uk` resolves the same as
    /// `amazon.co.uk`. Ordered longest-first: `amazon.com.au` must win
    /// over `amazon.com`.
    pub fn from_domain(domain: &str) -> Option<Region> {
        const BY_SUFFIX: &[(&str, Region)] = &[
            ("amazon.com.au", Region::Au),
            ("amazon.com.br", Region::Br),
            ("amazon.com.mx", Region::Mx),
            ("amazon.co.uk", Region::Uk),
            ("amazon.co.jp", Region::Jp),
            ("amazon.com", Region::Us),
            ("amazon.de", Region::De),
            ("amazon.fr", Region::Fr),
            ("amazon.es", Region::Es),
            ("amazon.it", Region::It),
            ("amazon.ca", Region::Ca),
            ("amazon.in", Region::In),
            ("amazon.nl", Region::Nl),
            ("amazon.se", Region::Se),
        ];

        BY_SUFFIX.iter().find(|(suffix, _)| domain.ends_with(suffix)).map(|(_, r)| *r)
    }

    /// Returns the Accept-Language for an arbitrary domain string,
    /// falling back to the default for unknown marketplaces.
    pub fn accept_language_for(domain: &str) -> &'static str {
        Region::from_domain(domain)
            .map(|r| r.accept_language())
            .unwrap_or(DEFAULT_ACCEPT_LANGUAGE)
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            Region::Us => "us",
            Region::Uk => "uk",
            Region::De => "de",
            Region::Fr => "fr",
            Region::Es => "es",
            Region::It => "it",
            Region::Ca => "ca",
            Region::Au => "au",
            Region::Jp => "jp",
            Region::In => "in",
            Region::Br => "br",
            Region::Mx => "mx",
            Region::Nl => "nl",
            Region::Se => "se",
        };
        write!(f, "{}", code)
    }
}

impl FromStr for Region {
    type Err = RegionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Accept either a short code or a full domain ("amazon.de").
        if let Some(region) = Region::from_domain(&s.to_lowercase()) {
            return Ok(region);
        }

        match s.to_lowercase().as_str() {
            "us" | "usa" => Ok(Region::Us),
            "uk" | "gb" => Ok(Region::Uk),
            "de" => Ok(Region::De),
            "fr" => Ok(Region::Fr),
            "es" => Ok(Region::Es),
            "it" => Ok(Region::It),
            "ca" => Ok(Region::Ca),
            "au" => Ok(Region::Au),
            "jp" => Ok(Region::Jp),
            "in" => Ok(Region::In),
            "br" => Ok(Region::Br),
            "mx" => Ok(Region::Mx),
            "nl" => Ok(Region::Nl),
            "se" => Ok(Region::Se),
            _ => Err(RegionParseError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RegionParseError(String);

impl fmt::Display for RegionParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Unknown region '{}'. Valid regions: us, uk, de, fr, es, it, ca, au, jp, in, br, mx, nl, se",
            self.0
        )
    }
}

impl std::error::Error for RegionParseError {}
