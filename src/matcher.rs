use thiserror::Error;
use tracing::{debug, trace};
use url::Url;

use crate::clipboard::ClipboardRead;
use crate::whitelist::{Concept, WhitelistCache};

/// Host of the links the rewriting service hands out. Copies of these are
/// never rewritten again, which is what stops the clipboard feedback loop.
pub const VANITY_DOMAIN: &str = "wild.link";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchOutcome {
    NotText,
    NotUrl,
    Malformed,
    AlreadyRewritten,
    NoMatch { domain: String },
    Matched { url: String, concept: Concept },
}

impl MatchOutcome {
    pub fn matched_url(&self) -> Option<&str> {
        match self {
            Self::Matched { url, .. } => Some(url),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("character {0:?} is not allowed in a URL")]
    InvalidChar(char),

    #[error(transparent)]
    Parse(#[from] url::ParseError),

    #[error("URL has no host")]
    NoHost,
}

/// RFC 3986 unreserved, reserved and percent characters.
fn is_uri_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || "-._~:/?#[]@!$&'()*+,;=%".contains(c)
}

/// Host exactly as written in `url`: the authority minus userinfo and port.
fn raw_host(url: &str) -> Option<&str> {
    let (_, rest) = url.split_once("://")?;
    let authority_end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
    let authority = &rest[..authority_end];
    let host_port = authority.rsplit_once('@').map_or(authority, |(_, h)| h);

    let host = if host_port.starts_with('[') {
        &host_port[..=host_port.find(']')?]
    } else {
        host_port.split(':').next().unwrap_or(host_port)
    };

    if host.is_empty() { None } else { Some(host) }
}

/// Host of `url` with one leading `www.` removed. The host keeps the case it
/// was copied with.
pub fn extract_domain(url: &str) -> Result<String, DomainError> {
    if let Some(c) = url.chars().find(|c| !is_uri_char(*c)) {
        return Err(DomainError::InvalidChar(c));
    }
    Url::parse(url)?;

    let host = raw_host(url).ok_or(DomainError::NoHost)?;
    Ok(host.strip_prefix("www.").unwrap_or(host).to_string())
}

/// Decides whether the clipboard holds a partner URL worth rewriting.
///
/// Containment is a plain substring test against the full clipboard text, so
/// `amazon.com` also matches a path or query mentioning it.
pub fn match_clipboard(read: &ClipboardRead, cache: &WhitelistCache) -> MatchOutcome {
    let Some(text) = read.as_text() else {
        trace!("Clipboard holds no plain text");
        return MatchOutcome::NotText;
    };

    if !text.starts_with("http") {
        trace!("Copied text is not a URL");
        return MatchOutcome::NotUrl;
    }

    let domain = match extract_domain(text) {
        Ok(domain) => domain,
        Err(e) => {
            debug!(error = %e, "Copied text is not a parseable URL");
            return MatchOutcome::Malformed;
        }
    };

    if domain == VANITY_DOMAIN {
        debug!("Clipboard already holds a vanity link");
        return MatchOutcome::AlreadyRewritten;
    }

    match cache.first_contained_in(text) {
        Some(concept) => {
            debug!(domain = %domain, concept = %concept.value(), "Matched partner domain");
            MatchOutcome::Matched {
                url: text.to_string(),
                concept,
            }
        }
        None => {
            debug!(domain = %domain, whitelist = cache.len(), "No partner domain matched");
            MatchOutcome::NoMatch { domain }
        }
    }
}
