//! Cross-reference link index and portal routing.

use std::collections::HashMap;

use serde::Deserialize;
use url::form_urlencoded;

use super::content::loose_string;

/// Default portal page for playable items.
pub const DEFAULT_PORTAL_PATH: &str = "portal.html";
/// Portal page for items built on the alternate engine.
pub const ALTERNATE_PORTAL_PATH: &str = "uportal.html";
/// Engine type routed to [`ALTERNATE_PORTAL_PATH`].
pub const ALTERNATE_ENGINE_TYPE: &str = "unity";

/// Parsed link-index document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LinkIndex {
    pub games: HashMap<String, LinkDescriptor>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LinkDescriptor {
    #[serde(rename = "type", deserialize_with = "loose_string")]
    pub kind: Option<String>,
}

impl LinkIndex {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    pub fn descriptor(&self, id: &str) -> Option<&LinkDescriptor> {
        self.games.get(id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortalPath {
    Default,
    Alternate,
}

impl PortalPath {
    pub fn as_str(self) -> &'static str {
        match self {
            PortalPath::Default => DEFAULT_PORTAL_PATH,
            PortalPath::Alternate => ALTERNATE_PORTAL_PATH,
        }
    }
}

/// Choose the portal page for a content id.
pub fn resolve_portal_path(id: &str, links: &LinkIndex) -> PortalPath {
    match links.descriptor(id).and_then(|link| link.kind.as_deref()) {
        Some(ALTERNATE_ENGINE_TYPE) => PortalPath::Alternate,
        _ => PortalPath::Default,
    }
}

/// Portal link for a content id, e.g. `uportal.html?id=g1`.
pub fn portal_href(id: &str, links: &LinkIndex) -> String {
    let path = resolve_portal_path(id, links).as_str();
    let encoded: String = form_urlencoded::byte_serialize(id.as_bytes()).collect();
    format!("{path}?id={encoded}")
}
