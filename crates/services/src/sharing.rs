//! Outbound share text for a single incident. Read-only: nothing here can
//! mutate the store.

use chrono::{DateTime, Utc};
use domains::models::{GeoPoint, Incident, IncidentKind};
use serde::{Deserialize, Serialize};
use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShareTarget {
    Twitter,
    Facebook,
    WhatsApp,
    Instagram,
    Snapchat,
}

impl ShareTarget {
    /// Web intent endpoint and the query parameter carrying the text.
    fn intent(&self) -> Option<(&'static str, &'static str)> {
        match self {
            ShareTarget::Twitter => Some(("https://twitter.com/intent/tweet", "text")),
            ShareTarget::Facebook => Some(("https://www.facebook.com/sharer/sharer.php", "u")),
            ShareTarget::WhatsApp => Some(("https://api.whatsapp.com/send", "text")),
            ShareTarget::Instagram => Some(("https://www.instagram.com/", "text")),
            // no web intent
            ShareTarget::Snapchat => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShareCard {
    #[serde(rename = "type")]
    pub kind: IncidentKind,
    pub location: GeoPoint,
    pub reported_at: DateTime<Utc>,
}

impl From<&Incident> for ShareCard {
    fn from(incident: &Incident) -> Self {
        Self {
            kind: incident.kind().clone(),
            location: incident.location(),
            reported_at: incident.created_at(),
        }
    }
}

impl ShareCard {
    pub fn share_text(&self) -> String {
        format!(
            "I just reported an incident! Location: {}, {}.",
            self.location.lat, self.location.lng
        )
    }

    pub fn clipboard_text(&self) -> String {
        format!("Incident: {} at [{}, {}]", self.kind, self.location.lat, self.location.lng)
    }

    /// `None` for targets that have no web share intent.
    pub fn share_url(&self, target: ShareTarget) -> Option<Url> {
        let (endpoint, param) = target.intent()?;
        Url::parse_with_params(endpoint, &[(param, self.share_text())]).ok()
    }
}
