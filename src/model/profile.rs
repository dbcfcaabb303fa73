use std::fmt;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// The authenticated user's brokerage account identity and capability record.
/// Field names follow the gateway's JSON. Replaced wholesale on every fetch,
/// never patched field by field.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Profile {
    pub user_id: String,
    pub user_name: String,
    pub user_shortname: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
    pub user_type: String,
    pub email: String,
    pub broker: String,
    #[serde(default)]
    pub meta: ProfileMeta,
    #[serde(default)]
    pub products: Vec<String>,
    #[serde(default)]
    pub order_types: Vec<String>,
    #[serde(default)]
    pub exchanges: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ProfileMeta {
    #[serde(default)]
    pub demat_consent: String,
}

impl Profile {
    pub fn has_demat_consent(&self) -> bool {
        matches!(self.meta.demat_consent.as_str(), "consent" | "yes")
    }
}

impl Display for Profile {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (@{}) [{}] via {}",
            self.user_name, self.user_shortname, self.user_id, self.broker
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;

    // Response shape observed from the gateway's profile endpoint.
    const SAMPLE: &str = r#"{
        "user_id": "QU4872",
        "user_name": "Sandilya Phani Kumar Karavadi",
        "user_shortname": "Sandilya",
        "avatar_url": "https://s3.ap-south-1.amazonaws.com/zerodha-kite-blobs/avatars/vip.png",
        "user_type": "individual/ind_with_nom",
        "email": "sandilya@example.com",
        "broker": "ZERODHA",
        "meta": {"demat_consent": "consent"},
        "products": ["CNC", "NRML", "MIS", "BO", "CO"],
        "order_types": ["MARKET", "LIMIT", "SL", "SL-M"],
        "exchanges": ["BCD", "NFO", "BFO", "MCX", "NSE", "NCO", "MF", "BSE"]
    }"#;

    #[test]
    fn deserialize_gateway_profile() {
        let profile: Profile = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(profile.user_id, "QU4872");
        assert_eq!(profile.broker, "ZERODHA");
        assert_eq!(profile.products.len(), 5);
        assert_eq!(profile.exchanges.len(), 8);
        assert!(profile.has_demat_consent());
    }

    #[test]
    fn missing_optional_fields_default() {
        let profile: Profile = serde_json::from_str(
            r#"{
                "user_id": "AB1234",
                "user_name": "Test User",
                "user_shortname": "Test",
                "user_type": "individual",
                "email": "test@example.com",
                "broker": ""
            }"#,
        )
        .unwrap();
        assert!(profile.avatar_url.is_none());
        assert!(profile.products.is_empty());
        assert!(!profile.has_demat_consent());
    }
}
