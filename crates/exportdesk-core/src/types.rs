use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

// =============================================================================
// Conversation
// =============================================================================

/// Who authored a conversation turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// The exporter typing into the console.
    User,
    /// The reply generator.
    Agent,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Agent => write!(f, "agent"),
        }
    }
}

/// A single turn of the conversation history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn agent(content: impl Into<String>) -> Self {
        Self {
            role: Role::Agent,
            content: content.into(),
        }
    }
}

// =============================================================================
// Profile
// =============================================================================

/// Seller profile used to personalize generated replies.
///
/// Every field is optional on the wire. Missing fields decode to empty
/// values and the reply templates substitute neutral wording for them.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Profile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_name: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub product: String,
    /// Ordered; the first market is the default focus of a reply.
    #[serde(deserialize_with = "null_as_default")]
    pub target_markets: Vec<String>,
    /// Free-form price text, e.g. `$980/MT FOB Mundra`.
    #[serde(deserialize_with = "null_as_default")]
    pub price_point: String,
    /// Trade term code (FOB, CIF, EXW, ...).
    #[serde(deserialize_with = "null_as_default")]
    pub incoterm: String,
    #[serde(deserialize_with = "null_as_default")]
    pub unique_selling_point: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certifications: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_channels: Option<Vec<String>>,
}

impl Profile {
    /// The profile the reply endpoint substitutes when a request carries none.
    pub fn endpoint_default() -> Self {
        Self {
            business_name: None,
            product: "Export product".to_string(),
            target_markets: vec!["Global".to_string()],
            price_point: "To be discussed".to_string(),
            incoterm: "FOB".to_string(),
            unique_selling_point:
                "reliable supply chain, consistent quality, and competitive pricing".to_string(),
            certifications: None,
            preferred_channels: None,
        }
    }

    /// A filled-in starting profile for the console.
    pub fn sample() -> Self {
        Self {
            business_name: Some("Bharat Export Hub".to_string()),
            product: "Premium Basmati Rice (1121 Steamed)".to_string(),
            target_markets: vec![
                "UAE".to_string(),
                "Saudi Arabia".to_string(),
                "UK".to_string(),
            ],
            price_point: "$980/MT FOB Mundra".to_string(),
            incoterm: "FOB".to_string(),
            unique_selling_point:
                "APEDA certified milling facility with 24 hr loading SLA and aroma retention tech"
                    .to_string(),
            certifications: Some(vec![
                "ISO 22000".to_string(),
                "BRCGS".to_string(),
                "HACCP".to_string(),
            ]),
            preferred_channels: Some(vec![
                "Importers".to_string(),
                "Food Service Distributors".to_string(),
                "Modern Retail".to_string(),
            ]),
        }
    }

    /// Certifications, or an empty slice when none are listed.
    pub fn certifications(&self) -> &[String] {
        self.certifications.as_deref().unwrap_or(&[])
    }

    /// Preferred channels, or an empty slice when none are listed.
    pub fn preferred_channels(&self) -> &[String] {
        self.preferred_channels.as_deref().unwrap_or(&[])
    }
}

/// A JSON `null` decodes like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
