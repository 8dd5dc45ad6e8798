use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result, required_text};
use crate::ids::ProspectId;

/// Product line a prospect asked about on the intake form.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ProductInterest {
    Vercel,
    V0,
    VercelAndV0,
}

impl ProductInterest {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match *self {
            Self::Vercel => "vercel",
            Self::V0 => "v0",
            Self::VercelAndV0 => "vercel_and_v0",
        }
    }

    /// Whether a catalog entry tagged with `product` is relevant to this interest.
    #[must_use]
    pub const fn covers(&self, product: Self) -> bool {
        matches!(
            (*self, product),
            (Self::VercelAndV0, _)
                | (_, Self::VercelAndV0)
                | (Self::Vercel, Self::Vercel)
                | (Self::V0, Self::V0)
        )
    }
}

impl fmt::Display for ProductInterest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProductInterest {
    type Err = CoreError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "vercel" => Ok(Self::Vercel),
            "v0" => Ok(Self::V0),
            "vercel_and_v0" | "vercel-and-v0" | "both" => Ok(Self::VercelAndV0),
            other => Err(CoreError::UnknownVariant {
                kind: "product interest",
                value: other.to_owned(),
            }),
        }
    }
}

/// A person who submitted the sales-contact form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Prospect {
    pub id: ProspectId,
    pub email: String,
    pub country: String,
    pub product_interest: ProductInterest,
    pub message: Option<String>,
    /// Recommended resource ids, three by convention, filled in after creation.
    pub ai_resources: Vec<String>,
    /// Resource ids the prospect engaged with. Grows monotonically, no duplicates.
    pub resources_completed: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Prospect {
    #[must_use]
    pub fn submission(&self) -> FormSubmission {
        FormSubmission {
            email: self.email.clone(),
            country: self.country.clone(),
            product_interest: self.product_interest,
            message: self.message.clone(),
        }
    }

    #[must_use]
    pub fn has_completed(&self, resource_id: &str) -> bool {
        self.resources_completed.iter().any(|r| r == resource_id)
    }
}

/// The fields a prospect typed into the intake form.
///
/// This is what gets handed to the text-generation provider and the
/// enrichment webhook, never the stored resource lists.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FormSubmission {
    pub email: String,
    pub country: String,
    pub product_interest: ProductInterest,
    pub message: Option<String>,
}

/// Raw intake payload, every field optional until validated.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IntakeRequest {
    pub email: Option<String>,
    pub country: Option<String>,
    #[serde(alias = "productInterest")]
    pub product_interest: Option<String>,
    pub message: Option<String>,
}

impl IntakeRequest {
    /// Check required fields and normalize the email for use as the upsert key.
    pub fn validate(self) -> Result<FormSubmission> {
        let email = required_text("email", self.email)?.to_lowercase();
        if !is_plausible_email(&email) {
            return Err(CoreError::InvalidField {
                field: "email",
                reason: format!("'{email}' is not an email address"),
            });
        }
        let country = required_text("country", self.country)?;
        let product_interest =
            required_text("product_interest", self.product_interest)?.parse::<ProductInterest>()?;
        let message = self.message.map(|m| m.trim().to_owned()).filter(|m| !m.is_empty());
        Ok(FormSubmission { email, country, product_interest, message })
    }
}

fn is_plausible_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && !domain.is_empty() && !email.contains(char::is_whitespace)
        },
        None => false,
    }
}

/// Result of an intake upsert.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct IntakeOutcome {
    pub prospect: Prospect,
    /// `true` when the email had never been seen before.
    pub created: bool,
}

/// Whether a resource-completion call changed anything.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CompletionOutcome {
    Completed,
    AlreadyCompleted,
}

impl CompletionOutcome {
    #[must_use]
    pub const fn is_new(&self) -> bool {
        matches!(self, Self::Completed)
    }
}
