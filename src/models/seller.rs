use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerificationStatus {
    Verified,
    Unverified,
}

/// A row of the `sellers` table. Logical key is `license_number`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Seller {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub business_name: String,
    pub license_number: String,
    pub license_state: String,
    pub verification_status: VerificationStatus,
    pub seller_rating: Option<f64>,
    pub total_sales: Option<u32>,
    pub years_in_business: Option<u32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Seller {
    /// A seller registered by ingestion, not tied to a marketplace user.
    pub fn unverified(business_name: &str, license_number: &str) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id: None,
            business_name: business_name.to_string(),
            license_number: license_number.to_string(),
            license_state: "CA".to_string(),
            verification_status: VerificationStatus::Unverified,
            seller_rating: None,
            total_sales: None,
            years_in_business: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn verified(business_name: &str, license_number: &str) -> Self {
        Self {
            verification_status: VerificationStatus::Verified,
            seller_rating: Some(4.8),
            total_sales: Some(1000),
            years_in_business: Some(5),
            ..Self::unverified(business_name, license_number)
        }
    }
}
