use serde::Deserialize;
use utoipa::ToSchema;

/// Partial update of the restaurant configuration; absent fields are kept.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateConfigRequest {
    pub name: Option<String>,
    pub logo: Option<String>,
    pub primary_color: Option<String>,
    pub secondary_color: Option<String>,
    pub currency: Option<String>,
    pub language: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub email: Option<String>,
}
