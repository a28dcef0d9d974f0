use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{Table, TableStatus};

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTableRequest {
    pub number: u32,
    pub capacity: u32,
    #[serde(default)]
    pub location: String,
    pub status: Option<TableStatus>,
    pub qr_code: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTableRequest {
    pub number: Option<u32>,
    pub capacity: Option<u32>,
    pub location: Option<String>,
    pub status: Option<TableStatus>,
    pub qr_code: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TableList {
    pub items: Vec<Table>,
}
