use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
pub struct Meta {
    pub limit: Option<usize>,
    pub offset: Option<usize>,
    pub total: Option<usize>,
}

impl Meta {
    pub fn new(limit: usize, offset: usize, total: usize) -> Self {
        Self {
            limit: Some(limit),
            offset: Some(offset),
            total: Some(total),
        }
    }

    pub fn empty() -> Self {
        Self {
            limit: None,
            offset: None,
            total: None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub message: String,
    pub data: Option<T>,
    pub meta: Option<Meta>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(message: impl Into<String>, data: T, meta: Option<Meta>) -> Self {
        Self {
            message: message.into(),
            data: Some(data),
            meta,
        }
    }
}
