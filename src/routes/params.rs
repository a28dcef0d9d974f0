use serde::Deserialize;
use utoipa::ToSchema;

use crate::{models::OrderStatus, store::OrderFilter};

const MAX_LIMIT: usize = 500;

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct OrderListQuery {
    pub status: Option<OrderStatus>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

impl OrderListQuery {
    pub fn normalize(&self) -> OrderFilter {
        OrderFilter {
            status: self.status,
            limit: self.limit.map(|limit| limit.clamp(1, MAX_LIMIT)),
            offset: self.offset.unwrap_or(0),
        }
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct MenuQuery {
    pub include_unavailable: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limit_is_clamped_and_offset_defaults() {
        let query = OrderListQuery {
            status: Some(OrderStatus::Pending),
            limit: Some(10_000),
            offset: None,
        };
        let filter = query.normalize();
        assert_eq!(filter.limit, Some(MAX_LIMIT));
        assert_eq!(filter.offset, 0);

        assert_eq!(OrderListQuery::default().normalize().limit, None);
    }
}
