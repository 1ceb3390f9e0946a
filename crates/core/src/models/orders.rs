use crate::enums::{OrderState, OrderStateAction, SubscriptionStatus};
use crate::field_rules::{int_bool, lenient_i64, unix_time};
use crate::params::{require, require_non_empty, ParameterBag};
use crate::response::VkResponse;
use crate::traits::ApiRequest;
use crate::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    #[serde(with = "lenient_i64")]
    pub id: i64,
    #[serde(default, with = "lenient_i64")]
    pub app_order_id: i64,
    pub status: OrderState,
    #[serde(default, with = "lenient_i64")]
    pub user_id: i64,
    #[serde(default, with = "lenient_i64")]
    pub receiver_id: i64,
    #[serde(default)]
    pub item: String,
    #[serde(default, with = "lenient_i64")]
    pub amount: i64,
    #[serde(default, with = "unix_time")]
    pub date: Option<DateTime<Utc>>,
    pub transaction_id: Option<String>,
    pub cancel_transaction_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VotesAmount {
    pub votes: String,
    #[serde(with = "lenient_i64")]
    pub amount: i64,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubscriptionItem {
    pub id: u64,
    pub item_id: String,
    pub status: SubscriptionStatus,
    #[serde(default)]
    pub price: u64,
    /// Billing period in days
    #[serde(default)]
    pub period: u64,
    #[serde(default, with = "unix_time")]
    pub create_time: Option<DateTime<Utc>>,
    #[serde(default, with = "unix_time")]
    pub update_time: Option<DateTime<Utc>>,
    #[serde(default, with = "unix_time")]
    pub period_start_time: Option<DateTime<Utc>>,
    #[serde(default, with = "unix_time")]
    pub next_bill_time: Option<DateTime<Utc>>,
    #[serde(default, with = "unix_time")]
    pub expire_time: Option<DateTime<Utc>>,
    #[serde(default, with = "int_bool")]
    pub pending_cancel: bool,
    pub cancel_reason: Option<String>,
    #[serde(default, with = "int_bool")]
    pub test_mode: bool,
}

/// `orders.cancelSubscription`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CancelSubscriptionRequest {
    pub user_id: Option<u64>,
    pub subscription_id: Option<u64>,
    /// Cancel at the end of the paid period instead of immediately
    pub pending_cancel: Option<bool>,
}

impl ApiRequest for CancelSubscriptionRequest {
    type Output = bool;
    const METHOD: &'static str = "orders.cancelSubscription";

    fn to_params(&self) -> Result<ParameterBag> {
        let user_id = require("user_id", self.user_id)?;
        let subscription_id = require("subscription_id", self.subscription_id)?;

        let mut params = ParameterBag::new();
        params
            .add("user_id", user_id)
            .add("subscription_id", subscription_id)
            .add_opt("pending_cancel", self.pending_cancel);
        Ok(params)
    }

    fn map_response(response: VkResponse) -> Result<Self::Output> {
        response.as_bool()
    }
}

/// `orders.changeState`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeStateRequest {
    pub order_id: Option<u64>,
    pub action: Option<OrderStateAction>,
    pub app_order_id: Option<u64>,
    pub test_mode: Option<bool>,
}

impl ApiRequest for ChangeStateRequest {
    type Output = OrderState;
    const METHOD: &'static str = "orders.changeState";

    fn to_params(&self) -> Result<ParameterBag> {
        let order_id = require("order_id", self.order_id)?;
        let action = require("action", self.action)?;

        let mut params = ParameterBag::new();
        params
            .add("order_id", order_id)
            .add("action", action)
            .add_opt("app_order_id", self.app_order_id)
            .add_opt("test_mode", self.test_mode);
        Ok(params)
    }

    fn map_response(response: VkResponse) -> Result<Self::Output> {
        response.deserialize()
    }
}

/// `orders.get`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetOrdersRequest {
    pub offset: Option<u64>,
    pub count: Option<u64>,
    pub test_mode: Option<bool>,
}

impl ApiRequest for GetOrdersRequest {
    type Output = Vec<Order>;
    const METHOD: &'static str = "orders.get";

    fn to_params(&self) -> Result<ParameterBag> {
        let mut params = ParameterBag::new();
        params
            .add_opt("offset", self.offset)
            .add_opt("count", self.count)
            .add_opt("test_mode", self.test_mode);
        Ok(params)
    }

    fn map_response(response: VkResponse) -> Result<Self::Output> {
        response.as_sequence_of()
    }
}

/// `orders.getAmount`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetAmountRequest {
    pub user_id: Option<u64>,
    pub votes: Vec<String>,
}

impl ApiRequest for GetAmountRequest {
    type Output = Vec<VotesAmount>;
    const METHOD: &'static str = "orders.getAmount";

    fn to_params(&self) -> Result<ParameterBag> {
        let user_id = require("user_id", self.user_id)?;
        require_non_empty("votes", &self.votes)?;

        let mut params = ParameterBag::new();
        params.add("user_id", user_id).add_list("votes", &self.votes);
        Ok(params)
    }

    /// Answered either as a bare array or as `{amounts, currency}`
    fn map_response(response: VkResponse) -> Result<Self::Output> {
        match response.get("amounts") {
            Some(amounts) => amounts.as_sequence_of(),
            None => response.as_sequence_of(),
        }
    }
}

/// `orders.getById`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetOrdersByIdRequest {
    pub order_ids: Vec<u64>,
    pub test_mode: Option<bool>,
}

impl ApiRequest for GetOrdersByIdRequest {
    type Output = Vec<Order>;
    const METHOD: &'static str = "orders.getById";

    fn to_params(&self) -> Result<ParameterBag> {
        let mut params = ParameterBag::new();
        params
            .add_list("order_ids", &self.order_ids)
            .add_opt("test_mode", self.test_mode);
        Ok(params)
    }

    fn map_response(response: VkResponse) -> Result<Self::Output> {
        response.as_sequence_of()
    }
}

/// `orders.getUserSubscriptionById`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetUserSubscriptionByIdRequest {
    pub user_id: Option<u64>,
    pub subscription_id: Option<u64>,
}

impl ApiRequest for GetUserSubscriptionByIdRequest {
    type Output = SubscriptionItem;
    const METHOD: &'static str = "orders.getUserSubscriptionById";

    fn to_params(&self) -> Result<ParameterBag> {
        let user_id = require("user_id", self.user_id)?;
        let subscription_id = require("subscription_id", self.subscription_id)?;

        let mut params = ParameterBag::new();
        params
            .add("user_id", user_id)
            .add("subscription_id", subscription_id);
        Ok(params)
    }

    fn map_response(response: VkResponse) -> Result<Self::Output> {
        response.deserialize()
    }
}

/// `orders.getUserSubscriptions`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetUserSubscriptionsRequest {
    pub user_id: Option<u64>,
}

impl ApiRequest for GetUserSubscriptionsRequest {
    type Output = Vec<SubscriptionItem>;
    const METHOD: &'static str = "orders.getUserSubscriptions";

    fn to_params(&self) -> Result<ParameterBag> {
        let user_id = require("user_id", self.user_id)?;

        let mut params = ParameterBag::new();
        params.add("user_id", user_id);
        Ok(params)
    }

    fn map_response(response: VkResponse) -> Result<Self::Output> {
        response.as_sequence_of()
    }
}

/// `orders.updateSubscription`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateSubscriptionRequest {
    pub user_id: Option<u64>,
    pub subscription_id: Option<u64>,
    /// New price in votes
    pub price: Option<u64>,
}

impl ApiRequest for UpdateSubscriptionRequest {
    type Output = bool;
    const METHOD: &'static str = "orders.updateSubscription";

    fn to_params(&self) -> Result<ParameterBag> {
        let user_id = require("user_id", self.user_id)?;
        let subscription_id = require("subscription_id", self.subscription_id)?;
        let price = require("price", self.price)?;

        let mut params = ParameterBag::new();
        params
            .add("user_id", user_id)
            .add("subscription_id", subscription_id)
            .add("price", price);
        Ok(params)
    }

    fn map_response(response: VkResponse) -> Result<Self::Output> {
        response.as_bool()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_change_state() {
        let request = ChangeStateRequest {
            order_id: Some(42),
            action: Some(OrderStateAction::Charge),
            test_mode: Some(true),
            ..Default::default()
        };
        let params = request.to_params().unwrap();
        assert_eq!(params.get("action"), Some("charge"));
        assert_eq!(params.get("test_mode"), Some("1"));

        let state = ChangeStateRequest::map_response(VkResponse::new(json!("charged"))).unwrap();
        assert_eq!(state, OrderState::Charged);

        assert!(ChangeStateRequest {
            order_id: Some(42),
            ..Default::default()
        }
        .to_params()
        .is_err());
    }

    #[test]
    fn test_orders_mapping() {
        let orders = GetOrdersRequest::map_response(VkResponse::new(json!([{
            "id": "731",
            "app_order_id": "0",
            "status": "charged",
            "user_id": "1",
            "receiver_id": "1",
            "item": "item_1",
            "amount": "10",
            "date": "1609459200",
            "transaction_id": "13",
            "cancel_transaction_id": null
        }])))
        .unwrap();

        assert_eq!(orders[0].id, 731);
        assert_eq!(orders[0].status, OrderState::Charged);
        assert_eq!(orders[0].amount, 10);
        assert_eq!(orders[0].date.unwrap().timestamp(), 1609459200);
        assert_eq!(orders[0].cancel_transaction_id, None);
    }

    #[test]
    fn test_get_amount() {
        let request = GetAmountRequest {
            user_id: Some(1),
            votes: vec!["1".into(), "5".into()],
        };
        assert_eq!(request.to_params().unwrap().get("votes"), Some("1,5"));

        let wrapped = GetAmountRequest::map_response(VkResponse::new(json!({
            "amounts": [{"votes": "1", "amount": 7, "description": "7 rub"}],
            "currency": "RUB"
        })))
        .unwrap();
        let bare = GetAmountRequest::map_response(VkResponse::new(json!([
            {"votes": "1", "amount": "7", "description": "7 rub"}
        ])))
        .unwrap();
        assert_eq!(wrapped, bare);
    }

    #[test]
    fn test_subscriptions() {
        let subscriptions = GetUserSubscriptionsRequest::map_response(VkResponse::new(json!({
            "count": 1,
            "items": [{
                "id": 5,
                "item_id": "sub_1",
                "status": "active",
                "price": 10,
                "period": 30,
                "create_time": 1609459200,
                "update_time": 0,
                "pending_cancel": 1,
                "test_mode": 0
            }]
        })))
        .unwrap();

        let subscription = &subscriptions[0];
        assert_eq!(subscription.status, SubscriptionStatus::Active);
        assert!(subscription.pending_cancel);
        assert!(!subscription.test_mode);
        assert_eq!(subscription.update_time, None);
    }

    #[test]
    fn test_required_ids() {
        assert!(CancelSubscriptionRequest::default().to_params().is_err());
        assert!(GetUserSubscriptionByIdRequest {
            user_id: Some(1),
            subscription_id: None
        }
        .to_params()
        .is_err());
        assert!(UpdateSubscriptionRequest {
            user_id: Some(1),
            subscription_id: Some(2),
            price: None
        }
        .to_params()
        .is_err());
        assert!(GetOrdersByIdRequest::default().to_params().unwrap().is_empty());
    }
}
