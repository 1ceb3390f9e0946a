use super::facade;
use vkapi_core::enums::{OrderState, OrderStateAction};
use vkapi_core::models::orders::{
    CancelSubscriptionRequest, ChangeStateRequest, GetAmountRequest, GetOrdersByIdRequest,
    GetOrdersRequest, GetUserSubscriptionByIdRequest, GetUserSubscriptionsRequest,
    UpdateSubscriptionRequest,
};
use vkapi_core::Result;

facade! {
    /// `orders.*` endpoints
    Orders {
        cancel_subscription => CancelSubscriptionRequest;
        /// Returns the state the order ended up in
        change_state => ChangeStateRequest;
        get => GetOrdersRequest;
        get_amount => GetAmountRequest;
        get_by_id => GetOrdersByIdRequest;
        get_user_subscription_by_id => GetUserSubscriptionByIdRequest;
        get_user_subscriptions => GetUserSubscriptionsRequest;
        update_subscription => UpdateSubscriptionRequest;
    }
}

impl Orders<'_> {
    pub async fn charge(&self, order_id: u64) -> Result<OrderState> {
        self.change_order(order_id, OrderStateAction::Charge).await
    }

    pub async fn refund(&self, order_id: u64) -> Result<OrderState> {
        self.change_order(order_id, OrderStateAction::Refund).await
    }

    async fn change_order(&self, order_id: u64, action: OrderStateAction) -> Result<OrderState> {
        self.change_state(&ChangeStateRequest {
            order_id: Some(order_id),
            action: Some(action),
            ..Default::default()
        })
        .await
    }
}
