use super::facade;
use vkapi_core::models::secure::{
    AddAppEventRequest, CheckTokenRequest, GetAppBalanceRequest, GetSmsHistoryRequest,
    GetTransactionsHistoryRequest, GetUserLevelRequest, GiveEventStickerRequest,
    SendNotificationRequest, SendSmsNotificationRequest, SetCounterRequest,
};
use vkapi_core::Result;

facade! {
    /// `secure.*` endpoints; these calls use the application service token
    Secure {
        add_app_event => AddAppEventRequest;
        check_token => CheckTokenRequest;
        get_app_balance => GetAppBalanceRequest;
        get_sms_history => GetSmsHistoryRequest;
        get_transactions_history => GetTransactionsHistoryRequest;
        get_user_level => GetUserLevelRequest;
        give_event_sticker => GiveEventStickerRequest;
        /// Returns the ids of users the notification was sent to
        send_notification => SendNotificationRequest;
        send_sms_notification => SendSmsNotificationRequest;
        /// `counters` and `user_id` are mutually exclusive
        set_counter => SetCounterRequest;
    }
}

impl Secure<'_> {
    /// Application balance in hundredths of a vote
    pub async fn app_balance(&self) -> Result<u64> {
        self.get_app_balance(&GetAppBalanceRequest).await
    }
}
