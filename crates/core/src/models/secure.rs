use crate::field_rules::{int_bool, unix_time};
use crate::params::{at_most_one, require, require_non_empty, require_text, ParameterBag};
use crate::response::VkResponse;
use crate::traits::ApiRequest;
use crate::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// `secure.addAppEvent`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddAppEventRequest {
    pub user_id: Option<u64>,
    /// 1 for level reached, 2 for points earned
    pub activity_id: Option<u64>,
    pub value: Option<u64>,
}

impl ApiRequest for AddAppEventRequest {
    type Output = bool;
    const METHOD: &'static str = "secure.addAppEvent";

    fn to_params(&self) -> Result<ParameterBag> {
        let user_id = require("user_id", self.user_id)?;
        let activity_id = require("activity_id", self.activity_id)?;

        let mut params = ParameterBag::new();
        params
            .add("user_id", user_id)
            .add("activity_id", activity_id)
            .add_opt("value", self.value);
        Ok(params)
    }

    fn map_response(response: VkResponse) -> Result<Self::Output> {
        response.as_bool()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckTokenResult {
    #[serde(default, with = "int_bool")]
    pub success: bool,
    pub user_id: Option<i64>,
    #[serde(default, with = "unix_time")]
    pub date: Option<DateTime<Utc>>,
    #[serde(default, with = "unix_time")]
    pub expire: Option<DateTime<Utc>>,
}

/// `secure.checkToken`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckTokenRequest {
    /// User token to check; the call itself is made with the service token
    pub token: Option<String>,
    pub ip: Option<String>,
}

impl ApiRequest for CheckTokenRequest {
    type Output = CheckTokenResult;
    const METHOD: &'static str = "secure.checkToken";

    fn to_params(&self) -> Result<ParameterBag> {
        let token = require_text("token", self.token.as_deref())?;

        let mut params = ParameterBag::new();
        params.add("token", token).add_opt("ip", self.ip.as_deref());
        Ok(params)
    }

    fn map_response(response: VkResponse) -> Result<Self::Output> {
        response.deserialize()
    }
}

/// `secure.getAppBalance`, balance in hundredths of a vote
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetAppBalanceRequest;

impl ApiRequest for GetAppBalanceRequest {
    type Output = u64;
    const METHOD: &'static str = "secure.getAppBalance";

    fn to_params(&self) -> Result<ParameterBag> {
        Ok(ParameterBag::new())
    }

    fn map_response(response: VkResponse) -> Result<Self::Output> {
        response.as_u64()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmsHistoryItem {
    pub id: u64,
    pub app_id: Option<u64>,
    pub user_id: Option<u64>,
    #[serde(default, with = "unix_time")]
    pub date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub message: String,
}

/// `secure.getSMSHistory`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetSmsHistoryRequest {
    pub user_id: Option<u64>,
    pub date_from: Option<DateTime<Utc>>,
    pub date_to: Option<DateTime<Utc>>,
    /// At most 1000
    pub limit: Option<u64>,
}

impl ApiRequest for GetSmsHistoryRequest {
    type Output = Vec<SmsHistoryItem>;
    const METHOD: &'static str = "secure.getSMSHistory";

    fn to_params(&self) -> Result<ParameterBag> {
        let mut params = ParameterBag::new();
        params
            .add_opt("user_id", self.user_id)
            .add_opt("date_from", self.date_from)
            .add_opt("date_to", self.date_to)
            .add_opt("limit", self.limit);
        Ok(params)
    }

    fn map_response(response: VkResponse) -> Result<Self::Output> {
        response.as_sequence_of()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: u64,
    pub uid_from: Option<u64>,
    pub uid_to: Option<u64>,
    #[serde(default)]
    pub votes: u64,
    #[serde(default, with = "unix_time")]
    pub date: Option<DateTime<Utc>>,
}

/// `secure.getTransactionsHistory`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetTransactionsHistoryRequest;

impl ApiRequest for GetTransactionsHistoryRequest {
    type Output = Vec<Transaction>;
    const METHOD: &'static str = "secure.getTransactionsHistory";

    fn to_params(&self) -> Result<ParameterBag> {
        Ok(ParameterBag::new())
    }

    fn map_response(response: VkResponse) -> Result<Self::Output> {
        response.as_sequence_of()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecureLevel {
    #[serde(alias = "uid")]
    pub id: i64,
    #[serde(default)]
    pub level: i64,
}

/// `secure.getUserLevel`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetUserLevelRequest {
    pub user_ids: Vec<i64>,
}

impl ApiRequest for GetUserLevelRequest {
    type Output = Vec<SecureLevel>;
    const METHOD: &'static str = "secure.getUserLevel";

    fn to_params(&self) -> Result<ParameterBag> {
        require_non_empty("user_ids", &self.user_ids)?;

        let mut params = ParameterBag::new();
        params.add_list("user_ids", &self.user_ids);
        Ok(params)
    }

    fn map_response(response: VkResponse) -> Result<Self::Output> {
        response.as_sequence_of()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventSticker {
    pub user_id: u64,
    pub status: String,
}

/// `secure.giveEventSticker`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GiveEventStickerRequest {
    pub user_ids: Vec<u64>,
    pub achievement_id: Option<u64>,
}

impl ApiRequest for GiveEventStickerRequest {
    type Output = Vec<EventSticker>;
    const METHOD: &'static str = "secure.giveEventSticker";

    fn to_params(&self) -> Result<ParameterBag> {
        require_non_empty("user_ids", &self.user_ids)?;
        let achievement_id = require("achievement_id", self.achievement_id)?;

        let mut params = ParameterBag::new();
        params
            .add_list("user_ids", &self.user_ids)
            .add("achievement_id", achievement_id);
        Ok(params)
    }

    fn map_response(response: VkResponse) -> Result<Self::Output> {
        response.as_sequence_of()
    }
}

/// `secure.sendNotification`; answers with the ids that received it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SendNotificationRequest {
    pub message: Option<String>,
    /// Empty sends to the single `user_id` bound to the token
    pub user_ids: Vec<u64>,
}

impl ApiRequest for SendNotificationRequest {
    type Output = Vec<u64>;
    const METHOD: &'static str = "secure.sendNotification";

    fn to_params(&self) -> Result<ParameterBag> {
        let message = require_text("message", self.message.as_deref())?;

        let mut params = ParameterBag::new();
        params
            .add_list("user_ids", &self.user_ids)
            .add("message", message);
        Ok(params)
    }

    /// The ids arrive comma-joined, e.g. `"1,2,3"`
    fn map_response(response: VkResponse) -> Result<Self::Output> {
        response.as_sequence_of()
    }
}

/// `secure.sendSMSNotification`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SendSmsNotificationRequest {
    pub user_id: Option<u64>,
    pub message: Option<String>,
}

impl ApiRequest for SendSmsNotificationRequest {
    type Output = bool;
    const METHOD: &'static str = "secure.sendSMSNotification";

    fn to_params(&self) -> Result<ParameterBag> {
        let user_id = require("user_id", self.user_id)?;
        let message = require_text("message", self.message.as_deref())?;

        let mut params = ParameterBag::new();
        params.add("user_id", user_id).add("message", message);
        Ok(params)
    }

    fn map_response(response: VkResponse) -> Result<Self::Output> {
        response.as_bool()
    }
}

/// `secure.setCounter`
///
/// Either a batch of `user_id:value` pairs in `counters`, or a single
/// `user_id` with `counter`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SetCounterRequest {
    pub counters: Vec<String>,
    pub user_id: Option<u64>,
    pub counter: Option<i64>,
    pub increment: Option<bool>,
}

impl ApiRequest for SetCounterRequest {
    type Output = bool;
    const METHOD: &'static str = "secure.setCounter";

    fn to_params(&self) -> Result<ParameterBag> {
        at_most_one(
            ("counters", !self.counters.is_empty()),
            ("user_id", self.user_id.is_some()),
        )?;

        let mut params = ParameterBag::new();
        params
            .add_list("counters", &self.counters)
            .add_opt("user_id", self.user_id)
            .add_opt("counter", self.counter)
            .add_opt("increment", self.increment);
        Ok(params)
    }

    fn map_response(response: VkResponse) -> Result<Self::Output> {
        response.as_bool()
    }
}
