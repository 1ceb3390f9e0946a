use super::common::{Community, Profile};
use crate::enums::MessageActivityType;
use crate::field_rules::{int_bool, unix_time};
use crate::params::{exactly_one, require, require_non_empty, ParameterBag};
use crate::response::VkResponse;
use crate::traits::ApiRequest;
use crate::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// `messages.setActivity`
///
/// Exactly one of `peer_id` and `group_id` must be set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SetActivityRequest {
    pub user_id: Option<String>,
    pub activity_type: Option<MessageActivityType>,
    pub peer_id: Option<i64>,
    pub group_id: Option<u64>,
}

impl SetActivityRequest {
    pub fn typing_to(peer_id: i64) -> Self {
        Self {
            activity_type: Some(MessageActivityType::Typing),
            peer_id: Some(peer_id),
            ..Default::default()
        }
    }
}

impl ApiRequest for SetActivityRequest {
    type Output = bool;
    const METHOD: &'static str = "messages.setActivity";

    fn to_params(&self) -> Result<ParameterBag> {
        let activity_type = require("type", self.activity_type)?;
        exactly_one(
            ("peer_id", self.peer_id.is_some()),
            ("group_id", self.group_id.is_some()),
        )?;

        let mut params = ParameterBag::new();
        params
            .add_opt("user_id", self.user_id.as_deref())
            .add("type", activity_type)
            .add_opt("peer_id", self.peer_id)
            .add_opt("group_id", self.group_id);
        Ok(params)
    }

    fn map_response(response: VkResponse) -> Result<Self::Output> {
        response.as_bool()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: i64,
    #[serde(default, with = "unix_time")]
    pub date: Option<DateTime<Utc>>,
    pub peer_id: Option<i64>,
    pub from_id: Option<i64>,
    #[serde(default)]
    pub text: String,
    pub conversation_message_id: Option<u64>,
    #[serde(default, with = "int_bool")]
    pub out: bool,
    #[serde(default)]
    pub important: bool,
    #[serde(default)]
    pub fwd_messages: Vec<Message>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MessagesResult {
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub items: Vec<Message>,
    #[serde(default)]
    pub profiles: Vec<Profile>,
    #[serde(default)]
    pub groups: Vec<Community>,
}

/// `messages.getByConversationMessageId`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetByConversationMessageIdRequest {
    pub peer_id: Option<i64>,
    pub conversation_message_ids: Vec<u64>,
    pub fields: Vec<String>,
    pub extended: Option<bool>,
    pub group_id: Option<u64>,
}

impl ApiRequest for GetByConversationMessageIdRequest {
    type Output = MessagesResult;
    const METHOD: &'static str = "messages.getByConversationMessageId";

    fn to_params(&self) -> Result<ParameterBag> {
        let peer_id = require("peer_id", self.peer_id)?;
        require_non_empty("conversation_message_ids", &self.conversation_message_ids)?;

        let mut params = ParameterBag::new();
        params
            .add("peer_id", peer_id)
            .add_list("conversation_message_ids", &self.conversation_message_ids)
            .add_list("fields", self.fields.iter().filter(|f| !f.is_empty()))
            .add_opt("extended", self.extended)
            .add_opt("group_id", self.group_id);
        Ok(params)
    }

    fn map_response(response: VkResponse) -> Result<Self::Output> {
        response.deserialize()
    }
}
