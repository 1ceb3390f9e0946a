//! Payloads delivered by community event feeds.

use crate::response::VkResponse;
use crate::traits::FromResponse;
use crate::Result;
use serde::{Deserialize, Serialize};

/// Community the event belongs to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupId(pub Option<u64>);

impl FromResponse for GroupId {
    fn from_response(response: &VkResponse) -> Result<Option<Self>> {
        if !response.has_token() {
            return Ok(None);
        }
        Ok(Some(Self(Some(response.as_u64()?))))
    }
}

/// New or prolonged donut subscription
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DonutNew {
    pub user_id: Option<i64>,
    pub amount: Option<f64>,
    pub amount_without_fee: Option<f64>,
}

impl FromResponse for DonutNew {
    fn from_response(response: &VkResponse) -> Result<Option<Self>> {
        if !response.has_token() {
            return Ok(None);
        }

        let user_id = response.get("user_id").map(|v| v.as_i64()).transpose()?;
        let amount = response.get("amount").map(|v| v.as_f64()).transpose()?;
        let amount_without_fee = response
            .get("amount_without_fee")
            .map(|v| v.as_f64())
            .transpose()?;

        Ok(Some(Self {
            user_id,
            amount,
            amount_without_fee,
        }))
    }
}

/// One entry of an event feed: `{type, object, group_id, event_id}`
#[derive(Debug, Clone, PartialEq)]
pub struct GroupUpdate {
    pub kind: String,
    pub group_id: GroupId,
    pub event_id: Option<String>,
    pub object: VkResponse,
}

impl GroupUpdate {
    /// Donut payload for subscription create and prolong events
    pub fn donut(&self) -> Result<Option<DonutNew>> {
        match self.kind.as_str() {
            "donut_subscription_create" | "donut_subscription_prolonged" => {
                DonutNew::from_response(&self.object)
            }
            _ => Ok(None),
        }
    }
}

impl FromResponse for GroupUpdate {
    fn from_response(response: &VkResponse) -> Result<Option<Self>> {
        if !response.has_token() {
            return Ok(None);
        }

        let kind = response.field("type")?.as_str()?.to_string();
        let group_id = response
            .get("group_id")
            .map(|v| GroupId::from_response(&v))
            .transpose()?
            .flatten()
            .unwrap_or_default();
        let event_id = response
            .get("event_id")
            .map(|v| v.as_str().map(str::to_string))
            .transpose()?;
        let object = response.get("object").unwrap_or_default();

        Ok(Some(Self {
            kind,
            group_id,
            event_id,
            object,
        }))
    }
}
