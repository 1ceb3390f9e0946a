use crate::enums::{
    AdAgeRestriction, AdFormat, AdPlatform, CampaignStatus, CampaignType, CostType, GoalType,
    IdsType, StatsPeriod,
};
use crate::error::ErrorKind;
use crate::field_rules::{lenient_f64, lenient_i64, unix_time};
use crate::params::{require, require_non_empty, require_text, ParameterBag};
use crate::response::VkResponse;
use crate::traits::ApiRequest;
use crate::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdsCampaign {
    pub id: i64,
    #[serde(rename = "type")]
    pub campaign_type: Option<CampaignType>,
    pub name: String,
    pub status: CampaignStatus,
    #[serde(default, with = "lenient_i64")]
    pub day_limit: i64,
    #[serde(default, with = "lenient_i64")]
    pub all_limit: i64,
    #[serde(default, with = "unix_time")]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default, with = "unix_time")]
    pub stop_time: Option<DateTime<Utc>>,
    #[serde(default, with = "unix_time")]
    pub create_time: Option<DateTime<Utc>>,
    #[serde(default, with = "unix_time")]
    pub update_time: Option<DateTime<Utc>>,
}

/// `ads.getCampaigns`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GetCampaignsRequest {
    pub account_id: Option<i64>,
    /// Required for agency accounts
    pub client_id: Option<i64>,
    pub include_deleted: Option<bool>,
    /// Empty means all campaigns
    pub campaign_ids: Vec<i64>,
    pub fields: Vec<String>,
}

impl GetCampaignsRequest {
    pub fn new(account_id: i64) -> Self {
        Self {
            account_id: Some(account_id),
            ..Default::default()
        }
    }
}

impl ApiRequest for GetCampaignsRequest {
    type Output = Vec<AdsCampaign>;
    const METHOD: &'static str = "ads.getCampaigns";

    fn to_params(&self) -> Result<ParameterBag> {
        let account_id = require("account_id", self.account_id)?;

        let mut params = ParameterBag::new();
        params
            .add("account_id", account_id)
            .add_opt("client_id", self.client_id)
            .add_opt("include_deleted", self.include_deleted)
            .add_list("fields", &self.fields);
        if !self.campaign_ids.is_empty() {
            params.add_json("campaign_ids", &self.campaign_ids)?;
        }
        Ok(params)
    }

    fn map_response(response: VkResponse) -> Result<Self::Output> {
        response.as_sequence_of()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticsStats {
    pub day: Option<String>,
    pub month: Option<String>,
    pub overall: Option<i64>,
    #[serde(default, with = "lenient_f64")]
    pub spent: Option<f64>,
    pub impressions: Option<i64>,
    pub clicks: Option<i64>,
    pub reach: Option<i64>,
    pub join_rate: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetStatisticsResult {
    pub id: i64,
    #[serde(rename = "type")]
    pub ids_type: IdsType,
    #[serde(default)]
    pub stats: Vec<StatisticsStats>,
}

/// `ads.getStatistics`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GetStatisticsRequest {
    pub account_id: Option<i64>,
    pub ids_type: Option<IdsType>,
    pub ids: Vec<i64>,
    pub period: Option<StatsPeriod>,
    /// `YYYY-MM-DD` for days, `YYYY-MM` for months, `0` for overall
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    pub stats_fields: Vec<String>,
}

impl ApiRequest for GetStatisticsRequest {
    type Output = Vec<GetStatisticsResult>;
    const METHOD: &'static str = "ads.getStatistics";

    fn to_params(&self) -> Result<ParameterBag> {
        let account_id = require("account_id", self.account_id)?;
        let ids_type = require("ids_type", self.ids_type)?;
        require_non_empty("ids", &self.ids)?;
        let period = require("period", self.period)?;
        let date_from = require_text("date_from", self.date_from.as_deref())?;
        let date_to = require_text("date_to", self.date_to.as_deref())?;

        let mut params = ParameterBag::new();
        params
            .add("account_id", account_id)
            .add("ids_type", ids_type)
            .add_list("ids", &self.ids)
            .add("period", period)
            .add("date_from", date_from)
            .add("date_to", date_to)
            .add_list("stats_fields", &self.stats_fields);
        Ok(params)
    }

    fn map_response(response: VkResponse) -> Result<Self::Output> {
        response.as_sequence_of()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Musician {
    pub id: i64,
    pub name: String,
    pub avatar: Option<String>,
}

/// `ads.getMusiciansByIds`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GetMusiciansByIdsRequest {
    pub ids: Vec<i64>,
}

impl ApiRequest for GetMusiciansByIdsRequest {
    type Output = Vec<Musician>;
    const METHOD: &'static str = "ads.getMusiciansByIds";

    fn to_params(&self) -> Result<ParameterBag> {
        require_non_empty("ids", &self.ids)?;

        let mut params = ParameterBag::new();
        params.add_list("ids", &self.ids);
        Ok(params)
    }

    fn map_response(response: VkResponse) -> Result<Self::Output> {
        response.as_sequence_of()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetPixel {
    pub target_pixel_id: i64,
    pub name: String,
    pub category_id: Option<i64>,
    pub domain: Option<String>,
    #[serde(default, with = "unix_time")]
    pub last_hit: Option<DateTime<Utc>>,
    pub pixel: Option<String>,
}

/// `ads.getTargetPixels`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GetTargetPixelsRequest {
    pub account_id: Option<i64>,
    pub client_id: Option<i64>,
}

impl GetTargetPixelsRequest {
    pub fn new(account_id: i64) -> Self {
        Self {
            account_id: Some(account_id),
            client_id: None,
        }
    }
}

impl ApiRequest for GetTargetPixelsRequest {
    type Output = Vec<TargetPixel>;
    const METHOD: &'static str = "ads.getTargetPixels";

    fn to_params(&self) -> Result<ParameterBag> {
        let account_id = require("account_id", self.account_id)?;

        let mut params = ParameterBag::new();
        params
            .add("account_id", account_id)
            .add_opt("client_id", self.client_id);
        Ok(params)
    }

    fn map_response(response: VkResponse) -> Result<Self::Output> {
        response.as_sequence_of()
    }
}

/// One ad inside the `data` payload of `ads.createAds`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdSpecification {
    pub campaign_id: i64,
    pub ad_format: AdFormat,
    pub cost_type: CostType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal_type: Option<GoalType>,
    /// Price per click in kopecks
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpc: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpm: Option<u64>,
    pub name: String,
    pub link_url: url::Url,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age_restriction: Option<AdAgeRestriction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ad_platform: Option<AdPlatform>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day_limit: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub all_limit: Option<u64>,
}

/// Per-ad outcome of `ads.createAds`; failed ads carry an error code instead of an id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateAdsResult {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub error_code: Option<i32>,
    #[serde(default)]
    pub error_desc: Option<String>,
}

impl CreateAdsResult {
    /// Classified failure for this ad, if it was rejected
    pub fn error_kind(&self) -> Option<ErrorKind> {
        self.error_code.map(ErrorKind::from_code)
    }
}

/// `ads.createAds`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateAdsRequest {
    pub account_id: Option<i64>,
    pub data: Vec<AdSpecification>,
}

impl ApiRequest for CreateAdsRequest {
    type Output = Vec<CreateAdsResult>;
    const METHOD: &'static str = "ads.createAds";

    fn to_params(&self) -> Result<ParameterBag> {
        let account_id = require("account_id", self.account_id)?;
        require_non_empty("data", &self.data)?;

        let mut params = ParameterBag::new();
        params.add("account_id", account_id);
        params.add_json("data", &self.data)?;
        Ok(params)
    }

    fn map_response(response: VkResponse) -> Result<Self::Output> {
        response.as_sequence_of()
    }
}
