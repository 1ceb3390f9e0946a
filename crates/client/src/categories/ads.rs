use super::facade;
use vkapi_core::models::ads::{
    AdsCampaign, CreateAdsRequest, GetCampaignsRequest, GetMusiciansByIdsRequest,
    GetStatisticsRequest, GetTargetPixelsRequest,
};
use vkapi_core::Result;

facade! {
    /// `ads.*` endpoints
    Ads {
        /// `ads.getCampaigns`
        get_campaigns => GetCampaignsRequest;
        /// `ads.getStatistics`
        get_statistics => GetStatisticsRequest;
        /// `ads.getMusiciansByIds`
        get_musicians_by_ids => GetMusiciansByIdsRequest;
        /// `ads.getTargetPixels`
        get_target_pixels => GetTargetPixelsRequest;
        /// `ads.createAds`; per-ad failures come back inside the result list
        create_ads => CreateAdsRequest;
    }
}

impl Ads<'_> {
    /// Every campaign of an account, deleted ones excluded
    pub async fn campaigns_of(&self, account_id: i64) -> Result<Vec<AdsCampaign>> {
        self.get_campaigns(&GetCampaignsRequest::new(account_id))
            .await
    }
}
