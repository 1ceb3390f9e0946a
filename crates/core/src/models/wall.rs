use super::common::{Community, Counter, Likes, Profile};
use crate::enums::{PostType, WallFilter};
use crate::error::ArgumentError;
use crate::field_rules::{int_bool, unix_time};
use crate::params::{at_most_one, require, require_non_empty, require_text, ParameterBag};
use crate::response::VkResponse;
use crate::traits::ApiRequest;
use crate::types::PostRef;
use crate::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub owner_id: i64,
    pub from_id: Option<i64>,
    pub created_by: Option<i64>,
    #[serde(default, with = "unix_time")]
    pub date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub text: String,
    pub post_type: Option<PostType>,
    pub comments: Option<Counter>,
    pub likes: Option<Likes>,
    pub reposts: Option<Counter>,
    pub views: Option<Counter>,
    #[serde(default, with = "int_bool")]
    pub is_pinned: bool,
    #[serde(default, with = "int_bool")]
    pub marked_as_ads: bool,
    #[serde(default)]
    pub copy_history: Vec<Post>,
}

impl Post {
    pub fn post_ref(&self) -> Option<PostRef> {
        u64::try_from(self.id)
            .ok()
            .map(|id| PostRef::new(self.owner_id, id))
    }
}

/// Page of posts, with profiles and communities when `extended` was requested
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WallGetObject {
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub items: Vec<Post>,
    #[serde(default)]
    pub profiles: Vec<Profile>,
    #[serde(default)]
    pub groups: Vec<Community>,
}

/// `wall.get`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WallGetRequest {
    pub owner_id: Option<i64>,
    /// Short address, used instead of `owner_id`
    pub domain: Option<String>,
    pub offset: Option<u64>,
    pub count: Option<u64>,
    pub filter: Option<WallFilter>,
    pub extended: Option<bool>,
    pub fields: Vec<String>,
    pub skip_authorization: bool,
}

impl ApiRequest for WallGetRequest {
    type Output = WallGetObject;
    const METHOD: &'static str = "wall.get";

    fn to_params(&self) -> Result<ParameterBag> {
        at_most_one(
            ("owner_id", self.owner_id.is_some()),
            ("domain", self.domain.is_some()),
        )?;

        // Suggested posts only exist on community walls
        if let (Some(WallFilter::Suggests), Some(owner_id)) = (self.filter, self.owner_id) {
            if owner_id >= 0 {
                return Err(ArgumentError::invalid_value(
                    "owner_id",
                    "must be negative when filter is `suggests`",
                )
                .into());
            }
        }

        let mut params = ParameterBag::new();
        params
            .add_opt("owner_id", self.owner_id)
            .add_opt("domain", self.domain.as_deref())
            .add_opt("offset", self.offset)
            .add_opt("count", self.count)
            .add_opt("filter", self.filter)
            .add_opt("extended", self.extended)
            .add_list("fields", &self.fields);
        Ok(params)
    }

    fn map_response(response: VkResponse) -> Result<Self::Output> {
        response.deserialize()
    }

    fn skip_authorization(&self) -> bool {
        self.skip_authorization
    }
}

/// `wall.getById`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WallGetByIdRequest {
    pub posts: Vec<PostRef>,
    pub extended: Option<bool>,
    pub copy_history_depth: Option<u32>,
    pub fields: Vec<String>,
    pub skip_authorization: bool,
}

impl ApiRequest for WallGetByIdRequest {
    type Output = WallGetObject;
    const METHOD: &'static str = "wall.getById";

    fn to_params(&self) -> Result<ParameterBag> {
        require_non_empty("posts", &self.posts)?;

        let mut params = ParameterBag::new();
        params
            .add_list("posts", &self.posts)
            .add_opt("extended", self.extended)
            .add_opt("copy_history_depth", self.copy_history_depth)
            .add_list("fields", &self.fields);
        Ok(params)
    }

    /// Older API versions return a bare array of posts
    fn map_response(response: VkResponse) -> Result<Self::Output> {
        if response.raw().is_array() {
            let items: Vec<Post> = response.as_sequence_of()?;
            return Ok(WallGetObject {
                count: items.len() as u64,
                items,
                ..Default::default()
            });
        }
        response.deserialize()
    }

    fn skip_authorization(&self) -> bool {
        self.skip_authorization
    }
}

/// `wall.post`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WallPostRequest {
    pub owner_id: Option<i64>,
    pub friends_only: Option<bool>,
    pub from_group: Option<bool>,
    pub message: Option<String>,
    /// Attachment ids such as `photo100172_166443618`
    pub attachments: Vec<String>,
    pub services: Vec<String>,
    pub signed: Option<bool>,
    pub publish_date: Option<DateTime<Utc>>,
    pub lat: Option<f64>,
    pub long: Option<f64>,
    pub place_id: Option<i64>,
    /// Publishes a suggested or postponed post
    pub post_id: Option<i64>,
    pub guid: Option<String>,
    pub mark_as_ads: Option<bool>,
    pub close_comments: Option<bool>,
    pub mute_notifications: Option<bool>,
    pub copyright: Option<String>,
}

impl ApiRequest for WallPostRequest {
    type Output = i64;
    const METHOD: &'static str = "wall.post";

    fn to_params(&self) -> Result<ParameterBag> {
        let has_message = self
            .message
            .as_deref()
            .is_some_and(|m| !m.trim().is_empty());
        if !has_message && self.attachments.is_empty() && self.post_id.is_none() {
            return Err(ArgumentError::one_of_required("message", "attachments").into());
        }

        let mut params = ParameterBag::new();
        params
            .add_opt("owner_id", self.owner_id)
            .add_opt("friends_only", self.friends_only)
            .add_opt("from_group", self.from_group)
            .add_opt("message", self.message.as_deref())
            .add_list("attachments", &self.attachments)
            .add_list("services", &self.services)
            .add_opt("signed", self.signed)
            .add_opt("publish_date", self.publish_date)
            .add_opt("lat", self.lat)
            .add_opt("long", self.long)
            .add_opt("place_id", self.place_id)
            .add_opt("post_id", self.post_id)
            .add_opt("guid", self.guid.as_deref())
            .add_opt("mark_as_ads", self.mark_as_ads)
            .add_opt("close_comments", self.close_comments)
            .add_opt("mute_notifications", self.mute_notifications)
            .add_opt("copyright", self.copyright.as_deref());
        Ok(params)
    }

    fn map_response(response: VkResponse) -> Result<Self::Output> {
        response.field("post_id")?.as_i64()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepostResult {
    #[serde(default, with = "int_bool")]
    pub success: bool,
    pub post_id: Option<i64>,
    #[serde(default)]
    pub reposts_count: u64,
    #[serde(default)]
    pub likes_count: u64,
}

/// `wall.repost`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WallRepostRequest {
    /// Object id such as `wall66748_3675`
    pub object: Option<String>,
    pub message: Option<String>,
    pub group_id: Option<u64>,
    pub mark_as_ads: Option<bool>,
}

impl ApiRequest for WallRepostRequest {
    type Output = RepostResult;
    const METHOD: &'static str = "wall.repost";

    fn to_params(&self) -> Result<ParameterBag> {
        let object = require_text("object", self.object.as_deref())?;

        let mut params = ParameterBag::new();
        params
            .add("object", object)
            .add_opt("message", self.message.as_deref())
            .add_opt("group_id", self.group_id)
            .add_opt("mark_as_ads", self.mark_as_ads);
        Ok(params)
    }

    fn map_response(response: VkResponse) -> Result<Self::Output> {
        response.deserialize()
    }
}

/// Endpoints addressing one post and answering `1` on success
macro_rules! post_action {
    ($(#[$meta:meta])* $name:ident => $method:literal, owner: optional) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Eq)]
        pub struct $name {
            pub owner_id: Option<i64>,
            pub post_id: Option<i64>,
        }

        impl ApiRequest for $name {
            type Output = bool;
            const METHOD: &'static str = $method;

            fn to_params(&self) -> Result<ParameterBag> {
                let post_id = require("post_id", self.post_id)?;

                let mut params = ParameterBag::new();
                params
                    .add_opt("owner_id", self.owner_id)
                    .add("post_id", post_id);
                Ok(params)
            }

            fn map_response(response: VkResponse) -> Result<Self::Output> {
                response.as_bool()
            }
        }
    };
    ($(#[$meta:meta])* $name:ident => $method:literal, owner: required) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Eq)]
        pub struct $name {
            pub owner_id: Option<i64>,
            pub post_id: Option<i64>,
        }

        impl ApiRequest for $name {
            type Output = bool;
            const METHOD: &'static str = $method;

            fn to_params(&self) -> Result<ParameterBag> {
                let owner_id = require("owner_id", self.owner_id)?;
                let post_id = require("post_id", self.post_id)?;

                let mut params = ParameterBag::new();
                params.add("owner_id", owner_id).add("post_id", post_id);
                Ok(params)
            }

            fn map_response(response: VkResponse) -> Result<Self::Output> {
                response.as_bool()
            }
        }
    };
}

post_action! {
    /// `wall.delete`
    WallDeleteRequest => "wall.delete", owner: optional
}

post_action! {
    /// `wall.restore`
    WallRestoreRequest => "wall.restore", owner: optional
}

post_action! {
    /// `wall.pin`
    WallPinRequest => "wall.pin", owner: optional
}

post_action! {
    /// `wall.unpin`
    WallUnpinRequest => "wall.unpin", owner: optional
}

post_action! {
    /// `wall.openComments`
    WallOpenCommentsRequest => "wall.openComments", owner: required
}

post_action! {
    /// `wall.closeComments`
    WallCloseCommentsRequest => "wall.closeComments", owner: required
}

/// `wall.deleteComment`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WallDeleteCommentRequest {
    pub owner_id: Option<i64>,
    pub comment_id: Option<i64>,
}

impl ApiRequest for WallDeleteCommentRequest {
    type Output = bool;
    const METHOD: &'static str = "wall.deleteComment";

    fn to_params(&self) -> Result<ParameterBag> {
        comment_params(self.owner_id, self.comment_id)
    }

    fn map_response(response: VkResponse) -> Result<Self::Output> {
        response.as_bool()
    }
}

/// `wall.restoreComment`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WallRestoreCommentRequest {
    pub owner_id: Option<i64>,
    pub comment_id: Option<i64>,
}

impl ApiRequest for WallRestoreCommentRequest {
    type Output = bool;
    const METHOD: &'static str = "wall.restoreComment";

    fn to_params(&self) -> Result<ParameterBag> {
        comment_params(self.owner_id, self.comment_id)
    }

    fn map_response(response: VkResponse) -> Result<Self::Output> {
        response.as_bool()
    }
}

fn comment_params(owner_id: Option<i64>, comment_id: Option<i64>) -> Result<ParameterBag> {
    let comment_id = require("comment_id", comment_id)?;

    let mut params = ParameterBag::new();
    params
        .add_opt("owner_id", owner_id)
        .add("comment_id", comment_id);
    Ok(params)
}

/// `wall.checkCopyrightLink`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WallCheckCopyrightLinkRequest {
    pub link: Option<String>,
}

impl ApiRequest for WallCheckCopyrightLinkRequest {
    type Output = bool;
    const METHOD: &'static str = "wall.checkCopyrightLink";

    fn to_params(&self) -> Result<ParameterBag> {
        let link = require_text("link", self.link.as_deref())?;

        let mut params = ParameterBag::new();
        params.add("link", link);
        Ok(params)
    }

    fn map_response(response: VkResponse) -> Result<Self::Output> {
        response.as_bool()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_wall_get_owner_and_domain_are_exclusive() {
        let neither = WallGetRequest::default();
        assert!(neither.to_params().unwrap().is_empty());

        let owner = WallGetRequest {
            owner_id: Some(-1),
            ..Default::default()
        };
        assert_eq!(owner.to_params().unwrap().get("owner_id"), Some("-1"));

        let both = WallGetRequest {
            owner_id: Some(-1),
            domain: Some("apiclub".into()),
            ..Default::default()
        };
        assert!(matches!(
            both.to_params().unwrap_err(),
            Error::Argument(ArgumentError::ConflictingArguments { .. })
        ));
    }

    #[test]
    fn test_wall_get_suggests_needs_community_owner() {
        let request = WallGetRequest {
            owner_id: Some(42),
            filter: Some(WallFilter::Suggests),
            ..Default::default()
        };
        assert!(matches!(
            request.to_params().unwrap_err(),
            Error::Argument(ArgumentError::InvalidValue { .. })
        ));

        let request = WallGetRequest {
            owner_id: Some(-42),
            ..request
        };
        assert_eq!(request.to_params().unwrap().get("filter"), Some("suggests"));
    }

    #[test]
    fn test_wall_get_mapping() {
        let response = VkResponse::new(json!({
            "count": 2,
            "items": [
                {
                    "id": 340364,
                    "owner_id": -1,
                    "from_id": -1,
                    "date": 1609459200,
                    "text": "Hello",
                    "post_type": "post",
                    "likes": {"count": 10, "user_likes": 1, "can_like": 0},
                    "comments": {"count": 3, "can_post": 1},
                    "is_pinned": 1
                },
                {"id": 5, "owner_id": -1, "date": 0, "post_type": "copy",
                 "copy_history": [{"id": 1, "owner_id": 2, "text": "orig"}]}
            ],
            "profiles": [{"id": 2, "first_name": "Pavel", "last_name": "Durov"}],
            "groups": [{"id": 1, "name": "VK API", "is_closed": 0}]
        }));

        let wall = WallGetRequest::map_response(response).unwrap();
        assert_eq!(wall.count, 2);
        let first = &wall.items[0];
        assert!(first.is_pinned);
        assert!(first.likes.as_ref().unwrap().user_likes);
        assert!(!first.likes.as_ref().unwrap().can_like);
        assert_eq!(first.post_ref(), Some(PostRef::new(-1, 340364)));
        assert_eq!(wall.items[1].date, None);
        assert_eq!(wall.items[1].copy_history[0].text, "orig");
        assert_eq!(wall.profiles[0].last_name, "Durov");
        assert_eq!(wall.groups[0].name, "VK API");
    }

    #[test]
    fn test_get_by_id_accepts_both_shapes() {
        let request = WallGetByIdRequest {
            posts: vec![PostRef::new(93388, 21539), PostRef::new(-1, 340364)],
            skip_authorization: true,
            ..Default::default()
        };
        assert_eq!(
            request.to_params().unwrap().get("posts"),
            Some("93388_21539,-1_340364")
        );
        assert!(request.skip_authorization());

        let bare = WallGetByIdRequest::map_response(VkResponse::new(json!([
            {"id": 21539, "owner_id": 93388}
        ])))
        .unwrap();
        assert_eq!(bare.count, 1);

        let wrapped = WallGetByIdRequest::map_response(VkResponse::new(json!({
            "items": [{"id": 21539, "owner_id": 93388}]
        })))
        .unwrap();
        assert_eq!(wrapped.items, bare.items);

        assert!(WallGetByIdRequest::default().to_params().is_err());
    }

    #[test]
    fn test_wall_post_params() {
        let request = WallPostRequest {
            owner_id: Some(-1),
            message: Some("Hello".into()),
            attachments: vec!["photo100172_166443618".into()],
            from_group: Some(true),
            publish_date: Some(Utc.with_ymd_and_hms(2021, 1, 1, 0, 0, 0).unwrap()),
            ..Default::default()
        };
        let params = request.to_params().unwrap();
        assert_eq!(params.get("from_group"), Some("1"));
        assert_eq!(params.get("publish_date"), Some("1609459200"));
        assert_eq!(params.get("attachments"), Some("photo100172_166443618"));
        assert!(!params.contains("signed"));

        assert_eq!(
            WallPostRequest::map_response(VkResponse::new(json!({"post_id": 45}))).unwrap(),
            45
        );
    }

    #[test]
    fn test_wall_post_needs_content() {
        let request = WallPostRequest {
            message: Some("  ".into()),
            ..Default::default()
        };
        assert!(matches!(
            request.to_params().unwrap_err(),
            Error::Argument(ArgumentError::OneOfRequired { .. })
        ));
    }

    #[test]
    fn test_repost() {
        assert!(WallRepostRequest::default().to_params().is_err());

        let result = WallRepostRequest::map_response(VkResponse::new(json!({
            "success": 1, "post_id": 2587, "reposts_count": 21, "likes_count": 49
        })))
        .unwrap();
        assert!(result.success);
        assert_eq!(result.post_id, Some(2587));
    }

    #[test]
    fn test_post_actions() {
        let delete = WallDeleteRequest {
            owner_id: None,
            post_id: Some(10),
        };
        let params = delete.to_params().unwrap();
        assert_eq!(params.get("post_id"), Some("10"));
        assert!(!params.contains("owner_id"));
        assert_eq!(WallDeleteRequest::METHOD, "wall.delete");

        let open = WallOpenCommentsRequest {
            owner_id: None,
            post_id: Some(10),
        };
        assert!(open.to_params().is_err());

        assert!(WallPinRequest::map_response(VkResponse::new(json!(1))).unwrap());
        assert!(WallUnpinRequest::default().to_params().is_err());
    }

    #[test]
    fn test_comment_actions() {
        let request = WallRestoreCommentRequest {
            owner_id: Some(-1),
            comment_id: Some(77),
        };
        let params = request.to_params().unwrap();
        assert_eq!(params.get("comment_id"), Some("77"));
        assert!(WallDeleteCommentRequest::default().to_params().is_err());
    }

    #[test]
    fn test_check_copyright_link() {
        let request = WallCheckCopyrightLinkRequest {
            link: Some("https://example.com/article".into()),
        };
        assert_eq!(
            request.to_params().unwrap().get("link"),
            Some("https://example.com/article")
        );
        assert!(!WallCheckCopyrightLinkRequest::map_response(VkResponse::new(json!(0))).unwrap());
    }
}
