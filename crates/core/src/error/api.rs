use crate::params::ParameterBag;
use serde::Deserialize;
use std::fmt;
use thiserror::Error;

/// Error object returned by the API inside the `error` envelope node
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VkError {
    pub code: i32,
    pub message: String,
    pub request_params: ParameterBag,
    /// Present when `code` is [`ErrorKind::CaptchaNeeded`]
    pub captcha_sid: Option<String>,
    pub captcha_img: Option<String>,
}

impl VkError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            ..Default::default()
        }
    }

    pub fn with_request_params(mut self, params: ParameterBag) -> Self {
        self.request_params = params;
        self
    }
}

#[derive(Debug, Deserialize)]
struct RawRequestParam {
    key: String,
    #[serde(default)]
    value: serde_json::Value,
}

/// Wire shape of the `error` node
#[derive(Debug, Deserialize)]
pub(crate) struct RawVkError {
    error_code: i32,
    #[serde(default)]
    error_msg: String,
    #[serde(default)]
    request_params: Vec<RawRequestParam>,
    #[serde(default)]
    captcha_sid: Option<serde_json::Value>,
    #[serde(default)]
    captcha_img: Option<String>,
}

impl From<RawVkError> for VkError {
    fn from(raw: RawVkError) -> Self {
        let mut request_params = ParameterBag::new();
        for param in raw.request_params {
            let value = match param.value {
                serde_json::Value::String(s) => s,
                other => other.to_string(),
            };
            request_params.insert(param.key, value);
        }

        // captcha_sid arrives as either a string or a number
        let captcha_sid = raw.captcha_sid.map(|sid| match sid {
            serde_json::Value::String(s) => s,
            other => other.to_string(),
        });

        Self {
            code: raw.error_code,
            message: raw.error_msg,
            request_params,
            captcha_sid,
            captcha_img: raw.captcha_img,
        }
    }
}

macro_rules! error_kinds {
    ($($code:literal => $kind:ident: $description:literal,)+) => {
        /// Classified API failure, one variant per known error code
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum ErrorKind {
            $(
                #[doc = $description]
                $kind,
            )+
            /// Code outside the known table
            Generic(i32),
        }

        impl ErrorKind {
            /// Map a numeric code to its kind. Never fails: unknown codes become `Generic`.
            pub fn from_code(code: i32) -> Self {
                match code {
                    $($code => Self::$kind,)+
                    other => Self::Generic(other),
                }
            }

            pub fn code(&self) -> i32 {
                match self {
                    $(Self::$kind => $code,)+
                    Self::Generic(code) => *code,
                }
            }

            pub fn description(&self) -> &'static str {
                match self {
                    $(Self::$kind => $description,)+
                    Self::Generic(_) => "Unrecognized API error",
                }
            }

            /// Every known kind, in code order
            pub const KNOWN: &'static [ErrorKind] = &[$(Self::$kind,)+];
        }
    };
}

error_kinds! {
    1 => Unknown: "Unknown error occurred",
    2 => AppDisabled: "Application is disabled",
    3 => UnknownMethod: "Unknown method passed",
    4 => InvalidSignature: "Incorrect signature",
    5 => UserAuthorizationFailed: "User authorization failed",
    6 => TooManyRequests: "Too many requests per second",
    7 => PermissionDenied: "Permission to perform this action is denied",
    8 => InvalidRequest: "Invalid request",
    9 => FloodControl: "Flood control",
    10 => InternalServerError: "Internal server error",
    11 => AppInTestMode: "In test mode application should be disabled or user should be authorized",
    14 => CaptchaNeeded: "Captcha needed",
    15 => AccessDenied: "Access denied",
    16 => HttpsRequired: "HTTP authorization failed, HTTPS required",
    17 => ValidationRequired: "Validation required",
    18 => UserDeleted: "User was deleted or banned",
    19 => ContentBlocked: "Content blocked",
    20 => NonStandaloneAppPermissionDenied: "Permission to perform this action is denied for non-standalone applications",
    21 => StandaloneOnly: "Permission to perform this action is allowed only for standalone and OpenAPI applications",
    23 => MethodDisabled: "This method was disabled",
    24 => ConfirmationRequired: "Confirmation required",
    25 => TokenConfirmationRequired: "Token confirmation required",
    27 => GroupTokenInvalid: "Group authorization failed",
    28 => AppTokenInvalid: "Application authorization failed",
    29 => RateLimitReached: "Rate limit reached",
    30 => PrivateProfile: "This profile is private",
    33 => NotImplemented: "Not implemented yet",
    100 => InvalidParameter: "One of the parameters specified was missing or invalid",
    101 => InvalidAppId: "Invalid application API ID",
    103 => OutOfLimits: "Out of limits",
    104 => NotFound: "Not found",
    113 => InvalidUserId: "Invalid user id",
    114 => InvalidAlbumId: "Invalid album id",
    118 => InvalidServer: "Invalid server",
    119 => InvalidTitle: "Invalid title",
    121 => InvalidHash: "Invalid hash",
    122 => InvalidPhotoIds: "Invalid photo ids",
    125 => InvalidGroupId: "Invalid group id",
    129 => InvalidPhoto: "Invalid photo",
    140 => PageNotFound: "Page not found",
    141 => PageAccessDenied: "Access to page denied",
    148 => MenuAccessDenied: "Access to the menu of the user denied",
    150 => InvalidTimestamp: "Invalid timestamp",
    171 => InvalidListId: "Invalid list id",
    173 => TooManyFriendLists: "Reached the maximum number of lists",
    174 => CannotAddSelfAsFriend: "Cannot add user himself as friend",
    175 => CannotAddBlacklistedFriend: "Cannot add this user to friends as they have put you on their blacklist",
    176 => CannotAddFriendFromBlacklist: "Cannot add this user to friends as you put them on blacklist",
    177 => FriendNotFound: "Cannot add this user to friends as user not found",
    200 => AlbumAccessDenied: "Access to album denied",
    201 => AudioAccessDenied: "Access to audio denied",
    203 => GroupAccessDenied: "Access to group denied",
    204 => VideoAccessDenied: "Access to video denied",
    210 => WallPostAccessDenied: "Access to wall's post denied",
    211 => WallCommentAccessDenied: "Access to wall's comment denied",
    212 => PostCommentsAccessDenied: "Access to post comments denied",
    214 => PostAddAccessDenied: "Access to adding post denied",
    219 => AdsRecentlyPosted: "Advertisement post was recently added",
    220 => TooManyRecipients: "Too many recipients",
    222 => HyperlinksForbidden: "Hyperlinks are forbidden",
    223 => TooManyReplies: "Too many replies",
    224 => TooManyAdsPosts: "Too many ads posts",
    225 => DonutDisabled: "Donut is disabled",
    250 => PollAccessDenied: "Access to poll denied",
    251 => InvalidPollId: "Invalid poll id",
    252 => InvalidAnswerId: "Invalid answer id",
    300 => AlbumFull: "Album is full",
    302 => TooManyAlbums: "Albums number limit is reached",
    500 => VotesPermissionDenied: "Permission denied. You must enable votes processing in application settings",
    503 => NotEnoughVotes: "Not enough votes",
    504 => NotEnoughMoney: "Not enough money on owner's balance",
    600 => AdsAccessDenied: "Permission denied. You have no access to operations specified with given object(s)",
    601 => AdsTooManyActions: "Permission denied. You have requested too many actions this day",
    602 => AdsPartiallyCompleted: "Some part of the request has not been completed",
    603 => AdsSpecificError: "Some ads error occurred",
    800 => VideoAlreadyAdded: "This video is already added",
    801 => VideoCommentsClosed: "Comments for this video are closed",
    900 => CannotMessageBlacklisted: "Can't send messages for users from blacklist",
    901 => CannotMessageWithoutPermission: "Can't send messages for users without permission",
    902 => CannotMessagePrivacy: "Can't send messages to this user due to their privacy settings",
    909 => MessageEditExpired: "Can't edit this message, because it's too old",
    910 => MessageTooBig: "Can't sent this message, because it's too big",
    911 => KeyboardFormatInvalid: "Keyboard format is invalid",
    912 => ChatBotFeature: "This is a chat bot feature, change this status in settings",
    913 => TooManyForwardedMessages: "Too many forwarded messages",
    914 => MessageTooLong: "Message is too long",
    917 => ChatAccessDenied: "You don't have access to this chat",
    921 => CannotForwardMessages: "Can't forward these messages",
    924 => CannotDeleteForAll: "Can't delete this message for everybody",
    925 => NotChatAdmin: "You are not admin of this chat",
    927 => ChatNotFound: "Chat does not exist",
    936 => ContactNotFound: "Contact not found",
    939 => MessageRequestAlreadySent: "Message request already sent",
    945 => ChatDisabled: "Chat was disabled",
    1150 => InvalidDocumentId: "Invalid document id",
    1151 => DocumentDeleteDenied: "Access to document deleting is denied",
    1152 => InvalidDocumentTitle: "Invalid document title",
    1153 => DocumentAccessDenied: "Access to document is denied",
}

impl ErrorKind {
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Generic(_))
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Generic(code) => write!(f, "Generic({code})"),
            other => write!(f, "{other:?}"),
        }
    }
}

/// A classified API failure: the kind derived from the code plus the original error object
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("VK API error {} ({kind}): {}", .error.code, .error.message)]
pub struct ApiError {
    pub kind: ErrorKind,
    pub error: VkError,
}

impl ApiError {
    pub fn code(&self) -> i32 {
        self.error.code
    }

    pub fn message(&self) -> &str {
        &self.error.message
    }

    /// Rate limiting is the only kind retried unconditionally
    pub fn is_rate_limit(&self) -> bool {
        self.kind == ErrorKind::TooManyRequests
    }

    pub fn is_captcha(&self) -> bool {
        self.kind == ErrorKind::CaptchaNeeded
    }
}

/// Classify an error object by its numeric code
pub fn classify(error: VkError) -> ApiError {
    ApiError {
        kind: ErrorKind::from_code(error.code),
        error,
    }
}
