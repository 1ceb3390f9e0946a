//! Enumerations exchanged with the API.
//!
//! String-backed enums travel as their snake_case wire name, never the Rust
//! variant name. A few ads enums are transmitted as small integers instead.

use crate::error::ArgumentError;
use crate::params::ToParam;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $($(#[$vmeta:meta])* $variant:ident => $wire:literal,)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $($(#[$vmeta])* #[serde(rename = $wire)] $variant,)+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$(Self::$variant,)+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $wire,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ArgumentError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($wire => Ok(Self::$variant),)+
                    other => Err(ArgumentError::invalid_value(
                        stringify!($name),
                        format!("unknown value `{other}`"),
                    )),
                }
            }
        }

        impl ToParam for $name {
            fn to_param(&self) -> String {
                self.as_str().to_string()
            }
        }
    };
}

macro_rules! numeric_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $($(#[$vmeta:meta])* $variant:ident = $value:literal,)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "u8", into = "u8")]
        pub enum $name {
            $($(#[$vmeta])* $variant,)+
        }

        impl $name {
            pub fn value(&self) -> u8 {
                match self {
                    $(Self::$variant => $value,)+
                }
            }
        }

        impl TryFrom<u8> for $name {
            type Error = ArgumentError;

            fn try_from(value: u8) -> Result<Self, Self::Error> {
                match value {
                    $($value => Ok(Self::$variant),)+
                    other => Err(ArgumentError::invalid_value(
                        stringify!($name),
                        format!("unknown value {other}"),
                    )),
                }
            }
        }

        impl From<$name> for u8 {
            fn from(value: $name) -> Self {
                value.value()
            }
        }

        impl ToParam for $name {
            fn to_param(&self) -> String {
                self.value().to_string()
            }
        }
    };
}

wire_enum! {
    /// Activity shown to the other side of a conversation
    pub enum MessageActivityType {
        Typing => "typing",
        AudioMessage => "audiomessage",
        Photo => "photo",
        Video => "video",
        File => "file",
    }
}

wire_enum! {
    /// Which posts `wall.get` returns
    pub enum WallFilter {
        Owner => "owner",
        Others => "others",
        All => "all",
        Suggests => "suggests",
        Postponed => "postponed",
        Donut => "donut",
    }
}

wire_enum! {
    pub enum PostType {
        Post => "post",
        Copy => "copy",
        Reply => "reply",
        Postpone => "postpone",
        Suggest => "suggest",
    }
}

wire_enum! {
    pub enum CampaignType {
        Normal => "normal",
        VkAppsManaged => "vk_apps_managed",
        MobileApps => "mobile_apps",
        PromotedPosts => "promoted_posts",
        AdaptiveAds => "adaptive_ads",
        Stories => "stories",
    }
}

wire_enum! {
    /// Object type the statistics ids refer to
    pub enum IdsType {
        Ad => "ad",
        Campaign => "campaign",
        Client => "client",
        Office => "office",
    }
}

wire_enum! {
    pub enum StatsPeriod {
        Day => "day",
        Week => "week",
        Month => "month",
        Year => "year",
        Overall => "overall",
    }
}

wire_enum! {
    pub enum AdPlatform {
        All => "all",
        Desktop => "desktop",
        Mobile => "mobile",
    }
}

wire_enum! {
    pub enum TemplateType {
        Carousel => "carousel",
    }
}

wire_enum! {
    /// Transition requested through `orders.changeState`
    pub enum OrderStateAction {
        Cancel => "cancel",
        Charge => "charge",
        Refund => "refund",
    }
}

wire_enum! {
    pub enum OrderState {
        Chargeable => "chargeable",
        Declined => "declined",
        Cancelled => "cancelled",
        Charged => "charged",
        Refunded => "refunded",
    }
}

wire_enum! {
    pub enum SubscriptionStatus {
        Chargeable => "chargeable",
        Active => "active",
        Cancelled => "cancelled",
    }
}

numeric_enum! {
    pub enum CampaignStatus {
        Stopped = 0,
        Running = 1,
        Deleted = 2,
    }
}

numeric_enum! {
    pub enum CostType {
        PerClick = 0,
        PerImpressions = 1,
        OptimizedImpressions = 3,
    }
}

numeric_enum! {
    pub enum AdFormat {
        ImageAndText = 1,
        BigImage = 2,
        ExclusiveFormat = 3,
        CommunitySquareImage = 4,
        SpecialAppFormat = 7,
        SpecialCommunityFormat = 8,
        Community = 9,
        AdaptiveFormat = 11,
    }
}

numeric_enum! {
    pub enum GoalType {
        Impressions = 1,
        Clicks = 2,
        Leads = 3,
        Joins = 5,
    }
}

numeric_enum! {
    pub enum AdAgeRestriction {
        NoRestriction = 0,
        Plus0 = 1,
        Plus6 = 2,
        Plus12 = 3,
        Plus16 = 4,
        Plus18 = 5,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names_are_not_symbolic_names() {
        assert_eq!(MessageActivityType::AudioMessage.to_param(), "audiomessage");
        assert_eq!(CampaignType::VkAppsManaged.to_param(), "vk_apps_managed");
        assert_eq!(WallFilter::Postponed.to_string(), "postponed");
    }

    #[test]
    fn test_from_str() {
        assert_eq!("refund".parse::<OrderStateAction>().unwrap(), OrderStateAction::Refund);
        assert!("Refund".parse::<OrderStateAction>().is_err());
        for state in OrderState::ALL {
            assert_eq!(state.as_str().parse::<OrderState>().unwrap(), *state);
        }
    }

    #[test]
    fn test_string_enum_serde() {
        let state: OrderState = serde_json::from_str("\"charged\"").unwrap();
        assert_eq!(state, OrderState::Charged);
        assert_eq!(
            serde_json::to_string(&CampaignType::PromotedPosts).unwrap(),
            "\"promoted_posts\""
        );
    }

    #[test]
    fn test_numeric_enum_serde() {
        let status: CampaignStatus = serde_json::from_str("1").unwrap();
        assert_eq!(status, CampaignStatus::Running);
        assert_eq!(serde_json::to_string(&AdFormat::AdaptiveFormat).unwrap(), "11");
        assert!(serde_json::from_str::<CampaignStatus>("7").is_err());
        assert_eq!(CostType::OptimizedImpressions.to_param(), "3");
    }
}
