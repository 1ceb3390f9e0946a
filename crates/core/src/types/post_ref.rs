use crate::params::ToParam;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Full post identifier `{owner_id}_{post_id}`, e.g. `-1_340364`.
///
/// Community owners are negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PostRef {
    pub owner_id: i64,
    pub post_id: u64,
}

impl PostRef {
    pub fn new(owner_id: i64, post_id: u64) -> Self {
        Self { owner_id, post_id }
    }
}

impl fmt::Display for PostRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.owner_id, self.post_id)
    }
}

impl FromStr for PostRef {
    type Err = PostRefError;

    /// Accepts `93388_21539` as well as the link form `wall93388_21539`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let trimmed = trimmed.strip_prefix("wall").unwrap_or(trimmed);
        let (owner, post) = trimmed
            .split_once('_')
            .ok_or_else(|| PostRefError::Format(s.to_string()))?;

        let owner_id = owner
            .parse()
            .map_err(|_| PostRefError::Format(s.to_string()))?;
        let post_id = post
            .parse()
            .map_err(|_| PostRefError::Format(s.to_string()))?;

        if owner_id == 0 {
            return Err(PostRefError::ZeroOwner);
        }

        Ok(Self { owner_id, post_id })
    }
}

impl TryFrom<String> for PostRef {
    type Error = PostRefError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PostRef> for String {
    fn from(post: PostRef) -> Self {
        post.to_string()
    }
}

impl ToParam for PostRef {
    fn to_param(&self) -> String {
        self.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PostRefError {
    #[error("Invalid post reference `{0}`, expected `owner_post`")]
    Format(String),
    #[error("Post owner cannot be 0")]
    ZeroOwner,
}

impl From<PostRefError> for crate::Error {
    fn from(err: PostRefError) -> Self {
        crate::error::ArgumentError::invalid_value("posts", err.to_string()).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        let post: PostRef = "-1_340364".parse().unwrap();
        assert_eq!(post, PostRef::new(-1, 340364));

        let post: PostRef = "wall93388_21539".parse().unwrap();
        assert_eq!(post.owner_id, 93388);
        assert_eq!(post.to_param(), "93388_21539");
    }

    #[test]
    fn test_invalid() {
        assert!("93388".parse::<PostRef>().is_err());
        assert!("a_1".parse::<PostRef>().is_err());
        assert!("1_-5".parse::<PostRef>().is_err());
        assert_eq!("0_5".parse::<PostRef>(), Err(PostRefError::ZeroOwner));
    }
}
