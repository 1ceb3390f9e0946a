use super::facade;
use vkapi_core::models::wall::{
    WallCheckCopyrightLinkRequest, WallCloseCommentsRequest, WallDeleteCommentRequest,
    WallDeleteRequest, WallGetByIdRequest, WallGetObject, WallGetRequest,
    WallOpenCommentsRequest, WallPinRequest, WallPostRequest, WallRepostRequest,
    WallRestoreCommentRequest, WallRestoreRequest, WallUnpinRequest,
};
use vkapi_core::{PostRef, Result};

facade! {
    /// `wall.*` endpoints
    Wall {
        get => WallGetRequest;
        get_by_id => WallGetByIdRequest;
        /// Returns the new post id
        post => WallPostRequest;
        repost => WallRepostRequest;
        delete => WallDeleteRequest;
        restore => WallRestoreRequest;
        pin => WallPinRequest;
        unpin => WallUnpinRequest;
        delete_comment => WallDeleteCommentRequest;
        restore_comment => WallRestoreCommentRequest;
        open_comments => WallOpenCommentsRequest;
        close_comments => WallCloseCommentsRequest;
        check_copyright_link => WallCheckCopyrightLinkRequest;
    }
}

impl Wall<'_> {
    /// Publish a text post on the wall of `owner_id`
    pub async fn post_message(&self, owner_id: i64, message: impl Into<String>) -> Result<i64> {
        self.post(&WallPostRequest {
            owner_id: Some(owner_id),
            message: Some(message.into()),
            ..Default::default()
        })
        .await
    }

    /// Fetch posts by reference
    pub async fn posts(&self, posts: impl IntoIterator<Item = PostRef>) -> Result<WallGetObject> {
        self.get_by_id(&WallGetByIdRequest {
            posts: posts.into_iter().collect(),
            ..Default::default()
        })
        .await
    }
}
