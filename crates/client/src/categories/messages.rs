use super::facade;
use vkapi_core::models::messages::{GetByConversationMessageIdRequest, SetActivityRequest};
use vkapi_core::Result;

facade! {
    /// `messages.*` endpoints
    Messages {
        /// Exactly one of `peer_id` and `group_id` must be set
        set_activity => SetActivityRequest;
        get_by_conversation_message_id => GetByConversationMessageIdRequest;
    }
}

impl Messages<'_> {
    /// Show the typing indicator in a conversation
    pub async fn typing(&self, peer_id: i64) -> Result<bool> {
        self.set_activity(&SetActivityRequest::typing_to(peer_id))
            .await
    }
}
