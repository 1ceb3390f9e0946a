//! Local validation: bad requests fail before anything reaches the transport.

use integration_tests::common::*;
use integration_tests::*;
use vkapi_core::enums::MessageActivityType;
use vkapi_core::models::ads::{GetCampaignsRequest, GetMusiciansByIdsRequest};
use vkapi_core::models::messages::SetActivityRequest;
use vkapi_core::models::orders::ChangeStateRequest;
use vkapi_core::models::secure::{SendNotificationRequest, SetCounterRequest};
use vkapi_core::models::wall::{WallGetRequest, WallPostRequest};
use vkapi_core::ArgumentError;

fn assert_argument_error(result: vkapi_core::Result<impl std::fmt::Debug>) -> ArgumentError {
    match result {
        Err(Error::Argument(err)) => err,
        other => panic!("Expected argument error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_missing_required_parameters_issue_no_calls() {
    let transport = ScriptedTransport::always(response_body(json!(1)));
    let api = create_test_client(transport.clone(), 3);

    let err = assert_argument_error(api.ads().get_campaigns(&GetCampaignsRequest::default()).await);
    assert!(matches!(err, ArgumentError::MissingRequired { ref name } if name == "account_id"));

    let err = assert_argument_error(
        api.orders()
            .change_state(&ChangeStateRequest {
                order_id: Some(5),
                ..Default::default()
            })
            .await,
    );
    assert!(matches!(err, ArgumentError::MissingRequired { ref name } if name == "action"));

    let err = assert_argument_error(
        api.secure()
            .send_notification(&SendNotificationRequest::default())
            .await,
    );
    assert!(matches!(err, ArgumentError::MissingRequired { .. }));

    assert_argument_error(api.wall().post(&WallPostRequest::default()).await);

    assert_eq!(transport.calls(), 0);
}

#[tokio::test]
async fn test_exclusive_pair_on_wall_get() {
    let body = response_body(json!({"count": 0, "items": []}));
    let transport = ScriptedTransport::always(body);
    let api = create_test_client(transport.clone(), 0);

    let both = WallGetRequest {
        owner_id: Some(1),
        domain: Some("durov".into()),
        ..Default::default()
    };
    let err = assert_argument_error(api.wall().get(&both).await);
    assert!(matches!(err, ArgumentError::ConflictingArguments { .. }));
    assert_eq!(transport.calls(), 0);

    // neither, or exactly one, is accepted
    tokio_test::assert_ok!(api.wall().get(&WallGetRequest::default()).await);
    tokio_test::assert_ok!(
        api.wall()
            .get(&WallGetRequest {
                domain: Some("durov".into()),
                ..Default::default()
            })
            .await
    );
    assert_eq!(transport.calls(), 2);
    assert_eq!(transport.last_request().unwrap().params.get("domain"), Some("durov"));
}

#[tokio::test]
async fn test_exclusive_pair_on_set_counter() {
    let transport = ScriptedTransport::always(response_body(json!(1)));
    let api = create_test_client(transport.clone(), 0);

    let both = SetCounterRequest {
        counters: vec!["1:5".into()],
        user_id: Some(1),
        ..Default::default()
    };
    let err = assert_argument_error(api.secure().set_counter(&both).await);
    assert!(matches!(err, ArgumentError::ConflictingArguments { .. }));
    assert_eq!(transport.calls(), 0);

    let batch = SetCounterRequest {
        counters: vec!["1:5".into(), "2:7".into()],
        ..Default::default()
    };
    assert!(api.secure().set_counter(&batch).await.unwrap());
    assert_eq!(
        transport.last_request().unwrap().params.get("counters"),
        Some("1:5,2:7")
    );
}

#[tokio::test]
async fn test_set_activity_needs_exactly_one_target() {
    let transport = ScriptedTransport::always(response_body(json!(1)));
    let api = create_test_client(transport.clone(), 0);

    let neither = SetActivityRequest {
        activity_type: Some(MessageActivityType::Typing),
        ..Default::default()
    };
    let err = assert_argument_error(api.messages().set_activity(&neither).await);
    assert!(matches!(err, ArgumentError::OneOfRequired { .. }));

    let both = SetActivityRequest {
        peer_id: Some(2_000_000_001),
        group_id: Some(1),
        ..neither.clone()
    };
    let err = assert_argument_error(api.messages().set_activity(&both).await);
    assert!(matches!(err, ArgumentError::ConflictingArguments { .. }));
    assert_eq!(transport.calls(), 0);

    assert!(api.messages().typing(2_000_000_001).await.unwrap());
    let request = transport.last_request().unwrap();
    assert_eq!(request.method, "messages.setActivity");
    assert_eq!(request.params.get("type"), Some("typing"));
}

#[tokio::test]
async fn test_list_parameters_round_trip_through_the_wire() {
    let transport = ScriptedTransport::new(vec![
        Step::Body(response_body(json!([
            {"id": 1, "name": "UGLYBOY", "avatar": null},
            {"id": 2, "name": "фывыфвв"},
            {"id": 3, "name": "Third"}
        ]))),
        Step::Body(response_body(json!("1,2,3"))),
    ]);
    let api = create_test_client(transport.clone(), 0);

    let musicians = api
        .ads()
        .get_musicians_by_ids(&GetMusiciansByIdsRequest { ids: vec![1, 2, 3] })
        .await
        .unwrap();
    assert_eq!(musicians.len(), 3);
    assert_eq!(musicians[1].name, "фывыфвв");
    assert_eq!(transport.requests()[0].params.get("ids"), Some("1,2,3"));

    let delivered = api
        .secure()
        .send_notification(&SendNotificationRequest {
            message: Some("Level up".into()),
            user_ids: vec![1, 2, 3],
        })
        .await
        .unwrap();
    assert_eq!(delivered, vec![1, 2, 3]);
    assert_eq!(transport.requests()[1].params.get("user_ids"), Some("1,2,3"));
}

#[tokio::test]
async fn test_unset_optional_parameters_are_omitted() {
    let transport = ScriptedTransport::always(response_body(json!({"post_id": 3})));
    let api = create_test_client(transport.clone(), 0);

    api.wall().post_message(-42, "text").await.unwrap();

    let params = transport.last_request().unwrap().params;
    let keys: Vec<&str> = params.keys().collect();
    assert_eq!(keys, ["owner_id", "message", "access_token", "v"]);
}
