mod support;

use std::{collections::BTreeMap, sync::Arc};

use futures::executor::block_on;
use serde::{Deserialize, Serialize};
use serde_json::json;
use support::RecordingSdk;
use wrapp_di::{DiBuilder, DiContainer};
use wrapp_firebase::{
    sdk::{
        FilterOp, MessagePayload, MessageTarget, Notification, QueryConstraint, SdkError,
        SetOptions, UserProperties,
    },
    AdminOptions, AdminService, AuthService, DatabaseService, FirestoreService, MessagingService,
    ServiceAccount, ServiceError, ADMIN_APP,
};

fn container(sdk: &RecordingSdk) -> DiContainer {
    let module = sdk
        .module()
        .register(AdminOptions::new(ServiceAccount::new("p", "e", "k")))
        .unwrap();
    block_on(DiBuilder::new().add_module(module).build()).unwrap()
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct User {
    name: String,
    age: u32,
}

#[test]
fn admin_service_exposes_the_registered_app() {
    let sdk = RecordingSdk::new();
    let container = container(&sdk);
    let admin = container.require_type::<AdminService>().unwrap();
    let app = container.require(ADMIN_APP).unwrap();

    assert_eq!(admin.app(), &*app);
    assert_eq!(admin.apps(), vec![(*app).clone()]);
    assert_eq!(admin.get_app(app.name()).unwrap(), *app);

    block_on(admin.delete_app(&app)).unwrap();
    assert!(*sdk.app.deleted.lock().unwrap());
    assert!(admin.apps().is_empty());
    assert!(matches!(
        admin.get_app(app.name()),
        Err(ServiceError::Sdk(SdkError::NoApp(_)))
    ));
}

#[test]
fn auth_service_manages_users() {
    let sdk = RecordingSdk::new();
    let auth = container(&sdk).require_type::<AuthService>().unwrap();

    let created = block_on(auth.create_user(UserProperties {
        email: Some("jane@example.com".into()),
        phone_number: Some("+15555550100".into()),
        ..Default::default()
    }))
    .unwrap();

    assert_eq!(block_on(auth.get_user(&created.uid)).unwrap(), created);
    assert_eq!(block_on(auth.get_user_by_email("jane@example.com")).unwrap(), created);
    assert_eq!(block_on(auth.get_user_by_phone_number("+15555550100")).unwrap(), created);

    let updated = block_on(auth.update_user(
        &created.uid,
        UserProperties {
            display_name: Some("Jane".into()),
            ..Default::default()
        },
    ))
    .unwrap();
    assert_eq!(updated.display_name.as_deref(), Some("Jane"));
    assert_eq!(updated.email.as_deref(), Some("jane@example.com"));

    block_on(auth.set_custom_user_claims(&created.uid, Some(json!({ "admin": true })))).unwrap();
    let claims = block_on(auth.get_user(&created.uid)).unwrap().custom_claims.unwrap();
    assert_eq!(claims.get("admin"), Some(&json!(true)));

    block_on(auth.delete_user(&created.uid)).unwrap();
    let err = block_on(auth.get_user(&created.uid)).unwrap_err();
    assert_eq!(
        err.to_string(),
        "auth/user-not-found: There is no user record corresponding to the provided identifier."
    );
}

#[test]
fn auth_service_forwards_tokens_and_paging() {
    let sdk = RecordingSdk::new();
    let auth = container(&sdk).require_type::<AuthService>().unwrap();

    assert_eq!(
        block_on(auth.create_custom_token("u1", Some(json!({ "tier": 2 })))).unwrap(),
        r#"token:u1:{"tier":2}"#
    );
    assert_eq!(block_on(auth.verify_id_token("id:u1")).unwrap().uid, "u1");
    assert!(block_on(auth.verify_id_token("garbage")).is_err());

    for _ in 0..3 {
        block_on(auth.create_user(UserProperties::default())).unwrap();
    }
    let first = block_on(auth.list_users(Some(2), None)).unwrap();
    assert_eq!(first.users.len(), 2);
    let rest = block_on(auth.list_users(Some(2), first.page_token)).unwrap();
    assert_eq!(rest.users.len(), 1);
    assert_eq!(rest.page_token, None);
}

#[test]
fn database_service_reads_and_writes_values() {
    let sdk = RecordingSdk::new();
    let database = container(&sdk).require_type::<DatabaseService>().unwrap();

    let john = User {
        name: "John".into(),
        age: 30,
    };
    block_on(database.set("users/123", &john)).unwrap();
    assert_eq!(block_on(database.get::<User>("users/123")).unwrap(), Some(john));

    block_on(database.update("users/123", &json!({ "age": 31 }))).unwrap();
    assert_eq!(
        block_on(database.get::<User>("users/123")).unwrap().map(|user| user.age),
        Some(31)
    );

    let err = block_on(database.update("users/123", &json!([1, 2]))).unwrap_err();
    assert!(matches!(err, ServiceError::InvalidArgument(_)));

    block_on(database.remove("users/123")).unwrap();
    assert_eq!(block_on(database.get::<User>("users/123")).unwrap(), None);
}

#[test]
fn database_push_returns_the_generated_key_or_empty() {
    let sdk = RecordingSdk::new();
    let database = container(&sdk).require_type::<DatabaseService>().unwrap();
    let jane = User {
        name: "Jane".into(),
        age: 28,
    };

    assert_eq!(block_on(database.push("users", &jane)).unwrap(), "");

    *sdk.app.database.push_key.lock().unwrap() = Some("-Nabc".to_string());
    assert_eq!(block_on(database.push("users", &jane)).unwrap(), "-Nabc");
    assert_eq!(block_on(database.get::<User>("users/-Nabc")).unwrap(), Some(jane));
}

#[test]
fn firestore_service_handles_documents() {
    let sdk = RecordingSdk::new();
    let firestore = container(&sdk).require_type::<FirestoreService>().unwrap();

    block_on(firestore.set("cats/tom", json!({ "name": "Tom", "age": 3 }), None)).unwrap();
    let merge = Some(SetOptions { merge: true });
    block_on(firestore.set("cats/tom", json!({ "color": "grey" }), merge)).unwrap();
    assert_eq!(
        block_on(firestore.get("cats/tom")).unwrap(),
        Some(json!({ "name": "Tom", "age": 3, "color": "grey" }))
    );

    block_on(firestore.update("cats/tom", json!({ "age": 4 }))).unwrap();
    assert_eq!(block_on(firestore.get("cats/tom")).unwrap().unwrap()["age"], 4);

    let path = block_on(firestore.add("cats", json!({ "name": "Felix" }))).unwrap();
    assert!(path.starts_with("cats/"));

    block_on(firestore.delete("cats/tom")).unwrap();
    assert_eq!(block_on(firestore.get("cats/tom")).unwrap(), None);
}

#[test]
fn firestore_update_requires_an_object() {
    let sdk = RecordingSdk::new();
    let firestore = container(&sdk).require_type::<FirestoreService>().unwrap();

    for data in [json!(null), json!("name"), json!([1])] {
        let err = block_on(firestore.update("cats/tom", data)).unwrap_err();
        assert_eq!(err.to_string(), "Update data must be a non-null object");
    }
}

#[test]
fn firestore_query_passes_constraints_in_order() {
    let sdk = RecordingSdk::new();
    let firestore = container(&sdk).require_type::<FirestoreService>().unwrap();
    block_on(firestore.set("cats/tom", json!({ "age": 3 }), None)).unwrap();
    block_on(firestore.set("dogs/rex", json!({ "age": 5 }), None)).unwrap();

    let constraints = vec![
        QueryConstraint::Where {
            field: "age".into(),
            op: FilterOp::Greater,
            value: json!(1),
        },
        QueryConstraint::OrderBy {
            field: "age".into(),
            descending: true,
        },
        QueryConstraint::Limit(10),
    ];
    let cats = block_on(firestore.query("cats", constraints.clone())).unwrap();

    assert_eq!(cats, vec![json!({ "age": 3 })]);
    assert_eq!(
        *sdk.app.firestore.queries.lock().unwrap(),
        vec![("cats".to_string(), constraints)]
    );
}

#[test]
fn messaging_service_targets_devices_and_topics() {
    let sdk = RecordingSdk::new();
    let messaging = container(&sdk).require_type::<MessagingService>().unwrap();
    let payload = MessagePayload {
        notification: Some(Notification {
            title: Some("Hello".into()),
            ..Default::default()
        }),
        data: BTreeMap::from([("kind".to_string(), "greeting".to_string())]),
        ..Default::default()
    };

    let id = block_on(messaging.send_to_device("device-1", payload.clone())).unwrap();
    assert_eq!(id, "projects/p/messages/1");
    block_on(messaging.send_to_topic("news", payload.clone())).unwrap();

    let sent = sdk.app.messaging.sent.lock().unwrap().clone();
    assert_eq!(sent[0].target, MessageTarget::Token("device-1".into()));
    assert_eq!(sent[1].target, MessageTarget::Topic("news".into()));
    assert_eq!(sent[1].payload, payload);

    let batch = block_on(messaging.send_to_devices(vec!["a".into(), "".into()], payload)).unwrap();
    assert_eq!((batch.success_count, batch.failure_count), (1, 1));
    assert_eq!(batch.responses.len(), 2);
}

#[test]
fn messaging_service_manages_topic_subscriptions() {
    let sdk = RecordingSdk::new();
    let messaging = container(&sdk).require_type::<MessagingService>().unwrap();

    let response =
        block_on(messaging.subscribe_to_topic(vec!["a".into(), "b".into()], "news")).unwrap();
    assert_eq!(response.success_count, 2);

    block_on(messaging.unsubscribe_from_topic(vec!["a".into()], "news")).unwrap();
    assert_eq!(
        sdk.app.messaging.topics.lock().unwrap()["news"],
        vec!["b".to_string()]
    );
}

#[test]
fn services_share_the_registration_app() {
    let sdk = RecordingSdk::new();
    let container = container(&sdk);
    let app = container.require(ADMIN_APP).unwrap();
    let admin: Arc<AdminService> = container.require_type().unwrap();

    assert_eq!(admin.app(), &*app);
    assert_eq!(sdk.initialize_calls(), 1);
}
