use courier::{
    CourierError, DynBehavior, Mediator, Registry, RegistryError,
    behaviors::{LoggingBehavior, TracingBehavior},
    testing::RecordingNotificationHandler,
};
use std::sync::Arc;

mod common;
use common::{Echo, EchoHandler, OrderPlaced, Reject, RejectHandler};

#[test]
fn duplicate_handler_is_rejected_at_build() {
    let err = Registry::builder()
        .handler::<Echo>(EchoHandler::default())
        .handler::<Reject>(RejectHandler)
        .handler::<Echo>(EchoHandler::default())
        .build()
        .unwrap_err();

    assert!(matches!(err, RegistryError::DuplicateHandler { request } if request.ends_with("Echo")));
    assert!(err.to_string().contains("already registered"));

    let top: CourierError = err.into();
    assert!(matches!(top, CourierError::Registry(_)));
}

#[test]
fn registry_reports_what_was_registered() {
    let shared: Arc<dyn DynBehavior<Echo>> = Arc::new(LoggingBehavior::new());
    let registry = Registry::builder()
        .handler::<Echo>(EchoHandler::default())
        .behavior_shared::<Echo>(shared.clone())
        .behavior::<Echo>(TracingBehavior::new())
        .notification_handler::<OrderPlaced>(RecordingNotificationHandler::new())
        .build()
        .unwrap();

    assert!(registry.has_handler::<Echo>());
    assert!(!registry.has_handler::<Reject>());
    assert_eq!(registry.request_type_count(), 1);
    assert_eq!(registry.behavior_count::<Echo>(), 2);
    assert_eq!(registry.behavior_count::<Reject>(), 0);
    assert_eq!(registry.notification_handler_count::<OrderPlaced>(), 1);
    assert_eq!(Arc::strong_count(&shared), 2);
}

#[tokio::test]
async fn mediators_share_one_registry() {
    let registry = Arc::new(
        Registry::builder()
            .handler::<Echo>(EchoHandler::default())
            .build()
            .unwrap(),
    );
    let a = Mediator::from_shared(registry.clone());
    let b = Mediator::from_shared(registry);

    assert_eq!(a.send(Echo("a".into())).await.unwrap(), "a");
    assert_eq!(b.send(Echo("b".into())).await.unwrap(), "b");
    assert!(a.provider().has_handler::<Echo>());
}
