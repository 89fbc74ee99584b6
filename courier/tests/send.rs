use courier::{
    BehaviorError, BoxError, CancellationToken, Mediator, Next, PipelineBehavior, Registry,
    Request, SendError, Sender,
    behaviors::{
        CachingBehavior, CancellationBehavior, LoggingBehavior, TracingBehavior,
        ValidationBehavior,
    },
    handler_fn,
    testing::{CallLog, RecordingBehavior, ShortCircuitBehavior},
};
use std::time::Duration;

mod common;
use common::{
    AppError, CreateUser, CreateUserHandler, Echo, EchoHandler, Reject, RejectHandler, Slow,
    SlowHandler,
};

/// Fails without calling the rest of the chain.
struct Deny;

impl<R: Request> PipelineBehavior<R> for Deny {
    async fn handle(
        &self,
        _request: &R,
        _cancel: &CancellationToken,
        _next: Next<'_, R>,
    ) -> Result<R::Response, BoxError> {
        Err(AppError::Rejected("denied by behavior".into()).into())
    }
}

#[tokio::test]
async fn send_returns_handler_response() {
    let registry = Registry::builder()
        .handler::<Echo>(EchoHandler::default())
        .build()
        .unwrap();
    let mediator = Mediator::new(registry);

    let response = mediator.send(Echo("hello".into())).await.unwrap();
    assert_eq!(response, "hello");
}

#[tokio::test]
async fn send_without_handler_reports_request_type() {
    let registry = Registry::builder()
        .handler::<Echo>(EchoHandler::default())
        .build()
        .unwrap();
    let mediator = Mediator::new(registry);

    let err = mediator.send(Reject("x".into())).await.unwrap_err();

    assert!(err.is_handler_not_found());
    assert!(matches!(err, SendError::HandlerNotFound { request, .. } if request.ends_with("Reject")));
}

#[tokio::test]
async fn behaviors_wrap_handler_in_registration_order() {
    let log = CallLog::new();
    let handler = EchoHandler {
        log: log.clone(),
        ..Default::default()
    };
    let registry = Registry::builder()
        .behavior::<Echo>(RecordingBehavior::new("b1", log.clone()))
        .behavior::<Echo>(RecordingBehavior::new("b2", log.clone()))
        .behavior::<Echo>(RecordingBehavior::new("b3", log.clone()))
        .handler::<Echo>(handler)
        .build()
        .unwrap();
    let mediator = Mediator::new(registry);

    mediator.send(Echo("x".into())).await.unwrap();

    assert_eq!(
        log.entries(),
        [
            "b1:before",
            "b2:before",
            "b3:before",
            "handler",
            "b3:after",
            "b2:after",
            "b1:after",
        ]
    );
}

#[tokio::test]
async fn short_circuit_skips_inner_behaviors_and_handler() {
    let log = CallLog::new();
    let handler = EchoHandler {
        log: log.clone(),
        ..Default::default()
    };
    let short = ShortCircuitBehavior::new("cached".to_string());
    let registry = Registry::builder()
        .behavior::<Echo>(RecordingBehavior::new("outer", log.clone()))
        .behavior::<Echo>(short.clone())
        .behavior::<Echo>(RecordingBehavior::new("inner", log.clone()))
        .handler::<Echo>(handler.clone())
        .build()
        .unwrap();
    let mediator = Mediator::new(registry);

    let response = mediator.send(Echo("x".into())).await.unwrap();

    assert_eq!(response, "cached");
    assert_eq!(short.calls(), 1);
    assert_eq!(handler.calls(), 0);
    assert_eq!(log.entries(), ["outer:before", "outer:after"]);
}

#[tokio::test]
async fn behavior_failure_propagates_and_skips_handler() {
    let handler = EchoHandler::default();
    let registry = Registry::builder()
        .behavior::<Echo>(Deny)
        .handler::<Echo>(handler.clone())
        .build()
        .unwrap();
    let mediator = Mediator::new(registry);

    let err = mediator.send(Echo("x".into())).await.unwrap_err();

    assert!(!err.is_handler_not_found());
    assert_eq!(handler.calls(), 0);
}

#[tokio::test]
async fn handler_error_is_passed_through_unchanged() {
    let registry = Registry::builder()
        .behavior::<Reject>(LoggingBehavior::new())
        .behavior::<Reject>(TracingBehavior::new())
        .handler::<Reject>(RejectHandler)
        .build()
        .unwrap();
    let mediator = Mediator::new(registry);

    let err = mediator.send(Reject("bad input".into())).await.unwrap_err();
    assert_eq!(err.to_string(), "rejected: bad input");

    let source = err.into_handler_error().unwrap();
    let app = source.downcast::<AppError>().unwrap();
    assert_eq!(*app, AppError::Rejected("bad input".into()));
}

#[tokio::test]
async fn token_reaches_handler_unchanged() {
    let registry = Registry::builder()
        .handler::<Slow>(SlowHandler)
        .build()
        .unwrap();
    let mediator = Mediator::new(registry);
    let cancel = CancellationToken::new();
    cancel.cancel();

    let err = mediator
        .send_with(Slow(Duration::from_secs(30)), &cancel)
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "stopped early");
}

#[tokio::test]
async fn cancellation_behavior_stops_in_flight_request() {
    let registry = Registry::builder()
        .behavior::<Slow>(CancellationBehavior)
        .handler::<Slow>(SlowHandler)
        .build()
        .unwrap();
    let mediator = Mediator::new(registry);
    let cancel = CancellationToken::new();

    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(20)).await;
        trigger.cancel();
    });

    let err = mediator
        .send_with(Slow(Duration::from_secs(30)), &cancel)
        .await
        .unwrap_err();

    let source = err.into_handler_error().unwrap();
    assert!(matches!(
        source.downcast_ref::<BehaviorError>(),
        Some(BehaviorError::Cancelled)
    ));
}

#[tokio::test]
async fn validation_rejects_before_handler() {
    let handler = CreateUserHandler::default();
    let registry = Registry::builder()
        .behavior::<CreateUser>(ValidationBehavior)
        .handler::<CreateUser>(handler.clone())
        .build()
        .unwrap();
    let mediator = Mediator::new(registry);

    let err = mediator
        .send(CreateUser {
            name: String::new(),
            age: 12,
        })
        .await
        .unwrap_err();

    let message = err.to_string();
    assert!(message.contains("name must not be empty"));
    assert!(message.contains("age must be at least 18"));
    assert_eq!(handler.calls.load(std::sync::atomic::Ordering::SeqCst), 0);

    let id = mediator
        .send(CreateUser {
            name: "ada".into(),
            age: 36,
        })
        .await
        .unwrap();
    assert_eq!(id, 1);
}

#[tokio::test]
async fn caching_behavior_answers_repeated_requests() {
    let handler = EchoHandler::default();
    let registry = Registry::builder()
        .behavior::<Echo>(CachingBehavior::<Echo>::new())
        .handler::<Echo>(handler.clone())
        .build()
        .unwrap();
    let mediator = Mediator::new(registry);

    for _ in 0..3 {
        assert_eq!(mediator.send(Echo("a".into())).await.unwrap(), "a");
    }
    assert_eq!(mediator.send(Echo("b".into())).await.unwrap(), "b");

    assert_eq!(handler.calls(), 2);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_sends_do_not_interfere() {
    let registry = Registry::builder()
        .behavior::<Echo>(LoggingBehavior::new())
        .handler::<Echo>(EchoHandler::default())
        .build()
        .unwrap();
    let mediator = Mediator::new(registry);

    let tasks: Vec<_> = (0..64)
        .map(|i| {
            let mediator = mediator.clone();
            tokio::spawn(async move { (i, mediator.send(Echo(format!("msg-{i}"))).await) })
        })
        .collect();

    for task in tasks {
        let (i, response) = task.await.unwrap();
        assert_eq!(response.unwrap(), format!("msg-{i}"));
    }
}

#[tokio::test]
async fn closure_handler_through_sender_trait() {
    async fn shout<S: Sender>(sender: &S, text: &str) -> Result<String, SendError> {
        sender.send(Echo(text.into())).await
    }

    let registry = Registry::builder()
        .handler::<Echo>(handler_fn(|req: Echo, _cancel| async move {
            Ok(req.0.to_uppercase())
        }))
        .build()
        .unwrap();
    let mediator = Mediator::new(registry);

    assert_eq!(shout(&mediator, "hey").await.unwrap(), "HEY");
}
