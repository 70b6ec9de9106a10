use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use research_core::args::{FocusStyle, InterviewType, RevenueFocus};
use research_core::catalog::research_catalog;
use research_core::templates::research_registry;
use research_core::{
    CallRequest,
    DispatchError,
    Dispatcher,
    ErrorKind,
    HandlerError,
    HandlerFuture,
    OperationArgs,
    OperationDescriptor,
    OperationRegistry,
    ParameterKind,
    SharedHandler,
};
use serde_json::{Map, Value, json};

#[derive(Default)]
struct Spy {
    calls: AtomicUsize,
    seen: Mutex<Vec<OperationArgs>>,
}

impl Spy {
    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn last(&self) -> OperationArgs {
        self.seen
            .lock()
            .expect("spy lock poisoned")
            .last()
            .cloned()
            .expect("handler should have been invoked")
    }
}

fn spy_dispatcher() -> (Arc<Spy>, Dispatcher) {
    let spy = Arc::new(Spy::default());
    let recorder = spy.clone();
    let handler: SharedHandler = Arc::new(move |args: OperationArgs| -> HandlerFuture {
        recorder.calls.fetch_add(1, Ordering::SeqCst);
        recorder
            .seen
            .lock()
            .expect("spy lock poisoned")
            .push(args.clone());
        Box::pin(async move {
            Ok::<_, HandlerError>(format!("handled {} for {}", args.kind(), args.subject()))
        })
    });
    let registry = OperationRegistry::from_catalog(research_catalog(), handler)
        .expect("catalog should build");
    (spy, Dispatcher::new(Arc::new(registry)))
}

fn template_dispatcher() -> Dispatcher {
    Dispatcher::new(Arc::new(research_registry().expect("catalog should build")))
}

fn failing_dispatcher(handler: SharedHandler) -> Dispatcher {
    let registry = OperationRegistry::from_catalog(research_catalog(), handler)
        .expect("catalog should build");
    Dispatcher::new(Arc::new(registry))
}

fn sample_value(name: &str, kind: &ParameterKind) -> Value {
    match kind {
        ParameterKind::String if name == "company" => json!("Acme"),
        ParameterKind::String => json!("CTO"),
        ParameterKind::Number => json!(25),
        ParameterKind::Boolean => json!(true),
        ParameterKind::StringArray => json!(["scaling"]),
        ParameterKind::Enum(allowed) => json!(allowed[0]),
    }
}

fn required_arguments(descriptor: &OperationDescriptor) -> Map<String, Value> {
    descriptor
        .parameters()
        .iter()
        .filter(|parameter| parameter.is_required())
        .map(|parameter| {
            (
                parameter.name().to_string(),
                sample_value(parameter.name(), parameter.kind()),
            )
        })
        .collect()
}

#[tokio::test]
async fn required_fields_alone_always_pass_validation() {
    let (spy, dispatcher) = spy_dispatcher();

    for descriptor in research_catalog() {
        let found = dispatcher
            .registry()
            .find_operation(descriptor.name())
            .expect("catalog operation should be registered");
        assert_eq!(found.name(), descriptor.name());

        let arguments = Value::Object(required_arguments(&descriptor));
        let result = dispatcher
            .dispatch(CallRequest::new(descriptor.name(), arguments))
            .await;
        assert!(!result.is_error, "{} failed: {}", descriptor.name(), result.payload);
        assert_eq!(spy.last().kind(), descriptor.kind());
    }
    assert_eq!(spy.calls(), research_catalog().len());
}

#[tokio::test]
async fn unknown_operation_never_reaches_a_handler() {
    let (spy, dispatcher) = spy_dispatcher();

    for name in ["research_companies", "RESEARCH_COMPANY", ""] {
        let result = dispatcher
            .dispatch(CallRequest::new(name, json!({ "company": "Acme" })))
            .await;
        assert!(result.is_error);
        assert_eq!(result.error_kind, Some(ErrorKind::UnknownOperation));
        assert_eq!(result.payload, format!("Unknown tool: {name}"));
    }
    assert_eq!(spy.calls(), 0);
}

#[tokio::test]
async fn each_omitted_required_field_is_reported() {
    let (spy, dispatcher) = spy_dispatcher();

    for descriptor in research_catalog() {
        let complete = required_arguments(&descriptor);
        for field in complete.keys() {
            let mut arguments = complete.clone();
            arguments.remove(field);
            let err = dispatcher
                .try_dispatch(CallRequest::new(descriptor.name(), Value::Object(arguments)))
                .await
                .expect_err("omitting a required field should fail");
            assert_eq!(
                err,
                DispatchError::MissingRequiredArgument {
                    field: field.clone()
                },
                "operation {}",
                descriptor.name()
            );
        }
    }
    assert_eq!(spy.calls(), 0);
}

#[tokio::test]
async fn interview_preparation_requires_role() {
    let (spy, dispatcher) = spy_dispatcher();

    let result = dispatcher
        .dispatch(CallRequest::new(
            "interview_preparation",
            json!({ "company": "Acme" }),
        ))
        .await;

    assert!(result.is_error);
    assert_eq!(result.error_kind, Some(ErrorKind::InvalidParams));
    assert!(result.payload.contains("role"), "{}", result.payload);
    assert_eq!(spy.calls(), 0);
}

/// Field value as the handler received it, keyed by its wire name.
fn received(args: &OperationArgs, field: &str) -> Option<Value> {
    let value = match (args, field) {
        (OperationArgs::ResearchCompany(args), "role") => json!(args.role),
        (OperationArgs::ResearchCompany(args), "focus_areas") => json!(args.focus_areas),
        (OperationArgs::AnalyzeRevenueEngine(args), "focus") => json!(args.focus.as_str()),
        (OperationArgs::LinkedinIntelligence(args), "research_depth") => {
            json!(args.research_depth.as_str())
        }
        (OperationArgs::InterviewPreparation(args), "interview_type") => {
            json!(args.interview_type.as_str())
        }
        (OperationArgs::InterviewPreparation(args), "focus_areas") => json!(args.focus_areas),
        (OperationArgs::ExecutiveBrief(args), "application_stage") => {
            json!(args.application_stage.as_str())
        }
        (OperationArgs::ExecutiveBrief(args), "include_sections") => json!(args.include_sections),
        (OperationArgs::TransitionPlan(args), "focus_style") => json!(args.focus_style.as_str()),
        _ => return None,
    };
    Some(value)
}

#[tokio::test]
async fn every_declared_default_reaches_the_handler() {
    let (spy, dispatcher) = spy_dispatcher();
    let mut checked = 0;

    for descriptor in research_catalog() {
        let arguments: Map<String, Value> = descriptor
            .parameters()
            .iter()
            .filter(|parameter| parameter.is_required())
            .map(|parameter| (parameter.name().to_string(), json!("Acme")))
            .collect();
        let result = dispatcher
            .dispatch(CallRequest::new(descriptor.name(), Value::Object(arguments)))
            .await;
        assert!(!result.is_error, "{}: {}", descriptor.name(), result.payload);

        let args = spy.last();
        assert_eq!(args.kind(), descriptor.kind());
        for parameter in descriptor.parameters() {
            let Some(default) = parameter.default_value() else {
                continue;
            };
            assert_eq!(
                received(&args, parameter.name()).as_ref(),
                Some(default),
                "{}.{}",
                descriptor.name(),
                parameter.name()
            );
            checked += 1;
        }
    }

    assert_eq!(spy.calls(), 6);
    assert_eq!(checked, 9);
}

#[tokio::test]
async fn omitted_optional_fields_take_declared_defaults() {
    let (spy, dispatcher) = spy_dispatcher();

    let result = dispatcher
        .dispatch(CallRequest::new("research_company", json!({ "company": "Acme" })))
        .await;
    assert!(!result.is_error, "{}", result.payload);
    let OperationArgs::ResearchCompany(args) = spy.last() else {
        panic!("expected research_company arguments");
    };
    assert_eq!(args.role, "VP Engineering");
    assert_eq!(args.focus_areas, ["leadership", "technology", "culture", "growth"]);

    dispatcher
        .dispatch(CallRequest::new(
            "interview_preparation",
            json!({ "company": "Acme", "role": "CTO" }),
        ))
        .await;
    let OperationArgs::InterviewPreparation(args) = spy.last() else {
        panic!("expected interview_preparation arguments");
    };
    assert_eq!(args.interview_type, InterviewType::Comprehensive);

    dispatcher
        .dispatch(CallRequest::new(
            "create_30_60_90_plan",
            json!({ "company": "Acme", "role": "CTO" }),
        ))
        .await;
    let OperationArgs::TransitionPlan(args) = spy.last() else {
        panic!("expected create_30_60_90_plan arguments");
    };
    assert_eq!(args.focus_style, FocusStyle::Growth);
    assert_eq!(args.team_size, None);
    assert_eq!(args.key_challenges, None);
}

#[tokio::test]
async fn enum_fields_accept_only_declared_values() {
    let (spy, dispatcher) = spy_dispatcher();

    let rejected = dispatcher
        .try_dispatch(CallRequest::new(
            "analyze_revenue_engine",
            json!({ "company": "Acme", "focus": "invalid_value" }),
        ))
        .await
        .expect_err("unknown focus should fail");
    assert!(matches!(
        rejected,
        DispatchError::InvalidArgument { ref field, ref expected }
            if field == "focus" && expected.contains("growth_levers")
    ));
    assert_eq!(spy.calls(), 0);

    let accepted = dispatcher
        .dispatch(CallRequest::new(
            "analyze_revenue_engine",
            json!({ "company": "Acme", "focus": "growth_levers" }),
        ))
        .await;
    assert!(!accepted.is_error, "{}", accepted.payload);
    let OperationArgs::AnalyzeRevenueEngine(args) = spy.last() else {
        panic!("expected analyze_revenue_engine arguments");
    };
    assert_eq!(args.focus, RevenueFocus::GrowthLevers);
}

#[tokio::test]
async fn type_mismatch_names_the_field() {
    let (_spy, dispatcher) = spy_dispatcher();

    let result = dispatcher
        .dispatch(CallRequest::new(
            "create_30_60_90_plan",
            json!({ "company": "Acme", "role": "CTO", "team_size": "large" }),
        ))
        .await;

    assert!(result.is_error);
    assert_eq!(result.payload, "Invalid argument 'team_size': expected number");
}

#[tokio::test]
async fn non_object_arguments_are_rejected_and_null_reads_as_empty() {
    let (spy, dispatcher) = spy_dispatcher();

    let err = dispatcher
        .try_dispatch(CallRequest::new("research_company", json!(["Acme"])))
        .await
        .expect_err("array arguments should fail");
    assert_eq!(
        err,
        DispatchError::InvalidArgument {
            field: "arguments".to_string(),
            expected: "object".to_string(),
        }
    );

    let err = dispatcher
        .try_dispatch(CallRequest::new("research_company", Value::Null))
        .await
        .expect_err("company is still required");
    assert_eq!(
        err,
        DispatchError::MissingRequiredArgument {
            field: "company".to_string()
        }
    );
    assert_eq!(spy.calls(), 0);
}

#[tokio::test]
async fn undeclared_arguments_are_ignored() {
    let (_spy, dispatcher) = spy_dispatcher();

    let result = dispatcher
        .dispatch(CallRequest::new(
            "research_company",
            json!({ "company": "Acme", "client_version": 3 }),
        ))
        .await;

    assert!(!result.is_error, "{}", result.payload);
}

#[tokio::test]
async fn handler_errors_are_wrapped_with_context() {
    let dispatcher = failing_dispatcher(Arc::new(|_args: OperationArgs| -> HandlerFuture {
        Box::pin(async { Err::<String, _>(HandlerError::new("data source unavailable")) })
    }));

    let result = dispatcher
        .dispatch(CallRequest::new(
            "linkedin_intelligence",
            json!({ "company": "Acme" }),
        ))
        .await;

    assert!(result.is_error);
    assert_eq!(result.error_kind, Some(ErrorKind::HandlerExecution));
    assert_eq!(
        result.payload,
        "Error executing linkedin_intelligence for Acme: data source unavailable"
    );
}

#[tokio::test]
async fn handler_panics_are_contained() {
    async fn explode() -> Result<String, HandlerError> {
        panic!("template index out of range")
    }
    let dispatcher = failing_dispatcher(Arc::new(|_args: OperationArgs| -> HandlerFuture {
        Box::pin(explode())
    }));

    let err = dispatcher
        .try_dispatch(CallRequest::new("research_company", json!({ "company": "Acme" })))
        .await
        .expect_err("panicking handler should fail");

    assert_eq!(
        err,
        DispatchError::HandlerExecution {
            operation: "research_company".to_string(),
            subject: Some("Acme".to_string()),
            message: "handler panicked: template index out of range".to_string(),
        }
    );
}

#[tokio::test]
async fn identical_requests_produce_identical_independent_results() {
    let dispatcher = template_dispatcher();
    let request = CallRequest::new(
        "executive_brief",
        json!({ "company": "Acme", "role": "CTO", "application_stage": "interview" }),
    );

    let first = dispatcher.dispatch(request.clone()).await;
    let second = dispatcher.dispatch(request).await;

    assert!(!first.is_error, "{}", first.payload);
    assert_eq!(first, second);
}

#[tokio::test]
async fn transition_plan_echoes_its_inputs() {
    let dispatcher = template_dispatcher();

    let result = dispatcher
        .dispatch(CallRequest::new(
            "create_30_60_90_plan",
            json!({
                "company": "Slack",
                "role": "CTO",
                "team_size": 120,
                "focus_style": "transformation",
            }),
        ))
        .await;

    assert!(!result.is_error, "{}", result.payload);
    assert!(result.payload.contains("Slack"));
    assert!(result.payload.contains("CTO"));
    assert!(result.payload.contains("transformation"));
}

#[tokio::test]
async fn executive_brief_without_role_names_role() {
    let dispatcher = template_dispatcher();

    let result = dispatcher
        .dispatch(CallRequest::new("executive_brief", json!({ "company": "Datadog" })))
        .await;

    assert!(result.is_error);
    assert_eq!(result.payload, "Missing required argument: role");
}

#[tokio::test]
async fn every_template_renders_with_required_fields() {
    let dispatcher = template_dispatcher();

    for descriptor in research_catalog() {
        let result = dispatcher
            .dispatch(CallRequest::new(
                descriptor.name(),
                Value::Object(required_arguments(&descriptor)),
            ))
            .await;
        assert!(!result.is_error, "{} failed: {}", descriptor.name(), result.payload);
        assert!(result.payload.contains("Acme"), "{}", descriptor.name());
    }
}

#[tokio::test]
async fn concurrent_dispatches_complete_independently() {
    let dispatcher = template_dispatcher();

    let requests = (0..16).map(|index| {
        let dispatcher = dispatcher.clone();
        async move {
            dispatcher
                .dispatch(CallRequest::new(
                    "research_company",
                    json!({ "company": format!("Company {index}") }),
                ))
                .await
        }
    });
    let results = futures::future::join_all(requests).await;

    for (index, result) in results.iter().enumerate() {
        assert!(!result.is_error, "{}", result.payload);
        assert!(result.payload.contains(&format!("# Company Research: Company {index}")));
    }
}

#[tokio::test]
async fn a_hanging_handler_only_stalls_its_own_call() {
    let handler: SharedHandler = Arc::new(|args: OperationArgs| -> HandlerFuture {
        Box::pin(async move {
            if args.subject() == "Stuck" {
                futures::future::pending::<()>().await;
            }
            Ok::<_, HandlerError>(args.subject().to_string())
        })
    });
    let dispatcher = failing_dispatcher(handler);

    let stuck = tokio::spawn({
        let dispatcher = dispatcher.clone();
        async move {
            dispatcher
                .dispatch(CallRequest::new("research_company", json!({ "company": "Stuck" })))
                .await
        }
    });
    tokio::task::yield_now().await;

    let result = dispatcher
        .dispatch(CallRequest::new("research_company", json!({ "company": "Moving" })))
        .await;

    assert_eq!(result.payload, "Moving");
    assert!(!stuck.is_finished());
    stuck.abort();
}
