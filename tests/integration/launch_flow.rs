use crate::common::*;
use cast_launcher::auth::verify_proof;
use cast_launcher::errors::WorkflowError;
use cast_launcher::types::AuthorizationProof;
use cast_launcher::workflow::{
    FailureKind, FrameOutcome, LaunchOutcome, LaunchRejection, LaunchStage,
};
use std::sync::Arc;

fn directive_cast(addresses: Vec<alloy::primitives::Address>) -> cast_launcher::types::Cast {
    make_cast(
        "@launcher launch $ABC",
        "owl",
        addresses,
        vec!["https://img.test/cast.png"],
    )
}

#[tokio::test]
async fn test_launched_token_short_circuits_social_lookup() {
    let registry = Arc::new(MockRegistry::launched("FOO"));
    let casts = Arc::new(MockCastSource::new(vec![CastReply::Unavailable]));
    let workflow = make_workflow(registry, casts.clone(), false);

    let outcome = workflow.render_frame(Some("0xabc".into())).await;
    match &outcome {
        FrameOutcome::TokenExists(token) => {
            assert_eq!(token.symbol, "FOO");
            assert_eq!(token.image_url, "https://img.test/foo.png");
            assert_eq!(token.token_address, TOKEN);
            assert_eq!(token.links.len(), 3);
        }
        other => panic!("expected TOKEN_EXISTS, got {:?}", other),
    }
    assert_eq!(casts.calls(), 0);
}

#[tokio::test]
async fn test_unlaunched_cast_is_pending() {
    let registry = Arc::new(MockRegistry::empty());
    let casts = Arc::new(MockCastSource::found(directive_cast(vec![ADDR_A, ADDR_B])));
    let workflow = make_workflow(registry, casts, false);

    let outcome = workflow.render_frame(Some("0xabc".into())).await;
    assert_eq!(outcome.stage(), LaunchStage::LaunchPending);
    let FrameOutcome::LaunchPending(pending) = outcome else {
        panic!("expected LAUNCH_PENDING");
    };
    assert_eq!(pending.ticker.as_deref(), Some("ABC"));
    assert_eq!(pending.image_url, "https://img.test/cast.png");
    assert_eq!(pending.author_username, "owl");
    assert_eq!(pending.verified_addresses, vec![ADDR_A, ADDR_B]);
    assert_eq!(pending.actions.len(), 2);
}

#[tokio::test]
async fn test_default_cast_used_without_identifier() {
    let registry = Arc::new(MockRegistry::empty());
    let casts = Arc::new(MockCastSource::found(make_cast("gm", "owl", vec![ADDR_A], vec![])));
    let workflow = make_workflow(registry, casts, false);

    let FrameOutcome::LaunchPending(pending) = workflow.render_frame(None).await else {
        panic!("expected LAUNCH_PENDING");
    };
    assert_eq!(pending.cast_identifier.as_str(), DEFAULT_CAST);
    assert_eq!(pending.ticker, None);
    assert_eq!(pending.image_url, PLACEHOLDER);
}

#[tokio::test]
async fn test_lookup_failures() {
    let workflow = make_workflow(
        Arc::new(MockRegistry::empty()),
        Arc::new(MockCastSource::new(vec![CastReply::NotFound])),
        false,
    );
    let FrameOutcome::CastLookupFailed(failure) = workflow.render_frame(Some("0xdead".into())).await
    else {
        panic!("expected CAST_LOOKUP_FAILED");
    };
    assert_eq!(failure.kind, FailureKind::NotFound);

    let workflow = make_workflow(
        Arc::new(MockRegistry::empty()),
        Arc::new(MockCastSource::new(vec![CastReply::Unavailable])),
        false,
    );
    let FrameOutcome::CastLookupFailed(failure) = workflow.render_frame(Some("0xdead".into())).await
    else {
        panic!("expected CAST_LOOKUP_FAILED");
    };
    assert_eq!(failure.kind, FailureKind::Unavailable);

    let workflow = make_workflow(
        Arc::new(MockRegistry::unavailable()),
        Arc::new(MockCastSource::found(directive_cast(vec![ADDR_A]))),
        false,
    );
    let outcome = workflow.render_frame(Some("0xdead".into())).await;
    assert_eq!(outcome.stage(), LaunchStage::CastLookupFailed);
}

#[tokio::test]
async fn test_launch_signs_freshly_fetched_addresses() {
    // The frame saw [A]; by the time the button is pressed the author verified B too
    let casts = Arc::new(MockCastSource::new(vec![
        CastReply::Found(directive_cast(vec![ADDR_A])),
        CastReply::Found(directive_cast(vec![ADDR_A, ADDR_B])),
    ]));
    let workflow = make_workflow(Arc::new(MockRegistry::empty()), casts.clone(), false);

    let first = workflow.render_frame(Some("0x123".into())).await;
    let FrameOutcome::LaunchPending(pending) = first else {
        panic!("expected LAUNCH_PENDING");
    };
    assert_eq!(pending.verified_addresses, vec![ADDR_A]);

    let outcome = workflow.build_launch("0x123".into()).await.unwrap();
    let LaunchOutcome::TransactionReady(tx) = outcome else {
        panic!("expected TRANSACTION_READY");
    };
    assert_eq!(casts.calls(), 2);
    assert_eq!(tx.args.author_addresses, vec![ADDR_A, ADDR_B]);
}

#[tokio::test]
async fn test_transaction_args_and_proof() {
    let registry = Arc::new(MockRegistry::empty());
    let casts = Arc::new(MockCastSource::found(directive_cast(vec![ADDR_A, ADDR_B])));
    let workflow = make_workflow(registry.clone(), casts, false);

    let outcome = workflow.build_launch("0x123".into()).await.unwrap();
    assert_eq!(outcome.stage(), LaunchStage::TransactionReady);
    let LaunchOutcome::TransactionReady(tx) = outcome else {
        unreachable!();
    };

    assert_eq!(tx.chain_id, "eip155:8453");
    assert_eq!(tx.registry, REGISTRY);
    assert_eq!(tx.value, registry.launch_cost);
    assert_eq!(tx.args.ticker, "ABC");
    assert_eq!(tx.args.name, "ABC");
    assert_eq!(tx.args.image_url, "https://img.test/cast.png");
    assert_eq!(tx.args.cast_identifier.as_str(), "0x123");
    assert_eq!(tx.args.author_addresses, vec![ADDR_A, ADDR_B]);

    let proof = AuthorizationProof {
        message_hash: tx.message_hash,
        signature: tx.args.signature.clone(),
    };
    assert!(verify_proof(&proof, &[ADDR_A, ADDR_B], TEST_SIGNER));
}

#[tokio::test]
async fn test_repeated_renders_are_stable_until_launch_lands() {
    let registry = Arc::new(MockRegistry::empty());
    let casts = Arc::new(MockCastSource::found(directive_cast(vec![ADDR_A])));
    let workflow = make_workflow(registry.clone(), casts, false);

    let first = workflow.render_frame(Some("0x123".into())).await;
    let second = workflow.render_frame(Some("0x123".into())).await;
    assert_eq!(first, second);

    let a = workflow.build_launch("0x123".into()).await.unwrap();
    let b = workflow.build_launch("0x123".into()).await.unwrap();
    match (a, b) {
        (LaunchOutcome::TransactionReady(a), LaunchOutcome::TransactionReady(b)) => {
            assert_eq!(a.args.author_addresses, b.args.author_addresses);
            assert_eq!(a.message_hash, b.message_hash);
        }
        other => panic!("expected two TRANSACTION_READY outcomes, got {:?}", other),
    }

    registry.set_launched("ABC");
    let after = workflow.render_frame(Some("0x123".into())).await;
    assert_eq!(after.stage(), LaunchStage::TokenExists);
}

#[tokio::test]
async fn test_second_launch_is_refused() {
    let workflow = make_workflow(
        Arc::new(MockRegistry::launched("ABC")),
        Arc::new(MockCastSource::found(directive_cast(vec![ADDR_A]))),
        false,
    );
    let outcome = workflow.build_launch("0x123".into()).await.unwrap();
    assert_eq!(
        outcome,
        LaunchOutcome::AuthorizationFailed(LaunchRejection::AlreadyLaunched {
            token_address: TOKEN
        })
    );
}

#[tokio::test]
async fn test_author_without_addresses_is_refused() {
    let workflow = make_workflow(
        Arc::new(MockRegistry::empty()),
        Arc::new(MockCastSource::found(directive_cast(vec![]))),
        false,
    );
    let outcome = workflow.build_launch("0x123".into()).await.unwrap();
    assert_eq!(outcome.stage(), LaunchStage::AuthorizationFailed);
    assert_eq!(
        outcome,
        LaunchOutcome::AuthorizationFailed(LaunchRejection::NoVerifiedAddresses {
            author_username: "owl".to_string()
        })
    );
}

#[tokio::test]
async fn test_missing_ticker_policy() {
    let cast = make_cast("gm no directive", "owl", vec![ADDR_A], vec![]);

    let strict = make_workflow(
        Arc::new(MockRegistry::empty()),
        Arc::new(MockCastSource::found(cast.clone())),
        false,
    );
    assert_eq!(
        strict.build_launch("0x123".into()).await.unwrap(),
        LaunchOutcome::AuthorizationFailed(LaunchRejection::MissingTicker)
    );

    let lenient = make_workflow(
        Arc::new(MockRegistry::empty()),
        Arc::new(MockCastSource::found(cast)),
        true,
    );
    let LaunchOutcome::TransactionReady(tx) = lenient.build_launch("0x123".into()).await.unwrap()
    else {
        panic!("expected TRANSACTION_READY");
    };
    assert_eq!(tx.args.ticker, "");
    assert_eq!(tx.args.image_url, PLACEHOLDER);
}

#[tokio::test]
async fn test_launch_upstream_errors_abort() {
    let workflow = make_workflow(
        Arc::new(MockRegistry::empty()),
        Arc::new(MockCastSource::new(vec![CastReply::Unavailable])),
        false,
    );
    assert!(matches!(
        workflow.build_launch("0x123".into()).await,
        Err(WorkflowError::Social(_))
    ));

    let workflow = make_workflow(
        Arc::new(MockRegistry::unavailable()),
        Arc::new(MockCastSource::found(directive_cast(vec![ADDR_A]))),
        false,
    );
    assert!(matches!(
        workflow.build_launch("0x123".into()).await,
        Err(WorkflowError::Chain(_))
    ));
}
