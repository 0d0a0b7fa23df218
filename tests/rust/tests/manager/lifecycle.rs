//! Lifecycle coordinator tests: bulk registration and graceful shutdown.

use mcphub_core::{OutcomeStatus, ServerDescriptor};
use pretty_assertions::assert_eq;
use tests::{descriptor, ManagerTestHarness};

#[tokio::test]
async fn register_all_preserves_order_and_isolates_failures() {
    let harness = ManagerTestHarness::new();
    harness.factory.serve_tools("alpha", &[]);
    harness.factory.serve_tools("gamma", &[]);

    let descriptors = vec![
        descriptor("alpha"),
        // Malformed: a script path with no known interpreter
        ServerDescriptor::script("beta.rb"),
        descriptor("gamma"),
    ];

    let outcomes = harness.manager.register_all(&descriptors).await;

    assert_eq!(outcomes.len(), 3);
    assert_eq!(outcomes[0].status, OutcomeStatus::Success);
    assert_eq!(outcomes[1].status, OutcomeStatus::Error);
    assert_eq!(outcomes[2].status, OutcomeStatus::Success);
    assert!(outcomes[1].message.contains("Failed to register beta.rb"));

    // The failure did not abort the batch
    let report = harness.manager.status();
    assert_eq!(report.total_servers, 2);
    assert!(report.servers["gamma"].is_connected);
}

#[tokio::test]
async fn register_all_reports_duplicates_without_side_effects() {
    let harness = ManagerTestHarness::with_server("fs", &[]);

    let outcomes = harness
        .manager
        .register_all(&[descriptor("fs"), descriptor("fs")])
        .await;

    assert_eq!(outcomes.len(), 2);
    assert!(outcomes[0].is_success());
    assert_eq!(outcomes[1].status, OutcomeStatus::Error);
    assert!(outcomes[1].message.contains("Server fs is already registered"));
    assert_eq!(harness.manager.status().total_servers, 1);
}

#[tokio::test]
async fn shutdown_closes_every_handle_exactly_once() {
    let harness = ManagerTestHarness::new();
    for id in ["alpha", "beta", "gamma"] {
        harness.factory.serve_tools(id, &[]);
        harness.manager.register_server(&descriptor(id)).await.unwrap();
    }

    let outcomes = harness.manager.shutdown_all().await;

    assert_eq!(outcomes.len(), 3);
    assert!(outcomes.iter().all(|o| o.is_success()));
    assert_eq!(harness.manager.status().total_servers, 0);
    for id in ["alpha", "beta", "gamma"] {
        assert_eq!(harness.handle(id).closes(), 1);
    }
}

#[tokio::test]
async fn shutdown_survives_a_failing_close() {
    let harness = ManagerTestHarness::new();
    for id in ["alpha", "beta", "gamma"] {
        harness.factory.serve_tools(id, &[]);
        harness.manager.register_server(&descriptor(id)).await.unwrap();
    }
    harness.handle("beta").fail_close();

    let outcomes = harness.manager.shutdown_all().await;

    assert_eq!(outcomes.len(), 3);
    let failed: Vec<&str> = outcomes
        .iter()
        .filter(|o| !o.is_success())
        .filter_map(|o| o.server_id.as_deref())
        .collect();
    assert_eq!(failed, vec!["beta"]);

    // Every close was attempted exactly once and the registry is empty
    for id in ["alpha", "beta", "gamma"] {
        assert_eq!(harness.handle(id).closes(), 1);
    }
    assert_eq!(harness.manager.status().total_servers, 0);
}

#[tokio::test]
async fn shutdown_is_safe_to_run_twice() {
    let harness = ManagerTestHarness::with_server("fs", &[]);
    harness.manager.register_server(&descriptor("fs")).await.unwrap();

    let first = harness.manager.shutdown_all().await;
    assert_eq!(first.len(), 1);

    let second = harness.manager.shutdown_all().await;
    assert!(second.is_empty());
    assert_eq!(harness.handle("fs").closes(), 1);
}
