//! Tool router tests: resolution order, live tool lists, and transport
//! failure semantics.

use mcphub_core::HubError;
use pretty_assertions::assert_eq;
use serde_json::json;
use tests::{descriptor, ManagerTestHarness};

#[tokio::test]
async fn invoke_on_unregistered_server_touches_no_transport() {
    let harness = ManagerTestHarness::new();

    let err = harness
        .manager
        .invoke_tool("ghost", "read_file", None)
        .await
        .unwrap_err();

    assert!(matches!(err, HubError::ServerNotFound(_)));
    assert!(err.to_string().contains("register the server first"));
    assert_eq!(harness.factory.open_count(), 0);
}

#[tokio::test]
async fn invoke_unknown_tool_lists_available_tools() {
    let harness = ManagerTestHarness::with_server("fs", &["read_file", "list_dir"]);
    harness.manager.register_server(&descriptor("fs")).await.unwrap();

    let err = harness
        .manager
        .invoke_tool("fs", "write_file", None)
        .await
        .unwrap_err();

    match err {
        HubError::ToolNotFound { available, .. } => {
            assert_eq!(available, vec!["read_file".to_string(), "list_dir".to_string()]);
        }
        other => panic!("expected ToolNotFound, got {other}"),
    }
}

#[tokio::test]
async fn invoke_forwards_arguments_and_wraps_the_result() {
    let harness = ManagerTestHarness::with_server("fs", &["read_file"]);
    harness.manager.register_server(&descriptor("fs")).await.unwrap();

    let args = json!({ "path": "/tmp/demo.txt" });
    let reply = harness
        .manager
        .invoke_tool("fs", "read_file", Some(args.clone()))
        .await
        .unwrap();

    assert_eq!(reply.tool, "read_file");
    assert_eq!(reply.server, "fs");

    let calls = harness.handle("fs").recorded_calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, "read_file");
    assert_eq!(calls[0].1, Some(args));

    let envelope = serde_json::to_value(&reply).unwrap();
    assert_eq!(envelope["status"], "success");
    assert_eq!(envelope["server"], "fs");
}

#[tokio::test]
async fn tool_list_is_fetched_fresh_on_every_invocation() {
    let harness = ManagerTestHarness::with_server("fs", &["read_file"]);
    harness.manager.register_server(&descriptor("fs")).await.unwrap();

    let err = harness
        .manager
        .invoke_tool("fs", "write_file", None)
        .await
        .unwrap_err();
    assert!(matches!(err, HubError::ToolNotFound { .. }));

    // The server grows a tool; the next call sees it without reconnecting.
    harness.handle("fs").set_tools(&["read_file", "write_file"]);
    harness
        .manager
        .invoke_tool("fs", "write_file", None)
        .await
        .unwrap();
}

#[tokio::test]
async fn transport_failure_does_not_evict_the_session() {
    let harness = ManagerTestHarness::with_server("fs", &["read_file"]);
    harness.manager.register_server(&descriptor("fs")).await.unwrap();
    harness.handle("fs").fail_requests();

    let err = harness
        .manager
        .invoke_tool("fs", "read_file", None)
        .await
        .unwrap_err();
    assert!(matches!(err, HubError::Transport { .. }));

    // The dead session stays listed as connected until an explicit
    // disconnect removes it.
    let report = harness.manager.status();
    assert_eq!(report.total_servers, 1);
    assert!(report.servers["fs"].is_connected);
}

#[tokio::test]
async fn list_tools_returns_the_raw_list() {
    let harness = ManagerTestHarness::with_server("fs", &["read_file", "list_dir"]);
    harness.manager.register_server(&descriptor("fs")).await.unwrap();

    let reply = harness.manager.list_tools("fs").await.unwrap();
    assert_eq!(reply.server, "fs");
    let names: Vec<String> = reply.tools.iter().map(|t| t.name.to_string()).collect();
    assert_eq!(names, vec!["read_file".to_string(), "list_dir".to_string()]);
}

#[tokio::test]
async fn resources_round_trip_through_the_session() {
    let harness = ManagerTestHarness::with_server("fs", &[]);
    harness.manager.register_server(&descriptor("fs")).await.unwrap();

    let listed = harness.manager.list_resources("fs").await.unwrap();
    assert_eq!(listed.resources.len(), 1);

    let read = harness
        .manager
        .read_resource("fs", "file:///example.txt")
        .await
        .unwrap();
    assert_eq!(read.uri, "file:///example.txt");
    assert_eq!(read.contents[0]["uri"], "file:///example.txt");
}
