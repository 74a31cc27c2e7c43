//! Decision point failure modes against an in-process mock PDP.
//!
//! Exercises the full authorization path: a timing-out, erroring, or
//! unreachable decision point must hand the verdict to the fallback
//! engine without the caller observing anything but a normal decision.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::time::Duration;

use axum::{Json, Router, routing::post};
use uuid::Uuid;

use lexvault_core::config::policy::PolicyConfig;
use lexvault_entity::principal::UserInfo;
use lexvault_policy::{
    AuthorizationGate, AuthorizationRequest, Decision, PdpClient, PolicyQuery, PolicyResource,
    RequestMeta, RequiredPermission,
};

async fn spawn_pdp(router: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

fn pdp_config(base_url: String, timeout_ms: u64) -> PolicyConfig {
    PolicyConfig {
        enabled: true,
        base_url,
        timeout_ms,
    }
}

fn principal(roles: &[&str]) -> UserInfo {
    UserInfo {
        subject: "auth0|tester".to_string(),
        user_id: Some(Uuid::new_v4()),
        email: "tester@firm.test".to_string(),
        display_name: "Tester".to_string(),
        roles: roles.iter().map(|r| r.to_string()).collect(),
        firm_id: Some(Uuid::new_v4()),
        attributes: HashMap::new(),
        clearance_level: None,
    }
}

fn request<'a>(
    principal: &'a UserInfo,
    required: &'a RequiredPermission,
    path_params: &'a HashMap<String, String>,
    query_params: &'a HashMap<String, String>,
) -> AuthorizationRequest<'a> {
    AuthorizationRequest {
        principal,
        required,
        path_params,
        query_params,
        body: None,
        meta: RequestMeta {
            method: "POST".to_string(),
            path: "/api/documents".to_string(),
            ip_address: "127.0.0.1".to_string(),
            user_agent: None,
        },
    }
}

const WRITE_DOCUMENT: RequiredPermission = RequiredPermission {
    action: "write",
    resource_type: "document",
};

#[tokio::test]
async fn unreachable_pdp_falls_back_to_allow() {
    // Bind and immediately drop to get a port with nothing listening.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let pdp = PdpClient::new(&pdp_config(format!("http://{addr}"), 500)).unwrap();
    let gate = AuthorizationGate::new(pdp);

    let user = principal(&["legal_manager"]);
    let empty = HashMap::new();
    let obligations = gate
        .authorize(request(&user, &WRITE_DOCUMENT, &empty, &empty))
        .await
        .expect("fallback should allow a legal_manager write");
    assert!(obligations.is_empty());
}

#[tokio::test]
async fn pdp_timeout_falls_back_to_allow() {
    let router = Router::new().route(
        "/v1/decision",
        post(|| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Json(serde_json::json!({ "result": false, "reason": "too late" }))
        }),
    );
    let addr = spawn_pdp(router).await;

    let pdp = PdpClient::new(&pdp_config(format!("http://{addr}"), 200)).unwrap();
    let gate = AuthorizationGate::new(pdp);

    let user = principal(&["legal_manager"]);
    let empty = HashMap::new();
    // The PDP would deny, but it times out; the fallback engine allows.
    gate.authorize(request(&user, &WRITE_DOCUMENT, &empty, &empty))
        .await
        .expect("fallback should allow despite the slow denying PDP");
}

#[tokio::test]
async fn pdp_server_error_falls_back() {
    let router = Router::new().route(
        "/v1/decision",
        post(|| async {
            (
                axum::http::StatusCode::INTERNAL_SERVER_ERROR,
                "policy engine crashed",
            )
        }),
    );
    let addr = spawn_pdp(router).await;

    let pdp = PdpClient::new(&pdp_config(format!("http://{addr}"), 500)).unwrap();
    let gate = AuthorizationGate::new(pdp);

    // The fallback grants writes to legal professionals but not clients.
    let empty = HashMap::new();
    let manager = principal(&["legal_professional"]);
    assert!(
        gate.authorize(request(&manager, &WRITE_DOCUMENT, &empty, &empty))
            .await
            .is_ok()
    );

    let client = principal(&["client_user"]);
    let err = gate
        .authorize(request(&client, &WRITE_DOCUMENT, &empty, &empty))
        .await
        .unwrap_err();
    assert_eq!(err.kind, lexvault_core::ErrorKind::Forbidden);
}

#[tokio::test]
async fn pdp_denial_is_authoritative() {
    let router = Router::new().route(
        "/v1/decision",
        post(|| async {
            Json(serde_json::json!({
                "result": false,
                "reason": "matter is under litigation hold",
            }))
        }),
    );
    let addr = spawn_pdp(router).await;

    let pdp = PdpClient::new(&pdp_config(format!("http://{addr}"), 500)).unwrap();
    let gate = AuthorizationGate::new(pdp);

    // A role the fallback would allow; the healthy PDP's denial wins.
    let user = principal(&["legal_manager"]);
    let empty = HashMap::new();
    let err = gate
        .authorize(request(&user, &WRITE_DOCUMENT, &empty, &empty))
        .await
        .unwrap_err();
    assert_eq!(err.kind, lexvault_core::ErrorKind::Forbidden);
    assert!(err.message.contains("litigation hold"));
}

#[tokio::test]
async fn pdp_obligations_reach_the_caller() {
    let router = Router::new().route(
        "/v1/decision",
        post(|| async {
            Json(serde_json::json!({
                "result": true,
                "reason": "external counsel access",
                "obligations": { "watermark": true },
            }))
        }),
    );
    let addr = spawn_pdp(router).await;

    let pdp = PdpClient::new(&pdp_config(format!("http://{addr}"), 500)).unwrap();
    let gate = AuthorizationGate::new(pdp);

    let user = principal(&["client_user"]);
    let empty = HashMap::new();
    let obligations = gate
        .authorize(request(&user, &WRITE_DOCUMENT, &empty, &empty))
        .await
        .unwrap();
    assert_eq!(obligations.get("watermark"), Some(&serde_json::json!(true)));
}

fn write_query(roles: &[&str]) -> PolicyQuery {
    PolicyQuery {
        principal: principal(roles),
        action: "write".to_string(),
        resource: PolicyResource {
            resource_type: "document".to_string(),
            id: None,
            attributes: serde_json::Map::new(),
        },
        context: RequestMeta::default(),
    }
}

#[tokio::test]
async fn batch_decisions_map_per_element() {
    let router = Router::new().route(
        "/v1/decision/batch",
        post(|| async {
            Json(serde_json::json!({
                "results": [
                    { "allow": true, "reason": "ok", "obligations": { "watermark": true } },
                    { "allow": false, "reason": "blocked" },
                ],
            }))
        }),
    );
    let addr = spawn_pdp(router).await;

    let pdp = PdpClient::new(&pdp_config(format!("http://{addr}"), 500)).unwrap();
    let queries = [write_query(&["legal_manager"]), write_query(&["client_user"])];
    let verdicts = pdp.decide_many(&queries).await;

    assert_eq!(verdicts.len(), 2);
    match &verdicts[0] {
        Decision::Allowed { obligations, .. } => {
            assert_eq!(obligations.get("watermark"), Some(&serde_json::json!(true)));
        }
        other => panic!("expected an allow, got {other:?}"),
    }
    match &verdicts[1] {
        Decision::Denied { reason } => assert_eq!(reason, "blocked"),
        other => panic!("expected a denial, got {other:?}"),
    }
}

#[tokio::test]
async fn batch_count_mismatch_marks_all_unavailable() {
    // One verdict for two queries: no verdict can be trusted to line up.
    let router = Router::new().route(
        "/v1/decision/batch",
        post(|| async {
            Json(serde_json::json!({
                "results": [{ "allow": true, "reason": "ok" }],
            }))
        }),
    );
    let addr = spawn_pdp(router).await;

    let pdp = PdpClient::new(&pdp_config(format!("http://{addr}"), 500)).unwrap();
    let queries = [write_query(&["legal_manager"]), write_query(&["client_user"])];
    let verdicts = pdp.decide_many(&queries).await;

    assert_eq!(verdicts, vec![Decision::Unavailable, Decision::Unavailable]);
}

#[tokio::test]
async fn batch_failure_marks_all_unavailable() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let pdp = PdpClient::new(&pdp_config(format!("http://{addr}"), 500)).unwrap();
    let queries = [write_query(&["legal_manager"]), write_query(&["client_user"])];
    let verdicts = pdp.decide_many(&queries).await;

    assert_eq!(verdicts, vec![Decision::Unavailable, Decision::Unavailable]);
}

#[tokio::test]
async fn disabled_pdp_is_never_called() {
    let pdp = PdpClient::new(&PolicyConfig {
        enabled: false,
        base_url: "http://127.0.0.1:1".to_string(),
        timeout_ms: 100,
    })
    .unwrap();

    let user = principal(&["super_admin"]);
    let query = PolicyQuery {
        principal: user,
        action: "delete".to_string(),
        resource: PolicyResource {
            resource_type: "matter".to_string(),
            id: None,
            attributes: serde_json::Map::new(),
        },
        context: RequestMeta::default(),
    };
    assert_eq!(pdp.decide(&query).await, Decision::Unavailable);
}
