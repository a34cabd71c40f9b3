//! RPC Module Tests
//!
//! ## Test Scopes
//! - **Protocol**: Response shape (exactly one of `result` / `error`).
//! - **Dispatcher**: Error code for every stage of request handling.
//! - **Registry**: Registration and lookup of method handlers.

#[cfg(test)]
mod tests {
    use crate::rpc::dispatcher::Dispatcher;
    use crate::rpc::protocol::*;
    use crate::rpc::registry::MethodTable;
    use serde_json::{Value, json};
    use std::sync::Arc;

    fn test_dispatcher() -> Arc<Dispatcher> {
        let mut methods = MethodTable::new();
        methods.register("echo", |_id, params| async move { Ok(params) });
        methods.register("whoami", |id, _params| async move { Ok(json!({ "id": id })) });
        methods.register("reject", |_id, _params| async {
            Err(RpcError::invalid_params("bad input").with_data(json!({"field": "x"})))
        });
        methods.register("explode", |_id, _params| async {
            if true {
                panic!("handler blew up");
            }
            Ok(Value::Null)
        });
        Dispatcher::new(methods)
    }

    async fn dispatch_str(dispatcher: &Dispatcher, body: &str) -> Response {
        let length = body.len().to_string();
        dispatcher.dispatch_http(Some(length.as_str()), body.as_bytes()).await
    }

    fn error_code(response: &Response) -> i64 {
        match &response.outcome {
            Outcome::Error(error) => error.code,
            Outcome::Result(result) => panic!("expected error, got result {}", result),
        }
    }

    // ============================================================
    // PROTOCOL TESTS
    // ============================================================

    #[test]
    fn test_result_response_has_no_error_field() {
        let json = serde_json::to_value(Response::result(json!(1), json!("ok"))).unwrap();

        assert_eq!(json, json!({"jsonrpc": "2.0", "id": 1, "result": "ok"}));
    }

    #[test]
    fn test_error_response_has_no_result_field() {
        let response = Response::error(json!("a"), RpcError::internal("boom"));
        let json = serde_json::to_value(response).unwrap();

        assert_eq!(
            json,
            json!({"jsonrpc": "2.0", "id": "a", "error": {"code": -32603, "message": "boom"}})
        );
    }

    #[test]
    fn test_response_deserializes_from_controller_reply() {
        let ok: Response =
            serde_json::from_value(json!({"jsonrpc": "2.0", "id": 3, "result": {"tenantId": 1}}))
                .unwrap();
        let err: Response = serde_json::from_value(
            json!({"jsonrpc": "2.0", "id": 4, "error": {"code": -32602, "message": "nope"}}),
        )
        .unwrap();

        assert_eq!(ok.into_result().unwrap()["tenantId"], 1);
        assert_eq!(err.into_result().unwrap_err().code, INVALID_PARAMS);
    }

    // ============================================================
    // REGISTRY TESTS
    // ============================================================

    #[test]
    fn test_registry_register_and_lookup() {
        let mut methods = MethodTable::new();
        assert!(methods.is_empty());

        methods.register("b", |_id, _params| async { Ok(Value::Null) });
        methods.register("a", |_id, _params| async { Ok(Value::Null) });

        assert!(methods.contains("a"));
        assert!(!methods.contains("c"));
        assert_eq!(methods.len(), 2);
        assert_eq!(methods.methods(), vec!["a", "b"]);
    }

    // ============================================================
    // DISPATCHER TESTS
    // ============================================================

    #[tokio::test]
    async fn test_dispatch_success_echoes_id_and_result() {
        let dispatcher = test_dispatcher();

        let response = dispatch_str(
            &dispatcher,
            r#"{"jsonrpc":"2.0","method":"echo","params":{"x":1},"id":"req-1"}"#,
        )
        .await;

        assert_eq!(response.id, json!("req-1"));
        assert_eq!(response.into_result().unwrap(), json!({"x": 1}));
    }

    #[tokio::test]
    async fn test_handler_receives_request_id() {
        let dispatcher = test_dispatcher();

        let response = dispatch_str(&dispatcher, r#"{"jsonrpc":"2.0","method":"whoami","id":42}"#).await;

        assert_eq!(response.into_result().unwrap(), json!({"id": 42}));
    }

    #[tokio::test]
    async fn test_missing_params_become_empty_object() {
        let dispatcher = test_dispatcher();

        let response = dispatch_str(&dispatcher, r#"{"jsonrpc":"2.0","method":"echo","id":1}"#).await;

        assert_eq!(response.into_result().unwrap(), json!({}));
    }

    #[tokio::test]
    async fn test_unknown_method_yields_method_not_found() {
        let dispatcher = test_dispatcher();

        let response =
            dispatch_str(&dispatcher, r#"{"jsonrpc":"2.0","method":"unknownThing","id":7}"#).await;
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["jsonrpc"], "2.0");
        assert_eq!(json["id"], 7);
        assert_eq!(json["error"]["code"], METHOD_NOT_FOUND);
        assert!(json.get("result").is_none());
    }

    #[tokio::test]
    async fn test_non_json_body_yields_parse_error() {
        let dispatcher = test_dispatcher();

        let response = dispatch_str(&dispatcher, "{not json").await;

        assert_eq!(error_code(&response), PARSE_ERROR);
        assert_eq!(response.id, Value::Null);
    }

    #[tokio::test]
    async fn test_missing_or_invalid_content_length_yields_parse_error() {
        let dispatcher = test_dispatcher();
        let body = br#"{"jsonrpc":"2.0","method":"echo","id":1}"#;

        let missing = dispatcher.dispatch_http(None, body).await;
        let invalid = dispatcher.dispatch_http(Some("abc"), body).await;
        let too_long = dispatcher.dispatch_http(Some("9999"), body).await;

        assert_eq!(error_code(&missing), PARSE_ERROR);
        assert_eq!(error_code(&invalid), PARSE_ERROR);
        assert_eq!(error_code(&too_long), PARSE_ERROR);
    }

    #[tokio::test]
    async fn test_body_is_cut_at_declared_length() {
        let dispatcher = test_dispatcher();
        let request = r#"{"jsonrpc":"2.0","method":"echo","id":1}"#;
        let body = format!("{}trailing garbage", request);

        let length = request.len().to_string();

        let response = dispatcher
            .dispatch_http(Some(length.as_str()), body.as_bytes())
            .await;

        assert!(!response.is_error());
    }

    #[tokio::test]
    async fn test_envelope_validation_yields_invalid_request() {
        let dispatcher = test_dispatcher();

        for body in [
            r#"[1, 2, 3]"#,
            r#"{"jsonrpc":"2.0","id":1}"#,
            r#"{"jsonrpc":"2.0","method":5,"id":1}"#,
            r#"{"jsonrpc":"1.0","method":"echo","id":1}"#,
            r#"{"jsonrpc":"2.0","method":"echo","params":"x","id":1}"#,
        ] {
            let response = dispatch_str(&dispatcher, body).await;
            assert_eq!(error_code(&response), INVALID_REQUEST, "body: {}", body);
        }
    }

    #[tokio::test]
    async fn test_invalid_request_keeps_id() {
        let dispatcher = test_dispatcher();

        let response = dispatch_str(&dispatcher, r#"{"jsonrpc":"2.0","id":9}"#).await;

        assert_eq!(response.id, json!(9));
    }

    #[tokio::test]
    async fn test_handler_error_is_returned_with_data() {
        let dispatcher = test_dispatcher();

        let response = dispatch_str(&dispatcher, r#"{"jsonrpc":"2.0","method":"reject","id":1}"#).await;
        let error = response.into_result().unwrap_err();

        assert_eq!(error.code, INVALID_PARAMS);
        assert_eq!(error.data, Some(json!({"field": "x"})));
    }

    #[tokio::test]
    async fn test_panicking_handler_yields_internal_error() {
        // ARRANGE
        let dispatcher = test_dispatcher();

        // ACT
        let response = dispatch_str(&dispatcher, r#"{"jsonrpc":"2.0","method":"explode","id":1}"#).await;

        // ASSERT
        assert_eq!(error_code(&response), INTERNAL_ERROR);

        // ASSERT: The dispatcher keeps serving afterwards
        let response = dispatch_str(&dispatcher, r#"{"jsonrpc":"2.0","method":"echo","id":2}"#).await;
        assert!(!response.is_error());
    }
}
