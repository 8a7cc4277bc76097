//! 分页迭代测试
//!
//! 使用 mock 传输模拟 Slack 的游标分页：
//! - 跨页按顺序返回
//! - 惰性请求（提前停止不会多发请求）
//! - 出错后停止

mod common;

use common::{client_with, MockTransport};
use reqwest::StatusCode;
use serde_json::json;
use slack_notifications::{Resource, SlackError, DEFAULT_RECORDS_LIMIT};

const ITEMS: Resource = Resource::get("items.list");

// ============================================================================
// 基本分页
// ============================================================================

mod paging_tests {
    use super::*;

    #[test]
    fn test_follows_cursor_across_pages() {
        let mock = MockTransport::new();
        mock.push_json(json!({
            "ok": true,
            "items": ["a", "b"],
            "response_metadata": {"next_cursor": "k1"}
        }));
        mock.push_json(json!({"ok": true, "items": ["c"]}));
        let client = client_with(&mock);

        let items: Vec<_> = client
            .iterate_pages(ITEMS, "items")
            .collect::<Result<_, _>>()
            .unwrap();

        assert_eq!(items, vec![json!("a"), json!("b"), json!("c")]);
        assert_eq!(mock.request_count(), 2);

        let requests = mock.requests();
        assert_eq!(requests[0].query_param("limit"), Some("100"));
        assert_eq!(requests[0].query_param("cursor"), None);
        assert_eq!(requests[1].query_param("limit"), Some("100"));
        assert_eq!(requests[1].query_param("cursor"), Some("k1"));
    }

    #[test]
    fn test_empty_cursor_ends_iteration() {
        let mock = MockTransport::new();
        mock.push_json(json!({
            "ok": true,
            "items": [{"id": 1}],
            "response_metadata": {"next_cursor": ""}
        }));
        let client = client_with(&mock);

        let items: Vec<_> = client.iterate_pages(ITEMS, "items").collect();
        assert_eq!(items.len(), 1);
        assert_eq!(mock.request_count(), 1);
    }

    #[test]
    fn test_empty_page_with_cursor_continues() {
        let mock = MockTransport::new();
        mock.push_json(json!({"ok": true, "items": [], "response_metadata": {"next_cursor": "k1"}}));
        mock.push_json(json!({"ok": true, "items": ["x"]}));
        let client = client_with(&mock);

        let items: Vec<_> = client
            .iterate_pages(ITEMS, "items")
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(items, vec![json!("x")]);
        assert_eq!(mock.request_count(), 2);
    }

    #[test]
    fn test_custom_limit() {
        let mock = MockTransport::new();
        mock.push_json(json!({"ok": true, "items": []}));
        let client = client_with(&mock);

        let count = client.iterate_pages(ITEMS, "items").with_limit(7).count();
        assert_eq!(count, 0);
        assert_eq!(mock.requests()[0].query_param("limit"), Some("7"));
    }

    #[test]
    fn test_default_limit_from_config() {
        assert_eq!(DEFAULT_RECORDS_LIMIT, 100);
    }
}

// ============================================================================
// 惰性
// ============================================================================

mod laziness_tests {
    use super::*;

    #[test]
    fn test_no_request_until_first_next() {
        let mock = MockTransport::new();
        let client = client_with(&mock);

        let pages = client.iterate_pages(ITEMS, "items");
        assert_eq!(mock.request_count(), 0);
        assert_eq!(pages.pages_fetched(), 0);
    }

    #[test]
    fn test_early_stop_skips_next_page() {
        let mock = MockTransport::new();
        mock.push_json(json!({
            "ok": true,
            "items": ["a", "b"],
            "response_metadata": {"next_cursor": "k1"}
        }));
        let client = client_with(&mock);

        let first: Vec<_> = client.iterate_pages(ITEMS, "items").take(2).collect();
        assert_eq!(first.len(), 2);
        assert_eq!(mock.request_count(), 1);
    }

    #[test]
    fn test_restart_begins_without_cursor() {
        let mock = MockTransport::new();
        for _ in 0..2 {
            mock.push_json(json!({
                "ok": true,
                "items": ["a"],
                "response_metadata": {"next_cursor": "k1"}
            }));
        }
        let client = client_with(&mock);

        let _ = client.iterate_pages(ITEMS, "items").with_limit(10).next();
        let _ = client.iterate_pages(ITEMS, "items").with_limit(10).next();

        let requests = mock.requests();
        assert_eq!(requests.len(), 2);
        for request in &requests {
            assert_eq!(request.query_param("cursor"), None);
            assert_eq!(request.query_param("limit"), Some("10"));
        }
    }
}

// ============================================================================
// 错误处理
// ============================================================================

mod error_tests {
    use super::*;

    #[test]
    fn test_missing_collection_stops() {
        let mock = MockTransport::new();
        mock.push_json(json!({"ok": false, "error": "invalid_auth"}));
        let client = client_with(&mock);

        let mut pages = client.iterate_pages(ITEMS, "items");
        match pages.next() {
            Some(Err(SlackError::MissingCollection { key })) => assert_eq!(key, "items"),
            other => panic!("unexpected: {other:?}"),
        }
        assert!(pages.next().is_none());
        assert_eq!(mock.request_count(), 1);
    }

    #[test]
    fn test_failed_second_page_propagates() {
        let mock = MockTransport::new();
        mock.push_json(json!({
            "ok": true,
            "items": ["a"],
            "response_metadata": {"next_cursor": "k1"}
        }));
        mock.push(StatusCode::TOO_MANY_REQUESTS, r#"{"ok": false, "error": "ratelimited"}"#);
        let client = client_with(&mock);

        let results: Vec<_> = client
            .iterate_pages(ITEMS, "items")
            .with_raise_on_error(true)
            .collect();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].as_ref().unwrap(), &json!("a"));
        let err = results[1].as_ref().unwrap_err();
        assert!(matches!(err, SlackError::Http(_)));
        assert_eq!(err.response().unwrap().status, StatusCode::TOO_MANY_REQUESTS);
    }

    #[test]
    fn test_raise_on_error_ok_false_page() {
        let mock = MockTransport::new();
        mock.push_json(json!({"ok": false, "error": "missing_scope", "items": []}));
        let client = client_with(&mock);

        let mut pages = client.iterate_pages(ITEMS, "items").with_raise_on_error(true);
        assert!(matches!(pages.next(), Some(Err(SlackError::Api(_)))));
        assert!(pages.next().is_none());
    }
}

// ============================================================================
// 内置资源
// ============================================================================

mod resource_tests {
    use super::*;

    #[test]
    fn test_iter_channels() {
        let mock = MockTransport::new();
        mock.push_json(json!({"ok": true, "channels": [{"id": "C1", "name": "general"}]}));
        let client = client_with(&mock);

        let channels: Vec<_> = client.iter_channels().collect::<Result<_, _>>().unwrap();
        assert_eq!(channels[0]["name"], "general");
        assert_eq!(mock.requests()[0].url, "https://slack.com/api/conversations.list");
    }

    #[test]
    fn test_iter_users() {
        let mock = MockTransport::new();
        mock.push_json(json!({"ok": true, "members": [{"id": "U1"}, {"id": "U2"}]}));
        let client = client_with(&mock);

        assert_eq!(client.iter_users().count(), 2);
        assert_eq!(mock.requests()[0].method, reqwest::Method::GET);
    }
}
