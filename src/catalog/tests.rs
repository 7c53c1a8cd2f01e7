//! Catalog Module Tests
//!
//! Exercises the remote side against a local `httpmock` server.
//!
//! ## Test Scopes
//! - **Login**: Credential acquisition and every rejection path.
//! - **Retry**: One re-login per failed request, bounded by the budget, short-circuited by a rejected login.
//! - **Listing**: Pagination, the page cap and truncation on failure.
//! - **Details**: Record decoding and absent results.

#[cfg(test)]
mod tests {
    use crate::catalog::auth::{AuthenticatedClient, Credential};
    use crate::catalog::fetcher::CatalogFetcher;
    use crate::catalog::protocol::PageResponse;
    use crate::error::Error;
    use httpmock::prelude::*;
    use serde_json::json;
    use std::time::Duration;

    const API_KEY: &str = "test-key";

    fn client(server: &MockServer) -> AuthenticatedClient {
        AuthenticatedClient::new(&server.url("/auth"), API_KEY, Duration::from_secs(5)).unwrap()
    }

    fn fetcher(server: &MockServer, page_cap: u32) -> CatalogFetcher {
        CatalogFetcher::new(client(server), &server.url("/images"), page_cap)
    }

    async fn mock_login<'a>(server: &'a MockServer, token: &str) -> httpmock::Mock<'a> {
        server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/auth")
                    .json_body(json!({ "apiKey": API_KEY }));
                then.status(200).json_body(json!({ "auth": true, "token": token }));
            })
            .await
    }

    async fn mock_page<'a>(
        server: &'a MockServer,
        page: u32,
        ids: &[&str],
        page_count: u32,
        has_more: bool,
    ) -> httpmock::Mock<'a> {
        let pictures: Vec<_> = ids
            .iter()
            .map(|id| json!({ "id": id, "cropped_picture": format!("http://img/{}", id) }))
            .collect();
        let page_str = page.to_string();

        server
            .mock_async(|when, then| {
                when.method(GET).path("/images").query_param("page", page_str.as_str());
                then.status(200).json_body(json!({
                    "pictures": pictures,
                    "page": page,
                    "pageCount": page_count,
                    "hasMore": has_more,
                }));
            })
            .await
    }

    // ============================================================
    // LOGIN TESTS
    // ============================================================

    #[tokio::test]
    async fn test_authenticate_returns_token() {
        let server = MockServer::start_async().await;
        let login = mock_login(&server, "tok-1").await;

        let credential = client(&server).authenticate().await.unwrap();

        assert_eq!(credential.token(), "tok-1");
        assert!(credential.is_valid());
        login.assert_async().await;
    }

    #[tokio::test]
    async fn test_authenticate_rejects_auth_false() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/auth");
                then.status(200).json_body(json!({ "auth": false, "token": "tok" }));
            })
            .await;

        let result = client(&server).authenticate().await;

        assert!(matches!(result, Err(Error::Auth(_))));
    }

    #[tokio::test]
    async fn test_authenticate_rejects_empty_token() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/auth");
                then.status(200).json_body(json!({ "auth": true, "token": "" }));
            })
            .await;

        let result = client(&server).authenticate().await;

        assert!(matches!(result, Err(Error::Auth(_))));
    }

    #[tokio::test]
    async fn test_authenticate_rejects_error_status() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/auth");
                then.status(401).json_body(json!({ "status": "Unauthorized" }));
            })
            .await;

        let result = client(&server).authenticate().await;

        assert!(matches!(result, Err(Error::Auth(_))));
    }

    #[tokio::test]
    async fn test_authenticate_unreachable_is_transport_error() {
        // Nothing listens on port 1
        let client =
            AuthenticatedClient::new("http://127.0.0.1:1/auth", API_KEY, Duration::from_secs(2))
                .unwrap();

        let result = client.authenticate().await;

        assert!(matches!(result, Err(Error::Transport(_))));
    }

    #[test]
    fn test_credential_debug_hides_token() {
        let credential = Credential::new("super-secret");

        let printed = format!("{:?}", credential);

        assert!(!printed.contains("super-secret"));
    }

    // ============================================================
    // RETRY TESTS - get_with_retry
    // ============================================================

    #[tokio::test]
    async fn test_retry_succeeds_after_one_relogin() {
        let server = MockServer::start_async().await;
        let login = mock_login(&server, "fresh").await;
        let stale = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/images/1")
                    .header("authorization", "Bearer stale");
                then.status(401);
            })
            .await;
        let fresh = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/images/1")
                    .header("authorization", "Bearer fresh");
                then.status(200).json_body(json!({ "id": "1" }));
            })
            .await;

        let mut credential = Credential::new("stale");
        let response = client(&server)
            .get_with_retry(&server.url("/images/1"), &mut credential, 1, &[])
            .await
            .unwrap();

        assert_eq!(response.status(), 200);
        assert_eq!(credential.token(), "fresh");
        stale.assert_hits_async(1).await;
        fresh.assert_hits_async(1).await;
        login.assert_hits_async(1).await;
    }

    #[tokio::test]
    async fn test_retry_budget_exhausted_returns_failed_response() {
        let server = MockServer::start_async().await;
        let login = mock_login(&server, "fresh").await;
        let failing = server
            .mock_async(|when, then| {
                when.method(GET).path("/images/1");
                then.status(401);
            })
            .await;

        let mut credential = Credential::new("stale");
        let response = client(&server)
            .get_with_retry(&server.url("/images/1"), &mut credential, 1, &[])
            .await
            .unwrap();

        assert_eq!(response.status(), 401);
        failing.assert_hits_async(2).await;
        login.assert_hits_async(1).await;
    }

    #[tokio::test]
    async fn test_retry_with_zero_budget_does_not_relogin() {
        let server = MockServer::start_async().await;
        let login = mock_login(&server, "fresh").await;
        let failing = server
            .mock_async(|when, then| {
                when.method(GET).path("/images/1");
                then.status(500);
            })
            .await;

        let mut credential = Credential::new("tok");
        let response = client(&server)
            .get_with_retry(&server.url("/images/1"), &mut credential, 0, &[])
            .await
            .unwrap();

        assert_eq!(response.status(), 500);
        failing.assert_hits_async(1).await;
        login.assert_hits_async(0).await;
    }

    #[tokio::test]
    async fn test_retry_stops_when_relogin_rejected() {
        let server = MockServer::start_async().await;
        let login = server
            .mock_async(|when, then| {
                when.method(POST).path("/auth");
                then.status(200).json_body(json!({ "auth": false }));
            })
            .await;
        let failing = server
            .mock_async(|when, then| {
                when.method(GET).path("/images/1");
                then.status(401);
            })
            .await;

        let mut credential = Credential::new("stale");
        let response = client(&server)
            .get_with_retry(&server.url("/images/1"), &mut credential, 3, &[])
            .await
            .unwrap();

        assert_eq!(response.status(), 401);
        assert!(!credential.is_valid());
        failing.assert_hits_async(1).await;
        login.assert_hits_async(1).await;
    }

    #[tokio::test]
    async fn test_success_needs_no_login() {
        let server = MockServer::start_async().await;
        let login = mock_login(&server, "fresh").await;
        let ok = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/images")
                    .query_param("page", "3")
                    .header("authorization", "Bearer tok");
                then.status(200).json_body(json!({ "pictures": [] }));
            })
            .await;

        let mut credential = Credential::new("tok");
        let response = client(&server)
            .get_with_retry(
                &server.url("/images"),
                &mut credential,
                1,
                &[("page", "3".to_string())],
            )
            .await
            .unwrap();

        assert_eq!(response.status(), 200);
        ok.assert_hits_async(1).await;
        login.assert_hits_async(0).await;
    }

    // ============================================================
    // LISTING TESTS - list_all_ids
    // ============================================================

    #[tokio::test]
    async fn test_list_all_ids_stops_at_page_cap() {
        let server = MockServer::start_async().await;
        let page1 = mock_page(&server, 1, &["a", "b"], 5, true).await;
        let page2 = mock_page(&server, 2, &["c"], 5, true).await;
        let page3 = mock_page(&server, 3, &["d"], 5, true).await;

        let mut credential = Credential::new("tok");
        let ids = fetcher(&server, 2).list_all_ids(&mut credential).await.unwrap();

        assert_eq!(ids, vec!["a", "b", "c"]);
        page1.assert_hits_async(1).await;
        page2.assert_hits_async(1).await;
        page3.assert_hits_async(0).await;
    }

    #[tokio::test]
    async fn test_list_all_ids_page_cap_is_configurable() {
        let server = MockServer::start_async().await;
        mock_page(&server, 1, &["a"], 3, true).await;
        mock_page(&server, 2, &["b"], 3, true).await;
        mock_page(&server, 3, &["c"], 3, false).await;

        let mut credential = Credential::new("tok");
        let ids = fetcher(&server, 10).list_all_ids(&mut credential).await.unwrap();

        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_list_all_ids_stops_when_no_more() {
        let server = MockServer::start_async().await;
        mock_page(&server, 1, &["a", "b"], 1, false).await;
        let page2 = mock_page(&server, 2, &["c"], 1, false).await;

        let mut credential = Credential::new("tok");
        let ids = fetcher(&server, 2).list_all_ids(&mut credential).await.unwrap();

        assert_eq!(ids, vec!["a", "b"]);
        page2.assert_hits_async(0).await;
    }

    #[tokio::test]
    async fn test_list_all_ids_failed_page_truncates() {
        let server = MockServer::start_async().await;
        let login = mock_login(&server, "tok").await;
        mock_page(&server, 1, &["a", "b"], 2, true).await;
        let page2 = server
            .mock_async(|when, then| {
                when.method(GET).path("/images").query_param("page", "2");
                then.status(503);
            })
            .await;

        let mut credential = Credential::new("tok");
        let ids = fetcher(&server, 2).list_all_ids(&mut credential).await.unwrap();

        assert_eq!(ids, vec!["a", "b"]);
        // One failed attempt, one re-login, one retry
        page2.assert_hits_async(2).await;
        login.assert_hits_async(1).await;
    }

    #[tokio::test]
    async fn test_list_all_ids_first_page_failure_is_empty() {
        let server = MockServer::start_async().await;
        mock_login(&server, "tok").await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/images");
                then.status(500);
            })
            .await;

        let mut credential = Credential::new("tok");
        let ids = fetcher(&server, 2).list_all_ids(&mut credential).await.unwrap();

        assert!(ids.is_empty());
    }

    #[tokio::test]
    async fn test_list_all_ids_stops_on_last_representable_page() {
        let server = MockServer::start_async().await;
        let listing = server
            .mock_async(|when, then| {
                when.method(GET).path("/images");
                then.status(200).json_body(json!({
                    "pictures": [{ "id": "a" }],
                    "page": u32::MAX,
                    "pageCount": u32::MAX,
                    "hasMore": true,
                }));
            })
            .await;

        let mut credential = Credential::new("tok");
        let ids = fetcher(&server, u32::MAX).list_all_ids(&mut credential).await.unwrap();

        assert_eq!(ids, vec!["a"]);
        listing.assert_hits_async(1).await;
    }

    #[tokio::test]
    async fn test_list_all_ids_skips_summaries_without_id() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/images").query_param("page", "1");
                then.status(200).json_body(json!({
                    "pictures": [{ "id": "a" }, { "cropped_picture": "x" }, { "id": "" }],
                    "page": 1,
                    "pageCount": 1,
                    "hasMore": false,
                }));
            })
            .await;

        let mut credential = Credential::new("tok");
        let ids = fetcher(&server, 2).list_all_ids(&mut credential).await.unwrap();

        assert_eq!(ids, vec!["a"]);
    }

    // ============================================================
    // DETAIL TESTS - fetch_detail
    // ============================================================

    #[tokio::test]
    async fn test_fetch_detail_keeps_known_fields() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/images/abc");
                then.status(200).json_body(json!({
                    "id": "abc",
                    "author": "Jane Doe",
                    "camera": "Canon EOS",
                    "tags": "#beach #sunset",
                    "cropped_picture": "http://img/abc/cropped.jpg",
                    "full_picture": "http://img/abc/full.jpg",
                    "license": "cc-by",
                }));
            })
            .await;

        let mut credential = Credential::new("tok");
        let picture = fetcher(&server, 2)
            .fetch_detail("abc", &mut credential)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(picture.id, "abc");
        assert_eq!(picture.author, "Jane Doe");
        assert_eq!(picture.camera, "Canon EOS");
        assert_eq!(picture.tags, "#beach #sunset");
        assert_eq!(picture.full_picture, "http://img/abc/full.jpg");
    }

    #[tokio::test]
    async fn test_fetch_detail_missing_fields_default_empty() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/images/abc");
                then.status(200).json_body(json!({ "id": "abc", "author": null }));
            })
            .await;

        let mut credential = Credential::new("tok");
        let picture = fetcher(&server, 2)
            .fetch_detail("abc", &mut credential)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(picture.author, "");
        assert_eq!(picture.tags, "");
    }

    #[tokio::test]
    async fn test_fetch_detail_not_found_is_absent() {
        let server = MockServer::start_async().await;
        mock_login(&server, "tok").await;
        let detail = server
            .mock_async(|when, then| {
                when.method(GET).path("/images/gone");
                then.status(404);
            })
            .await;

        let mut credential = Credential::new("tok");
        let picture = fetcher(&server, 2)
            .fetch_detail("gone", &mut credential)
            .await
            .unwrap();

        assert!(picture.is_none());
        detail.assert_hits_async(2).await;
    }

    #[tokio::test]
    async fn test_fetch_detail_garbage_body_is_absent() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/images/abc");
                then.status(200).body("<html>oops</html>");
            })
            .await;

        let mut credential = Credential::new("tok");
        let picture = fetcher(&server, 2)
            .fetch_detail("abc", &mut credential)
            .await
            .unwrap();

        assert!(picture.is_none());
    }

    // ============================================================
    // PROTOCOL TESTS
    // ============================================================

    #[test]
    fn test_page_response_defaults() {
        let page: PageResponse = serde_json::from_value(json!({ "pictures": [] })).unwrap();

        assert_eq!(page.page, 1);
        assert_eq!(page.page_count, 1);
        assert!(!page.has_more);
    }
}
