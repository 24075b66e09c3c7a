//! Verify request building and page-link extraction against JSON test
//! vectors stored in `test-vectors/`.
//!
//! Endpoints in the vectors use the crate's own serde representation, so the
//! files double as a check that serialized endpoints stay stable. JSON bodies
//! are compared as parsed values to avoid false negatives from key order.

use std::collections::BTreeMap;

use apibuilder_core::mock::MockExecutor;
use apibuilder_core::{
    ApiProvider, Configuration, Endpoint, HttpMethod, HttpResponse, Parameters,
};

fn provider(case: &serde_json::Value) -> ApiProvider<MockExecutor> {
    let host = case["host"].as_str().unwrap_or("https://some.api.com");
    let mut config = Configuration::new(host).unwrap();
    if let Some(headers) = case["request_headers"].as_object() {
        for (name, value) in headers {
            config = config.with_header(name.as_str(), value.as_str().unwrap());
        }
    }
    ApiProvider::with_executor(config, MockExecutor::responding(HttpResponse::new(200, "")))
}

fn header_pairs(value: &serde_json::Value) -> Vec<(String, String)> {
    value
        .as_array()
        .unwrap()
        .iter()
        .map(|h| {
            let arr = h.as_array().unwrap();
            (arr[0].as_str().unwrap().to_string(), arr[1].as_str().unwrap().to_string())
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

#[test]
fn request_test_vectors() {
    let raw = include_str!("../../test-vectors/requests.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let p = provider(case);
        let endpoint: Endpoint = serde_json::from_value(case["endpoint"].clone()).unwrap();
        let overrides: Option<Parameters> = serde_json::from_value(case["overrides"].clone()).unwrap();
        let overrides = overrides.as_ref();

        let built = if !case["json_body"].is_null() {
            p.build_json_request(&endpoint, &case["json_body"], overrides)
        } else if !case["raw_body"].is_null() {
            let raw = &case["raw_body"];
            let bytes: Vec<u8> = serde_json::from_value(raw["bytes"].clone()).unwrap();
            p.build_raw_request(&endpoint, bytes, raw["content_type"].as_str().unwrap(), overrides)
        } else {
            p.build_request(&endpoint, overrides)
        };
        let req = built.unwrap();

        let expected = &case["expected_request"];
        let method: HttpMethod = expected["method"].as_str().unwrap().parse().unwrap();
        assert_eq!(req.method, method, "{name}: method");
        assert_eq!(req.url, expected["url"].as_str().unwrap(), "{name}: url");
        assert_eq!(req.headers, header_pairs(&expected["headers"]), "{name}: headers");

        if expected["json_body"].is_null() {
            let body: Option<Vec<u8>> = serde_json::from_value(expected["body"].clone()).unwrap();
            assert_eq!(req.body, body, "{name}: body");
        } else {
            let body: serde_json::Value = serde_json::from_slice(req.body.as_deref().unwrap()).unwrap();
            assert_eq!(body, expected["json_body"], "{name}: json body");
        }
    }
}

// ---------------------------------------------------------------------------
// Page links
// ---------------------------------------------------------------------------

#[test]
fn link_test_vectors() {
    let raw = include_str!("../../test-vectors/links.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let p = provider(case);
        let endpoint: Endpoint = serde_json::from_value(case["endpoint"].clone()).unwrap();

        let response = HttpResponse {
            status: 200,
            headers: header_pairs(&case["headers"]),
            body: b"[]".to_vec(),
        };
        let page = p.parse_page::<Vec<u32>>(&endpoint, response).unwrap();

        let expected: BTreeMap<String, Endpoint> =
            serde_json::from_value(case["expected"].clone()).unwrap();
        assert_eq!(page.page_links, expected, "{name}: page links");
    }
}
