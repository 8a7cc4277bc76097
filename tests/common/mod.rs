//! 测试用的 mock 传输：按顺序返回预设响应，并记录每一次请求

#![allow(dead_code)]

use reqwest::StatusCode;
use slack_notifications::{ApiRequest, ApiResponse, Client, Result, SlackConfig, Transport};
use std::sync::{Arc, Mutex};

pub struct MockTransport {
    responses: Mutex<Vec<ApiResponse>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl MockTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(Vec::new()),
            requests: Mutex::new(Vec::new()),
        })
    }

    /// 追加一个 200 JSON 响应
    pub fn push_json(&self, body: serde_json::Value) {
        self.push(StatusCode::OK, &body.to_string());
    }

    pub fn push(&self, status: StatusCode, body: &str) {
        self.responses.lock().unwrap().push(ApiResponse {
            status,
            url: "https://slack.com/api/mock".to_string(),
            body: body.to_string(),
        });
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

impl Transport for MockTransport {
    fn execute(&self, request: &ApiRequest) -> Result<ApiResponse> {
        self.requests.lock().unwrap().push(request.clone());
        let mut responses = self.responses.lock().unwrap();
        assert!(!responses.is_empty(), "unexpected request to {}", request.url);
        Ok(responses.remove(0))
    }
}

pub fn client_with(mock: &Arc<MockTransport>) -> Client {
    Client::with_transport(SlackConfig::with_token("xoxb-test"), mock.clone()).unwrap()
}
