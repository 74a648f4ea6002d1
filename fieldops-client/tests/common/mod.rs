// fieldops-client/tests/common/mod.rs
// 测试工具 - recording fake transport

#![allow(dead_code)]

use std::sync::Mutex;

use async_trait::async_trait;
use fieldops_client::{ClientError, ClientResult, HttpClient};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

type Responder = Box<dyn Fn(&str, &Value) -> ClientResult<Value> + Send + Sync>;

/// One request seen by [`RecordingHttpClient`]
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub method: &'static str,
    pub path: String,
    pub body: Value,
}

/// Fake transport: records every call and answers through a closure
pub struct RecordingHttpClient {
    calls: Mutex<Vec<RecordedCall>>,
    responder: Responder,
    cleared: Mutex<u32>,
}

impl RecordingHttpClient {
    pub fn new(responder: impl Fn(&str, &Value) -> ClientResult<Value> + Send + Sync + 'static) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            responder: Box::new(responder),
            cleared: Mutex::new(0),
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Calls whose body filters on exactly `codes`
    pub fn calls_with_codes(&self, codes: &[u8]) -> Vec<RecordedCall> {
        let codes = json!(codes);
        self.calls()
            .into_iter()
            .filter(|c| c.body.get("status") == Some(&codes) || c.body.get("segStatusIds") == Some(&codes))
            .collect()
    }

    fn answer<T: DeserializeOwned>(&self, method: &'static str, path: &str, body: Value) -> ClientResult<T> {
        self.calls.lock().unwrap().push(RecordedCall {
            method,
            path: path.to_string(),
            body: body.clone(),
        });
        let value = (self.responder)(path, &body)?;
        serde_json::from_value(value).map_err(|e| ClientError::Malformed(e.to_string()))
    }
}

#[async_trait]
impl HttpClient for RecordingHttpClient {
    async fn get<T: DeserializeOwned + Send>(&self, path: &str) -> ClientResult<T> {
        self.answer("GET", path, Value::Null)
    }

    async fn post<T: DeserializeOwned + Send, B: Serialize + Sync>(&self, path: &str, body: &B) -> ClientResult<T> {
        self.answer("POST", path, serde_json::to_value(body)?)
    }

    async fn get_public<T: DeserializeOwned + Send>(&self, path: &str) -> ClientResult<T> {
        self.answer("GET", path, Value::Null)
    }

    async fn post_public<T: DeserializeOwned + Send, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        self.answer("POST", path, serde_json::to_value(body)?)
    }

    fn clear_credentials(&self) -> ClientResult<()> {
        *self.cleared.lock().unwrap() += 1;
        Ok(())
    }
}

/// Successful work-order envelope with `records` numbered records
pub fn page(records: usize, amount: u64) -> Value {
    let data: Vec<Value> = (0..records)
        .map(|i| {
            json!({
                "workOrderNo": format!("WO-{i}"),
                "myWorkOrderSegNo": format!("SEG-{i}"),
                "workOrderStatus": 4,
                "workOrderStatusName": "已出发",
                "machineModel": "SEM656D",
                "machineNo": "S656D00123",
                "reportTime": "2025-09-11T11:30:00Z",
                "constructionLocation": "Xuzhou",
                "maintenanceDeptName": "Service East"
            })
        })
        .collect();
    json!({
        "result": { "data": data, "amount": amount },
        "targetUrl": null,
        "success": true,
        "error": null,
        "unAuthorizedRequest": false,
        "__abp": true
    })
}

/// Status codes a recorded body filters on
pub fn codes_of(body: &Value) -> Vec<u64> {
    body.get("status")
        .or_else(|| body.get("segStatusIds"))
        .and_then(Value::as_array)
        .map(|a| a.iter().filter_map(Value::as_u64).collect())
        .unwrap_or_default()
}
