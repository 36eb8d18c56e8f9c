//! 共享测试工具和辅助函数

#![allow(dead_code)]

use std::sync::Arc;

use dns_reconciler_provider::{ProviderCredentials, ZoneProvider, create_provider};
use serde_json::{Value, json};
use wiremock::MockServer;

pub const TEST_API_KEY: &str = "pf-test-key-0001";
pub const TEST_ZONE: &str = "example.com";

/// 断言 `Result` 为 `Ok`，并解包返回内部值（失败则直接让测试失败）。
#[macro_export]
macro_rules! require_ok {
    ($expr:expr $(,)?) => {{
        let res = $expr;
        assert!(res.is_ok(), "expected Ok(..), got {res:?}");
        let Ok(val) = res else {
            return;
        };
        val
    }};
    ($expr:expr, $($msg:tt)+) => {{
        let res = $expr;
        assert!(
            res.is_ok(),
            "{}: {res:?}",
            format_args!($($msg)+)
        );
        let Ok(val) = res else {
            return;
        };
        val
    }};
}

/// 测试上下文 - 封装 mock 服务器和指向它的 Provider
pub struct TestContext {
    pub server: MockServer,
    pub provider: Arc<dyn ZoneProvider>,
}

impl TestContext {
    /// 启动 mock 服务器并创建 Packetframe Provider
    pub async fn packetframe() -> Self {
        let server = MockServer::start().await;
        let provider = create_provider(ProviderCredentials::Packetframe {
            api_key: TEST_API_KEY.to_string(),
            base_url: Some(format!("{}/api/", server.uri())),
        })
        .unwrap();
        Self { server, provider }
    }
}

/// 构造 wire 记录 JSON
pub fn wire_record(id: &str, label: &str, record_type: &str, value: &str, ttl: u32) -> Value {
    json!({
        "id": id,
        "label": label,
        "ttl": ttl,
        "type": record_type,
        "value": value,
        "proxied": false,
    })
}

/// 构造 `zones/list` 响应体
pub fn zone_list_body(zones: &[(&str, Vec<Value>)]) -> Value {
    let message: Vec<Value> = zones
        .iter()
        .map(|(zone, records)| {
            json!({
                "zone": zone,
                "records": records,
                "serial": "2024010101",
                "type": "primary",
                "users": ["ops@example.com"],
            })
        })
        .collect();
    json!({ "message": message, "success": true })
}
