//! 共享测试工具和辅助函数

#![allow(dead_code)]

use std::collections::HashMap;
use std::env;
use std::sync::Mutex;

use async_trait::async_trait;
use qcloud_dns01_provider::{
    CnsApi, Config, NewRecord, ProviderError, QcloudDnsProvider, Record, Result, Zone,
    dns01::FixedZoneResolver,
};

/// 跳过测试的宏（当环境变量缺失时）
#[macro_export]
macro_rules! skip_if_no_credentials {
    ($($var:expr),+) => {
        $(
            if std::env::var($var).is_err() {
                eprintln!("跳过测试: 缺少环境变量 {}", $var);
                return;
            }
        )+
    };
}

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
}

/// 生成唯一的 key authorization
pub fn generate_key_auth() -> String {
    let uuid = uuid::Uuid::new_v4();
    format!("{}.test-thumbprint", &uuid.to_string()[..8])
}

#[derive(Default)]
struct FakeState {
    zones: Vec<Zone>,
    records: HashMap<String, Vec<Record>>,
    next_id: u64,
    calls: Vec<String>,
    failures: HashMap<&'static str, ProviderError>,
}

/// 内存中的 `CnsApi` 实现，记录每次调用
#[derive(Default)]
pub struct FakeCns {
    state: Mutex<FakeState>,
}

impl FakeCns {
    pub fn with_zones(names: &[&str]) -> Self {
        let fake = Self::default();
        {
            let mut state = fake.lock();
            state.next_id = 1000;
            for (i, name) in names.iter().enumerate() {
                state.zones.push(Zone {
                    id: 100 + i as u64,
                    name: (*name).to_string(),
                });
            }
        }
        fake
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FakeState> {
        self.state.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// 预置一条记录
    pub fn insert(&self, zone: &str, name: &str, record_type: &str, value: &str) -> u64 {
        let mut state = self.lock();
        state.next_id += 1;
        let id = state.next_id;
        state.records.entry(zone.to_string()).or_default().push(Record {
            id,
            name: name.to_string(),
            record_type: record_type.to_string(),
            value: value.to_string(),
            line: "默认".to_string(),
            ttl: 600,
        });
        id
    }

    /// 让指定 API 调用返回错误
    pub fn fail_on(&self, action: &'static str, error: ProviderError) {
        self.lock().failures.insert(action, error);
    }

    pub fn records(&self, zone: &str) -> Vec<Record> {
        self.lock().records.get(zone).cloned().unwrap_or_default()
    }

    pub fn calls(&self) -> Vec<String> {
        self.lock().calls.clone()
    }

    fn enter(&self, action: &'static str, detail: String) -> Result<std::sync::MutexGuard<'_, FakeState>> {
        let mut state = self.lock();
        state.calls.push(format!("{action}({detail})"));
        if let Some(error) = state.failures.get(action) {
            return Err(error.clone());
        }
        Ok(state)
    }
}

#[async_trait]
impl CnsApi for FakeCns {
    async fn domain_list(&self) -> Result<Vec<Zone>> {
        let state = self.enter("DescribeDomainList", String::new())?;
        Ok(state.zones.clone())
    }

    async fn record_list(&self, zone: &str) -> Result<Vec<Record>> {
        let state = self.enter("DescribeRecordList", zone.to_string())?;
        Ok(state.records.get(zone).cloned().unwrap_or_default())
    }

    async fn record_create(&self, zone: &str, record: &NewRecord) -> Result<u64> {
        let mut state = self.enter("CreateRecord", format!("{zone}, {}", record.name))?;
        state.next_id += 1;
        let id = state.next_id;
        state.records.entry(zone.to_string()).or_default().push(Record {
            id,
            name: record.name.clone(),
            record_type: record.record_type.clone(),
            value: record.value.clone(),
            line: record.line.clone(),
            ttl: record.ttl,
        });
        Ok(id)
    }

    async fn record_delete(&self, zone: &str, record_id: u64) -> Result<()> {
        let mut state = self.enter("DeleteRecord", format!("{zone}, {record_id}"))?;
        let records = state.records.entry(zone.to_string()).or_default();
        let before = records.len();
        records.retain(|r| r.id != record_id);
        if records.len() == before {
            return Err(ProviderError::RecordNotFound {
                provider: "qcloud".to_string(),
                record_id: record_id.to_string(),
                raw_message: None,
            });
        }
        Ok(())
    }
}

/// 使用内存 API 与固定区域的 provider
pub fn fake_provider(
    fake: FakeCns,
    zone: &str,
    config: Config,
) -> QcloudDnsProvider<FakeCns, FixedZoneResolver> {
    QcloudDnsProvider::with_parts(config, fake, FixedZoneResolver::new(zone))
}

/// 真实环境测试上下文
pub struct LiveContext {
    pub provider: QcloudDnsProvider,
    pub domain: String,
}

impl LiveContext {
    pub fn from_env() -> Option<Self> {
        let domain = env::var("TEST_DOMAIN").ok()?;
        let provider = QcloudDnsProvider::from_env().ok()?;
        Some(Self { provider, domain })
    }
}
