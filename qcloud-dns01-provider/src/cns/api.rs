//! [`CnsApi`] 实现

use async_trait::async_trait;

use crate::error::{ProviderError, Result};
use crate::traits::{CnsApi, ErrorContext};
use crate::types::{NewRecord, Record, Zone};

use super::error::NO_DATA_OF_RECORD;
use super::types::{
    CreateRecordRequest, CreateRecordResponse, DeleteRecordRequest, DeleteRecordResponse,
    DescribeDomainListRequest, DescribeRecordListRequest, DomainListResponse, RecordListResponse,
};
use super::{MAX_PAGE_SIZE, QcloudClient};

/// 一页列表数据，`total` 为接口报告的总条数
struct Page<T> {
    items: Vec<T>,
    total: Option<u32>,
}

/// 按 offset 逐页拉取，直到达到总数或遇到不满一页的数据
///
/// `fetch_page` 返回 `None` 表示没有更多数据，已拉取的条目保留。
async fn fetch_all_pages<T, F, Fut>(mut fetch_page: F) -> Result<Vec<T>>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<Option<Page<T>>>>,
{
    let mut items = Vec::new();
    let mut offset = 0_u32;

    while let Some(page) = fetch_page(offset).await? {
        let fetched = u32::try_from(page.items.len()).unwrap_or(u32::MAX);
        items.extend(page.items);

        offset = offset.saturating_add(fetched);
        if fetched < MAX_PAGE_SIZE || page.total.is_none_or(|t| offset >= t) {
            break;
        }
    }

    Ok(items)
}

fn domain_page(response: DomainListResponse) -> Page<Zone> {
    Page {
        total: response.domain_count_info.and_then(|c| c.all_total),
        items: response
            .domain_list
            .unwrap_or_default()
            .into_iter()
            .map(|d| Zone {
                id: d.domain_id,
                name: d.name,
            })
            .collect(),
    }
}

/// `NoDataOfRecord` 表示区域内（或该 offset 之后）没有记录
fn record_page(response: Result<RecordListResponse>) -> Result<Option<Page<Record>>> {
    let response = match response {
        Ok(data) => data,
        Err(ProviderError::Unknown { raw_code, .. })
            if raw_code.as_deref() == Some(NO_DATA_OF_RECORD) =>
        {
            return Ok(None);
        }
        Err(e) => return Err(e),
    };

    Ok(Some(Page {
        total: response.record_count_info.and_then(|c| c.total_count),
        items: response
            .record_list
            .unwrap_or_default()
            .into_iter()
            .map(|r| Record {
                id: r.record_id,
                name: r.name,
                record_type: r.record_type,
                value: r.value,
                line: r.line,
                ttl: r.ttl,
            })
            .collect(),
    }))
}

#[async_trait]
impl CnsApi for QcloudClient {
    async fn domain_list(&self) -> Result<Vec<Zone>> {
        let zones = fetch_all_pages(|offset| async move {
            let req = DescribeDomainListRequest {
                offset,
                limit: MAX_PAGE_SIZE,
            };
            let response: DomainListResponse = self
                .request("DescribeDomainList", &req, ErrorContext::default())
                .await?;
            Ok(Some(domain_page(response)))
        })
        .await?;

        log::debug!("[{}] Found {} domain(s)", crate::PROVIDER_NAME, zones.len());
        Ok(zones)
    }

    async fn record_list(&self, zone: &str) -> Result<Vec<Record>> {
        fetch_all_pages(|offset| async move {
            let req = DescribeRecordListRequest {
                domain: zone.to_string(),
                offset,
                limit: MAX_PAGE_SIZE,
            };
            let ctx = ErrorContext {
                domain: Some(zone.to_string()),
                ..Default::default()
            };
            record_page(self.request("DescribeRecordList", &req, ctx).await)
        })
        .await
    }

    async fn record_create(&self, zone: &str, record: &NewRecord) -> Result<u64> {
        let req = CreateRecordRequest {
            domain: zone.to_string(),
            sub_domain: record.name.clone(),
            record_type: record.record_type.clone(),
            record_line: record.line.clone(),
            value: record.value.clone(),
            ttl: record.ttl,
        };
        let ctx = ErrorContext {
            record_name: Some(record.name.clone()),
            domain: Some(zone.to_string()),
            ..Default::default()
        };

        let response: CreateRecordResponse = self.request("CreateRecord", &req, ctx).await?;
        Ok(response.record_id)
    }

    async fn record_delete(&self, zone: &str, record_id: u64) -> Result<()> {
        let req = DeleteRecordRequest {
            domain: zone.to_string(),
            record_id,
        };
        let ctx = ErrorContext {
            record_id: Some(record_id.to_string()),
            domain: Some(zone.to_string()),
            ..Default::default()
        };

        let _response: DeleteRecordResponse = self.request("DeleteRecord", &req, ctx).await?;
        Ok(())
    }
}
