//! 游标分页迭代器
//!
//! 每页请求带 `limit`（和上一页返回的 `cursor`），逐项返回 `collection_key`
//! 数组中的元素；响应中 `response_metadata.next_cursor` 为空时结束。

use serde_json::Value;
use std::collections::VecDeque;
use std::iter::FusedIterator;
use tracing::{debug, warn};

use super::{CallOptions, Client};
use crate::error::{Result, SlackError};
use crate::resource::Resource;

/// 惰性分页迭代器
///
/// 只有当前页消费完才发起下一次请求，提前停止迭代不会产生多余调用。
/// 遇到错误时返回该错误并结束，不跳过失败的页。
pub struct PageIterator<'a> {
    client: &'a Client,
    resource: Resource,
    collection_key: String,
    limit: u32,
    raise_on_error: bool,
    cursor: Option<String>,
    buffer: VecDeque<Value>,
    pages_fetched: usize,
    finished: bool,
}

impl<'a> PageIterator<'a> {
    pub(crate) fn new(client: &'a Client, resource: Resource, collection_key: String, limit: u32) -> Self {
        Self {
            client,
            resource,
            collection_key,
            limit,
            raise_on_error: false,
            cursor: None,
            buffer: VecDeque::new(),
            pages_fetched: 0,
            finished: false,
        }
    }

    /// 每页条数
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_raise_on_error(mut self, raise_on_error: bool) -> Self {
        self.raise_on_error = raise_on_error;
        self
    }

    /// 已请求的页数
    pub fn pages_fetched(&self) -> usize {
        self.pages_fetched
    }

    fn fetch_page(&mut self) -> Result<()> {
        let mut options = CallOptions::new()
            .with_param("limit", self.limit)
            .with_raise_on_error(self.raise_on_error);
        if let Some(cursor) = self.cursor.take() {
            options = options.with_param("cursor", cursor);
        }

        let response = self.client.call(&self.resource, options)?;
        let json = response.json()?;

        let items = json
            .get(&self.collection_key)
            .and_then(Value::as_array)
            .ok_or_else(|| SlackError::MissingCollection {
                key: self.collection_key.clone(),
            })?;
        self.buffer.extend(items.iter().cloned());

        self.cursor = json
            .pointer("/response_metadata/next_cursor")
            .and_then(Value::as_str)
            .filter(|c| !c.is_empty())
            .map(str::to_string);
        self.pages_fetched += 1;

        debug!(
            resource = self.resource.handle,
            page = self.pages_fetched,
            items = items.len(),
            has_more = self.cursor.is_some(),
            "Fetched Slack page"
        );

        if self.cursor.is_none() {
            self.finished = true;
        }
        Ok(())
    }
}

impl Iterator for PageIterator<'_> {
    type Item = Result<Value>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(item) = self.buffer.pop_front() {
                return Some(Ok(item));
            }
            if self.finished {
                return None;
            }
            if let Err(e) = self.fetch_page() {
                warn!(
                    resource = self.resource.handle,
                    page = self.pages_fetched + 1,
                    error = %e,
                    "Slack pagination stopped"
                );
                self.finished = true;
                return Some(Err(e));
            }
        }
    }
}

impl FusedIterator for PageIterator<'_> {}
