use async_trait::async_trait;

/// 缓存查询结果
///
/// 区分「未命中」和「后端故障」，调用方据此决定是否回源。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheResult<T> {
    Found(T),
    NotFound,
    Error(String),
}

/// 对象缓存统一接口
///
/// 所有实现以字符串为底层存储格式，序列化由调用方负责。
#[async_trait]
pub trait ObjectCache: Send + Sync {
    async fn get_raw(&self, key: &str) -> CacheResult<String>;

    /// ttl 单位为秒，0 表示沿用实现的全局策略
    async fn insert_raw(&self, key: String, value: String, ttl: u64);

    async fn remove(&self, key: &str);

    async fn invalidate_all(&self);
}
