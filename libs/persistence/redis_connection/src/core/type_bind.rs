use std::{borrow::Cow, time::Duration};

use bytes::Bytes;

use super::{
    key::CacheKey,
    store::{CacheResult, CacheStore},
};

/// A resolved cache key attached to the store it reads from and writes to.
pub struct BoundKey<'store> {
    store: &'store dyn CacheStore,
    key: Cow<'static, str>,
}

impl<'store> BoundKey<'store> {
    pub fn new(store: &'store dyn CacheStore, key: Cow<'static, str>) -> Self {
        Self { store, key }
    }

    pub fn key(&self) -> &str { &self.key }

    pub async fn try_get(&self) -> CacheResult<Option<Bytes>> {
        self.store.get(&self.key).await
    }

    pub async fn set_with_expire(
        &self, value: Bytes, duration: Duration,
    ) -> CacheResult<()> {
        self.store.set(&self.key, value, duration).await
    }
}

pub trait CacheKeyBind: CacheKey {
    fn bind<'store>(&self, store: &'store dyn CacheStore) -> BoundKey<'store> {
        BoundKey::new(store, self.get_key())
    }
}

impl<K> CacheKeyBind for K where K: CacheKey {}
