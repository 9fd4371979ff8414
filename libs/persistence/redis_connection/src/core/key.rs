use std::borrow::Cow;

/// A named slot in the cache, declared with [`cache_key!`](crate::cache_key).
pub trait CacheKey {
    fn get_key(&self) -> Cow<'static, str>;
}
