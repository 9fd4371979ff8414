/// Declares a unit struct implementing [`CacheKey`](crate::CacheKey) for a
/// fixed key.
///
/// ```ignore
/// cache_key!(FeedKey => "feed");
/// ```
#[macro_export]
macro_rules! cache_key {
    ($name:ident => $key:literal) => {
        #[doc=concat!("Cache key binding\n ## Key \n", $key)]
        #[derive(Debug, Clone, Copy, Default)]
        pub struct $name;

        impl $name {
            pub const KEY: &'static str = $key;
        }

        impl $crate::core::key::CacheKey for $name {
            fn get_key(&self) -> std::borrow::Cow<'static, str> {
                std::borrow::Cow::Borrowed($key)
            }
        }
    };
}
