pub mod object_cache;
pub mod register;
pub mod traits;

pub use register::{get_object_cache_plugin, register_object_cache_plugin};
pub use traits::{CacheResult, ObjectCache};

/// 声明并注册一个对象缓存插件
///
/// 通过 ctor 在进程启动时把构造器塞进注册表，
/// main 无需显式列举所有实现。
#[macro_export]
macro_rules! declare_object_cache_plugin {
    ($name:expr, $ty:ident) => {
        ::paste::paste! {
            #[::ctor::ctor]
            fn [<__register_object_cache_ $ty:snake>]() {
                $crate::cache::register::register_object_cache_plugin(
                    $name,
                    ::std::sync::Arc::new(|| {
                        ::std::boxed::Box::pin(async {
                            let cache = <$ty>::new().map_err(|e| {
                                $crate::errors::SmartClassError::CacheConnection(e)
                            })?;
                            Ok(::std::boxed::Box::new(cache)
                                as ::std::boxed::Box<dyn $crate::cache::ObjectCache>)
                        }) as $crate::cache::register::BoxedObjectCacheFuture
                    }),
                );
            }
        }
    };
}
