pub mod memory;
#[cfg(feature = "redis")]
pub mod redis;

pub use memory::InMemoryBlocklist;
#[cfg(feature = "redis")]
pub use self::redis::RedisBlocklist;
