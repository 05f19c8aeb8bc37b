//! Browser services: the injected wallet provider and body scroll locking.

pub mod scroll_lock;
pub mod wallet;
