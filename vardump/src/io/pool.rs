//! Reusable scratch buffers for rendering.
//!
//! Each dump renders into a buffer taken from a [`BufferPool`] and hands it
//! back when the [`PooledBuffer`] guard drops, unwinding included. A buffer is
//! owned by exactly one guard while in use.

use std::ops::{Deref, DerefMut};
use std::sync::{Mutex, PoisonError};

use tracing::{trace, warn};

/// Idle buffers kept for reuse.
const MAX_IDLE: usize = 16;
/// Buffers that grew past this are released to the allocator instead.
const MAX_RETAINED_CAPACITY: usize = 64 * 1024;

pub struct BufferPool {
    idle: Mutex<Vec<String>>,
}

impl BufferPool {
    pub const fn new() -> Self {
        Self {
            idle: Mutex::new(Vec::new()),
        }
    }

    /// Take a cleared buffer, reusing an idle one when available.
    pub fn acquire(&self) -> PooledBuffer<'_> {
        let reused = self
            .idle
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop();
        let buf = match reused {
            Some(buf) => {
                trace!(capacity = buf.capacity(), "reusing pooled buffer");
                buf
            }
            None => String::new(),
        };
        PooledBuffer { pool: self, buf }
    }

    /// Number of buffers currently waiting for reuse.
    pub fn idle_len(&self) -> usize {
        self.idle
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn release(&self, mut buf: String) {
        if buf.capacity() > MAX_RETAINED_CAPACITY {
            warn!(capacity = buf.capacity(), "dropping oversized dump buffer");
            return;
        }
        buf.clear();
        let mut idle = self.idle.lock().unwrap_or_else(PoisonError::into_inner);
        if idle.len() < MAX_IDLE {
            idle.push(buf);
        }
    }
}

impl Default for BufferPool {
    fn default() -> Self {
        Self::new()
    }
}

/// Exclusive handle to a pooled buffer; returns it to the pool on drop.
pub struct PooledBuffer<'p> {
    pool: &'p BufferPool,
    buf: String,
}

impl Deref for PooledBuffer<'_> {
    type Target = String;

    fn deref(&self) -> &String {
        &self.buf
    }
}

impl DerefMut for PooledBuffer<'_> {
    fn deref_mut(&mut self) -> &mut String {
        &mut self.buf
    }
}

impl Drop for PooledBuffer<'_> {
    fn drop(&mut self) {
        self.pool.release(std::mem::take(&mut self.buf));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::panic::{AssertUnwindSafe, catch_unwind};

    #[test]
    fn released_buffer_is_cleared_and_reused() {
        let pool = BufferPool::new();
        let capacity = {
            let mut buf = pool.acquire();
            buf.push_str("scratch");
            buf.capacity()
        };
        assert_eq!(pool.idle_len(), 1);

        let buf = pool.acquire();
        assert!(buf.is_empty());
        assert_eq!(buf.capacity(), capacity);
        assert_eq!(pool.idle_len(), 0);
    }

    #[test]
    fn concurrent_guards_own_distinct_buffers() {
        let pool = BufferPool::new();
        let mut first = pool.acquire();
        let mut second = pool.acquire();
        first.push('a');
        second.push('b');
        assert_eq!(first.as_str(), "a");
        assert_eq!(second.as_str(), "b");
        drop(first);
        drop(second);
        assert_eq!(pool.idle_len(), 2);
    }

    #[test]
    fn buffer_returns_on_panic() {
        let pool = BufferPool::new();
        let result = catch_unwind(AssertUnwindSafe(|| {
            let mut buf = pool.acquire();
            buf.push_str("partial");
            panic!("render failed");
        }));
        assert!(result.is_err());
        assert_eq!(pool.idle_len(), 1);
        assert!(pool.acquire().is_empty());
    }

    #[test]
    fn oversized_buffers_are_not_retained() {
        let pool = BufferPool::new();
        {
            let mut buf = pool.acquire();
            buf.reserve(MAX_RETAINED_CAPACITY + 1);
        }
        assert_eq!(pool.idle_len(), 0);
    }

    #[test]
    fn idle_list_is_bounded() {
        let pool = BufferPool::new();
        let guards: Vec<_> = (0..MAX_IDLE + 4).map(|_| pool.acquire()).collect();
        drop(guards);
        assert_eq!(pool.idle_len(), MAX_IDLE);
    }

    #[test]
    fn threads_share_one_pool() {
        let pool = BufferPool::new();
        std::thread::scope(|scope| {
            for id in 0..8 {
                let pool = &pool;
                scope.spawn(move || {
                    for round in 0..100 {
                        let mut buf = pool.acquire();
                        assert!(buf.is_empty());
                        buf.push_str(&format!("{id}:{round}"));
                        assert_eq!(buf.as_str(), format!("{id}:{round}"));
                    }
                });
            }
        });
        assert!(pool.idle_len() <= MAX_IDLE);
        assert!(pool.idle_len() >= 1);
    }

    #[test]
    fn poisoned_pool_keeps_working() {
        let pool = BufferPool::new();
        let poisoned = catch_unwind(AssertUnwindSafe(|| {
            let _idle = pool.idle.lock().unwrap_or_else(PoisonError::into_inner);
            panic!("poison the idle list");
        }));
        assert!(poisoned.is_err());
        assert!(pool.idle.is_poisoned());

        {
            let mut buf = pool.acquire();
            buf.push_str("after");
        }
        assert_eq!(pool.idle_len(), 1);
        assert!(pool.acquire().is_empty());
    }
}
