//! buffer.rs
//! Tuple buffers and the buffer-provider handle passed to `Source::open`.
//!
//! The pool here is a bounded stand-in for the engine's allocator: it hands out
//! fixed-capacity buffers and takes them back. Sources never allocate or free
//! tuple buffers; they only borrow one per `fill_tuple_buffer` call.

use crossbeam::queue::ArrayQueue;
use tracing::debug;

/// Fixed-capacity writable memory region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TupleBuffer {
    data: Box<[u8]>,
    used: usize,
}

impl TupleBuffer {
    pub fn with_capacity(capacity: usize) -> Self {
        Self { data: vec![0u8; capacity].into_boxed_slice(), used: 0 }
    }

    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Whole writable area, regardless of `used_bytes`.
    pub fn available_memory_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Bytes written by the last fill.
    pub fn as_slice(&self) -> &[u8] {
        &self.data[..self.used]
    }

    pub fn used_bytes(&self) -> usize {
        self.used
    }

    /// Clamped to capacity.
    pub fn set_used_bytes(&mut self, used: usize) {
        self.used = used.min(self.data.len());
    }

    pub fn clear(&mut self) {
        self.used = 0;
    }
}

/// Engine-side buffer allocator handle.
pub trait BufferProvider: Send + Sync {
    fn buffer_size(&self) -> usize;
    fn acquire(&self) -> Option<TupleBuffer>;
    fn release(&self, buffer: TupleBuffer);
}

/// Bounded pool of equally sized tuple buffers.
pub struct FixedBufferPool {
    buffer_size: usize,
    free: ArrayQueue<TupleBuffer>,
}

impl FixedBufferPool {
    /// `count` must be non-zero.
    pub fn new(count: usize, buffer_size: usize) -> Self {
        let free = ArrayQueue::new(count.max(1));
        for _ in 0..count {
            // capacity == count, push cannot fail
            let _ = free.push(TupleBuffer::with_capacity(buffer_size));
        }
        Self { buffer_size, free }
    }

    pub fn available(&self) -> usize {
        self.free.len()
    }
}

impl BufferProvider for FixedBufferPool {
    fn buffer_size(&self) -> usize {
        self.buffer_size
    }

    fn acquire(&self) -> Option<TupleBuffer> {
        self.free.pop()
    }

    fn release(&self, mut buffer: TupleBuffer) {
        if buffer.capacity() != self.buffer_size {
            debug!(capacity = buffer.capacity(), expected = self.buffer_size, "dropping foreign buffer");
            return;
        }
        buffer.clear();
        if self.free.push(buffer).is_err() {
            debug!("pool full, dropping returned buffer");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_hands_out_and_takes_back() {
        let pool = FixedBufferPool::new(2, 16);
        let a = pool.acquire().unwrap();
        let _b = pool.acquire().unwrap();
        assert!(pool.acquire().is_none());
        pool.release(a);
        assert_eq!(pool.available(), 1);
    }

    #[test]
    fn foreign_buffers_are_not_pooled() {
        let pool = FixedBufferPool::new(1, 16);
        let _a = pool.acquire().unwrap();
        pool.release(TupleBuffer::with_capacity(8));
        assert_eq!(pool.available(), 0);
    }

    #[test]
    fn used_bytes_is_clamped() {
        let mut b = TupleBuffer::with_capacity(4);
        b.set_used_bytes(10);
        assert_eq!(b.used_bytes(), 4);
    }
}
