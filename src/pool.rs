//! Reusable scratch buffers for query result accumulation.
//!
//! Queries collect matches into a pooled buffer and then move them into a
//! fresh, exactly sized `Vec` for the caller. Pooled memory never leaves the
//! query that borrowed it.

use parking_lot::Mutex;

pub struct BufferPool<T> {
    free: Mutex<Vec<Vec<T>>>,
    buffer_capacity: usize,
    max_pooled: usize,
    max_buffer_capacity: usize,
}

impl<T> BufferPool<T> {
    pub fn new(buffer_capacity: usize, max_pooled: usize, max_buffer_capacity: usize) -> Self {
        Self {
            free: Mutex::new(Vec::with_capacity(max_pooled)),
            buffer_capacity,
            max_pooled,
            max_buffer_capacity,
        }
    }

    /// Borrow an empty buffer. It may carry capacity from an earlier query.
    pub fn acquire(&self) -> Vec<T> {
        match self.free.lock().pop() {
            Some(buffer) => buffer,
            None => Vec::with_capacity(self.buffer_capacity),
        }
    }

    /// Return a borrowed buffer. Oversized buffers and buffers beyond the
    /// retention limit are dropped.
    pub fn release(&self, mut buffer: Vec<T>) {
        buffer.clear();
        if buffer.capacity() > self.max_buffer_capacity {
            return;
        }

        let mut free = self.free.lock();
        if free.len() < self.max_pooled {
            free.push(buffer);
        }
    }

    /// Move the contents of a borrowed buffer into a caller-owned `Vec` of
    /// exact length, then release the buffer.
    pub fn detach(&self, mut buffer: Vec<T>) -> Vec<T> {
        let owned: Vec<T> = buffer.drain(..).collect();
        self.release(buffer);
        owned
    }

    /// Number of idle buffers currently held.
    pub fn pooled(&self) -> usize {
        self.free.lock().len()
    }
}
