use crate::{
    QueueError,
    traits::{QueueConsumer, QueueFactory, QueueProducer},
};
use crossbeam_utils::CachePadded;
use parking_lot::RwLock;
use std::{fmt, marker::PhantomData, sync::Arc};

/// Capacity used when a queue is requested with capacity 0.
pub const DEFAULT_CAPACITY: usize = 32;

/// Circular buffer state guarded by the queue's lock.
///
/// `head == rear` is both the empty and the full position; `empty` tells the
/// two apart. It is `false` whenever `head != rear`.
struct Ring<T> {
    slots: Box<[Option<T>]>,
    head: usize,
    rear: usize,
    empty: bool,
}

impl<T> Ring<T> {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: (0..capacity).map(|_| None).collect(),
            head: 0,
            rear: 0,
            empty: true,
        }
    }

    #[inline]
    const fn is_empty(&self) -> bool {
        self.head == self.rear && self.empty
    }

    #[inline]
    const fn is_full(&self) -> bool {
        self.head == self.rear && !self.empty
    }

    fn len(&self) -> usize {
        let capacity = self.slots.len();
        if self.head == self.rear {
            if self.empty { 0 } else { capacity }
        } else {
            (self.rear + capacity - self.head) % capacity
        }
    }

    /// Store `value` at `rear`, or give it back if every slot is taken.
    fn push(&mut self, value: T) -> Result<(), T> {
        if self.is_full() {
            return Err(value);
        }
        self.slots[self.rear] = Some(value);
        self.rear = (self.rear + 1) % self.slots.len();
        // either head != rear now, or the ring just filled up
        self.empty = false;
        Ok(())
    }

    /// Move the value out of `head`, leaving the slot vacant.
    fn pop(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        let value = self.slots[self.head].take();
        self.head = (self.head + 1) % self.slots.len();
        if self.head == self.rear {
            self.empty = true;
        }
        value
    }

    fn front(&self) -> Option<&T> {
        if self.is_empty() {
            None
        } else {
            self.slots[self.head].as_ref()
        }
    }
}

/// Bounded, thread-safe FIFO queue over a circular buffer.
///
/// The buffer, both indices and the empty flag sit behind one
/// reader-writer lock:
///
/// - **Mutations** (`enqueue`, `dequeue` and their variants) take the lock
///   exclusively
/// - **Queries** (`peek`, `size`, `cap`, `len`, `is_full`, `is_empty`) share
///   it
///
/// No operation waits for space or data. A full queue rejects enqueues and
/// an empty queue yields nothing, immediately.
///
/// # Type Parameters
///
/// * `T` - The element type. The queue is `Send + Sync` when `T` is.
///
/// # Examples
///
/// ```
/// use fifoq::FifoQueue;
///
/// let q = FifoQueue::new(2);
/// assert!(q.enqueue("a"));
/// assert!(q.enqueue("b"));
/// assert!(!q.enqueue("c"));
///
/// assert_eq!(q.peek(), Some("a"));
/// assert_eq!(q.dequeue(), Some("a"));
/// assert_eq!(q.len(), 1);
/// ```
pub struct FifoQueue<T> {
    ring: CachePadded<RwLock<Ring<T>>>,
    capacity: usize,
}

impl<T> fmt::Debug for FifoQueue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ring = self.ring.read();
        f.debug_struct("FifoQueue")
            .field("capacity", &self.capacity)
            .field("len", &ring.len())
            .field("is_empty", &ring.is_empty())
            .finish_non_exhaustive()
    }
}

impl<T> Default for FifoQueue<T> {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl<T> FifoQueue<T> {
    /// Create a queue with room for `capacity` elements.
    ///
    /// A capacity of 0 selects [`DEFAULT_CAPACITY`]. For a signed capacity
    /// that must be validated, go through [`queue`].
    pub fn new(capacity: usize) -> Self {
        let capacity = if capacity == 0 {
            log::debug!("capacity 0 requested, using default of {DEFAULT_CAPACITY}");
            DEFAULT_CAPACITY
        } else {
            capacity
        };
        log::debug!("creating fifo queue, capacity={capacity}");

        Self {
            ring: CachePadded::new(RwLock::new(Ring::with_capacity(capacity))),
            capacity,
        }
    }

    /// Fixed number of slots, read under the shared lock.
    ///
    /// This is the capacity, not the number of queued elements; see
    /// [`len`](Self::len) for that.
    pub fn size(&self) -> usize {
        self.ring.read().slots.len()
    }

    /// Alias of [`size`](Self::size).
    pub fn cap(&self) -> usize {
        self.ring.read().slots.len()
    }

    /// Fixed number of slots, without touching the lock.
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of elements currently queued.
    pub fn len(&self) -> usize {
        self.ring.read().len()
    }

    /// `true` if there is nothing to dequeue.
    pub fn is_empty(&self) -> bool {
        self.ring.read().is_empty()
    }

    /// `true` if every slot is occupied.
    pub fn is_full(&self) -> bool {
        self.ring.read().is_full()
    }

    /// Append a value, handing it back if the queue is full.
    pub fn try_enqueue(&self, value: T) -> Result<(), (T, QueueError)> {
        self.ring.write().push(value).map_err(|value| {
            log::trace!("enqueue rejected, queue full (capacity={})", self.capacity);
            (value, QueueError::Full)
        })
    }

    /// Append a value.
    ///
    /// Returns `false` and drops the value if the queue is full; the queue
    /// is left untouched in that case.
    pub fn enqueue(&self, value: T) -> bool {
        self.try_enqueue(value).is_ok()
    }

    /// Remove and return the oldest element.
    pub fn try_dequeue(&self) -> Result<T, QueueError> {
        self.ring.write().pop().ok_or_else(|| {
            log::trace!("dequeue rejected, queue empty");
            QueueError::Empty
        })
    }

    /// Remove and return the oldest element, `None` if the queue is empty.
    pub fn dequeue(&self) -> Option<T> {
        self.try_dequeue().ok()
    }

    /// Clone of the oldest element, leaving it in place.
    pub fn peek(&self) -> Option<T>
    where
        T: Clone,
    {
        self.ring.read().front().cloned()
    }

    /// Run `f` on the oldest element in place.
    ///
    /// `f` runs under the shared lock and must not call back into this queue.
    ///
    /// ```
    /// use fifoq::FifoQueue;
    ///
    /// let q = FifoQueue::new(4);
    /// q.enqueue(vec![1, 2, 3]);
    /// assert_eq!(q.peek_with(Vec::len), Some(3));
    /// ```
    pub fn peek_with<R, F>(&self, f: F) -> Option<R>
    where
        F: FnOnce(&T) -> R,
    {
        self.ring.read().front().map(f)
    }

    /// Remove the oldest element only if `predicate` accepts it.
    ///
    /// The check and the removal happen under one exclusive lock, so no other
    /// caller can dequeue in between.
    pub fn dequeue_if<F>(&self, predicate: F) -> Result<T, QueueError>
    where
        F: FnOnce(&T) -> bool,
    {
        let mut ring = self.ring.write();
        let head = ring.front().ok_or(QueueError::Empty)?;
        if !predicate(head) {
            return Err(QueueError::Rejected);
        }
        ring.pop().ok_or(QueueError::Empty)
    }

    /// Dequeue into `consumer` until the queue runs dry or `consumer`
    /// returns `true`.
    ///
    /// Each element is taken under its own lock acquisition and `consumer`
    /// runs unlocked, so producers can keep appending meanwhile.
    pub fn consume<F>(&self, mut consumer: F) -> usize
    where
        F: FnMut(T) -> bool,
    {
        let mut count = 0;
        while let Some(value) = self.dequeue() {
            count += 1;
            if consumer(value) {
                break;
            }
        }
        count
    }
}

/// Builder for creating queues from a signed capacity.
///
/// Negative capacities are refused with [`QueueError::NegativeCapacity`];
/// no queue is allocated in that case.
///
/// # Examples
///
/// ```
/// use fifoq::{
///     bounded::queue,
///     traits::{QueueConsumer, QueueProducer},
/// };
///
/// # fn main() -> Result<(), fifoq::QueueError> {
/// let (producer, consumer) = queue::<u32>().capacity(64).channels()?;
///
/// assert!(producer.enqueue(100));
/// assert_eq!(consumer.dequeue(), Some(100));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct QueueBuilder<T> {
    capacity: Option<isize>,
    _phantom: PhantomData<T>,
}

impl<T> Default for QueueBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> QueueBuilder<T> {
    /// Create a new queue builder
    pub const fn new() -> Self {
        Self {
            capacity: None,
            _phantom: PhantomData,
        }
    }

    /// Set the queue capacity (0 selects the default)
    #[must_use]
    pub const fn capacity(mut self, cap: isize) -> Self {
        self.capacity = Some(cap);
        self
    }

    /// Build a queue owned by the caller
    pub fn build_owned(self) -> Result<FifoQueue<T>, QueueError> {
        let requested = self.capacity.unwrap_or(0);
        let capacity = usize::try_from(requested).map_err(|_| {
            log::error!("refusing to build queue with negative capacity {requested}");
            QueueError::NegativeCapacity { requested }
        })?;
        Ok(FifoQueue::new(capacity))
    }

    /// Build a shareable queue
    pub fn build(self) -> Result<Arc<FifoQueue<T>>, QueueError> {
        self.build_owned().map(Arc::new)
    }

    /// Create producer/consumer pair
    pub fn channels(self) -> Result<(Producer<T>, Consumer<T>), QueueError> {
        let queue = self.build()?;
        Ok(queue.channel())
    }
}

/// Entry point for configuring a queue.
///
/// # Examples
///
/// ```
/// use fifoq::{DEFAULT_CAPACITY, bounded::queue};
///
/// # fn main() -> Result<(), fifoq::QueueError> {
/// let q = queue::<u64>().build()?;
/// assert_eq!(q.cap(), DEFAULT_CAPACITY);
/// # Ok(())
/// # }
/// ```
pub const fn queue<T>() -> QueueBuilder<T> {
    QueueBuilder::new()
}

/// Convenient type alias for [`QueueProducerHandle`].
pub type Producer<T> = QueueProducerHandle<T>;

/// Convenient type alias for [`QueueConsumerHandle`].
pub type Consumer<T> = QueueConsumerHandle<T>;

/// Producer handle for a [`FifoQueue`].
///
/// A cloneable handle sharing the queue through `Arc`; hand one to each
/// producing thread or task.
#[derive(Debug)]
pub struct QueueProducerHandle<T> {
    queue: Arc<FifoQueue<T>>,
}

impl<T> Clone for QueueProducerHandle<T> {
    fn clone(&self) -> Self {
        Self {
            queue: self.queue.clone(),
        }
    }
}

impl<T> QueueProducer<T> for QueueProducerHandle<T> {
    fn try_enqueue(&self, value: T) -> Result<(), (T, QueueError)> {
        self.queue.try_enqueue(value)
    }
}

/// Consumer handle for a [`FifoQueue`].
///
/// A cloneable handle sharing the queue through `Arc`. Besides plain
/// dequeueing it offers conditional removal (`dequeue_if`) and draining
/// (`consume`).
///
/// # Examples
///
/// ```
/// use fifoq::{
///     QueueError,
///     bounded::queue,
///     traits::{QueueConsumer, QueueProducer},
/// };
///
/// # fn main() -> Result<(), QueueError> {
/// let (producer, consumer) = queue::<i32>().capacity(8).channels()?;
///
/// producer.enqueue(1);
/// producer.enqueue(2);
///
/// // head is 1, so an "even only" dequeue declines it
/// assert_eq!(consumer.dequeue_if(|v| v % 2 == 0), Err(QueueError::Rejected));
///
/// let mut sum = 0;
/// consumer.consume(|v| {
///     sum += v;
///     false
/// });
/// assert_eq!(sum, 3);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct QueueConsumerHandle<T> {
    queue: Arc<FifoQueue<T>>,
}

impl<T> Clone for QueueConsumerHandle<T> {
    fn clone(&self) -> Self {
        Self {
            queue: self.queue.clone(),
        }
    }
}

impl<T> QueueConsumer<T> for QueueConsumerHandle<T> {
    fn try_dequeue(&self) -> Result<T, QueueError> {
        self.queue.try_dequeue()
    }

    fn peek(&self) -> Option<T>
    where
        T: Clone,
    {
        self.queue.peek()
    }

    fn dequeue_if<F>(&self, predicate: F) -> Result<T, QueueError>
    where
        F: FnOnce(&T) -> bool,
    {
        self.queue.dequeue_if(predicate)
    }

    fn consume<F>(&self, consumer: F) -> usize
    where
        F: FnMut(T) -> bool,
    {
        self.queue.consume(consumer)
    }

    fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    fn len(&self) -> usize {
        self.queue.len()
    }
}

impl<T> QueueFactory<T> for Arc<FifoQueue<T>> {
    type Producer = QueueProducerHandle<T>;
    type Consumer = QueueConsumerHandle<T>;

    fn producer(&self) -> Self::Producer {
        QueueProducerHandle {
            queue: self.clone(),
        }
    }

    fn consumer(&self) -> Self::Consumer {
        QueueConsumerHandle {
            queue: self.clone(),
        }
    }
}
