use crate::QueueError;

/// Trait for queue producers that can enqueue items.
///
/// Implemented by the producer handles handed out by a [`QueueFactory`]. No
/// method ever blocks: a full queue is reported immediately.
pub trait QueueProducer<T> {
    /// Enqueue a value, handing it back if the queue is full.
    ///
    /// # Arguments
    /// * `value` - The value to enqueue
    ///
    /// # Returns
    /// `Ok(())` on success, or the rejected value together with
    /// `QueueError::Full`
    fn try_enqueue(&self, value: T) -> Result<(), (T, QueueError)>;

    /// Enqueue a value.
    ///
    /// The value is dropped if the queue is full; use
    /// [`try_enqueue`](Self::try_enqueue) to get it back instead.
    ///
    /// # Returns
    /// `true` if the value was stored, `false` if the queue was full
    fn enqueue(&self, value: T) -> bool {
        self.try_enqueue(value).is_ok()
    }
}

/// Trait for queue consumers that can dequeue items.
///
/// Implemented by the consumer handles handed out by a [`QueueFactory`].
pub trait QueueConsumer<T> {
    /// Dequeue the head element.
    ///
    /// # Returns
    /// The oldest value, or `QueueError::Empty` if there is none
    fn try_dequeue(&self) -> Result<T, QueueError>;

    /// Dequeue the head element, `None` if the queue is empty.
    fn dequeue(&self) -> Option<T> {
        self.try_dequeue().ok()
    }

    /// Clone of the head element without removing it.
    fn peek(&self) -> Option<T>
    where
        T: Clone;

    /// Dequeue the head element only if `predicate` accepts it.
    ///
    /// The predicate runs while the queue is locked and must not touch the
    /// same queue.
    ///
    /// # Returns
    /// The removed value, `QueueError::Empty` if there was nothing to test,
    /// or `QueueError::Rejected` if the predicate declined it
    fn dequeue_if<F>(&self, predicate: F) -> Result<T, QueueError>
    where
        F: FnOnce(&T) -> bool;

    /// Dequeue elements into `consumer` until the queue is empty or the
    /// closure returns `true` to stop.
    ///
    /// # Returns
    /// Number of elements consumed
    fn consume<F>(&self, consumer: F) -> usize
    where
        F: FnMut(T) -> bool;

    /// Check if the queue is empty.
    /// Note: with concurrent producers this can be stale by the time it
    /// returns.
    fn is_empty(&self) -> bool;

    /// Number of elements currently queued.
    fn len(&self) -> usize;
}

/// Trait for queues that can create producers and consumers.
pub trait QueueFactory<T> {
    /// The type of producers this queue creates
    type Producer: QueueProducer<T>;

    /// The type of consumers this queue creates
    type Consumer: QueueConsumer<T>;

    /// Create both producer and consumer handles in one call.
    ///
    /// # Returns
    /// A tuple containing `(producer, consumer)` handles
    fn channel(&self) -> (Self::Producer, Self::Consumer) {
        (self.producer(), self.consumer())
    }

    /// Create a new producer handle for this queue.
    fn producer(&self) -> Self::Producer;

    /// Create a new consumer handle for this queue.
    fn consumer(&self) -> Self::Consumer;
}
