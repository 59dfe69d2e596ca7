use crate::builder::SwapBufferBuilder;
use crate::reader::Reader;
use crate::state::{INITIAL_CURRENT, SLOT_COUNT, SharedState};
use crate::sync::{Arc, Ordering};
use crate::wait::WaitStrategy;

/// The unique writer handle of a single-writer, multi-reader double buffer.
///
/// `SwapBuffer` owns two slots holding values of `T`. One of them is live and
/// is what readers copy out of; the writer only ever mutates the other one
/// (the pending slot), then publishes it with a single atomic swap and waits
/// for the slot it displaced to drain before returning.
///
/// It is `!Clone`, and writing takes `&mut self`, so there is exactly one
/// writer at a time. Read handles are obtained with [`reader`](Self::reader).
///
/// **Typical Usage**:
/// ```
/// use swmr_buffer::SwapBuffer;
/// use std::thread;
///
/// let mut buffer = SwapBuffer::new(String::from("init"));
/// let reader = buffer.reader();
///
/// let handle = thread::spawn(move || {
///     let value = reader.read();
///     assert!(value == "init" || value == "updated");
/// });
///
/// buffer.write(String::from("updated"));
/// assert_eq!(buffer.read(), "updated");
///
/// handle.join().unwrap();
/// ```
///
/// 单写多读双缓冲的唯一写入者句柄。
///
/// `SwapBuffer` 拥有两个存放 `T` 值的槽位。其中一个是活跃槽位，读者从中复制数据；
/// 写入者只修改另一个（待写槽位），然后用一次原子交换发布它，
/// 并在返回之前等待被替换的槽位清空。
///
/// 它是 `!Clone` 的，且写入需要 `&mut self`，因此任一时刻只有一个写入者。
/// 读取句柄通过 [`reader`](Self::reader) 获得。
pub struct SwapBuffer<T> {
    pub(crate) shared: Arc<SharedState<T>>,
    /// Slot the next write targets. Writer-private.
    /// 下一次写入的目标槽位。写入者私有。
    pub(crate) pending: usize,
    pub(crate) writes: u64,
}

impl<T: Clone> SwapBuffer<T> {
    /// Create a buffer whose both slots hold `initial`, with default settings.
    /// 使用默认设置创建一个两个槽位都存放 `initial` 的缓冲区。
    #[inline]
    pub fn new(initial: T) -> Self {
        Self::builder().build(initial)
    }

    /// Return a copy of the latest published value.
    #[inline]
    pub fn read(&self) -> T {
        self.read_with(T::clone)
    }

    /// Single read attempt; see [`Reader::try_read`].
    #[inline]
    pub fn try_read(&self) -> Option<T> {
        self.shared.try_enter().map(|guard| guard.with(T::clone))
    }

    /// Publish a copy of `value`, reusing the pending slot's resources.
    ///
    /// The pending slot is overwritten with `clone_from`, so a `String` or
    /// `Vec` that already has enough capacity is not reallocated. If the
    /// clone panics the pending slot is left unpublished: readers keep
    /// seeing the previous value and the buffer stays usable.
    ///
    /// 发布 `value` 的副本，复用待写槽位的资源。
    ///
    /// 待写槽位通过 `clone_from` 覆盖，因此已有足够容量的 `String` 或 `Vec`
    /// 不会被重新分配。如果克隆发生 panic，待写槽位不会被发布：
    /// 读者继续看到之前的值，缓冲区仍然可用。
    pub fn write_clone(&mut self, value: &T) {
        self.shared.slot(self.pending).value.with_mut(|ptr| {
            // SAFETY: see `write`.
            unsafe { (*ptr).clone_from(value) }
        });
        self.publish();
    }
}

impl<T> SwapBuffer<T> {
    /// Create a builder for configuring the buffer.
    ///
    /// # Example
    /// ```
    /// use swmr_buffer::{SwapBuffer, WaitStrategy};
    ///
    /// let buffer = SwapBuffer::builder()
    ///     .wait_strategy(WaitStrategy::Park)
    ///     .build(0u64);
    /// assert_eq!(buffer.wait_strategy(), WaitStrategy::Park);
    /// ```
    ///
    /// 创建一个用于配置缓冲区的构建器。
    #[inline]
    pub fn builder() -> SwapBufferBuilder<T> {
        SwapBufferBuilder::new()
    }

    pub(crate) fn from_shared(shared: Arc<SharedState<T>>) -> Self {
        Self {
            shared,
            pending: SLOT_COUNT - 1 - INITIAL_CURRENT,
            writes: 0,
        }
    }

    /// Create a new read handle.
    ///
    /// Handles are cheap to clone and can be sent to other threads.
    ///
    /// 创建一个新的读取句柄。句柄克隆开销很小，可以发送到其他线程。
    #[inline]
    pub fn reader(&self) -> Reader<T> {
        Reader {
            shared: self.shared.clone(),
        }
    }

    /// Run `f` against the latest published value; see [`Reader::read_with`].
    #[inline]
    pub fn read_with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        self.shared.enter().with(f)
    }

    /// Publish `value` as the new live value.
    ///
    /// Moves `value` into the pending slot, atomically makes that slot live,
    /// then waits (per the configured [`WaitStrategy`]) until no reader is
    /// left in the slot it displaced. Once this returns, every read that
    /// starts afterwards observes `value` or a later write.
    ///
    /// If a reader never finishes its read, this never returns.
    ///
    /// 将 `value` 发布为新的活跃值。
    ///
    /// 把 `value` 移入待写槽位，原子地使该槽位成为活跃槽位，
    /// 然后（按配置的 [`WaitStrategy`]）等待，直到被替换的槽位中不再有读者。
    /// 返回之后开始的每次读取都会观察到 `value` 或之后的写入。
    ///
    /// 如果某个读者永远不结束读取，此方法永远不会返回。
    pub fn write(&mut self, value: T) {
        let stale = self.shared.slot(self.pending).value.with_mut(|ptr| {
            // SAFETY: `pending` is never `current`, and the write that made it
            // pending waited for its reader count to reach zero. Readers that
            // raise the count afterwards fail the re-check and never touch the value.
            unsafe { std::mem::replace(&mut *ptr, value) }
        });
        self.publish();
        drop(stale);
    }

    /// Number of writes published through this handle.
    #[inline]
    pub fn writes(&self) -> u64 {
        self.writes
    }

    /// The configured reclaim wait strategy.
    #[inline]
    pub fn wait_strategy(&self) -> WaitStrategy {
        self.shared.strategy
    }

    /// Make the pending slot live and reclaim the one it displaced.
    fn publish(&mut self) {
        let displaced = self.shared.current.swap(self.pending, Ordering::AcqRel);

        assert_ne!(
            displaced, self.pending,
            "BUG: published slot {} was already current. \
             This indicates a library bug.",
            displaced
        );

        self.reclaim(displaced);
        self.pending = displaced;
        self.writes += 1;
    }

    /// Wait until no reader is inside slot `index`.
    fn reclaim(&self, index: usize) {
        let readers = &self.shared.slot(index).readers;

        // A read-modify-write rather than a load: it sits after the publish in
        // this count's modification order, so any reader whose increment lands
        // later synchronizes with it and sees the new `current` on its re-check.
        if readers.fetch_add(0, Ordering::AcqRel) == 0 {
            return;
        }

        let strategy = self.shared.strategy;
        let waited = strategy.wait(readers, &self.shared.parker);

        tracing::trace!(
            slot = index,
            ?strategy,
            waited,
            writes = self.writes,
            "displaced slot drained"
        );
    }
}

impl<T> std::fmt::Debug for SwapBuffer<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SwapBuffer")
            .field("current", &self.shared.current.load(Ordering::Relaxed))
            .field("pending", &self.pending)
            .field("writes", &self.writes)
            .field("wait_strategy", &self.shared.strategy)
            .finish()
    }
}
