use crate::sync::{AtomicUsize, UnsafeCell};
use crate::wait::{Parker, WaitStrategy};

/// Number of storage slots. One is live, the other is the writer's target.
/// 槽位数量。一个是活跃槽位，另一个是写入者的目标槽位。
pub(crate) const SLOT_COUNT: usize = 2;

/// Slot that readers see as live right after construction.
/// 构造完成后读者看到的活跃槽位。
pub(crate) const INITIAL_CURRENT: usize = 0;

/// One storage cell together with the number of readers copying out of it.
///
/// Cache-aligned so the reader traffic on one slot's count does not
/// invalidate the line holding the other slot.
///
/// 一个存储单元及正在从中复制数据的读者数量。
/// 缓存对齐，使一个槽位计数上的读者流量不会使另一个槽位所在的缓存行失效。
#[repr(align(64))]
pub(crate) struct Slot<T> {
    /// Readers currently inside this slot (hazard count).
    /// 当前位于该槽位中的读者数量（危险计数）。
    pub(crate) readers: AtomicUsize,
    /// The stored value. Mutated only by the writer, and only while the
    /// slot is not `current` and `readers` has been observed at zero.
    /// 存储的值。只由写入者修改，且仅在该槽位不是 `current`
    /// 并且已观察到 `readers` 为零时修改。
    pub(crate) value: UnsafeCell<T>,
}

impl<T> Slot<T> {
    #[inline]
    pub(crate) fn new(value: T) -> Self {
        Self {
            readers: AtomicUsize::new(0),
            value: UnsafeCell::new(value),
        }
    }
}

/// State shared between the writer handle and every reader handle.
///
/// Lives in a single `Arc` allocation, so slot addresses never change while
/// any handle is alive.
///
/// 写入者句柄与所有读者句柄共享的状态。
/// 存放在单个 `Arc` 分配中，因此只要任一句柄存活，槽位地址就不会改变。
pub(crate) struct SharedState<T> {
    pub(crate) slots: [Slot<T>; SLOT_COUNT],
    /// Index of the slot readers treat as authoritative. Only the writer stores to it.
    /// 读者视为权威的槽位索引。只有写入者会写入它。
    pub(crate) current: AtomicUsize,
    pub(crate) strategy: WaitStrategy,
    pub(crate) parker: Parker,
}

impl<T> SharedState<T> {
    pub(crate) fn new(initial: T, strategy: WaitStrategy) -> Self
    where
        T: Clone,
    {
        Self {
            slots: [Slot::new(initial.clone()), Slot::new(initial)],
            current: AtomicUsize::new(INITIAL_CURRENT),
            strategy,
            parker: Parker::new(),
        }
    }

    #[inline]
    pub(crate) fn slot(&self, index: usize) -> &Slot<T> {
        &self.slots[index]
    }
}

// SAFETY: slot values are only reached through the reader/writer protocol.
// Readers hand out `&T` across threads (needs `T: Sync`), and the values are
// moved in by the writer and dropped by whichever handle goes last (needs `T: Send`).
unsafe impl<T: Send> Send for SharedState<T> {}
unsafe impl<T: Send + Sync> Sync for SharedState<T> {}
