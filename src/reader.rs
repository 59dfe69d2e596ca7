use crate::state::{SharedState, Slot};
use crate::sync::{Arc, Ordering, spin_loop};
use crate::wait::WaitStrategy;

impl<T> SharedState<T> {
    /// One attempt at entering the live slot.
    ///
    /// Increments the reader count of the slot `current` names, then checks
    /// that `current` still names it. On a mismatch the returned guard is
    /// dropped here, which undoes the increment.
    ///
    /// 一次进入活跃槽位的尝试。
    ///
    /// 先增加 `current` 所指槽位的读者计数，然后检查 `current` 是否仍指向它。
    /// 若不一致，守卫在此处被 drop，从而撤销该次增加。
    #[inline]
    pub(crate) fn try_enter(&self) -> Option<SlotGuard<'_, T>> {
        // Advisory: only picks which count to raise.
        let index = self.current.load(Ordering::Relaxed);

        // Acquire pairs with the writer's read-modify-write of this count, so
        // a publish the writer made before checking the count is visible below.
        self.slot(index).readers.fetch_add(1, Ordering::Acquire);
        let guard = SlotGuard {
            shared: self,
            index,
        };

        // Commit: pairs with the writer's publish, making the slot contents visible.
        if self.current.load(Ordering::Acquire) == index {
            Some(guard)
        } else {
            None
        }
    }

    /// Enter the live slot, retrying until no publish races the attempt.
    /// 进入活跃槽位，重试直到没有发布操作与该尝试发生竞争。
    #[inline]
    pub(crate) fn enter(&self) -> SlotGuard<'_, T> {
        loop {
            if let Some(guard) = self.try_enter() {
                return guard;
            }
            spin_loop();
        }
    }
}

/// Keeps one slot's reader count raised for as long as it is alive.
///
/// The decrement lives in `Drop` so it also runs when the value's `Clone`
/// or a `read_with` closure unwinds.
///
/// 在其存活期间保持一个槽位的读者计数处于增加状态。
/// 减少操作位于 `Drop` 中，因此当值的 `Clone` 或 `read_with` 闭包发生 unwind 时也会执行。
#[must_use]
pub(crate) struct SlotGuard<'a, T> {
    shared: &'a SharedState<T>,
    index: usize,
}

impl<'a, T> SlotGuard<'a, T> {
    #[inline]
    fn slot(&self) -> &'a Slot<T> {
        self.shared.slot(self.index)
    }

    /// Run `f` against the protected value.
    #[inline]
    pub(crate) fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        self.slot().value.with(|ptr| {
            // SAFETY: the raised count stops the writer from reusing this slot,
            // and the acquire re-check of `current` ordered the writer's last
            // store to it before this access.
            f(unsafe { &*ptr })
        })
    }
}

impl<'a, T> Drop for SlotGuard<'a, T> {
    #[inline]
    fn drop(&mut self) {
        // Acquire half pairs with a parked writer's count check; see `Parker`.
        let previous = self.slot().readers.fetch_sub(1, Ordering::AcqRel);

        debug_assert!(
            previous > 0,
            "BUG: reader count underflow on slot {}. \
             This indicates a library bug.",
            self.index
        );

        if previous == 1 && self.shared.strategy == WaitStrategy::Park {
            self.shared.parker.notify_if_parked();
        }
    }
}

/// A cloneable read handle for a [`SwapBuffer`](crate::SwapBuffer).
///
/// `Reader` is `Clone`, `Send` and `Sync` (for `T: Send + Sync`); hand a
/// clone to every thread that needs the latest published value. Reads never
/// wait for the writer. The only lock a reader may touch is the one used to
/// wake a writer parked under [`WaitStrategy::Park`](crate::WaitStrategy::Park).
///
/// 一个可克隆的 [`SwapBuffer`](crate::SwapBuffer) 读取句柄。
///
/// 当 `T: Send + Sync` 时，`Reader` 是 `Clone`、`Send` 和 `Sync` 的；
/// 把它的克隆交给每个需要最新发布值的线程。读取从不等待写入者。
/// 读者唯一可能接触的锁，是用于唤醒在 `WaitStrategy::Park` 下停放的写入者的那把锁。
pub struct Reader<T> {
    pub(crate) shared: Arc<SharedState<T>>,
}

impl<T> Reader<T> {
    /// Run `f` against the value that is live when the read begins.
    ///
    /// The slot stays protected while `f` runs, so a write issued meanwhile
    /// publishes without blocking but does not return until `f` finishes.
    /// Keep `f` short.
    ///
    /// 对读取开始时的活跃值运行 `f`。
    /// `f` 运行期间该槽位保持受保护状态，因此期间发出的写入可以发布但不会阻塞，
    /// 然而要等 `f` 结束后才会返回。请保持 `f` 简短。
    #[inline]
    pub fn read_with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        self.shared.enter().with(f)
    }
}

impl<T: Clone> Reader<T> {
    /// Return a copy of the latest published value.
    ///
    /// The copy is of a value that was live at some instant during the call,
    /// never a mix of two writes.
    ///
    /// 返回最新发布值的副本。
    /// 该副本是调用期间某一时刻的活跃值，绝不是两次写入的混合。
    #[inline]
    pub fn read(&self) -> T {
        self.read_with(T::clone)
    }

    /// Single read attempt. Returns `None` if a publish raced it.
    ///
    /// With no write in flight this always returns `Some`.
    ///
    /// 单次读取尝试。如果有发布操作与其竞争，返回 `None`。
    /// 没有进行中的写入时总是返回 `Some`。
    #[inline]
    pub fn try_read(&self) -> Option<T> {
        self.shared.try_enter().map(|guard| guard.with(T::clone))
    }
}

impl<T> Clone for Reader<T> {
    #[inline]
    fn clone(&self) -> Self {
        Self {
            shared: self.shared.clone(),
        }
    }
}

impl<T> std::fmt::Debug for Reader<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reader")
            .field("current", &self.shared.current.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}
