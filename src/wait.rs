use crate::sync::{AtomicBool, AtomicUsize, Condvar, Mutex, Ordering, spin_loop, yield_now};

/// How the writer waits for the displaced slot to drain after a publish.
///
/// Every strategy preserves the same contract: `write` returns only once no
/// reader is inside the slot it will overwrite next. They differ in what the
/// writer's thread does in the meantime.
///
/// 写入者在发布之后等待被替换槽位清空的方式。
///
/// 每种策略都保持相同的约定：只有当没有读者位于下一次将被覆盖的槽位中时，
/// `write` 才会返回。它们的区别在于写入者线程在此期间做什么。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WaitStrategy {
    /// Busy-poll the reader count with a CPU spin hint.
    ///
    /// Lowest reclaim latency; occupies a core while readers drain.
    /// 使用 CPU 自旋提示忙轮询读者计数。
    Spin,
    /// Poll the reader count, yielding the thread between polls.
    /// 轮询读者计数，在两次轮询之间让出线程。
    #[default]
    Yield,
    /// Block on a condition variable until the last reader leaving the slot
    /// signals it.
    ///
    /// Readers only touch the mutex while a writer is actually parked: the
    /// reader whose decrement brings the displaced slot to zero takes it once
    /// to deliver the wakeup. Reads that finish with no writer parked pay one
    /// extra atomic load.
    ///
    /// 阻塞在条件变量上，直到最后一个离开槽位的读者发出信号。
    /// 只有当写入者确实处于停放状态时，读者才会接触互斥锁：将被替换槽位计数减到零的读者
    /// 获取一次锁以发送唤醒。没有写入者停放时，读取结束只多一次原子加载。
    Park,
}

/// Condition variable pairing for [`WaitStrategy::Park`].
pub(crate) struct Parker {
    pub(crate) lock: Mutex<()>,
    var: Condvar,
    /// Set by the writer, under `lock`, while it waits on `var`.
    /// 写入者在 `var` 上等待期间（持有 `lock` 时）置位。
    pub(crate) parked: AtomicBool,
}

impl Parker {
    pub(crate) fn new() -> Self {
        Self {
            lock: Mutex::new(()),
            var: Condvar::new(),
            parked: AtomicBool::new(false),
        }
    }

    /// Called by a reader whose decrement took a count to zero.
    ///
    /// The decrement must be an acquire read-modify-write. If it lands after
    /// the writer's count check, it synchronizes with that check and sees
    /// `parked`; if it lands before, the writer sees the zero itself.
    #[inline]
    pub(crate) fn notify_if_parked(&self) {
        if self.parked.load(Ordering::Acquire) {
            self.notify();
        }
    }

    /// Wake the writer.
    ///
    /// Taking the lock orders this call after the writer's check-then-wait,
    /// so a decrement the writer missed is always followed by a wakeup.
    #[inline]
    fn notify(&self) {
        drop(self.lock.lock());
        self.var.notify_all();
    }

    /// Block until `readers` is zero. Returns the number of wakeups.
    pub(crate) fn wait_until_idle(&self, readers: &AtomicUsize) -> usize {
        let mut guard = self.lock.lock();
        // Published to readers by the release half of the count checks below.
        self.parked.store(true, Ordering::Relaxed);

        let mut wakeups = 0;
        while readers.fetch_add(0, Ordering::AcqRel) != 0 {
            guard = self.var.wait(guard);
            wakeups += 1;
        }

        self.parked.store(false, Ordering::Relaxed);
        drop(guard);
        wakeups
    }
}

/// Poll `readers` until it reaches zero, running `relax` between polls.
/// Returns the number of polls that saw a non-zero count.
#[inline]
pub(crate) fn poll_until_idle(readers: &AtomicUsize, relax: fn()) -> usize {
    let mut polls = 0;
    while readers.load(Ordering::Acquire) != 0 {
        relax();
        polls += 1;
    }
    polls
}

impl WaitStrategy {
    /// Wait for `readers` to drain using this strategy.
    pub(crate) fn wait(self, readers: &AtomicUsize, parker: &Parker) -> usize {
        match self {
            WaitStrategy::Spin => poll_until_idle(readers, spin_loop),
            WaitStrategy::Yield => poll_until_idle(readers, yield_now),
            WaitStrategy::Park => parker.wait_until_idle(readers),
        }
    }
}
