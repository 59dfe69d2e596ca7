use crate::buffer::SwapBuffer;
use crate::state::SharedState;
use crate::sync::Arc;
use crate::wait::WaitStrategy;
use std::marker::PhantomData;

/// Builder for configuring a [`SwapBuffer`].
///
/// - `wait_strategy`: how the writer waits for the displaced slot to drain
///
/// # Example
/// ```
/// use swmr_buffer::{SwapBuffer, WaitStrategy};
///
/// let mut buffer = SwapBuffer::builder()
///     .wait_strategy(WaitStrategy::Spin)
///     .build(vec![0u8; 16]);
///
/// buffer.write(vec![1u8; 16]);
/// assert_eq!(buffer.read(), vec![1u8; 16]);
/// ```
///
/// 用于配置 [`SwapBuffer`] 的构建器。
pub struct SwapBufferBuilder<T> {
    wait_strategy: WaitStrategy,
    marker: PhantomData<fn() -> T>,
}

impl<T> SwapBufferBuilder<T> {
    /// Create a new builder with default settings.
    /// 创建一个带有默认设置的新构建器。
    #[inline]
    pub fn new() -> Self {
        Self {
            wait_strategy: WaitStrategy::default(),
            marker: PhantomData,
        }
    }

    /// Set the strategy the writer uses while the displaced slot drains.
    ///
    /// Default: [`WaitStrategy::Yield`]
    ///
    /// 设置写入者在被替换槽位清空期间使用的策略。
    #[inline]
    pub fn wait_strategy(mut self, strategy: WaitStrategy) -> Self {
        self.wait_strategy = strategy;
        self
    }

    /// Build the buffer. Both slots start out holding `initial`.
    ///
    /// 构建缓冲区。两个槽位初始都存放 `initial`。
    #[inline]
    pub fn build(self, initial: T) -> SwapBuffer<T>
    where
        T: Clone,
    {
        let shared = Arc::new(SharedState::new(initial, self.wait_strategy));
        SwapBuffer::from_shared(shared)
    }
}

impl<T> Default for SwapBufferBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for SwapBufferBuilder<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for SwapBufferBuilder<T> {}

impl<T> std::fmt::Debug for SwapBufferBuilder<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SwapBufferBuilder")
            .field("wait_strategy", &self.wait_strategy)
            .finish()
    }
}
