/// 边界情况测试模块
/// 测试特殊数据类型、句柄生命周期和分配复用
use crate::SwapBuffer;
use crate::sync::Ordering;
use std::thread;

/// 测试1: 零大小类型
#[test]
fn test_zero_sized_type() {
    #[derive(Clone, Debug, PartialEq)]
    struct ZeroSized;

    let mut buffer = SwapBuffer::new(ZeroSized);
    assert_eq!(buffer.read(), ZeroSized);

    buffer.write(ZeroSized);
    assert_eq!(buffer.reader().read(), ZeroSized);
}

/// 测试2: 大型数据结构
#[test]
fn test_large_data_structure() {
    #[derive(Clone)]
    struct LargeData {
        data: Box<[u64; 4096]>,
    }

    let mut buffer = SwapBuffer::new(LargeData {
        data: Box::new([42; 4096]),
    });
    assert_eq!(buffer.read_with(|d| d.data[4095]), 42);

    buffer.write(LargeData {
        data: Box::new([7; 4096]),
    });
    assert_eq!(buffer.read_with(|d| (d.data[0], d.data[4095])), (7, 7));
}

/// 测试3: 写入者 drop 之后读者仍可读取最后发布的值
#[test]
fn test_reader_outlives_writer() {
    let mut buffer = SwapBuffer::new(String::from("first"));
    let reader = buffer.reader();

    buffer.write(String::from("last"));
    drop(buffer);

    assert_eq!(reader.read(), "last");
    assert_eq!(reader.try_read().as_deref(), Some("last"));

    let handle = thread::spawn(move || reader.read());
    assert_eq!(handle.join().unwrap(), "last");
}

/// 测试4: 写入同一个值
#[test]
fn test_write_same_value_repeatedly() {
    let mut buffer = SwapBuffer::new(5u8);

    for _ in 0..10 {
        buffer.write(5);
        assert_eq!(buffer.read(), 5);
    }
    assert_eq!(buffer.writes(), 10);
}

/// 测试5: write_clone 复用待写槽位中的分配
#[test]
fn test_write_clone_reuses_pending_allocation() {
    let mut buffer = SwapBuffer::new(String::with_capacity(256));
    let pending = buffer.pending;

    let before = buffer.shared.slots[pending]
        .value
        .with(|ptr| unsafe { ((*ptr).as_ptr(), (*ptr).capacity()) });
    assert!(before.1 >= 256);

    buffer.write_clone(&String::from("short"));

    let after = buffer.shared.slots[pending]
        .value
        .with(|ptr| unsafe { ((*ptr).as_ptr(), (*ptr).capacity()) });
    assert_eq!(before, after);
    assert_eq!(buffer.read(), "short");
}

/// 测试6: 多个读取句柄与写入者读取
#[test]
fn test_many_reader_handles() {
    let mut buffer = SwapBuffer::new(0i32);
    let readers: Vec<_> = (0..32).map(|_| buffer.reader()).collect();

    buffer.write(-1);

    for reader in &readers {
        assert_eq!(reader.read(), -1);
    }
    for slot in buffer.shared.slots.iter() {
        assert_eq!(slot.readers.load(Ordering::Relaxed), 0);
    }
}

/// 测试7: 嵌套读取不会阻塞
#[test]
fn test_nested_reads() {
    let buffer = SwapBuffer::new(3u32);
    let reader = buffer.reader();

    let sum = reader.read_with(|outer| reader.read_with(|inner| outer + inner));
    assert_eq!(sum, 6);
}
