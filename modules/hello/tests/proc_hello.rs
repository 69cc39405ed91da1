use kapi::{
    printk::{DmesgRecord, dmesg},
    proc_fs::{self, Access},
};
use kmod::{LinuxError, Module, printk::Level};
use spin::Mutex;

// The module state is global, so tests take turns loading it.
static SERIAL: Mutex<()> = Mutex::new(());

fn with_module<F: FnOnce()>(f: F) {
    let _ = env_logger::builder().is_test(true).try_init();
    let _serial = SERIAL.lock();
    let mut module = Module::new(Some(hello::init_module), Some(hello::cleanup_module));
    module.call_init().unwrap();
    f();
    module.call_exit().unwrap();
}

fn write(data: &[u8]) -> usize {
    proc_fs::open("hello", Access::Write)
        .unwrap()
        .write(data)
        .unwrap()
}

fn read(count: usize) -> Vec<u8> {
    let mut buf = vec![0xffu8; count];
    let n = proc_fs::open("hello", Access::Read)
        .unwrap()
        .read(&mut buf)
        .unwrap();
    buf.truncate(n);
    buf
}

#[test]
fn test_write_then_read_pads_with_zeros() {
    with_module(|| {
        assert_eq!(write(b"hello world"), 11);
        let out = read(20);
        assert_eq!(out.len(), 20);
        assert_eq!(&out[..11], b"hello world");
        assert_eq!(&out[11..], &[0u8; 9]);
    });
}

#[test]
fn test_overlong_write_is_truncated() {
    with_module(|| {
        assert_eq!(write(&[b'A'; 1500]), 1000);
        assert_eq!(read(1000), vec![b'A'; 1000]);
        assert_eq!(read(4096).len(), hello::MAX_STR_LEN);
    });
}

#[test]
fn test_second_write_clears_first() {
    with_module(|| {
        write(b"foo");
        write(b"ba");
        assert_eq!(read(3), b"ba\0");
    });
}

#[test]
fn test_empty_write_clears_buffer() {
    with_module(|| {
        write(b"something");
        assert_eq!(write(b""), 0);
        assert!(read(1000).iter().all(|&b| b == 0));
    });
}

#[test]
fn test_reads_ignore_position() {
    with_module(|| {
        write(b"abc");
        let mut f = proc_fs::open("hello", Access::ReadWrite).unwrap();
        let mut first = [0u8; 3];
        let mut second = [0u8; 3];
        assert_eq!(f.read(&mut first), Ok(3));
        assert_eq!(f.read(&mut second), Ok(3));
        assert_eq!(first, second);
        assert_eq!(f.pos(), 0);
    });
}

#[test]
fn test_reader_never_sees_a_mixed_buffer() {
    with_module(|| {
        write(&[b'A'; 1000]);
        std::thread::scope(|s| {
            for fill in [b'A', b'B'] {
                s.spawn(move || {
                    let data = [fill; 1000];
                    let mut f = proc_fs::open("hello", Access::Write).unwrap();
                    for _ in 0..200 {
                        assert_eq!(f.write(&data), Ok(1000));
                    }
                });
            }
            s.spawn(|| {
                let mut f = proc_fs::open("hello", Access::Read).unwrap();
                let mut buf = [0u8; 1000];
                for _ in 0..400 {
                    assert_eq!(f.read(&mut buf), Ok(1000));
                    let first = buf[0];
                    assert!(first == b'A' || first == b'B', "read {:#x}", first);
                    assert!(buf.iter().all(|&b| b == first));
                }
            });
        });
    });
}

#[test]
fn test_entry_lifecycle() {
    let _ = env_logger::builder().is_test(true).try_init();
    let _serial = SERIAL.lock();
    assert_eq!(
        proc_fs::open("hello", Access::Read).err(),
        Some(LinuxError::ENOENT)
    );

    let mut module = Module::new(Some(hello::init_module), Some(hello::cleanup_module));
    module.call_init().unwrap();
    let entries = proc_fs::entries();
    let (_, mode) = entries.iter().find(|(name, _)| name == "hello").unwrap();
    assert_eq!(mode.bits(), 0o666);
    let mut stale = proc_fs::open("hello", Access::Read).unwrap();

    // A second load collides with the live entry.
    let mut again = Module::new(Some(hello::init_module), None);
    assert_eq!(again.call_init(), Err(LinuxError::ENOMEM));

    module.call_exit().unwrap();
    assert_eq!(
        proc_fs::open("hello", Access::Read).err(),
        Some(LinuxError::ENOENT)
    );
    let mut buf = [0u8; 4];
    assert_eq!(stale.read(&mut buf), Err(LinuxError::EIO));
}

#[test]
fn test_load_and_unload_are_logged() {
    let _ = env_logger::builder().is_test(true).try_init();
    let _serial = SERIAL.lock();
    let info = |text: &str| DmesgRecord {
        level: Level::Info,
        text: text.to_string(),
    };

    let mut module = Module::new(Some(hello::init_module), Some(hello::cleanup_module));
    module.call_init().unwrap();
    assert_eq!(dmesg().last(), Some(&info("Initializing module.")));
    module.call_exit().unwrap();
    assert_eq!(dmesg().last(), Some(&info("Cleaning up module.")));
}
