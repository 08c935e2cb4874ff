use busline::{init_logging, EventBus, EventBusConfig, Listener};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tempfile::TempDir;

#[test]
fn test_init_logging_installs_once() {
    assert!(init_logging().is_ok());
    // a global subscriber is already set
    assert!(init_logging().is_err());
}

#[test]
fn test_bus_from_config_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("busline.toml");
    std::fs::write(&path, "prune_empty_keys = true\ntrace_dispatch = true\n").unwrap();

    let bus: EventBus<u32> = EventBus::with_config(EventBusConfig::load_from_file(&path).unwrap());
    let count = Arc::new(AtomicUsize::new(0));
    let count_clone = count.clone();
    bus.once(
        "job:done",
        &Listener::new(move |payload: Option<&u32>| {
            count_clone.fetch_add(payload.copied().unwrap_or(0) as usize, Ordering::SeqCst);
        }),
    );

    bus.emit("job:done", Some(&5));
    bus.emit("job:done", Some(&5));

    assert_eq!(count.load(Ordering::SeqCst), 5);
    assert!(bus.is_empty());
}
