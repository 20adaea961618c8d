use super::*;
use std::thread;

#[test]
fn test_clock_expiry_cancels_poll() {
    let mut clock = SearchClock::new(None);
    clock.start(Some(Duration::from_millis(10)));
    assert!(clock.poll(0).is_ok());

    // Wait for time to expire
    thread::sleep(Duration::from_millis(20));
    assert!(!clock.has_time());
    assert_eq!(clock.poll(0), Err(Cancelled));
    assert!(clock.is_stopped());
    assert_eq!(clock.remaining(), Some(Duration::ZERO));
}

#[test]
fn test_clock_only_reads_time_on_interval() {
    let mut clock = SearchClock::new(None);
    clock.start(Some(Duration::ZERO));
    // Off-interval polls only look at the stop flag.
    assert!(clock.poll(1).is_ok());
    assert!(clock.poll(64).is_err());
    // Once stopped every poll fails.
    assert!(clock.poll(1).is_err());
}

#[test]
fn test_clock_no_limit() {
    let mut clock = SearchClock::new(None);
    clock.start(None);
    thread::sleep(Duration::from_millis(10));
    assert!(clock.poll(0).is_ok());
    assert!(clock.has_time());
    assert_eq!(clock.remaining(), None);
}

#[test]
fn test_disarmed_clock_ignores_deadline_but_not_stop() {
    let mut clock = SearchClock::new(None);
    clock.start(Some(Duration::ZERO));
    clock.disarm();
    assert!(clock.poll(0).is_ok());

    clock.stop_handle().stop();
    assert_eq!(clock.poll(0), Err(Cancelled));

    clock.start(Some(Duration::from_secs(60)));
    assert!(clock.poll(0).is_ok());
}

#[test]
fn test_stop_handle_from_other_thread() {
    let mut clock = SearchClock::new(None);
    clock.start(None);
    let handle = clock.stop_handle();
    thread::spawn(move || handle.stop()).join().unwrap();
    assert!(clock.is_stopped());
    assert!(!clock.has_time());
}
