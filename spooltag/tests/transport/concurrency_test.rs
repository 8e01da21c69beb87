use std::thread;
use std::time::{Duration, Instant};

use spooltag::TransportError;
use spooltag::test_support::open_mock_transport;

#[test]
fn second_concurrent_command_is_rejected_with_busy() {
    let (transport, _mock) = open_mock_transport(vec![]);

    thread::scope(|s| {
        let first = s.spawn(|| transport.send_command(0x02, &[], Duration::from_millis(500)));

        // let the first call claim the in-flight slot
        thread::sleep(Duration::from_millis(100));

        let second = transport.send_command(0x02, &[], Duration::from_millis(100));
        assert_eq!(second, Err(TransportError::Busy));

        // the first call still runs to its own timeout, untouched
        assert_eq!(first.join().unwrap(), Err(TransportError::Timeout));
    });

    // slot is free again afterwards
    assert_eq!(
        transport.send_command(0x02, &[], Duration::from_millis(50)),
        Err(TransportError::Timeout)
    );
}

#[test]
fn close_unblocks_inflight_call_with_cancelled() {
    let (transport, mock) = open_mock_transport(vec![]);

    thread::scope(|s| {
        let inflight = s.spawn(|| transport.send_command(0x02, &[], Duration::from_secs(10)));

        thread::sleep(Duration::from_millis(100));
        let closed_at = Instant::now();
        transport.close();

        let result = inflight.join().unwrap();
        assert_eq!(result, Err(TransportError::Cancelled));
        // unblocked immediately, not after the 10s timeout
        assert!(closed_at.elapsed() < Duration::from_millis(500));
    });

    assert!(!transport.is_open());
    assert!(mock.is_closed());
}

#[test]
fn close_unblocks_inflight_block_read() {
    let (transport, _mock) = open_mock_transport(vec![]);

    thread::scope(|s| {
        let inflight = s.spawn(|| transport.read_block(4, 4, Duration::from_secs(10)));
        thread::sleep(Duration::from_millis(100));
        transport.close();
        assert_eq!(inflight.join().unwrap(), Err(TransportError::Cancelled));
    });
}

#[test]
fn sequential_commands_reuse_the_port() {
    use crate::common::fixtures::firmware_exchange;

    let (transport, _mock) = open_mock_transport(vec![firmware_exchange(), firmware_exchange()]);

    for _ in 0..2 {
        let payload = transport
            .send_command(0x02, &[], Duration::from_secs(1))
            .unwrap();
        assert_eq!(payload[0], 0x03);
    }
}
