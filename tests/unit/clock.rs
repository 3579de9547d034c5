use super::*;
use crate::foundation::error::SketchError;

#[test]
fn frame_limit_bounds_the_run() {
    let mut clock = FrameClock::new(Fps::default(), Pacing::Unthrottled).with_frame_limit(Some(7));
    let mut seen = Vec::new();
    let stats = clock
        .run(|t| {
            seen.push(t.index.0);
            Ok(())
        })
        .unwrap();
    assert_eq!(stats.ticks, 7);
    assert_eq!(stats.dropped, 0);
    assert_eq!(seen, (0..7).collect::<Vec<_>>());
}

#[test]
fn stop_from_inside_the_callback_ends_after_that_tick() {
    let mut clock = FrameClock::new(Fps::default(), Pacing::Unthrottled);
    let handle = clock.handle();
    let stats = clock
        .run(|t| {
            if t.index.0 == 3 {
                handle.stop();
            }
            Ok(())
        })
        .unwrap();
    assert_eq!(stats.ticks, 4);
    assert!(clock.handle().is_stopped());
}

#[test]
fn stop_from_another_thread() {
    let mut clock = FrameClock::new(Fps::per_second(200).unwrap(), Pacing::RealTime);
    let handle = clock.handle();
    let stopper = std::thread::spawn(move || {
        std::thread::sleep(Duration::from_millis(50));
        handle.stop();
    });
    let stats = clock.run(|_| Ok(())).unwrap();
    stopper.join().unwrap();
    assert!(stats.ticks >= 1);
    assert!(stats.elapsed >= Duration::from_millis(40));
}

#[test]
fn real_time_pacing_spaces_ticks() {
    let mut clock =
        FrameClock::new(Fps::per_second(100).unwrap(), Pacing::RealTime).with_frame_limit(Some(5));
    let mut stamps = Vec::new();
    clock
        .run(|t| {
            stamps.push(t.elapsed);
            Ok(())
        })
        .unwrap();
    // Ticks 0..=4 at 10ms spacing: the last one is due at 40ms.
    assert!(stamps[4] >= Duration::from_millis(39));
}

#[test]
fn overrunning_frames_are_counted_as_dropped() {
    let mut clock =
        FrameClock::new(Fps::per_second(1000).unwrap(), Pacing::RealTime).with_frame_limit(Some(3));
    let stats = clock
        .run(|_| {
            std::thread::sleep(Duration::from_millis(5));
            Ok(())
        })
        .unwrap();
    assert_eq!(stats.ticks, 3);
    assert!(stats.dropped >= 2);
}

#[test]
fn callback_error_stops_the_clock() {
    let mut clock = FrameClock::new(Fps::default(), Pacing::Unthrottled);
    let err = clock
        .run(|t| {
            if t.index.0 == 2 {
                Err(SketchError::render("boom"))
            } else {
                Ok(())
            }
        })
        .unwrap_err();
    assert!(err.to_string().contains("boom"));
    assert!(clock.handle().is_stopped());
}

#[test]
fn never_reentered() {
    use std::sync::atomic::AtomicUsize;
    let in_flight = AtomicUsize::new(0);
    let mut clock = FrameClock::new(Fps::default(), Pacing::Unthrottled).with_frame_limit(Some(50));
    clock
        .run(|_| {
            assert_eq!(in_flight.fetch_add(1, Ordering::SeqCst), 0);
            in_flight.fetch_sub(1, Ordering::SeqCst);
            Ok(())
        })
        .unwrap();
}
