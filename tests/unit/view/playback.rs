use super::*;

#[test]
fn interval_scales_with_speed() {
    assert_eq!(Playback::new(1.0).unwrap().interval(), Duration::from_millis(100));
    assert_eq!(Playback::new(2.0).unwrap().interval(), Duration::from_millis(50));
    assert_eq!(Playback::new(0.5).unwrap().interval(), Duration::from_millis(200));
}

#[test]
fn invalid_speed_is_rejected() {
    assert!(Playback::new(0.0).is_err());
    assert!(Playback::new(-1.0).is_err());
    assert!(Playback::new(f64::NAN).is_err());
    let mut p = Playback::default();
    assert!(p.set_speed(f64::INFINITY, Instant::now()).is_err());
    assert_eq!(p.speed(), 1.0);
}

#[test]
fn tiny_speeds_are_rejected_instead_of_overflowing_interval() {
    assert!(Playback::new(1e-300).is_err());
    assert!(Playback::new(f64::MIN_POSITIVE).is_err());
    assert!(Playback::new(MIN_SPEED / 2.0).is_err());

    let slowest = Playback::new(MIN_SPEED).unwrap();
    assert!((slowest.interval().as_secs_f64() - 100.0).abs() < 1e-6);

    let mut p = Playback::default();
    assert!(p.set_speed(1e-300, Instant::now()).is_err());
    assert_eq!(p.interval(), Duration::from_millis(100));
}

#[test]
fn stopped_timer_never_ticks() {
    let mut p = Playback::default();
    let t0 = Instant::now();
    assert!(!p.poll(t0 + Duration::from_secs(10)));
}

#[test]
fn at_most_one_tick_per_poll() {
    let mut p = Playback::default();
    let t0 = Instant::now();
    p.start(t0);
    assert!(!p.poll(t0 + Duration::from_millis(50)));
    assert!(p.poll(t0 + Duration::from_millis(100)));
    // a long stall still yields a single tick
    assert!(p.poll(t0 + Duration::from_millis(1_000)));
    assert!(!p.poll(t0 + Duration::from_millis(1_050)));
}

#[test]
fn speed_change_restarts_running_timer() {
    let mut p = Playback::default();
    let t0 = Instant::now();
    p.start(t0);
    let t1 = t0 + Duration::from_millis(90);
    p.set_speed(2.0, t1).unwrap();
    assert!(p.is_playing());
    assert!(!p.poll(t0 + Duration::from_millis(100)));
    assert!(p.poll(t1 + Duration::from_millis(50)));
}

#[test]
fn toggle_flips_state() {
    let mut p = Playback::default();
    let t0 = Instant::now();
    p.toggle(t0);
    assert!(p.is_playing());
    p.toggle(t0);
    assert!(!p.is_playing());
}
