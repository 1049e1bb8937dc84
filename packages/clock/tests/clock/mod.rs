use std::time::Duration;

use swarm_canary_clock::clock::stopped::Stopped as _;
use swarm_canary_clock::clock::Time;

use crate::CurrentClock;

#[test]
fn it_should_use_stopped_time_for_testing() {
    assert_eq!(CurrentClock::dbg_clock_type(), "Stopped".to_owned());

    let time = CurrentClock::now();
    std::thread::sleep(Duration::from_millis(50));
    let time_2 = CurrentClock::now();

    assert_eq!(time, time_2);
}

#[test]
fn it_should_move_the_stopped_time_forward_from_the_app_start_time() {
    CurrentClock::local_set_to_app_start_time();
    let start = CurrentClock::now();

    CurrentClock::local_add(&Duration::from_secs(120)).unwrap();

    assert_eq!(CurrentClock::now(), start + Duration::from_secs(120));
}
