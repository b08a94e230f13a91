// Unit tests for business rules

use super::*;

fn budget_8mb() -> SizeBudget {
    SizeBudget::from_megabytes(8)
}

#[test]
fn test_initial_bitrates_split_budget() {
    // 8 MiB over 60s: 67108864 bits / 60000 = 1118.48 kbps total
    let bitrates = BitratePlanner::initial_bitrates(budget_8mb(), 60.0, 128.0).unwrap();
    assert!((bitrates.video_kbps - (67_108_864.0 / 60_000.0 - 128.0)).abs() < 1e-9);
    assert_eq!(bitrates.audio_kbps, 128.0);
    assert_eq!(bitrates.video_arg(), "990k");
}

#[test]
fn test_initial_bitrates_reject_bad_duration() {
    assert!(BitratePlanner::initial_bitrates(budget_8mb(), 0.0, 128.0).is_err());
    assert!(BitratePlanner::initial_bitrates(budget_8mb(), -3.0, 128.0).is_err());
    assert!(BitratePlanner::initial_bitrates(budget_8mb(), f64::NAN, 128.0).is_err());
    assert!(BitratePlanner::initial_bitrates(budget_8mb(), f64::INFINITY, 128.0).is_err());
}

#[test]
fn test_schedule_decays_geometrically() {
    let schedule =
        BitrateSchedule::new(Bitrates::new(4000.0, 128.0), BitrateFloor::default(), 0.9).unwrap();
    let steps: Vec<Bitrates> = schedule.collect();

    assert!(!steps.is_empty());
    for pair in steps.windows(2) {
        assert!(pair[1].video_kbps < pair[0].video_kbps);
        assert!(pair[1].audio_kbps < pair[0].audio_kbps);
        assert!((pair[1].video_kbps - pair[0].video_kbps * 0.9).abs() < 1e-9);
        assert!((pair[1].audio_kbps - pair[0].audio_kbps * 0.9).abs() < 1e-9);
    }
}

#[test]
fn test_schedule_stops_at_audio_floor() {
    // 128 * 0.9^6 = 68.02 is the last audio rate above 64
    let schedule =
        BitrateSchedule::new(Bitrates::new(100_000.0, 128.0), BitrateFloor::default(), 0.9)
            .unwrap();
    let steps: Vec<Bitrates> = schedule.collect();
    assert_eq!(steps.len(), 7);
    assert!(steps.last().unwrap().audio_kbps > 64.0);
}

#[test]
fn test_schedule_stops_at_video_floor() {
    // 600 -> 540 -> 486: two attempts before the floor
    let schedule =
        BitrateSchedule::new(Bitrates::new(600.0, 128.0), BitrateFloor::default(), 0.9).unwrap();
    assert_eq!(schedule.count(), 2);
}

#[test]
fn test_schedule_empty_when_starting_below_floor() {
    let schedule =
        BitrateSchedule::new(Bitrates::new(-50.0, 128.0), BitrateFloor::default(), 0.9).unwrap();
    assert_eq!(schedule.count(), 0);
}

#[test]
fn test_schedule_rejects_bad_decay() {
    let initial = Bitrates::new(1000.0, 128.0);
    assert!(BitrateSchedule::new(initial, BitrateFloor::default(), 1.0).is_err());
    assert!(BitrateSchedule::new(initial, BitrateFloor::default(), 0.0).is_err());
    assert!(BitrateSchedule::new(initial, BitrateFloor::default(), f64::NAN).is_err());
}
