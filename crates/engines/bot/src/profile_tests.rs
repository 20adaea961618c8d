use super::*;

#[test]
fn test_internal_settings_per_level() {
    let table = [
        (1, 2, 500, false, 0.3),
        (2, 4, 1_000, false, 0.0),
        (3, 10, 5_000, true, 0.0),
        (4, 10, 5_000, true, 0.0),
        (5, 10, 5_000, true, 0.0),
    ];
    for (level, depth, millis, book, odds) in table {
        let p = StrengthProfile::for_level(level);
        assert_eq!(p.level as i32, level);
        assert_eq!(p.max_depth, depth);
        assert_eq!(p.budget, Duration::from_millis(millis));
        assert_eq!(p.use_book, book);
        assert_eq!(p.random_odds, odds);
    }
}

#[test]
fn test_external_tuning_per_level() {
    let beginner = StrengthProfile::for_level(1).external;
    assert_eq!(beginner.threads, 1);
    assert_eq!(beginner.hash_mb, 16);
    assert_eq!(beginner.skill_level, 5);
    assert_eq!(beginner.elo_cap, Some(1200));
    assert_eq!(beginner.depth, 5);

    let intermediate = StrengthProfile::for_level(2).external;
    assert_eq!(intermediate.elo_cap, Some(1800));
    assert_eq!(intermediate.hash_mb, 64);

    let master = StrengthProfile::for_level(4).external;
    assert_eq!(master.hash_mb, 256);
    assert_eq!(master.move_overhead_ms, 80);
    assert_eq!(master.depth, 15);
    assert_eq!(master.elo_cap, None);

    let top = StrengthProfile::for_level(5).external;
    assert_eq!(top.move_overhead_ms, 100);
    assert_eq!(top.move_time, Duration::from_secs(5));
}

#[test]
fn test_levels_are_clamped() {
    assert_eq!(StrengthProfile::for_level(-3), StrengthProfile::for_level(1));
    assert_eq!(StrengthProfile::for_level(0).level, 1);
    assert_eq!(StrengthProfile::for_level(99), StrengthProfile::for_level(5));
}

#[test]
fn test_cap_limits_every_budget() {
    let p = StrengthProfile::for_level(5).capped(Some(Duration::from_millis(200)));
    assert_eq!(p.budget, Duration::from_millis(200));
    assert_eq!(p.external.move_time, Duration::from_millis(200));

    let uncapped = StrengthProfile::for_level(1).capped(Some(Duration::from_secs(10)));
    assert_eq!(uncapped.budget, Duration::from_millis(500));

    let limits = StrengthProfile::for_level(3).limits();
    assert_eq!(limits.max_depth, 10);
    assert!(limits.use_book);
}
