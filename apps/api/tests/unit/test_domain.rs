use rand::{SeedableRng, rngs::StdRng};
use sample_app::{
    config::Config,
    domain::simulation::{
        entity::Endpoint,
        simulator::{RandomSimulator, Simulator},
        traffic_mix::TrafficMix,
        value_objects::{LatencyRange, round_to_hundredths},
    },
    workers::traffic_generator::TrafficSettings,
};
use std::time::Duration;

#[test]
fn stock_ranges_match_documented_bounds() {
    assert_eq!((LatencyRange::DATA.min(), LatencyRange::DATA.max()), (0.01, 0.3));
    assert_eq!((LatencyRange::SLOW.min(), LatencyRange::SLOW.max()), (1.5, 3.5));
    assert_eq!(
        (LatencyRange::TRAFFIC_INTERVAL.min(), LatencyRange::TRAFFIC_INTERVAL.max()),
        (0.5, 2.0)
    );
}

#[test]
fn slow_delay_rounds_inside_its_range() {
    let simulator = RandomSimulator::new(0.03).unwrap();
    for _ in 0..500 {
        let delay = round_to_hundredths(simulator.slow_latency().as_secs_f64());
        assert!((1.5..=3.5).contains(&delay), "delay {delay} out of range");
        assert_eq!(round_to_hundredths(delay), delay);
    }
}

#[test]
fn traffic_mix_never_picks_unlisted_endpoints() {
    let mix = TrafficMix::default();
    let mut rng = StdRng::seed_from_u64(5);
    for _ in 0..10_000 {
        let endpoint = mix.choose(&mut rng);
        assert!(matches!(
            endpoint,
            Endpoint::Data | Endpoint::Slow | Endpoint::Error
        ));
    }
}

#[test]
fn traffic_settings_follow_config() {
    let config = Config {
        traffic_base_url: "http://localhost:8000/".to_string(),
        ..Config::default()
    };

    let settings = TrafficSettings::from_config(&config).unwrap();

    assert_eq!(settings.base_url, "http://localhost:8000");
    assert_eq!(settings.startup_delay, Duration::from_secs(10));
    assert_eq!(settings.request_timeout, Duration::from_secs(5));
    assert_eq!(settings.interval, LatencyRange::TRAFFIC_INTERVAL);
    let mut rng = StdRng::seed_from_u64(8);
    assert!((0..1_000).all(|_| settings.mix.choose(&mut rng) != Endpoint::Health));
}
