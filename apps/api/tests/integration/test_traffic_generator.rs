use super::helpers::{serve, spawn_app};
use rand::{SeedableRng, rngs::StdRng};
use sample_app::{
    domain::simulation::{traffic_mix::TrafficMix, value_objects::LatencyRange},
    workers::traffic_generator::{TrafficGenerator, TrafficSettings},
};
use std::time::{Duration, Instant};

#[tokio::test]
async fn generated_traffic_flows_through_instrumentation() {
    let app = spawn_app();
    let base_url = serve(app.app.clone()).await;

    let settings = TrafficSettings {
        base_url,
        mix: TrafficMix::default(),
        startup_delay: Duration::ZERO,
        interval: LatencyRange::from_millis(1, 3).unwrap(),
        request_timeout: Duration::from_secs(5),
    };
    let handle = TrafficGenerator::new(settings, StdRng::seed_from_u64(99))
        .expect("failed to build generator")
        .spawn();

    let total = |metrics: &sample_app::infrastructure::monitoring::MetricsService| {
        metrics.request_count("GET", "/api/data", 200)
            + metrics.request_count("GET", "/api/slow", 200)
            + metrics.request_count("GET", "/api/error", 500)
    };

    let deadline = Instant::now() + Duration::from_secs(10);
    while total(&app.metrics) < 40 && Instant::now() < deadline {
        tokio::time::sleep(Duration::from_millis(20)).await;
    }

    tokio::time::timeout(Duration::from_secs(5), handle.stop())
        .await
        .expect("generator did not stop");

    assert!(total(&app.metrics) >= 40, "only {} generated requests", total(&app.metrics));
    assert!(app.metrics.request_count("GET", "/api/data", 200) > 0);
    assert_eq!(app.metrics.request_count("GET", "/", 200), 0);
    assert_eq!(app.metrics.request_count("GET", "/health", 200), 0);
}
