use crate::{
    config::Config,
    domain::simulation::{
        entity::Endpoint, traffic_mix::TrafficMix, value_objects::LatencyRange,
    },
};
use rand::{Rng, SeedableRng, rngs::StdRng};
use std::time::Duration;
use tokio::{sync::watch, task::JoinHandle};

/// Timing and targeting of the generated traffic.
#[derive(Debug, Clone)]
pub struct TrafficSettings {
    pub base_url: String,
    pub mix: TrafficMix,
    pub startup_delay: Duration,
    pub interval: LatencyRange,
    pub request_timeout: Duration,
}

impl TrafficSettings {
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        Ok(Self {
            base_url: config.traffic_base_url.trim_end_matches('/').to_string(),
            mix: TrafficMix::default(),
            startup_delay: Duration::from_secs(config.traffic_startup_delay_seconds),
            interval: LatencyRange::from_millis(
                config.traffic_min_interval_ms,
                config.traffic_max_interval_ms,
            )?,
            request_timeout: Duration::from_secs(config.traffic_request_timeout_seconds),
        })
    }
}

/// Sends a steady trickle of requests at the service itself so dashboards always have data.
///
/// Every outcome of a generated request is discarded: connection failures, timeouts and
/// 5xx answers are neither logged nor retried.
pub struct TrafficGenerator<R = StdRng> {
    client: reqwest::Client,
    settings: TrafficSettings,
    rng: R,
}

impl TrafficGenerator<StdRng> {
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let settings = TrafficSettings::from_config(config)?;
        Self::new(settings, StdRng::from_entropy()).map_err(Into::into)
    }
}

impl<R> TrafficGenerator<R>
where
    R: Rng + Send + 'static,
{
    pub fn new(settings: TrafficSettings, rng: R) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(settings.request_timeout)
            .build()?;
        Ok(Self {
            client,
            settings,
            rng,
        })
    }

    /// Picks the next endpoint to call and the pause that follows it.
    pub fn next_step(&mut self) -> (Endpoint, Duration) {
        let endpoint = self.settings.mix.choose(&mut self.rng);
        let pause = self.settings.interval.sample(&mut self.rng);
        (endpoint, pause)
    }

    fn url_for(&self, endpoint: Endpoint) -> String {
        format!("{}{}", self.settings.base_url, endpoint.path())
    }

    /// Runs the generator on its own task. Dropping or stopping the handle ends it.
    pub fn spawn(self) -> TrafficGeneratorHandle {
        let (shutdown, receiver) = watch::channel(false);
        let task = tokio::spawn(self.start(receiver));
        TrafficGeneratorHandle { shutdown, task }
    }

    pub async fn start(mut self, mut shutdown: watch::Receiver<bool>) {
        tracing::debug!(
            base_url = %self.settings.base_url,
            "Traffic generator waiting {:?} before first request",
            self.settings.startup_delay
        );
        if !pause(self.settings.startup_delay, &mut shutdown).await {
            return;
        }

        loop {
            let (endpoint, wait) = self.next_step();
            let request = self.client.get(self.url_for(endpoint)).send();
            tokio::select! {
                _ = request => {}
                _ = stopped(&mut shutdown) => return,
            }

            if !pause(wait, &mut shutdown).await {
                return;
            }
        }
    }
}

/// Sleeps for `duration`. Returns `false` if shutdown was requested first.
async fn pause(duration: Duration, shutdown: &mut watch::Receiver<bool>) -> bool {
    tokio::select! {
        _ = tokio::time::sleep(duration) => true,
        _ = stopped(shutdown) => false,
    }
}

/// Resolves once shutdown is requested or the handle is gone.
async fn stopped(shutdown: &mut watch::Receiver<bool>) {
    loop {
        if *shutdown.borrow_and_update() {
            return;
        }
        if shutdown.changed().await.is_err() {
            return;
        }
    }
}

pub struct TrafficGeneratorHandle {
    shutdown: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl TrafficGeneratorHandle {
    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }

    /// Signals the generator and waits for its task to exit.
    pub async fn stop(self) {
        let _ = self.shutdown.send(true);
        if let Err(e) = self.task.await {
            tracing::warn!("Traffic generator task ended abnormally: {}", e);
        }
    }
}
