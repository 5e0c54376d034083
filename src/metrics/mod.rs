use prometheus::{IntCounter, IntGauge, Registry};

lazy_static! {
    pub static ref REGISTRY: Registry = Registry::new();
    pub static ref ACTIVE_SESSIONS: IntGauge =
        IntGauge::new("boulette_active_sessions", "Active game sessions")
            .expect("metric cannot be created");
    pub static ref WORDS_GUESSED: IntCounter =
        IntCounter::new("boulette_words_guessed", "Words guessed correctly")
            .expect("metric cannot be created");
}

pub fn register_metrics() {
    REGISTRY
        .register(Box::new(ACTIVE_SESSIONS.clone()))
        .expect("collector cannot be registered");

    REGISTRY
        .register(Box::new(WORDS_GUESSED.clone()))
        .expect("collector cannot be registered");
}
