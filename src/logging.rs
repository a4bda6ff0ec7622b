use tracing::Level;
use tracing_subscriber::{
    filter::LevelFilter, fmt::layer, layer::SubscriberExt, util::SubscriberInitExt, Registry,
};

/// Install the console logger on stderr. Safe to call more than once; later calls are
/// ignored.
pub fn init(level: Level) {
    let _ = Registry::default()
        .with(LevelFilter::from(level))
        .with(
            layer()
                .with_ansi(true)
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .try_init();
}
