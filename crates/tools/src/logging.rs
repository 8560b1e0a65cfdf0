use env_logger::Builder;
use log::{LevelFilter, debug};

/// Generation summaries log at `info` unless `RUST_LOG` says otherwise. An explicit
/// `--log-level` directive is applied last, so it wins over both.
pub fn init(level: Option<&str>) {
    if builder(level).try_init().is_err() {
        debug!("logger already installed, keeping it");
    }
}

fn builder(level: Option<&str>) -> Builder {
    let mut builder = Builder::new();
    builder.filter_level(LevelFilter::Info).format_timestamp(None).parse_default_env();
    if let Some(directives) = level {
        builder.parse_filters(directives);
    }
    builder
}
