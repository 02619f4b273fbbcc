use env_logger::{Builder, Env};
use log::error;

fn init_logger() {
    // Уровень берём из RUST_LOG, иначе info.
    // Пример: RUST_LOG=debug recordkit entries --file obj.json
    Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();
}

fn main() {
    init_logger();

    if let Err(e) = RecordKit::cli::run() {
        error!("{:?}", e);
        std::process::exit(1);
    }
}
