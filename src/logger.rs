use std::io::Write;

use log::LevelFilter;

/// Initialize the logger with the specified level.
///
/// `RUST_LOG` can still refine individual modules. Records go to stderr as
/// `LEVEL message`, with the module path added at debug level and above.
pub fn init_logger(level: LevelFilter) {
    let with_target = level >= LevelFilter::Debug;

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format(move |buf, record| {
            if with_target {
                writeln!(buf, "{:<5} [{}] {}", record.level(), record.target(), record.args())
            } else {
                writeln!(buf, "{:<5} {}", record.level(), record.args())
            }
        })
        .init();
}
