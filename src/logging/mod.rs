use chrono::Local;
use color_eyre::Result;
use env_logger::{Builder, Env, Target};
use std::fs::OpenOptions;
use std::io::Write;

/// Routes `log` output to an append-only file; the terminal belongs to the UI.
/// Filter comes from `RUST_LOG`, defaulting to `info`.
pub fn init(path: &str) -> Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .format(|buf, record| {
            writeln!(
                buf,
                "[{}] {} {}: {}",
                Local::now().format("%H:%M:%S"),
                record.level(),
                record.target(),
                record.args()
            )
        })
        .try_init()?;

    Ok(())
}
