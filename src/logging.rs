use std::fs::OpenOptions;
use std::path::Path;

use color_eyre::Result;

/// Routes tracing output to an append-mode file so diagnostics never mix
/// with the refreshing display line.
pub fn init_file_logging(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }

    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let make_writer = move || file.try_clone().expect("failed to clone log file handle");

    let subscriber = tracing_subscriber::fmt()
        .with_ansi(false)
        .with_target(false)
        .with_writer(make_writer)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
