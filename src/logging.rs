use directories::ProjectDirs;
use flexi_logger::{
    detailed_format, Age, Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming,
};

use crate::config::LoggingConfig;
use crate::error::MedPulseError;

const LOG_FILES_KEPT: usize = 7;

/// Starts file logging under `<data dir>/logs`, rotated daily.
///
/// The returned handle must be kept alive for the life of the process or
/// buffered log lines may be lost.
pub fn setup_logging(
    project_dirs: &ProjectDirs,
    logging: &LoggingConfig,
) -> Result<LoggerHandle, MedPulseError> {
    let log_dir = project_dirs.data_local_dir().join("logs");

    let handle = Logger::try_with_env_or_str(logging.log_spec())?
        .log_to_file(
            FileSpec::default()
                .directory(log_dir)
                .basename("medpulse"),
        )
        .format_for_files(detailed_format)
        .rotate(
            Criterion::Age(Age::Day),
            Naming::Timestamps,
            Cleanup::KeepLogFiles(LOG_FILES_KEPT),
        )
        .start()?;

    Ok(handle)
}
