use crate::membership::PeerAddress;
use chrono::Local;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;

/// MessageLog records chat history, separately from diagnostic logging.
/// Implementations are fire-and-forget: they must never block the caller for
/// long and never propagate failure.
pub trait MessageLog: Send + Sync {
    fn log_message(&self, origin: &PeerAddress, text: &str);

    fn log_broadcast(&self, origin: &PeerAddress, target: &PeerAddress, text: &str, success: bool);
}

/// Appends one line per event to `<directory>/chat-messages.log`. Write
/// failures are reported on the diagnostic logger and otherwise swallowed.
pub struct FileMessageLog {
    logger: slog::Logger,
    path: PathBuf,
    // Serializes appends so interleaved workers can't shear a line.
    write_lock: Mutex<()>,
}

impl FileMessageLog {
    pub fn new<P: Into<PathBuf>>(logger: slog::Logger, directory: P) -> Self {
        let directory = directory.into();
        if let Err(e) = std::fs::create_dir_all(&directory) {
            slog::warn!(logger, "Failed to create chat log directory: {}", e);
        }

        FileMessageLog {
            logger,
            path: directory.join("chat-messages.log"),
            write_lock: Mutex::new(()),
        }
    }

    fn append(&self, entry: String) {
        let _guard = self.write_lock.lock().unwrap();
        let result = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .and_then(|mut file| writeln!(file, "{}", entry));

        if let Err(e) = result {
            slog::warn!(self.logger, "Failed to write chat log entry: {}", e);
        }
    }

    fn timestamp() -> String {
        Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
    }
}

impl MessageLog for FileMessageLog {
    fn log_message(&self, origin: &PeerAddress, text: &str) {
        self.append(format!(
            "[{}] FROM={} TEXT={}",
            Self::timestamp(),
            origin,
            text
        ));
    }

    fn log_broadcast(&self, origin: &PeerAddress, target: &PeerAddress, text: &str, success: bool) {
        let status = if success { "SUCCESS" } else { "FAILED" };
        self.append(format!(
            "[{}] BROADCAST FROM={} TO={} STATUS={} TEXT={}",
            Self::timestamp(),
            origin,
            target,
            status,
            text
        ));
    }
}
