use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;
use once_cell::sync::Lazy;
use chrono::Local;

static LOG_FILE: Lazy<Mutex<Option<File>>> = Lazy::new(|| Mutex::new(None));

/// Initialize logging to a file
pub fn init() -> std::io::Result<PathBuf> {
    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    let log_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".txdash")
        .join("logs");

    std::fs::create_dir_all(&log_dir)?;

    let log_path = log_dir.join(format!("txdash_{}.log", timestamp));

    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(&log_path)?;

    *LOG_FILE.lock().unwrap() = Some(file);

    log("=== txdash started ===");

    Ok(log_path)
}

/// Log a message with timestamp
pub fn log(msg: &str) {
    let timestamp = Local::now().format("%H:%M:%S%.3f");
    let line = format!("[{}] {}\n", timestamp, msg);

    if let Ok(mut guard) = LOG_FILE.lock() {
        if let Some(ref mut file) = *guard {
            let _ = file.write_all(line.as_bytes());
            let _ = file.flush();
        }
    }
}

/// Log an outgoing fetch request
pub fn log_request(endpoint: &str, params: &str) {
    log(&format!("--> {} {}", endpoint, truncate(params)));
}

/// Log an incoming fetch response (truncated for readability)
pub fn log_response(endpoint: &str, body: &str) {
    log(&format!("<-- {} {}", endpoint, truncate(body)));
}

fn truncate(line: &str) -> String {
    const LIMIT: usize = 500;
    if line.len() > LIMIT {
        let mut cut = LIMIT;
        while !line.is_char_boundary(cut) {
            cut -= 1;
        }
        format!("{}... ({} bytes total)", &line[..cut], line.len())
    } else {
        line.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_keeps_short_lines() {
        assert_eq!(truncate("short"), "short");
    }

    #[test]
    fn test_truncate_cuts_on_char_boundary() {
        // Three-byte chars leave byte 500 in the middle of a char
        let line = "€".repeat(167);
        let cut = truncate(&line);
        assert!(cut.starts_with(&"€".repeat(166)));
        assert!(cut.ends_with("(501 bytes total)"));
    }
}
