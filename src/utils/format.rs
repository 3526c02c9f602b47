//! Formatting utilities for human-readable output.

/// Format bytes as human-readable size (e.g., "1.5 GB", "234 KB", "100 B").
pub fn human_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

/// Render a CRC32 value the way SFV files write it.
pub fn crc_hex(value: u32) -> String {
    format!("{:08X}", value)
}
