use time::OffsetDateTime;

/// Human rendering of a byte count: plain bytes below 1 KB, then one-decimal
/// KB, then one-decimal MB.
pub fn human_size(bytes: u64) -> String {
    if bytes < 1024 {
        return format!("{} B", bytes);
    }
    let kb = bytes as f64 / 1024.0;
    if kb < 1024.0 {
        return format!("{:.1} KB", kb);
    }
    format!("{:.1} MB", kb / 1024.0)
}

/// Wall-clock rendering of an epoch-ms timestamp, UTC.
pub fn clock_time(ts_ms: i64) -> String {
    let Ok(ts) = OffsetDateTime::from_unix_timestamp_nanos(ts_ms as i128 * 1_000_000) else {
        return ts_ms.to_string();
    };
    match time::format_description::parse("[hour]:[minute]:[second]") {
        Ok(fmt) => ts.format(&fmt).unwrap_or_else(|_| ts_ms.to_string()),
        Err(_) => ts_ms.to_string(),
    }
}

#[cfg(test)]
#[path = "../tests/model_tests.rs"]
mod tests;
