pub const BYTES_PER_GIB: u64 = 1024 * 1024 * 1024;

const UNITS: [&str; 8] = ["", "Ki", "Mi", "Gi", "Ti", "Pi", "Ei", "Zi"];

/// Human-readable size in binary units, e.g. `1.5GiB`
pub fn format_bytes(bytes: u64) -> String {
    let mut value = bytes as f64;
    for unit in UNITS {
        if value < 1024.0 {
            return format!("{:.1}{}B", value, unit);
        }
        value /= 1024.0;
    }
    format!("{:.1}YiB", value)
}

/// Last six characters of a hash, enough to tell torrents apart in logs
pub fn short_hash(hash: &str) -> &str {
    let start = hash
        .char_indices()
        .rev()
        .nth(5)
        .map(|(i, _)| i)
        .unwrap_or(0);
    &hash[start..]
}

/// Convert a (possibly fractional) GiB figure from config to bytes
pub fn gib_to_bytes(gib: f64) -> u64 {
    if gib <= 0.0 {
        return 0;
    }
    (gib * BYTES_PER_GIB as f64) as u64
}
