use crate::destination::param_case;

/// Parse a `--dest-name` value.
///
/// The name must keep at least one alphanumeric character once normalized,
/// otherwise every output would be named `.<format>.js`.
pub fn parse_dest_name(s: &str) -> Result<String, String> {
    if param_case(s).is_empty() {
        return Err(format!(
            "Destination name must contain a letter or digit: '{}'",
            s
        ));
    }
    Ok(s.to_string())
}

/// Parse a `--watch` glob, rejecting patterns the glob crate cannot compile.
pub fn parse_watch_glob(s: &str) -> Result<String, String> {
    if s.trim().is_empty() {
        return Err("Watch pattern cannot be empty".to_string());
    }
    glob::Pattern::new(s).map_err(|e| format!("Invalid watch pattern '{}': {}", s, e))?;
    Ok(s.to_string())
}

/// Parse a `--debounce` value in milliseconds.
pub fn parse_debounce(s: &str) -> Result<u64, String> {
    let ms: u64 = s
        .parse()
        .map_err(|_| format!("Debounce must be a whole number of milliseconds: '{}'", s))?;
    if ms == 0 {
        return Err("Debounce must be at least 1ms".to_string());
    }
    Ok(ms)
}
