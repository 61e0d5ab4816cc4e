use serde::{Deserialize, Serialize};

/// Session-scoped filter state threaded through chat turns. One instance per
/// session, owned by the caller and updated in place; fields a message does
/// not mention keep their previous value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatContext {
    pub ticker: String,
    pub window: Option<String>,
    pub min_premium: Option<f64>,
    pub sweeps_only: Option<bool>,
}

impl Default for ChatContext {
    fn default() -> Self {
        Self {
            ticker: "SPY".to_string(),
            window: None,
            min_premium: None,
            sweeps_only: None,
        }
    }
}

/// Scan the message for explicit `key=value` assignments and overwrite the
/// matching context fields. Only assignment syntax updates the context; a
/// ticker mentioned in running text is deliberately ignored.
pub fn extract_filters(message: &str, ctx: &mut ChatContext) {
    let msg = message.to_lowercase();

    if let Some(raw) = scan_assignment(&msg, "ticker") {
        let ticker: String = raw.chars().take_while(|c| c.is_ascii_alphabetic()).take(5).collect();
        if !ticker.is_empty() {
            ctx.ticker = ticker.to_uppercase();
        }
    }

    if let Some(raw) = scan_assignment(&msg, "window") {
        if let Some(window) = parse_window(&raw) {
            ctx.window = Some(window);
        }
    }

    if let Some(raw) = scan_assignment(&msg, "min_premium") {
        let numeric: String = raw
            .chars()
            .take_while(|c| c.is_ascii_digit() || *c == '.')
            .collect();
        if let Ok(v) = numeric.parse::<f64>() {
            ctx.min_premium = Some(v);
        }
    }

    if let Some(raw) = scan_assignment(&msg, "sweeps_only") {
        match raw.as_str() {
            "true" => ctx.sweeps_only = Some(true),
            "false" => ctx.sweeps_only = Some(false),
            _ => {}
        }
    }
}

/// Find the first `key = value` occurrence (whitespace around `=` optional)
/// and return the value token, read up to whitespace or a comma.
fn scan_assignment(msg: &str, key: &str) -> Option<String> {
    for (start, _) in msg.match_indices(key) {
        let rest = msg[start + key.len()..].trim_start();
        let Some(rest) = rest.strip_prefix('=') else {
            continue;
        };
        let value: String = rest
            .trim_start()
            .chars()
            .take_while(|c| !c.is_whitespace() && *c != ',')
            .collect();
        if !value.is_empty() {
            return Some(value);
        }
    }
    None
}

/// A window looks like `<digits><m|h|d>`, e.g. `15m` or `2h`.
fn parse_window(raw: &str) -> Option<String> {
    let digits: String = raw.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    let unit = raw.chars().nth(digits.len())?;
    if matches!(unit, 'm' | 'h' | 'd') {
        Some(format!("{digits}{unit}"))
    } else {
        None
    }
}
