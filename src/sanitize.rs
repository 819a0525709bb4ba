//! Stateless input guards applied before user text is echoed into a page or
//! used as a link target.

use regex::Regex;

/// Characters a link target may contain at all.
const URL_ALLOWED_RE: &str = r"^[-A-Za-z0-9+&@#/%?=~_|!:,.;()]*$";

/// Numeric character references plus the named ones browsers fold into a
/// scheme (`&colon;`, `&tab;`, `&newline;`).
const URL_ENTITY_RE: &str = r"(?i)&#(x[0-9a-f]+|[0-9]+);?|&(colon|tab|newline);";

const URL_SCHEME_RE: &str = r"^([A-Za-z][A-Za-z0-9+.\-]*):";

const BLOCKED_SCHEMES: [&str; 3] = ["javascript", "data", "vbscript"];

/// Replace `& < > " ' /` with their HTML entities; everything else passes
/// through unchanged.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            '/' => out.push_str("&#x2F;"),
            _ => out.push(c),
        }
    }
    out
}

/// True iff `input` is syntactically valid JSON.
pub fn is_valid_json(input: &str) -> bool {
    serde_json::from_str::<serde_json::Value>(input).is_ok()
}

/// Guard a user-influenced URL before it becomes a navigation target.
///
/// Returns an empty string when the input is blank, contains a character
/// outside the allowed set, or (after folding character references and
/// control characters the way a browser would) names a `javascript:`,
/// `data:` or `vbscript:` scheme. Otherwise returns the folded URL, which is
/// the input itself for ordinary links.
pub fn sanitize_url(input: &str) -> String {
    let Ok(allowed) = Regex::new(URL_ALLOWED_RE) else {
        return String::new();
    };
    if input.trim().is_empty() || !allowed.is_match(input) {
        return String::new();
    }

    let Some(folded) = fold_url(input) else {
        return String::new();
    };
    if folded.is_empty() {
        return String::new();
    }

    let Ok(scheme_re) = Regex::new(URL_SCHEME_RE) else {
        return String::new();
    };
    if let Some(caps) = scheme_re.captures(&folded) {
        let scheme = caps[1].to_ascii_lowercase();
        if BLOCKED_SCHEMES.contains(&scheme.as_str()) {
            crate::diagnostics::warn(format!("blocked url with {} scheme", scheme));
            return String::new();
        }
    }

    folded
}

/// Decode character references until the string stops changing, then drop
/// control and zero-width characters.
fn fold_url(input: &str) -> Option<String> {
    let entity = Regex::new(URL_ENTITY_RE).ok()?;

    let mut current = input.to_string();
    // Each pass shortens the string, so this terminates; the cap is a backstop.
    for _ in 0..8 {
        let next = entity
            .replace_all(&current, |caps: &regex::Captures<'_>| {
                if let Some(num) = caps.get(1) {
                    let num = num.as_str();
                    let code = match num.strip_prefix(['x', 'X']) {
                        Some(hex) => u32::from_str_radix(hex, 16).ok(),
                        None => num.parse::<u32>().ok(),
                    };
                    code.and_then(char::from_u32)
                        .map(String::from)
                        .unwrap_or_default()
                } else {
                    match caps[2].to_ascii_lowercase().as_str() {
                        "colon" => ":".to_string(),
                        _ => String::new(),
                    }
                }
            })
            .into_owned();
        if next == current {
            break;
        }
        current = next;
    }

    Some(
        current
            .chars()
            .filter(|c| !is_invisible(*c))
            .collect::<String>()
            .trim()
            .to_string(),
    )
}

fn is_invisible(c: char) -> bool {
    c.is_control() || matches!(c, '\u{2000}'..='\u{200D}' | '\u{FEFF}')
}
