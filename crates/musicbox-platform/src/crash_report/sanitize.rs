use regex::Regex;

/// Patterns whose whole match is replaced.
const FULL_PATTERNS: &[&str] = &[
    // Raw cookie headers carry every session token at once
    r"(?i)(?:set-)?cookie:\s*[^\r\n]+",
    r"Bearer [a-zA-Z0-9._\-]+",
];

/// Patterns whose first capture group (the key) is kept.
const KEYED_PATTERNS: &[&str] = &[
    r"(?i)((?:token|secret|password|session|media-user-token|myacinfo)=)[a-zA-Z0-9%._\-]{16,}",
];

/// Redacts cookie headers, session tokens and bearer credentials from the
/// input string, replacing them with `[REDACTED]`.
pub fn sanitize_secrets(input: &str) -> String {
    let mut result = input.to_string();

    for pattern in FULL_PATTERNS {
        // Static literals; covered by the crash_report tests.
        let re = Regex::new(pattern).expect("crash_report: static regex pattern must compile");
        result = re
            .replace_all(&result, |caps: &regex::Captures<'_>| {
                let matched = &caps[0];
                match matched.find(':') {
                    Some(idx) if matched[..idx].to_ascii_lowercase().ends_with("cookie") => {
                        format!("{}: [REDACTED]", &matched[..idx])
                    }
                    _ => "[REDACTED]".to_string(),
                }
            })
            .into_owned();
    }

    for pattern in KEYED_PATTERNS {
        let re = Regex::new(pattern).expect("crash_report: static regex pattern must compile");
        result = re.replace_all(&result, "${1}[REDACTED]").into_owned();
    }

    result
}
