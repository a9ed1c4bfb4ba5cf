//! Leading-documentation extraction, parameterized by extension family.
//! At most five comments are kept per file, deduplicated, with short
//! fragments (≤ 10 characters) discarded.

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;

const MAX_COMMENTS: usize = 5;
const MIN_LENGTH: usize = 10;

fn regex(pattern: &str) -> Regex {
    Regex::new(pattern).expect("valid regex literal")
}

fn block_comment() -> Regex {
    regex(r"/\*[\s\S]*?\*/")
}

fn line_slash() -> Regex {
    regex(r"(?m)^\s*//[^\n]*")
}

fn line_hash() -> Regex {
    regex(r"(?m)^\s*#[^\n]*")
}

fn line_dash() -> Regex {
    regex(r"(?m)^\s*--[^\n]*")
}

fn c_family() -> &'static [Regex] {
    static RE: OnceLock<Vec<Regex>> = OnceLock::new();
    RE.get_or_init(|| vec![block_comment(), line_slash()])
}

fn php_family() -> &'static [Regex] {
    static RE: OnceLock<Vec<Regex>> = OnceLock::new();
    RE.get_or_init(|| vec![block_comment(), line_slash(), line_hash()])
}

fn python_family() -> &'static [Regex] {
    static RE: OnceLock<Vec<Regex>> = OnceLock::new();
    RE.get_or_init(|| {
        vec![
            regex(r#""{3}[\s\S]*?"{3}"#),
            regex(r"'{3}[\s\S]*?'{3}"),
            line_hash(),
        ]
    })
}

fn ruby_family() -> &'static [Regex] {
    static RE: OnceLock<Vec<Regex>> = OnceLock::new();
    RE.get_or_init(|| vec![regex(r"(?m)^=begin[\s\S]*?^=end"), line_hash()])
}

fn html_family() -> &'static [Regex] {
    static RE: OnceLock<Vec<Regex>> = OnceLock::new();
    RE.get_or_init(|| vec![regex(r"<!--[\s\S]*?-->")])
}

fn css_family() -> &'static [Regex] {
    static RE: OnceLock<Vec<Regex>> = OnceLock::new();
    RE.get_or_init(|| vec![block_comment()])
}

fn scss_family() -> &'static [Regex] {
    static RE: OnceLock<Vec<Regex>> = OnceLock::new();
    RE.get_or_init(|| vec![block_comment(), line_slash()])
}

fn sql_family() -> &'static [Regex] {
    static RE: OnceLock<Vec<Regex>> = OnceLock::new();
    RE.get_or_init(|| vec![block_comment(), line_dash()])
}

fn patterns_for(extension: &str) -> &'static [Regex] {
    match extension {
        ".js" | ".jsx" | ".ts" | ".tsx" | ".mjs" | ".cjs" | ".java" | ".go" | ".cs" | ".cpp"
        | ".c" | ".h" | ".hpp" | ".swift" | ".kt" | ".scala" | ".dart" => c_family(),
        ".php" => php_family(),
        ".py" => python_family(),
        ".rb" => ruby_family(),
        ".html" | ".htm" | ".vue" | ".xml" => html_family(),
        ".css" | ".less" | ".sass" => css_family(),
        ".scss" => scss_family(),
        ".sql" => sql_family(),
        _ => &[],
    }
}

/// Extract up to five normalized comments, in document order.
pub fn extract_comments(extension: &str, content: &str) -> Vec<String> {
    let patterns = patterns_for(extension);
    if patterns.is_empty() {
        return Vec::new();
    }

    let mut starts: HashSet<usize> = HashSet::new();
    let mut found: Vec<(usize, &str)> = Vec::new();
    for pattern in patterns {
        for m in pattern.find_iter(content) {
            if starts.insert(m.start()) {
                found.push((m.start(), m.as_str()));
            }
        }
    }
    found.sort_by_key(|(start, _)| *start);

    let mut seen: HashSet<String> = HashSet::new();
    let mut out = Vec::new();
    for (_, raw) in found {
        let cleaned = normalize(raw);
        if cleaned.len() <= MIN_LENGTH {
            continue;
        }
        if seen.insert(cleaned.clone()) {
            out.push(cleaned);
            if out.len() == MAX_COMMENTS {
                break;
            }
        }
    }
    out
}

/// Strip delimiters, leading `*` markers, and surrounding whitespace;
/// normalize line endings.
fn normalize(raw: &str) -> String {
    let mut text = raw.trim().to_string();
    let delimiters = [
        ("/**", "*/"),
        ("/*", "*/"),
        ("<!--", "-->"),
        ("\"\"\"", "\"\"\""),
        ("'''", "'''"),
        ("=begin", "=end"),
    ];
    for (prefix, suffix) in delimiters {
        if text.starts_with(prefix)
            && text.ends_with(suffix)
            && text.len() >= prefix.len() + suffix.len()
        {
            text = text[prefix.len()..text.len() - suffix.len()].to_string();
            break;
        }
    }

    text.replace("\r\n", "\n")
        .split('\n')
        .map(|line| {
            let line = line.trim();
            let line = line.strip_prefix("///").unwrap_or(line);
            let line = line.strip_prefix("//").unwrap_or(line);
            let line = line.strip_prefix('#').unwrap_or(line);
            let line = line.strip_prefix("--").unwrap_or(line);
            let line = line.strip_prefix('*').unwrap_or(line);
            line.trim()
        })
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
