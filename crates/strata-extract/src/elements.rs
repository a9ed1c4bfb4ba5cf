//! Top-level element capture: functions, classes, and module-level
//! variables for the JS/TS, Python, and Java families. Buckets are
//! deduplicated and disjoint, classes taking precedence over functions,
//! functions over variables.

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;

/// Captured element names for one file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Elements {
    pub functions: Vec<String>,
    pub classes: Vec<String>,
    pub variables: Vec<String>,
}

fn regex(pattern: &str) -> Regex {
    Regex::new(pattern).expect("valid regex literal")
}

const JAVA_KEYWORDS: &[&str] = &[
    "if", "for", "while", "switch", "catch", "return", "new", "else", "do", "try", "synchronized",
];

fn regex_js_class() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        regex(r#"(?m)^\s*(?:export\s+)?(?:default\s+)?(?:abstract\s+)?class\s+([A-Za-z_$][\w$]*)"#)
    })
}

fn regex_js_function() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        regex(r#"(?m)^\s*(?:export\s+)?(?:default\s+)?(?:async\s+)?function\s*\*?\s*([A-Za-z_$][\w$]*)"#)
    })
}

fn regex_js_arrow_fn() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // const f = (...) => / const f = x => / const f = async () => /
    // const f = function (...)
    RE.get_or_init(|| {
        regex(
            r#"(?m)^\s*(?:export\s+)?(?:const|let|var)\s+([A-Za-z_$][\w$]*)\s*=\s*(?:async\s+)?(?:function\b|\([^)\n]*\)\s*=>|[A-Za-z_$][\w$]*\s*=>)"#,
        )
    })
}

fn regex_js_variable() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| regex(r#"(?m)^\s*(?:export\s+)?(?:const|let|var)\s+([A-Za-z_$][\w$]*)\s*="#))
}

fn regex_py_def() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| regex(r#"(?m)^(?:async\s+)?def\s+([A-Za-z_]\w*)"#))
}

fn regex_py_class() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| regex(r#"(?m)^class\s+([A-Za-z_]\w*)"#))
}

fn regex_py_variable() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| regex(r#"(?m)^([A-Za-z_]\w*)\s*="#))
}

fn regex_java_class() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        regex(
            r#"(?m)^\s*(?:public\s+|private\s+|protected\s+)?(?:static\s+)?(?:final\s+)?(?:abstract\s+)?(?:class|interface|enum)\s+([A-Za-z_]\w*)"#,
        )
    })
}

fn regex_java_method() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        regex(
            r#"(?m)(?:public|private|protected)\s+(?:static\s+)?(?:final\s+)?[\w<>\[\],\s]+?\s+([a-zA-Z_]\w*)\s*\("#,
        )
    })
}

fn regex_java_field() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        regex(
            r#"(?m)(?:public|private|protected)\s+(?:static\s+)?(?:final\s+)?[\w<>\[\]]+\s+([a-zA-Z_]\w*)\s*[=;]"#,
        )
    })
}

/// Extract top-level element names for the given extension family.
/// Unhandled families yield empty buckets.
pub fn extract_elements(extension: &str, content: &str) -> Elements {
    match extension {
        ".js" | ".jsx" | ".ts" | ".tsx" | ".mjs" | ".cjs" => extract_js(content),
        ".py" => extract_python(content),
        ".java" => extract_java(content),
        _ => Elements::default(),
    }
}

fn extract_js(content: &str) -> Elements {
    let mut seen: HashSet<String> = HashSet::new();
    let classes = collect(regex_js_class(), content, &mut seen, |_| true);
    let mut functions = collect(regex_js_function(), content, &mut seen, |_| true);
    functions.extend(collect(regex_js_arrow_fn(), content, &mut seen, |_| true));
    let variables = collect(regex_js_variable(), content, &mut seen, |_| true);
    Elements {
        functions,
        classes,
        variables,
    }
}

fn extract_python(content: &str) -> Elements {
    let mut seen: HashSet<String> = HashSet::new();
    let classes = collect(regex_py_class(), content, &mut seen, |_| true);
    let functions = collect(regex_py_def(), content, &mut seen, |_| true);
    let variables = collect(regex_py_variable(), content, &mut seen, |name| {
        !matches!(name, "if" | "for" | "while" | "import" | "from" | "return")
    });
    Elements {
        functions,
        classes,
        variables,
    }
}

fn extract_java(content: &str) -> Elements {
    let mut seen: HashSet<String> = HashSet::new();
    let classes = collect(regex_java_class(), content, &mut seen, |_| true);
    let functions = collect(regex_java_method(), content, &mut seen, |name| {
        !JAVA_KEYWORDS.contains(&name)
    });
    let variables = collect(regex_java_field(), content, &mut seen, |name| {
        !JAVA_KEYWORDS.contains(&name)
    });
    Elements {
        functions,
        classes,
        variables,
    }
}

/// Collect capture-group-1 names in document order, skipping names
/// already claimed by an earlier bucket.
fn collect(
    pattern: &Regex,
    content: &str,
    seen: &mut HashSet<String>,
    keep: impl Fn(&str) -> bool,
) -> Vec<String> {
    let mut out = Vec::new();
    for caps in pattern.captures_iter(content) {
        let name = &caps[1];
        if !keep(name) {
            continue;
        }
        if seen.insert(name.to_string()) {
            out.push(name.to_string());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_js_functions_classes_variables() {
        let content = r#"
export class UserStore {}
export function loadUsers() {}
const refresh = async () => {};
const API_BASE = "/api";
let counter = 0;
"#;
        let elements = extract_elements(".ts", content);
        assert_eq!(elements.classes, vec!["UserStore"]);
        assert_eq!(elements.functions, vec!["loadUsers", "refresh"]);
        assert_eq!(elements.variables, vec!["API_BASE", "counter"]);
    }

    #[test]
    fn test_js_buckets_disjoint() {
        // `refresh` is captured as a function; the variable pattern must
        // not emit it again.
        let content = "const refresh = () => {};\n";
        let elements = extract_elements(".js", content);
        assert_eq!(elements.functions, vec!["refresh"]);
        assert!(elements.variables.is_empty());
    }

    #[test]
    fn test_python_elements() {
        let content = r#"
class Repository:
    pass

def fetch_all():
    pass

async def fetch_one():
    pass

DEFAULT_LIMIT = 50
"#;
        let elements = extract_elements(".py", content);
        assert_eq!(elements.classes, vec!["Repository"]);
        assert_eq!(elements.functions, vec!["fetch_all", "fetch_one"]);
        assert_eq!(elements.variables, vec!["DEFAULT_LIMIT"]);
    }

    #[test]
    fn test_python_indented_defs_not_top_level() {
        let content = "class A:\n    def method(self):\n        pass\n";
        let elements = extract_elements(".py", content);
        assert_eq!(elements.classes, vec!["A"]);
        assert!(elements.functions.is_empty());
    }

    #[test]
    fn test_java_methods_exclude_control_flow() {
        let content = r#"
public class OrderService {
    private final int limit = 10;

    public void processOrder(Order order) {
        if (order.isValid()) {
            for (Item item : order.items()) {
            }
        }
    }

    protected String name() { return "x"; }
}
"#;
        let elements = extract_elements(".java", content);
        assert_eq!(elements.classes, vec!["OrderService"]);
        assert!(elements.functions.contains(&"processOrder".to_string()));
        assert!(elements.functions.contains(&"name".to_string()));
        assert!(!elements.functions.contains(&"if".to_string()));
        assert!(!elements.functions.contains(&"for".to_string()));
        assert!(elements.variables.contains(&"limit".to_string()));
    }

    #[test]
    fn test_duplicates_collapse() {
        let content = "function twice() {}\nfunction twice() {}\n";
        let elements = extract_elements(".js", content);
        assert_eq!(elements.functions, vec!["twice"]);
    }

    #[test]
    fn test_unhandled_family_is_empty() {
        let elements = extract_elements(".go", "func main() {}\n");
        assert_eq!(elements, Elements::default());
    }
}
