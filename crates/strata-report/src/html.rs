use strata_core::{Layer, ProjectStructure};

/// Render a self-contained HTML export: a static summary plus the full
/// structure embedded as JSON for downstream tooling. No renderer code
/// ships here; interactive diagrams are the consumer's concern.
pub fn format_structure(structure: &ProjectStructure) -> String {
    let stats = &structure.stats;

    let mut layer_rows = String::new();
    for layer in Layer::ALL {
        let count = structure.layers.get(&layer).map(Vec::len).unwrap_or(0);
        layer_rows.push_str(&format!(
            "      <tr><td>{layer}</td><td>{count}</td></tr>\n"
        ));
    }

    let mut cycle_items = String::new();
    if structure.metrics.cycles.is_empty() {
        cycle_items.push_str("      <li>none</li>\n");
    } else {
        for cycle in &structure.metrics.cycles {
            cycle_items.push_str(&format!(
                "      <li><code>{}</code></li>\n",
                escape(&cycle.nodes.join(" → "))
            ));
        }
    }

    let payload = serde_json::to_string(structure)
        .expect("ProjectStructure should be serializable")
        // Keep the inline <script> block well-formed regardless of content.
        .replace('<', "\\u003c");

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Strata report - {root}</title>
<style>
  body {{ font-family: sans-serif; margin: 2rem; }}
  table {{ border-collapse: collapse; }}
  td, th {{ border: 1px solid #ccc; padding: 0.3rem 0.8rem; }}
</style>
</head>
<body>
  <h1>Strata report</h1>
  <p><code>{root}</code></p>
  <h2>Summary</h2>
  <p>{files} files, {deps} dependencies, {size} bytes total</p>
  <h2>Layers</h2>
  <table>
    <tbody>
{layer_rows}    </tbody>
  </table>
  <h2>Circular dependencies</h2>
  <ul>
{cycle_items}  </ul>
  <script id="strata-data" type="application/json">{payload}</script>
</body>
</html>
"#,
        root = escape(&structure.root_path),
        files = stats.total_files,
        deps = stats.total_dependencies,
        size = stats.total_size,
    )
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
