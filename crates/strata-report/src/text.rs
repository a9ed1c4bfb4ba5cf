use colored::Colorize;

use strata_core::{Layer, ProjectStructure};

/// Format an analysis summary for terminal output.
pub fn format_structure(structure: &ProjectStructure) -> String {
    let mut out = String::new();

    out.push_str(&format!("\n{}\n", "Strata - Workspace Analysis".bold()));
    out.push_str(&format!("{}\n\n", "=".repeat(40)));

    if structure.files.is_empty() {
        out.push_str(&format!(
            "{}\n",
            "No supported source files found".yellow().bold()
        ));
        out.push_str(
            "  The workspace contains no files strata can analyze.\n  \
             Check the ignore list in .strata.toml if this is unexpected.\n",
        );
        return out;
    }

    let stats = &structure.stats;
    out.push_str(&format!(
        "{}: {} files, {} dependencies, {} total\n",
        "Summary".bold(),
        stats.total_files,
        stats.total_dependencies,
        format_size(stats.total_size),
    ));
    out.push_str(&format!(
        "  avg size {}, avg deps/file {:.2}, {:.1}% internal edges\n",
        format_size(stats.average_file_size as u64),
        stats.average_dependencies,
        stats.dependency_ratio,
    ));

    out.push_str(&format!("\n{}\n{}\n", "Layers".bold(), "-".repeat(40)));
    for layer in Layer::ALL {
        let count = structure.layers.get(&layer).map(Vec::len).unwrap_or(0);
        out.push_str(&format!("  {layer}: {count}\n"));
    }

    let metrics = &structure.metrics;
    if metrics.cycles.is_empty() {
        out.push_str(&format!(
            "\n{}\n",
            "No circular dependencies found!".green().bold()
        ));
    } else {
        out.push_str(&format!(
            "\n{} ({} found)\n{}\n",
            "Circular dependencies".red().bold(),
            metrics.cycles.len(),
            "-".repeat(40),
        ));
        for cycle in &metrics.cycles {
            out.push_str(&format!("  {}\n", cycle.nodes.join(" -> ")));
        }
    }

    if metrics.critical_path.len() > 1 {
        out.push_str(&format!(
            "\n{} (depth {})\n",
            "Critical path".bold(),
            metrics.critical_path.len()
        ));
        out.push_str(&format!("  {}\n", metrics.critical_path.join(" -> ")));
    }

    out.push_str(&format!(
        "\n{}: {} (avg {:.2} per node)\n",
        "Coupling".bold(),
        metrics.coupling,
        metrics.average_coupling,
    ));

    out
}

fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{bytes} B")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use strata_core::{
        Cycle, Dependency, DependencyKind, FileNode, FileType, Node, ProjectStructure,
    };

    fn sample() -> ProjectStructure {
        let mut structure = ProjectStructure::empty("/tmp/p");
        structure.files.push(FileNode::file(
            "src/a.ts".into(),
            "/tmp/p/src/a.ts".into(),
            "a.ts".into(),
            ".ts".into(),
            120,
            FileType::TypeScript,
            Utc::now(),
        ));
        structure.dependencies.push(Dependency::new(
            "src/a.ts",
            Node::Project("src/b.ts".into()),
            DependencyKind::Import,
        ));
        structure.stats.total_files = 1;
        structure.stats.total_dependencies = 1;
        structure.stats.total_size = 120;
        structure
    }

    #[test]
    fn test_empty_workspace_message() {
        let report = format_structure(&ProjectStructure::empty("/tmp/p"));
        assert!(report.contains("No supported source files found"));
    }

    #[test]
    fn test_summary_and_layers_present() {
        let report = format_structure(&sample());
        assert!(report.contains("Summary"));
        assert!(report.contains("1 files, 1 dependencies"));
        assert!(report.contains("presentation"));
        assert!(report.contains("config"));
    }

    #[test]
    fn test_cycles_listed() {
        let mut structure = sample();
        structure.metrics.cycles.push(Cycle {
            nodes: vec!["a.ts".into(), "b.ts".into()],
            key: "a.ts-b.ts".into(),
        });
        let report = format_structure(&structure);
        assert!(report.contains("a.ts -> b.ts"));
    }

    #[test]
    fn test_format_size_units() {
        assert_eq!(format_size(10), "10 B");
        assert_eq!(format_size(2048), "2.0 KB");
        assert_eq!(format_size(3 * 1024 * 1024), "3.0 MB");
    }
}
