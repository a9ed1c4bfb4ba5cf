use std::collections::BTreeMap;

use crate::types::{Dependency, FileNode, ProjectStats};

/// Derive aggregate totals from the flattened files and the deduplicated
/// edge list.
pub fn build_stats(files: &[FileNode], dependencies: &[Dependency]) -> ProjectStats {
    let total_files = files.len();
    let total_size: u64 = files.iter().map(|f| f.size).sum();
    let total_dependencies = dependencies.len();

    let mut files_by_type: BTreeMap<_, usize> = BTreeMap::new();
    for file in files {
        *files_by_type.entry(file.type_tag).or_insert(0) += 1;
    }

    let average_file_size = if total_files == 0 {
        0.0
    } else {
        total_size as f64 / total_files as f64
    };
    let average_dependencies = if total_files == 0 {
        0.0
    } else {
        total_dependencies as f64 / total_files as f64
    };

    let internal = dependencies.iter().filter(|d| d.to.is_project()).count();
    let dependency_ratio = if total_dependencies == 0 {
        0.0
    } else {
        internal as f64 / total_dependencies as f64 * 100.0
    };

    ProjectStats {
        total_files,
        total_size,
        total_dependencies,
        files_by_type,
        average_file_size,
        average_dependencies,
        dependency_ratio,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DependencyKind, FileType, Node};
    use chrono::Utc;

    fn file(path: &str, extension: &str, size: u64, tag: FileType) -> FileNode {
        FileNode::file(
            path.to_string(),
            format!("/tmp/{path}"),
            path.rsplit('/').next().unwrap().to_string(),
            extension.to_string(),
            size,
            tag,
            Utc::now(),
        )
    }

    #[test]
    fn test_empty_project_zeroed() {
        let stats = build_stats(&[], &[]);
        assert_eq!(stats.total_files, 0);
        assert_eq!(stats.average_file_size, 0.0);
        assert_eq!(stats.dependency_ratio, 0.0);
    }

    #[test]
    fn test_totals_and_averages() {
        let files = vec![
            file("a.ts", ".ts", 100, FileType::TypeScript),
            file("b.ts", ".ts", 300, FileType::TypeScript),
            file("c.py", ".py", 200, FileType::Python),
        ];
        let deps = vec![
            Dependency::new("a.ts", Node::Project("b.ts".into()), DependencyKind::Import),
            Dependency::new(
                "a.ts",
                Node::External("react".into()),
                DependencyKind::Import,
            ),
        ];
        let stats = build_stats(&files, &deps);

        assert_eq!(stats.total_files, 3);
        assert_eq!(stats.total_size, 600);
        assert_eq!(stats.total_dependencies, 2);
        assert_eq!(stats.files_by_type[&FileType::TypeScript], 2);
        assert_eq!(stats.files_by_type[&FileType::Python], 1);
        assert!((stats.average_file_size - 200.0).abs() < f64::EPSILON);
        // One of two edges stays inside the project.
        assert!((stats.dependency_ratio - 50.0).abs() < f64::EPSILON);
    }
}
