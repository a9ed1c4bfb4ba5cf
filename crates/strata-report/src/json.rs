use strata_core::ProjectStructure;

/// Serialize a project structure as JSON.
pub fn format_structure(structure: &ProjectStructure, compact: bool) -> String {
    if compact {
        serde_json::to_string(structure).expect("ProjectStructure should be serializable")
    } else {
        serde_json::to_string_pretty(structure).expect("ProjectStructure should be serializable")
    }
}
