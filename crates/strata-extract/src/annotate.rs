//! File-node enrichment: comments, top-level elements, and the derived
//! description (first kept comment).

use strata_core::{FileAnnotator, FileNode};

use crate::comments::extract_comments;
use crate::elements::extract_elements;

pub struct SourceAnnotator;

impl FileAnnotator for SourceAnnotator {
    fn annotate(&self, node: &mut FileNode, content: &str) {
        node.comments = extract_comments(&node.extension, content);
        node.description = node.comments.first().cloned();

        let elements = extract_elements(&node.extension, content);
        node.functions = elements.functions;
        node.classes = elements.classes;
        node.variables = elements.variables;
    }
}
