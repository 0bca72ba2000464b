//! Pure structural-path matching over [`DomNode`] trees

use crate::path::{Combinator, DomNode, StructuralPath};

/// Returns every node matching the full path, in pre-order document order.
///
/// Each step narrows the current candidate set: descendant steps search the
/// whole subtree of each candidate, sibling steps look only at the element
/// immediately following each candidate. Candidates reached through more
/// than one route are reported once.
pub fn find_all<N: DomNode>(root: &N, path: &StructuralPath) -> Vec<N> {
    let mut candidates = vec![root.clone()];

    for step in path.steps() {
        let mut next: Vec<N> = Vec::new();
        match step.combinator() {
            Combinator::Descendant => {
                for candidate in &candidates {
                    collect_matching_descendants(candidate, step, &mut next);
                }
            }
            Combinator::NextSibling => {
                for candidate in &candidates {
                    if let Some(sibling) = candidate.next_sibling_element() {
                        if step.matches(&sibling) {
                            push_unique(&mut next, sibling);
                        }
                    }
                }
            }
        }
        candidates = next;
        if candidates.is_empty() {
            break;
        }
    }

    candidates
}

/// Returns only the first match in pre-order, the single-result contract of
/// field extraction. Nodes beyond the first are deliberately ignored.
pub fn find_first<N: DomNode>(root: &N, path: &StructuralPath) -> Option<N> {
    find_all(root, path).into_iter().next()
}

fn collect_matching_descendants<N: DomNode>(
    node: &N,
    step: &crate::path::PathStep,
    out: &mut Vec<N>,
) {
    for child in node.children() {
        if step.matches(&child) {
            push_unique(out, child.clone());
        }
        collect_matching_descendants(&child, step, out);
    }
}

fn push_unique<N: DomNode>(out: &mut Vec<N>, node: N) {
    if !out.iter().any(|n| n.same_node(&node)) {
        out.push(node);
    }
}
