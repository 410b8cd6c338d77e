use std::collections::{BTreeSet, VecDeque};

use crate::error::{StoryError, StoryResult};
use crate::graph::{CODE_PLACEHOLDER, Effect, MAX_OPTIONS, NodeId, NodeInput, StoryGraph, Transition};

/// List every structural problem of a graph. Empty means the graph is sound.
pub fn check_graph(graph: &StoryGraph) -> Vec<String> {
    let mut issues = Vec::new();
    let level = &graph.level;

    if graph.title.trim().is_empty() {
        issues.push(format!("{level}: title is empty"));
    }
    if !graph.nodes.contains_key(&graph.entry) {
        issues.push(format!("{level}: entry node {} does not exist", graph.entry));
    }

    for (id, node) in &graph.nodes {
        if node.question.trim().is_empty() {
            issues.push(format!("{level}/{id}: question is empty"));
        }
        match &node.input {
            NodeInput::Choice { options } => {
                if options.is_empty() {
                    issues.push(format!("{level}/{id}: choice node has no options"));
                }
                if options.len() > MAX_OPTIONS {
                    issues.push(format!(
                        "{level}/{id}: {} options, at most {MAX_OPTIONS} allowed",
                        options.len()
                    ));
                }
                for (i, option) in options.iter().enumerate() {
                    if option.text.trim().is_empty() {
                        issues.push(format!("{level}/{id}: option {} has no text", i + 1));
                    }
                }
            }
            NodeInput::Code { reveal, .. } => {
                if !reveal.contains(CODE_PLACEHOLDER) {
                    issues.push(format!(
                        "{level}/{id}: reveal text never shows {CODE_PLACEHOLDER}"
                    ));
                }
            }
        }
        for branch in node.branches() {
            if let Transition::Goto(target) = &branch.next
                && !graph.nodes.contains_key(target)
            {
                issues.push(format!("{level}/{id}: goto unknown node {target}"));
            }
            for effect in &branch.effects {
                if let Effect::Score { reason, .. } = effect
                    && reason.trim().is_empty()
                {
                    issues.push(format!("{level}/{id}: score effect without a reason"));
                }
            }
        }
    }

    if graph.nodes.contains_key(&graph.entry) {
        let (reachable, winnable) = explore(graph);
        for id in graph.nodes.keys() {
            if !reachable.contains(id) {
                issues.push(format!("{level}/{id}: unreachable from {}", graph.entry));
            }
        }
        if !winnable {
            issues.push(format!("{level}: no path wins the level"));
        }
    }

    issues
}

/// Fail with every problem of every graph joined into one message.
pub fn validate_graphs<'a>(graphs: impl IntoIterator<Item = &'a StoryGraph>) -> StoryResult<()> {
    let issues: Vec<String> = graphs.into_iter().flat_map(check_graph).collect();
    if issues.is_empty() {
        Ok(())
    } else {
        Err(StoryError::Validation(issues.join("; ")))
    }
}

/// Breadth-first walk from the entry node. Returns the reachable node set
/// and whether any reachable branch wins the level.
fn explore(graph: &StoryGraph) -> (BTreeSet<&NodeId>, bool) {
    let mut seen = BTreeSet::new();
    let mut queue = VecDeque::from([&graph.entry]);
    let mut winnable = false;

    while let Some(id) = queue.pop_front() {
        if !seen.insert(id) {
            continue;
        }
        let Some(node) = graph.nodes.get(id) else {
            continue;
        };
        for branch in node.branches() {
            match &branch.next {
                Transition::Goto(next) => queue.push_back(next),
                Transition::Win => winnable = true,
                Transition::Die | Transition::Fail => {}
            }
        }
    }

    (seen, winnable)
}
