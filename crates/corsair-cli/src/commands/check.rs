use std::path::Path;

use corsair_story::NodeInput;

pub fn run(file: &Path) -> Result<(), String> {
    let campaign = super::load_campaign(Some(file))?;

    println!("  All checks passed for '{}'.", file.display());
    for graph in campaign.levels() {
        let codes = graph
            .nodes
            .values()
            .filter(|n| matches!(n.input, NodeInput::Code { .. }))
            .count();
        println!(
            "  {} ({}): {} nodes, {} code lock{}, entry '{}'",
            graph.title,
            graph.level,
            graph.nodes.len(),
            codes,
            if codes == 1 { "" } else { "s" },
            graph.entry,
        );
    }
    println!("  {} levels", campaign.levels().len());

    Ok(())
}
