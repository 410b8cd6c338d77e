pub mod calc;
pub mod check;
pub mod play;

use std::fs;
use std::path::Path;

use corsair_story::Campaign;

/// Load a campaign file, or the built-in campaign when no file is given.
fn load_campaign(file: Option<&Path>) -> Result<Campaign, String> {
    match file {
        Some(path) => {
            let json = fs::read_to_string(path)
                .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
            Campaign::from_json(&json).map_err(|e| format!("{}: {e}", path.display()))
        }
        None => Campaign::builtin().map_err(|e| format!("built-in campaign: {e}")),
    }
}
