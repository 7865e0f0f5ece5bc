//! # Path Conventions — `game_data/` Layout
//!
//! Standardized path construction for the campaign workspace. Every tool
//! that reads or writes campaign documents goes through these joiners so
//! the directory layout is defined in exactly one place:
//!
//! ```text
//! <root>/game_data/
//!   npcs/                      one JSON profile per NPC
//!   characters/                one JSON profile per player character
//!   current_party/current_party.json
//!   items/custom_items_registry.json
//! ```

use std::path::{Path, PathBuf};

/// Path to the `game_data` directory under a campaign workspace root.
pub fn game_data_dir(root: &Path) -> PathBuf {
    root.join("game_data")
}

/// Directory holding NPC profile documents.
pub fn npcs_dir(root: &Path) -> PathBuf {
    game_data_dir(root).join("npcs")
}

/// Directory holding player-character profile documents.
pub fn characters_dir(root: &Path) -> PathBuf {
    game_data_dir(root).join("characters")
}

/// The current-party roster document.
pub fn party_file(root: &Path) -> PathBuf {
    game_data_dir(root).join("current_party").join("current_party.json")
}

/// The custom-items registry document.
pub fn items_registry_file(root: &Path) -> PathBuf {
    game_data_dir(root).join("items").join("custom_items_registry.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_under_root() {
        let root = Path::new("/campaign");
        assert_eq!(npcs_dir(root), Path::new("/campaign/game_data/npcs"));
        assert_eq!(
            party_file(root),
            Path::new("/campaign/game_data/current_party/current_party.json")
        );
        assert_eq!(
            items_registry_file(root),
            Path::new("/campaign/game_data/items/custom_items_registry.json")
        );
    }
}
