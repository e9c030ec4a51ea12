//! Keybinding management methods for `Config`.

use super::config_struct::Config;
use std::collections::HashSet;

impl Config {
    /// Merge default keybindings into the user's config.
    /// Only adds keybindings for actions that don't already exist in the user's config.
    pub(crate) fn merge_default_keybindings(&mut self) {
        let existing_actions: HashSet<String> = self
            .keybindings
            .iter()
            .map(|kb| kb.action.clone())
            .collect();

        let mut added_count = 0;
        for default_kb in crate::defaults::keybindings() {
            if !existing_actions.contains(&default_kb.action) {
                log::info!(
                    "Adding new default keybinding: {} -> {}",
                    default_kb.key,
                    default_kb.action
                );
                self.keybindings.push(default_kb);
                added_count += 1;
            }
        }

        if added_count > 0 {
            log::info!(
                "Merged {} new default keybinding(s) into user config",
                added_count
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{Config, KeyBinding};

    #[test]
    fn test_merge_keeps_user_binding_and_adds_missing() {
        let mut config = Config {
            keybindings: vec![KeyBinding::new("F5", "run_code")],
            ..Config::default()
        };
        config.merge_default_keybindings();

        let run: Vec<_> = config
            .keybindings
            .iter()
            .filter(|kb| kb.action == "run_code")
            .collect();
        assert_eq!(run.len(), 1);
        assert_eq!(run[0].key, "F5");
        assert!(config.keybindings.iter().any(|kb| kb.action == "new_tab"));
        assert_eq!(
            config.keybindings.len(),
            crate::defaults::keybindings().len()
        );
    }
}
