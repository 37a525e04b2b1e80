//! Loads the shopkeeper's system-instruction template from `PROMPTS_PATH`.

use anyhow::Context;
use magic_shop_core::prompt::DEFAULT_SYSTEM_TEMPLATE;
use std::{fs, io::ErrorKind, path::Path};
use tracing::{info, warn};

pub const SYSTEM_PROMPT_FILE: &str = "system_prompt.md";

/// Reads `system_prompt.md` from `prompts_path`, falling back to the bundled
/// template when the file is absent. Any other read failure is an error.
pub fn load_system_template(prompts_path: &Path) -> anyhow::Result<String> {
    let path = prompts_path.join(SYSTEM_PROMPT_FILE);
    match fs::read_to_string(&path) {
        Ok(template) => {
            info!(path = %path.display(), "Loaded system prompt");
            Ok(template)
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            warn!(path = %path.display(), "System prompt not found; using bundled template");
            Ok(DEFAULT_SYSTEM_TEMPLATE.to_string())
        }
        Err(e) => Err(e).with_context(|| format!("Failed to read {}", path.display())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_template_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(SYSTEM_PROMPT_FILE), "Sell things.\n{catalog}").unwrap();
        // Other prompt files are not read.
        fs::write(dir.path().join("notes.md"), "ignored").unwrap();

        let template = load_system_template(dir.path()).unwrap();
        assert_eq!(template, "Sell things.\n{catalog}");
    }

    #[test]
    fn test_missing_file_falls_back_to_bundled_template() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(load_system_template(dir.path()).unwrap(), DEFAULT_SYSTEM_TEMPLATE);

        let missing_dir = dir.path().join("does-not-exist");
        assert_eq!(load_system_template(&missing_dir).unwrap(), DEFAULT_SYSTEM_TEMPLATE);
    }

    #[test]
    fn test_unreadable_prompt_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        // A directory where the file should be.
        fs::create_dir(dir.path().join(SYSTEM_PROMPT_FILE)).unwrap();
        assert!(load_system_template(dir.path()).is_err());
    }
}
