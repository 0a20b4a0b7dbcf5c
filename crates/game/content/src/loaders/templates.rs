//! Unit template catalog loader.

use std::path::Path;

use crate::loaders::{LoadResult, read_file};
use crate::templates::TemplateCatalog;

/// Loader for unit templates from RON files.
///
/// RON format: a map from template id to [`UnitTemplate`](crate::UnitTemplate).
pub struct TemplateLoader;

impl TemplateLoader {
    pub fn load(path: &Path) -> LoadResult<TemplateCatalog> {
        let content = read_file(path)?;
        let catalog: TemplateCatalog = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse template catalog RON: {}", e))?;

        Ok(catalog)
    }

    /// Built-in templates overlaid with the ones in `path`.
    pub fn load_with_builtin(path: &Path) -> LoadResult<TemplateCatalog> {
        let mut catalog = TemplateCatalog::builtin();
        catalog.extend(Self::load(path)?);
        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn custom_templates_override_builtin_ones() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "goblin_raider": (
                    name: "Goblin Chief",
                    hp: 45, mp: 0, str: 6, int: 1, def: 3, res: 1,
                    speed: 5, mobility: 4, range: 1, exp_reward: 90,
                ),
                "slime": (
                    name: "Slime",
                    hp: 10, mp: 0, str: 2, int: 0, def: 0, res: 0,
                    speed: 1, mobility: 1, range: 1,
                ),
            }}"#
        )
        .unwrap();

        let catalog = TemplateLoader::load_with_builtin(file.path()).unwrap();

        assert_eq!(catalog.len(), 7);
        assert_eq!(catalog.get("goblin_raider").unwrap().exp_reward, 90);
        assert_eq!(catalog.get("slime").unwrap().exp_reward, 0);
    }
}
