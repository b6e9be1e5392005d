use std::path::Path;

use spacebg_core::SceneConfig;

use crate::project::WorkspaceContext;

pub fn run(force: bool, ctx: WorkspaceContext) -> anyhow::Result<()> {
    let path = ctx.config_path();
    write_default_config(&path, force)?;
    println!("Wrote {}", path.display());
    Ok(())
}

/// Write every default scene value to `path` so it can be edited in place.
pub fn write_default_config(path: &Path, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!("{} already exists (use --force to overwrite)", path.display());
    }
    let body = toml::to_string_pretty(&SceneConfig::default())?;
    let content = format!(
        "# spacebg scene config. Every field is optional; omitted fields keep these defaults.\n\
         # Set `seed = <integer>` at the top level for a reproducible layout.\n\n{body}"
    );
    std::fs::write(path, content)?;
    Ok(())
}
