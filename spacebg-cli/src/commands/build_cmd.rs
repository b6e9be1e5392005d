use crate::project::WorkspaceContext;

/// Run `wasm-pack build --target web` on the web crate.
pub async fn run(dev: bool, ctx: WorkspaceContext) -> anyhow::Result<()> {
    let wasm_pack = which::which("wasm-pack").map_err(|_| {
        anyhow::anyhow!("wasm-pack not found on PATH. Install it with `cargo install wasm-pack`.")
    })?;

    let args = build_args(dev);
    println!(
        "Building spacebg-web ({}) in {}...",
        if dev { "dev" } else { "release" },
        ctx.web_crate.display()
    );
    log::debug!("Running {} {}", wasm_pack.display(), args.join(" "));

    let status = tokio::process::Command::new(wasm_pack)
        .args(&args)
        .current_dir(&ctx.web_crate)
        .stdin(std::process::Stdio::inherit())
        .stdout(std::process::Stdio::inherit())
        .stderr(std::process::Stdio::inherit())
        .status()
        .await?;

    if !status.success() {
        anyhow::bail!("wasm-pack failed with {status}");
    }
    println!("Package written to {}", ctx.web_crate.join("pkg").display());
    Ok(())
}

fn build_args(dev: bool) -> Vec<&'static str> {
    let profile = if dev { "--dev" } else { "--release" };
    vec!["build", "--target", "web", profile]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_release_args() {
        assert_eq!(build_args(false), ["build", "--target", "web", "--release"]);
    }

    #[test]
    fn test_dev_args() {
        assert_eq!(build_args(true), ["build", "--target", "web", "--dev"]);
    }
}
