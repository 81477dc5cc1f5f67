use anyhow::{anyhow, Context, Result};
use std::path::{Path, PathBuf};

/// Resolve the service home directory into an absolute path.
///
/// - `None` falls back to `<user home>/<default_subdir>`.
/// - A leading `~` is expanded against the user home.
/// - Relative paths are joined with the current working directory.
pub(crate) fn resolve_home_dir(
    configured: Option<String>,
    default_subdir: &str,
    create: bool,
) -> Result<PathBuf> {
    let resolved = match configured {
        None => user_home()?.join(default_subdir),
        Some(raw) => expand(&raw)?,
    };

    let absolute = if resolved.is_absolute() {
        resolved
    } else {
        std::env::current_dir()
            .context("cannot read current directory")?
            .join(resolved)
    };

    if create {
        std::fs::create_dir_all(&absolute)
            .with_context(|| format!("cannot create home_dir '{}'", absolute.display()))?;
    }
    Ok(absolute)
}

fn expand(raw: &str) -> Result<PathBuf> {
    if raw == "~" {
        return user_home();
    }
    if let Some(rest) = raw.strip_prefix("~/").or_else(|| raw.strip_prefix("~\\")) {
        return Ok(user_home()?.join(rest));
    }
    Ok(Path::new(raw).to_path_buf())
}

/// Platform home directory; on unix this falls back to the passwd entry when
/// `HOME` is unset.
fn user_home() -> Result<PathBuf> {
    dirs::home_dir()
        .ok_or_else(|| anyhow!("cannot determine user home; configure server.home_dir explicitly"))
}
