use std::env;
use std::path::{Component, Path, PathBuf};

/// Replaces a leading `~` with the current user's home directory.
///
/// `~user` forms and paths without a tilde are returned unchanged, as is
/// everything when `HOME` is not set.
pub fn expandtilde<P: AsRef<Path>>(path: P) -> PathBuf {
    let path = path.as_ref();
    let mut components = path.components();
    match components.next() {
        Some(Component::Normal(first)) if first == "~" => match home_dir() {
            Some(mut home) => {
                let rest = components.as_path();
                if !rest.as_os_str().is_empty() {
                    home.push(rest);
                }
                home
            }
            None => path.to_path_buf(),
        },
        _ => path.to_path_buf(),
    }
}

pub fn home_dir() -> Option<PathBuf> {
    env::var_os("HOME")
        .filter(|h| !h.is_empty())
        .map(PathBuf::from)
}
