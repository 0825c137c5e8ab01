//! Profile Locator - find the LibreWolf base directory and default profile
//!
//! Reads `profiles.ini` the way the browser does: `[Profile*]` sections with
//! `Path`, `IsRelative` and `Default` keys. Default profiles are tried first
//! and the first one that actually has a prefs.js wins.

use prefpin_core::{PrefError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Flatpak application id for the community LibreWolf build
const FLATPAK_APP_ID: &str = "io.gitlab.librewolf-community";

/// One `[Profile*]` section of profiles.ini
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileSection {
    pub name: String,
    pub path: Option<String>,
    pub is_relative: bool,
    pub is_default: bool,
}

impl ProfileSection {
    /// Absolute profile directory, if the section has a Path
    pub fn resolve(&self, base_dir: &Path) -> Option<PathBuf> {
        let path = self.path.as_deref().filter(|p| !p.is_empty())?;
        if self.is_relative {
            Some(base_dir.join(path))
        } else {
            Some(PathBuf::from(path))
        }
    }
}

/// Locates base directories relative to a home directory
pub struct ProfileLocator {
    home: PathBuf,
}

impl ProfileLocator {
    /// Create a locator rooted at the current user's home directory
    pub fn new() -> Result<Self> {
        let home = dirs::home_dir().ok_or_else(|| {
            PrefError::ProfileNotFound("Could not determine home directory".to_string())
        })?;
        Ok(Self { home })
    }

    pub fn with_home(home: impl Into<PathBuf>) -> Self {
        Self { home: home.into() }
    }

    /// Native install first, then Flatpak
    pub fn candidate_base_dirs(&self) -> Vec<PathBuf> {
        vec![
            self.home.join(".librewolf"),
            self.home
                .join(".var")
                .join("app")
                .join(FLATPAK_APP_ID)
                .join(".librewolf"),
        ]
    }

    /// First candidate with a usable profile, else `~/.librewolf`
    pub fn autodetect_base_dir(&self) -> PathBuf {
        self.candidate_base_dirs()
            .into_iter()
            .find(|dir| pick_default_profile_dir(dir).is_ok())
            .unwrap_or_else(|| self.home.join(".librewolf"))
    }
}

pub fn parse_profiles_ini(content: &str) -> Vec<ProfileSection> {
    let mut sections = Vec::new();
    let mut current: Option<ProfileSection> = None;

    for raw in content.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
            continue;
        }

        if let Some(name) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
            sections.extend(current.take());
            if name.to_ascii_lowercase().starts_with("profile") {
                current = Some(ProfileSection {
                    name: name.to_string(),
                    path: None,
                    is_relative: true,
                    is_default: false,
                });
            }
            continue;
        }

        let (Some(section), Some((key, value))) = (current.as_mut(), line.split_once('=')) else {
            continue;
        };
        let value = value.trim();
        match key.trim().to_ascii_lowercase().as_str() {
            "path" => section.path = Some(value.to_string()),
            "isrelative" => section.is_relative = value == "1",
            "default" => section.is_default = value == "1",
            _ => {}
        }
    }
    sections.extend(current);
    sections
}

pub fn read_profiles_ini(base_dir: &Path) -> Result<Vec<ProfileSection>> {
    let ini = base_dir.join("profiles.ini");
    if !ini.is_file() {
        return Err(PrefError::ProfileNotFound(format!(
            "profiles.ini not found at: {}",
            ini.display()
        )));
    }
    let content = fs::read_to_string(&ini).map_err(|e| {
        PrefError::ProfileNotFound(format!("failed to read {}: {e}", ini.display()))
    })?;
    Ok(parse_profiles_ini(&content))
}

/// Default profiles first (stable otherwise); the first with a prefs.js wins
pub fn pick_default_profile_dir(base_dir: &Path) -> Result<PathBuf> {
    let mut sections = read_profiles_ini(base_dir)?;
    sections.sort_by_key(|s| !s.is_default);

    sections
        .iter()
        .filter_map(|s| s.resolve(base_dir))
        .find(|dir| dir.join("prefs.js").is_file())
        .ok_or_else(|| {
            PrefError::ProfileNotFound(format!(
                "No usable profile found in {}",
                base_dir.display()
            ))
        })
}

pub fn default_output_path(base_dir: &Path, file_name: &str) -> PathBuf {
    base_dir.join(file_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    const INI: &str = "\
[General]
StartWithLastProfile=1

[Profile1]
Name=work
IsRelative=1
Path=abcd.work

[Profile0]
Name=default
IsRelative=1
Path=wxyz.default-release
Default=1
";

    fn make_profile(dir: &Path) {
        fs::create_dir_all(dir).unwrap();
        fs::write(dir.join("prefs.js"), "user_pref(\"a\", true);\n").unwrap();
    }

    #[test]
    fn test_parse_profiles_ini() {
        let sections = parse_profiles_ini(INI);
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].name, "Profile1");
        assert!(!sections[0].is_default);
        assert!(sections[1].is_default);
        assert_eq!(sections[1].path.as_deref(), Some("wxyz.default-release"));
    }

    #[test]
    fn test_absolute_path_resolution() {
        let sections = parse_profiles_ini("[Profile0]\nIsRelative=0\nPath=/srv/profile\n");
        assert_eq!(
            sections[0].resolve(Path::new("/home/me/.librewolf")),
            Some(PathBuf::from("/srv/profile"))
        );
    }

    #[test]
    fn test_default_profile_preferred() {
        let base = tempfile::tempdir().unwrap();
        fs::write(base.path().join("profiles.ini"), INI).unwrap();
        make_profile(&base.path().join("abcd.work"));
        make_profile(&base.path().join("wxyz.default-release"));

        let picked = pick_default_profile_dir(base.path()).unwrap();
        assert_eq!(picked, base.path().join("wxyz.default-release"));
    }

    #[test]
    fn test_falls_back_to_profile_with_prefs() {
        let base = tempfile::tempdir().unwrap();
        fs::write(base.path().join("profiles.ini"), INI).unwrap();
        make_profile(&base.path().join("abcd.work"));

        let picked = pick_default_profile_dir(base.path()).unwrap();
        assert_eq!(picked, base.path().join("abcd.work"));
    }

    #[test]
    fn test_missing_ini_is_profile_not_found() {
        let base = tempfile::tempdir().unwrap();
        let err = pick_default_profile_dir(base.path()).unwrap_err();
        assert!(matches!(err, PrefError::ProfileNotFound(_)));
    }

    #[test]
    fn test_autodetect_prefers_flatpak_when_native_missing() {
        let home = tempfile::tempdir().unwrap();
        let locator = ProfileLocator::with_home(home.path());
        let flatpak = locator.candidate_base_dirs()[1].clone();
        fs::create_dir_all(&flatpak).unwrap();
        fs::write(flatpak.join("profiles.ini"), INI).unwrap();
        make_profile(&flatpak.join("wxyz.default-release"));

        assert_eq!(locator.autodetect_base_dir(), flatpak);
    }

    #[test]
    fn test_autodetect_defaults_to_native_dir() {
        let home = tempfile::tempdir().unwrap();
        let locator = ProfileLocator::with_home(home.path());
        assert_eq!(locator.autodetect_base_dir(), home.path().join(".librewolf"));
    }
}
