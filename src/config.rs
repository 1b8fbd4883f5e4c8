use std::path::{Path, PathBuf};

use crate::models::Config;

const SAMPLE_CONFIG: &str = include_str!("../config.sample.toml");

/// Load and merge one or more config files. Files that don't exist are
/// skipped so the service can run on defaults.
pub fn load_all(paths: &[PathBuf]) -> Config {
    let mut config: Option<Config> = None;

    for path in paths {
        if !path.exists() {
            log::warn!("config {} not found, skipping", path.display());
            continue;
        }

        log::info!("loading config: {}", path.display());
        match read_file(path) {
            Ok(c) => {
                if let Some(ref mut existing) = config {
                    // Merge configs.
                    merge(existing, c);
                } else {
                    config = Some(c);
                }
            }
            Err(e) => {
                log::error!("error loading config {}: {}", path.display(), e);
                std::process::exit(1);
            }
        }
    }

    config.unwrap_or_else(|| {
        log::info!("no config loaded, using defaults");
        Config::default()
    })
}

/// Generate sample config file.
pub fn generate_sample(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    if path.exists() {
        return Err("config file already exists".into());
    }
    std::fs::write(path, SAMPLE_CONFIG)?;
    Ok(())
}

/// Load configuration from a given TOML file.
fn read_file(path: &Path) -> Result<Config, Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(path)?;
    let cfg: Config = toml::from_str(&content)?;
    Ok(cfg)
}

/// Merge the given src config into the dest config struct.
fn merge(dest: &mut Config, src: Config) {
    if !src.app.address.is_empty() {
        dest.app.address = src.app.address;
    }

    // Data paths.
    if !src.data.words.is_empty() {
        dest.data.words = src.data.words;
    }
    if !src.data.frequencies.is_empty() {
        dest.data.frequencies = src.data.frequencies;
    }
    if !src.data.recent.is_empty() {
        dest.data.recent = src.data.recent;
    }

    // Ranking.
    if src.suggest.candidate_limit > 0 {
        dest.suggest.candidate_limit = src.suggest.candidate_limit;
    }
    if src.suggest.top_k > 0 {
        dest.suggest.top_k = src.suggest.top_k;
    }
    if src.suggest.recent_max > 0 {
        dest.suggest.recent_max = src.suggest.recent_max;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_parses() {
        let cfg: Config = toml::from_str(SAMPLE_CONFIG).unwrap();
        assert_eq!(cfg.app.address, "127.0.0.1:9090");
        assert_eq!(cfg.suggest.top_k, 10);
    }

    #[test]
    fn later_files_override() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.toml");
        let b = dir.path().join("b.toml");
        std::fs::write(&a, "[app]\naddress = \"0.0.0.0:1\"\n[suggest]\ntop_k = 3\n").unwrap();
        std::fs::write(&b, "[data]\nwords = \"hi.txt\"\n[suggest]\ntop_k = 7\n").unwrap();

        let cfg = load_all(&[a, dir.path().join("missing.toml"), b]);
        assert_eq!(cfg.app.address, "0.0.0.0:1");
        assert_eq!(cfg.data.words, "hi.txt");
        assert_eq!(cfg.suggest.top_k, 7);
    }

    #[test]
    fn refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("config.toml");
        generate_sample(&p).unwrap();
        assert!(generate_sample(&p).is_err());
    }
}
