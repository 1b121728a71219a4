use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::debug;

use crate::endpoint::DEFAULT_API_URL;
use crate::error::{Error, Result};

pub(crate) const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// API root, `https://api.openaq.org` unless overridden.
    pub url: String,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Whether to verify TLS certificates.
    pub verify: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_API_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            verify: true,
        }
    }
}

#[derive(Debug, Default, PartialEq)]
struct RcConfig {
    url: Option<String>,
    timeout: Option<String>,
    verify: Option<bool>,
}

/// Resolves configuration from (in order of precedence) explicit arguments,
/// `OPENAQ_API_URL` / `OPENAQ_TIMEOUT` / `OPENAQ_VERIFY`, the first rc file
/// found, then built-in defaults.
pub(crate) fn load_config(
    url: Option<String>,
    timeout: Option<Duration>,
    verify: Option<bool>,
) -> Result<ClientConfig> {
    resolve(
        url,
        timeout,
        verify,
        |name| std::env::var(name).ok(),
        &rc_candidates(),
    )
}

fn resolve<E>(
    url: Option<String>,
    timeout: Option<Duration>,
    verify: Option<bool>,
    env: E,
    rc_candidates: &[PathBuf],
) -> Result<ClientConfig>
where
    E: Fn(&str) -> Option<String>,
{
    let mut url = url.or_else(|| env("OPENAQ_API_URL"));
    let mut timeout_raw = env("OPENAQ_TIMEOUT");
    let mut verify = verify.or_else(|| env("OPENAQ_VERIFY").map(|v| parse_flag(&v)));

    if url.is_none() || (timeout.is_none() && timeout_raw.is_none()) || verify.is_none() {
        for rc_path in rc_candidates {
            if rc_path.exists() {
                debug!(path = %rc_path.display(), "reading configuration file");
                let cfg = read_rc(rc_path)?;

                if url.is_none() {
                    url = cfg.url;
                }
                if timeout_raw.is_none() {
                    timeout_raw = cfg.timeout;
                }
                if verify.is_none() {
                    verify = cfg.verify;
                }
                break;
            }
        }
    }

    let timeout = match (timeout, timeout_raw) {
        (Some(t), _) => t,
        (None, Some(raw)) => parse_timeout(&raw)?,
        (None, None) => DEFAULT_TIMEOUT,
    };

    Ok(ClientConfig {
        url: url
            .filter(|u| !u.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
        timeout,
        verify: verify.unwrap_or(true),
    })
}

fn parse_flag(v: &str) -> bool {
    !matches!(v.trim().to_lowercase().as_str(), "0" | "false" | "no" | "off")
}

/// Seconds, fractional allowed.
fn parse_timeout(raw: &str) -> Result<Duration> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|s| *s > 0.0)
        .and_then(|s| Duration::try_from_secs_f64(s).ok())
        .ok_or_else(|| {
            Error::Config(format!(
                "timeout must be a positive number of seconds (got `{}`)",
                raw.trim()
            ))
        })
}

fn read_rc(path: &Path) -> Result<RcConfig> {
    let text = std::fs::read_to_string(path).map_err(|e| {
        Error::Config(format!(
            "failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;
    Ok(parse_rc(&text))
}

fn parse_rc(text: &str) -> RcConfig {
    let mut cfg = RcConfig::default();

    // A key may be left empty with its value on the following line.
    let mut pending_key: Option<&str> = None;

    for raw in text.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if let Some(pk) = pending_key.take() {
            // Continuation value line. URLs contain ':', so only a `key:` form ends it.
            if !looks_like_key(line) {
                cfg.set(pk, strip_quotes(line));
                continue;
            }
        }

        if let Some((k, v)) = line.split_once(':') {
            let k = k.trim();
            let v = strip_quotes(v.trim());
            match k {
                "url" | "timeout" | "verify" => {
                    if v.is_empty() {
                        pending_key = Some(k);
                    } else {
                        cfg.set(k, v);
                    }
                }
                _ => {}
            }
        }
    }

    cfg
}

impl RcConfig {
    fn set(&mut self, key: &str, value: &str) {
        match key {
            "url" => self.url = Some(value.to_string()),
            "timeout" => self.timeout = Some(value.to_string()),
            "verify" => self.verify = Some(parse_flag(value)),
            _ => {}
        }
    }
}

fn looks_like_key(line: &str) -> bool {
    line.split_once(':')
        .is_some_and(|(k, _)| matches!(k.trim(), "url" | "timeout" | "verify"))
}

fn strip_quotes(s: &str) -> &str {
    let s = s.trim();
    if (s.starts_with('"') && s.ends_with('"') && s.len() >= 2)
        || (s.starts_with('\'') && s.ends_with('\'') && s.len() >= 2)
    {
        &s[1..s.len() - 1]
    } else {
        s
    }
}

fn rc_candidates() -> Vec<PathBuf> {
    // 1) OPENAQ_RC (explicit)
    // 2) ./.openaqrc
    // 3) ~/.openaqrc
    if let Ok(p) = std::env::var("OPENAQ_RC") {
        return vec![PathBuf::from(p)];
    }

    let mut v = Vec::new();
    if let Ok(cwd) = std::env::current_dir() {
        v.push(cwd.join(".openaqrc"));
    }
    if let Some(home) = dirs::home_dir() {
        v.push(home.join(".openaqrc"));
    }
    v
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;
    use std::io::Write;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn defaults_without_any_source() {
        let cfg = resolve(None, None, None, no_env, &[]).unwrap();
        assert_eq!(cfg, ClientConfig::default());
        assert_eq!(cfg.url, "https://api.openaq.org");
        assert_eq!(cfg.timeout, Duration::from_secs(60));
    }

    #[test]
    fn parse_rc_reads_keys_comments_and_quotes() {
        let cfg = parse_rc(
            "# local mirror\nurl: \"http://localhost:3004\"\ntimeout: 12.5\nverify: 0\nkey: ignored\n",
        );
        assert_eq!(
            cfg,
            RcConfig {
                url: Some("http://localhost:3004".to_string()),
                timeout: Some("12.5".to_string()),
                verify: Some(false),
            }
        );
    }

    #[test]
    fn parse_rc_value_on_next_line() {
        let cfg = parse_rc("url:\n  'https://mirror.example.org'\nverify:\n1\n");
        assert_eq!(cfg.url.as_deref(), Some("https://mirror.example.org"));
        assert_eq!(cfg.verify, Some(true));
    }

    #[test]
    fn rc_file_fills_gaps_and_explicit_wins() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "url: http://rc.example\ntimeout: 5").unwrap();
        let candidates = vec![file.path().to_path_buf()];

        let cfg = resolve(None, None, None, no_env, &candidates).unwrap();
        assert_eq!(cfg.url, "http://rc.example");
        assert_eq!(cfg.timeout, Duration::from_secs(5));
        assert!(cfg.verify);

        let cfg = resolve(
            Some("http://explicit.example".to_string()),
            Some(Duration::from_secs(1)),
            Some(false),
            no_env,
            &candidates,
        )
        .unwrap();
        assert_eq!(cfg.url, "http://explicit.example");
        assert_eq!(cfg.timeout, Duration::from_secs(1));
        assert!(!cfg.verify);
    }

    #[test]
    fn environment_beats_rc_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "url: http://rc.example\ntimeout: 5\nverify: 0").unwrap();
        let env: HashMap<&str, &str> = [
            ("OPENAQ_API_URL", "http://env.example"),
            ("OPENAQ_TIMEOUT", "2"),
        ]
        .into_iter()
        .collect();

        let cfg = resolve(
            None,
            None,
            None,
            |k| env.get(k).map(|v| v.to_string()),
            &[file.path().to_path_buf()],
        )
        .unwrap();
        assert_eq!(cfg.url, "http://env.example");
        assert_eq!(cfg.timeout, Duration::from_secs(2));
        assert!(!cfg.verify);
    }

    #[test]
    fn first_existing_candidate_only() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        let second = dir.path().join("second");
        let third = dir.path().join("third");
        std::fs::write(&second, "url: http://second.example\n").unwrap();
        std::fs::write(&third, "url: http://third.example\ntimeout: 9\n").unwrap();

        let cfg = resolve(None, None, None, no_env, &[missing, second, third]).unwrap();
        assert_eq!(cfg.url, "http://second.example");
        assert_eq!(cfg.timeout, DEFAULT_TIMEOUT);
    }

    #[test]
    fn bad_timeout_is_a_config_error() {
        let err = resolve(
            None,
            None,
            None,
            |k| (k == "OPENAQ_TIMEOUT").then(|| "soon".to_string()),
            &[],
        )
        .unwrap_err();
        assert!(matches!(err, Error::Config(_)));

        let err = resolve(
            None,
            None,
            None,
            |k| (k == "OPENAQ_TIMEOUT").then(|| "1e20".to_string()),
            &[],
        )
        .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(parse_timeout("-1").is_err());
        assert!(parse_timeout("0").is_err());
        assert!(parse_timeout("1e20").is_err());
        assert!(parse_timeout("inf").is_err());
        assert!(parse_timeout("NaN").is_err());
        assert_eq!(parse_timeout(" 0.5 ").unwrap(), Duration::from_millis(500));
    }
}
