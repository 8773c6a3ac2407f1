// ABOUTME: Remote shell selection for rsync's -e option.
// ABOUTME: Models the shell as structured data and quotes it only when rendered.

use std::fmt;

/// Program rsync should use to reach the remote host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteShell {
    Ssh,
    /// User-supplied command, passed to rsync single-quoted.
    Custom(String),
}

/// Resolved remote shell invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transport {
    pub shell: RemoteShell,
    pub identity: Option<String>,
    pub port: Option<u16>,
}

/// Returns the port if it is a usable TCP port.
pub fn valid_port(port: i64) -> Option<u16> {
    u16::try_from(port).ok().filter(|p| *p != 0)
}

impl Transport {
    /// Pick the remote shell for the given settings.
    ///
    /// Returns `None` when rsync's default shell should be used. A key is only
    /// applied together with a valid port.
    pub fn resolve(port: Option<i64>, key: Option<&str>, rsh: Option<&str>) -> Option<Self> {
        let port = port.and_then(|p| {
            let valid = valid_port(p);
            if valid.is_none() {
                tracing::debug!("Ignoring invalid port {}", p);
            }
            valid
        });
        let rsh = rsh.filter(|s| !s.trim().is_empty());
        let identity = port
            .and(key)
            .filter(|k| !k.is_empty())
            .map(str::to_string);

        match (rsh, port) {
            (Some(rsh), _) => Some(Transport {
                shell: RemoteShell::Custom(rsh.to_string()),
                identity,
                port,
            }),
            (None, Some(port)) => Some(Transport {
                shell: RemoteShell::Ssh,
                identity,
                port: Some(port),
            }),
            (None, None) => None,
        }
    }

    /// The single string handed to rsync after `-e`.
    pub fn render(&self) -> String {
        let mut parts = vec![match &self.shell {
            RemoteShell::Ssh => "ssh".to_string(),
            RemoteShell::Custom(cmd) => single_quote(cmd),
        }];
        if let Some(identity) = &self.identity {
            parts.push("-i".to_string());
            parts.push(quote_path(identity));
        }
        if let Some(port) = self.port {
            parts.push("-p".to_string());
            parts.push(port.to_string());
        }
        parts.join(" ")
    }
}

impl fmt::Display for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Paths rsync would split into several words get quoted; anything else,
/// including `~/...`, is passed through as written.
fn quote_path(path: &str) -> String {
    let splits = path
        .chars()
        .any(|c| c.is_whitespace() || matches!(c, '\'' | '"' | '\\'));
    if splits {
        shell_words::quote(path).into_owned()
    } else {
        path.to_string()
    }
}

fn single_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}
