use crate::recon::lookup::LookupResult;

/// Optional port filter parsed once from the CLI `--ports` string. Tokens
/// are kept as given; matching trims them but output preserves their text.
#[derive(Debug, Clone, Default)]
pub struct PortFilter {
    tokens: Vec<String>,
}

impl PortFilter {
    pub fn parse(spec: &str) -> Self {
        if spec.is_empty() {
            return Self::default();
        }
        Self {
            tokens: spec.split(',').map(str::to_string).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// One `<ip>:<port>` line per reportable port. With no filter tokens,
    /// every port in the result is reported in result order; otherwise each
    /// token is tested in the order given, without deduplication. Tokens
    /// that fail to parse fall back to port 0 and can only match a result
    /// that actually reports port 0.
    pub fn match_lines(&self, result: &LookupResult) -> Vec<String> {
        let mut lines = Vec::new();
        if self.tokens.is_empty() {
            for port in &result.ports {
                lines.push(format!("{}:{}", result.ip, port));
            }
        } else {
            for token in &self.tokens {
                let token = token.trim();
                let port = token.parse::<u16>().unwrap_or(0);
                if result.ports.contains(&port) {
                    lines.push(format!("{}:{}", result.ip, token));
                }
            }
        }
        lines
    }
}
