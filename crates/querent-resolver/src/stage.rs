use std::fmt;

/// Routing position of a resolution.
///
/// `CacheCheck → {Generate, Execute} → Terminal`. There is no edge back to an
/// earlier stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    CacheCheck,
    Generate,
    Execute,
    Terminal,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::CacheCheck => "cache_check",
            Stage::Generate => "generate",
            Stage::Execute => "execute",
            Stage::Terminal => "terminal",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Stage::Terminal)
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
