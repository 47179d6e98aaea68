/// Audit settings, built once by the caller and passed by reference to the
/// tree driver, the resolver and the confirmation controller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Config {
    /// Collapse internal runs of whitespace to a single space (implies trim).
    pub collapse_white: bool,

    /// Report every visited path.
    pub verbose: bool,

    /// Emit internal trace messages. Implies `verbose`.
    pub debug: bool,
}

impl Config {
    /// Whether visited paths should be reported.
    pub fn verbose(&self) -> bool {
        self.verbose || self.debug
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_implies_verbose() {
        let config = Config { debug: true, ..Config::default() };
        assert!(config.verbose());
        assert!(!Config::default().verbose());
    }
}
