///
/// EngineConfig
///
/// Process-wide behavior switches, constructed once at startup and threaded
/// through every invocation. Never mutated concurrently with requests.
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct EngineConfig {
    /// Fail a whole invocation level with `Error::InvalidAssociation` when
    /// an unknown association is requested. Off: unknown names are dropped
    /// silently.
    pub validate_associations: bool,

    /// Collect a `Warning` per requested optional field unknown to the
    /// top-level schema. Advisory only; never aborts resolution.
    pub warn_invalid_fields: bool,
}

impl EngineConfig {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            validate_associations: false,
            warn_invalid_fields: false,
        }
    }

    #[must_use]
    pub const fn validate_associations(mut self, on: bool) -> Self {
        self.validate_associations = on;
        self
    }

    #[must_use]
    pub const fn warn_invalid_fields(mut self, on: bool) -> Self {
        self.warn_invalid_fields = on;
        self
    }
}
