// Identity Provider Port
// Supplies the worker identity used for bare `@` references

/// Worker identity source (host name, platform dyno name, ...)
pub trait IdentityProvider: Send + Sync {
    fn identity(&self) -> String;
}

