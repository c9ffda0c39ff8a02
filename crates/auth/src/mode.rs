/// Whether the trust boundary is enforced.
///
/// Injected once at startup from configuration; call sites must never probe
/// the process environment themselves. `Bypassed` exists for test and local
/// development deployments and short-circuits the resolver with a fixed
/// development context in exactly one place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMode {
    #[default]
    Enforced,
    Bypassed,
}

impl AuthMode {
    /// Parses a configuration string. Anything other than an explicit
    /// `bypassed` enforces authentication.
    pub fn parse(s: &str) -> Self {
        if s.trim().eq_ignore_ascii_case("bypassed") {
            AuthMode::Bypassed
        } else {
            AuthMode::Enforced
        }
    }
}
