/// Build the global install directory name for a package version.
///
/// The leading `@` of a scoped name is dropped and the scope separator
/// becomes `-`, then `-v<version>` is appended:
/// `("@scope/pkg", "1.0.0")` becomes `"scope-pkg-v1.0.0"`.
pub fn build_alias(name: &str, version: &str) -> String {
    let base = name.strip_prefix('@').unwrap_or(name).replacen('/', "-", 1);
    format!("{}-v{}", base, version)
}
