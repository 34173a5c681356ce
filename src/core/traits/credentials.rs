/// Port for checking the operator's credentials.
///
/// The session only ever learns pass/fail; where the expected pair
/// lives is the adapter's business, and tests supply fixtures instead
/// of real secrets.
pub trait CredentialVerifier: Send + Sync {
    fn verify(&self, username: &str, password: &str) -> bool;
}
