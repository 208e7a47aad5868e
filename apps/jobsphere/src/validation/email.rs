/// Address suffixes allowed to sign up or log in.
const ALLOWED_SUFFIXES: &[&str] = &["@gmail.com", ".edu.in"];

/// True iff `email` ends with `@gmail.com` or `.edu.in`.
///
/// A plain suffix test: no syntax, domain or MX checks, so `"@gmail.com"` on
/// its own passes and `"x@GMAIL.COM"` does not.
pub fn is_allowed_email(email: &str) -> bool {
    ALLOWED_SUFFIXES.iter().any(|suffix| email.ends_with(suffix))
}
