//! Payee identifier format checks.

pub const HANDLE_MIN_LEN: usize = 2;
pub const HANDLE_MAX_LEN: usize = 256;
pub const PROVIDER_MIN_LEN: usize = 2;
pub const PROVIDER_MAX_LEN: usize = 64;

fn is_handle_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || matches!(ch, '.' | '-' | '_')
}

/// Returns true when `upi_id` is `<handle>@<provider>`, where the handle is 2..=256 characters of
/// ASCII letters, digits, `.`, `-` or `_`, and the provider is 2..=64 ASCII letters.
pub fn validate_upi_id(upi_id: &str) -> bool {
    let (handle, provider) = match upi_id.split_once('@') {
        Some(parts) => parts,
        None => return false,
    };

    // Both halves are checked for ASCII before their byte lengths are trusted as char counts
    handle.chars().all(is_handle_char)
        && (HANDLE_MIN_LEN..=HANDLE_MAX_LEN).contains(&handle.len())
        && provider.chars().all(|ch| ch.is_ascii_alphabetic())
        && (PROVIDER_MIN_LEN..=PROVIDER_MAX_LEN).contains(&provider.len())
}
