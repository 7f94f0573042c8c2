//! ORCID identifier validation.

/// Check an ORCID such as `0000-0002-1825-0097`.
///
/// The identifier must consist of four hyphen-separated groups of four
/// characters. All characters are digits except the final check character,
/// which may be `X`. The check character must match the ISO 7064 MOD 11-2
/// checksum over the preceding fifteen digits.
pub fn is_orcid(orcid: &str) -> bool {
    let groups: Vec<&str> = orcid.split('-').collect();
    if groups.len() != 4 || groups.iter().any(|g| g.len() != 4) {
        return false;
    }

    let chars: Vec<char> = groups.concat().chars().collect();
    let Some((&check, base)) = chars.split_last() else {
        return false;
    };
    if !base.iter().all(char::is_ascii_digit) {
        return false;
    }

    let digits = base.iter().filter_map(|c| c.to_digit(10));
    match checksum(digits) {
        10 => check == 'X',
        value => check.to_digit(10) == Some(value),
    }
}

/// ISO 7064 MOD 11-2 check value, 10 standing for `X`.
fn checksum(digits: impl Iterator<Item = u32>) -> u32 {
    let total = digits.fold(0, |total, digit| (total + digit) * 2);
    (12 - total % 11) % 11
}
