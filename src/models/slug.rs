//! Player-key slugs for detail-page URLs.

/// Convert a player key ("Patrick Mahomes") into a URL slug
/// ("patrick-mahomes"): trim, lowercase, collapse whitespace runs to `-`.
pub fn player_key_to_slug(player_key: &str) -> String {
    player_key
        .trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

/// Invert [`player_key_to_slug`]: dashes back to spaces. Lossy for names
/// that contained literal dashes; the routing scheme accepts that.
pub fn slug_to_player_key(slug: &str) -> String {
    slug.replace('-', " ")
}

/// Title-case a lowercased player key for the exact-name store lookup.
pub fn title_case(value: &str) -> String {
    value
        .split(' ')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_round_trip() {
        assert_eq!(player_key_to_slug("Patrick Mahomes"), "patrick-mahomes");
        assert_eq!(slug_to_player_key("patrick-mahomes"), "patrick mahomes");
    }

    #[test]
    fn test_slug_collapses_whitespace() {
        assert_eq!(player_key_to_slug("  Ja'Marr   Chase "), "ja'marr-chase");
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("patrick mahomes"), "Patrick Mahomes");
        assert_eq!(title_case("  d  "), "D");
        assert_eq!(title_case(""), "");
    }
}
