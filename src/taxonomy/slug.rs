// This file is part of the product Cyberstats.
// SPDX-FileCopyrightText: 2025-2026 Cyberstats Media Ltd
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

/// Derives a URL-safe slug from free text. This is the single source of
/// truth for slug derivation: tags, publisher names, and category names
/// must all pass through here so that synonym matching and aggregation
/// agree on identity.
///
/// Lowercases, collapses whitespace runs to single hyphens, strips every
/// character outside `[a-z0-9-]`, and trims/collapses hyphens. Idempotent.
pub fn normalize(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_hyphen = false;

    for ch in text.chars() {
        if ch.is_whitespace() || ch == '-' {
            if !slug.is_empty() {
                pending_hyphen = true;
            }
            continue;
        }
        let ch = ch.to_ascii_lowercase();
        if !ch.is_ascii_lowercase() && !ch.is_ascii_digit() {
            continue;
        }
        if pending_hyphen {
            slug.push('-');
            pending_hyphen = false;
        }
        slug.push(ch);
    }

    slug
}

/// Converts a slug back into a display name ("dating-platforms" into
/// "Dating Platforms") for tags that exist outside the curated taxonomy.
pub fn slug_to_title(slug: &str) -> String {
    slug.split('-')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                None => String::new(),
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_lowercases_and_hyphenates() {
        assert_eq!(normalize("Zero Trust"), "zero-trust");
        assert_eq!(normalize("Multi Factor   Authentication"), "multi-factor-authentication");
        assert_eq!(normalize("EDR"), "edr");
    }

    #[test]
    fn normalize_strips_punctuation() {
        assert_eq!(normalize("Identity & Access"), "identity-access");
        assert_eq!(normalize("SOC 2"), "soc-2");
        assert_eq!(normalize("ISO 27001!"), "iso-27001");
    }

    #[test]
    fn normalize_trims_and_collapses_hyphens() {
        assert_eq!(normalize("  --zero---trust--  "), "zero-trust");
        assert_eq!(normalize("- - -"), "");
    }

    #[test]
    fn normalize_is_total_on_junk_input() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("&&&"), "");
        assert_eq!(normalize("日本語"), "");
    }

    #[test]
    fn normalize_is_idempotent() {
        for input in [
            "Zero Trust",
            "  Multi Factor   Authentication ",
            "Identity & Access",
            "already-a-slug",
            "&&&",
            "A  b--C",
        ] {
            let once = normalize(input);
            assert_eq!(normalize(&once), once, "not idempotent for {:?}", input);
        }
    }

    #[test]
    fn normalize_output_shape() {
        for input in ["Zero Trust", "SOC 2", "--x--", "A&B C", ""] {
            let slug = normalize(input);
            if slug.is_empty() {
                continue;
            }
            assert!(!slug.starts_with('-') && !slug.ends_with('-'));
            assert!(!slug.contains("--"));
            assert!(
                slug.chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
            );
        }
    }

    #[test]
    fn slug_to_title_round_trips_simple_names() {
        assert_eq!(slug_to_title("dating-platforms"), "Dating Platforms");
        assert_eq!(slug_to_title("mfa"), "Mfa");
        assert_eq!(slug_to_title(""), "");
    }
}
