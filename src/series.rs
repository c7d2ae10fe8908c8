//! Series resolution.
//!
//! A post names its series by slug in front matter (`series = "rust-basics"`).
//! The resolver looks the slug up in the configured list and swaps the string
//! for a [`SeriesRef`] carrying the display name and the series page path.
//!
//! An unknown slug is not an error: the post keeps its string and is treated
//! as not belonging to a series. `check` reports these via
//! [`unresolved_series`].

use crate::config::SeriesDefinition;
use crate::types::{ContentFile, Series, SeriesRef};

/// URL path of a series listing page.
pub fn series_path(slug: &str) -> String {
    format!("/series/{slug}")
}

/// Resolve a file's series slug against the configured series list.
///
/// Returns the file with `series` replaced by [`Series::Resolved`] when the
/// slug matches (first match in list order wins). Absent, unknown, or
/// already-resolved series are returned unchanged.
pub fn resolve_series(file: ContentFile, definitions: &[SeriesDefinition]) -> ContentFile {
    let Some(Series::Slug(slug)) = &file.series else {
        return file;
    };
    match definitions.iter().find(|d| &d.slug == slug) {
        Some(definition) => ContentFile {
            series: Some(Series::Resolved(SeriesRef {
                name: definition.name.clone(),
                path: series_path(&definition.slug),
                slug: definition.slug.clone(),
            })),
            ..file
        },
        None => file,
    }
}

/// Files whose series slug names no configured series, with the slug.
pub fn unresolved_series<'a>(
    files: &'a [ContentFile],
    definitions: &[SeriesDefinition],
) -> Vec<(&'a ContentFile, &'a str)> {
    files
        .iter()
        .filter_map(|f| match &f.series {
            Some(Series::Slug(slug)) if !definitions.iter().any(|d| &d.slug == slug) => {
                Some((f, slug.as_str()))
            }
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn definitions() -> Vec<SeriesDefinition> {
        vec![
            SeriesDefinition {
                slug: "web-crypto".into(),
                name: "Web Crypto".into(),
            },
            SeriesDefinition {
                slug: "wsl".into(),
                name: "Windows Subsystem for Linux".into(),
            },
        ]
    }

    fn post(series: Option<Series>) -> ContentFile {
        ContentFile {
            id: "content:blog:post.md".into(),
            path: "/blog/post".into(),
            source: "blog/post.md".into(),
            title: "A Post".into(),
            series,
            updated: None,
        }
    }

    #[test]
    fn known_slug_resolves_to_exact_triple() {
        let resolved = resolve_series(post(Some(Series::Slug("wsl".into()))), &definitions());
        assert_eq!(
            resolved.series,
            Some(Series::Resolved(SeriesRef {
                name: "Windows Subsystem for Linux".into(),
                path: "/series/wsl".into(),
                slug: "wsl".into(),
            }))
        );
    }

    #[test]
    fn other_fields_are_preserved() {
        let original = post(Some(Series::Slug("wsl".into())));
        let resolved = resolve_series(original.clone(), &definitions());
        assert_eq!(resolved.id, original.id);
        assert_eq!(resolved.title, original.title);
        assert_eq!(resolved.path, original.path);
    }

    #[test]
    fn unknown_slug_is_left_as_string() {
        let resolved = resolve_series(post(Some(Series::Slug("nope".into()))), &definitions());
        assert_eq!(resolved.series, Some(Series::Slug("nope".into())));
    }

    #[test]
    fn absent_series_stays_absent() {
        let resolved = resolve_series(post(None), &definitions());
        assert_eq!(resolved.series, None);
    }

    #[test]
    fn empty_definition_list_resolves_nothing() {
        let resolved = resolve_series(post(Some(Series::Slug("wsl".into()))), &[]);
        assert_eq!(resolved.series, Some(Series::Slug("wsl".into())));
    }

    #[test]
    fn first_matching_definition_wins() {
        let mut defs = definitions();
        defs.push(SeriesDefinition {
            slug: "wsl".into(),
            name: "Shadowed".into(),
        });
        let resolved = resolve_series(post(Some(Series::Slug("wsl".into()))), &defs);
        assert_eq!(
            resolved.series.unwrap().resolved().unwrap().name,
            "Windows Subsystem for Linux"
        );
    }

    #[test]
    fn resolving_twice_is_stable() {
        let once = resolve_series(post(Some(Series::Slug("wsl".into()))), &definitions());
        let twice = resolve_series(once.clone(), &definitions());
        assert_eq!(once, twice);
    }

    #[test]
    fn unresolved_lists_only_unknown_slugs() {
        let files = vec![
            post(Some(Series::Slug("wsl".into()))),
            post(Some(Series::Slug("typo".into()))),
            post(None),
        ];
        let unresolved = unresolved_series(&files, &definitions());
        assert_eq!(unresolved.len(), 1);
        assert_eq!(unresolved[0].1, "typo");
    }
}
