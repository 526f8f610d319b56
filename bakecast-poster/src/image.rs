//! Find the post's primary image among its attachments.
//!
//! Blogs using this convention upload the hero shot with a fixed filename
//! suffix (`...main.jpg`). Exactly one distinct attachment URL may carry it.

use crate::error::{PosterError, Result};
use bakecast_wordpress::Post;
use std::collections::BTreeSet;

pub const DEFAULT_IMAGE_MARKER: &str = "main.jpg";

/// URL of the single attachment whose URL contains `marker`.
///
/// The same URL listed under two attachment ids counts once.
pub fn locate_image<'a>(post: &'a Post, marker: &str) -> Result<&'a str> {
    let matches: BTreeSet<&str> = post
        .attachments
        .values()
        .map(|a| a.url.as_str())
        .filter(|url| url.contains(marker))
        .collect();

    let mut iter = matches.iter();
    match (iter.next(), iter.next()) {
        (Some(url), None) => Ok(*url),
        (None, _) => Err(PosterError::NoImageFound {
            title: post.title.clone(),
            marker: marker.to_string(),
        }),
        (Some(_), Some(_)) => Err(PosterError::AmbiguousImage {
            title: post.title.clone(),
            marker: marker.to_string(),
            count: matches.len(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bakecast_wordpress::Attachment;
    use std::collections::BTreeMap;

    fn post_with(urls: &[&str]) -> Post {
        Post {
            id: Some(1),
            title: "Sourdough".into(),
            url: "https://bakingbrew.com/sourdough/".into(),
            attachments: urls
                .iter()
                .enumerate()
                .map(|(i, u)| {
                    (
                        (100 + i).to_string(),
                        Attachment {
                            url: (*u).to_string(),
                            mime_type: None,
                        },
                    )
                })
                .collect::<BTreeMap<_, _>>(),
        }
    }

    #[test]
    fn single_match_is_returned() {
        let post = post_with(&[
            "https://bakingbrew.com/up/sourdough-step1.jpg",
            "https://bakingbrew.com/up/sourdough-main.jpg",
            "https://bakingbrew.com/up/sourdough-crumb.jpg",
        ]);
        assert_eq!(
            locate_image(&post, DEFAULT_IMAGE_MARKER).unwrap(),
            "https://bakingbrew.com/up/sourdough-main.jpg"
        );
    }

    #[test]
    fn no_match_is_no_image_found() {
        let post = post_with(&["https://bakingbrew.com/up/sourdough-step1.jpg"]);
        let err = locate_image(&post, DEFAULT_IMAGE_MARKER).unwrap_err();
        match err {
            PosterError::NoImageFound { title, marker } => {
                assert_eq!(title, "Sourdough");
                assert_eq!(marker, "main.jpg");
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn no_attachments_is_no_image_found() {
        let post = post_with(&[]);
        assert!(matches!(
            locate_image(&post, DEFAULT_IMAGE_MARKER),
            Err(PosterError::NoImageFound { .. })
        ));
    }

    #[test]
    fn two_distinct_matches_are_ambiguous() {
        let post = post_with(&[
            "https://bakingbrew.com/up/a-main.jpg",
            "https://bakingbrew.com/up/b-main.jpg",
        ]);
        assert!(matches!(
            locate_image(&post, DEFAULT_IMAGE_MARKER),
            Err(PosterError::AmbiguousImage { count: 2, .. })
        ));
    }

    #[test]
    fn duplicate_url_counts_once() {
        let post = post_with(&[
            "https://bakingbrew.com/up/a-main.jpg",
            "https://bakingbrew.com/up/a-main.jpg",
        ]);
        assert_eq!(
            locate_image(&post, DEFAULT_IMAGE_MARKER).unwrap(),
            "https://bakingbrew.com/up/a-main.jpg"
        );
    }

    #[test]
    fn custom_marker() {
        let post = post_with(&[
            "https://bakingbrew.com/up/a-main.jpg",
            "https://bakingbrew.com/up/a-hero.png",
        ]);
        assert_eq!(
            locate_image(&post, "hero.png").unwrap(),
            "https://bakingbrew.com/up/a-hero.png"
        );
    }
}
