//! Uniform choice of one post from the returned page.
//!
//! The index is drawn from the posts that actually came back. `found` only
//! says how many posts matched on the server and may exceed the page size.

use crate::error::{PosterError, Result};
use bakecast_wordpress::{Post, PostListing};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of the random index. `len` is always at least 1 and the result
/// must be `< len`.
pub trait IndexPicker: Send {
    fn pick(&mut self, len: usize) -> usize;
}

#[derive(Debug)]
pub struct RandomPicker {
    rng: StdRng,
}

impl RandomPicker {
    /// Seeded from OS entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible sequence for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomPicker {
    fn default() -> Self {
        Self::new()
    }
}

impl IndexPicker for RandomPicker {
    fn pick(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }
}

/// Always returns the same index; used to pin a run to a known post.
#[derive(Debug, Clone, Copy)]
pub struct FixedPicker(pub usize);

impl IndexPicker for FixedPicker {
    fn pick(&mut self, _len: usize) -> usize {
        self.0
    }
}

/// Pick one post uniformly from `listing.posts`.
pub fn select_post<'a>(
    listing: &'a PostListing,
    picker: &mut dyn IndexPicker,
) -> Result<(usize, &'a Post)> {
    let len = listing.posts.len();
    if len == 0 {
        return Err(PosterError::EmptyListing {
            found: listing.found,
        });
    }
    if listing.found > len as u64 {
        tracing::warn!(
            found = listing.found,
            returned = len,
            "only the first page is sampled"
        );
    }

    // A misbehaving picker must not turn into an out-of-range access.
    let index = picker.pick(len).min(len - 1);
    Ok((index, &listing.posts[index]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn listing(found: u64, n: usize) -> PostListing {
        PostListing {
            found,
            posts: (0..n)
                .map(|i| Post {
                    id: Some(i as u64),
                    title: format!("Loaf {i}"),
                    url: format!("https://bakingbrew.com/loaf-{i}/"),
                    attachments: BTreeMap::new(),
                })
                .collect(),
        }
    }

    #[test]
    fn empty_listing_is_an_error_not_an_index() {
        let err = select_post(&listing(0, 0), &mut RandomPicker::seeded(1)).unwrap_err();
        assert!(matches!(err, PosterError::EmptyListing { found: 0 }));

        // `found` can be non-zero while the page is empty (past the last page).
        let err = select_post(&listing(7, 0), &mut RandomPicker::seeded(1)).unwrap_err();
        assert!(matches!(err, PosterError::EmptyListing { found: 7 }));
    }

    #[test]
    fn index_stays_in_bounds_when_found_is_len_minus_one() {
        let l = listing(4, 5);
        let mut picker = RandomPicker::seeded(42);
        for _ in 0..1_000 {
            let (i, post) = select_post(&l, &mut picker).unwrap();
            assert!(i < 5);
            assert_eq!(post.title, format!("Loaf {i}"));
        }
    }

    #[test]
    fn index_uses_page_length_not_found() {
        // 212 matches on the server, 3 on the page.
        let l = listing(212, 3);
        let mut picker = RandomPicker::seeded(7);
        let mut seen = [false; 3];
        for _ in 0..500 {
            let (i, _) = select_post(&l, &mut picker).unwrap();
            seen[i] = true;
        }
        assert_eq!(seen, [true, true, true], "every returned post is reachable");
    }

    #[test]
    fn single_post_is_always_chosen() {
        let l = listing(1, 1);
        let (i, post) = select_post(&l, &mut RandomPicker::new()).unwrap();
        assert_eq!(i, 0);
        assert_eq!(post.title, "Loaf 0");
    }

    #[test]
    fn fixed_picker_pins_the_choice_and_is_clamped() {
        let l = listing(5, 5);
        assert_eq!(select_post(&l, &mut FixedPicker(2)).unwrap().0, 2);
        assert_eq!(select_post(&l, &mut FixedPicker(99)).unwrap().0, 4);
    }

    #[test]
    fn same_seed_same_sequence() {
        let l = listing(100, 100);
        let mut a = RandomPicker::seeded(9);
        let mut b = RandomPicker::seeded(9);
        for _ in 0..20 {
            assert_eq!(
                select_post(&l, &mut a).unwrap().0,
                select_post(&l, &mut b).unwrap().0
            );
        }
    }
}
