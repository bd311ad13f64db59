use rayon::prelude::*;
use serde::Serialize;
use thiserror::Error;

use crate::engine::color::{rgb_to_lab, RgbColor};
use crate::engine::delta_e::delta_e2000;
use crate::engine::palettes::{Palette, PaletteEntry};
use crate::types::MatcherOptions;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("cannot rank against an empty palette")]
pub struct EmptyPaletteError;

/// A palette entry and its ΔE00 to the query that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RankedMatch<'p> {
    #[serde(flatten)]
    pub entry: &'p PaletteEntry,
    pub distance: f64,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Matcher {
    options: MatcherOptions,
}

impl Matcher {
    pub fn new(options: MatcherOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> MatcherOptions {
        self.options
    }

    /// Palette entries closest to `query`, nearest first, at most `limit` of them.
    /// Equal distances keep palette order.
    pub fn rank<'p>(
        &self,
        query: RgbColor,
        palette: &'p Palette,
        limit: usize,
    ) -> Result<Vec<RankedMatch<'p>>, EmptyPaletteError> {
        if palette.is_empty() {
            return Err(EmptyPaletteError);
        }
        if limit == 0 {
            return Ok(Vec::new());
        }

        let target = rgb_to_lab(query);
        let score = |entry: &'p PaletteEntry| RankedMatch {
            entry,
            distance: delta_e2000(target, entry.lab()),
        };
        let mut matches: Vec<RankedMatch<'p>> = if palette.size() >= self.options.parallel_threshold {
            log::trace!("scoring {} palette entries in parallel", palette.size());
            palette.entries().par_iter().map(score).collect()
        } else {
            palette.iter().map(score).collect()
        };

        // sort_by is stable: ties stay in palette order
        matches.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        matches.truncate(limit);
        Ok(matches)
    }

    pub fn best<'p>(&self, query: RgbColor, palette: &'p Palette) -> Result<RankedMatch<'p>, EmptyPaletteError> {
        self.rank(query, palette, 1)?
            .into_iter()
            .next()
            .ok_or(EmptyPaletteError)
    }
}

/// [`Matcher::rank`] with default options.
pub fn rank(query: RgbColor, palette: &Palette, limit: usize) -> Result<Vec<RankedMatch<'_>>, EmptyPaletteError> {
    Matcher::default().rank(query, palette, limit)
}
