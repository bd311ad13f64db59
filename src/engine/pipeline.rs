use rand::Rng;
use serde::Serialize;
use thiserror::Error;

use super::color::{ParseError, RgbColor};
use super::matcher::{EmptyPaletteError, Matcher, RankedMatch};
use super::palettes::{Palette, ValidationError};
use crate::types::MatchRequest;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    EmptyPalette(#[from] EmptyPaletteError),
}

/// Ranked matches split the way a results view shows them: one headline
/// match and the runners-up.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchReport<'p> {
    /// Normalized `#RRGGBB` of the query
    pub query: String,
    pub best: Option<RankedMatch<'p>>,
    pub suggestions: Vec<RankedMatch<'p>>,
}

impl<'p> MatchReport<'p> {
    fn from_ranked(query: RgbColor, ranked: Vec<RankedMatch<'p>>) -> Self {
        let mut ranked = ranked.into_iter();
        let best = ranked.next();
        Self {
            query: query.to_hex(),
            best,
            suggestions: ranked.collect(),
        }
    }
}

pub fn find_closest_matches<'p>(
    req: &MatchRequest,
    palette: &'p Palette,
) -> Result<Vec<RankedMatch<'p>>, EngineError> {
    let query = RgbColor::from_hex(&req.color)?;
    Ok(Matcher::default().rank(query, palette, req.limit)?)
}

pub fn match_color<'p>(req: &MatchRequest, palette: &'p Palette) -> Result<MatchReport<'p>, EngineError> {
    match_color_with(&Matcher::default(), req, palette)
}

pub fn match_color_with<'p>(
    matcher: &Matcher,
    req: &MatchRequest,
    palette: &'p Palette,
) -> Result<MatchReport<'p>, EngineError> {
    let query = RgbColor::from_hex(&req.color)?;
    let ranked = matcher.rank(query, palette, req.limit)?;
    Ok(MatchReport::from_ranked(query, ranked))
}

/// Matches a randomly chosen palette colour against the palette itself.
pub fn match_random<'p, R: Rng + ?Sized>(
    palette: &'p Palette,
    limit: usize,
    rng: &mut R,
) -> Result<MatchReport<'p>, EngineError> {
    let pick = palette.random_entry(rng).ok_or(EmptyPaletteError)?;
    let query = pick.color();
    let ranked = Matcher::default().rank(query, palette, limit)?;
    Ok(MatchReport::from_ranked(query, ranked))
}
