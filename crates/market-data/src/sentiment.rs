//! Derived bullish/bearish sentiment.
//!
//! No upstream source hands us a 0-100 sentiment directly, so each provider
//! collects whatever signals it has into [`SentimentInputs`] and runs them
//! through an ordered chain of pure tiers. The first tier that produces a
//! value wins:
//!
//! 1. [`from_rating`] - analyst rating (1..=5) or community vote percentage
//! 2. [`from_range_position`] - position inside the high/low range, nudged by trend
//! 3. [`from_change_percent`] - 24h/1d percent change alone
//!
//! When every tier declines the sentiment is absent. Absent means unknown;
//! it is never treated as neutral at this layer.

use num_traits::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;
const FIFTY: Decimal = Decimal::from_parts(50, 0, 0, false, 0);
const TREND_MULTIPLIER: Decimal = Decimal::from_parts(3, 0, 0, false, 0);
const TREND_CAP: Decimal = Decimal::from_parts(15, 0, 0, false, 0);
const CHANGE_MULTIPLIER: Decimal = Decimal::from_parts(5, 0, 0, false, 0);

/// Bucketed sentiment label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SentimentLabel {
    Bullish,
    Neutral,
    Bearish,
}

impl SentimentLabel {
    /// `Bullish` at 70 and above, `Neutral` from 40 to 69, `Bearish` below 40.
    pub fn for_percentage(percentage: u8) -> Self {
        match percentage {
            70.. => SentimentLabel::Bullish,
            40..=69 => SentimentLabel::Neutral,
            _ => SentimentLabel::Bearish,
        }
    }
}

/// A computed sentiment score (0-100) and its label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sentiment {
    pub percentage: u8,
    pub label: SentimentLabel,
}

impl Sentiment {
    pub fn from_percentage(percentage: u8) -> Self {
        let percentage = percentage.min(100);
        Self {
            percentage,
            label: SentimentLabel::for_percentage(percentage),
        }
    }

    /// Clamp to [0, 100] and round half away from zero.
    pub fn from_score(score: Decimal) -> Self {
        let rounded = score
            .clamp(Decimal::ZERO, HUNDRED)
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
        Self::from_percentage(rounded.to_u8().unwrap_or(0))
    }
}

/// A discrete rating-like signal reported by a provider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RatingSignal {
    /// Analyst consensus where 1 is strong buy and 5 is strong sell.
    AnalystRating(Decimal),
    /// Share of community votes that are bullish, already 0-100.
    VotePercentage(Decimal),
}

/// Everything a provider knows that can feed the sentiment chain.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SentimentInputs {
    pub rating: Option<RatingSignal>,
    pub price: Decimal,
    pub range_high: Option<Decimal>,
    pub range_low: Option<Decimal>,
    pub change_percent: Option<Decimal>,
}

pub type SentimentTier = fn(&SentimentInputs) -> Option<Sentiment>;

/// Tiers in priority order.
pub const SENTIMENT_TIERS: [SentimentTier; 3] =
    [from_rating, from_range_position, from_change_percent];

/// Run the chain; the first tier that yields a value wins.
pub fn evaluate(inputs: &SentimentInputs) -> Option<Sentiment> {
    SENTIMENT_TIERS.iter().find_map(|tier| tier(inputs))
}

/// Tier 1: rating 1 maps to 100, rating 5 maps to 0; votes pass through.
pub fn from_rating(inputs: &SentimentInputs) -> Option<Sentiment> {
    match inputs.rating? {
        RatingSignal::AnalystRating(rating) => {
            let score = Decimal::from(5)
                .checked_sub(rating)?
                .checked_div(Decimal::from(4))?
                .checked_mul(HUNDRED)?;
            Some(Sentiment::from_score(score))
        }
        RatingSignal::VotePercentage(votes) => Some(Sentiment::from_score(votes)),
    }
}

/// Tier 2: where the price sits between low and high, plus a capped trend nudge.
///
/// Declines when the position does not fit in a `Decimal`, which happens
/// with degenerate ranges such as 1e-20 wide bounds.
pub fn from_range_position(inputs: &SentimentInputs) -> Option<Sentiment> {
    let high = inputs.range_high?;
    let low = inputs.range_low?;
    if high == low {
        return None;
    }

    let range_position = inputs
        .price
        .checked_sub(low)?
        .checked_div(high.checked_sub(low)?)?
        .checked_mul(HUNDRED)?;
    // Capped anyway, so saturating is exact
    let trend_adjustment = inputs
        .change_percent
        .map(|cp| cp.saturating_mul(TREND_MULTIPLIER).clamp(-TREND_CAP, TREND_CAP))
        .unwrap_or(Decimal::ZERO);

    Some(Sentiment::from_score(range_position.saturating_add(trend_adjustment)))
}

/// Tier 3: `50 + changePercent * 5`.
pub fn from_change_percent(inputs: &SentimentInputs) -> Option<Sentiment> {
    inputs.change_percent.map(sentiment_for_change)
}

/// The change-only mapping on its own, for callers that have nothing else.
///
/// Saturating arithmetic: any change past +-10% lands on the clamp, so an
/// out-of-range upstream value still maps to 100 or 0.
pub fn sentiment_for_change(change_percent: Decimal) -> Sentiment {
    Sentiment::from_score(
        FIFTY.saturating_add(change_percent.saturating_mul(CHANGE_MULTIPLIER)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn inputs() -> SentimentInputs {
        SentimentInputs {
            price: dec!(100),
            ..Default::default()
        }
    }

    #[test]
    fn test_label_boundaries() {
        assert_eq!(SentimentLabel::for_percentage(100), SentimentLabel::Bullish);
        assert_eq!(SentimentLabel::for_percentage(70), SentimentLabel::Bullish);
        assert_eq!(SentimentLabel::for_percentage(69), SentimentLabel::Neutral);
        assert_eq!(SentimentLabel::for_percentage(40), SentimentLabel::Neutral);
        assert_eq!(SentimentLabel::for_percentage(39), SentimentLabel::Bearish);
        assert_eq!(SentimentLabel::for_percentage(0), SentimentLabel::Bearish);
    }

    #[test]
    fn test_analyst_rating_maps_linearly() {
        let mut i = inputs();
        i.rating = Some(RatingSignal::AnalystRating(dec!(1)));
        assert_eq!(from_rating(&i).unwrap().percentage, 100);

        i.rating = Some(RatingSignal::AnalystRating(dec!(5)));
        assert_eq!(from_rating(&i).unwrap().percentage, 0);

        i.rating = Some(RatingSignal::AnalystRating(dec!(2.2)));
        assert_eq!(from_rating(&i).unwrap().percentage, 70);
    }

    #[test]
    fn test_vote_percentage_passes_through() {
        let mut i = inputs();
        i.rating = Some(RatingSignal::VotePercentage(dec!(83.4)));
        let sentiment = from_rating(&i).unwrap();
        assert_eq!(sentiment.percentage, 83);
        assert_eq!(sentiment.label, SentimentLabel::Bullish);
    }

    #[test]
    fn test_range_position_with_trend() {
        let mut i = inputs();
        i.range_high = Some(dec!(200));
        i.range_low = Some(dec!(0));
        i.change_percent = Some(dec!(2));
        // 50 + 6
        assert_eq!(from_range_position(&i).unwrap().percentage, 56);

        i.change_percent = Some(dec!(-10));
        // 50 - 15 (capped)
        assert_eq!(from_range_position(&i).unwrap().percentage, 35);
    }

    #[test]
    fn test_range_position_is_clamped() {
        let mut i = inputs();
        i.price = dec!(210);
        i.range_high = Some(dec!(200));
        i.range_low = Some(dec!(100));
        i.change_percent = Some(dec!(4));
        assert_eq!(from_range_position(&i).unwrap().percentage, 100);
    }

    #[test]
    fn test_range_position_needs_distinct_bounds() {
        let mut i = inputs();
        i.range_high = Some(dec!(100));
        i.range_low = Some(dec!(100));
        assert!(from_range_position(&i).is_none());

        i.range_low = None;
        assert!(from_range_position(&i).is_none());
    }

    #[test]
    fn test_change_percent_mapping() {
        assert_eq!(sentiment_for_change(dec!(0)).percentage, 50);
        assert_eq!(sentiment_for_change(dec!(4)).percentage, 70);
        assert_eq!(sentiment_for_change(dec!(-3)).percentage, 35);
        assert_eq!(sentiment_for_change(dec!(25)).percentage, 100);
        assert_eq!(sentiment_for_change(dec!(-25)).percentage, 0);
    }

    #[test]
    fn test_rating_beats_range_position() {
        let mut i = inputs();
        i.rating = Some(RatingSignal::AnalystRating(dec!(4)));
        i.range_high = Some(dec!(110));
        i.range_low = Some(dec!(10));
        i.change_percent = Some(dec!(1));

        let sentiment = evaluate(&i).unwrap();
        assert_eq!(sentiment.percentage, 25);
        assert_eq!(sentiment.label, SentimentLabel::Bearish);
    }

    #[test]
    fn test_range_beats_change_percent() {
        let mut i = inputs();
        i.range_high = Some(dec!(100));
        i.range_low = Some(dec!(0));
        i.change_percent = Some(dec!(-1));
        // 100 - 3, not 50 - 5
        assert_eq!(evaluate(&i).unwrap().percentage, 97);
    }

    #[test]
    fn test_extreme_change_percent_saturates() {
        let huge = Decimal::from_str_exact("50000000000000000000000000000").unwrap();
        assert_eq!(sentiment_for_change(huge).percentage, 100);
        assert_eq!(sentiment_for_change(-huge).percentage, 0);
        assert_eq!(sentiment_for_change(Decimal::MAX).percentage, 100);
        assert_eq!(sentiment_for_change(Decimal::MIN).percentage, 0);
    }

    #[test]
    fn test_extreme_trend_is_capped() {
        let mut i = inputs();
        i.range_high = Some(dec!(200));
        i.range_low = Some(dec!(0));
        i.change_percent = Some(Decimal::MAX);
        // 50 + 15
        assert_eq!(from_range_position(&i).unwrap().percentage, 65);
    }

    #[test]
    fn test_degenerate_range_falls_through_to_change() {
        let mut i = inputs();
        i.price = dec!(1000000000);
        i.range_high = Some(dec!(0.00000000000000000002));
        i.range_low = Some(dec!(0.00000000000000000001));
        i.change_percent = Some(dec!(2));

        assert!(from_range_position(&i).is_none());
        // 50 + 2 * 5 from the change tier
        assert_eq!(evaluate(&i).unwrap().percentage, 60);
    }

    #[test]
    fn test_out_of_range_rating_does_not_panic() {
        let mut i = inputs();
        i.rating = Some(RatingSignal::AnalystRating(Decimal::MIN));
        assert!(from_rating(&i).is_none());
    }

    #[test]
    fn test_no_inputs_means_no_sentiment() {
        assert!(evaluate(&inputs()).is_none());
    }
}
