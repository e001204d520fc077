use crate::data::Color;
use crate::scale::{SqrtScale, ThresholdScale};
use rust_decimal::Decimal;

pub const TREASURY_GOLD: Color = "#FFD700";
pub const SKY_BLUE: Color = "#42C7FF";
pub const VIOLET: Color = "#7A73FF";
pub const PINK: Color = "#FF3B9A";

const ONE_PERCENT: Decimal = Decimal::from_parts(1, 0, 0, false, 2);
const FIVE_PERCENT: Decimal = Decimal::from_parts(5, 0, 0, false, 2);
const TEN_PERCENT: Decimal = Decimal::from_parts(1, 0, 0, false, 1);

/// Visual parameters of a graph. `Default` gives the stock look.
///
/// `share_colors` has one color per supply-share bucket, the first one for
/// shares below `share_thresholds[0]`. The stock table gives the two top
/// buckets (5-10% and 10% and above) the same pink, so every large holder
/// other than the treasury looks alike.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphStyle {
    pub min_radius: f64,
    pub max_radius: f64,
    pub share_thresholds: [Decimal; 3],
    pub share_colors: [Color; 4],
    pub treasury_color: Color,
    pub link_color: Color,
}

impl Default for GraphStyle {
    fn default() -> Self {
        Self {
            min_radius: 15.0,
            max_radius: 60.0,
            share_thresholds: [ONE_PERCENT, FIVE_PERCENT, TEN_PERCENT],
            share_colors: [SKY_BLUE, VIOLET, PINK, PINK],
            treasury_color: TREASURY_GOLD,
            link_color: SKY_BLUE,
        }
    }
}

impl GraphStyle {
    pub fn radius_scale(&self, max_balance: f64) -> SqrtScale {
        SqrtScale::new(max_balance, (self.min_radius, self.max_radius))
    }

    /// Color buckets keyed by a fraction of the total supply, not a percentage.
    pub fn share_scale(&self) -> ThresholdScale<Color, 3> {
        let [below, outputs @ ..] = self.share_colors;
        ThresholdScale::new(self.share_thresholds, below, outputs)
    }
}
