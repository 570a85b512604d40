//! Procedural coin-pile layout generation
//!
//! Maps a scalar balance and a color palette to a set of positioned,
//! rotated, scaled coin tokens inside a fixed 400x400 canvas. The pile
//! grows taller, wider, and denser with the balance and saturates at the
//! extremes so the picture stays legible.
//!
//! Generation is pure apart from randomness, which is injected through
//! [`rand::Rng`] so tests can seed it; the convenience entry point
//! [`generate`] uses the thread RNG and intentionally produces a slightly
//! different pile on every call.

use rand::Rng;

use crate::domain::core::Rgb;

/// Layout canvas edge length, in canvas units
pub const CANVAS_SIZE: f32 = 400.0;
/// Horizontal center of the pile
pub const CENTER_X: f64 = 200.0;
/// Vertical floor line coins settle onto
pub const FLOOR_Y: f64 = 360.0;
/// Hard cap on generated tokens, regardless of balance
pub const MAX_COINS: usize = 2500;

/// Coins per unit of sqrt(balance)
const COUNT_FACTOR: f64 = 2.5;
/// sqrt(balance) at which the pile reaches full height and spread
const SATURATION_ROOT: f64 = 1000.0;
const BASE_PILE_HEIGHT: f64 = 20.0;
const MAX_EXTRA_HEIGHT: f64 = 300.0;
const BASE_SPREAD: f64 = 100.0;
const MAX_SPREAD: f64 = 180.0;
/// Fraction of the base radius lost by the topmost tokens
const TAPER_STRENGTH: f64 = 0.8;
/// Exponent biasing radial samples away from the exact center
const RADIAL_BIAS: f64 = 0.6;
/// Downward shift per unit of normalized distance from center
const SLUMP_STRENGTH: f64 = 15.0;
const JITTER: f64 = 4.0;
const MIN_SCALE: f64 = 0.6;
const SCALE_RANGE: f64 = 0.5;

/// Palette used when a vault supplies none
pub const DEFAULT_PALETTE: [Rgb; 6] = [
    Rgb::from_u32(0xffd700),
    Rgb::from_u32(0xffc700),
    Rgb::from_u32(0xdaa520),
    Rgb::from_u32(0xb8860b),
    Rgb::from_u32(0xe6b422),
    Rgb::from_u32(0xf0e68c),
];

/// A single decorative token in the pile
///
/// Coins are regenerated wholesale whenever the balance changes and are
/// never mutated afterwards. They represent pile volume, not accounting
/// units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coin {
    pub index: usize,
    pub x: f32,
    pub y: f32,
    /// Rotation in degrees, `[0, 360)`
    pub rotation: f32,
    /// Uniform scale factor, `[0.6, 1.1]`
    pub scale: f32,
    pub color: Rgb,
}

/// Pile shape parameters derived once per generation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PileGeometry {
    /// Number of tokens to place
    pub count: usize,
    /// Normalized fullness in `[0, 1]`
    pub relative_height: f64,
    /// Vertical extent of the pile in canvas units, `[20, 320]`
    pub pile_height: f64,
    /// Maximum horizontal radius of the pile base, `[100, 180]`
    pub spread: f64,
}

impl PileGeometry {
    /// Derives the pile shape for a balance
    ///
    /// Token count grows with the square root of the balance, so large
    /// hoards thicken the pile without flooding the canvas. Zero and
    /// negative balances (and non-finite ones) produce an empty pile.
    pub fn for_balance(balance: f64) -> Self {
        if balance.is_nan() || balance <= 0.0 {
            return Self {
                count: 0,
                relative_height: 0.0,
                pile_height: BASE_PILE_HEIGHT,
                spread: BASE_SPREAD,
            };
        }

        let root = balance.sqrt();
        let count = ((root * COUNT_FACTOR).floor() as usize).min(MAX_COINS);
        let relative_height = (root / SATURATION_ROOT).min(1.0);

        Self {
            count,
            relative_height,
            pile_height: BASE_PILE_HEIGHT + relative_height * MAX_EXTRA_HEIGHT,
            spread: BASE_SPREAD + relative_height * (MAX_SPREAD - BASE_SPREAD),
        }
    }
}

/// Generates a coin pile for a balance using unseeded randomness
///
/// Repeated calls with the same balance produce visually similar but not
/// identical piles. Use [`generate_with`] with a seeded RNG when the
/// layout must be reproducible.
pub fn generate(balance: f64, palette: &[Rgb]) -> Vec<Coin> {
    generate_with(&mut rand::thread_rng(), balance, palette)
}

/// Generates a coin pile using the provided random source
///
/// # Arguments
/// * `rng` - Random source; seed it for reproducible layouts
/// * `balance` - Vault balance; empty pile when not positive
/// * `palette` - Coin colors; [`DEFAULT_PALETTE`] is used when empty
pub fn generate_with<R: Rng>(rng: &mut R, balance: f64, palette: &[Rgb]) -> Vec<Coin> {
    let geometry = PileGeometry::for_balance(balance);
    if geometry.count == 0 {
        return Vec::new();
    }

    let palette: &[Rgb] = if palette.is_empty() {
        &DEFAULT_PALETTE
    } else {
        palette
    };

    let mut coins = Vec::with_capacity(geometry.count);
    for index in 0..geometry.count {
        // Later tokens sit conceptually higher and are squeezed toward the
        // center, turning the cylinder into a mound.
        let progress = index as f64 / geometry.count as f64;
        let taper = 1.0 - progress * TAPER_STRENGTH;
        let radius_limit = geometry.spread * taper;

        let angle = rng.gen_range(0.0..std::f64::consts::TAU);
        let radius = rng.gen_range(0.0f64..1.0).powf(RADIAL_BIAS) * radius_limit;

        let x = CENTER_X + radius * angle.cos();
        // Tokens far from the center settle lower on the mound.
        let slump = ((x - CENTER_X).abs() / geometry.spread) * SLUMP_STRENGTH;
        let jitter = rng.gen_range(-JITTER..JITTER);
        let y = FLOOR_Y - progress * geometry.pile_height + slump + jitter;

        coins.push(Coin {
            index,
            x: x as f32,
            y: y as f32,
            rotation: rng.gen_range(0.0f64..360.0) as f32,
            scale: (MIN_SCALE + rng.gen_range(0.0f64..1.0) * SCALE_RANGE) as f32,
            color: palette[rng.gen_range(0..palette.len())],
        });
    }

    coins
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn seeded() -> StdRng {
        StdRng::seed_from_u64(0x5eed)
    }

    #[test]
    fn empty_pile_for_zero_and_negative_balances() {
        for balance in [0.0, -1.0, -5000.0, f64::NAN] {
            assert!(
                generate_with(&mut seeded(), balance, &[]).is_empty(),
                "balance {balance} should produce no coins"
            );
        }
    }

    #[test]
    fn count_follows_square_root_formula() {
        for (balance, expected) in [(1.0, 2), (16.0, 10), (150.0, 30), (10_000.0, 250)] {
            let geometry = PileGeometry::for_balance(balance);
            assert_eq!(geometry.count, expected, "balance {balance}");
            assert_eq!(generate_with(&mut seeded(), balance, &[]).len(), expected);
        }
    }

    #[test]
    fn count_saturates_at_cap() {
        assert_eq!(PileGeometry::for_balance(1_000_000.0).count, MAX_COINS);
        assert_eq!(PileGeometry::for_balance(4_000_000_000_000.0).count, MAX_COINS);
    }

    #[test]
    fn count_is_monotonic_in_balance() {
        let mut previous = 0;
        for balance in (0..2_000_000).step_by(9973) {
            let count = PileGeometry::for_balance(balance as f64).count;
            assert!(
                count >= previous,
                "count regressed at balance {balance}: {count} < {previous}"
            );
            previous = count;
        }
    }

    #[test]
    fn geometry_saturates_at_extremes() {
        let geometry = PileGeometry::for_balance(10_000_000.0);
        assert_eq!(geometry.relative_height, 1.0);
        assert_eq!(geometry.pile_height, 320.0);
        assert_eq!(geometry.spread, 180.0);
    }

    #[test]
    fn tokens_stay_within_spread_and_ranges() {
        let balance = 250_000.0;
        let geometry = PileGeometry::for_balance(balance);
        let coins = generate_with(&mut seeded(), balance, &[]);

        for coin in &coins {
            let offset = (coin.x as f64 - CENTER_X).abs();
            assert!(
                offset <= geometry.spread + 0.001,
                "coin {} at x={} escapes spread {}",
                coin.index,
                coin.x,
                geometry.spread
            );
            assert!((0.0..360.0).contains(&coin.rotation));
            assert!((0.6..=1.1).contains(&coin.scale));
            assert!(coin.y > 0.0 && (coin.y as f64) < CANVAS_SIZE as f64);
        }
    }

    #[test]
    fn seeded_generation_is_reproducible() {
        let first = generate_with(&mut StdRng::seed_from_u64(42), 777.0, &[]);
        let second = generate_with(&mut StdRng::seed_from_u64(42), 777.0, &[]);
        assert_eq!(first, second);
    }

    #[test]
    fn colors_come_from_the_given_palette() {
        let palette = [Rgb::from_u32(0x20bf6b), Rgb::from_u32(0x26de81)];
        let coins = generate_with(&mut seeded(), 500.0, &palette);

        assert!(!coins.is_empty());
        for coin in &coins {
            assert!(palette.contains(&coin.color));
        }
    }

    #[test]
    fn empty_palette_falls_back_to_default_gold() {
        let coins = generate_with(&mut seeded(), 500.0, &[]);
        for coin in &coins {
            assert!(DEFAULT_PALETTE.contains(&coin.color));
        }
    }
}
