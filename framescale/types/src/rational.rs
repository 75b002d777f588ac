/*!
    Rational number type for time bases, plus timestamp rescaling.

    Capture pipelines carry frame timestamps in a source time base and hand
    them to consumers in another (e.g. a 1/1000 camera clock into a 1/90000
    transport clock). [`rescale`] does a single rounded conversion;
    [`DeltaRescaler`] additionally keeps duration continuity so that a
    stream of coarse timestamps lands on a smooth fine-grained timeline.
*/

use std::fmt;

/**
    A rational number represented as a numerator and denominator.

    Used for time bases (e.g. 1/90000 for MPEG-TS) and frame rates
    (e.g. 30000/1001 for 29.97 fps).
*/
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rational {
    pub num: i32,
    pub den: i32,
}

impl Rational {
    /**
        Create a new rational number.

        # Panics

        Panics if `den` is zero.
    */
    #[inline]
    pub const fn new(num: i32, den: i32) -> Self {
        assert!(den != 0, "denominator cannot be zero");
        Self { num, den }
    }

    /**
        Convert to f64.
    */
    #[inline]
    pub fn to_f64(self) -> f64 {
        self.num as f64 / self.den as f64
    }

    /**
        Invert the rational (swap numerator and denominator).

        # Panics

        Panics if numerator is zero.
    */
    #[inline]
    pub const fn invert(self) -> Self {
        assert!(self.num != 0, "cannot invert zero");
        Self {
            num: self.den,
            den: self.num,
        }
    }
}

impl fmt::Debug for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.num, self.den)
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.num, self.den)
    }
}

impl From<(i32, i32)> for Rational {
    fn from((num, den): (i32, i32)) -> Self {
        Self::new(num, den)
    }
}

impl From<i32> for Rational {
    fn from(num: i32) -> Self {
        Self::new(num, 1)
    }
}

#[derive(Clone, Copy)]
enum Rounding {
    /// Round to nearest, ties away from zero.
    NearInf,
    /// Round toward negative infinity.
    Down,
    /// Round toward positive infinity.
    Up,
}

fn rescale_rnd(ts: i64, from: Rational, to: Rational, rounding: Rounding) -> i64 {
    let mut num = from.num as i128 * to.den as i128;
    let mut den = to.num as i128 * from.den as i128;
    if den < 0 {
        num = -num;
        den = -den;
    }
    let n = ts as i128 * num;

    let q = match rounding {
        Rounding::NearInf => {
            if n >= 0 {
                (n + den / 2) / den
            } else {
                (n - den / 2) / den
            }
        }
        Rounding::Down => {
            let q = n / den;
            if n % den != 0 && n < 0 { q - 1 } else { q }
        }
        Rounding::Up => {
            let q = n / den;
            if n % den != 0 && n > 0 { q + 1 } else { q }
        }
    };

    q as i64
}

/**
    Rescale a timestamp from one time base to another, rounding to nearest
    with ties away from zero.
*/
pub fn rescale(ts: i64, from: Rational, to: Rational) -> i64 {
    rescale_rnd(ts, from, to, Rounding::NearInf)
}

/**
    Duration-aware timestamp rescaler.

    Plain [`rescale`] rounds every timestamp independently, which makes a
    coarse input clock jitter around the ideal fine-grained timeline. The
    rescaler tracks where the previous frame ended (in the frame-size time
    base `fs_tb`) and, when the input clock is coarser than the output
    clock, snaps each timestamp into the rounding window so consecutive
    frames stay `duration` apart.
*/
#[derive(Debug, Default)]
pub struct DeltaRescaler {
    last: Option<i64>,
}

impl DeltaRescaler {
    pub fn new() -> Self {
        Self { last: None }
    }

    /**
        Rescale `ts` from `in_tb` to `out_tb`.

        `duration` is the frame duration in `fs_tb` units; zero disables
        smoothing for this call. Call on frames in presentation order; a
        seek should start over with a fresh rescaler.
    */
    pub fn rescale(
        &mut self,
        ts: i64,
        duration: i64,
        in_tb: Rational,
        fs_tb: Rational,
        out_tb: Rational,
    ) -> i64 {
        debug_assert!(duration >= 0, "frame duration cannot be negative");

        let input_is_finer = (in_tb.num as i64) * (out_tb.den as i64)
            <= (out_tb.num as i64) * (in_tb.den as i64);
        if self.last.is_none() || duration == 0 || input_is_finer {
            return self.simple_round(ts, duration, in_tb, fs_tb, out_tb);
        }

        // Rounding window of ts in fs_tb units.
        let lo = rescale_rnd(2 * ts - 1, in_tb, fs_tb, Rounding::Down) >> 1;
        let hi = (rescale_rnd(2 * ts + 1, in_tb, fs_tb, Rounding::Up) + 1) >> 1;

        let last = self.last.unwrap_or(0);
        if last < 2 * lo - hi || last > 2 * hi - lo {
            // Discontinuity; give up on smoothing for this frame.
            return self.simple_round(ts, duration, in_tb, fs_tb, out_tb);
        }

        let snapped = last.clamp(lo, hi);
        self.last = Some(snapped + duration);
        rescale(snapped, fs_tb, out_tb)
    }

    fn simple_round(
        &mut self,
        ts: i64,
        duration: i64,
        in_tb: Rational,
        fs_tb: Rational,
        out_tb: Rational,
    ) -> i64 {
        self.last = Some(rescale(ts, in_tb, fs_tb) + duration);
        rescale(ts, in_tb, out_tb)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rational() {
        let r = Rational::new(1, 1000);
        assert_eq!(r.num, 1);
        assert_eq!(r.den, 1000);
    }

    #[test]
    #[should_panic(expected = "denominator cannot be zero")]
    fn zero_denominator_panics() {
        Rational::new(1, 0);
    }

    #[test]
    fn to_f64_conversion() {
        assert_eq!(Rational::new(1, 2).to_f64(), 0.5);
        assert_eq!(Rational::new(30000, 1001).to_f64(), 30000.0 / 1001.0);
    }

    #[test]
    fn invert() {
        let r = Rational::new(1, 90000);
        assert_eq!(r.invert(), Rational::new(90000, 1));
    }

    #[test]
    fn display() {
        assert_eq!(format!("{}", Rational::new(1, 90000)), "1/90000");
    }

    #[test]
    fn rescale_exact() {
        // 1500ms on a millisecond clock is 135000 ticks at 90kHz.
        let ms = Rational::new(1, 1000);
        let mpegts = Rational::new(1, 90000);
        assert_eq!(rescale(1500, ms, mpegts), 135_000);
    }

    #[test]
    fn rescale_rounds_ties_away_from_zero() {
        let half = Rational::new(1, 2);
        let unit = Rational::new(1, 1);
        assert_eq!(rescale(1, half, unit), 1);
        assert_eq!(rescale(-1, half, unit), -1);
        // 1/3 of a second rounds down to zero whole seconds.
        assert_eq!(rescale(1, Rational::new(1, 3), unit), 0);
    }

    #[test]
    fn delta_rescaler_first_call_is_simple() {
        let mut r = DeltaRescaler::new();
        let got = r.rescale(
            1500,
            0,
            Rational::new(1, 1000),
            Rational::new(1, 90000),
            Rational::new(1, 90000),
        );
        assert_eq!(got, 135_000);
    }

    #[test]
    fn delta_rescaler_smooths_coarse_clock() {
        // 25fps timestamps (1/25 clock) onto a 90kHz timeline; each frame
        // is 3600 ticks. The second frame must land exactly one duration
        // after the first rather than being independently re-rounded.
        let in_tb = Rational::new(1, 25);
        let fine = Rational::new(1, 90000);
        let mut r = DeltaRescaler::new();

        assert_eq!(r.rescale(0, 3600, in_tb, fine, fine), 0);
        assert_eq!(r.rescale(1, 3600, in_tb, fine, fine), 3600);
        assert_eq!(r.rescale(2, 3600, in_tb, fine, fine), 7200);
    }
}
