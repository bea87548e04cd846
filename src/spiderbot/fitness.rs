//! Motor-coordination fitness.

use super::motor::MotorGene;
use super::SpiderGenome;
use crate::ga::{Chromosome, FitnessFunction};

/// Weight of each of the three direction checks.
const DIRECTION_WEIGHT: f64 = 0.5 / 3.0;
/// Weight of the left/back speed difference.
const SIDE_SYNC_WEIGHT: f64 = 0.25;
/// Weight of each side-to-third-motor speed ratio.
const RATIO_WEIGHT: f64 = 0.125;

/// Scores a three-motor command as `1 - error`.
///
/// Motors are read in gene order as `m1`, `m2`, `m3`. Half of the error
/// comes from direction, split in thirds: `m1` and `m2` should run
/// reversed and `m3` forward. The other half comes from speed: the
/// `m1`/`m2` difference (scaled by 255, weight 0.25), and for each of `m1`
/// and `m2` how far `m3` is from half its speed (scaled by 128, weight
/// 0.125, maxed out when `m3` is the faster one).
///
/// A perfect command scores 1.0 and the worst scores 0.0.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpiderFitness;

impl SpiderFitness {
    /// Scores three decoded motors.
    pub fn score(&self, motors: &[MotorGene; 3]) -> f64 {
        let [m1, m2, m3] = motors;

        let direction_error = [m1.reverse, m2.reverse, !m3.reverse]
            .iter()
            .filter(|&&ok| !ok)
            .count() as f64
            * DIRECTION_WEIGHT;

        let (s1, s2, s3) = (i32::from(m1.speed), i32::from(m2.speed), i32::from(m3.speed));
        let side_sync = f64::from((s1 - s2).abs()) / 255.0 * SIDE_SYNC_WEIGHT;
        let ratio = |side: i32| {
            let err = if s3 > side {
                1.0
            } else {
                // Halving truncates
                f64::from((side / 2 - s3).abs()) / 128.0
            };
            err * RATIO_WEIGHT
        };

        1.0 - (direction_error + side_sync + ratio(s1) + ratio(s2))
    }
}

impl FitnessFunction<SpiderGenome> for SpiderFitness {
    fn rate(&self, candidate: &Chromosome<SpiderGenome>) -> f64 {
        match candidate.genes() {
            [a, b, c] => self.score(&[*a, *b, *c]),
            // SpiderGenome always decodes three motors
            _ => 0.0,
        }
    }
}
