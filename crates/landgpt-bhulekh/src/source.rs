//! The [`LandRecordSource`] trait and the politeness delay applied between
//! portal requests.

use std::{future::Future, time::Duration};

use landgpt_core::record::{NewLandRecord, ParcelId};
use rand::Rng;

/// Anything that can list the administrative hierarchy and return the
/// khatauni row for a parcel.
pub trait LandRecordSource: Send {
  type Error: std::error::Error + Send + Sync + 'static;

  fn districts(&self) -> Vec<String>;

  fn tehsils(&self, district: &str) -> Vec<String>;

  fn villages(&self, district: &str, tehsil: &str) -> Vec<String>;

  /// Fetch the record for one khasra number. The returned record carries
  /// `parcel` as its identity.
  fn fetch_khatauni<'a>(
    &'a mut self,
    parcel: &'a ParcelId,
  ) -> impl Future<Output = Result<NewLandRecord, Self::Error>> + Send + 'a;
}

/// How long to wait before each request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DelayPolicy {
  #[default]
  None,
  Fixed { millis: u64 },
  /// Uniformly random in `[min_millis, max_millis]`.
  Uniform { min_millis: u64, max_millis: u64 },
}

impl DelayPolicy {
  /// Policy for a `[min, max]` millisecond range: zero/zero disables the
  /// delay and equal bounds give a fixed one.
  pub fn from_range(min_millis: u64, max_millis: u64) -> Self {
    match (min_millis, max_millis) {
      (0, 0) => Self::None,
      (min, max) if min == max => Self::Fixed { millis: min },
      (min_millis, max_millis) => Self::Uniform { min_millis, max_millis },
    }
  }

  pub fn sample(&self, rng: &mut impl Rng) -> Duration {
    let millis = match *self {
      Self::None => 0,
      Self::Fixed { millis } => millis,
      Self::Uniform { min_millis, max_millis } if max_millis > min_millis => {
        rng.gen_range(min_millis..=max_millis)
      }
      Self::Uniform { min_millis, .. } => min_millis,
    };
    Duration::from_millis(millis)
  }
}

#[cfg(test)]
mod tests {
  use rand::{SeedableRng, rngs::StdRng};

  use super::*;

  #[test]
  fn uniform_delay_stays_in_bounds() {
    let mut rng = StdRng::seed_from_u64(7);
    let policy = DelayPolicy::Uniform { min_millis: 10, max_millis: 30 };
    for _ in 0..100 {
      let d = policy.sample(&mut rng);
      assert!(d >= Duration::from_millis(10) && d <= Duration::from_millis(30));
    }
  }

  #[test]
  fn inverted_uniform_bounds_use_minimum() {
    let mut rng = StdRng::seed_from_u64(7);
    let policy = DelayPolicy::Uniform { min_millis: 50, max_millis: 5 };
    assert_eq!(policy.sample(&mut rng), Duration::from_millis(50));
    assert_eq!(DelayPolicy::None.sample(&mut rng), Duration::ZERO);
  }

  #[test]
  fn range_bounds_pick_the_policy() {
    assert_eq!(DelayPolicy::from_range(0, 0), DelayPolicy::None);
    assert_eq!(DelayPolicy::from_range(250, 250), DelayPolicy::Fixed { millis: 250 });
    assert_eq!(
      DelayPolicy::from_range(1000, 3000),
      DelayPolicy::Uniform { min_millis: 1000, max_millis: 3000 }
    );
  }
}
