#![doc = include_str!("../README.md")]
#![no_std]
#![deny(
    unsafe_code,
    unused_imports,
    unused_variables,
    unused_must_use,
    missing_docs,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::dbg_macro,
    clippy::todo,
    clippy::unimplemented
)]
#![allow(clippy::just_underscores_and_digits, clippy::len_without_is_empty)]

#[macro_use]
extern crate alloc;

pub(crate) type Kbn<T> = compensated_summation::KahanBabuskaNeumaier<T>;

mod utils;
pub(crate) use utils::helper;
pub use utils::{Odometer, WindowCounts};

mod error;
pub use error::{Result, RollingError};

mod traits;
pub use traits::RollingStatistic;

mod rolling_moments;
pub use rolling_moments::RollingMoments;

mod mean;
pub use mean::Mean;

mod variance;
pub use variance::Variance;

mod skewness;
pub use skewness::Skewness;

mod zscore;
pub use zscore::ZScore;

mod maximum;
pub use maximum::Maximum;

mod minimum;
pub use minimum::Minimum;

mod rank;
pub use rank::Rank;

mod quantile;
pub use quantile::Quantile;

mod axis_roller;
pub use axis_roller::AxisRoller;
