mod rolling_statistic;
pub use rolling_statistic::RollingStatistic;
