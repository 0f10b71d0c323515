// Domain layer - Dashboard models and chart math
pub mod charts;
pub mod dashboard;
pub mod numeric;
pub mod snapshot;
