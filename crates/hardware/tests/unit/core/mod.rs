/// I1/D1/LL orchestration and counter accumulation.
pub mod hierarchy;
