mod pool_math;
pub use pool_math::*;
