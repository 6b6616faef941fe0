mod spec;

pub use spec::{ApiParameter, ApiSpec};
