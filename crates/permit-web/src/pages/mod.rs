//! Page Components

mod apply;

pub use apply::ApplyPage;
