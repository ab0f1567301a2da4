pub mod icons;
pub mod output;

pub use icons::Icons;
pub use output::{Theme, dim, error, header, info, success, theme, warn};
