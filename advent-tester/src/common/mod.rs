pub mod files;
pub mod scenario;
pub mod util;

pub use files::FileSource;
pub use util::{load_config, parse_day_list, parse_instant, split_csv};
