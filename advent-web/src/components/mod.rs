pub mod calendar_grid;
pub mod day_dialog;
pub mod dev_toolbar;
pub mod modal;
pub mod progress;
pub mod tile;

pub use calendar_grid::CalendarGrid;
pub use day_dialog::DayDialog;
pub use dev_toolbar::DevToolbar;
pub use modal::Modal;
pub use progress::ProgressMeter;
pub use tile::Tile;
