mod bullet_points;
mod prompt;

pub use bullet_points::{BulletPointPrinter, LineWriter, ProgressBarLineWriter, StdoutLineWriter};
pub use prompt::prompt_yes_no;
