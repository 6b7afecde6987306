mod batch;
mod game_info;
mod player_stat;

pub use batch::*;
pub use game_info::*;
pub use player_stat::*;

/// A flat output row with a fixed, ordered set of columns.
///
/// `COLUMNS` matches the serde field names of the implementing struct, so a
/// header can be written even when there are no rows to serialize.
pub trait TableRecord: serde::Serialize {
    const COLUMNS: &'static [&'static str];
}
