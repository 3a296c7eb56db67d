mod common;

mod test_fainting;
mod test_turn_resolution;
