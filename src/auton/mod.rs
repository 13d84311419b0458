/// Routines and phases as plain data
pub mod routine;
/// Runs a routine against the hardware, one timed phase after another
pub mod sequencer;
