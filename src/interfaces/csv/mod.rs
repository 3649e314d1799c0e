pub mod decision_writer;
pub mod gesture_reader;
