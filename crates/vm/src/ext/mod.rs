/// ASCII input/output helpers for programs that talk in text
pub mod ascii;
