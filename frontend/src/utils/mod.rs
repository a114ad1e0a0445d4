pub mod cancel;
pub mod storage;
pub mod time;
