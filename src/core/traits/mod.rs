pub mod audit;
pub mod credentials;
pub mod storage;
