/*
[INPUT]:  Client-local persistent state
[OUTPUT]: Token store trait and its file/memory implementations
[POS]:    Persistence layer
[UPDATE]: When new state needs to survive restarts
*/

pub mod storage;

pub use storage::{FileTokenStore, MemoryTokenStore, StorageError, TOKEN_KEY, TokenStore};
