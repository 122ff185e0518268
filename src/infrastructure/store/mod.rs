//! 리뷰/상품/사이트 저장소 구현.
//! JSON 스냅샷으로 초기화되는 메모리 저장소를 제공한다.

mod memory;

pub use memory::{MemoryStore, StoreSnapshot};
