#![cfg(target_arch = "wasm32")]

use advent_core::{RevealedStore, load_revealed};
use advent_web::storage::LocalRevealedStore;
use wasm_bindgen_test::*;

wasm_bindgen_test::wasm_bindgen_test_configure!(run_in_browser);

const KEY: &str = "advent.revealed.test";

#[wasm_bindgen_test]
fn local_store_round_trips_raw_values() {
    let store = LocalRevealedStore;
    store.write(KEY, "[2,5]").expect("write");
    assert_eq!(store.read(KEY).expect("read").as_deref(), Some("[2,5]"));
    assert_eq!(load_revealed(&store, KEY).len(), 2);
}

#[wasm_bindgen_test]
fn corrupt_value_loads_as_empty() {
    let store = LocalRevealedStore;
    store.write(KEY, "{broken").expect("write");
    assert!(load_revealed(&store, KEY).is_empty());
}
