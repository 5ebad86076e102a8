//! WebAssembly interface for using word sets from JavaScript.
//!
//! Elements cross the boundary as `u32`, which is `usize` on wasm32. Elements
//! that do not fit are reported as errors rather than truncated.

use std::num::TryFromIntError;
use wasm_bindgen::prelude::*;

use crate::WordSet;

/// WASM-friendly wrapper around [`WordSet`].
#[wasm_bindgen]
pub struct WasmWordSet {
    set: WordSet,
}

#[wasm_bindgen]
impl WasmWordSet {
    /// Create a new empty set.
    ///
    /// # Example (JavaScript)
    /// ```javascript
    /// const set = new WasmWordSet();
    /// ```
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        // Enable panic messages in browser console
        console_error_panic_hook::set_once();

        Self {
            set: WordSet::new(),
        }
    }

    /// Parse a `{1, 2, 3}` rendering into a new set.
    ///
    /// # Example (JavaScript)
    /// ```javascript
    /// const set = WasmWordSet.parse("{2, 6, 7}");
    /// ```
    pub fn parse(text: &str) -> Result<WasmWordSet, JsValue> {
        let set = text
            .parse::<WordSet>()
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self { set })
    }

    pub fn add(&mut self, x: u32) {
        self.set.add(x as usize);
    }

    /// Add every element of a `Uint32Array`.
    pub fn add_all(&mut self, xs: &[u32]) {
        self.set.add_all(xs.iter().map(|&x| x as usize));
    }

    pub fn has(&self, x: u32) -> bool {
        self.set.has(x as usize)
    }

    /// Remove an element, returning whether it was present.
    pub fn remove(&mut self, x: u32) -> bool {
        self.set.remove(x as usize)
    }

    pub fn clear(&mut self) {
        self.set.clear();
    }

    pub fn len(&self) -> usize {
        self.set.len()
    }

    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }

    pub fn copy(&self) -> WasmWordSet {
        Self {
            set: self.set.copy(),
        }
    }

    pub fn union_with(&mut self, other: &WasmWordSet) {
        self.set.union_with(&other.set);
    }

    pub fn intersect_with(&mut self, other: &WasmWordSet) {
        self.set.intersect_with(&other.set);
    }

    pub fn difference_with(&mut self, other: &WasmWordSet) {
        self.set.difference_with(&other.set);
    }

    pub fn symmetric_difference_with(&mut self, other: &WasmWordSet) {
        self.set.symmetric_difference_with(&other.set);
    }

    /// Exact word-level equality (trailing zero words count).
    pub fn structurally_equal(&self, other: &WasmWordSet) -> bool {
        self.set.structurally_equal(&other.set)
    }

    /// Elements in ascending order as a `Uint32Array`.
    ///
    /// Fails if an element does not fit in `u32` (only possible off wasm32).
    pub fn elems(&self) -> Result<Vec<u32>, JsValue> {
        to_u32s(self.set.iter()).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    #[wasm_bindgen(js_name = toString)]
    pub fn to_js_string(&self) -> String {
        self.set.to_string()
    }
}

impl Default for WasmWordSet {
    fn default() -> Self {
        Self::new()
    }
}

/// Convert elements to `u32` without truncation.
fn to_u32s<I>(xs: I) -> Result<Vec<u32>, TryFromIntError>
where
    I: IntoIterator<Item = usize>,
{
    xs.into_iter().map(u32::try_from).collect()
}
