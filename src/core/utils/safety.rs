//! Zero-Cost Safety Macros
//!
//! In Debug mode: Normal bounds-checked access (panics with useful errors)
//! In Release mode: Unsafe unchecked access (zero overhead)
//!
//! Only use on indices that were already bounds-checked by the caller
//! (see `TileGrid::tile`).
//!
//! Usage:
//! ```rust
//! use tilecollide_engine::fast;
//!
//! let idx = 2;
//!
//! let cells = vec![0u32, 1, 2, 3, 4];
//! // Read: fast!(slice, [index])
//! let val = *fast!(cells, [idx]);
//! assert_eq!(val, 2);
//!
//! let mut cells = vec![0u32; 5];
//! // Write: fast!(slice, [index] = value)
//! fast!(cells, [idx] = 1);
//! assert_eq!(cells[idx], 1);
//! ```

/// Zero-cost bounds checking macro
///
/// - Debug: Uses normal indexing with bounds checks
/// - Release: Uses get_unchecked/get_unchecked_mut
#[macro_export]
macro_rules! fast {
    // Read pattern: fast!(slice, [index])
    ($slice:expr, [$index:expr]) => {{
        #[cfg(debug_assertions)]
        {
            &$slice[$index]
        }
        #[cfg(not(debug_assertions))]
        {
            unsafe { $slice.get_unchecked($index) }
        }
    }};

    // Write pattern: fast!(slice, [index] = value)
    ($slice:expr, [$index:expr] = $val:expr) => {{
        #[cfg(debug_assertions)]
        {
            $slice[$index] = $val;
        }
        #[cfg(not(debug_assertions))]
        {
            unsafe { *$slice.get_unchecked_mut($index) = $val; }
        }
    }};
}
