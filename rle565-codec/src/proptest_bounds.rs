//! Property tests for decoder output bounds.
//!
//! These tests feed arbitrary record streams into the decoder over a surface that
//! sits inside a larger block of memory, and check that nothing outside the
//! surface's byte extent, or beyond the pixel budget, is ever written.
